use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Social network a metric record was collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString, IntoStaticStr, ValueEnum, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[value(name = "linkedin")]
    LinkedIn,
    Facebook,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Key under which the API nests this platform's categories (`linkedin_data`, `facebook_data`)
    #[must_use]
    pub const fn data_key(self) -> &'static str {
        match self {
            Self::LinkedIn => "linkedin_data",
            Self::Facebook => "facebook_data",
        }
    }
}
