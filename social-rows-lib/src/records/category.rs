use strum::{Display, EnumIter, IntoStaticStr};

/// Kind of metric record within a platform bundle.
///
/// Variants are declared in assembly order: rows for pages come first, breakdowns last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Page,
    Post,
    Follower,
    Video,
    Breakdown,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Every payload key accepted for this category, canonical key first
    #[must_use]
    pub const fn bundle_keys(self) -> &'static [&'static str] {
        match self {
            Self::Page => &["page_metrics"],
            Self::Post => &["post_metrics"],
            Self::Follower => &["follower_metrics", "fan_metrics"],
            Self::Video => &["video_metrics"],
            Self::Breakdown => &["breakdown_data", "breakdown_metrics"],
        }
    }

    /// Resolve a payload key (or a record's `content_type` tag) to a category
    #[must_use]
    pub fn from_bundle_key(key: &str) -> Option<Self> {
        use strum::IntoEnumIterator;

        Self::iter().find(|category| category.bundle_keys().contains(&key) || category.as_str() == key)
    }
}
