use super::Host;
use crate::Result;
use crate::fields::{all_fields, resolve_fields};
use crate::reports::schema_json;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Comma-separated field ids to describe (default is the standard field set)
    #[arg(long, short = 'f', value_name = "FIELDS", value_delimiter = ',', conflicts_with = "all")]
    pub fields: Vec<String>,

    /// Describe every known field
    #[arg(long)]
    pub all: bool,
}

/// Print the JSON schema of the selected fields
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized
pub fn print_schema<H: Host>(host: &mut H, args: &SchemaArgs) -> Result<()> {
    let specs = if args.all { all_fields() } else { resolve_fields(&args.fields) };
    let text = serde_json::to_string_pretty(&schema_json(&specs))?;

    let _ = writeln!(host.output(), "{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::fields::{DEFAULT_FIELD_IDS, FIELD_DEFINITIONS};
    use serde_json::Value;

    fn schema_for(args: &SchemaArgs) -> Vec<Value> {
        let mut host = TestHost::new();
        print_schema(&mut host, args).unwrap();
        let parsed: Value = serde_json::from_str(&host.output_str()).unwrap();
        parsed.as_array().unwrap().clone()
    }

    #[test]
    fn test_default_schema() {
        let schema = schema_for(&SchemaArgs { fields: Vec::new(), all: false });
        assert_eq!(schema.len(), DEFAULT_FIELD_IDS.len());
        assert_eq!(schema[0]["name"], DEFAULT_FIELD_IDS[0]);
    }

    #[test]
    fn test_all_fields() {
        let schema = schema_for(&SchemaArgs { fields: Vec::new(), all: true });
        assert_eq!(schema.len(), FIELD_DEFINITIONS.len());
    }

    #[test]
    fn test_selected_fields_keep_order() {
        let schema = schema_for(&SchemaArgs {
            fields: vec!["click_through_rate".into(), "date".into()],
            all: false,
        });
        let names: Vec<_> = schema.iter().map(|field| field["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["click_through_rate", "date"]);
        assert_eq!(schema[0]["conceptType"], "METRIC");
        assert_eq!(schema[1]["conceptType"], "DIMENSION");
    }
}
