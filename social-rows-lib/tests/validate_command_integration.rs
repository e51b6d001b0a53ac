//! Integration tests for the `init` and `validate` commands.
//!
//! Exercises configuration generation and validation through `run()`. No network access.

use social_rows_lib::Host;
use std::fs;

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_init_then_validate() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("social-rows.toml");
    let config_arg = config_path.to_str().unwrap();

    let mut host = TestHost::new();
    social_rows_lib::run(&mut host, ["social-rows", "init", config_arg])
        .await
        .expect("init should succeed");
    assert!(config_path.is_file());

    let mut host = TestHost::new();
    let result = social_rows_lib::run(&mut host, ["social-rows", "validate", "--config", config_arg]).await;
    assert!(result.is_ok(), "generated configuration should be valid: {result:?}");

    let output = host.output_str();
    assert!(output.contains("Configuration file is valid"), "{output}");
    assert!(output.contains(config_arg), "{output}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_validate_reports_bad_config() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "api_base_url = \"not a url\"\n").unwrap();

    let mut host = TestHost::new();
    let result = social_rows_lib::run(&mut host, ["social-rows", "validate", "--config", config_path.to_str().unwrap()]).await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_schema_command_prints_fields() {
    let mut host = TestHost::new();
    let result = social_rows_lib::run(&mut host, ["social-rows", "schema", "--fields", "date,clicks,bogus"]).await;
    assert!(result.is_ok(), "{result:?}");

    let schema: serde_json::Value = serde_json::from_str(&host.output_str()).unwrap();
    let names: Vec<_> = schema.as_array().unwrap().iter().map(|field| field["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["date", "clicks", "bogus"]);
    assert_eq!(schema[2]["dataType"], "NUMBER");
}
