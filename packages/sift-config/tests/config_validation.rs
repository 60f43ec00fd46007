use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use sift_config::Error;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.")
}

fn with_table<F>(section: &str, edit: F) -> String
where
	F: FnOnce(&mut toml::Table),
{
	let mut value = sample_value();
	let root = value.as_table_mut().expect("Template config must be a table.");
	let table = root
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.unwrap_or_else(|| panic!("Template config must include [{section}]."));

	edit(table);

	toml::to_string(&value).expect("Failed to render template config.")
}

fn write_temp_config(contents: &str) -> PathBuf {
	let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("Clock drift.").as_nanos();
	let seq = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
	let path = env::temp_dir().join(format!("sift_config_{nanos}_{seq}.toml"));

	fs::write(&path, contents).expect("Failed to write temp config.");

	path
}

fn validation_message(raw: &str) -> String {
	match sift_config::from_toml_str(raw) {
		Err(Error::Validation { message }) => message,
		Err(err) => panic!("Expected validation error, got {err:?}."),
		Ok(_) => panic!("Expected validation error, config was accepted."),
	}
}

#[test]
fn sample_config_loads_from_file() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML);
	let cfg = sift_config::load(&path).expect("Sample config must load.");

	fs::remove_file(&path).ok();

	assert_eq!(cfg.service.request_timeout_ms, 5_000);
	assert_eq!(cfg.listing.default_limit, 20);
	assert_eq!(cfg.listing.max_limit, 100);
	assert_eq!(cfg.archive.precedence, "status");
	assert_eq!(cfg.security.api_auth_token.as_deref(), Some("local-token"));
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("sift_config_missing_for_sure.toml");
	let err = sift_config::load(&path).expect_err("Missing file must fail.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn optional_sections_fall_back_to_defaults() {
	let mut value = sample_value();
	let root = value.as_table_mut().expect("Template config must be a table.");

	root.remove("listing");
	root.remove("archive");

	let raw = toml::to_string(&value).expect("Failed to render template config.");
	let cfg = sift_config::from_toml_str(&raw).expect("Config without optional sections loads.");

	assert_eq!(cfg.listing.default_limit, 20);
	assert_eq!(cfg.listing.max_limit, 100);
	assert_eq!(cfg.archive.precedence, "status");
	assert_eq!(cfg.archive.default_window, "none");
}

#[test]
fn blank_auth_token_is_normalized_away() {
	let raw = with_table("security", |security| {
		security.insert("api_auth_token".to_string(), Value::String("   ".to_string()));
	});
	let cfg = sift_config::from_toml_str(&raw).expect("Blank token is not an error.");

	assert!(cfg.security.api_auth_token.is_none());
}

#[test]
fn archive_values_are_case_insensitive() {
	let raw = with_table("archive", |archive| {
		archive.insert("precedence".to_string(), Value::String(" Status_Or_Age ".to_string()));
		archive.insert("default_window".to_string(), Value::String("WEEK".to_string()));
	});
	let cfg = sift_config::from_toml_str(&raw).expect("Mixed-case archive values load.");

	assert_eq!(cfg.archive.precedence, "status_or_age");
	assert_eq!(cfg.archive.default_window, "week");
}

#[test]
fn unknown_archive_precedence_is_rejected() {
	let raw = with_table("archive", |archive| {
		archive.insert("precedence".to_string(), Value::String("newest".to_string()));
	});

	assert_eq!(
		validation_message(&raw),
		"archive.precedence must be one of status, status_or_age, or age."
	);
}

#[test]
fn window_without_age_precedence_is_rejected() {
	let raw = with_table("archive", |archive| {
		archive.insert("default_window".to_string(), Value::String("month".to_string()));
	});

	assert!(validation_message(&raw).starts_with("archive.default_window has no effect"));
}

#[test]
fn default_limit_must_fit_under_max_limit() {
	let raw = with_table("listing", |listing| {
		listing.insert("default_limit".to_string(), Value::Integer(500));
	});

	assert_eq!(
		validation_message(&raw),
		"listing.default_limit must be between 1 and listing.max_limit."
	);
}

#[test]
fn zero_timeout_is_rejected() {
	let raw = with_table("service", |service| {
		service.insert("request_timeout_ms".to_string(), Value::Integer(0));
	});

	assert_eq!(
		validation_message(&raw),
		"service.request_timeout_ms must be greater than zero."
	);
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err = sift_config::from_toml_str("[service\nhttp_bind = 1").expect_err("Must not parse.");

	assert!(matches!(err, Error::ParseInline { .. }));
}
