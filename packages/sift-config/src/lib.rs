mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Archive, Config, Listing, Postgres, Security, Service, Storage};

use std::{fs, path::Path};

pub const ARCHIVE_PRECEDENCES: [&str; 3] = ["status", "status_or_age", "age"];
pub const ARCHIVE_WINDOWS: [&str; 5] = ["none", "day", "week", "month", "all"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	finish(cfg)
}

pub fn from_toml_str(raw: &str) -> Result<Config> {
	let cfg: Config = toml::from_str(raw).map_err(|err| Error::ParseInline { source: err })?;

	finish(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.request_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "service.request_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.listing.max_limit == 0 {
		return Err(Error::Validation {
			message: "listing.max_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.listing.default_limit == 0 || cfg.listing.default_limit > cfg.listing.max_limit {
		return Err(Error::Validation {
			message: "listing.default_limit must be between 1 and listing.max_limit.".to_string(),
		});
	}
	if !ARCHIVE_PRECEDENCES.contains(&cfg.archive.precedence.as_str()) {
		return Err(Error::Validation {
			message: "archive.precedence must be one of status, status_or_age, or age."
				.to_string(),
		});
	}
	if !ARCHIVE_WINDOWS.contains(&cfg.archive.default_window.as_str()) {
		return Err(Error::Validation {
			message: "archive.default_window must be one of none, day, week, month, or all."
				.to_string(),
		});
	}
	if cfg.archive.precedence == "status" && cfg.archive.default_window != "none" {
		return Err(Error::Validation {
			message: "archive.default_window has no effect when archive.precedence is status; set it to none."
				.to_string(),
		});
	}

	Ok(())
}

fn finish(mut cfg: Config) -> Result<Config> {
	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

fn normalize(cfg: &mut Config) {
	cfg.archive.precedence = cfg.archive.precedence.trim().to_ascii_lowercase();
	cfg.archive.default_window = cfg.archive.default_window.trim().to_ascii_lowercase();

	if cfg.security.api_auth_token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false)
	{
		cfg.security.api_auth_token = None;
	}
}
