use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub listing: Listing,
	#[serde(default)]
	pub archive: Archive,
	pub security: Security,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	/// Upper bound for one list request, store round-trips included.
	#[serde(default = "default_request_timeout_ms")]
	pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
}
impl Default for Listing {
	fn default() -> Self {
		Self { default_limit: default_limit(), max_limit: default_max_limit() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Archive {
	/// One of "status", "status_or_age", or "age".
	#[serde(default = "default_archive_precedence")]
	pub precedence: String,
	/// One of "none", "day", "week", "month", or "all". Requests may override it.
	#[serde(default = "default_archive_window")]
	pub default_window: String,
}
impl Default for Archive {
	fn default() -> Self {
		Self {
			precedence: default_archive_precedence(),
			default_window: default_archive_window(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	pub api_auth_token: Option<String>,
}

fn default_request_timeout_ms() -> u64 {
	10_000
}

fn default_limit() -> u32 {
	20
}

fn default_max_limit() -> u32 {
	100
}

fn default_archive_precedence() -> String {
	"status".to_string()
}

fn default_archive_window() -> String {
	"none".to_string()
}
