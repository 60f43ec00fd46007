use time::{Duration, OffsetDateTime};

use crate::status::Status;

/// Which side of the archive line a request wants to see.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ArchiveMode {
	#[default]
	ExcludeArchived,
	OnlyArchived,
}
impl ArchiveMode {
	/// Only the literal `"true"` selects archived items.
	pub fn from_param(raw: Option<&str>) -> Self {
		match raw.map(str::trim) {
			Some("true") => Self::OnlyArchived,
			_ => Self::ExcludeArchived,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ArchiveWindow {
	#[default]
	None,
	Day,
	Week,
	Month,
	All,
}
impl ArchiveWindow {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"none" => Some(Self::None),
			"day" => Some(Self::Day),
			"week" => Some(Self::Week),
			"month" => Some(Self::Month),
			"all" => Some(Self::All),
			_ => None,
		}
	}

	fn max_age(self) -> Option<Duration> {
		match self {
			Self::Day => Some(Duration::days(1)),
			Self::Week => Some(Duration::weeks(1)),
			Self::Month => Some(Duration::days(30)),
			Self::None | Self::All => None,
		}
	}

	fn covers(self, created_at: Option<OffsetDateTime>, now: OffsetDateTime) -> bool {
		match self {
			Self::None => false,
			Self::All => true,
			bounded => match (bounded.max_age(), created_at) {
				(Some(max_age), Some(created_at)) => created_at < now - max_age,
				_ => false,
			},
		}
	}
}

/// Decides which signal marks an item as archived.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ArchivePrecedence {
	#[default]
	Status,
	StatusOrAge,
	Age,
}
impl ArchivePrecedence {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"status" => Some(Self::Status),
			"status_or_age" => Some(Self::StatusOrAge),
			"age" => Some(Self::Age),
			_ => None,
		}
	}
}

/// The single archive rule the filter consults: the request toggle plus the age window,
/// combined by the configured precedence.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArchivePolicy {
	pub mode: ArchiveMode,
	pub window: ArchiveWindow,
	pub precedence: ArchivePrecedence,
}
impl ArchivePolicy {
	/// `sift_config::validate` guarantees both strings parse; unknown values fall back to defaults.
	pub fn from_config(cfg: &sift_config::Archive) -> Self {
		Self {
			mode: ArchiveMode::default(),
			window: ArchiveWindow::parse(&cfg.default_window).unwrap_or_default(),
			precedence: ArchivePrecedence::parse(&cfg.precedence).unwrap_or_default(),
		}
	}

	pub fn is_archived(
		&self,
		status: Status,
		created_at: Option<OffsetDateTime>,
		now: OffsetDateTime,
	) -> bool {
		match self.precedence {
			ArchivePrecedence::Status => status.is_archived(),
			ArchivePrecedence::StatusOrAge =>
				status.is_archived() || self.window.covers(created_at, now),
			ArchivePrecedence::Age => self.window.covers(created_at, now),
		}
	}

	pub fn admits(
		&self,
		status: Status,
		created_at: Option<OffsetDateTime>,
		now: OffsetDateTime,
	) -> bool {
		let archived = self.is_archived(status, created_at, now);

		match self.mode {
			ArchiveMode::OnlyArchived => archived,
			ArchiveMode::ExcludeArchived => !archived,
		}
	}
}
