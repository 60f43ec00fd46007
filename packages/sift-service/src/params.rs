use std::collections::BTreeSet;

use time::{
	Date, OffsetDateTime, Time, format_description::well_known::Rfc3339, macros::format_description,
};
use uuid::Uuid;

use sift_config::Config;
use sift_domain::{
	archive::{ArchiveMode, ArchivePolicy, ArchiveWindow},
	content::Sentiment,
	filter::{FilterSpec, MatchType, Selection},
	page::PageRequest,
	sort::SortSpec,
	tier::Tier,
};

/// The flat request parameter set, as strings. Turning it into a [`FilterSpec`] never fails:
/// malformed values fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
	pub keywords: Vec<String>,
	pub subreddits: Vec<String>,
	pub sentiment: Vec<String>,
	/// Tier names, e.g. `Prime`.
	pub score: Vec<String>,
	pub from: Option<String>,
	pub to: Option<String>,
	/// `field:direction`.
	pub sort: Option<String>,
	pub archive: Option<String>,
	pub archive_window: Option<String>,
	pub match_type: Option<String>,
	pub cursor: Option<String>,
	pub limit: Option<String>,
}
impl ListParams {
	/// Builds params from decoded query pairs. List keys may repeat and may carry a `[]` suffix.
	/// Unknown keys are ignored.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut params = Self::default();

		for (key, value) in pairs {
			let value = value.into();

			match key.as_ref().trim_end_matches("[]") {
				"keywords" => params.keywords.push(value),
				"subreddits" => params.subreddits.push(value),
				"sentiment" => params.sentiment.push(value),
				"score" => params.score.push(value),
				"from" => params.from = Some(value),
				"to" => params.to = Some(value),
				"sort" => params.sort = Some(value),
				"archive" => params.archive = Some(value),
				"archiveWindow" | "archive_window" => params.archive_window = Some(value),
				"matchType" | "match_type" => params.match_type = Some(value),
				"cursor" => params.cursor = Some(value),
				"limit" => params.limit = Some(value),
				_ => {},
			}
		}

		params
	}

	pub fn to_filter_spec(&self, cfg: &Config) -> FilterSpec {
		let mut archive = ArchivePolicy::from_config(&cfg.archive);

		archive.mode = ArchiveMode::from_param(self.archive.as_deref());

		if let Some(raw) = self.archive_window.as_deref() {
			match ArchiveWindow::parse(raw) {
				Some(window) => archive.window = window,
				None => tracing::debug!(archive_window = raw, "Ignoring unknown archive window."),
			}
		}

		FilterSpec {
			keywords: selection(&self.keywords, |raw| Uuid::parse_str(raw).ok()),
			subreddits: selection(&self.subreddits, |raw| Uuid::parse_str(raw).ok()),
			match_type: MatchType::from_param(self.match_type.as_deref()),
			sentiments: selection(&self.sentiment, Sentiment::parse),
			tiers: selection(&self.score, Tier::parse),
			from: self.from.as_deref().and_then(|raw| parse_bound(Bound::From, raw)),
			to: self.to.as_deref().and_then(|raw| parse_bound(Bound::To, raw)),
			archive,
			sort: SortSpec::parse(self.sort.as_deref()),
			page: PageRequest::new(
				parse_cursor(self.cursor.as_deref()),
				parse_limit(self.limit.as_deref(), cfg.listing.default_limit, cfg.listing.max_limit),
			),
		}
	}
}

fn selection<T, F>(raw: &[String], parse: F) -> Selection<T>
where
	T: Ord,
	F: Fn(&str) -> Option<T>,
{
	let values: Vec<&str> = raw.iter().map(|value| value.trim()).filter(|v| !v.is_empty()).collect();

	if values.is_empty() {
		return Selection::Any;
	}

	Selection::Only(values.into_iter().filter_map(parse).collect::<BTreeSet<_>>())
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Bound {
	From,
	To,
}
impl Bound {
	fn as_str(self) -> &'static str {
		match self {
			Self::From => "from",
			Self::To => "to",
		}
	}
}

/// RFC 3339 timestamps, or bare `YYYY-MM-DD` dates in UTC. A bare `from` date starts at midnight
/// and a bare `to` date covers the whole day.
fn parse_bound(bound: Bound, raw: &str) -> Option<OffsetDateTime> {
	let raw = raw.trim();

	if raw.is_empty() {
		return None;
	}
	if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
		return Some(ts);
	}
	if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
		let at = match bound {
			Bound::From => Time::MIDNIGHT,
			Bound::To => time::macros::time!(23:59:59.999_999_999),
		};

		return Some(date.with_time(at).assume_utc());
	}

	tracing::debug!(bound = bound.as_str(), value = raw, "Ignoring malformed date bound.");

	None
}

fn parse_cursor(raw: Option<&str>) -> usize {
	raw.and_then(|value| value.trim().parse::<usize>().ok()).unwrap_or(0)
}

fn parse_limit(raw: Option<&str>, default_limit: u32, max_limit: u32) -> usize {
	let requested = raw.and_then(|value| value.trim().parse::<i64>().ok());
	let limit = match requested {
		Some(value) => value.clamp(1, i64::from(max_limit)),
		None => i64::from(default_limit),
	};

	usize::try_from(limit).unwrap_or(1)
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use time::macros::datetime;
	use uuid::Uuid;

	use sift_domain::{
		archive::{ArchiveMode, ArchiveWindow},
		content::Sentiment,
		filter::{MatchType, Selection},
		sort::{SortDirection, SortField},
		tier::Tier,
	};

	use crate::params::{Bound, ListParams, parse_bound, parse_cursor, parse_limit};

	#[test]
	fn pairs_accept_repeated_and_bracketed_keys() {
		let params = ListParams::from_pairs([
			("keywords[]", "a"),
			("keywords", "b"),
			("matchType", "all"),
			("unknown", "x"),
		]);

		assert_eq!(params.keywords, vec!["a".to_string(), "b".to_string()]);
		assert_eq!(params.match_type.as_deref(), Some("all"));
	}

	#[test]
	fn cursor_and_limit_fall_back_instead_of_failing() {
		assert_eq!(parse_cursor(Some("abc")), 0);
		assert_eq!(parse_cursor(Some("-4")), 0);
		assert_eq!(parse_cursor(Some(" 6 ")), 6);
		assert_eq!(parse_cursor(None), 0);
		assert_eq!(parse_limit(Some("ten"), 20, 100), 20);
		assert_eq!(parse_limit(Some("0"), 20, 100), 1);
		assert_eq!(parse_limit(Some("5000"), 20, 100), 100);
		assert_eq!(parse_limit(None, 20, 100), 20);
	}

	#[test]
	fn bounds_accept_timestamps_and_dates() {
		assert_eq!(
			parse_bound(Bound::From, "2024-02-03T04:05:06Z"),
			Some(datetime!(2024-02-03 04:05:06 UTC))
		);
		assert_eq!(parse_bound(Bound::From, "2024-02-03"), Some(datetime!(2024-02-03 00:00 UTC)));
		assert_eq!(
			parse_bound(Bound::To, "2024-02-03"),
			Some(datetime!(2024-02-03 23:59:59.999_999_999 UTC))
		);
		assert_eq!(parse_bound(Bound::To, "yesterday"), None);
		assert_eq!(parse_bound(Bound::To, ""), None);
	}

	#[test]
	fn unknown_values_keep_filters_active() {
		let cfg = crate::tests_support::config();
		let spec = ListParams {
			keywords: vec!["not-a-uuid".to_string()],
			sentiment: vec!["POSITIVE".to_string(), "ecstatic".to_string()],
			score: vec!["prime".to_string()],
			..ListParams::default()
		}
		.to_filter_spec(&cfg);

		assert_eq!(spec.keywords, Selection::Only(BTreeSet::new()));
		assert_eq!(spec.sentiments, Selection::Only(BTreeSet::from([Sentiment::Positive])));
		assert_eq!(spec.tiers, Selection::Only(BTreeSet::from([Tier::Prime])));
		assert_eq!(spec.subreddits, Selection::Any);
	}

	#[test]
	fn empty_params_produce_default_filters() {
		let cfg = crate::tests_support::config();
		let spec = ListParams::default().to_filter_spec(&cfg);

		assert_eq!(spec.match_type, MatchType::Any);
		assert_eq!(spec.archive.mode, ArchiveMode::ExcludeArchived);
		assert_eq!(spec.archive.window, ArchiveWindow::None);
		assert_eq!(spec.sort.field, SortField::Date);
		assert_eq!(spec.sort.direction, SortDirection::Desc);
		assert_eq!(spec.page.cursor, 0);
		assert_eq!(spec.page.limit, 20);
	}

	#[test]
	fn valid_ids_are_parsed() {
		let cfg = crate::tests_support::config();
		let id = Uuid::from_u128(42);
		let spec = ListParams { subreddits: vec![id.to_string()], ..ListParams::default() }
			.to_filter_spec(&cfg);

		assert_eq!(spec.subreddits, Selection::Only(BTreeSet::from([id])));
	}
}
