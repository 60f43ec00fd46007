use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{status::Status, tier::Tier};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
	Post,
	Comment,
}
impl ContentKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Post => "post",
			Self::Comment => "comment",
		}
	}
}
impl fmt::Display for ContentKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for ContentKind {
	type Err = String;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"post" | "posts" => Ok(Self::Post),
			"comment" | "comments" => Ok(Self::Comment),
			other => Err(format!("Unknown content kind {other:?}.")),
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Sentiment {
	Positive,
	Neutral,
	Negative,
}
impl Sentiment {
	/// Accepts any casing, so stored `"POSITIVE"` and requested `"positive"` meet as `Positive`.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"positive" => Some(Self::Positive),
			"neutral" => Some(Self::Neutral),
			"negative" => Some(Self::Negative),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Positive => "Positive",
			Self::Neutral => "Neutral",
			Self::Negative => "Negative",
		}
	}
}

/// Immutable source record shared by every workspace.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentItem {
	pub id: Uuid,
	pub kind: ContentKind,
	pub title: Option<String>,
	pub body: String,
	pub subreddit_id: Uuid,
	pub author_id: Option<String>,
	pub post_id: Option<Uuid>,
	pub raw_score: Option<f64>,
	pub sentiment: Option<Sentiment>,
	pub created_at: Option<OffsetDateTime>,
	/// Every linked keyword, tracked by the workspace or not.
	pub keyword_ids: BTreeSet<Uuid>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkspaceOverride {
	pub item_id: Uuid,
	pub workspace_id: Uuid,
	pub score: Option<f64>,
	pub status: Option<Status>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeywordLink {
	pub item_id: Uuid,
	pub keyword_id: Uuid,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingSet {
	pub keyword_ids: BTreeSet<Uuid>,
	pub subreddit_ids: BTreeSet<Uuid>,
}
impl TrackingSet {
	pub fn is_empty(&self) -> bool {
		self.keyword_ids.is_empty() && self.subreddit_ids.is_empty()
	}
}

/// A content item seen through one workspace. `score` and `status` are always resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedItem {
	pub item: ContentItem,
	pub score: f64,
	pub status: Status,
	pub tier: Tier,
	pub keyword_names: Vec<String>,
}
impl MergedItem {
	pub fn resolve(item: ContentItem, overlay: Option<&WorkspaceOverride>) -> Self {
		let score = overlay
			.and_then(|o| o.score)
			.filter(|score| score.is_finite())
			.or(item.raw_score.filter(|score| score.is_finite()))
			.unwrap_or(0.0);
		let status = overlay.and_then(|o| o.status).unwrap_or_default();

		Self { item, score, status, tier: Tier::from_score(score), keyword_names: Vec::new() }
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use uuid::Uuid;

	use crate::{
		content::{ContentItem, ContentKind, MergedItem, Sentiment, WorkspaceOverride},
		status::Status,
		tier::Tier,
	};

	fn item(raw_score: Option<f64>) -> ContentItem {
		ContentItem {
			id: Uuid::from_u128(1),
			kind: ContentKind::Post,
			title: Some("Looking for a CRM".to_string()),
			body: "Any suggestions?".to_string(),
			subreddit_id: Uuid::from_u128(100),
			author_id: None,
			post_id: None,
			raw_score,
			sentiment: Some(Sentiment::Neutral),
			created_at: None,
			keyword_ids: BTreeSet::new(),
		}
	}

	#[test]
	fn override_score_replaces_raw_score_and_tier() {
		let overlay = WorkspaceOverride {
			item_id: Uuid::from_u128(1),
			workspace_id: Uuid::from_u128(9),
			score: Some(90.0),
			status: None,
		};
		let merged = MergedItem::resolve(item(Some(10.0)), Some(&overlay));

		assert_eq!(merged.score, 90.0);
		assert_eq!(merged.tier, Tier::Prime);
		assert_eq!(merged.status, Status::NeedsReview);
	}

	#[test]
	fn missing_scores_resolve_to_zero() {
		let merged = MergedItem::resolve(item(None), None);

		assert_eq!(merged.score, 0.0);
		assert_eq!(merged.tier, Tier::Low);
	}

	#[test]
	fn override_without_score_keeps_raw_score() {
		let overlay = WorkspaceOverride {
			item_id: Uuid::from_u128(1),
			workspace_id: Uuid::from_u128(9),
			score: None,
			status: Some(Status::Engaged),
		};
		let merged = MergedItem::resolve(item(Some(55.0)), Some(&overlay));

		assert_eq!(merged.score, 55.0);
		assert_eq!(merged.tier, Tier::High);
		assert_eq!(merged.status, Status::Engaged);
	}

	#[test]
	fn non_finite_scores_are_treated_as_missing() {
		let overlay = WorkspaceOverride {
			item_id: Uuid::from_u128(1),
			workspace_id: Uuid::from_u128(9),
			score: Some(f64::NAN),
			status: None,
		};
		let merged = MergedItem::resolve(item(Some(64.0)), Some(&overlay));

		assert_eq!(merged.score, 64.0);
		assert_eq!(merged.tier, Tier::High);

		let merged = MergedItem::resolve(item(Some(f64::INFINITY)), None);

		assert_eq!(merged.score, 0.0);
		assert_eq!(merged.tier, Tier::Low);
	}

	#[test]
	fn kinds_parse_from_route_segments() {
		assert_eq!("posts".parse::<ContentKind>(), Ok(ContentKind::Post));
		assert_eq!("comment".parse::<ContentKind>(), Ok(ContentKind::Comment));
		assert!("threads".parse::<ContentKind>().is_err());
	}
}
