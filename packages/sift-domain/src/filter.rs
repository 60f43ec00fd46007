use std::collections::BTreeSet;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	archive::ArchivePolicy,
	content::{MergedItem, Sentiment},
	page::PageRequest,
	sort::SortSpec,
	tier::Tier,
};

/// A request-side selection. `Only` with an empty set is still active and matches nothing, which
/// is what a request naming only unknown values should see.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selection<T> {
	Any,
	Only(BTreeSet<T>),
}
impl<T> Selection<T>
where
	T: Ord,
{
	pub fn is_active(&self) -> bool {
		matches!(self, Self::Only(_))
	}

	pub fn admits(&self, value: &T) -> bool {
		match self {
			Self::Any => true,
			Self::Only(set) => set.contains(value),
		}
	}

	fn admits_option(&self, value: Option<&T>) -> bool {
		match self {
			Self::Any => true,
			Self::Only(set) => value.map(|value| set.contains(value)).unwrap_or(false),
		}
	}
}
impl<T> Default for Selection<T> {
	fn default() -> Self {
		Self::Any
	}
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MatchType {
	#[default]
	Any,
	All,
}
impl MatchType {
	pub fn from_param(raw: Option<&str>) -> Self {
		match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
			Some("all") => Self::All,
			_ => Self::Any,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
	pub keywords: Selection<Uuid>,
	pub subreddits: Selection<Uuid>,
	pub match_type: MatchType,
	pub sentiments: Selection<Sentiment>,
	pub tiers: Selection<Tier>,
	pub from: Option<OffsetDateTime>,
	pub to: Option<OffsetDateTime>,
	pub archive: ArchivePolicy,
	pub sort: SortSpec,
	pub page: PageRequest,
}
impl FilterSpec {
	pub fn matches(&self, merged: &MergedItem, now: OffsetDateTime) -> bool {
		self.matches_scope(merged)
			&& self.sentiments.admits_option(merged.item.sentiment.as_ref())
			&& self.tiers.admits(&merged.tier)
			&& self.matches_dates(merged.item.created_at)
			&& self.archive.admits(merged.status, merged.item.created_at, now)
	}

	fn matches_scope(&self, merged: &MergedItem) -> bool {
		let keyword = match &self.keywords {
			Selection::Any => None,
			Selection::Only(selected) =>
				Some(merged.item.keyword_ids.iter().any(|id| selected.contains(id))),
		};
		let subreddit = match &self.subreddits {
			Selection::Any => None,
			Selection::Only(selected) => Some(selected.contains(&merged.item.subreddit_id)),
		};

		match (keyword, subreddit) {
			(None, None) => true,
			(Some(hit), None) | (None, Some(hit)) => hit,
			(Some(keyword), Some(subreddit)) => match self.match_type {
				MatchType::All => keyword && subreddit,
				MatchType::Any => keyword || subreddit,
			},
		}
	}

	fn matches_dates(&self, created_at: Option<OffsetDateTime>) -> bool {
		let after_from = match self.from {
			Some(from) => created_at.is_some_and(|created_at| created_at >= from),
			None => true,
		};
		let before_to = match self.to {
			Some(to) => created_at.is_some_and(|created_at| created_at <= to),
			None => true,
		};

		after_from && before_to
	}
}
