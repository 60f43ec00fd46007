use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use sift_domain::content::{ContentKind, MergedItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
	pub id: Uuid,
	pub kind: ContentKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	pub body: String,
	pub subreddit: SubredditRef,
	pub author: AuthorRef,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub post_id: Option<Uuid>,
	pub score: f64,
	pub tier: String,
	pub status: String,
	pub status_code: i16,
	pub sentiment: Option<String>,
	#[serde(with = "crate::time_serde::option")]
	pub created_at: Option<OffsetDateTime>,
	pub keyword_ids: Vec<Uuid>,
	pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubredditRef {
	pub id: Uuid,
	pub name: Option<String>,
}

/// `name` is never resolved: there is no author lookup behind this read path yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
	pub id: Option<String>,
	pub name: Option<String>,
}

/// Keyword names for one item, falling back to the id text when a keyword has no name row.
pub(crate) fn keyword_names(merged: &MergedItem, names: &HashMap<Uuid, String>) -> Vec<String> {
	let mut out: Vec<String> = merged
		.item
		.keyword_ids
		.iter()
		.map(|id| names.get(id).cloned().unwrap_or_else(|| id.to_string()))
		.collect();

	out.sort();
	out.dedup();

	out
}

pub(crate) fn to_list_item(
	merged: MergedItem,
	subreddit_names: &HashMap<Uuid, String>,
) -> ListItem {
	let MergedItem { item, score, status, tier, keyword_names } = merged;

	ListItem {
		id: item.id,
		kind: item.kind,
		title: item.title,
		body: item.body,
		subreddit: SubredditRef {
			id: item.subreddit_id,
			name: subreddit_names.get(&item.subreddit_id).cloned(),
		},
		author: AuthorRef { id: item.author_id, name: None },
		post_id: item.post_id,
		score,
		tier: tier.as_str().to_string(),
		status: status.label().to_string(),
		status_code: status.code(),
		sentiment: item.sentiment.map(|sentiment| sentiment.as_str().to_string()),
		created_at: item.created_at,
		keyword_ids: item.keyword_ids.into_iter().collect(),
		keywords: keyword_names,
	}
}
