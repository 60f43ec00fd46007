use time::OffsetDateTime;
use uuid::Uuid;

/// Which per-kind set of tables a query reads from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentTable {
	Posts,
	Comments,
}
impl ContentTable {
	pub(crate) fn select_items(self) -> &'static str {
		match self {
			Self::Posts =>
				"\
SELECT
	post_id AS item_id,
	subreddit_id,
	author_id,
	NULL::uuid AS parent_post_id,
	title,
	body,
	score,
	sentiment,
	created_at
FROM posts",
			Self::Comments =>
				"\
SELECT
	comment_id AS item_id,
	subreddit_id,
	author_id,
	post_id AS parent_post_id,
	NULL::text AS title,
	body,
	score,
	sentiment,
	created_at
FROM comments",
		}
	}

	pub(crate) fn id_column(self) -> &'static str {
		match self {
			Self::Posts => "post_id",
			Self::Comments => "comment_id",
		}
	}

	pub(crate) fn keyword_table(self) -> &'static str {
		match self {
			Self::Posts => "post_keywords",
			Self::Comments => "comment_keywords",
		}
	}

	pub(crate) fn override_table(self) -> &'static str {
		match self {
			Self::Posts => "post_workspace_overrides",
			Self::Comments => "comment_workspace_overrides",
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct ContentRow {
	pub item_id: Uuid,
	pub subreddit_id: Uuid,
	pub author_id: Option<String>,
	pub parent_post_id: Option<Uuid>,
	pub title: Option<String>,
	pub body: String,
	pub score: Option<f64>,
	pub sentiment: Option<String>,
	pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct OverrideRow {
	pub item_id: Uuid,
	pub workspace_id: Uuid,
	pub score: Option<f64>,
	pub status: Option<i16>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct KeywordLinkRow {
	pub item_id: Uuid,
	pub keyword_id: Uuid,
}

#[derive(Debug, sqlx::FromRow)]
pub struct NameRow {
	pub id: Uuid,
	pub name: String,
}
