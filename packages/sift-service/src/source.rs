use uuid::Uuid;

use sift_domain::{
	content::{ContentItem, ContentKind, KeywordLink, Sentiment, WorkspaceOverride},
	status::Status,
};
use sift_storage::{
	db::Db,
	models::{ContentRow, ContentTable, OverrideRow},
	queries,
};

use crate::{BoxFuture, Result};

/// Workspace tracking state and the shared name tables.
pub trait CatalogStore
where
	Self: Send + Sync,
{
	fn tracked_keyword_ids<'a>(&'a self, workspace_id: Uuid) -> BoxFuture<'a, Result<Vec<Uuid>>>;

	fn tracked_subreddit_ids<'a>(&'a self, workspace_id: Uuid)
	-> BoxFuture<'a, Result<Vec<Uuid>>>;

	fn keyword_names<'a>(
		&'a self,
		keyword_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<(Uuid, String)>>>;

	fn subreddit_names<'a>(
		&'a self,
		subreddit_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<(Uuid, String)>>>;
}

/// One content kind's items, keyword links, and workspace overrides. Every method is a single
/// batched lookup.
pub trait ContentSource
where
	Self: Send + Sync,
{
	fn kind(&self) -> ContentKind;

	fn items_by_subreddits<'a>(
		&'a self,
		subreddit_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<ContentItem>>>;

	fn item_ids_by_keywords<'a>(
		&'a self,
		keyword_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<Uuid>>>;

	fn items_by_ids<'a>(&'a self, item_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<ContentItem>>>;

	fn overrides<'a>(
		&'a self,
		workspace_id: Uuid,
		item_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<WorkspaceOverride>>>;

	fn keyword_links<'a>(&'a self, item_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<KeywordLink>>>;
}

pub struct PgCatalog {
	db: Db,
}
impl PgCatalog {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}
impl CatalogStore for PgCatalog {
	fn tracked_keyword_ids<'a>(&'a self, workspace_id: Uuid) -> BoxFuture<'a, Result<Vec<Uuid>>> {
		Box::pin(async move { Ok(queries::tracked_keyword_ids(&self.db.pool, workspace_id).await?) })
	}

	fn tracked_subreddit_ids<'a>(
		&'a self,
		workspace_id: Uuid,
	) -> BoxFuture<'a, Result<Vec<Uuid>>> {
		Box::pin(async move {
			Ok(queries::tracked_subreddit_ids(&self.db.pool, workspace_id).await?)
		})
	}

	fn keyword_names<'a>(
		&'a self,
		keyword_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<(Uuid, String)>>> {
		Box::pin(async move {
			let rows = queries::keyword_names(&self.db.pool, keyword_ids).await?;

			Ok(rows.into_iter().map(|row| (row.id, row.name)).collect())
		})
	}

	fn subreddit_names<'a>(
		&'a self,
		subreddit_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<(Uuid, String)>>> {
		Box::pin(async move {
			let rows = queries::subreddit_names(&self.db.pool, subreddit_ids).await?;

			Ok(rows.into_iter().map(|row| (row.id, row.name)).collect())
		})
	}
}

pub struct PgContentSource {
	db: Db,
	kind: ContentKind,
}
impl PgContentSource {
	pub fn new(db: Db, kind: ContentKind) -> Self {
		Self { db, kind }
	}

	fn table(&self) -> ContentTable {
		match self.kind {
			ContentKind::Post => ContentTable::Posts,
			ContentKind::Comment => ContentTable::Comments,
		}
	}

	fn to_item(&self, row: ContentRow) -> ContentItem {
		let sentiment = row.sentiment.as_deref().and_then(|raw| {
			let parsed = Sentiment::parse(raw);

			if parsed.is_none() {
				tracing::debug!(
					item_id = %row.item_id,
					sentiment = raw,
					"Unrecognized stored sentiment."
				);
			}

			parsed
		});

		ContentItem {
			id: row.item_id,
			kind: self.kind,
			title: row.title,
			body: row.body,
			subreddit_id: row.subreddit_id,
			author_id: row.author_id,
			post_id: row.parent_post_id,
			raw_score: row.score,
			sentiment,
			created_at: row.created_at,
			keyword_ids: Default::default(),
		}
	}
}
impl ContentSource for PgContentSource {
	fn kind(&self) -> ContentKind {
		self.kind
	}

	fn items_by_subreddits<'a>(
		&'a self,
		subreddit_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<ContentItem>>> {
		Box::pin(async move {
			let rows =
				queries::items_by_subreddits(&self.db.pool, self.table(), subreddit_ids).await?;

			Ok(rows.into_iter().map(|row| self.to_item(row)).collect())
		})
	}

	fn item_ids_by_keywords<'a>(
		&'a self,
		keyword_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<Uuid>>> {
		Box::pin(async move {
			Ok(queries::item_ids_by_keywords(&self.db.pool, self.table(), keyword_ids).await?)
		})
	}

	fn items_by_ids<'a>(&'a self, item_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<ContentItem>>> {
		Box::pin(async move {
			let rows = queries::items_by_ids(&self.db.pool, self.table(), item_ids).await?;

			Ok(rows.into_iter().map(|row| self.to_item(row)).collect())
		})
	}

	fn overrides<'a>(
		&'a self,
		workspace_id: Uuid,
		item_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<WorkspaceOverride>>> {
		Box::pin(async move {
			let rows =
				queries::overrides(&self.db.pool, self.table(), workspace_id, item_ids).await?;

			Ok(rows.into_iter().map(to_override).collect())
		})
	}

	fn keyword_links<'a>(&'a self, item_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<KeywordLink>>> {
		Box::pin(async move {
			let rows = queries::keyword_links(&self.db.pool, self.table(), item_ids).await?;

			Ok(rows
				.into_iter()
				.map(|row| KeywordLink { item_id: row.item_id, keyword_id: row.keyword_id })
				.collect())
		})
	}
}

fn to_override(row: OverrideRow) -> WorkspaceOverride {
	let status = row.status.and_then(|code| {
		let status = Status::from_code(code);

		if status.is_none() {
			tracing::warn!(
				item_id = %row.item_id,
				code,
				"Stored status is out of range; using the default."
			);
		}

		status
	});

	let score = row.score.filter(|score| {
		let valid = (0.0..=100.0).contains(score);

		if !valid {
			tracing::warn!(
				item_id = %row.item_id,
				score,
				"Stored override score is out of range; ignoring it."
			);
		}

		valid
	});

	WorkspaceOverride { item_id: row.item_id, workspace_id: row.workspace_id, score, status }
}
