//! Typed fixture rows for the listing schema. `apply` inserts them in foreign-key order.

use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::Result;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeedKind {
	Post,
	Comment,
}

/// A post or comment row. `title` is ignored for comments.
#[derive(Clone, Debug)]
pub struct SeedItem {
	pub id: Uuid,
	pub subreddit_id: Uuid,
	pub post_id: Option<Uuid>,
	pub title: String,
	pub body: String,
	pub author_id: Option<String>,
	pub score: Option<f64>,
	pub sentiment: Option<String>,
	pub created_at: Option<OffsetDateTime>,
}
impl SeedItem {
	pub fn new(id: Uuid, subreddit_id: Uuid) -> Self {
		Self {
			id,
			subreddit_id,
			post_id: None,
			title: format!("Item {id}"),
			body: "body".to_string(),
			author_id: None,
			score: None,
			sentiment: None,
			created_at: None,
		}
	}

	pub fn title(mut self, title: &str) -> Self {
		self.title = title.to_string();

		self
	}

	pub fn body(mut self, body: &str) -> Self {
		self.body = body.to_string();

		self
	}

	pub fn author(mut self, author_id: &str) -> Self {
		self.author_id = Some(author_id.to_string());

		self
	}

	pub fn score(mut self, score: f64) -> Self {
		self.score = Some(score);

		self
	}

	pub fn sentiment(mut self, sentiment: &str) -> Self {
		self.sentiment = Some(sentiment.to_string());

		self
	}

	pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
		self.created_at = Some(created_at);

		self
	}

	pub fn reply_to(mut self, post_id: Uuid) -> Self {
		self.post_id = Some(post_id);

		self
	}
}

#[derive(Clone, Debug)]
struct SeedOverride {
	kind: SeedKind,
	item_id: Uuid,
	workspace_id: Uuid,
	score: Option<f64>,
	status: Option<i16>,
}

#[derive(Debug, Default)]
pub struct Seed {
	keywords: Vec<(Uuid, String)>,
	subreddits: Vec<(Uuid, String)>,
	tracked_keywords: Vec<(Uuid, Uuid)>,
	tracked_subreddits: Vec<(Uuid, Uuid)>,
	posts: Vec<SeedItem>,
	comments: Vec<SeedItem>,
	links: Vec<(SeedKind, Uuid, Uuid)>,
	overrides: Vec<SeedOverride>,
}
impl Seed {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn keyword(mut self, keyword_id: Uuid, name: &str) -> Self {
		self.keywords.push((keyword_id, name.to_string()));

		self
	}

	pub fn subreddit(mut self, subreddit_id: Uuid, name: &str) -> Self {
		self.subreddits.push((subreddit_id, name.to_string()));

		self
	}

	pub fn track_keyword(mut self, workspace_id: Uuid, keyword_id: Uuid) -> Self {
		self.tracked_keywords.push((workspace_id, keyword_id));

		self
	}

	pub fn track_subreddit(mut self, workspace_id: Uuid, subreddit_id: Uuid) -> Self {
		self.tracked_subreddits.push((workspace_id, subreddit_id));

		self
	}

	pub fn post(mut self, item: SeedItem) -> Self {
		self.posts.push(item);

		self
	}

	pub fn comment(mut self, item: SeedItem) -> Self {
		self.comments.push(item);

		self
	}

	pub fn link(mut self, kind: SeedKind, item_id: Uuid, keyword_id: Uuid) -> Self {
		self.links.push((kind, item_id, keyword_id));

		self
	}

	/// `status` is the raw stored code.
	pub fn overlay(
		mut self,
		kind: SeedKind,
		item_id: Uuid,
		workspace_id: Uuid,
		score: Option<f64>,
		status: Option<i16>,
	) -> Self {
		self.overrides.push(SeedOverride { kind, item_id, workspace_id, score, status });

		self
	}

	pub async fn apply(&self, pool: &PgPool) -> Result<()> {
		for (keyword_id, name) in &self.keywords {
			sqlx::query("INSERT INTO keywords (keyword_id, name) VALUES ($1, $2)")
				.bind(keyword_id)
				.bind(name)
				.execute(pool)
				.await?;
		}
		for (subreddit_id, name) in &self.subreddits {
			sqlx::query("INSERT INTO subreddits (subreddit_id, name) VALUES ($1, $2)")
				.bind(subreddit_id)
				.bind(name)
				.execute(pool)
				.await?;
		}
		for (workspace_id, keyword_id) in &self.tracked_keywords {
			sqlx::query("INSERT INTO workspace_keywords (workspace_id, keyword_id) VALUES ($1, $2)")
				.bind(workspace_id)
				.bind(keyword_id)
				.execute(pool)
				.await?;
		}
		for (workspace_id, subreddit_id) in &self.tracked_subreddits {
			sqlx::query(
				"INSERT INTO workspace_subreddits (workspace_id, subreddit_id) VALUES ($1, $2)",
			)
			.bind(workspace_id)
			.bind(subreddit_id)
			.execute(pool)
			.await?;
		}
		for item in &self.posts {
			sqlx::query(
				"\
INSERT INTO posts (post_id, subreddit_id, author_id, title, body, score, sentiment, created_at)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
			)
			.bind(item.id)
			.bind(item.subreddit_id)
			.bind(item.author_id.as_deref())
			.bind(&item.title)
			.bind(&item.body)
			.bind(item.score)
			.bind(item.sentiment.as_deref())
			.bind(item.created_at)
			.execute(pool)
			.await?;
		}
		for item in &self.comments {
			sqlx::query(
				"\
INSERT INTO comments (comment_id, post_id, subreddit_id, author_id, body, score, sentiment, created_at)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
			)
			.bind(item.id)
			.bind(item.post_id)
			.bind(item.subreddit_id)
			.bind(item.author_id.as_deref())
			.bind(&item.body)
			.bind(item.score)
			.bind(item.sentiment.as_deref())
			.bind(item.created_at)
			.execute(pool)
			.await?;
		}
		for (kind, item_id, keyword_id) in &self.links {
			let sql = match kind {
				SeedKind::Post => "INSERT INTO post_keywords (post_id, keyword_id) VALUES ($1, $2)",
				SeedKind::Comment =>
					"INSERT INTO comment_keywords (comment_id, keyword_id) VALUES ($1, $2)",
			};

			sqlx::query(sql).bind(item_id).bind(keyword_id).execute(pool).await?;
		}
		for row in &self.overrides {
			let sql = match row.kind {
				SeedKind::Post =>
					"INSERT INTO post_workspace_overrides (post_id, workspace_id, score, status) \
					 VALUES ($1, $2, $3, $4)",
				SeedKind::Comment =>
					"INSERT INTO comment_workspace_overrides (comment_id, workspace_id, score, status) \
					 VALUES ($1, $2, $3, $4)",
			};

			sqlx::query(sql)
				.bind(row.item_id)
				.bind(row.workspace_id)
				.bind(row.score)
				.bind(row.status)
				.execute(pool)
				.await?;
		}

		Ok(())
	}
}
