//! Read-side lookups. Every function issues exactly one statement, whatever the number of ids.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
	Result,
	models::{ContentRow, ContentTable, KeywordLinkRow, NameRow, OverrideRow},
};

pub async fn tracked_keyword_ids(pool: &PgPool, workspace_id: Uuid) -> Result<Vec<Uuid>> {
	let ids: Vec<Uuid> = sqlx::query_scalar(
		"\
SELECT keyword_id
FROM workspace_keywords
WHERE workspace_id = $1
ORDER BY keyword_id",
	)
	.bind(workspace_id)
	.fetch_all(pool)
	.await?;

	Ok(ids)
}

pub async fn tracked_subreddit_ids(pool: &PgPool, workspace_id: Uuid) -> Result<Vec<Uuid>> {
	let ids: Vec<Uuid> = sqlx::query_scalar(
		"\
SELECT subreddit_id
FROM workspace_subreddits
WHERE workspace_id = $1
ORDER BY subreddit_id",
	)
	.bind(workspace_id)
	.fetch_all(pool)
	.await?;

	Ok(ids)
}

pub async fn items_by_subreddits(
	pool: &PgPool,
	table: ContentTable,
	subreddit_ids: &[Uuid],
) -> Result<Vec<ContentRow>> {
	let sql = format!("{}\nWHERE subreddit_id = ANY($1)", table.select_items());
	let rows = sqlx::query_as::<_, ContentRow>(&sql).bind(subreddit_ids).fetch_all(pool).await?;

	Ok(rows)
}

pub async fn item_ids_by_keywords(
	pool: &PgPool,
	table: ContentTable,
	keyword_ids: &[Uuid],
) -> Result<Vec<Uuid>> {
	let sql = format!(
		"\
SELECT DISTINCT {id}
FROM {links}
WHERE keyword_id = ANY($1)
ORDER BY {id}",
		id = table.id_column(),
		links = table.keyword_table(),
	);
	let ids: Vec<Uuid> = sqlx::query_scalar(&sql).bind(keyword_ids).fetch_all(pool).await?;

	Ok(ids)
}

pub async fn items_by_ids(
	pool: &PgPool,
	table: ContentTable,
	item_ids: &[Uuid],
) -> Result<Vec<ContentRow>> {
	let sql = format!("{}\nWHERE {} = ANY($1)", table.select_items(), table.id_column());
	let rows = sqlx::query_as::<_, ContentRow>(&sql).bind(item_ids).fetch_all(pool).await?;

	Ok(rows)
}

pub async fn overrides(
	pool: &PgPool,
	table: ContentTable,
	workspace_id: Uuid,
	item_ids: &[Uuid],
) -> Result<Vec<OverrideRow>> {
	let sql = format!(
		"\
SELECT {id} AS item_id, workspace_id, score, status
FROM {overrides}
WHERE workspace_id = $1 AND {id} = ANY($2)",
		id = table.id_column(),
		overrides = table.override_table(),
	);
	let rows = sqlx::query_as::<_, OverrideRow>(&sql)
		.bind(workspace_id)
		.bind(item_ids)
		.fetch_all(pool)
		.await?;

	Ok(rows)
}

pub async fn keyword_links(
	pool: &PgPool,
	table: ContentTable,
	item_ids: &[Uuid],
) -> Result<Vec<KeywordLinkRow>> {
	let sql = format!(
		"\
SELECT {id} AS item_id, keyword_id
FROM {links}
WHERE {id} = ANY($1)",
		id = table.id_column(),
		links = table.keyword_table(),
	);
	let rows = sqlx::query_as::<_, KeywordLinkRow>(&sql).bind(item_ids).fetch_all(pool).await?;

	Ok(rows)
}

pub async fn keyword_names(pool: &PgPool, keyword_ids: &[Uuid]) -> Result<Vec<NameRow>> {
	let rows = sqlx::query_as::<_, NameRow>(
		"\
SELECT keyword_id AS id, name
FROM keywords
WHERE keyword_id = ANY($1)",
	)
	.bind(keyword_ids)
	.fetch_all(pool)
	.await?;

	Ok(rows)
}

pub async fn subreddit_names(pool: &PgPool, subreddit_ids: &[Uuid]) -> Result<Vec<NameRow>> {
	let rows = sqlx::query_as::<_, NameRow>(
		"\
SELECT subreddit_id AS id, name
FROM subreddits
WHERE subreddit_id = ANY($1)",
	)
	.bind(subreddit_ids)
	.fetch_all(pool)
	.await?;

	Ok(rows)
}
