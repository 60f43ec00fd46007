use std::{
	collections::{BTreeMap, BTreeSet, HashMap},
	time::Duration,
};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use sift_domain::{
	content::{ContentItem, ContentKind, KeywordLink, MergedItem, TrackingSet, WorkspaceOverride},
	filter::FilterSpec,
	page::paginate,
};

use crate::{
	Error, ListParams, Result, SiftService,
	present::{self, ListItem},
	source::{CatalogStore, ContentSource},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
	pub data: Vec<ListItem>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub next_cursor: Option<usize>,
}

impl SiftService {
	pub async fn list(
		&self,
		kind: ContentKind,
		workspace_id: Uuid,
		params: &ListParams,
	) -> Result<ListResponse> {
		let spec = params.to_filter_spec(&self.cfg);

		self.list_items(kind, workspace_id, &spec).await
	}

	pub async fn list_items(
		&self,
		kind: ContentKind,
		workspace_id: Uuid,
		spec: &FilterSpec,
	) -> Result<ListResponse> {
		self.list_items_at(kind, workspace_id, spec, OffsetDateTime::now_utc()).await
	}

	/// Same as [`Self::list_items`] with the age-window clock pinned to `now`.
	pub async fn list_items_at(
		&self,
		kind: ContentKind,
		workspace_id: Uuid,
		spec: &FilterSpec,
		now: OffsetDateTime,
	) -> Result<ListResponse> {
		if workspace_id.is_nil() {
			return Err(Error::NotAuthorized {
				message: "A workspace is required to list content.".to_string(),
			});
		}

		let timeout = Duration::from_millis(self.cfg.service.request_timeout_ms);
		let source = self.source(kind);
		let pipeline = run_pipeline(self.catalog.as_ref(), source, workspace_id, spec, now);

		match tokio::time::timeout(timeout, pipeline).await {
			Ok(result) => result,
			Err(_) => {
				tracing::warn!(
					%workspace_id,
					%kind,
					timeout_ms = self.cfg.service.request_timeout_ms,
					"List request timed out."
				);

				Err(Error::UpstreamUnavailable { message: "List request timed out.".to_string() })
			},
		}
	}
}

async fn run_pipeline(
	catalog: &dyn CatalogStore,
	source: &dyn ContentSource,
	workspace_id: Uuid,
	spec: &FilterSpec,
	now: OffsetDateTime,
) -> Result<ListResponse> {
	let kind = source.kind();
	let tracking = resolve_tracking(catalog, workspace_id).await?;

	if tracking.is_empty() {
		tracing::debug!(%workspace_id, %kind, "Workspace tracks nothing.");

		return Ok(ListResponse::default());
	}

	let candidates = collect_candidates(source, &tracking).await?;

	tracing::debug!(
		%workspace_id,
		%kind,
		tracked_keywords = tracking.keyword_ids.len(),
		tracked_subreddits = tracking.subreddit_ids.len(),
		candidates = candidates.len(),
		"Candidates collected."
	);

	if candidates.is_empty() {
		return Ok(ListResponse::default());
	}

	let candidate_count = candidates.len();
	let ids: Vec<Uuid> = candidates.keys().copied().collect();
	let (overrides, links) =
		tokio::try_join!(source.overrides(workspace_id, &ids), source.keyword_links(&ids))?;
	let mut kept = merge_and_filter(candidates, overrides, links, spec, now);

	spec.sort.apply(&mut kept);

	let matched = kept.len();
	let page = paginate(kept, spec.page);
	let data = present_page(catalog, page.items).await?;

	tracing::info!(
		%workspace_id,
		%kind,
		candidates = candidate_count,
		matched,
		returned = data.len(),
		cursor = spec.page.cursor,
		next_cursor = page.next_cursor,
		"Listed content."
	);

	Ok(ListResponse { data, next_cursor: page.next_cursor })
}

async fn resolve_tracking(catalog: &dyn CatalogStore, workspace_id: Uuid) -> Result<TrackingSet> {
	let (keyword_ids, subreddit_ids) = tokio::try_join!(
		catalog.tracked_keyword_ids(workspace_id),
		catalog.tracked_subreddit_ids(workspace_id),
	)?;

	Ok(TrackingSet {
		keyword_ids: keyword_ids.into_iter().collect(),
		subreddit_ids: subreddit_ids.into_iter().collect(),
	})
}

/// Runs both candidate paths concurrently and unions them by item id.
async fn collect_candidates(
	source: &dyn ContentSource,
	tracking: &TrackingSet,
) -> Result<BTreeMap<Uuid, ContentItem>> {
	let subreddit_ids: Vec<Uuid> = tracking.subreddit_ids.iter().copied().collect();
	let keyword_ids: Vec<Uuid> = tracking.keyword_ids.iter().copied().collect();
	let (by_subreddit, by_keyword) = tokio::try_join!(
		subreddit_path(source, &subreddit_ids),
		keyword_path(source, &keyword_ids),
	)?;
	let mut union = BTreeMap::new();

	for item in by_subreddit.into_iter().chain(by_keyword) {
		union.entry(item.id).or_insert(item);
	}

	Ok(union)
}

async fn subreddit_path(
	source: &dyn ContentSource,
	subreddit_ids: &[Uuid],
) -> Result<Vec<ContentItem>> {
	if subreddit_ids.is_empty() {
		return Ok(Vec::new());
	}

	source.items_by_subreddits(subreddit_ids).await
}

async fn keyword_path(
	source: &dyn ContentSource,
	keyword_ids: &[Uuid],
) -> Result<Vec<ContentItem>> {
	if keyword_ids.is_empty() {
		return Ok(Vec::new());
	}

	let item_ids: BTreeSet<Uuid> =
		source.item_ids_by_keywords(keyword_ids).await?.into_iter().collect();

	if item_ids.is_empty() {
		return Ok(Vec::new());
	}

	let item_ids: Vec<Uuid> = item_ids.into_iter().collect();

	source.items_by_ids(&item_ids).await
}

/// Overlays workspace state and drops non-matching items as they stream out of the union, so
/// only survivors are kept in memory.
fn merge_and_filter(
	candidates: BTreeMap<Uuid, ContentItem>,
	overrides: Vec<WorkspaceOverride>,
	links: Vec<KeywordLink>,
	spec: &FilterSpec,
	now: OffsetDateTime,
) -> Vec<MergedItem> {
	let overrides: HashMap<Uuid, WorkspaceOverride> =
		overrides.into_iter().map(|overlay| (overlay.item_id, overlay)).collect();
	let mut keywords_by_item: HashMap<Uuid, BTreeSet<Uuid>> = HashMap::new();

	for link in links {
		keywords_by_item.entry(link.item_id).or_default().insert(link.keyword_id);
	}

	candidates
		.into_values()
		.filter_map(|mut item| {
			item.keyword_ids = keywords_by_item.remove(&item.id).unwrap_or_default();

			let overlay = overrides.get(&item.id);
			let merged = MergedItem::resolve(item, overlay);

			spec.matches(&merged, now).then_some(merged)
		})
		.collect()
}

async fn present_page(catalog: &dyn CatalogStore, items: Vec<MergedItem>) -> Result<Vec<ListItem>> {
	if items.is_empty() {
		return Ok(Vec::new());
	}

	let keyword_ids: BTreeSet<Uuid> =
		items.iter().flat_map(|merged| merged.item.keyword_ids.iter().copied()).collect();
	let subreddit_ids: BTreeSet<Uuid> =
		items.iter().map(|merged| merged.item.subreddit_id).collect();
	let keyword_ids: Vec<Uuid> = keyword_ids.into_iter().collect();
	let subreddit_ids: Vec<Uuid> = subreddit_ids.into_iter().collect();
	let (keyword_names, subreddit_names) = tokio::try_join!(
		keyword_name_map(catalog, &keyword_ids),
		subreddit_name_map(catalog, &subreddit_ids),
	)?;

	Ok(items
		.into_iter()
		.map(|mut merged| {
			merged.keyword_names = present::keyword_names(&merged, &keyword_names);

			present::to_list_item(merged, &subreddit_names)
		})
		.collect())
}

async fn keyword_name_map(
	catalog: &dyn CatalogStore,
	keyword_ids: &[Uuid],
) -> Result<HashMap<Uuid, String>> {
	if keyword_ids.is_empty() {
		return Ok(HashMap::new());
	}

	Ok(catalog.keyword_names(keyword_ids).await?.into_iter().collect())
}

async fn subreddit_name_map(
	catalog: &dyn CatalogStore,
	subreddit_ids: &[Uuid],
) -> Result<HashMap<Uuid, String>> {
	if subreddit_ids.is_empty() {
		return Ok(HashMap::new());
	}

	Ok(catalog.subreddit_names(subreddit_ids).await?.into_iter().collect())
}
