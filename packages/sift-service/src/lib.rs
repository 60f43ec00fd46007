pub mod list;
pub mod params;
pub mod present;
pub mod source;
pub mod time_serde;

mod error;

pub use error::{Error, Result};
pub use list::ListResponse;
pub use params::ListParams;
pub use present::{AuthorRef, ListItem, SubredditRef};
pub use source::{CatalogStore, ContentSource, PgCatalog, PgContentSource};

use std::{future::Future, pin::Pin, sync::Arc};

use sift_config::Config;
use sift_domain::content::ContentKind;
use sift_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The stores one service instance reads from. Posts and comments share the pipeline and differ
/// only in their [`ContentSource`].
#[derive(Clone)]
pub struct Stores {
	pub catalog: Arc<dyn CatalogStore>,
	pub posts: Arc<dyn ContentSource>,
	pub comments: Arc<dyn ContentSource>,
}
impl Stores {
	pub fn new(
		catalog: Arc<dyn CatalogStore>,
		posts: Arc<dyn ContentSource>,
		comments: Arc<dyn ContentSource>,
	) -> Self {
		Self { catalog, posts, comments }
	}

	pub fn postgres(db: Db) -> Self {
		Self {
			catalog: Arc::new(PgCatalog::new(db.clone())),
			posts: Arc::new(PgContentSource::new(db.clone(), ContentKind::Post)),
			comments: Arc::new(PgContentSource::new(db, ContentKind::Comment)),
		}
	}
}

pub struct SiftService {
	pub cfg: Config,
	pub catalog: Arc<dyn CatalogStore>,
	pub posts: Arc<dyn ContentSource>,
	pub comments: Arc<dyn ContentSource>,
}
impl SiftService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self::with_stores(cfg, Stores::postgres(db))
	}

	pub fn with_stores(cfg: Config, stores: Stores) -> Self {
		let Stores { catalog, posts, comments } = stores;

		Self { cfg, catalog, posts, comments }
	}

	pub(crate) fn source(&self, kind: ContentKind) -> &dyn ContentSource {
		match kind {
			ContentKind::Post => self.posts.as_ref(),
			ContentKind::Comment => self.comments.as_ref(),
		}
	}
}
