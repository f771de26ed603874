//! Bookmarks Module
//!
//! Per-document bookmark lists and last-read positions, persisted as storage
//! slots in the local database. Pages are always logical page numbers.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .nest("/api/documents", bookmarks::routes())
//!     .with_state(app_state);
//!
//! let added = Bookmarks::new(&db).add(DocumentId::Pmbok, page, "").await?;
//! ```

mod handler;
mod routes;
mod store;

pub use routes::routes;
pub use store::*;
