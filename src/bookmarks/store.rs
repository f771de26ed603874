use anyhow::Result;

use crate::db::Database;
use crate::model::{Bookmark, DocumentId, Page};

fn bookmarks_key(doc: DocumentId) -> String {
    format!("bookmarks:{}", doc)
}

fn last_page_key(doc: DocumentId) -> String {
    format!("last_page:{}", doc)
}

/// Per-document bookmark lists, one storage slot per document.
///
/// Every mutation rewrites the whole list for the document. The list is kept
/// sorted by page and holds at most one bookmark per page.
pub struct Bookmarks<'a> {
    db: &'a Database,
}

impl<'a> Bookmarks<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, doc: DocumentId) -> Result<Vec<Bookmark>> {
        let Some(raw) = self.db.get_slot(&bookmarks_key(doc)).await? else {
            return Ok(vec![]);
        };

        let mut bookmarks: Vec<Bookmark> = match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(document = %doc, error = %e, "unreadable bookmark slot, treating as empty");
                return Ok(vec![]);
            }
        };
        bookmarks.sort_by_key(|b| b.page);
        bookmarks.dedup_by_key(|b| b.page);
        Ok(bookmarks)
    }

    pub async fn has(&self, doc: DocumentId, page: Page) -> Result<bool> {
        Ok(self.list(doc).await?.iter().any(|b| b.page == page))
    }

    /// Returns false, leaving the list untouched, when `page` is already bookmarked.
    pub async fn add(&self, doc: DocumentId, page: Page, note: &str) -> Result<bool> {
        let _guard = self.db.write_lock().await;

        let mut bookmarks = self.list(doc).await?;
        if bookmarks.iter().any(|b| b.page == page) {
            tracing::debug!(document = %doc, page = page.get(), "page already bookmarked");
            return Ok(false);
        }

        bookmarks.push(Bookmark::new(page, note));
        bookmarks.sort_by_key(|b| b.page);
        self.save(doc, &bookmarks).await?;

        tracing::info!(document = %doc, page = page.get(), "bookmark added");
        Ok(true)
    }

    pub async fn remove(&self, doc: DocumentId, page: Page) -> Result<()> {
        let _guard = self.db.write_lock().await;

        let mut bookmarks = self.list(doc).await?;
        bookmarks.retain(|b| b.page != page);
        self.save(doc, &bookmarks).await?;

        tracing::info!(document = %doc, page = page.get(), "bookmark removed");
        Ok(())
    }

    /// Flips the bookmark at `page` and returns whether it is now bookmarked.
    /// `note` is only used when a bookmark is created.
    pub async fn toggle(&self, doc: DocumentId, page: Page, note: &str) -> Result<bool> {
        let _guard = self.db.write_lock().await;

        let mut bookmarks = self.list(doc).await?;
        let bookmarked = if bookmarks.iter().any(|b| b.page == page) {
            bookmarks.retain(|b| b.page != page);
            false
        } else {
            bookmarks.push(Bookmark::new(page, note));
            bookmarks.sort_by_key(|b| b.page);
            true
        };
        self.save(doc, &bookmarks).await?;

        tracing::info!(document = %doc, page = page.get(), bookmarked, "bookmark toggled");
        Ok(bookmarked)
    }

    async fn save(&self, doc: DocumentId, bookmarks: &[Bookmark]) -> Result<()> {
        let raw = serde_json::to_string(bookmarks)?;
        self.db.put_slot(&bookmarks_key(doc), &raw).await
    }
}

/// Last page viewed per document.
pub struct ReadingPositions<'a> {
    db: &'a Database,
}

impl<'a> ReadingPositions<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn get_last(&self, doc: DocumentId) -> Result<Option<Page>> {
        let Some(raw) = self.db.get_slot(&last_page_key(doc)).await? else {
            return Ok(None);
        };

        let page = raw.trim().parse::<u32>().ok().and_then(Page::new);
        if page.is_none() {
            tracing::warn!(document = %doc, value = %raw, "unreadable reading position, ignoring");
        }
        Ok(page)
    }

    pub async fn set_last(&self, doc: DocumentId, page: Page) -> Result<()> {
        self.db.put_slot(&last_page_key(doc), &page.get().to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32) -> Page {
        Page::new(n).unwrap()
    }

    fn pages(list: &[Bookmark]) -> Vec<u32> {
        list.iter().map(|b| b.page.get()).collect()
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_page() {
        let db = Database::in_memory().await.unwrap();
        let store = Bookmarks::new(&db);

        for p in [45, 12, 30] {
            assert!(store.add(DocumentId::Pmbok, page(p), "").await.unwrap());
        }

        assert_eq!(pages(&store.list(DocumentId::Pmbok).await.unwrap()), vec![12, 30, 45]);
        assert!(store.list(DocumentId::Prince2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_add_is_rejected() {
        let db = Database::in_memory().await.unwrap();
        let store = Bookmarks::new(&db);

        assert!(store.add(DocumentId::Prince2, page(7), "themes").await.unwrap());
        assert!(!store.add(DocumentId::Prince2, page(7), "again").await.unwrap());

        let list = store.list(DocumentId::Prince2).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].note, "themes");
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let db = Database::in_memory().await.unwrap();
        let store = Bookmarks::new(&db);

        store.add(DocumentId::Iso21500, page(8), "").await.unwrap();
        assert!(store.has(DocumentId::Iso21500, page(8)).await.unwrap());

        store.remove(DocumentId::Iso21500, page(8)).await.unwrap();
        assert!(!store.has(DocumentId::Iso21500, page(8)).await.unwrap());

        // removing an absent page is a no-op
        store.remove(DocumentId::Iso21500, page(8)).await.unwrap();
        store.remove(DocumentId::Iso21500, page(99)).await.unwrap();
        assert!(store.list(DocumentId::Iso21500).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sorted_after_mixed_mutations() {
        let db = Database::in_memory().await.unwrap();
        let store = Bookmarks::new(&db);

        for p in [90, 3, 57, 21, 3, 14] {
            store.add(DocumentId::Iso21502, page(p), "").await.unwrap();
        }
        store.remove(DocumentId::Iso21502, page(57)).await.unwrap();
        store.add(DocumentId::Iso21502, page(1), "").await.unwrap();

        let list = pages(&store.list(DocumentId::Iso21502).await.unwrap());
        assert_eq!(list, vec![1, 3, 14, 21, 90]);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let db = Database::in_memory().await.unwrap();
        let store = Bookmarks::new(&db);

        assert!(store.toggle(DocumentId::Pmbok, page(73), "").await.unwrap());
        assert!(store.has(DocumentId::Pmbok, page(73)).await.unwrap());
        assert!(!store.toggle(DocumentId::Pmbok, page(73), "").await.unwrap());
        assert!(!store.has(DocumentId::Pmbok, page(73)).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let db = Database::in_memory().await.unwrap();
        let store = Bookmarks::new(&db);

        let (a, b, c) = tokio::join!(
            store.add(DocumentId::Prince2, page(7), ""),
            store.add(DocumentId::Prince2, page(3), ""),
            store.toggle(DocumentId::Prince2, page(5), "stages"),
        );
        assert!(a.unwrap() && b.unwrap() && c.unwrap());
        assert_eq!(pages(&store.list(DocumentId::Prince2).await.unwrap()), vec![3, 5, 7]);
    }

    #[tokio::test]
    async fn test_documents_do_not_share_slots() {
        let db = Database::in_memory().await.unwrap();
        let store = Bookmarks::new(&db);

        store.add(DocumentId::Pmbok, page(10), "").await.unwrap();
        assert!(!store.has(DocumentId::Prince2, page(10)).await.unwrap());
        assert!(store.add(DocumentId::Prince2, page(10), "").await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_slot_lists_as_empty() {
        let db = Database::in_memory().await.unwrap();
        db.put_slot("bookmarks:pmbok", "{not json").await.unwrap();

        let store = Bookmarks::new(&db);
        assert!(store.list(DocumentId::Pmbok).await.unwrap().is_empty());
        assert!(store.add(DocumentId::Pmbok, page(5), "").await.unwrap());
        assert_eq!(pages(&store.list(DocumentId::Pmbok).await.unwrap()), vec![5]);
    }

    #[tokio::test]
    async fn test_reading_position() {
        let db = Database::in_memory().await.unwrap();
        let positions = ReadingPositions::new(&db);

        assert_eq!(positions.get_last(DocumentId::Iso21502).await.unwrap(), None);
        positions.set_last(DocumentId::Iso21502, page(78)).await.unwrap();
        assert_eq!(positions.get_last(DocumentId::Iso21502).await.unwrap(), Some(page(78)));

        positions.set_last(DocumentId::Iso21502, page(3)).await.unwrap();
        assert_eq!(positions.get_last(DocumentId::Iso21502).await.unwrap(), Some(page(3)));
        assert_eq!(positions.get_last(DocumentId::Pmbok).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reading_position_ignores_garbage() {
        let db = Database::in_memory().await.unwrap();
        db.put_slot("last_page:prince2", "0").await.unwrap();
        let positions = ReadingPositions::new(&db);
        assert_eq!(positions.get_last(DocumentId::Prince2).await.unwrap(), None);
    }
}
