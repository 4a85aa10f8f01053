use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::error::{PageHitsError, Result};
use crate::page::{Page, PageId};

/// Pages in creation order. Ids are dense and start at 1, so page `id`
/// always lives at index `id - 1`.
#[derive(Default)]
struct Pages {
    items: Vec<Page>,
}

impl Pages {
    fn index_of(&self, id: PageId) -> Option<usize> {
        let idx = usize::try_from(id.checked_sub(1)?).ok()?;
        (idx < self.items.len()).then_some(idx)
    }

    fn next_id(&self) -> PageId {
        self.items.len() as PageId + 1
    }
}

/// Page registry:
/// - owns every page for the lifetime of the process
/// - one lock around the whole collection, held only for O(1) work
///   (O(n) for `list`), never across an await point
#[derive(Default)]
pub struct PageRegistry {
    inner: Mutex<Pages>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still guards consistent data: no operation can panic
    // between reading and writing the collection.
    fn lock(&self) -> MutexGuard<'_, Pages> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all pages, in creation order.
    pub fn list(&self) -> Vec<Page> {
        self.lock().items.clone()
    }

    /// Create a page with `hits = 0`.
    ///
    /// `None` models an absent name. Absent and empty names are rejected;
    /// nothing is stored on failure.
    pub fn create(&self, name: Option<&str>) -> Result<Page> {
        let name = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => return Err(PageHitsError::Validation("name required".into())),
        };

        let mut pages = self.lock();
        let page = Page {
            id: pages.next_id(),
            name,
            hits: 0,
            created_at: Utc::now(),
        };
        pages.items.push(page.clone());
        Ok(page)
    }

    /// Snapshot of one page.
    pub fn get(&self, id: PageId) -> Result<Page> {
        let pages = self.lock();
        let idx = pages.index_of(id).ok_or(PageHitsError::NotFound(id))?;
        Ok(pages.items[idx].clone())
    }

    /// Current hit count of a page.
    pub fn hits(&self, id: PageId) -> Result<u64> {
        let pages = self.lock();
        let idx = pages.index_of(id).ok_or(PageHitsError::NotFound(id))?;
        Ok(pages.items[idx].hits)
    }

    /// Increment a page's hit count by exactly one and return the updated page.
    pub fn hit(&self, id: PageId) -> Result<Page> {
        let mut pages = self.lock();
        let idx = pages.index_of(id).ok_or(PageHitsError::NotFound(id))?;
        let page = &mut pages.items[idx];
        page.hits = page.hits.saturating_add(1);
        Ok(page.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
