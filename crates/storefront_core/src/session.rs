//! The incremental search aggregator.
//!
//! A [`SearchSession`] accumulates pages for one [`SearchCriteria`] value.
//! Criteria changes never mutate a session: the caller replaces it with a new
//! one carrying a later [`Generation`], and completions tagged with any other
//! generation are dropped on arrival.
use std::collections::HashSet;
use std::fmt;

use storefront_logging::store_debug;

use crate::{ErrorInfo, Page, Product, ProductId, SearchCriteria};

/// Epoch of a search session. Strictly increases on every criteria change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    /// Page 1 is in flight.
    Loading,
    /// A continuation page is in flight.
    LoadingMore,
    Error,
    /// No further pages exist for the current criteria.
    Exhausted,
}

/// A fetch the session wants issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: Generation,
    pub criteria: SearchCriteria,
    pub page: u32,
}

/// Whether a completion changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Superseded generation or unexpected page; the session is untouched.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    criteria: SearchCriteria,
    generation: Generation,
    accumulated: Vec<Product>,
    seen: HashSet<ProductId>,
    highest_loaded_page: u32,
    status: SearchStatus,
    last_error: Option<ErrorInfo>,
    failed_page: Option<u32>,
    in_flight: Option<u32>,
}

impl SearchSession {
    /// Creates a session in `Loading` together with its page-1 request.
    pub fn start(criteria: SearchCriteria, generation: Generation) -> (Self, PageRequest) {
        let session = Self {
            criteria,
            generation,
            accumulated: Vec::new(),
            seen: HashSet::new(),
            highest_loaded_page: 0,
            status: SearchStatus::Loading,
            last_error: None,
            failed_page: None,
            in_flight: Some(1),
        };
        let request = session.request_for(1);
        (session, request)
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn items(&self) -> &[Product] {
        &self.accumulated
    }

    pub fn highest_loaded_page(&self) -> u32 {
        self.highest_loaded_page
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&ErrorInfo> {
        self.last_error.as_ref()
    }

    /// Page number of the outstanding fetch, if any.
    pub fn in_flight(&self) -> Option<u32> {
        self.in_flight
    }

    /// Continuation is possible. Relies on the short-page rule only, never on
    /// the size of the deduplicated list.
    pub fn has_more(&self) -> bool {
        self.status != SearchStatus::Exhausted && !self.accumulated.is_empty()
    }

    /// Requests the next page. Only accepted in `Idle`.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.status != SearchStatus::Idle {
            return None;
        }
        let page = self.highest_loaded_page + 1;
        self.status = SearchStatus::LoadingMore;
        self.in_flight = Some(page);
        Some(self.request_for(page))
    }

    /// Re-issues the page that last failed, under the same generation.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if self.status != SearchStatus::Error {
            return None;
        }
        let page = self.failed_page.unwrap_or(self.highest_loaded_page + 1);
        self.status = if page == 1 {
            SearchStatus::Loading
        } else {
            SearchStatus::LoadingMore
        };
        self.last_error = None;
        self.in_flight = Some(page);
        Some(self.request_for(page))
    }

    pub fn apply_success(&mut self, generation: Generation, page: Page) -> Completion {
        if self.is_stale(generation, page.page_number) {
            return Completion::Stale;
        }

        let exhausted = page.is_last(self.criteria.page_size());
        let fetched = page.items.len();
        if page.page_number == 1 {
            self.accumulated.clear();
            self.seen.clear();
        }
        let added = self.append_unique(page.items);
        if added < fetched {
            store_debug!(
                "{} page {}: dropped {} duplicate item(s)",
                self.generation,
                page.page_number,
                fetched - added
            );
        }

        self.highest_loaded_page = page.page_number;
        self.in_flight = None;
        self.failed_page = None;
        self.last_error = None;
        self.status = if exhausted {
            SearchStatus::Exhausted
        } else {
            SearchStatus::Idle
        };
        Completion::Applied
    }

    /// Records a failure; items already accumulated stay visible.
    pub fn apply_failure(
        &mut self,
        generation: Generation,
        page_number: u32,
        error: ErrorInfo,
    ) -> Completion {
        if self.is_stale(generation, page_number) {
            return Completion::Stale;
        }
        self.in_flight = None;
        self.failed_page = Some(page_number);
        self.last_error = Some(error);
        self.status = SearchStatus::Error;
        Completion::Applied
    }

    fn is_stale(&self, generation: Generation, page_number: u32) -> bool {
        if generation != self.generation {
            store_debug!(
                "discarding page {} of {} (current {})",
                page_number,
                generation,
                self.generation
            );
            return true;
        }
        if self.in_flight != Some(page_number) {
            store_debug!(
                "discarding unexpected page {} of {} (in flight: {:?})",
                page_number,
                generation,
                self.in_flight
            );
            return true;
        }
        false
    }

    fn append_unique(&mut self, items: Vec<Product>) -> usize {
        let before = self.accumulated.len();
        for item in items {
            if self.seen.insert(item.id.clone()) {
                self.accumulated.push(item);
            }
        }
        self.accumulated.len() - before
    }

    fn request_for(&self, page: u32) -> PageRequest {
        PageRequest {
            generation: self.generation,
            criteria: self.criteria.clone(),
            page,
        }
    }
}
