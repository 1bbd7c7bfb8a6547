use crate::view_model::{
    CartLineView, CartView, CheckoutView, ProductRowView, SearchView, StorefrontViewModel,
};
use crate::{
    suggest_names, Cart, CheckoutWizard, Generation, PageRequest, SearchCriteria, SearchSession,
    SearchStatus, SUGGESTION_LIMIT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Success,
    Error,
}

/// Last notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorefrontState {
    /// Last committed criteria; the base for the next edit.
    criteria: SearchCriteria,
    query_draft: String,
    price_draft: (u32, u32),
    search: Option<SearchSession>,
    last_generation: Generation,
    pub(crate) cart: Cart,
    pub(crate) checkout: CheckoutWizard,
    alert: Option<Alert>,
    dirty: bool,
}

impl StorefrontState {
    pub fn new() -> Self {
        Self::with_criteria(SearchCriteria::default())
    }

    /// State whose first search will use `criteria` (e.g. a configured page size).
    pub fn with_criteria(criteria: SearchCriteria) -> Self {
        Self {
            query_draft: criteria.query_text().to_string(),
            price_draft: criteria.price_range(),
            criteria,
            ..Self::default()
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn search(&self) -> Option<&SearchSession> {
        self.search.as_ref()
    }

    pub(crate) fn search_mut(&mut self) -> Option<&mut SearchSession> {
        self.search.as_mut()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn checkout(&self) -> &CheckoutWizard {
        &self.checkout
    }

    pub fn query_draft(&self) -> &str {
        &self.query_draft
    }

    pub fn price_draft(&self) -> (u32, u32) {
        self.price_draft
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Replaces any live session with a fresh one under the next generation.
    pub(crate) fn open_search(&mut self, criteria: SearchCriteria) -> PageRequest {
        self.last_generation = self.last_generation.next();
        self.query_draft = criteria.query_text().to_string();
        self.price_draft = criteria.price_range();
        let (session, request) = SearchSession::start(criteria.clone(), self.last_generation);
        self.criteria = criteria;
        self.search = Some(session);
        self.dirty = true;
        request
    }

    pub(crate) fn close_search(&mut self) -> bool {
        let closed = self.search.take().is_some();
        if closed {
            self.dirty = true;
        }
        closed
    }

    pub(crate) fn set_query_draft(&mut self, text: String) {
        if self.query_draft != text {
            self.query_draft = text;
            self.dirty = true;
        }
    }

    pub(crate) fn set_price_draft(&mut self, range: (u32, u32)) {
        if self.price_draft != range {
            self.price_draft = range;
            self.dirty = true;
        }
    }

    pub(crate) fn set_alert(&mut self, alert: Option<Alert>) {
        if self.alert != alert {
            self.alert = alert;
            self.dirty = true;
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> StorefrontViewModel {
        StorefrontViewModel {
            search: self.search.as_ref().map(search_view),
            query_draft: self.query_draft.clone(),
            price_draft: self.price_draft,
            suggestions: suggestions(
                self.search.as_ref(),
                &self.query_draft,
                self.criteria.query_text(),
            ),
            cart: cart_view(&self.cart),
            checkout: checkout_view(&self.checkout),
            alert: self.alert.clone(),
            dirty: self.dirty,
        }
    }
}

/// Suggestions only while the search box holds uncommitted text.
fn suggestions(session: Option<&SearchSession>, draft: &str, committed: &str) -> Vec<String> {
    match session {
        Some(session) if draft.trim() != committed => {
            suggest_names(session.items(), draft, SUGGESTION_LIMIT)
        }
        _ => Vec::new(),
    }
}

fn search_view(session: &SearchSession) -> SearchView {
    let status = session.status();
    let empty = session.items().is_empty();
    SearchView {
        criteria: session.criteria().clone(),
        generation: session.generation(),
        items: session
            .items()
            .iter()
            .map(|product| ProductRowView {
                id: product.id.clone(),
                name: product.name.clone(),
                category: product.category.clone(),
                price_cents: product.price_cents,
            })
            .collect(),
        status,
        highest_loaded_page: session.highest_loaded_page(),
        has_more: session.has_more(),
        show_spinner: matches!(status, SearchStatus::Loading) && empty,
        no_results: status == SearchStatus::Exhausted && empty,
        end_of_results: status == SearchStatus::Exhausted && !empty,
        last_error: session.last_error().cloned(),
    }
}

fn cart_view(cart: &Cart) -> CartView {
    CartView {
        lines: cart
            .lines()
            .iter()
            .map(|line| CartLineView {
                id: line.product.id.clone(),
                name: line.product.name.clone(),
                quantity: line.quantity,
                unit_price_cents: line.product.price_cents,
                line_total_cents: line.line_total_cents(),
            })
            .collect(),
        item_count: cart.item_count(),
        subtotal_cents: cart.subtotal_cents(),
    }
}

fn checkout_view(wizard: &CheckoutWizard) -> CheckoutView {
    CheckoutView {
        step: wizard.step(),
        shipping: wizard.shipping().clone(),
        payment_method: wizard.payment_method(),
        submitting: wizard.is_submitting(),
        validation_error: wizard.validation_error().map(ToOwned::to_owned),
        completed: wizard.is_completed(),
    }
}
