use crate::{
    Alert, CheckoutStep, ErrorInfo, Generation, PaymentMethod, ProductId, SearchCriteria,
    SearchStatus, ShippingInfo,
};

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorefrontViewModel {
    pub search: Option<SearchView>,
    pub query_draft: String,
    pub price_draft: (u32, u32),
    /// Loaded product names matching the uncommitted search box text.
    pub suggestions: Vec<String>,
    pub cart: CartView,
    pub checkout: CheckoutView,
    pub alert: Option<Alert>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub criteria: SearchCriteria,
    pub generation: Generation,
    pub items: Vec<ProductRowView>,
    pub status: SearchStatus,
    pub highest_loaded_page: u32,
    pub has_more: bool,
    /// Initial load with nothing to show yet.
    pub show_spinner: bool,
    pub no_results: bool,
    pub end_of_results: bool,
    pub last_error: Option<ErrorInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRowView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price_cents: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub subtotal_cents: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: u64,
    pub line_total_cents: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckoutView {
    pub step: CheckoutStep,
    pub shipping: ShippingInfo,
    pub payment_method: PaymentMethod,
    pub submitting: bool,
    pub validation_error: Option<String>,
    pub completed: bool,
}
