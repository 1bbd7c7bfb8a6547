use crate::{
    CartLine, Category, ErrorInfo, Generation, OrderConfirmation, Page, PaymentMethod, ProductId,
    SearchCriteria, ShippingField, SortKey,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Results view opened with the criteria taken from its location.
    ViewOpened(SearchCriteria),
    /// Results view closed; the live session is discarded.
    ViewClosed,
    /// User is typing in the search box. Display-only until submitted.
    QueryEdited(String),
    /// User submitted the search box.
    QuerySubmitted,
    CategoryChanged(String),
    /// Category listing opened: the category alone, every other filter reset.
    CategoryBrowsed(Category),
    SortChanged(SortKey),
    /// Price slider moved. Display-only; does not start a fetch.
    PriceRangeDragged { min: u32, max: u32 },
    /// Price slider released.
    PriceRangeCommitted { min: u32, max: u32 },
    /// User scrolled to the end of the list.
    LoadMoreRequested,
    RetryRequested,
    /// Search call returned a page.
    PageFetched { generation: Generation, page: Page },
    /// Search call failed or timed out.
    PageFailed {
        generation: Generation,
        page_number: u32,
        error: ErrorInfo,
    },
    /// Add one unit of the search result at `index` (zero-based).
    AddResultToCart { index: usize },
    RemoveFromCart(ProductId),
    CartQuantityChanged { id: ProductId, quantity: u32 },
    CartCleared,
    /// Restore a cart saved by a previous run.
    RestoreCart(Vec<CartLine>),
    CheckoutNext,
    CheckoutBack,
    CheckoutRestarted,
    ShippingEdited { field: ShippingField, value: String },
    PaymentMethodSelected(PaymentMethod),
    PayNowClicked,
    /// Order submission finished.
    OrderCompleted(Result<OrderConfirmation, ErrorInfo>),
    AlertDismissed,
    /// Render tick.
    Tick,
    NoOp,
}
