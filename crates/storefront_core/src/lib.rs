//! Storefront core: pure search/cart/checkout state machine and view-model helpers.
mod cart;
mod checkout;
mod criteria;
mod effect;
mod error;
mod msg;
mod product;
mod session;
mod state;
mod suggest;
mod update;
mod view_model;

pub use cart::{Cart, CartLine};
pub use checkout::{
    CheckoutStep, CheckoutWizard, OrderConfirmation, OrderInput, OrderItem, PaymentMethod,
    ShippingField, ShippingInfo, DEFAULT_COUNTRY, MISSING_SHIPPING_FIELDS,
};
pub use criteria::{
    normalize_price_range, Category, SearchCriteria, SortKey, ALL_CATEGORIES, DEFAULT_PAGE_SIZE,
    PRICE_CEILING,
};
pub use effect::Effect;
pub use error::{ErrorInfo, ErrorKind};
pub use msg::Msg;
pub use product::{format_price, Page, Product, ProductId};
pub use session::{Completion, Generation, PageRequest, SearchSession, SearchStatus};
pub use state::{Alert, AlertSeverity, StorefrontState};
pub use suggest::{suggest_names, SUGGESTION_LIMIT};
pub use update::{update, CART_EMPTY, CHECKOUT_FAILED, ORDER_PLACED};
pub use view_model::{
    CartLineView, CartView, CheckoutView, ProductRowView, SearchView, StorefrontViewModel,
};
