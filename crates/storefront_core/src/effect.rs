use crate::{CartLine, OrderInput, PageRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one search call; the result comes back as `PageFetched` or
    /// `PageFailed` tagged with the request's generation.
    FetchPage(PageRequest),
    /// Submit the order exactly once; answered by `OrderCompleted`.
    SubmitOrder { order: OrderInput },
    /// Save the cart so it survives a restart.
    PersistCart { lines: Vec<CartLine> },
}
