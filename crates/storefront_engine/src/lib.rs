//! Storefront engine: GraphQL calls and effect execution.
mod client;
mod engine;
mod graphql;
mod persist;
mod types;

pub use client::{ClientSettings, GraphqlClient, OrderClient, SearchClient};
pub use engine::{EngineError, EngineHandle, EngineSettings};
pub use graphql::{CREATE_ORDER_MUTATION, SEARCH_PRODUCTS_QUERY};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use types::{ApiError, EngineEvent, FailureKind};
