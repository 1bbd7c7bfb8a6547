use std::time::Duration;

use storefront_core::{OrderConfirmation, OrderInput, Page, SearchCriteria};
use storefront_logging::store_debug;

use crate::graphql::{
    create_order_request, decode_order_response, decode_search_response, search_request,
    GraphqlRequest,
};
use crate::{ApiError, FailureKind};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4000/graphql".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Paged product search. Idempotent and safe to retry.
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria, page: u32) -> Result<Page, ApiError>;
}

/// Order submission. Not idempotent; callers send each order once.
#[async_trait::async_trait]
pub trait OrderClient: Send + Sync {
    async fn create_order(&self, order: &OrderInput) -> Result<OrderConfirmation, ApiError>;
}

#[derive(Debug, Clone)]
pub struct GraphqlClient {
    endpoint: url::Url,
    client: reqwest::Client,
}

impl GraphqlClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let endpoint = url::Url::parse(&settings.endpoint)
            .map_err(|err| ApiError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ApiError::new(
                FailureKind::InvalidEndpoint,
                format!("unsupported scheme {}", endpoint.scheme()),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { endpoint, client })
    }

    async fn post(&self, request: &GraphqlRequest<'_>) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl SearchClient for GraphqlClient {
    async fn search(&self, criteria: &SearchCriteria, page: u32) -> Result<Page, ApiError> {
        let body = self.post(&search_request(criteria, page)).await?;
        let items = decode_search_response(&body)?;
        store_debug!(
            "search {:?} page {} returned {} item(s)",
            criteria.query_text(),
            page,
            items.len()
        );
        Ok(Page::new(page, items))
    }
}

#[async_trait::async_trait]
impl OrderClient for GraphqlClient {
    async fn create_order(&self, order: &OrderInput) -> Result<OrderConfirmation, ApiError> {
        let body = self.post(&create_order_request(order)).await?;
        decode_order_response(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
