use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use storefront_core::{
    Generation, OrderConfirmation, OrderInput, Page, PageRequest, PaymentMethod, Product,
    SearchCriteria, ShippingInfo,
};
use storefront_engine::{
    ApiError, EngineEvent, EngineHandle, EngineSettings, FailureKind, OrderClient, SearchClient,
};

/// Answers every search after `delay` with `page_size` items named after the page.
struct SlowCatalog {
    delay: Duration,
}

#[async_trait::async_trait]
impl SearchClient for SlowCatalog {
    async fn search(&self, criteria: &SearchCriteria, page: u32) -> Result<Page, ApiError> {
        tokio::time::sleep(self.delay).await;
        let items = (0..criteria.page_size())
            .map(|n| Product::new(format!("p{page}-{n}"), "item", 100))
            .collect();
        Ok(Page::new(page, items))
    }
}

struct AcceptingOrders;

#[async_trait::async_trait]
impl OrderClient for AcceptingOrders {
    async fn create_order(&self, _order: &OrderInput) -> Result<OrderConfirmation, ApiError> {
        Ok(OrderConfirmation {
            is_success: true,
            message: None,
        })
    }
}

fn engine(delay: Duration, fetch_timeout: Duration) -> EngineHandle {
    EngineHandle::new(
        Arc::new(SlowCatalog { delay }),
        Arc::new(AcceptingOrders),
        EngineSettings { fetch_timeout },
    )
    .expect("engine starts")
}

fn request(generation: u64, page: u32) -> PageRequest {
    PageRequest {
        generation: Generation::new(generation),
        criteria: SearchCriteria::new("tea").with_page_size(3),
        page,
    }
}

#[test]
fn fetched_page_carries_request_generation() {
    let engine = engine(Duration::ZERO, Duration::from_secs(5));
    engine.fetch_page(request(4, 2));

    match engine.recv_timeout(Duration::from_secs(5)) {
        Ok(EngineEvent::PageFetched {
            generation,
            page_number,
            result: Ok(page),
        }) => {
            assert_eq!(generation, Generation::new(4));
            assert_eq!(page_number, 2);
            assert_eq!(page.items.len(), 3);
            assert_eq!(page.items[0].id.as_str(), "p2-0");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn fetch_timeout_reports_failure() {
    let engine = engine(Duration::from_secs(5), Duration::from_millis(50));
    engine.fetch_page(request(1, 1));

    match engine.recv_timeout(Duration::from_secs(5)) {
        Ok(EngineEvent::PageFetched {
            generation,
            page_number,
            result: Err(err),
        }) => {
            assert_eq!(generation, Generation::new(1));
            assert_eq!(page_number, 1);
            assert_eq!(err.kind, FailureKind::Timeout);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn completions_arrive_in_completion_order() {
    let engine = EngineHandle::new(
        Arc::new(SlowCatalog {
            delay: Duration::from_millis(20),
        }),
        Arc::new(AcceptingOrders),
        EngineSettings::default(),
    )
    .expect("engine starts");
    engine.submit_order(OrderInput {
        shipping: ShippingInfo::default(),
        items: Vec::new(),
        payment_method: PaymentMethod::Cash,
    });
    engine.fetch_page(request(1, 1));

    let first = engine.recv_timeout(Duration::from_secs(5));
    assert!(matches!(
        first,
        Ok(EngineEvent::OrderCompleted { result: Ok(_) })
    ));
    let second = engine.recv_timeout(Duration::from_secs(5));
    assert!(matches!(second, Ok(EngineEvent::PageFetched { .. })));
    assert!(engine.try_recv().is_none());
}

#[test]
fn shutdown_disconnects_event_channel() {
    let engine = engine(Duration::ZERO, Duration::from_secs(5));
    assert_eq!(
        engine.recv_timeout(Duration::from_millis(20)).err(),
        Some(RecvTimeoutError::Timeout)
    );

    engine.shutdown();
    engine.fetch_page(request(1, 1));

    assert_eq!(
        engine.recv_timeout(Duration::from_secs(5)).err(),
        Some(RecvTimeoutError::Disconnected)
    );
}
