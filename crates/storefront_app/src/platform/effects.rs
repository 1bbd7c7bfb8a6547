use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use storefront_core::{Effect, Msg};
use storefront_engine::{EngineEvent, EngineHandle};
use storefront_logging::{store_info, store_warn};

use super::app::Input;
use super::persistence;

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, state_dir: PathBuf, input_tx: mpsc::Sender<Input>) -> Self {
        let runner = Self {
            engine: Arc::new(engine),
            state_dir,
        };
        runner.spawn_event_loop(input_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage(request) => {
                    store_info!(
                        "FetchPage {} page={} query={:?} category={:?}",
                        request.generation,
                        request.page,
                        request.criteria.query_text(),
                        request.criteria.category()
                    );
                    self.engine.fetch_page(request);
                }
                Effect::SubmitOrder { order } => {
                    store_info!("SubmitOrder items={}", order.items.len());
                    self.engine.submit_order(order);
                }
                Effect::PersistCart { lines } => {
                    persistence::save_cart(&self.state_dir, &lines);
                }
            }
        }
    }

    fn spawn_event_loop(&self, input_tx: mpsc::Sender<Input>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let event = match engine.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    store_info!("Engine stopped, event loop exiting");
                    break;
                }
            };
            if input_tx.send(Input::Msg(map_event(event))).is_err() {
                break;
            }
        });
    }

    /// Stops the engine; the event loop exits once in-flight calls have reported.
    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched {
            generation,
            page_number: _,
            result: Ok(page),
        } => Msg::PageFetched { generation, page },
        EngineEvent::PageFetched {
            generation,
            page_number,
            result: Err(err),
        } => {
            store_warn!("Page {} of {} failed: {}", page_number, generation, err);
            Msg::PageFailed {
                generation,
                page_number,
                error: err.to_error_info(),
            }
        }
        EngineEvent::OrderCompleted { result } => {
            Msg::OrderCompleted(result.map_err(|err| err.to_error_info()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{ErrorInfo, ErrorKind, Generation, OrderConfirmation, Page, Product};
    use storefront_engine::{ApiError, FailureKind};

    fn api_error(kind: FailureKind, message: &str) -> ApiError {
        ApiError {
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn fetched_page_becomes_page_fetched() {
        let page = Page::new(2, vec![Product::new("m1", "Whole milk", 250)]);
        let msg = map_event(EngineEvent::PageFetched {
            generation: Generation::new(3),
            page_number: 2,
            result: Ok(page.clone()),
        });
        assert_eq!(
            msg,
            Msg::PageFetched {
                generation: Generation::new(3),
                page
            }
        );
    }

    #[test]
    fn failed_fetch_keeps_page_number_and_classifies_error() {
        let msg = map_event(EngineEvent::PageFetched {
            generation: Generation::new(1),
            page_number: 4,
            result: Err(api_error(FailureKind::HttpStatus(502), "bad gateway")),
        });
        assert_eq!(
            msg,
            Msg::PageFailed {
                generation: Generation::new(1),
                page_number: 4,
                error: ErrorInfo::new(ErrorKind::Server, "bad gateway"),
            }
        );
    }

    #[test]
    fn order_results_pass_through() {
        let confirmation = OrderConfirmation {
            is_success: false,
            message: Some("Out of stock".to_string()),
        };
        assert_eq!(
            map_event(EngineEvent::OrderCompleted {
                result: Ok(confirmation.clone())
            }),
            Msg::OrderCompleted(Ok(confirmation))
        );
        assert_eq!(
            map_event(EngineEvent::OrderCompleted {
                result: Err(api_error(FailureKind::Timeout, "no response"))
            }),
            Msg::OrderCompleted(Err(ErrorInfo::new(ErrorKind::Timeout, "no response")))
        );
    }
}
