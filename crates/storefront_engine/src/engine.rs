use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use storefront_core::{OrderInput, PageRequest};
use storefront_logging::{store_debug, store_warn};
use thiserror::Error;

use crate::client::{OrderClient, SearchClient};
use crate::{ApiError, EngineEvent, FailureKind};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Upper bound for one search call. Expiry is reported as a failed fetch.
    pub fetch_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(15),
        }
    }
}

enum EngineCommand {
    FetchPage(PageRequest),
    SubmitOrder(OrderInput),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
}

/// Runs API calls on a background tokio runtime and reports completions as
/// [`EngineEvent`]s, in completion order.
pub struct EngineHandle {
    /// `None` once [`EngineHandle::shutdown`] has closed the command channel.
    cmd_tx: Mutex<Option<mpsc::Sender<EngineCommand>>>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(
        search: Arc<dyn SearchClient>,
        orders: Arc<dyn OrderClient>,
        settings: EngineSettings,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let event_tx = event_tx.clone();
                match command {
                    EngineCommand::FetchPage(request) => {
                        let search = search.clone();
                        let timeout = settings.fetch_timeout;
                        runtime.spawn(async move {
                            let event = fetch_page(search.as_ref(), request, timeout).await;
                            let _ = event_tx.send(event);
                        });
                    }
                    EngineCommand::SubmitOrder(order) => {
                        let orders = orders.clone();
                        runtime.spawn(async move {
                            let result = orders.create_order(&order).await;
                            let _ = event_tx.send(EngineEvent::OrderCompleted { result });
                        });
                    }
                }
            }
            store_debug!("engine command channel closed");
            // Let in-flight calls finish reporting before the runtime drops.
            runtime.shutdown_timeout(Duration::from_secs(1));
        });

        Ok(Self {
            cmd_tx: Mutex::new(Some(cmd_tx)),
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn fetch_page(&self, request: PageRequest) {
        self.send(EngineCommand::FetchPage(request));
    }

    pub fn submit_order(&self, order: OrderInput) {
        self.send(EngineCommand::SubmitOrder(order));
    }

    /// Closes the command channel. The engine finishes in-flight calls, then
    /// the event channel disconnects.
    pub fn shutdown(&self) {
        if let Ok(mut cmd_tx) = self.cmd_tx.lock() {
            cmd_tx.take();
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// engine has stopped and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        match self.event_rx.lock() {
            Ok(event_rx) => event_rx.recv_timeout(timeout),
            Err(_) => Err(RecvTimeoutError::Disconnected),
        }
    }

    fn send(&self, command: EngineCommand) {
        let sent = match self.cmd_tx.lock() {
            Ok(cmd_tx) => cmd_tx
                .as_ref()
                .is_some_and(|cmd_tx| cmd_tx.send(command).is_ok()),
            Err(_) => false,
        };
        if !sent {
            store_warn!("engine stopped, command dropped");
        }
    }
}

async fn fetch_page(
    search: &dyn SearchClient,
    request: PageRequest,
    timeout: Duration,
) -> EngineEvent {
    let PageRequest {
        generation,
        criteria,
        page,
    } = request;
    store_debug!("fetching page {} of {}", page, generation);
    let result = match tokio::time::timeout(timeout, search.search(&criteria, page)).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::new(
            FailureKind::Timeout,
            format!("no response within {} ms", timeout.as_millis()),
        )),
    };
    EngineEvent::PageFetched {
        generation,
        page_number: page,
        result,
    }
}
