//! Background execution of fetch requests.
//!
//! Each dispatched request runs on its own short-lived thread so a slow page
//! never blocks a newer query. Completions are delivered over an mpsc channel
//! and drained by the event loop with [`FetchWorker::poll`].

use super::{FetchCompletion, FetchRequest, ResultFetcher};
use crate::model::FetchError;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error};

/// Runs [`FetchRequest`]s off the event-loop thread.
pub struct FetchWorker {
    fetcher: Arc<dyn ResultFetcher>,
    tx: Sender<FetchCompletion>,
    rx: Receiver<FetchCompletion>,
}

impl FetchWorker {
    /// Create a worker around a fetcher.
    pub fn new(fetcher: Arc<dyn ResultFetcher>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { fetcher, tx, rx }
    }

    /// Start a request in the background.
    ///
    /// Never fails: if the thread cannot be spawned the request completes
    /// immediately with a [`FetchError::Transport`], so the session still
    /// receives exactly one completion per request.
    pub fn dispatch(&self, request: FetchRequest) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let fallback = request.clone();
        let name = format!("fetch-{}", request.ticket.get());

        debug!(
            ticket = request.ticket.get(),
            query = request.query.as_str(),
            page = request.page.get(),
            "Dispatching fetch"
        );

        let spawned = thread::Builder::new().name(name).spawn(move || {
            let completion = request.run(fetcher.as_ref());
            // Receiver gone means the UI has shut down; nothing to deliver to.
            let _ = tx.send(completion);
        });

        if let Err(e) = spawned {
            error!(error = %e, "Failed to spawn fetch thread");
            let _ = self.tx.send(FetchCompletion {
                request: fallback,
                result: Err(FetchError::Transport(format!(
                    "could not start background fetch: {e}"
                ))),
            });
        }
    }

    /// Drain all completions that have arrived. Non-blocking.
    pub fn poll(&self) -> Vec<FetchCompletion> {
        self.rx.try_iter().collect()
    }

    /// Block until one completion arrives or `timeout` elapses.
    pub fn wait(&self, timeout: Duration) -> Option<FetchCompletion> {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
