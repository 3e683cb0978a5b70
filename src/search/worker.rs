//! Background execution of search requests.
//!
//! Each dispatched request runs on its own thread and reports back over a
//! channel. The UI thread drains completed outcomes once per loop iteration.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::session::{FetchOutcome, FetchRequest};

use super::{ImageSearchService, SearchError};

/// Runs [`FetchRequest`]s against an [`ImageSearchService`].
pub struct FetchWorker {
    service: Arc<dyn ImageSearchService>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    in_flight: usize,
}

impl std::fmt::Debug for FetchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchWorker")
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl FetchWorker {
    pub fn new(service: Arc<dyn ImageSearchService>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            service,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Start a request in the background.
    pub fn dispatch(&mut self, request: FetchRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.in_flight += 1;
        crate::perf::log_event(
            "fetch.dispatch",
            format!(
                "token={} page={} query={:?}",
                request.ticket.token, request.ticket.page, request.search.query
            ),
        );
        std::thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| service.search(&request.search)))
                .unwrap_or(Err(SearchError::WorkerPanicked));
            let _ = tx.send(FetchOutcome {
                ticket: request.ticket,
                result,
            });
        });
    }

    /// Drain every outcome that has arrived, without blocking.
    pub fn take_outcomes(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            outcomes.push(outcome);
        }
        self.in_flight = self.in_flight.saturating_sub(outcomes.len());
        outcomes
    }

    /// Block until the next outcome arrives or `timeout` elapses.
    pub fn wait_outcome(&mut self, timeout: Duration) -> Option<FetchOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(outcome)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Number of dispatched requests whose outcome has not been taken yet.
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }
}
