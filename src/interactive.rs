//! Debounced live-search wrapper for suggest-as-you-type callers.
//!
//! A worker thread owns the engine; queries go in over a channel and
//! result batches come back tagged with the query that produced them.
//! Bursts of closely spaced queries are coalesced: the worker keeps
//! draining until the debounce window stays quiet, then searches once
//! with the latest input. At most one search is ever in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};

use crate::engine::SearchEngine;
use crate::item::SearchResult;

/// One batch of results, tagged with the query that produced it.
pub struct LiveResults {
    /// The (raw) query string that was searched.
    pub query: String,
    /// The matching records, best first.
    pub results: Vec<SearchResult>,
}

/// Handle to a live-search worker.
pub struct LiveSearch {
    query_tx: Sender<String>,
    results_rx: Receiver<LiveResults>,
    stopped: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LiveSearch {
    /// Move `engine` onto a worker thread with the given debounce
    /// window.
    pub fn spawn(engine: SearchEngine, debounce: Duration) -> Self {
        let (query_tx, query_rx) = unbounded::<String>();
        let (results_tx, results_rx) = unbounded::<LiveResults>();
        let stopped = Arc::new(AtomicBool::new(false));
        let stopped_worker = stopped.clone();

        let handle = std::thread::spawn(move || {
            while let Ok(mut query) = query_rx.recv() {
                if stopped_worker.load(Ordering::Relaxed) {
                    break;
                }
                // Coalesce a burst down to its last query.
                loop {
                    match query_rx.recv_timeout(debounce) {
                        Ok(newer) => query = newer,
                        Err(RecvTimeoutError::Timeout) => break,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                if stopped_worker.load(Ordering::Relaxed) {
                    break;
                }
                trace!("live search for {query:?}");
                let results = engine.search(&query);
                if results_tx.send(LiveResults { query, results }).is_err() {
                    break;
                }
            }
            debug!("live search worker exiting");
        });

        LiveSearch {
            query_tx,
            results_rx,
            stopped,
            handle: Some(handle),
        }
    }

    /// Submit a query. Closely spaced submissions may be coalesced.
    pub fn query(&self, query: &str) {
        let _ = self.query_tx.send(query.to_owned());
    }

    /// The receiving end for result batches.
    pub fn results(&self) -> &Receiver<LiveResults> {
        &self.results_rx
    }

    /// Stop the worker and wait for it to finish.
    pub fn kill(&mut self) {
        self.stopped.store(true, Ordering::Relaxed);
        // Wake the worker if it is parked on recv.
        let _ = self.query_tx.send(String::new());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for LiveSearch {
    fn drop(&mut self) {
        self.kill();
    }
}
