//! Runs page requests in the background
//!
//! The UI loop owns the controller. `Loader::dispatch` spawns the fetch and
//! the completion comes back on a channel the loop selects on, so the
//! controller is still only touched from one task.

use super::client::PostSource;
use super::controller::{FetchCompletion, PageRequest};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Channel capacity for completions (at most one is ever in flight)
const COMPLETION_BUFFER: usize = 4;

/// Spawns fetches and forwards their completions
#[derive(Clone)]
pub struct Loader {
    source: Arc<dyn PostSource>,
    tx: mpsc::Sender<FetchCompletion>,
}

impl Loader {
    /// Create a loader and the receiver its completions arrive on
    pub fn new(source: Arc<dyn PostSource>) -> (Self, mpsc::Receiver<FetchCompletion>) {
        let (tx, rx) = mpsc::channel(COMPLETION_BUFFER);
        (Self { source, tx }, rx)
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Start fetching `request` in a background task
    pub fn dispatch(&self, request: PageRequest) {
        let fetch = self.source.fetch_posts(request.page, request.limit);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = fetch.await;
            // Receiver gone means the UI is shutting down
            let _ = tx.send(FetchCompletion { request, result }).await;
        });
    }
}
