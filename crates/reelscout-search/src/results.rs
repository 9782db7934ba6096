//! Result screen actor.
//!
//! Owns a [`SearchResultController`], receives user events over an
//! unbounded channel, runs fetches on spawned tasks, and publishes a
//! [`ResultSnapshot`] after every change.

use std::collections::HashMap;
use std::sync::Arc;

use reelscout_api::tmdb::{TmdbApi, TmdbError};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::dispatcher::{SearchResponse, execute};
use crate::pagination::{FetchAction, PendingFetch, ResultSnapshot, SearchResultController};

#[derive(Debug)]
enum ResultEvent {
    Fetch {
        action: FetchAction,
        done: Option<oneshot::Sender<()>>,
    },
    ItemVisible(usize),
    ToggleLayout,
    UpdateQuery(String),
}

#[derive(Debug)]
struct Completion {
    seq: u64,
    result: Result<SearchResponse, TmdbError>,
}

/// Handle to a running result screen.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchResultHandle {
    events: mpsc::UnboundedSender<ResultEvent>,
    state: watch::Receiver<ResultSnapshot>,
}

impl SearchResultHandle {
    /// Requests page 1.
    pub fn refresh(&self) {
        self.send(ResultEvent::Fetch {
            action: FetchAction::Refresh,
            done: None,
        });
    }

    /// Requests the next page.
    pub fn load_more(&self) {
        self.send(ResultEvent::Fetch {
            action: FetchAction::LoadMore,
            done: None,
        });
    }

    /// Reports that row `index` is on screen.
    pub fn item_visible(&self, index: usize) {
        self.send(ResultEvent::ItemVisible(index));
    }

    /// Switches between list and card layout.
    pub fn toggle_layout(&self) {
        self.send(ResultEvent::ToggleLayout);
    }

    /// Replaces the query and reloads page 1.
    pub fn update_query(&self, query: impl Into<String>) {
        self.send(ResultEvent::UpdateQuery(query.into()));
    }

    /// Runs `action` and waits until it settles.
    ///
    /// Returns immediately with the current state when the action is
    /// ignored or superseded.
    pub async fn fetch(&self, action: FetchAction) -> ResultSnapshot {
        let (tx, rx) = oneshot::channel();
        self.send(ResultEvent::Fetch {
            action,
            done: Some(tx),
        });
        // A dropped sender also means the fetch is over.
        let _settled = rx.await;
        self.snapshot()
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> ResultSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResultSnapshot> {
        self.state.clone()
    }

    fn send(&self, event: ResultEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("result screen stopped, event dropped");
        }
    }
}

struct ResultActor<A> {
    api: Arc<A>,
    controller: SearchResultController,
    state: watch::Sender<ResultSnapshot>,
    completions: mpsc::UnboundedSender<Completion>,
    waiters: HashMap<u64, oneshot::Sender<()>>,
}

impl<A> ResultActor<A>
where
    A: TmdbApi + Send + Sync + 'static,
{
    async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<ResultEvent>,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) {
        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        tracing::debug!("all result handles dropped, stopping");
                        break;
                    };
                    self.handle_event(event);
                }
                Some(completion) = completions.recv() => {
                    let seq = completion.seq;
                    self.controller.complete(seq, completion.result);
                    // Only the matching waiter is woken; stale waiters were
                    // dropped when their fetch was abandoned.
                    if let Some(waiter) = self.waiters.remove(&seq) {
                        let _ignored = waiter.send(());
                    }
                }
            }
            self.publish();
        }
    }

    fn handle_event(&mut self, event: ResultEvent) {
        match event {
            ResultEvent::Fetch { action, done } => {
                if let Some(pending) = self.controller.begin(action) {
                    if let Some(done) = done {
                        self.waiters.insert(pending.seq, done);
                    }
                    self.spawn_fetch(pending);
                }
            }
            ResultEvent::ItemVisible(index) => {
                if let Some(pending) = self.controller.item_visible(index) {
                    self.spawn_fetch(pending);
                }
            }
            ResultEvent::ToggleLayout => {
                if !self.controller.toggle_layout() {
                    tracing::debug!("layout toggle disabled for this result type");
                }
            }
            ResultEvent::UpdateQuery(query) => {
                self.controller.update_query(query);
                self.waiters.clear();
                if let Some(pending) = self.controller.begin(FetchAction::Refresh) {
                    self.spawn_fetch(pending);
                }
            }
        }
    }

    fn spawn_fetch(&self, pending: PendingFetch) {
        let api = Arc::clone(&self.api);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let result = execute(api.as_ref(), &pending.request).await;
            let completion = Completion {
                seq: pending.seq,
                result,
            };
            if completions.send(completion).is_err() {
                tracing::debug!(seq = pending.seq, "result screen stopped before reply");
            }
        });
    }

    fn publish(&self) {
        self.state.send_replace(self.controller.snapshot());
    }
}

/// Starts a result screen on the current runtime.
///
/// The actor stops once every [`SearchResultHandle`] is dropped.
pub fn spawn_search_results<A>(
    api: Arc<A>,
    controller: SearchResultController,
) -> (SearchResultHandle, JoinHandle<()>)
where
    A: TmdbApi + Send + Sync + 'static,
{
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (completions_tx, completions_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(controller.snapshot());

    let actor = ResultActor {
        api,
        controller,
        state: state_tx,
        completions: completions_tx,
        waiters: HashMap::new(),
    };
    let task = tokio::spawn(actor.run(events_rx, completions_rx));

    (
        SearchResultHandle {
            events: events_tx,
            state: state_rx,
        },
        task,
    )
}
