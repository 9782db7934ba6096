//! Search input screen: debounced typing, suggestions, and history.

use std::sync::Arc;
use std::time::Duration;

use reelscout_api::tmdb::{
    DEFAULT_LANGUAGE, SearchKeywordsParams, SearchPeopleParams, TmdbApi, TmdbError,
};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::category::{SearchCategory, SearchContext, SearchMode};
use crate::error::SearchError;
use crate::history::{HistoryBackend, HistoryStore};
use crate::item::{SearchTarget, SuggestionItem};

/// Quiet period after the last keystroke before suggestions are fetched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Suggestions kept per entity kind.
pub const SUGGESTIONS_PER_KIND: usize = 3;

/// Input screen settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOptions {
    /// Quiet period before typed text is processed.
    pub debounce: Duration,
    /// Person-search language.
    pub language: String,
    /// Include adult profiles in person search.
    pub include_adult: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            language: String::from(DEFAULT_LANGUAGE),
            include_adult: false,
        }
    }
}

/// Section kinds of the input screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Recent selections, shown for empty text.
    History,
    /// "Search as" options for typed text.
    Option,
    /// Hashtags and people matching typed text.
    Suggestion,
}

/// One section of the input screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSection {
    /// Section kind.
    pub kind: SectionKind,
    /// Rows in display order.
    pub items: Vec<SuggestionItem>,
}

/// Everything the input screen renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Text the sections were built for.
    pub text: String,
    /// Sections in display order.
    pub sections: Vec<InputSection>,
    /// Error to show, if any.
    pub error: Option<SearchError>,
}

impl InputSnapshot {
    /// Rows of the first section of `kind`.
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&[SuggestionItem]> {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.items.as_slice())
    }
}

/// Fetches hashtag and people suggestions for `query` concurrently.
///
/// Keeps the first few of each kind, hashtags before people.
///
/// # Errors
///
/// Returns the first failure of either request.
pub async fn fetch_suggestions<A>(
    api: &A,
    query: &str,
    options: &InputOptions,
) -> Result<Vec<SuggestionItem>, TmdbError>
where
    A: TmdbApi + Sync,
{
    let keyword_params = SearchKeywordsParams::new(query);
    let people_params = SearchPeopleParams::new(query)
        .language(options.language.clone())
        .include_adult(options.include_adult);

    let (keywords, people) = futures::try_join!(
        api.search_keywords(&keyword_params),
        api.search_people(&people_params),
    )?;

    let mut items: Vec<SuggestionItem> = keywords
        .results
        .into_iter()
        .take(SUGGESTIONS_PER_KIND)
        .map(|k| SuggestionItem::hashtag(k, query))
        .collect();
    items.extend(
        people
            .results
            .into_iter()
            .take(SUGGESTIONS_PER_KIND)
            .map(|p| SuggestionItem::actor(p, query)),
    );
    Ok(items)
}

#[derive(Debug)]
enum InputCommand {
    Record(SuggestionItem),
    RecordKeyword(String),
    ClearHistory,
}

/// Handle to a running input screen.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchInputHandle {
    text: Arc<watch::Sender<String>>,
    commands: mpsc::UnboundedSender<InputCommand>,
    state: watch::Receiver<InputSnapshot>,
}

impl SearchInputHandle {
    /// Replaces the typed text.
    pub fn set_text(&self, text: impl Into<String>) {
        self.text.send_replace(text.into());
    }

    /// Remembers `item` and returns the result screen it opens.
    pub fn select(&self, item: &SuggestionItem) -> Option<SearchTarget> {
        let target = item.search_target()?;
        self.send(InputCommand::Record(item.clone()));
        Some(target)
    }

    /// Remembers `text` and returns a movie title search for it.
    pub fn submit(&self, text: &str) -> Option<SearchTarget> {
        if text.is_empty() {
            return None;
        }
        self.send(InputCommand::RecordKeyword(String::from(text)));
        Some(SearchTarget {
            category: SearchCategory::Keyword(SearchContext::named(text)),
            mode: SearchMode::ExplicitSearch,
            query: Some(String::from(text)),
        })
    }

    /// Forgets every history entry.
    pub fn clear_history(&self) {
        self.send(InputCommand::ClearHistory);
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> InputSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<InputSnapshot> {
        self.state.clone()
    }

    fn send(&self, command: InputCommand) {
        if self.commands.send(command).is_err() {
            tracing::debug!("input screen stopped, command dropped");
        }
    }
}

struct InputActor<A, B> {
    api: Arc<A>,
    history: HistoryStore<B>,
    options: InputOptions,
    state: watch::Sender<InputSnapshot>,
    /// Text whose sections are on screen; `None` after a superseded fetch.
    last_text: Option<String>,
}

impl<A, B> InputActor<A, B>
where
    A: TmdbApi + Send + Sync + 'static,
    B: HistoryBackend + Send + 'static,
{
    async fn run(
        mut self,
        mut text: watch::Receiver<String>,
        mut commands: mpsc::UnboundedReceiver<InputCommand>,
    ) {
        let mut pending = false;
        loop {
            if !pending {
                tokio::select! {
                    biased;
                    command = commands.recv() => {
                        let Some(command) = command else {
                            break;
                        };
                        self.handle_command(command);
                        continue;
                    }
                    changed = text.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            pending = false;

            if !debounce(self.options.debounce, &mut text).await {
                break;
            }
            let current = text.borrow_and_update().clone();
            if self.last_text.as_deref() == Some(current.as_str()) {
                tracing::trace!(text = %current, "text unchanged after debounce");
                continue;
            }
            pending = self.update_sections(&current, &mut text).await;
            self.last_text = (!pending).then_some(current);
        }
        tracing::debug!("input screen stopped");
    }

    /// Rebuilds sections for `current`. Returns true when newer text arrived
    /// while suggestions were loading.
    async fn update_sections(
        &mut self,
        current: &str,
        text: &mut watch::Receiver<String>,
    ) -> bool {
        if current.is_empty() {
            self.state.send_replace(history_snapshot(&self.history));
            return false;
        }

        let mut snapshot = InputSnapshot {
            text: String::from(current),
            sections: vec![InputSection {
                kind: SectionKind::Option,
                items: SuggestionItem::search_options(current),
            }],
            error: None,
        };
        self.state.send_replace(snapshot.clone());

        let fetched = tokio::select! {
            result = fetch_suggestions(self.api.as_ref(), current, &self.options) => Some(result),
            _ = text.changed() => None,
        };
        match fetched {
            None => {
                tracing::debug!(text = %current, "suggestions superseded by newer text");
                return true;
            }
            Some(Ok(items)) => {
                tracing::debug!(text = %current, count = items.len(), "suggestions loaded");
                snapshot.sections.push(InputSection {
                    kind: SectionKind::Suggestion,
                    items,
                });
                self.state.send_replace(snapshot);
            }
            Some(Err(e)) => {
                tracing::warn!(text = %current, error = %e, "failed to load suggestions");
            }
        }
        false
    }

    fn handle_command(&mut self, command: InputCommand) {
        let result = match command {
            InputCommand::Record(item) => self.history.record_selection(&item),
            InputCommand::RecordKeyword(text) => self.history.record_keyword(&text),
            InputCommand::ClearHistory => self.history.clear(),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to update search history");
        }
        // History is on screen only while the text is empty.
        if self.last_text.as_deref() == Some("") {
            self.state.send_replace(history_snapshot(&self.history));
        }
    }
}

/// Waits until the text has been quiet for `period`.
/// Returns false when the text sender is gone.
async fn debounce(period: Duration, text: &mut watch::Receiver<String>) -> bool {
    loop {
        match tokio::time::timeout(period, text.changed()).await {
            Err(_elapsed) => return true,
            Ok(Ok(())) => {}
            Ok(Err(_closed)) => return false,
        }
    }
}

fn history_snapshot<B: HistoryBackend>(history: &HistoryStore<B>) -> InputSnapshot {
    let items = history.list();
    if items.is_empty() {
        InputSnapshot {
            text: String::new(),
            sections: Vec::new(),
            error: Some(SearchError::NoData),
        }
    } else {
        InputSnapshot {
            text: String::new(),
            sections: vec![InputSection {
                kind: SectionKind::History,
                items,
            }],
            error: None,
        }
    }
}

/// Starts an input screen on the current runtime, showing history first.
///
/// The actor stops once every [`SearchInputHandle`] is dropped.
pub fn spawn_search_input<A, B>(
    api: Arc<A>,
    history: HistoryStore<B>,
    options: InputOptions,
) -> (SearchInputHandle, JoinHandle<()>)
where
    A: TmdbApi + Send + Sync + 'static,
    B: HistoryBackend + Send + 'static,
{
    let (text_tx, text_rx) = watch::channel(String::new());
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(history_snapshot(&history));

    let actor = InputActor {
        api,
        history,
        options,
        state: state_tx,
        last_text: Some(String::new()),
    };
    let task = tokio::spawn(actor.run(text_rx, commands_rx));

    (
        SearchInputHandle {
            text: Arc::new(text_tx),
            commands: commands_tx,
            state: state_rx,
        },
        task,
    )
}
