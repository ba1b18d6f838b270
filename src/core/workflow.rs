use crate::core::state::{Action, LookupState};
use crate::domain::model::CountryProfile;
use crate::domain::ports::CountryApi;
use crate::utils::error::{LookupError, Result, NOT_FOUND_MESSAGE};
use futures::future::join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Drives a country lookup: name search, neighbor resolution and neighbor selection.
///
/// State lives in a `watch` channel so a renderer can follow every change. Each search is
/// tagged with a generation number and completions from superseded searches are dropped.
pub struct CountryLookupWorkflow<A: CountryApi> {
    api: A,
    state: watch::Sender<LookupState>,
    generation: AtomicU64,
}

impl<A: CountryApi> CountryLookupWorkflow<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: watch::Sender::new(LookupState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> LookupState {
        self.state.borrow().clone()
    }

    pub fn set_query_text(&self, text: &str) {
        self.dispatch(Action::EditQuery(text.to_string()));
    }

    /// Submits whatever is currently in the query text.
    pub async fn submit_current_query(&self) {
        let query = self.state.borrow().query.clone();
        self.submit_query(&query).await;
    }

    /// Looks `name` up and, on success, resolves the match's neighbors. Failures end up in the
    /// state's error slot; nothing is returned to the caller.
    pub async fn submit_query(&self, name: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(Action::BeginSearch { generation });

        tracing::info!("🔍 Searching country '{}' (request #{})", name, generation);

        let outcome = self.api.search_by_name(name).await.and_then(|matches| {
            matches
                .into_iter()
                .next()
                .ok_or_else(|| LookupError::NotFoundError {
                    query: name.to_string(),
                })
        });

        match outcome {
            Ok(profile) => {
                let borders = profile.borders.clone();
                tracing::info!(
                    "✅ Found {} ({}) with {} border(s)",
                    profile.name,
                    profile.code,
                    borders.len()
                );
                if !self.dispatch(Action::PrimaryFound {
                    generation,
                    profile,
                }) {
                    tracing::debug!("Discarding stale result for request #{}", generation);
                    return;
                }
                self.resolve_neighbors(generation, &borders).await;
            }
            Err(e) => {
                tracing::warn!(
                    "❌ Lookup for '{}' failed: {} (Category: {:?})",
                    name,
                    e,
                    e.category()
                );
                let message = if e.is_not_found() {
                    NOT_FOUND_MESSAGE.to_string()
                } else {
                    e.user_friendly_message()
                };
                if !self.dispatch(Action::PrimaryFailed {
                    generation,
                    message,
                }) {
                    tracing::debug!("Discarding stale failure for request #{}", generation);
                }
            }
        }
    }

    /// Fetches every border country concurrently and commits them only if all succeed, in
    /// the order of `border_codes`. Any failure leaves the neighbor set empty without touching
    /// the primary result or the error slot.
    async fn resolve_neighbors(&self, generation: u64, border_codes: &[String]) {
        if border_codes.is_empty() {
            self.dispatch(Action::NeighborsSettled {
                generation,
                neighbors: Vec::new(),
            });
            return;
        }

        self.dispatch(Action::BeginNeighbors { generation });
        tracing::debug!("Resolving {} neighbor(s): {:?}", border_codes.len(), border_codes);

        let lookups = border_codes
            .iter()
            .map(|code| self.api.lookup_by_code(code));
        let results = join_all(lookups).await;

        let mut neighbors: Vec<CountryProfile> = Vec::with_capacity(border_codes.len());
        let mut failures = 0usize;
        for (code, result) in border_codes.iter().zip(results) {
            match result {
                Ok(profile) => neighbors.push(profile),
                Err(e) => {
                    failures += 1;
                    tracing::warn!("⚠️ Neighbor {} could not be resolved: {}", code, e);
                }
            }
        }

        // All or nothing: a partial list is never shown.
        if failures > 0 {
            tracing::warn!(
                "⚠️ {} of {} neighbor lookups failed, hiding neighbor list",
                failures,
                border_codes.len()
            );
            neighbors.clear();
        }

        if !self.dispatch(Action::NeighborsSettled {
            generation,
            neighbors,
        }) {
            tracing::debug!("Discarding stale neighbors for request #{}", generation);
        }
    }

    /// Marks `neighbor` as selected. Rejected when it is not part of the current neighbor set.
    pub fn select_neighbor(&self, neighbor: &CountryProfile) -> Result<()> {
        self.select_neighbor_by_code(&neighbor.code)
    }

    pub fn select_neighbor_by_code(&self, code: &str) -> Result<()> {
        if self.dispatch(Action::SelectNeighbor {
            code: code.to_string(),
        }) {
            tracing::debug!("Selected neighbor {}", code);
            Ok(())
        } else {
            Err(LookupError::UnknownNeighborError {
                code: code.to_string(),
            })
        }
    }

    /// Applies `action` atomically; returns whether the state changed.
    fn dispatch(&self, action: Action) -> bool {
        self.state.send_if_modified(|state| match state.reduce(&action) {
            Some(next) => {
                *state = next;
                true
            }
            None => false,
        })
    }
}
