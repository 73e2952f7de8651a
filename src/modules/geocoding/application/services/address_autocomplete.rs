use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::geocoding::application::domain::entities::AddressSuggestion;
use crate::geocoding::application::ports::outgoing::geocoding_provider::GeocodingProvider;

#[derive(Debug, Default)]
struct LookupState {
    generation: u64,
    suggestions: Vec<AddressSuggestion>,
    in_flight: usize,
}

/// Debounced address lookup.
///
/// Every keystroke supersedes the lookup still waiting out its debounce.
/// A lookup that already reached the provider is not cancelled; whatever it
/// returns replaces the list, even if a newer lookup answered first.
#[derive(Clone)]
pub struct AddressAutocomplete {
    provider: Arc<dyn GeocodingProvider>,
    debounce: Duration,
    limit: usize,
    state: Arc<Mutex<LookupState>>,
}

impl fmt::Debug for AddressAutocomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressAutocomplete")
            .field("debounce", &self.debounce)
            .field("limit", &self.limit)
            .finish()
    }
}

impl AddressAutocomplete {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
    pub const DEFAULT_LIMIT: usize = 5;

    pub fn new(provider: Arc<dyn GeocodingProvider>) -> Self {
        Self::with_settings(provider, Self::DEFAULT_DEBOUNCE, Self::DEFAULT_LIMIT)
    }

    pub fn with_settings(
        provider: Arc<dyn GeocodingProvider>,
        debounce: Duration,
        limit: usize,
    ) -> Self {
        Self {
            provider,
            debounce,
            limit,
            state: Arc::new(Mutex::new(LookupState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LookupState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Feed the current address text.
    ///
    /// Blank text clears the list immediately and schedules nothing.
    /// Otherwise the returned task fires the lookup once the debounce
    /// elapses without further input. Must be called inside a tokio runtime.
    pub fn input(&self, text: &str) -> Option<JoinHandle<()>> {
        let query = text.trim().to_string();

        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            if query.is_empty() {
                state.suggestions.clear();
                return None;
            }
            state.generation
        };

        let this = self.clone();
        Some(tokio::spawn(async move {
            tokio::time::sleep(this.debounce).await;
            this.lookup(generation, query).await;
        }))
    }

    async fn lookup(&self, generation: u64, query: String) {
        {
            let mut state = self.lock();
            if state.generation != generation {
                debug!(query = %query, "Lookup superseded before firing");
                return;
            }
            state.in_flight += 1;
        }

        let result = self.provider.autocomplete(&query, self.limit).await;

        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        match result {
            Ok(suggestions) => {
                debug!(query = %query, count = suggestions.len(), "Suggestions received");
                state.suggestions = suggestions;
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Address lookup failed");
            }
        }
    }

    /// Take the suggestion at `index`, closing the list.
    pub fn select(&self, index: usize) -> Option<AddressSuggestion> {
        let mut state = self.lock();
        let picked = state.suggestions.get(index).cloned()?;
        state.suggestions.clear();
        state.generation += 1;
        Some(picked)
    }

    /// Drop the list and any lookup still waiting to fire.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.suggestions.clear();
        state.generation += 1;
    }

    pub fn suggestions(&self) -> Vec<AddressSuggestion> {
        self.lock().suggestions.clone()
    }

    /// True while any lookup that reached the provider has not answered.
    pub fn is_searching(&self) -> bool {
        self.lock().in_flight > 0
    }
}
