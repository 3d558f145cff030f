//! Profile resolution across the primary and secondary profile providers

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::data::provider::{first_non_empty, with_timeout, FallbackStep, ProfileProvider};
use crate::data::{Profile, ProfilePayload, Symbol};

/// Where a resolved profile came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProfileOrigin {
    Primary,
    Secondary,
    /// Neither provider returned anything; name and industry are the ticker
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile {
    pub profile: Profile,
    pub origin: ProfileOrigin,
}

/// Merges two provider payload shapes into one profile per stock
pub struct ProfileResolver {
    primary: Arc<dyn ProfileProvider>,
    secondary: Arc<dyn ProfileProvider>,
    fetch_timeout: Duration,
}

impl ProfileResolver {
    pub fn new(
        primary: Arc<dyn ProfileProvider>,
        secondary: Arc<dyn ProfileProvider>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            secondary,
            fetch_timeout,
        }
    }

    /// Resolve one symbol. Never fails: missing data degrades to the ticker.
    pub async fn resolve(&self, symbol: &Symbol) -> ResolvedProfile {
        let primary = self.fetch(self.primary.as_ref(), symbol).await;
        let chosen = first_non_empty(primary, ProfilePayload::is_empty, || {
            self.fetch(self.secondary.as_ref(), symbol)
        })
        .await;

        match chosen {
            Some((payload, step)) => ResolvedProfile {
                profile: merge_payload(symbol, payload),
                origin: match step {
                    FallbackStep::Primary => ProfileOrigin::Primary,
                    FallbackStep::Secondary => ProfileOrigin::Secondary,
                },
            },
            None => {
                warn!(%symbol, "No profile data was found, using ticker as name and industry");
                ResolvedProfile {
                    profile: Profile::placeholder(symbol),
                    origin: ProfileOrigin::Placeholder,
                }
            }
        }
    }

    /// Failures and timeouts count as an empty payload
    async fn fetch(&self, provider: &dyn ProfileProvider, symbol: &Symbol) -> ProfilePayload {
        let operation = format!("{} profile for {}", provider.name(), symbol);
        match with_timeout(&operation, self.fetch_timeout, provider.fetch_profile(symbol)).await {
            Ok(payload) => payload,
            Err(e) => {
                debug!(provider = provider.name(), %symbol, error = %e, "Profile fetch failed");
                ProfilePayload::empty()
            }
        }
    }
}

/// Each sub-field falls back to the ticker on its own
fn merge_payload(symbol: &Symbol, payload: ProfilePayload) -> Profile {
    Profile {
        name: payload.name.unwrap_or_else(|| symbol.to_string()),
        industry: payload.industry.unwrap_or_else(|| symbol.to_string()),
    }
}
