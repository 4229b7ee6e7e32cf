//! Upstream service registry.
//!
//! Each logical upstream is resolved to a base URL from deployment
//! configuration. Several variable names are accepted per upstream (the
//! primary name plus legacy aliases from earlier deployments), evaluated in a
//! fixed precedence order — first non-empty wins. Resolution never fails:
//! an upstream with no configured address yields a target with `base_url:
//! None`, which handlers turn into a 503 without touching the network.

use std::collections::HashMap;
use std::fmt;

#[cfg(test)]
mod tests;

/// The four independently deployed services the gateway fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    Auth,
    Sync,
    SearchIndex,
    SearchAdmin,
}

impl Upstream {
    /// Configuration variable names, primary first, legacy aliases after.
    pub fn env_aliases(self) -> &'static [&'static str] {
        match self {
            Self::Auth => &["CARDEX_AUTH_URL", "AUTH_SERVICE_URL"],
            Self::Sync => &["CARDEX_SYNC_URL", "SYNC_SERVICE_URL", "SYNC_URL"],
            Self::SearchIndex => &["CARDEX_SEARCH_URL", "MEILI_URL", "SEARCH_URL"],
            Self::SearchAdmin => &["CARDEX_SEARCH_ADMIN_URL", "SEARCH_ADMIN_URL"],
        }
    }

    /// The upstream's own routing prefix, substituted for the gateway's
    /// `/gateway/<service>` segment when the outbound path is built.
    pub fn api_prefix(self) -> &'static str {
        match self {
            Self::Auth => "/api/auth",
            Self::Sync => "/api/v1/sync",
            Self::SearchIndex => "/indexes/cards",
            Self::SearchAdmin => "/api/admin",
        }
    }

    /// Operator-facing hint attached to "unreachable" diagnostics.
    pub fn reachability_hint(self) -> &'static str {
        match self {
            Self::SearchAdmin => {
                "Check that the search admin service is running and that its port is reachable from the gateway."
            }
            Self::SearchIndex => {
                "Check that the search index is running and that its URL is reachable from the gateway."
            }
            _ => "Check the configured service URL and network reachability.",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auth => "Auth service",
            Self::Sync => "Sync service",
            Self::SearchIndex => "Search index",
            Self::SearchAdmin => "Search admin service",
        };
        f.write_str(name)
    }
}

/// Resolved network target for one upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    pub upstream: Upstream,
    /// Never carries a trailing slash. `None` means "not configured".
    pub base_url: Option<String>,
}

/// Snapshot of deployment configuration, taken once at construction.
///
/// Resolution afterwards is a pure lookup, so tests can feed an explicit
/// variable table instead of mutating process environment.
#[derive(Debug, Clone, Default)]
pub struct UpstreamRegistry {
    vars: HashMap<String, String>,
}

impl UpstreamRegistry {
    /// Snapshot the process environment.
    pub fn from_env() -> Self {
        Self { vars: std::env::vars().collect() }
    }

    /// Build from explicit pairs (tests, embedded use).
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Resolve an upstream to its base URL, if any alias is set.
    pub fn resolve(&self, upstream: Upstream) -> UpstreamTarget {
        let base_url = upstream.env_aliases().iter().find_map(|name| {
            let value = self.vars.get(*name)?.trim();
            if value.is_empty() {
                return None;
            }
            Some(value.trim_end_matches('/').to_string())
        });
        UpstreamTarget { upstream, base_url }
    }

    /// Optional API key forwarded to the search index by the debug probes.
    pub fn search_api_key(&self) -> Option<&str> {
        let key = self.vars.get("CARDEX_SEARCH_API_KEY")?.trim();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }
}
