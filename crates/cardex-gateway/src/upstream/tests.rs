use super::{Upstream, UpstreamRegistry};

#[test]
fn test_resolve_primary_variable() {
    let registry =
        UpstreamRegistry::from_pairs([("CARDEX_SYNC_URL", "http://sync.internal:8001")]);
    let target = registry.resolve(Upstream::Sync);
    assert_eq!(target.base_url.as_deref(), Some("http://sync.internal:8001"));
}

#[test]
fn test_primary_wins_over_legacy_alias() {
    let registry = UpstreamRegistry::from_pairs([
        ("SYNC_SERVICE_URL", "http://legacy:9"),
        ("CARDEX_SYNC_URL", "http://primary:8001"),
    ]);
    let target = registry.resolve(Upstream::Sync);
    assert_eq!(target.base_url.as_deref(), Some("http://primary:8001"));
}

#[test]
fn test_legacy_alias_used_when_primary_absent() {
    let registry = UpstreamRegistry::from_pairs([("SYNC_URL", "http://old-name:8001")]);
    let target = registry.resolve(Upstream::Sync);
    assert_eq!(target.base_url.as_deref(), Some("http://old-name:8001"));
}

#[test]
fn test_trailing_slashes_stripped() {
    let registry = UpstreamRegistry::from_pairs([("CARDEX_AUTH_URL", "http://auth:8000///")]);
    let target = registry.resolve(Upstream::Auth);
    assert_eq!(target.base_url.as_deref(), Some("http://auth:8000"));
}

#[test]
fn test_empty_value_treated_as_absent() {
    let registry = UpstreamRegistry::from_pairs([
        ("CARDEX_SEARCH_URL", "   "),
        ("MEILI_URL", "http://meili:7700"),
    ]);
    let target = registry.resolve(Upstream::SearchIndex);
    assert_eq!(target.base_url.as_deref(), Some("http://meili:7700"));
}

#[test]
fn test_unconfigured_upstream_resolves_to_none() {
    let registry = UpstreamRegistry::from_pairs::<_, &str, &str>([]);
    for upstream in
        [Upstream::Auth, Upstream::Sync, Upstream::SearchIndex, Upstream::SearchAdmin]
    {
        assert!(registry.resolve(upstream).base_url.is_none(), "{upstream} should be absent");
    }
}

#[test]
fn test_search_api_key() {
    let registry = UpstreamRegistry::from_pairs([("CARDEX_SEARCH_API_KEY", "masterKey")]);
    assert_eq!(registry.search_api_key(), Some("masterKey"));

    let registry = UpstreamRegistry::from_pairs([("CARDEX_SEARCH_API_KEY", "")]);
    assert_eq!(registry.search_api_key(), None);
}
