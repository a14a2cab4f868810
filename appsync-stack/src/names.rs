//! Name and endpoint derivations.
//!
//! Everything here is a pure function of its input, recomputed on every
//! call. Data-source names follow the `<Field>DataSource` convention of
//! the deployment engine; the real-time endpoint is derived from the
//! primary endpoint by literal token substitution.

/// Derives the data-source name for a field: first character uppercased,
/// the rest untouched, suffixed with `DataSource`.
pub fn data_source_name(field_name: &str) -> String {
    let mut name = String::with_capacity(field_name.len() + 10);
    let mut chars = field_name.chars();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name.push_str("DataSource");
    name
}

/// Derives the real-time endpoint from the primary endpoint.
///
/// Two literal, case-sensitive substitutions, each applied to the first
/// occurrence only: `https` becomes `wss` and `api` becomes
/// `realtime-api`. The substitution is lexical, not URL-aware; a missing
/// token is skipped without error. On the usual endpoint shape the `api`
/// token sits mid-word in `appsync-api`, which yields the engine's
/// `appsync-realtime-api` host.
pub fn realtime_url(primary_url: &str) -> String {
    primary_url
        .replacen("https", "wss", 1)
        .replacen("api", "realtime-api", 1)
}
