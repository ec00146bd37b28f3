//! Per-request API credential resolution.
//!
//! Clients can hand us the Companies House API key in several places;
//! each source is a small independent function and [`resolve_credential`]
//! tries them in a fixed priority order, first match wins:
//!
//! 1. `x-mcp-config` header (JSON object with an `apiKey` field)
//! 2. `mcp-config` header (same shape, compatibility alias)
//! 3. `x-api-key` header
//! 4. `Authorization: Basic` (decoded username is the key)
//! 5. `Authorization: Bearer` (token is the key)
//! 6. `initialize` params (`clientInfo.config.apiKey`)
//! 7. process-wide fallback from configuration
//!
//! Malformed structured values (bad base64, bad JSON) are skipped, not
//! fatal. Resolving nothing is a valid outcome: the session runs in
//! discovery mode until a key shows up.

use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::mcp::handler::JsonRpcRequest;

/// Structured config headers, in priority order.
const CONFIG_HEADERS: [&str; 2] = ["x-mcp-config", "mcp-config"];

/// Dedicated single-value credential header.
const API_KEY_HEADER: &str = "x-api-key";

/// Resolve a credential from the request, falling back to the process-wide
/// key when nothing request-supplied matches.
pub fn resolve_credential(
    headers: &HeaderMap,
    request: Option<&JsonRpcRequest>,
    fallback: Option<&str>,
) -> Option<String> {
    from_request(headers, request).or_else(|| fallback.map(str::to_string))
}

/// Resolve a credential from request-supplied sources only (headers and
/// initialize payload). Used for per-session credential refresh, where the
/// process fallback must not overwrite a key the client supplied earlier.
pub fn from_request(headers: &HeaderMap, request: Option<&JsonRpcRequest>) -> Option<String> {
    from_config_headers(headers)
        .or_else(|| from_api_key_header(headers))
        .or_else(|| from_basic_auth(headers))
        .or_else(|| from_bearer_token(headers))
        .or_else(|| request.and_then(from_initialize_params))
}

/// Sources 1-2: JSON config headers with an `apiKey` field.
fn from_config_headers(headers: &HeaderMap) -> Option<String> {
    for name in CONFIG_HEADERS {
        let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) else {
            continue;
        };
        // Invalid JSON is skipped, not fatal
        let Ok(config) = serde_json::from_str::<serde_json::Value>(value) else {
            continue;
        };
        if let Some(key) = config.get("apiKey").and_then(|k| k.as_str()) {
            return Some(key.to_string());
        }
    }
    None
}

/// Source 3: dedicated `x-api-key` header.
fn from_api_key_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Source 4: basic auth with the API key as username (Companies House's
/// own auth scheme, so clients can reuse the same credentials).
fn from_basic_auth(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let username = decoded.split(':').next()?;
    if username.is_empty() {
        None
    } else {
        Some(username.to_string())
    }
}

/// Source 5: bearer token.
fn from_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Source 6: `clientInfo.config.apiKey` in an initialize request.
fn from_initialize_params(request: &JsonRpcRequest) -> Option<String> {
    if request.method != "initialize" {
        return None;
    }
    request
        .params
        .as_ref()?
        .get("clientInfo")?
        .get("config")?
        .get("apiKey")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                value.parse().unwrap(),
            );
        }
        map
    }

    fn init_request(api_key: Option<&str>) -> JsonRpcRequest {
        let config = match api_key {
            Some(k) => json!({"apiKey": k}),
            None => json!({}),
        };
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: "initialize".to_string(),
            params: Some(json!({
                "protocolVersion": "2025-03-26",
                "clientInfo": {"name": "test", "version": "0.0.0", "config": config}
            })),
        }
    }

    #[test]
    fn test_config_header_wins_over_everything() {
        let headers = headers(&[
            ("x-mcp-config", r#"{"apiKey":"from-config"}"#),
            ("x-api-key", "from-header"),
            ("authorization", "Bearer from-bearer"),
        ]);
        let request = init_request(Some("from-init"));
        let key = resolve_credential(&headers, Some(&request), Some("from-env"));
        assert_eq!(key.as_deref(), Some("from-config"));
    }

    #[test]
    fn test_alternate_config_header_name() {
        let headers = headers(&[("mcp-config", r#"{"apiKey":"alt"}"#)]);
        assert_eq!(from_request(&headers, None).as_deref(), Some("alt"));
    }

    #[test]
    fn test_primary_config_header_beats_alternate() {
        let headers = headers(&[
            ("x-mcp-config", r#"{"apiKey":"primary"}"#),
            ("mcp-config", r#"{"apiKey":"alternate"}"#),
        ]);
        assert_eq!(from_request(&headers, None).as_deref(), Some("primary"));
    }

    #[test]
    fn test_api_key_header_beats_authorization() {
        let headers = headers(&[
            ("x-api-key", "from-header"),
            ("authorization", "Bearer from-bearer"),
        ]);
        assert_eq!(
            from_request(&headers, None).as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn test_basic_auth_username_is_credential() {
        // "mykey:" base64-encoded
        let encoded = BASE64.encode("mykey:");
        let headers = headers(&[("authorization", &format!("Basic {}", encoded))]);
        assert_eq!(from_request(&headers, None).as_deref(), Some("mykey"));
    }

    #[test]
    fn test_bearer_token_is_credential() {
        let headers = headers(&[("authorization", "Bearer tok123")]);
        assert_eq!(from_request(&headers, None).as_deref(), Some("tok123"));
    }

    #[test]
    fn test_initialize_params_credential() {
        let headers = HeaderMap::new();
        let request = init_request(Some("from-init"));
        assert_eq!(
            from_request(&headers, Some(&request)).as_deref(),
            Some("from-init")
        );
    }

    #[test]
    fn test_fallback_used_last() {
        let headers = HeaderMap::new();
        let request = init_request(None);
        let key = resolve_credential(&headers, Some(&request), Some("from-env"));
        assert_eq!(key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_no_source_yields_none() {
        let headers = HeaderMap::new();
        assert!(resolve_credential(&headers, None, None).is_none());
    }

    #[test]
    fn test_malformed_config_header_falls_through() {
        let headers = headers(&[
            ("x-mcp-config", "{not valid json"),
            ("x-api-key", "next-in-line"),
        ]);
        assert_eq!(
            from_request(&headers, None).as_deref(),
            Some("next-in-line")
        );
    }

    #[test]
    fn test_config_header_without_api_key_field_falls_through() {
        let headers = headers(&[
            ("x-mcp-config", r#"{"something":"else"}"#),
            ("authorization", "Bearer tok"),
        ]);
        assert_eq!(from_request(&headers, None).as_deref(), Some("tok"));
    }

    #[test]
    fn test_malformed_basic_auth_falls_through() {
        let headers = headers(&[("authorization", "Basic %%%not-base64%%%")]);
        // Basic parsing fails, Bearer prefix doesn't match: nothing resolves
        assert!(from_request(&headers, None).is_none());
    }

    #[test]
    fn test_non_initialize_body_ignored() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(2)),
            method: "tools/list".to_string(),
            params: Some(json!({
                "clientInfo": {"config": {"apiKey": "sneaky"}}
            })),
        };
        assert!(from_request(&HeaderMap::new(), Some(&request)).is_none());
    }

    #[test]
    fn test_pairwise_fall_through_order() {
        // Remove sources one at a time from the top; the next one wins.
        let request = init_request(Some("s6"));
        let all = [
            ("x-mcp-config", r#"{"apiKey":"s1"}"#.to_string()),
            ("mcp-config", r#"{"apiKey":"s2"}"#.to_string()),
            ("x-api-key", "s3".to_string()),
            ("authorization", format!("Basic {}", BASE64.encode("s4:"))),
        ];
        let expected = ["s1", "s2", "s3", "s4", "s6"];

        for skip in 0..=all.len() {
            let pairs: Vec<(&str, &str)> = all[skip..]
                .iter()
                .map(|(n, v)| (*n, v.as_str()))
                .collect();
            let headers = headers(&pairs);
            let key = resolve_credential(&headers, Some(&request), Some("s7"));
            assert_eq!(key.as_deref(), Some(expected[skip]), "skip={}", skip);
        }

        // Bearer sits between basic auth and the initialize payload
        let headers = headers(&[("authorization", "Bearer s5")]);
        let key = resolve_credential(&headers, Some(&request), Some("s7"));
        assert_eq!(key.as_deref(), Some("s5"));

        // Nothing request-supplied at all: fallback
        let key = resolve_credential(&HeaderMap::new(), None, Some("s7"));
        assert_eq!(key.as_deref(), Some("s7"));
    }
}
