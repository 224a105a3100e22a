use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, middleware::Next, response::Response};
use chrono::Utc;

use bloglist_auth::{JwtValidator, Principal};
use bloglist_core::User;
use bloglist_infra::{DocumentStore, SharedStore};

use crate::context::{PrincipalContext, RequestPrincipal};

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
    pub users: SharedStore<User>,
}

/// Resolve the request principal from `Authorization: Bearer <token>`.
///
/// Never rejects: an absent or bad token leaves the principal unset and the
/// guarded routes answer 401 themselves.
pub async fn principal_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let principal = match extract_bearer(req.headers()) {
        Some(token) => resolve_principal(&state, token).await,
        None => None,
    };

    req.extensions_mut()
        .insert(RequestPrincipal(principal.map(PrincipalContext::new)));

    next.run(req).await
}

async fn resolve_principal(state: &AuthState, token: &str) -> Option<Principal> {
    let claims = match state.jwt.validate(token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            return None;
        }
    };

    match state.users.find_by_id(claims.sub).await {
        Ok(Some(user)) => Some(Principal::from(&user)),
        Ok(None) => {
            tracing::debug!(user_id = %claims.sub, "token subject no longer exists");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "principal lookup failed");
            None
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, header::AUTHORIZATION};

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn ignores_other_schemes_and_empty_tokens() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
        assert_eq!(extract_bearer(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(&headers("Bearer    ")), None);
    }
}
