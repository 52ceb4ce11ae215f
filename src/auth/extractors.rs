use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, Method},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{error, warn};

use crate::{
    auth::{password::verify_password, repo},
    error::ApiError,
    state::AppState,
};

/// Basic-auth gate wrapping the actor, film and search routes.
///
/// Reads are open to any authenticated user; any non-GET method requires
/// the admin role. The 401 message is the same for an unknown user, a
/// lookup failure and a wrong password, so callers cannot probe for
/// account names. Nothing about the caller is passed downstream.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let Some((name, password)) = header.and_then(parse_basic) else {
        return Err(ApiError::Unauthorized("auth data was not provided"));
    };

    let user = match repo::get_user(&state.db, &name).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!(%name, "unknown user");
            return Err(ApiError::Unauthorized("unauthorized"));
        }
        Err(e) => {
            error!(error = %e, "cannot look up user");
            return Err(ApiError::Unauthorized("unauthorized"));
        }
    };

    if !verify_password(&password, &user.password).unwrap_or(false) {
        warn!(%name, "password mismatch");
        return Err(ApiError::Unauthorized("unauthorized"));
    }

    if req.method() != Method::GET && user.role != repo::ADMIN_ROLE {
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}

/// Decodes `Authorization: Basic <base64(name:password)>`. Anything that
/// does not fit that shape is treated as absent credentials.
fn parse_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (name, password) = decoded.split_once(':')?;
    Some((name.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_header() {
        let header = format!("Basic {}", STANDARD.encode("alice:secret"));
        assert_eq!(
            parse_basic(&header),
            Some(("alice".into(), "secret".into()))
        );
    }

    #[test]
    fn password_may_contain_colons() {
        let header = format!("Basic {}", STANDARD.encode("bob:pa:ss"));
        assert_eq!(parse_basic(&header), Some(("bob".into(), "pa:ss".into())));
    }

    #[test]
    fn rejects_wrong_scheme() {
        assert_eq!(parse_basic("Bearer abcdef"), None);
    }

    #[test]
    fn rejects_invalid_base64_and_missing_colon() {
        assert_eq!(parse_basic("Basic %%%"), None);
        let no_colon = format!("Basic {}", STANDARD.encode("alicesecret"));
        assert_eq!(parse_basic(&no_colon), None);
    }
}
