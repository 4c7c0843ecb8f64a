//! Token authentication for HTTP handlers.
//!
//! Clients send `Authorization: Token <token>`; `Bearer` is accepted as an
//! alias. Handlers take an [`AuthenticatedUser`] argument to require a valid
//! token.

use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{AuthToken, Error, User};

use super::state::HttpState;

const SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// Extract the token from the `Authorization` header.
///
/// # Errors
/// `unauthorized` when the header is missing, uses another scheme, or does
/// not carry exactly one credential.
pub fn token_from_headers(headers: &HeaderMap) -> Result<AuthToken, Error> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("authentication credentials were not provided"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("invalid token header"))?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or_default();
    if !SCHEMES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(scheme))
    {
        return Err(Error::unauthorized(
            "authentication credentials were not provided",
        ));
    }

    match (parts.next(), parts.next()) {
        (Some(token), None) => Ok(AuthToken::from_presented(token)),
        (None, _) => Err(Error::unauthorized(
            "invalid token header: no credentials provided",
        )),
        (Some(_), Some(_)) => Err(Error::unauthorized(
            "invalid token header: token string should not contain spaces",
        )),
    }
}

/// The active user behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    /// Consume the extractor and return the user.
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = token_from_headers(req.headers());

        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let token = token?;
            match state.authenticator.resolve_token(&token).await? {
                Some(user) => Ok(Self(user)),
                None => {
                    debug!("rejected unknown or inactive token");
                    Err(Error::unauthorized("invalid token"))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::http::header::HeaderValue;
    use rstest::rstest;

    fn headers(value: Option<&'static str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(value) = value {
            map.insert(AUTHORIZATION, HeaderValue::from_static(value));
        }
        map
    }

    #[rstest]
    #[case("Token abc123", "abc123")]
    #[case("token abc123", "abc123")]
    #[case("Bearer abc123", "abc123")]
    #[case("Token   abc123  ", "abc123")]
    fn accepts_known_schemes(#[case] header: &'static str, #[case] expected: &str) {
        let token = token_from_headers(&headers(Some(header))).expect("token parsed");
        assert_eq!(token.expose(), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwYXNz"))]
    #[case(Some("Token"))]
    #[case(Some("Token abc def"))]
    #[case(Some(""))]
    fn rejects_missing_or_malformed_headers(#[case] header: Option<&'static str>) {
        let error = token_from_headers(&headers(header)).expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }
}
