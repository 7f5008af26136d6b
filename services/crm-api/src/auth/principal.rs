//! Principal identity model and extraction.
//!
//! # Purpose
//! Authentication happens upstream (an identity-aware gateway); this service
//! receives the already-validated identity as request headers and exposes it
//! to handlers as a typed [`Principal`] extractor. A request without a user
//! header is rejected with 401 before any handler runs.
use crate::api::error::{ApiError, api_unauthorized};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

pub const USER_HEADER: &str = "x-auth-user";
pub const GROUPS_HEADER: &str = "x-auth-groups";
pub const SUPERUSER_HEADER: &str = "x-auth-superuser";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: String,
    pub is_superuser: bool,
    pub groups: Vec<String>,
}

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| api_unauthorized("missing authenticated principal"))?
            .to_string();

        let groups = parts
            .headers
            .get(GROUPS_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|group| !group.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let is_superuser = parts
            .headers
            .get(SUPERUSER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.eq_ignore_ascii_case("true") || value == "1")
            .unwrap_or(false);

        Ok(Principal {
            user_id,
            is_superuser,
            groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Principal, ApiError> {
        let (mut parts, _) = request.into_parts();
        Principal::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn extracts_user_groups_and_superuser_flag() {
        let request = Request::builder()
            .header(USER_HEADER, "ana")
            .header(GROUPS_HEADER, "sales, sales-directors ,, ")
            .header(SUPERUSER_HEADER, "true")
            .body(())
            .expect("request");
        let principal = extract(request).await.expect("principal");
        assert_eq!(principal.user_id, "ana");
        assert_eq!(principal.groups, vec!["sales", "sales-directors"]);
        assert!(principal.is_superuser);
    }

    #[tokio::test]
    async fn missing_user_header_is_unauthorized() {
        let request = Request::builder()
            .header(GROUPS_HEADER, "sales")
            .body(())
            .expect("request");
        let err = extract(request).await.expect_err("rejection");
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn blank_user_header_is_unauthorized() {
        let request = Request::builder()
            .header(USER_HEADER, "   ")
            .body(())
            .expect("request");
        assert!(extract(request).await.is_err());
    }

    #[tokio::test]
    async fn superuser_defaults_to_false() {
        let request = Request::builder()
            .header(USER_HEADER, "ana")
            .body(())
            .expect("request");
        let principal = extract(request).await.expect("principal");
        assert!(!principal.is_superuser);
        assert!(principal.groups.is_empty());
    }
}
