//! Property tests: protected endpoints reject anything but a valid bearer token

#[cfg(test)]
mod tests {
    use crate::auth::JwtService;
    use crate::config::AppConfig;
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use proptest::prelude::*;
    use tower::ServiceExt;

    const PROTECTED: &[(&str, &str)] = &[
        ("GET", "/auth/me"),
        ("GET", "/mood"),
        ("POST", "/mood"),
        ("GET", "/logs/2024-03-05"),
        ("PUT", "/logs/2024-03-05"),
        ("GET", "/logs?start=2024-03-01&end=2024-03-07"),
        ("GET", "/logs/week"),
        ("GET", "/logs/month/2024/3"),
        ("DELETE", "/logs?before=2024-03-01"),
        ("POST", "/auth/password"),
        ("DELETE", "/auth/account"),
    ];

    fn create_test_state() -> AppState {
        AppState::in_memory(AppConfig::for_tests())
    }

    async fn status_for(
        state: AppState,
        method: &str,
        uri: &str,
        auth: Option<String>,
    ) -> StatusCode {
        let mut builder = Request::builder()
            .uri(uri)
            .method(method)
            .header("Content-Type", "application/json");
        if let Some(header) = auth {
            builder = builder.header("Authorization", header);
        }

        let response = create_router(state)
            .oneshot(builder.body(Body::from("{}")).unwrap())
            .await
            .unwrap();
        response.status()
    }

    fn invalid_token_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("".to_string()),
            "[a-zA-Z0-9]{10,50}",
            "[a-zA-Z0-9]{10}\\.[a-zA-Z0-9]{10}",
            "[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}",
        ]
    }

    fn auth_header_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            invalid_token_strategy().prop_map(Some),
            invalid_token_strategy().prop_map(|t| Some(format!("Basic {}", t))),
            invalid_token_strategy().prop_map(|t| Some(format!("Bearer {}", t))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_unauthenticated_requests_return_401(
            auth_header in auth_header_strategy(),
            endpoint in prop::sample::select(PROTECTED),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let (method, uri) = endpoint;
                let status = status_for(create_test_state(), method, uri, auth_header).await;
                prop_assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
                Ok(())
            })?;
        }
    }

    #[tokio::test]
    async fn test_missing_auth_header_message() {
        let response = create_router(create_test_state())
            .oneshot(Request::builder().uri("/auth/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Missing authorization header");
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_token_with_wrong_secret_returns_401() {
        let state = create_test_state();
        let token = JwtService::new("wrong-secret-key", 3600)
            .issue_token(uuid::Uuid::new_v4(), "a@x.com")
            .unwrap();

        let status = status_for(state, "GET", "/auth/me", Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_returns_401() {
        let state = create_test_state();
        let token = state
            .jwt()
            .issue_token_at(uuid::Uuid::new_v4(), "a@x.com", Utc::now() - Duration::days(8))
            .unwrap();

        let status = status_for(state, "GET", "/mood", Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes_auth() {
        let state = create_test_state();
        let token = state.jwt().issue_token(uuid::Uuid::new_v4(), "a@x.com").unwrap();

        let status = status_for(state, "GET", "/mood", Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
