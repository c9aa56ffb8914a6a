//! Unit tests for Auth crate
//! Adapter behaviour is exercised against the in-memory backend.

#[cfg(test)]
mod adapter_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::application::contract::{
        AuthProvider, ForgotPasswordParams, LoginParams, RegisterParams, UpdateAccountParams,
        UpdatePasswordParams,
    };
    use crate::application::hooks::AuthHooks;
    use crate::application::{AuthAdapter, AuthConfig};
    use crate::domain::entity::user::AuthUser;
    use crate::domain::value_object::persistence::SessionPersistence;
    use crate::error::AuthError;
    use crate::infra::memory::{InMemoryAuthBackend, SentEmail};

    const EMAIL: &str = "alice@example.com";
    const PASSWORD: &str = "correct horse";

    fn adapter(backend: InMemoryAuthBackend) -> AuthAdapter<InMemoryAuthBackend> {
        let config =
            AuthConfig::default().with_session_resolve_timeout(Duration::from_millis(50));
        AuthAdapter::new(Arc::new(backend), config)
    }

    fn seeded() -> AuthAdapter<InMemoryAuthBackend> {
        adapter(InMemoryAuthBackend::new().with_user(EMAIL, PASSWORD))
    }

    fn login(email: &str, password: &str) -> LoginParams {
        LoginParams {
            email: email.to_string(),
            password: password.to_string(),
            remember: false,
        }
    }

    #[tokio::test]
    async fn test_valid_login_then_check_is_authenticated() {
        let provider = seeded();

        let response = provider.login(login(EMAIL, PASSWORD)).await;
        assert!(response.success);
        assert_eq!(response.redirect_to.as_deref(), Some("/"));
        assert!(response.error.is_none());

        assert!(provider.check().await.authenticated);
    }

    #[tokio::test]
    async fn test_invalid_login_reports_error_and_stays_signed_out() {
        let provider = seeded();

        for (email, password) in [
            (EMAIL, "wrong password"),
            ("nobody@example.com", PASSWORD),
            ("not-an-email", PASSWORD),
            (EMAIL, "   "),
        ] {
            let response = provider.login(login(email, password)).await;
            assert!(!response.success, "{email} / {password}");
            let error = response.error.expect("error envelope");
            assert_eq!(error.name, "Login Error");
            assert!(!error.message.is_empty());
            assert!(!provider.check().await.authenticated);
        }
    }

    #[tokio::test]
    async fn test_logout_then_check_is_unauthenticated() {
        let provider = seeded();
        assert!(provider.login(login(EMAIL, PASSWORD)).await.success);

        let response = provider.logout().await;
        assert!(response.success);
        assert!(response.redirect_to.is_none());
        assert!(!provider.check().await.authenticated);
    }

    #[tokio::test]
    async fn test_remember_selects_durable_persistence() {
        let provider = seeded();

        provider.login(login(EMAIL, PASSWORD)).await;
        assert_eq!(
            provider.backend().persistence(),
            SessionPersistence::Session
        );

        let params = LoginParams {
            remember: true,
            ..login(EMAIL, PASSWORD)
        };
        provider.login(params).await;
        assert_eq!(provider.backend().persistence(), SessionPersistence::Local);
    }

    #[tokio::test]
    async fn test_identity_without_session_is_null_email() {
        let provider = seeded();
        let identity = provider.get_identity().await;
        assert_eq!(identity.email, None);
        assert_eq!(
            serde_json::to_value(&identity).unwrap(),
            serde_json::json!({"email": null})
        );
    }

    #[tokio::test]
    async fn test_identity_with_session() {
        let provider = seeded();
        provider.login(login(EMAIL, PASSWORD)).await;
        let identity = provider.get_identity().await;
        assert_eq!(identity.email.as_deref(), Some(EMAIL));
    }

    #[tokio::test]
    async fn test_unresolved_session_is_bounded() {
        let provider = adapter(InMemoryAuthBackend::new().with_user(EMAIL, PASSWORD).unresolved());

        let check = tokio::time::timeout(Duration::from_secs(2), provider.check())
            .await
            .expect("check must not hang");
        assert!(!check.authenticated);

        assert_eq!(provider.get_identity().await.email, None);

        // sign-in succeeds but the session never becomes observable
        let response = provider.login(login(EMAIL, PASSWORD)).await;
        assert!(!response.success);
        assert_eq!(response.error.unwrap().name, "Login Error");
    }

    #[tokio::test]
    async fn test_register_sends_verification_and_sets_name() {
        let provider = adapter(InMemoryAuthBackend::new());

        let response = provider
            .register(RegisterParams {
                email: "bob@example.com".to_string(),
                password: "s3cret-pass".to_string(),
                display_name: Some("Bob".to_string()),
            })
            .await;
        assert!(response.success);

        let backend = provider.backend();
        assert!(backend.has_account("bob@example.com"));
        assert_eq!(
            backend.sent_emails(),
            vec![SentEmail::Verification {
                email: "bob@example.com".to_string()
            }]
        );
        assert_eq!(backend.display_name_of("bob@example.com").as_deref(), Some("Bob"));
    }

    #[tokio::test]
    async fn test_register_side_effect_failures_are_not_fatal() {
        let provider = adapter(InMemoryAuthBackend::new().with_failing_side_effects());

        let response = provider
            .register(RegisterParams {
                email: "bob@example.com".to_string(),
                password: "s3cret-pass".to_string(),
                display_name: Some("Bob".to_string()),
            })
            .await;
        assert!(response.success);
        assert!(provider.backend().sent_emails().is_empty());
        assert_eq!(provider.backend().display_name_of("bob@example.com"), None);
    }

    #[tokio::test]
    async fn test_register_failures() {
        let provider = seeded();

        let duplicate = provider
            .register(RegisterParams {
                email: EMAIL.to_string(),
                password: "another-pass".to_string(),
                display_name: None,
            })
            .await;
        assert!(!duplicate.success);
        let error = duplicate.error.unwrap();
        assert_eq!(error.name, "Registration Error");
        assert_eq!(
            error.message,
            "The email address is already in use by another account."
        );

        let weak = provider
            .register(RegisterParams {
                email: "carol@example.com".to_string(),
                password: "abc".to_string(),
                display_name: None,
            })
            .await;
        assert!(!weak.success);
        assert!(!provider.backend().has_account("carol@example.com"));
    }

    #[tokio::test]
    async fn test_forgot_password() {
        let provider = seeded();

        let response = provider
            .forgot_password(ForgotPasswordParams {
                email: EMAIL.to_string(),
            })
            .await;
        assert!(response.success);
        assert_eq!(
            provider.backend().sent_emails(),
            vec![SentEmail::PasswordReset {
                email: EMAIL.to_string()
            }]
        );

        let unknown = provider
            .forgot_password(ForgotPasswordParams {
                email: "nobody@example.com".to_string(),
            })
            .await;
        assert!(!unknown.success);
        assert_eq!(unknown.error.unwrap().name, "Forgot Password Error");
    }

    #[tokio::test]
    async fn test_update_password() {
        let provider = seeded();

        let signed_out = provider
            .update_password(UpdatePasswordParams {
                password: "new-password".to_string(),
                confirm_password: None,
            })
            .await;
        assert!(!signed_out.success);
        assert_eq!(signed_out.error.unwrap().name, "Update Password Error");

        provider.login(login(EMAIL, PASSWORD)).await;

        let mismatch = provider
            .update_password(UpdatePasswordParams {
                password: "new-password".to_string(),
                confirm_password: Some("other-password".to_string()),
            })
            .await;
        assert!(!mismatch.success);
        assert_eq!(mismatch.error.unwrap().message, "Passwords do not match");

        let changed = provider
            .update_password(UpdatePasswordParams {
                password: "new-password".to_string(),
                confirm_password: Some("new-password".to_string()),
            })
            .await;
        assert!(changed.success);

        provider.logout().await;
        assert!(!provider.login(login(EMAIL, PASSWORD)).await.success);
        assert!(provider.login(login(EMAIL, "new-password")).await.success);
    }

    #[tokio::test]
    async fn test_update_account() {
        let provider = seeded();
        provider.login(login(EMAIL, PASSWORD)).await;

        let response = provider
            .update_account(UpdateAccountParams {
                email: Some("alice@example.org".to_string()),
                display_name: Some("Alice".to_string()),
                password: None,
            })
            .await;
        assert!(response.success);

        let identity = provider.get_identity().await;
        assert_eq!(identity.email.as_deref(), Some("alice@example.org"));
        assert_eq!(identity.name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_permissions() {
        let serde_json::Value::Object(custom) = serde_json::json!({"role": "admin"}) else {
            unreachable!()
        };
        let provider = adapter(
            InMemoryAuthBackend::new()
                .with_user(EMAIL, PASSWORD)
                .with_claims(EMAIL, custom),
        );

        assert!(matches!(
            provider.get_permissions().await,
            Err(AuthError::NoCurrentUser)
        ));

        provider.login(login(EMAIL, PASSWORD)).await;
        let claims = provider.get_permissions().await.unwrap();
        assert_eq!(claims.get("role"), Some(&serde_json::json!("admin")));
        assert_eq!(claims.get("email"), Some(&serde_json::json!(EMAIL)));
    }

    #[tokio::test]
    async fn test_on_error_is_fixed() {
        let response = seeded().on_error().await;
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "redirectTo": "/",
                "logout": false,
                "error": {"name": "Error", "message": "An error occurred", "stack": "Error stack"}
            })
        );
    }

    #[derive(Clone, Default)]
    struct CountingHooks {
        logins: Arc<AtomicUsize>,
        registers: Arc<AtomicUsize>,
        logouts: Arc<AtomicUsize>,
    }

    impl AuthHooks for CountingHooks {
        fn on_login(&self, _user: &AuthUser) {
            self.logins.fetch_add(1, Ordering::SeqCst);
        }

        fn on_register(&self, _user: &AuthUser) {
            self.registers.fetch_add(1, Ordering::SeqCst);
        }

        fn on_logout(&self) {
            self.logouts.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_hooks_fire_after_success_only() {
        let hooks = CountingHooks::default();
        let provider = seeded().with_hooks(hooks.clone());

        provider.login(login(EMAIL, "wrong password")).await;
        provider.login(login(EMAIL, PASSWORD)).await;
        provider
            .register(RegisterParams {
                email: EMAIL.to_string(),
                password: "another-pass".to_string(),
                display_name: None,
            })
            .await;
        provider.logout().await;

        assert_eq!(hooks.logins.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.registers.load(Ordering::SeqCst), 0);
        assert_eq!(hooks.logouts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_login_hook_skipped_when_session_never_resolves() {
        let hooks = CountingHooks::default();
        let provider = adapter(InMemoryAuthBackend::new().with_user(EMAIL, PASSWORD).unresolved())
            .with_hooks(hooks.clone());

        let response = provider.login(login(EMAIL, PASSWORD)).await;

        assert!(!response.success);
        assert_eq!(hooks.logins.load(Ordering::SeqCst), 0);
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::{AuthAdapter, AuthConfig};
    use crate::infra::memory::InMemoryAuthBackend;
    use crate::presentation::router::auth_router;

    fn app() -> axum::Router {
        let backend = InMemoryAuthBackend::new().with_user("alice@example.com", "correct horse");
        let config =
            AuthConfig::default().with_session_resolve_timeout(Duration::from_millis(50));
        auth_router(AuthAdapter::new(Arc::new(backend), config))
    }

    async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_login_check_identity_flow() {
        let app = app();

        let (status, body) = send(&app, "GET", "/check", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"authenticated": false}));

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "alice@example.com", "password": "correct horse"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "redirectTo": "/"}));

        let (_, body) = send(&app, "GET", "/check", None).await;
        assert_eq!(body, json!({"authenticated": true}));

        let (_, body) = send(&app, "GET", "/identity", None).await;
        assert_eq!(body["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn test_failed_login_shape() {
        let (status, body) = send(
            &app(),
            "POST",
            "/login",
            Some(json!({"email": "alice@example.com", "password": "nope-nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["name"], "Login Error");
    }

    #[tokio::test]
    async fn test_permissions_require_session() {
        let (status, body) = send(&app(), "GET", "/permissions", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], 401);
    }

    #[tokio::test]
    async fn test_update_password_accepts_new_password_alias() {
        let app = app();
        send(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "alice@example.com", "password": "correct horse"})),
        )
        .await;
        let (_, body) = send(
            &app,
            "POST",
            "/update-password",
            Some(json!({"newPassword": "brand-new-pass"})),
        )
        .await;
        assert_eq!(body, json!({"success": true}));
    }
}
