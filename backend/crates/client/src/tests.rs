//! End-to-end tests against a live server on an ephemeral port
//!
//! The server runs the real auth and payment routers over in-memory
//! repositories; a counting layer records refresh-token calls.

#[cfg(test)]
mod session_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use auth::{AuthAppState, AuthConfig, InMemoryAuthRepository, auth_router_generic};
    use axum::Router;
    use axum::extract::Request;
    use axum::middleware::{self, Next};
    use payment::{InMemoryPaymentRepository, payment_router_generic};
    use platform::mail::{MailTransport, MemoryMailer};
    use tokio::net::TcpListener;

    use crate::config::ClientConfig;
    use crate::error::ClientError;
    use crate::payments::PaymentPoller;
    use crate::session::SessionController;
    use crate::types::{NewPayment, PaymentMethod, PaymentStatus};

    struct TestServer {
        url: String,
        refresh_calls: Arc<AtomicUsize>,
    }

    impl TestServer {
        async fn start(config: AuthConfig) -> Self {
            let state = AuthAppState::new(
                InMemoryAuthRepository::new(),
                config,
                MailTransport::Memory(MemoryMailer::new()),
            );
            let refresh_calls = Arc::new(AtomicUsize::new(0));
            let counter = refresh_calls.clone();

            let app = Router::new()
                .nest(
                    "/api/payments",
                    payment_router_generic(InMemoryPaymentRepository::new(), state.guard()),
                )
                .nest("/api/auth", auth_router_generic(state))
                .layer(middleware::from_fn(move |req: Request, next: Next| {
                    let counter = counter.clone();
                    async move {
                        if req.uri().path() == "/api/auth/refresh-token" {
                            counter.fetch_add(1, Ordering::SeqCst);
                        }
                        next.run(req).await
                    }
                }));

            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                url: format!("http://{addr}"),
                refresh_calls,
            }
        }

        fn session(&self) -> SessionController {
            SessionController::new(
                ClientConfig::new(&self.url).with_poll_interval(Duration::from_millis(50)),
            )
            .unwrap()
        }

        fn refresh_calls(&self) -> usize {
            self.refresh_calls.load(Ordering::SeqCst)
        }
    }

    /// Access cookie expires after one second, refresh cookie stays
    fn short_lived_access() -> AuthConfig {
        AuthConfig::development().with_access_ttl(Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_init_signup_and_teardown() {
        let server = TestServer::start(AuthConfig::development()).await;
        let mut session = server.session();

        assert!(session.init().await.unwrap().is_none());

        let user = session.signup("a@x.com", "secret1").await.unwrap();
        assert_eq!(user.email, "a@x.com");
        assert!(!user.email_verified);
        assert_eq!(session.current_user().await, Some(user.clone()));

        let loaded = session.init().await.unwrap().unwrap();
        assert_eq!(loaded.id, user.id);

        session.teardown().await.unwrap();
        assert!(session.current_user().await.is_none());
        assert!(session.init().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_message_surfaces() {
        let server = TestServer::start(AuthConfig::development()).await;
        let session = server.session();
        session.signup("a@x.com", "secret1").await.unwrap();

        let err = session.signup("a@x.com", "secret1").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "Email is already registered");

        let other = server.session();
        let err = other.login("a@x.com", "wrong-one").await.unwrap_err();
        assert!(err.is_unauthenticated());
        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(other.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_single_retry_after_refresh() {
        let server = TestServer::start(short_lived_access()).await;
        let session = server.session();
        session.signup("a@x.com", "secret1").await.unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;

        let user = session.refresh_current_user().await.unwrap();
        assert!(user.is_some());
        assert_eq!(server.refresh_calls(), 1);
    }

    #[tokio::test]
    async fn test_second_unauthorized_surfaces() {
        let server = TestServer::start(short_lived_access()).await;
        let first = server.session();
        first.signup("a@x.com", "secret1").await.unwrap();

        // A second login supersedes the first session's refresh token
        let second = server.session();
        second.login("a@x.com", "secret1").await.unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;

        let err = first
            .create_payment(&NewPayment::bank_transfer("Standard Plan", 2.0))
            .await
            .unwrap_err();
        assert!(err.is_unauthenticated());
        assert_eq!(err.to_string(), "Please authenticate");
        assert_eq!(server.refresh_calls(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let server = TestServer::start(AuthConfig::development()).await;
        let session = server.session();
        session.signup("a@x.com", "secret1").await.unwrap();

        session.logout().await.unwrap();
        assert!(session.current_user().await.is_none());
        assert!(session.refresh_current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_payment_calls() {
        let server = TestServer::start(AuthConfig::development()).await;
        let session = server.session();
        session.signup("a@x.com", "secret1").await.unwrap();

        let payment = session
            .create_payment(&NewPayment::bank_transfer("Standard Plan", 2.0))
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);

        let history = session.payment_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].transaction_id, payment.transaction_id);

        let settled = session
            .update_payment_status(&payment.transaction_id, PaymentStatus::Failed)
            .await
            .unwrap();
        assert_eq!(settled.status, PaymentStatus::Failed);
        assert!(settled.completed_at.is_none());

        let err = session
            .update_payment_status(&payment.transaction_id, PaymentStatus::Completed)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));

        let err = session
            .create_payment(&NewPayment {
                mobile_number: None,
                ..NewPayment::mobile_money("Standard Plan", 2.0, PaymentMethod::Mtn, "")
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_poller_stops_at_terminal_state() {
        let server = TestServer::start(AuthConfig::development()).await;
        let session = server.session();
        session.signup("a@x.com", "secret1").await.unwrap();

        let payment = session
            .create_payment(&NewPayment::mobile_money(
                "Standard Plan",
                2.0,
                PaymentMethod::Mtn,
                "670000000",
            ))
            .await
            .unwrap();

        let poller = PaymentPoller::new(&session);
        let confirm = async {
            tokio::time::sleep(Duration::from_millis(120)).await;
            session
                .update_payment_status(&payment.transaction_id, PaymentStatus::Completed)
                .await
                .unwrap();
        };

        let (settled, ()) = tokio::join!(poller.wait(&payment.transaction_id), confirm);
        let settled = settled.unwrap();
        assert_eq!(settled.status, PaymentStatus::Completed);
        assert!(settled.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_poller_gives_up() {
        let server = TestServer::start(AuthConfig::development()).await;
        let session = server.session();
        session.signup("a@x.com", "secret1").await.unwrap();

        let payment = session
            .create_payment(&NewPayment::bank_transfer("Standard Plan", 2.0))
            .await
            .unwrap();

        let err = PaymentPoller::new(&session)
            .max_attempts(3)
            .wait(&payment.transaction_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::PollTimeout { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn test_poller_with_zero_interval_still_ticks() {
        let server = TestServer::start(AuthConfig::development()).await;
        let mut config = ClientConfig::new(&server.url);
        config.poll_interval = Duration::ZERO;
        let session = SessionController::new(config).unwrap();
        session.signup("a@x.com", "secret1").await.unwrap();

        let payment = session
            .create_payment(&NewPayment::bank_transfer("Standard Plan", 2.0))
            .await
            .unwrap();

        let err = PaymentPoller::new(&session)
            .max_attempts(2)
            .wait(&payment.transaction_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::PollTimeout { attempts: 2, .. }));

        let err = PaymentPoller::new(&session)
            .interval(Duration::ZERO)
            .max_attempts(1)
            .wait(&payment.transaction_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::PollTimeout { attempts: 1, .. }));
    }
}
