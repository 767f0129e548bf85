//! Session Controller
//!
//! Holds the logged-in user and the cookie jar carrying the `token` and
//! `refreshToken` cookies. A request answered with 401 triggers one call to
//! `POST /auth/refresh-token`; only if that succeeds is the request sent
//! again. The refresh call itself is never retried.

use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::{Ack, ErrorBody, MessageBody, User, UserBody};

const REFRESH_PATH: &str = "/auth/refresh-token";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

pub struct SessionController {
    http: reqwest::Client,
    config: ClientConfig,
    user: RwLock<Option<User>>,
}

impl SessionController {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: build_http(&config)?,
            config,
            user: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Load the current user from an existing cookie session
    pub async fn init(&self) -> ClientResult<Option<User>> {
        self.refresh_current_user().await
    }

    /// Forget the user and drop the session cookies
    pub async fn teardown(&mut self) -> ClientResult<()> {
        *self.user.write().await = None;
        self.http = build_http(&self.config)?;
        Ok(())
    }

    // ========================================================================
    // Account
    // ========================================================================

    pub async fn signup(&self, email: &str, password: &str) -> ClientResult<User> {
        let body: UserBody = self
            .request(Method::POST, "/auth/signup", Some(&Credentials { email, password }))
            .await?;
        self.set_user(Some(body.user.clone())).await;
        Ok(body.user)
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let body: UserBody = self
            .request(Method::POST, "/auth/login", Some(&Credentials { email, password }))
            .await?;
        self.set_user(Some(body.user.clone())).await;
        Ok(body.user)
    }

    /// Local state is cleared even when the server call fails
    pub async fn logout(&self) -> ClientResult<()> {
        let result = self
            .request::<Ack, ()>(Method::POST, "/auth/logout", None)
            .await;
        self.set_user(None).await;
        result.map(|_| ())
    }

    /// Locally known user, no network call
    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    /// `GET /auth/me`; an unauthenticated session yields `None`
    pub async fn refresh_current_user(&self) -> ClientResult<Option<User>> {
        match self.request::<UserBody, ()>(Method::GET, "/auth/me", None).await {
            Ok(body) => {
                self.set_user(Some(body.user.clone())).await;
                Ok(Some(body.user))
            }
            Err(e) if e.is_unauthenticated() => {
                self.set_user(None).await;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    // ========================================================================
    // Email verification / password reset
    // ========================================================================

    pub async fn verify_email(&self, token: &str) -> ClientResult<String> {
        let body: MessageBody = self
            .request::<_, ()>(Method::GET, &format!("/auth/verify-email/{token}"), None)
            .await?;
        if let Some(user) = self.user.write().await.as_mut() {
            user.email_verified = true;
        }
        Ok(body.message)
    }

    pub async fn resend_verification(&self) -> ClientResult<String> {
        let body: MessageBody = self
            .request::<_, ()>(Method::POST, "/auth/resend-verification", None)
            .await?;
        Ok(body.message)
    }

    pub async fn request_password_reset(&self, email: &str) -> ClientResult<String> {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
        }

        let body: MessageBody = self
            .request(Method::POST, "/auth/reset-password", Some(&Body { email }))
            .await?;
        Ok(body.message)
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> ClientResult<String> {
        #[derive(Serialize)]
        struct Body<'a> {
            password: &'a str,
        }

        let body: MessageBody = self
            .request(
                Method::POST,
                &format!("/auth/reset-password/{token}"),
                Some(&Body { password }),
            )
            .await?;
        Ok(body.message)
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Send a request with the single refresh-and-replay retry, then decode
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut retried = false;
        loop {
            let response = self.dispatch(method.clone(), path, body).await?;

            if response.status() == StatusCode::UNAUTHORIZED && !retried && path != REFRESH_PATH {
                retried = true;
                if self.refresh_tokens().await {
                    tracing::debug!(path, "Session refreshed, replaying request");
                    continue;
                }
            }

            return decode(response).await;
        }
    }

    async fn dispatch<B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.http.request(method, self.config.url(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    /// `POST /auth/refresh-token`, true when the server rotated the tokens
    async fn refresh_tokens(&self) -> bool {
        match self.dispatch::<()>(Method::POST, REFRESH_PATH, None).await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::debug!(status = %response.status(), "Refresh token rejected");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Refresh request failed");
                false
            }
        }
    }

    async fn set_user(&self, user: Option<User>) {
        *self.user.write().await = user;
    }
}

fn build_http(config: &ClientConfig) -> ClientResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .cookie_store(true)
        .timeout(config.request_timeout)
        .build()?)
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
