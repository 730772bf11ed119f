//! HTTP API client for the GameTracker account service.
//!
//! One method per REST endpoint, no retries, no client-side timeouts
//! beyond the configured request timeout. Response shapes are checked
//! here, once, so controllers only ever see typed values.

use async_trait::async_trait;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use thiserror::Error;

use gametracker::achievements::{Achievement, UserAchievement};
use gametracker::auth::models::{
    AuthSession, LoginOutcome, ProfileUpdate, RecoveryReceipt, TwoFactorChallenge, TwoFactorSetup,
    User,
};
use gametracker::session::SessionRecord;

/// Fallback message when the server did not supply a usable error string.
pub const GENERIC_ERROR: &str = "Ha ocurrido un error inesperado";

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. `message` carries the
    /// server-supplied `error`/`message` field verbatim when present.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response did not match the documented shape.
    #[error("Unexpected response shape: {0}")]
    Shape(String),

    /// An authenticated endpoint was called with no token set.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A profile upload part could not be encoded.
    #[error("Invalid profile upload: {0}")]
    Upload(String),
}

impl ApiError {
    /// Message suitable for showing in a form.
    ///
    /// Server rejections are surfaced verbatim; everything else collapses
    /// to the generic message so transport details never reach the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            _ => GENERIC_ERROR.to_string(),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// The account API surface, as a trait so controllers can be driven
/// against a fake in tests.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Set or clear the bearer token used by authenticated calls.
    fn set_token(&self, token: Option<String>);

    async fn register(
        &self,
        name: &str,
        nickname: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<RecoveryReceipt>;

    async fn verify_email(&self, token: &str) -> ApiResult<()>;

    /// Submit credentials. Either a full session comes back or, for 2FA
    /// accounts, a challenge that must be answered via
    /// [`two_factor_login`](Self::two_factor_login).
    async fn login(
        &self,
        email: &str,
        password: &str,
        public_ip: Option<&str>,
    ) -> ApiResult<LoginOutcome>;

    /// Request a provisioning QR for settings-page 2FA enrollment.
    async fn two_factor_setup(&self) -> ApiResult<TwoFactorSetup>;

    /// Confirm enrollment with a code from the authenticator app.
    async fn two_factor_verify(&self, code: &str) -> ApiResult<()>;

    async fn two_factor_disable(&self) -> ApiResult<()>;

    /// Complete a login-time challenge. Never issues a QR; only resolves
    /// a challenge previously raised by [`login`](Self::login).
    async fn two_factor_login(
        &self,
        user_id: &str,
        code: &str,
        public_ip: Option<&str>,
    ) -> ApiResult<AuthSession>;

    /// Whether the account behind a reset token has 2FA enabled.
    async fn two_factor_required_for_reset(&self, reset_token: &str) -> ApiResult<bool>;

    async fn request_recovery(&self, email: &str) -> ApiResult<RecoveryReceipt>;

    async fn reset_password(
        &self,
        reset_token: &str,
        password: &str,
        code: Option<&str>,
    ) -> ApiResult<()>;

    async fn sessions(&self) -> ApiResult<Vec<SessionRecord>>;

    async fn logout_session(&self, session_id: &str) -> ApiResult<()>;

    async fn logout_all(&self) -> ApiResult<()>;

    async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        code: Option<&str>,
    ) -> ApiResult<()>;

    async fn delete_account(&self, password: &str, code: Option<&str>) -> ApiResult<()>;

    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<User>;

    async fn achievements(&self) -> ApiResult<Vec<Achievement>>;

    async fn my_achievements(&self) -> ApiResult<Vec<UserAchievement>>;
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    nombre: &'a str,
    nickname: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "publicIp", skip_serializing_if = "Option::is_none")]
    public_ip: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct TwoFactorLoginRequest<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    code: &'a str,
    #[serde(rename = "publicIp", skip_serializing_if = "Option::is_none")]
    public_ip: Option<&'a str>,
}

// The enrollment confirmation endpoint calls its code field `token`.
#[derive(Debug, Serialize)]
struct TwoFactorVerifyRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct RecoveryRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    password: &'a str,
    #[serde(rename = "twoFACode", skip_serializing_if = "Option::is_none")]
    two_fa_code: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct LogoutSessionRequest<'a> {
    #[serde(rename = "sessionId")]
    session_id: &'a str,
}

#[derive(Debug, Serialize)]
struct ChangePasswordRequest<'a> {
    #[serde(rename = "oldPassword")]
    old_password: &'a str,
    #[serde(rename = "newPassword")]
    new_password: &'a str,
    #[serde(rename = "twoFACode", skip_serializing_if = "Option::is_none")]
    two_fa_code: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DeleteAccountRequest<'a> {
    password: &'a str,
    #[serde(rename = "twoFACode", skip_serializing_if = "Option::is_none")]
    two_fa_code: Option<&'a str>,
}

// Login answers with one of two shapes; both are optional here and the
// conversion below decides which arm is present.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
    user: Option<User>,
    #[serde(rename = "require2FA", default)]
    require_two_fa: bool,
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct PreviewResponse {
    #[serde(rename = "emailPreviewUrl")]
    email_preview_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwoFactorCheckResponse {
    #[serde(rename = "twoFAEnabled")]
    two_fa_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct SessionsResponse {
    sesiones: Vec<SessionRecord>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct AchievementsResponse<T> {
    achievements: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// API client for the GameTracker account service.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a new API client against a base URL such as
    /// `http://localhost:3000`.
    pub fn new(base_url: String) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client with a preconfigured `reqwest::Client` (timeouts,
    /// proxies).
    pub fn with_client(base_url: String, client: reqwest::Client) -> Self {
        Self {
            base_url,
            client,
            token: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn bearer(&self) -> ApiResult<String> {
        self.token
            .read()
            .ok()
            .and_then(|token| token.clone())
            .ok_or(ApiError::NotAuthenticated)
    }

    /// Turn a non-2xx response into `ApiError::Rejected`, surfacing the
    /// server's `error`/`message` field verbatim when one is present.
    async fn rejection(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body
                .error
                .or(body.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_ERROR.to_string()),
            Err(_) => GENERIC_ERROR.to_string(),
        };
        ApiError::Rejected { status, message }
    }

    async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// POST a JSON body without a bearer token and discard the response
    /// body after the status check.
    async fn post_public<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// POST a bearer-authenticated JSON-less request and discard the body.
    async fn post_authed(&self, path: &str) -> ApiResult<reqwest::Response> {
        let token = self.bearer()?;
        let response = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?;
        Self::check(response).await
    }

    async fn post_authed_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<reqwest::Response> {
        let token = self.bearer()?;
        let response = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn get_authed(&self, path: &str) -> ApiResult<reqwest::Response> {
        let token = self.bearer()?;
        let response = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?;
        Self::check(response).await
    }

    fn profile_form(update: ProfileUpdate) -> ApiResult<multipart::Form> {
        let mut form = multipart::Form::new();
        if let Some(name) = update.name {
            form = form.text("nombre", name);
        }
        if let Some(nickname) = update.nickname {
            form = form.text("nickname", nickname);
        }
        if let Some(bio) = update.bio {
            form = form.text("biografia", bio);
        }
        if let Some(game) = update.favorite_game {
            form = form.text("juegoFavorito", game);
        }
        if let Some(birthday) = update.birthday {
            form = form.text("cumpleanos", birthday);
        }
        if let Some(platforms) = update.platforms {
            for platform in platforms {
                form = form.text("plataformas", platform);
            }
        }
        if let Some(banner_type) = update.banner_type {
            form = form.text("bannerType", banner_type);
        }
        if let Some(banner_color) = update.banner_color {
            form = form.text("bannerColor", banner_color);
        }
        if let Some(image) = update.profile_image {
            let part = multipart::Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)
                .map_err(|e| ApiError::Upload(e.to_string()))?;
            form = form.part("profileImage", part);
        }
        if let Some(image) = update.banner_image {
            let part = multipart::Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)
                .map_err(|e| ApiError::Upload(e.to_string()))?;
            form = form.part("bannerImage", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    async fn register(
        &self,
        name: &str,
        nickname: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<RecoveryReceipt> {
        let request = RegisterRequest {
            nombre: name,
            nickname,
            email,
            password,
        };
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&request)
            .send()
            .await?;
        let body: PreviewResponse = Self::check(response).await?.json().await?;
        Ok(RecoveryReceipt {
            email_preview_url: body.email_preview_url,
        })
    }

    async fn verify_email(&self, token: &str) -> ApiResult<()> {
        let response = self
            .client
            .get(self.url("/api/auth/verify"))
            .query(&[("token", token)])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        public_ip: Option<&str>,
    ) -> ApiResult<LoginOutcome> {
        let request = LoginRequest {
            email,
            password,
            public_ip,
        };
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&request)
            .send()
            .await?;
        let body: LoginResponse = Self::check(response).await?.json().await?;

        match body {
            LoginResponse {
                token: Some(token),
                user: Some(user),
                ..
            } => {
                self.set_token(Some(token.clone()));
                Ok(LoginOutcome::Authenticated(AuthSession { token, user }))
            }
            LoginResponse {
                require_two_fa: true,
                user_id: Some(user_id),
                ..
            } => Ok(LoginOutcome::ChallengeRequired(TwoFactorChallenge {
                user_id,
            })),
            _ => Err(ApiError::Shape(
                "login response carried neither a session nor a 2FA challenge".to_string(),
            )),
        }
    }

    async fn two_factor_setup(&self) -> ApiResult<TwoFactorSetup> {
        let setup = self
            .post_authed("/api/auth/2fa/setup")
            .await?
            .json()
            .await?;
        Ok(setup)
    }

    async fn two_factor_verify(&self, code: &str) -> ApiResult<()> {
        self.post_authed_json("/api/auth/2fa/verify", &TwoFactorVerifyRequest { token: code })
            .await?;
        Ok(())
    }

    async fn two_factor_disable(&self) -> ApiResult<()> {
        self.post_authed("/api/auth/2fa/disable").await?;
        Ok(())
    }

    async fn two_factor_login(
        &self,
        user_id: &str,
        code: &str,
        public_ip: Option<&str>,
    ) -> ApiResult<AuthSession> {
        let request = TwoFactorLoginRequest {
            user_id,
            code,
            public_ip,
        };
        let response = self
            .client
            .post(self.url("/api/auth/2fa/login"))
            .json(&request)
            .send()
            .await?;
        let body: SessionResponse = Self::check(response).await?.json().await?;
        self.set_token(Some(body.token.clone()));
        Ok(AuthSession {
            token: body.token,
            user: body.user,
        })
    }

    async fn two_factor_required_for_reset(&self, reset_token: &str) -> ApiResult<bool> {
        let response = self
            .client
            .get(self.url("/api/auth/2fa/check-2fa"))
            .query(&[("token", reset_token)])
            .send()
            .await?;
        let body: TwoFactorCheckResponse = Self::check(response).await?.json().await?;
        Ok(body.two_fa_enabled)
    }

    async fn request_recovery(&self, email: &str) -> ApiResult<RecoveryReceipt> {
        let response = self
            .client
            .post(self.url("/api/auth/recovery"))
            .json(&RecoveryRequest { email })
            .send()
            .await?;
        let body: PreviewResponse = Self::check(response).await?.json().await?;
        Ok(RecoveryReceipt {
            email_preview_url: body.email_preview_url,
        })
    }

    async fn reset_password(
        &self,
        reset_token: &str,
        password: &str,
        code: Option<&str>,
    ) -> ApiResult<()> {
        self.post_public(
            "/api/auth/reset-password",
            &ResetPasswordRequest {
                token: reset_token,
                password,
                two_fa_code: code,
            },
        )
        .await
    }

    async fn sessions(&self) -> ApiResult<Vec<SessionRecord>> {
        let body: SessionsResponse = self.get_authed("/api/auth/sessions").await?.json().await?;
        Ok(body.sesiones)
    }

    async fn logout_session(&self, session_id: &str) -> ApiResult<()> {
        self.post_authed_json(
            "/api/auth/sessions/logout",
            &LogoutSessionRequest { session_id },
        )
        .await?;
        Ok(())
    }

    async fn logout_all(&self) -> ApiResult<()> {
        self.post_authed("/api/auth/sessions/logout-all").await?;
        Ok(())
    }

    async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        code: Option<&str>,
    ) -> ApiResult<()> {
        self.post_authed_json(
            "/api/auth/change-password",
            &ChangePasswordRequest {
                old_password,
                new_password,
                two_fa_code: code,
            },
        )
        .await?;
        Ok(())
    }

    async fn delete_account(&self, password: &str, code: Option<&str>) -> ApiResult<()> {
        self.post_authed_json(
            "/api/auth/delete-account",
            &DeleteAccountRequest {
                password,
                two_fa_code: code,
            },
        )
        .await?;
        Ok(())
    }

    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<User> {
        let token = self.bearer()?;
        let form = Self::profile_form(update)?;
        let response = self
            .client
            .put(self.url("/api/auth/profile"))
            .header("Authorization", format!("Bearer {token}"))
            .multipart(form)
            .send()
            .await?;
        let body: ProfileResponse = Self::check(response).await?.json().await?;
        Ok(body.user)
    }

    async fn achievements(&self) -> ApiResult<Vec<Achievement>> {
        let body: AchievementsResponse<Achievement> =
            self.get_authed("/api/achievements/").await?.json().await?;
        Ok(body.achievements)
    }

    async fn my_achievements(&self) -> ApiResult<Vec<UserAchievement>> {
        let body: AchievementsResponse<UserAchievement> =
            self.get_authed("/api/achievements/me").await?.json().await?;
        Ok(body.achievements)
    }
}
