//! HTTP client for the Balance+ REST service
//!
//! Authenticated calls read the bearer token from the [`SessionCache`];
//! a successful login writes it there.

use crate::error::{ClientError, ClientResult, ServerErrorBody};
use crate::session::{Session, SessionCache};
use balance_plus_shared::dates::format_date;
use balance_plus_shared::{
    CreateMoodEntryRequest, DailyLog, DailyLogFields, DateRange, DayEntry, LoginRequest,
    LoginResponse, MoodEntry, SignupRequest, SignupResponse,
};
use chrono::NaiveDate;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: SessionCache,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionCache) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    pub fn session(&self) -> &SessionCache {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the cached bearer token, failing fast when signed out
    async fn authorized(&self, builder: RequestBuilder) -> ClientResult<RequestBuilder> {
        let token = self.session.token().await?.ok_or(ClientError::NotSignedIn)?;
        Ok(builder.bearer_auth(token))
    }

    /// Create an account; returns the new user id
    pub async fn signup(&self, email: &str, password: &str) -> ClientResult<String> {
        let body = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/auth/signup")).json(&body).send().await?;
        let created: SignupResponse = parse(response).await?;
        debug!(user_id = %created.user_id, "Signed up");
        Ok(created.user_id)
    }

    /// Log in and cache the session
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/auth/login")).json(&body).send().await?;
        let login: LoginResponse = parse(response).await?;

        let session = Session {
            token: login.token,
            user_id: login.user_id,
            email: login.email,
        };
        self.session.store(&session).await?;
        debug!(user_id = %session.user_id, "Logged in");
        Ok(session)
    }

    /// Forget the cached session
    pub async fn logout(&self) -> ClientResult<()> {
        self.session.clear().await
    }

    pub async fn create_mood_entry(
        &self,
        entry: &CreateMoodEntryRequest,
    ) -> ClientResult<MoodEntry> {
        let request = self.authorized(self.http.post(self.url("/mood")).json(entry)).await?;
        parse(request.send().await?).await
    }

    /// Most recent mood entries, newest first
    pub async fn mood_history(&self) -> ClientResult<Vec<MoodEntry>> {
        let request = self.authorized(self.http.get(self.url("/mood"))).await?;
        parse(request.send().await?).await
    }

    pub async fn save_log(
        &self,
        date: NaiveDate,
        fields: &DailyLogFields,
    ) -> ClientResult<DailyLog> {
        let path = format!("/logs/{}", format_date(date));
        let request = self.authorized(self.http.put(self.url(&path)).json(fields)).await?;
        parse(request.send().await?).await
    }

    /// `None` when the server has no log for the day
    pub async fn get_log(&self, date: NaiveDate) -> ClientResult<Option<DailyLog>> {
        let path = format!("/logs/{}", format_date(date));
        let request = self.authorized(self.http.get(self.url(&path))).await?;
        let response = request.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        parse(response).await.map(Some)
    }

    pub async fn list_logs(&self, range: DateRange) -> ClientResult<Vec<DayEntry>> {
        let query = [
            ("start", format_date(range.start())),
            ("end", format_date(range.end())),
        ];
        let request = self
            .authorized(self.http.get(self.url("/logs")).query(&query))
            .await?;
        parse(request.send().await?).await
    }
}

/// Decode a success body, or turn an error response into [`ClientError::Api`]
async fn parse<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await?;
    let (message, code) = match serde_json::from_str::<ServerErrorBody>(&body) {
        Ok(err) => (err.error, err.code),
        Err(_) if body.is_empty() => (
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
            None,
        ),
        Err(_) => (body, None),
    };

    warn!(status = status.as_u16(), error = %message, "Request rejected");
    Err(ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}
