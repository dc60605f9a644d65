use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{AppointmentRequest, AppointmentResult, AuthStatus, TimeSlot};

/// Seam to the remote calendar service. The service itself is opaque: it owns
/// slot semantics, appointment ids, and credential state. One request per
/// call, no retries.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn fetch_slots(&self, date: NaiveDate) -> anyhow::Result<Vec<TimeSlot>>;
    async fn save_appointment(
        &self,
        request: &AppointmentRequest,
    ) -> anyhow::Result<AppointmentResult>;
    async fn auth_status(&self) -> anyhow::Result<AuthStatus>;
}

pub struct HttpCalendarProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpCalendarProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotsResponse {
    // The provider omits the field entirely when nothing is free.
    #[serde(default)]
    available_slots: Vec<TimeSlot>,
}

#[async_trait]
impl CalendarProvider for HttpCalendarProvider {
    async fn fetch_slots(&self, date: NaiveDate) -> anyhow::Result<Vec<TimeSlot>> {
        let url = format!("{}/slots", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .context("failed to reach calendar service")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("calendar slots error ({}): {}", status, body);
        }

        let data: SlotsResponse = resp
            .json()
            .await
            .context("failed to parse calendar slots response")?;
        Ok(data.available_slots)
    }

    async fn save_appointment(
        &self,
        request: &AppointmentRequest,
    ) -> anyhow::Result<AppointmentResult> {
        let url = format!("{}/appointments", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .context("failed to reach calendar service")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("calendar booking error ({}): {}", status, body);
        }

        resp.json()
            .await
            .context("failed to parse appointment result")
    }

    async fn auth_status(&self) -> anyhow::Result<AuthStatus> {
        let url = format!("{}/auth/status", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("failed to reach calendar service")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("calendar auth status error ({}): {}", status, body);
        }

        resp.json().await.context("failed to parse auth status")
    }
}
