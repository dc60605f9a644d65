use std::sync::atomic::{AtomicBool, Ordering};

use crate::models::{AppointmentRequest, AppointmentResult};
use crate::services::calendar::CalendarProvider;

pub const BOOKING_ERROR_MESSAGE: &str =
    "We couldn't book your appointment. Please try again.";

#[derive(Debug, PartialEq)]
pub enum SubmitError {
    AlreadyInFlight,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::AlreadyInFlight => {
                write!(f, "a submission is already in progress")
            }
        }
    }
}

/// Serializes appointment submissions: one attempt may be unresolved at a
/// time, and the caller gets a structured result either way. Safe to share
/// behind an Arc.
#[derive(Default)]
pub struct AppointmentSubmitter {
    in_flight: AtomicBool,
}

impl AppointmentSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(
        &self,
        provider: &dyn CalendarProvider,
        request: &AppointmentRequest,
    ) -> Result<AppointmentResult, SubmitError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SubmitError::AlreadyInFlight);
        }

        let result = match provider.save_appointment(request).await {
            Ok(result) if result.is_well_formed() => result,
            Ok(malformed) => {
                // A "success" without an id cannot be referenced later; treat
                // it as a failed booking.
                tracing::error!(?malformed, "provider confirmed booking without an id");
                AppointmentResult::failure(
                    BOOKING_ERROR_MESSAGE,
                    "booking confirmation was incomplete",
                )
            }
            Err(e) => {
                tracing::warn!(error = %e, "appointment submission failed");
                AppointmentResult::failure(BOOKING_ERROR_MESSAGE, "calendar service unreachable")
            }
        };

        self.in_flight.store(false, Ordering::SeqCst);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use tokio::sync::Notify;

    use super::*;
    use crate::models::{AuthStatus, GuestInfo, TimeSlot};

    struct StubProvider {
        result: fn() -> anyhow::Result<AppointmentResult>,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl CalendarProvider for StubProvider {
        async fn fetch_slots(&self, _date: NaiveDate) -> anyhow::Result<Vec<TimeSlot>> {
            unimplemented!("not used by these tests")
        }

        async fn save_appointment(
            &self,
            _request: &AppointmentRequest,
        ) -> anyhow::Result<AppointmentResult> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            (self.result)()
        }

        async fn auth_status(&self) -> anyhow::Result<AuthStatus> {
            unimplemented!("not used by these tests")
        }
    }

    fn request() -> AppointmentRequest {
        AppointmentRequest {
            date: NaiveDate::parse_from_str("2025-06-16", "%Y-%m-%d").unwrap(),
            slot: TimeSlot::from("10:00"),
            guest: GuestInfo {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                notes: None,
            },
        }
    }

    fn booked() -> anyhow::Result<AppointmentResult> {
        Ok(AppointmentResult {
            success: true,
            id: Some("evt-1".to_string()),
            message: "Booked".to_string(),
            error: None,
        })
    }

    #[tokio::test]
    async fn test_successful_submission_passes_through() {
        let provider = StubProvider {
            result: booked,
            gate: None,
        };
        let submitter = AppointmentSubmitter::new();

        let result = submitter.submit(&provider, &request()).await.unwrap();
        assert!(result.success);
        assert_eq!(result.id.as_deref(), Some("evt-1"));
    }

    #[tokio::test]
    async fn test_transport_error_becomes_structured_failure() {
        let provider = StubProvider {
            result: || Err(anyhow::anyhow!("connection refused")),
            gate: None,
        };
        let submitter = AppointmentSubmitter::new();

        let result = submitter.submit(&provider, &request()).await.unwrap();
        assert!(!result.success);
        assert!(result.id.is_none());
        assert_eq!(result.message, BOOKING_ERROR_MESSAGE);
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_success_without_id_is_downgraded() {
        let provider = StubProvider {
            result: || {
                Ok(AppointmentResult {
                    success: true,
                    id: None,
                    message: "Booked".to_string(),
                    error: None,
                })
            },
            gate: None,
        };
        let submitter = AppointmentSubmitter::new();

        let result = submitter.submit(&provider, &request()).await.unwrap();
        assert!(!result.success);
        assert!(result.is_well_formed());
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_rejected_until_resolution() {
        let gate = Arc::new(Notify::new());
        let provider = Arc::new(StubProvider {
            result: booked,
            gate: Some(Arc::clone(&gate)),
        });
        let submitter = Arc::new(AppointmentSubmitter::new());

        let first = {
            let submitter = Arc::clone(&submitter);
            let provider = Arc::clone(&provider);
            tokio::spawn(async move { submitter.submit(provider.as_ref(), &request()).await })
        };
        // Let the first submission reach the provider and park on the gate.
        tokio::task::yield_now().await;

        let second = submitter.submit(provider.as_ref(), &request()).await;
        assert_eq!(second.unwrap_err(), SubmitError::AlreadyInFlight);

        gate.notify_one();
        let first = first.await.unwrap().unwrap();
        assert!(first.success);

        // Guard released: a fresh submission goes through again.
        let provider = StubProvider {
            result: booked,
            gate: None,
        };
        assert!(submitter.submit(&provider, &request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_guard_releases_after_provider_error() {
        let provider = StubProvider {
            result: || Err(anyhow::anyhow!("boom")),
            gate: None,
        };
        let submitter = AppointmentSubmitter::new();

        let _ = submitter.submit(&provider, &request()).await.unwrap();
        let again = submitter.submit(&provider, &request()).await;
        assert!(again.is_ok());
    }
}
