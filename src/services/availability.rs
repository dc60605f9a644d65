use chrono::NaiveDate;

use crate::models::TimeSlot;
use crate::services::calendar::CalendarProvider;

/// The only message the UI ever shows for a failed slot fetch; detail goes to
/// the logs.
pub const SLOTS_ERROR_MESSAGE: &str = "Unable to load available times. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityState {
    pub loading: bool,
    pub slots: Vec<TimeSlot>,
    pub error: Option<String>,
}

/// Identity of one fetch. A completion is applied only while its ticket is
/// still the newest, so a slow stale response can never overwrite fresher
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

/// Loading/result/error state for the currently selected date. Each date
/// change issues exactly one request, keyed by the date's ISO-8601 string.
#[derive(Default)]
pub struct AvailabilityFetcher {
    state: AvailabilityState,
    seq: u64,
}

impl AvailabilityFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AvailabilityState {
        &self.state
    }

    /// Registers interest in a new date. With no date there is nothing to
    /// fetch: state resets and no ticket is issued. Any ticket issued earlier
    /// is invalidated either way.
    pub fn begin(&mut self, date: Option<NaiveDate>) -> Option<FetchTicket> {
        self.seq += 1;

        let Some(date) = date else {
            self.state = AvailabilityState::default();
            return None;
        };

        tracing::debug!(date = %date.format("%Y-%m-%d"), seq = self.seq, "fetching slots");
        self.state.loading = true;
        self.state.error = None;
        Some(FetchTicket { seq: self.seq })
    }

    /// Applies a fetch outcome. Returns false when the ticket is stale and the
    /// outcome was discarded.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: anyhow::Result<Vec<TimeSlot>>,
    ) -> bool {
        if ticket.seq != self.seq {
            tracing::debug!(seq = ticket.seq, newest = self.seq, "discarding stale slot response");
            return false;
        }

        self.state.loading = false;
        match outcome {
            Ok(slots) => {
                self.state.slots = slots;
                self.state.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "slot fetch failed");
                self.state.slots = Vec::new();
                self.state.error = Some(SLOTS_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// One full fetch cycle against the provider. A single attempt; failures
    /// land in the state, never propagate.
    pub async fn refresh(&mut self, provider: &dyn CalendarProvider, date: Option<NaiveDate>) {
        let Some(date) = date else {
            self.begin(None);
            return;
        };
        let Some(ticket) = self.begin(Some(date)) else {
            return;
        };
        let outcome = provider.fetch_slots(date).await;
        self.complete(ticket, outcome);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{AppointmentRequest, AppointmentResult, AuthStatus};

    struct RecordingProvider {
        requested: Mutex<Vec<String>>,
        slots: Vec<TimeSlot>,
    }

    impl RecordingProvider {
        fn with_slots(slots: Vec<TimeSlot>) -> Self {
            Self {
                requested: Mutex::new(vec![]),
                slots,
            }
        }
    }

    #[async_trait]
    impl CalendarProvider for RecordingProvider {
        async fn fetch_slots(&self, date: NaiveDate) -> anyhow::Result<Vec<TimeSlot>> {
            self.requested
                .lock()
                .unwrap()
                .push(date.format("%Y-%m-%d").to_string());
            Ok(self.slots.clone())
        }

        async fn save_appointment(
            &self,
            _request: &AppointmentRequest,
        ) -> anyhow::Result<AppointmentResult> {
            unimplemented!("not used by these tests")
        }

        async fn auth_status(&self) -> anyhow::Result<AuthStatus> {
            unimplemented!("not used by these tests")
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn slots(labels: &[&str]) -> Vec<TimeSlot> {
        labels.iter().map(|l| TimeSlot::from(*l)).collect()
    }

    #[test]
    fn test_no_date_means_no_fetch() {
        let mut fetcher = AvailabilityFetcher::new();
        assert!(fetcher.begin(None).is_none());
        assert!(!fetcher.state().loading);
        assert!(fetcher.state().slots.is_empty());
        assert!(fetcher.state().error.is_none());
    }

    #[test]
    fn test_begin_sets_loading_and_clears_error() {
        let mut fetcher = AvailabilityFetcher::new();
        let ticket = fetcher.begin(Some(date("2025-06-16"))).unwrap();
        fetcher.complete(ticket, Err(anyhow::anyhow!("boom")));
        assert!(fetcher.state().error.is_some());

        let _ticket = fetcher.begin(Some(date("2025-06-17"))).unwrap();
        assert!(fetcher.state().loading);
        assert!(fetcher.state().error.is_none());
    }

    #[test]
    fn test_failure_empties_slots_and_sets_generic_error() {
        let mut fetcher = AvailabilityFetcher::new();
        let ticket = fetcher.begin(Some(date("2025-06-16"))).unwrap();
        fetcher.complete(ticket, Ok(slots(&["10:00", "11:00"])));
        assert_eq!(fetcher.state().slots.len(), 2);

        let ticket = fetcher.begin(Some(date("2025-06-17"))).unwrap();
        assert!(fetcher.complete(ticket, Err(anyhow::anyhow!("500 from upstream"))));
        assert!(fetcher.state().slots.is_empty());
        assert_eq!(fetcher.state().error.as_deref(), Some(SLOTS_ERROR_MESSAGE));
        assert!(!fetcher.state().loading);
    }

    #[test]
    fn test_success_after_failure_clears_error() {
        let mut fetcher = AvailabilityFetcher::new();
        let ticket = fetcher.begin(Some(date("2025-06-16"))).unwrap();
        fetcher.complete(ticket, Err(anyhow::anyhow!("boom")));

        let ticket = fetcher.begin(Some(date("2025-06-17"))).unwrap();
        fetcher.complete(ticket, Ok(slots(&["09:00"])));
        assert!(fetcher.state().error.is_none());
        assert_eq!(fetcher.state().slots, slots(&["09:00"]));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut fetcher = AvailabilityFetcher::new();
        let stale = fetcher.begin(Some(date("2025-06-16"))).unwrap();
        let fresh = fetcher.begin(Some(date("2025-06-17"))).unwrap();

        // The slow first response arrives after the second was issued.
        assert!(!fetcher.complete(stale, Ok(slots(&["10:00"]))));
        assert!(fetcher.state().loading);
        assert!(fetcher.state().slots.is_empty());

        assert!(fetcher.complete(fresh, Ok(slots(&["14:00"]))));
        assert_eq!(fetcher.state().slots, slots(&["14:00"]));
    }

    #[test]
    fn test_clearing_date_invalidates_inflight_ticket() {
        let mut fetcher = AvailabilityFetcher::new();
        let ticket = fetcher.begin(Some(date("2025-06-16"))).unwrap();
        assert!(fetcher.begin(None).is_none());
        assert!(!fetcher.complete(ticket, Ok(slots(&["10:00"]))));
        assert!(fetcher.state().slots.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_issues_one_request_keyed_by_iso_date() {
        let provider = RecordingProvider::with_slots(slots(&["10:00"]));
        let mut fetcher = AvailabilityFetcher::new();

        fetcher.refresh(&provider, Some(date("2025-06-16"))).await;
        fetcher.refresh(&provider, Some(date("2025-06-17"))).await;
        fetcher.refresh(&provider, None).await;

        let requested = provider.requested.lock().unwrap();
        assert_eq!(*requested, vec!["2025-06-16", "2025-06-17"]);
    }
}
