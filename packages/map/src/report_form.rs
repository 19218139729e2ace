//! The incident report form and its submission.

use air_map_air_models::{Severity, SourceCategory};
use air_map_geography_models::Coordinates;
use air_map_server_models::{ApiStoredReport, ErrorResponse, ReportSubmission};
use async_trait::async_trait;
use thiserror::Error;

/// Shown after a successful submission.
pub const SUBMITTED_MESSAGE: &str = "Report Submitted!";

/// Shown inline when a submission fails.
pub const FAILED_MESSAGE: &str = "Failed to submit report. Please try again.";

/// Path the HTTP submitter posts to.
pub const REPORTS_PATH: &str = "/api/reports";

/// Errors from submitting a report.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Transport failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The server requires a signed-in session.
    #[error("Sign in to submit reports")]
    Unauthorized,
    /// The server refused the report.
    #[error("Server returned {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },
    /// The form is already submitting or submitted.
    #[error("Report already submitted")]
    AlreadySubmitted,
}

/// Sends a report to the store.
#[async_trait]
pub trait ReportSubmitter: Send + Sync {
    /// Submits one report and returns the stored record.
    ///
    /// # Errors
    ///
    /// * If the request fails or the server refuses the report
    async fn submit(&self, submission: &ReportSubmission) -> Result<ApiStoredReport, SubmitError>;
}

/// Posts reports to the air map server.
#[derive(Debug, Clone)]
pub struct HttpReportSubmitter {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpReportSubmitter {
    /// Creates a submitter for a server base URL (e.g. `http://127.0.0.1:8080`).
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Full URL reports are posted to.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{REPORTS_PATH}", self.base_url)
    }
}

#[async_trait]
impl ReportSubmitter for HttpReportSubmitter {
    async fn submit(&self, submission: &ReportSubmission) -> Result<ApiStoredReport, SubmitError> {
        let mut request = self.client.post(self.endpoint()).json(submission);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SubmitError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map_or_else(|_| status.to_string(), |body| body.error);
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ApiStoredReport>().await?)
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Accepting input.
    Editing,
    /// Waiting on the server.
    Submitting,
    /// Stored.
    Submitted,
    /// The last attempt failed with this inline message.
    Failed(String),
}

/// Report form state for one pinned location.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportForm {
    category: SourceCategory,
    severity: Severity,
    description: String,
    location: Coordinates,
    state: FormState,
}

impl ReportForm {
    /// Opens the form at a pinned location with its default choices.
    #[must_use]
    pub fn new(location: Coordinates) -> Self {
        Self {
            category: SourceCategory::WasteBurning,
            severity: Severity::default(),
            description: String::new(),
            location,
            state: FormState::Editing,
        }
    }

    /// Selected category.
    #[must_use]
    pub const fn category(&self) -> SourceCategory {
        self.category
    }

    /// Selected severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Description typed so far.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Pinned location.
    #[must_use]
    pub const fn location(&self) -> Coordinates {
        self.location
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Text to show for the current state, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match &self.state {
            FormState::Editing | FormState::Submitting => None,
            FormState::Submitted => Some(SUBMITTED_MESSAGE),
            FormState::Failed(message) => Some(message),
        }
    }

    /// Picks a category.
    pub const fn set_category(&mut self, category: SourceCategory) {
        self.category = category;
    }

    /// Sets severity from the slider, clamped to 1-5.
    pub const fn set_severity(&mut self, value: u8) {
        self.severity = Severity::clamped(value);
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// The request body for the current input.
    #[must_use]
    pub fn to_submission(&self) -> ReportSubmission {
        let description = self.description.trim();
        ReportSubmission {
            category: self.category.to_string(),
            severity: self.severity,
            description: (!description.is_empty()).then(|| description.to_string()),
            location: self.location,
        }
    }

    /// Submits the form. A failed attempt leaves the form editable again
    /// with an inline message.
    ///
    /// # Errors
    ///
    /// * If the form was already submitted or is mid-submission
    /// * If the submitter fails
    pub async fn submit(
        &mut self,
        submitter: &dyn ReportSubmitter,
    ) -> Result<ApiStoredReport, SubmitError> {
        if matches!(self.state, FormState::Submitting | FormState::Submitted) {
            return Err(SubmitError::AlreadySubmitted);
        }

        self.state = FormState::Submitting;
        match submitter.submit(&self.to_submission()).await {
            Ok(stored) => {
                log::info!("Report {} submitted", stored.id);
                self.state = FormState::Submitted;
                Ok(stored)
            }
            Err(e) => {
                log::error!("Report submission failed: {e}");
                let message = match &e {
                    SubmitError::Unauthorized => e.to_string(),
                    _ => FAILED_MESSAGE.to_string(),
                };
                self.state = FormState::Failed(message);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use air_map_air_models::{ReportStatus, ReportType};
    use chrono::Utc;

    use super::*;

    struct RecordingSubmitter {
        fail: bool,
        seen: Mutex<Vec<ReportSubmission>>,
    }

    impl RecordingSubmitter {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                seen: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl ReportSubmitter for RecordingSubmitter {
        async fn submit(
            &self,
            submission: &ReportSubmission,
        ) -> Result<ApiStoredReport, SubmitError> {
            self.seen.lock().unwrap().push(submission.clone());
            if self.fail {
                return Err(SubmitError::Rejected {
                    status: 500,
                    message: "database is locked".to_string(),
                });
            }
            Ok(ApiStoredReport {
                id: "8c1f".to_string(),
                report_type: ReportType::GarbageBurning,
                severity: submission.severity,
                description: submission.description.clone(),
                location: "POINT(77.2 28.6)".to_string(),
                user_id: "user_abc".to_string(),
                status: ReportStatus::Pending,
                reported_at: Utc::now(),
            })
        }
    }

    fn here() -> Coordinates {
        Coordinates::new(28.6, 77.2)
    }

    #[test]
    fn opens_with_defaults() {
        let form = ReportForm::new(here());
        assert_eq!(form.category(), SourceCategory::WasteBurning);
        assert_eq!(form.severity().value(), 3);
        assert_eq!(*form.state(), FormState::Editing);
        assert!(form.message().is_none());
    }

    #[test]
    fn severity_is_clamped_and_blank_description_dropped() {
        let mut form = ReportForm::new(here());
        form.set_severity(9);
        assert_eq!(form.severity().value(), 5);
        form.set_severity(0);
        assert_eq!(form.severity().value(), 1);

        form.set_description("   ");
        let body = form.to_submission();
        assert_eq!(body.category, "Waste & Burning");
        assert!(body.description.is_none());
    }

    #[tokio::test]
    async fn successful_submit_moves_to_submitted() {
        let submitter = RecordingSubmitter::new(false);
        let mut form = ReportForm::new(here());
        form.set_category(SourceCategory::AgricultureLinked);
        form.set_description("Stubble fire");

        let stored = form.submit(&submitter).await.unwrap();
        assert_eq!(stored.id, "8c1f");
        assert_eq!(*form.state(), FormState::Submitted);
        assert_eq!(form.message(), Some(SUBMITTED_MESSAGE));

        let seen = submitter.seen.lock().unwrap();
        assert_eq!(seen[0].category, "Agriculture-Linked");
        assert_eq!(seen[0].description.as_deref(), Some("Stubble fire"));
        drop(seen);

        assert!(matches!(
            form.submit(&submitter).await,
            Err(SubmitError::AlreadySubmitted)
        ));
    }

    #[tokio::test]
    async fn failed_submit_shows_inline_message_and_allows_retry() {
        let mut form = ReportForm::new(here());
        assert!(form.submit(&RecordingSubmitter::new(true)).await.is_err());
        assert_eq!(*form.state(), FormState::Failed(FAILED_MESSAGE.to_string()));

        assert!(form.submit(&RecordingSubmitter::new(false)).await.is_ok());
        assert_eq!(*form.state(), FormState::Submitted);
    }

    #[test]
    fn endpoint_joins_base_url() {
        let submitter =
            HttpReportSubmitter::new(reqwest::Client::new(), "http://127.0.0.1:8080/", None);
        assert_eq!(submitter.endpoint(), "http://127.0.0.1:8080/api/reports");
    }
}
