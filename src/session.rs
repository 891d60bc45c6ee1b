//! Report Session State
//!
//! Owns the lifecycle of one user session: the in-progress report instance,
//! the submitted-report history, and the chat transcript. The UI layer calls
//! the mutation points here and surfaces the verdicts; no ambient global
//! state is involved.

use chrono::{DateTime, Utc};
use report_types::{ChatTranscript, FieldValue, FieldWarning, ReportInstance, ReportType};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::FieldCatalog;
use crate::error::{SessionError, SessionResult};
use crate::schema::SchemaRegistry;
use crate::sequence::SequenceRuleEngine;
use crate::validation::{self, RobCheck};

/// How many history entries the "recent reports" window exposes. The rule
/// engine itself only consults the most recent entry.
pub const SEQUENCE_WINDOW: usize = 4;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No report is being drafted
    Idle,
    /// A report is being filled in
    Drafting,
    /// The last report was submitted; ready for the next one
    Submitted,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Drafting => "drafting",
            SessionStatus::Submitted => "submitted",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only record of submitted report types, most-recent-last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportHistory {
    entries: Vec<ReportType>,
}

impl ReportHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submitted report type. Entries are never edited afterwards.
    pub fn push(&mut self, report_type: ReportType) {
        self.entries.push(report_type);
    }

    /// Full history, oldest first.
    pub fn entries(&self) -> &[ReportType] {
        &self.entries
    }

    /// Most recently submitted report type, if any.
    pub fn last(&self) -> Option<ReportType> {
        self.entries.last().copied()
    }

    /// The trailing window of up to `n` entries.
    pub fn recent(&self, n: usize) -> &[ReportType] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// What a successful submission produced.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// Type of the report that was submitted
    pub report_type: ReportType,
    /// Submission timestamp (UTC)
    pub submitted_at: DateTime<Utc>,
    /// Non-blocking range warnings collected during validation
    pub warnings: Vec<FieldWarning>,
}

/// One user's report session: draft, history and transcript.
#[derive(Debug)]
pub struct ReportSession {
    session_id: Uuid,
    status: SessionStatus,
    catalog: FieldCatalog,
    registry: SchemaRegistry,
    rules: SequenceRuleEngine,
    draft: Option<ReportInstance>,
    history: ReportHistory,
    transcript: ChatTranscript,
}

impl ReportSession {
    /// Create a fresh idle session with the static catalog and rule set.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            status: SessionStatus::Idle,
            catalog: FieldCatalog::new(),
            registry: SchemaRegistry::new(),
            rules: SequenceRuleEngine::new(),
            draft: None,
            history: ReportHistory::new(),
            transcript: ChatTranscript::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn history(&self) -> &ReportHistory {
        &self.history
    }

    pub fn draft(&self) -> Option<&ReportInstance> {
        self.draft.as_ref()
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut ChatTranscript {
        &mut self.transcript
    }

    /// Whether the sequence rules would admit `candidate` right now.
    pub fn is_valid_next(&self, candidate: ReportType) -> bool {
        self.rules
            .is_valid_sequence(self.history.entries(), candidate)
    }

    /// Begin drafting a new report. Requires sequence-rule approval and no
    /// report already in progress.
    pub fn start_report(&mut self, report_type: ReportType) -> SessionResult<()> {
        if self.status == SessionStatus::Drafting {
            let in_progress = self
                .draft
                .as_ref()
                .map(|d| d.report_type.to_string())
                .unwrap_or_default();
            return Err(SessionError::ReportInProgress {
                report_type: in_progress,
            });
        }

        if !self.is_valid_next(report_type) {
            let last = self
                .history
                .last()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "start of session".to_string());
            warn!(
                candidate = report_type.as_str(),
                %last,
                "sequence rules rejected report type"
            );
            return Err(SessionError::SequenceViolation {
                candidate: report_type.to_string(),
                last,
            });
        }

        info!(report_type = report_type.as_str(), "starting report draft");
        self.draft = Some(ReportInstance::new(report_type));
        self.status = SessionStatus::Drafting;
        Ok(())
    }

    /// Record one field value on the current draft. Range violations are
    /// returned as a warning but never fail the call.
    pub fn set_field(
        &mut self,
        key: impl Into<String>,
        value: FieldValue,
    ) -> SessionResult<Option<FieldWarning>> {
        if self.status != SessionStatus::Drafting {
            return Err(SessionError::NoActiveReport);
        }
        let draft = self.draft.as_mut().ok_or(SessionError::NoActiveReport)?;

        let key = key.into();
        let check = validation::validate_field(&self.catalog, &key, &value);
        let warning = match check {
            validation::FieldCheck::Ok => None,
            validation::FieldCheck::OutOfRange { min, max, value } => {
                warn!(field = %key, value, "field value outside expected range");
                Some(FieldWarning::new(
                    key.clone(),
                    format!("value {} outside expected range [{}, {}]", value, min, max),
                    report_types::WarningSeverity::Warning,
                ))
            }
        };

        draft.set_value(key, value);
        Ok(warning)
    }

    /// Validate and submit the current draft.
    ///
    /// Range warnings are collected but non-fatal; a ROB mismatch blocks the
    /// submission and leaves the draft untouched so the user can correct it.
    /// On success the report type is appended to the history and the session
    /// is ready for the next report.
    pub fn submit(&mut self) -> SessionResult<SubmitOutcome> {
        if self.status != SessionStatus::Drafting {
            return Err(SessionError::NoActiveReport);
        }
        let draft = self.draft.as_ref().ok_or(SessionError::NoActiveReport)?;

        let warnings = validation::check_ranges(&self.catalog, draft);
        if let RobCheck::Mismatch {
            calculated,
            reported,
        } = validation::validate_rob_consistency(draft)
        {
            warn!(calculated, reported, "ROB reconciliation failed");
            return Err(SessionError::RobMismatch {
                calculated,
                reported,
            });
        }

        // The draft is frozen from here on.
        let submitted = self.draft.take().ok_or(SessionError::NoActiveReport)?;
        let report_type = submitted.report_type;
        self.history.push(report_type);
        self.status = SessionStatus::Submitted;

        info!(
            report_type = report_type.as_str(),
            warnings = warnings.len(),
            history_len = self.history.len(),
            "report submitted"
        );

        Ok(SubmitOutcome {
            report_type,
            submitted_at: Utc::now(),
            warnings,
        })
    }

    /// Reset the whole session: draft, history and transcript are cleared
    /// together and the session returns to idle.
    pub fn clear_session(&mut self) {
        info!(session_id = %self.session_id, "clearing session");
        self.draft = None;
        self.history.clear();
        self.transcript.clear();
        self.status = SessionStatus::Idle;
    }
}

impl Default for ReportSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldCatalog;
    use report_types::ChatTurn;

    fn fill_consistent_robs(session: &mut ReportSession) {
        for (fuel, qty) in [("HSFO", 500.0), ("VLSFO", 200.0), ("MGO", 80.0)] {
            session
                .set_field(FieldCatalog::rob_field_key(fuel), FieldValue::Decimal(qty))
                .unwrap();
        }
        session
            .set_field(FieldCatalog::total_rob_key(), FieldValue::Decimal(780.0))
            .unwrap();
    }

    #[test]
    fn test_full_round_trip() {
        let mut session = ReportSession::new();
        assert_eq!(session.status(), SessionStatus::Idle);

        session.start_report(ReportType::Departure).unwrap();
        assert_eq!(session.status(), SessionStatus::Drafting);

        session
            .set_field("Position.Latitude", FieldValue::Decimal(51.9))
            .unwrap();
        fill_consistent_robs(&mut session);

        let outcome = session.submit().unwrap();
        assert_eq!(outcome.report_type, ReportType::Departure);
        assert!(outcome.warnings.is_empty());
        assert_eq!(session.status(), SessionStatus::Submitted);
        assert_eq!(session.history().entries(), &[ReportType::Departure]);
        assert!(session.draft().is_none());
    }

    #[test]
    fn test_start_requires_sequence_approval() {
        let mut session = ReportSession::new();
        session.start_report(ReportType::BeginOfOffhire).unwrap();
        fill_consistent_robs(&mut session);
        session.submit().unwrap();

        let err = session.start_report(ReportType::Arrival).unwrap_err();
        assert!(matches!(err, SessionError::SequenceViolation { .. }));
        assert_eq!(session.status(), SessionStatus::Submitted);

        // Closing the bracket is accepted.
        session.start_report(ReportType::EndOfOffhire).unwrap();
        assert_eq!(session.status(), SessionStatus::Drafting);
    }

    #[test]
    fn test_only_one_draft_at_a_time() {
        let mut session = ReportSession::new();
        session.start_report(ReportType::Departure).unwrap();
        let err = session
            .start_report(ReportType::NoonSeaPassage)
            .unwrap_err();
        assert!(matches!(err, SessionError::ReportInProgress { .. }));
    }

    #[test]
    fn test_set_field_outside_draft_fails() {
        let mut session = ReportSession::new();
        let err = session
            .set_field("Position.Latitude", FieldValue::Decimal(51.9))
            .unwrap_err();
        assert_eq!(err, SessionError::NoActiveReport);
        assert_eq!(session.submit().unwrap_err(), SessionError::NoActiveReport);
    }

    #[test]
    fn test_range_warning_does_not_block() {
        let mut session = ReportSession::new();
        session.start_report(ReportType::NoonSeaPassage).unwrap();

        let warning = session
            .set_field("Position.Longitude", FieldValue::Decimal(190.0))
            .unwrap();
        assert!(warning.is_some());

        fill_consistent_robs(&mut session);
        let outcome = session.submit().unwrap();
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].field_key, "Position.Longitude");
    }

    #[test]
    fn test_rob_mismatch_blocks_then_resubmit() {
        let mut session = ReportSession::new();
        session.start_report(ReportType::NoonSeaPassage).unwrap();
        session
            .set_field(
                FieldCatalog::rob_field_key("HSFO"),
                FieldValue::Decimal(500.0),
            )
            .unwrap();
        session
            .set_field(FieldCatalog::total_rob_key(), FieldValue::Decimal(620.0))
            .unwrap();

        let err = session.submit().unwrap_err();
        assert!(matches!(err, SessionError::RobMismatch { .. }));
        // The draft survives so the user can correct and resubmit.
        assert_eq!(session.status(), SessionStatus::Drafting);
        assert!(session.draft().is_some());

        session
            .set_field(FieldCatalog::total_rob_key(), FieldValue::Decimal(500.0))
            .unwrap();
        session.submit().unwrap();
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_clear_session_resets_everything() {
        let mut session = ReportSession::new();
        session.start_report(ReportType::Departure).unwrap();
        fill_consistent_robs(&mut session);
        session.submit().unwrap();
        session.transcript_mut().push(ChatTurn::user("hello"));

        session.clear_session();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.history().is_empty());
        assert!(session.transcript().is_empty());
        assert!(session.draft().is_none());
    }

    #[test]
    fn test_history_recent_window() {
        let mut history = ReportHistory::new();
        for t in [
            ReportType::Departure,
            ReportType::NoonSeaPassage,
            ReportType::NoonSeaPassage,
            ReportType::NoonSeaPassage,
            ReportType::Arrival,
        ] {
            history.push(t);
        }
        assert_eq!(history.len(), 5);
        let window = history.recent(SEQUENCE_WINDOW);
        assert_eq!(window.len(), 4);
        assert_eq!(window.last(), Some(&ReportType::Arrival));
        // Older entries are retained even though the window skips them.
        assert_eq!(history.entries()[0], ReportType::Departure);
    }
}
