//! Report Types - Foundation Data Types (Level 1)
//!
//! Pure data structures shared by every layer of the noon-report system:
//! the report-type enumeration, field kinds and values, chat transcript
//! turns, and validation warning types.
//!
//! This crate depends on nothing but std and the essential serialization
//! crates. No business logic lives here - only constructors and accessors.
//! The catalog, schema registry, validators and session machinery all build
//! on top of these types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// REPORT TYPES
// ============================================================================

/// The closed set of report types a vessel may submit.
///
/// The canonical display strings below are load-bearing: the sequence rule
/// engine treats every name beginning with "Noon" as a periodic report that
/// is always legal to file, so the prefix must stay anchored at the start of
/// the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    Departure,
    Arrival,
    ArrivalSts,
    DepartureSts,
    NoonSeaPassage,
    NoonPort,
    NoonRiver,
    NoonStoppage,
    NoonAnchorage,
    NoonDrifting,
    NoonSts,
    NoonCanal,
    BeginOfSeaPassage,
    EndOfSeaPassage,
    BeginOfOffhire,
    EndOfOffhire,
    BeginAnchoringDrifting,
    EndAnchoringDrifting,
    BeginCanalPassage,
    EndCanalPassage,
    BeginFuelChangeover,
    EndFuelChangeover,
    Bunkering,
    EtaUpdate,
    EndOfVoyage,
}

impl ReportType {
    /// Canonical display name as it appears on the report form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Departure => "Departure",
            ReportType::Arrival => "Arrival",
            ReportType::ArrivalSts => "Arrival STS",
            ReportType::DepartureSts => "Departure STS",
            ReportType::NoonSeaPassage => "Noon (Position) - Sea passage",
            ReportType::NoonPort => "Noon (Position) - Port",
            ReportType::NoonRiver => "Noon (Position) - River",
            ReportType::NoonStoppage => "Noon (Position) - Stoppage",
            ReportType::NoonAnchorage => "Noon (Position) - Anchorage",
            ReportType::NoonDrifting => "Noon (Position) - Drifting",
            ReportType::NoonSts => "Noon (Position) - STS",
            ReportType::NoonCanal => "Noon (Position) - Canal",
            ReportType::BeginOfSeaPassage => "Begin of sea passage",
            ReportType::EndOfSeaPassage => "End of sea passage",
            ReportType::BeginOfOffhire => "Begin of offhire",
            ReportType::EndOfOffhire => "End of offhire",
            ReportType::BeginAnchoringDrifting => "Begin anchoring/drifting",
            ReportType::EndAnchoringDrifting => "End anchoring/drifting",
            ReportType::BeginCanalPassage => "Begin canal passage",
            ReportType::EndCanalPassage => "End canal passage",
            ReportType::BeginFuelChangeover => "Begin fuel changeover",
            ReportType::EndFuelChangeover => "End fuel changeover",
            ReportType::Bunkering => "Bunkering",
            ReportType::EtaUpdate => "ETA update",
            ReportType::EndOfVoyage => "End of voyage",
        }
    }

    /// Whether this is a periodic noon report. Anchored at the start of the
    /// canonical name so names merely containing "noon" elsewhere never match.
    pub fn is_noon(&self) -> bool {
        self.as_str().starts_with("Noon")
    }

    /// All report types in catalog order.
    pub fn all() -> &'static [ReportType] {
        &[
            ReportType::Departure,
            ReportType::Arrival,
            ReportType::ArrivalSts,
            ReportType::DepartureSts,
            ReportType::NoonSeaPassage,
            ReportType::NoonPort,
            ReportType::NoonRiver,
            ReportType::NoonStoppage,
            ReportType::NoonAnchorage,
            ReportType::NoonDrifting,
            ReportType::NoonSts,
            ReportType::NoonCanal,
            ReportType::BeginOfSeaPassage,
            ReportType::EndOfSeaPassage,
            ReportType::BeginOfOffhire,
            ReportType::EndOfOffhire,
            ReportType::BeginAnchoringDrifting,
            ReportType::EndAnchoringDrifting,
            ReportType::BeginCanalPassage,
            ReportType::EndCanalPassage,
            ReportType::BeginFuelChangeover,
            ReportType::EndFuelChangeover,
            ReportType::Bunkering,
            ReportType::EtaUpdate,
            ReportType::EndOfVoyage,
        ]
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown report type: {}", s))
    }
}

// ============================================================================
// FIELD KINDS AND VALUES
// ============================================================================

/// The widget-independent kind of a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text entry
    Text,
    /// Whole-number entry
    Integer,
    /// Decimal entry
    Decimal,
    /// Calendar date (UTC)
    Date,
    /// Time of day (UTC)
    Time,
    /// Selection from a fixed option list
    Enum(Vec<String>),
}

impl FieldKind {
    /// Get human-readable kind name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::Enum(_) => "enum",
        }
    }

    /// Whether values of this kind carry a numeric magnitude
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Decimal)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value submitted for a single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Choice(String),
}

impl FieldValue {
    /// Numeric magnitude of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Get human-readable value kind name
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) => "integer",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Date(_) => "date",
            FieldValue::Time(_) => "time",
            FieldValue::Choice(_) => "choice",
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Decimal(d) => write!(f, "{}", d),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::Time(t) => write!(f, "{}", t.format("%H:%M")),
        }
    }
}

// ============================================================================
// REPORT INSTANCE
// ============================================================================

/// A single in-progress or submitted report.
///
/// Values are keyed by fully-qualified field key in the form
/// `section[.subsection].field`. The map stays mutable while the report is
/// being drafted; the session freezes it on successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInstance {
    /// Which report form this instance fills in
    pub report_type: ReportType,
    /// Submitted values by fully-qualified field key
    pub values: BTreeMap<String, FieldValue>,
    /// Creation timestamp (UTC)
    pub created_at: DateTime<Utc>,
}

impl ReportInstance {
    /// Create an empty instance for the given report type.
    pub fn new(report_type: ReportType) -> Self {
        Self {
            report_type,
            values: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Set (or overwrite) a field value.
    pub fn set_value(&mut self, key: impl Into<String>, value: FieldValue) {
        self.values.insert(key.into(), value);
    }

    /// Look up a field value by fully-qualified key.
    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Numeric magnitude of a field, if present and numeric.
    pub fn numeric_value(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(FieldValue::as_f64)
    }

    /// Number of filled fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fields have been filled yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// CHAT TRANSCRIPT
// ============================================================================

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Wire-format role name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One turn of the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Append-only ordered sequence of chat turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatTranscript {
    turns: Vec<ChatTurn>,
}

impl ChatTranscript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn.
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// All turns in order.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The most recent user utterance, if any.
    pub fn latest_user_text(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == ChatRole::User)
            .map(|t| t.text.as_str())
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop every turn.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

// ============================================================================
// VALIDATION WARNING TYPES
// ============================================================================

/// Warning severity levels for field validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WarningSeverity {
    /// Low priority note
    Info,
    /// Value looks suspect but does not block submission
    Warning,
}

impl WarningSeverity {
    /// Get human-readable severity name
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningSeverity::Info => "info",
            WarningSeverity::Warning => "warning",
        }
    }
}

impl std::fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Non-fatal validation finding for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWarning {
    /// Fully-qualified field key the warning refers to
    pub field_key: String,
    /// Human-readable message
    pub message: String,
    /// Severity level
    pub severity: WarningSeverity,
}

impl FieldWarning {
    /// Create a new field warning.
    pub fn new(
        field_key: impl Into<String>,
        message: impl Into<String>,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            field_key: field_key.into(),
            message: message.into(),
            severity,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
