//! Noon report form model and sequence validator.
//!
//! Data model and validation core for maritime noon reporting: a static
//! field catalog with range rules, a per-report-type section schema, a
//! sequence rule engine gating which report type may follow the last one
//! submitted, ROB reconciliation, and a session object tying it together
//! with a chat transcript backed by a pluggable completion service.
//!
//! # Architecture
//!
//! ```text
//! report_types (foundation crate: value/report/transcript types)
//!     |
//! catalog -- schema -- validation -- sequence
//!     \________________|________________/
//!                   session
//!                      |
//!                ai (completion)
//! ```

pub mod ai;
pub mod catalog;
pub mod error;
pub mod placeholder;
pub mod schema;
pub mod sequence;
pub mod session;
pub mod validation;

pub use ai::{ChatAssistant, CompletionConfig, CompletionService, OpenAiClient};
pub use catalog::{FieldCatalog, FieldDef, RangeRule, Section, Subsection};
pub use error::{CompletionError, SchemaError, SessionError};
pub use report_types::{
    ChatRole, ChatTranscript, ChatTurn, FieldKind, FieldValue, FieldWarning, ReportInstance,
    ReportType, WarningSeverity,
};
pub use schema::SchemaRegistry;
pub use sequence::SequenceRuleEngine;
pub use session::{ReportSession, SessionStatus, SubmitOutcome};
pub use validation::{RobCheck, ROB_TOLERANCE_MT};
