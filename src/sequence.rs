//! Sequence Rule Engine
//!
//! Decides whether a candidate report type may legally follow the history of
//! previously submitted reports. The rule table pairs "Begin" events with
//! their "End" counterparts; noon reports are always legal; report types
//! that only exist as continuations of a begin event may not be started out
//! of context.
//!
//! Only the single most-recent history entry gates the decision. The wider
//! "last 3-4 reports" window is exposed by the session history for display
//! purposes but is deliberately not consulted here.

use std::collections::HashMap;

use report_types::ReportType;
use tracing::debug;

/// Static mapping from a begin-type report to its allowed successors.
#[derive(Debug, Clone)]
pub struct SequenceRuleTable {
    successors: HashMap<ReportType, Vec<ReportType>>,
}

impl SequenceRuleTable {
    /// Build the begin/end pairing table.
    pub fn new() -> Self {
        let mut successors = HashMap::new();
        successors.insert(
            ReportType::BeginOfOffhire,
            vec![ReportType::EndOfOffhire],
        );
        successors.insert(
            ReportType::BeginOfSeaPassage,
            vec![ReportType::EndOfSeaPassage],
        );
        successors.insert(
            ReportType::BeginAnchoringDrifting,
            vec![ReportType::EndAnchoringDrifting],
        );
        successors.insert(
            ReportType::BeginCanalPassage,
            vec![ReportType::EndCanalPassage],
        );
        successors.insert(
            ReportType::BeginFuelChangeover,
            vec![ReportType::EndFuelChangeover],
        );
        Self { successors }
    }

    /// Successor set for a begin-type report, if it is restricted at all.
    pub fn allowed_successors(&self, report_type: ReportType) -> Option<&[ReportType]> {
        self.successors.get(&report_type).map(Vec::as_slice)
    }

    /// Whether a report type only exists as the continuation of some begin
    /// event and therefore may not be started out of context.
    pub fn is_continuation(&self, report_type: ReportType) -> bool {
        self.successors
            .values()
            .any(|set| set.contains(&report_type))
    }
}

impl Default for SequenceRuleTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Rule engine over the static table.
#[derive(Debug, Clone, Default)]
pub struct SequenceRuleEngine {
    table: SequenceRuleTable,
}

impl SequenceRuleEngine {
    pub fn new() -> Self {
        Self {
            table: SequenceRuleTable::new(),
        }
    }

    /// Whether `candidate` may legally follow `history` (most-recent-last).
    ///
    /// Never mutates history; the session appends only after a successful,
    /// validated submission.
    pub fn is_valid_sequence(&self, history: &[ReportType], candidate: ReportType) -> bool {
        let Some(&last) = history.last() else {
            // Initial state: no precondition.
            return true;
        };

        let verdict = match self.table.allowed_successors(last) {
            Some(allowed) => allowed.contains(&candidate) || candidate.is_noon(),
            None => candidate.is_noon() || !self.table.is_continuation(candidate),
        };

        debug!(
            last = last.as_str(),
            candidate = candidate.as_str(),
            verdict,
            "sequence rule verdict"
        );
        verdict
    }
}
