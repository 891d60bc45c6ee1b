//! Report Schema Registry
//!
//! Maps each report type to its ordered list of applicable form sections.
//! "ETA update" legitimately carries a much shorter section list than every
//! other type; that asymmetry is deliberate, not an omission.

use std::collections::HashMap;
use std::str::FromStr;

use report_types::ReportType;

use crate::catalog::{
    CARGO, ETA, FUEL_ROB, FUEL_TOTALS, NAVIGATION, POSITION, REMARKS, VOYAGE_INFORMATION, WEATHER,
};
use crate::error::{SchemaError, SchemaResult};

/// Registry of section lists per report type.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    sections_by_type: HashMap<ReportType, Vec<String>>,
}

fn to_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl SchemaRegistry {
    /// Build the registry covering all report types.
    pub fn new() -> Self {
        let full = [
            VOYAGE_INFORMATION,
            POSITION,
            NAVIGATION,
            WEATHER,
            FUEL_ROB,
            FUEL_TOTALS,
            CARGO,
            REMARKS,
        ];
        // Port-call reports additionally carry the ETA block for the next leg.
        let port_call = [
            VOYAGE_INFORMATION,
            POSITION,
            NAVIGATION,
            WEATHER,
            FUEL_ROB,
            FUEL_TOTALS,
            CARGO,
            ETA,
            REMARKS,
        ];
        // Event reports record position and fuel state at the moment of the event.
        let event = [VOYAGE_INFORMATION, POSITION, FUEL_ROB, FUEL_TOTALS, REMARKS];

        let mut sections_by_type = HashMap::new();
        for &t in ReportType::all() {
            let sections = match t {
                ReportType::Departure | ReportType::DepartureSts => to_names(&port_call),
                ReportType::EtaUpdate => to_names(&[VOYAGE_INFORMATION, ETA]),
                ReportType::BeginOfSeaPassage
                | ReportType::EndOfSeaPassage
                | ReportType::BeginOfOffhire
                | ReportType::EndOfOffhire
                | ReportType::BeginAnchoringDrifting
                | ReportType::EndAnchoringDrifting
                | ReportType::BeginCanalPassage
                | ReportType::EndCanalPassage
                | ReportType::BeginFuelChangeover
                | ReportType::EndFuelChangeover
                | ReportType::Bunkering => to_names(&event),
                _ => to_names(&full),
            };
            sections_by_type.insert(t, sections);
        }

        Self { sections_by_type }
    }

    /// Ordered section list for a report type. Never empty.
    pub fn get_sections(&self, report_type: ReportType) -> &[String] {
        // Every variant is registered in new(); the map lookup cannot miss.
        self.sections_by_type
            .get(&report_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// String entry point for callers holding a raw name.
    pub fn get_sections_by_name(&self, report_type: &str) -> SchemaResult<&[String]> {
        let t = ReportType::from_str(report_type).map_err(|_| SchemaError::UnknownReportType {
            name: report_type.to_string(),
        })?;
        Ok(self.get_sections(t))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
