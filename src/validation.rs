//! Value Validator
//!
//! Pure checks over a populated report instance. Generic range violations
//! are surfaced as non-blocking warnings; only the ROB reconciliation check
//! blocks submission. The caller is responsible for surfacing messages and
//! re-prompting.

use report_types::{FieldValue, FieldWarning, ReportInstance, WarningSeverity};

use crate::catalog::{FieldCatalog, FUEL_TYPES};

/// Absolute tolerance for the ROB reconciliation, accounting for rounding
/// of individually entered tank figures.
pub const ROB_TOLERANCE_MT: f64 = 0.1;

/// Verdict of a single-field range check.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCheck {
    Ok,
    OutOfRange { min: f64, max: f64, value: f64 },
}

impl FieldCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, FieldCheck::Ok)
    }
}

/// Verdict of the ROB reconciliation check.
#[derive(Debug, Clone, PartialEq)]
pub enum RobCheck {
    Ok,
    Mismatch { calculated: f64, reported: f64 },
}

impl RobCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, RobCheck::Ok)
    }
}

/// Check one field value against its registered range rule, if any.
///
/// Fields without a rule, and non-numeric values, always pass. An
/// out-of-range verdict is informational; it never blocks submission.
pub fn validate_field(catalog: &FieldCatalog, field_name: &str, value: &FieldValue) -> FieldCheck {
    let Some(rule) = catalog.get_validation_rule(field_name) else {
        return FieldCheck::Ok;
    };
    let Some(numeric) = value.as_f64() else {
        return FieldCheck::Ok;
    };
    if rule.contains(numeric) {
        FieldCheck::Ok
    } else {
        FieldCheck::OutOfRange {
            min: rule.min,
            max: rule.max,
            value: numeric,
        }
    }
}

/// Range-check every filled field of an instance, collecting warnings.
pub fn check_ranges(catalog: &FieldCatalog, instance: &ReportInstance) -> Vec<FieldWarning> {
    let mut warnings = Vec::new();
    for (key, value) in &instance.values {
        if let FieldCheck::OutOfRange { min, max, value } = validate_field(catalog, key, value) {
            warnings.push(FieldWarning::new(
                key.clone(),
                format!("value {} outside expected range [{}, {}]", value, min, max),
                WarningSeverity::Warning,
            ));
        }
    }
    warnings
}

/// Reconcile the per-fuel ROB figures against the separately entered total.
///
/// The individually reported tank quantities are summed across fuel grades
/// (missing entries count as zero) and compared to the "Total Fuel ROB"
/// field. A difference beyond [`ROB_TOLERANCE_MT`] blocks submission. When
/// no total was entered there is nothing to reconcile.
pub fn validate_rob_consistency(instance: &ReportInstance) -> RobCheck {
    let Some(reported) = instance.numeric_value(&FieldCatalog::total_rob_key()) else {
        return RobCheck::Ok;
    };

    let calculated: f64 = FUEL_TYPES
        .iter()
        .filter_map(|fuel| instance.numeric_value(&FieldCatalog::rob_field_key(fuel)))
        .sum();

    if (calculated - reported).abs() > ROB_TOLERANCE_MT {
        RobCheck::Mismatch {
            calculated,
            reported,
        }
    } else {
        RobCheck::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_types::ReportType;

    fn catalog() -> FieldCatalog {
        FieldCatalog::new()
    }

    #[test]
    fn test_validate_field_within_bounds() {
        let catalog = catalog();
        assert!(validate_field(&catalog, "Latitude", &FieldValue::Decimal(51.9)).is_ok());
        // Bounds are inclusive on both ends.
        assert!(validate_field(&catalog, "Latitude", &FieldValue::Decimal(-90.0)).is_ok());
        assert!(validate_field(&catalog, "Latitude", &FieldValue::Decimal(90.0)).is_ok());
    }

    #[test]
    fn test_validate_field_out_of_range_is_flagged() {
        let catalog = catalog();
        let check = validate_field(&catalog, "Latitude", &FieldValue::Decimal(95.0));
        assert_eq!(
            check,
            FieldCheck::OutOfRange {
                min: -90.0,
                max: 90.0,
                value: 95.0
            }
        );
    }

    #[test]
    fn test_validate_field_without_rule_passes() {
        let catalog = catalog();
        assert!(validate_field(
            &catalog,
            "Remarks",
            &FieldValue::Text("all well".to_string())
        )
        .is_ok());
        // Non-numeric values are never range checked.
        assert!(validate_field(
            &catalog,
            "Latitude",
            &FieldValue::Text("fifty one".to_string())
        )
        .is_ok());
    }

    #[test]
    fn test_check_ranges_collects_warnings() {
        let catalog = catalog();
        let mut instance = ReportInstance::new(ReportType::NoonSeaPassage);
        instance.set_value("Position.Latitude", FieldValue::Decimal(51.9));
        instance.set_value("Position.Longitude", FieldValue::Decimal(190.0));
        instance.set_value("Weather.Wind Force", FieldValue::Integer(14));

        let warnings = check_ranges(&catalog, &instance);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.severity == WarningSeverity::Warning));
        assert!(warnings
            .iter()
            .any(|w| w.field_key == "Position.Longitude"));
    }

    fn instance_with_robs(robs: &[(&str, f64)], total: f64) -> ReportInstance {
        let mut instance = ReportInstance::new(ReportType::NoonSeaPassage);
        for (fuel, qty) in robs {
            instance.set_value(FieldCatalog::rob_field_key(fuel), FieldValue::Decimal(*qty));
        }
        instance.set_value(FieldCatalog::total_rob_key(), FieldValue::Decimal(total));
        instance
    }

    #[test]
    fn test_rob_consistency_exact_total() {
        let instance = instance_with_robs(&[("HSFO", 612.3), ("MGO", 85.2)], 697.5);
        assert!(validate_rob_consistency(&instance).is_ok());
    }

    #[test]
    fn test_rob_consistency_within_tolerance() {
        let instance = instance_with_robs(&[("HSFO", 612.3), ("MGO", 85.2)], 697.55);
        assert!(validate_rob_consistency(&instance).is_ok());
    }

    #[test]
    fn test_rob_consistency_mismatch_blocks() {
        let instance = instance_with_robs(&[("HSFO", 612.3), ("MGO", 85.2)], 700.0);
        let check = validate_rob_consistency(&instance);
        match check {
            RobCheck::Mismatch {
                calculated,
                reported,
            } => {
                assert!((calculated - 697.5).abs() < 1e-9);
                assert_eq!(reported, 700.0);
            }
            RobCheck::Ok => panic!("expected mismatch"),
        }
    }

    #[test]
    fn test_rob_consistency_missing_total_passes() {
        let mut instance = ReportInstance::new(ReportType::NoonSeaPassage);
        instance.set_value(
            FieldCatalog::rob_field_key("HSFO"),
            FieldValue::Decimal(612.3),
        );
        assert!(validate_rob_consistency(&instance).is_ok());
    }
}
