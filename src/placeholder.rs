//! Placeholder value generation.
//!
//! Produces plausible sample values for form fields so a report can be
//! prefilled for demos and tests. Numeric samples respect the catalog range
//! rules, and a prefilled instance always carries a Total Fuel ROB that
//! reconciles with its sampled tank figures.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use report_types::{FieldKind, FieldValue, ReportInstance, ReportType};

use crate::catalog::{FieldCatalog, FieldDef, FUEL_TYPES};
use crate::error::SchemaResult;
use crate::schema::SchemaRegistry;

const VESSEL_NAMES: [&str; 5] = [
    "MV Northern Light",
    "MV Baltic Trader",
    "MV Coral Wind",
    "MV Pacific Dawn",
    "MV Iron Gull",
];

const PORTS: [&str; 6] = [
    "Rotterdam",
    "Singapore",
    "Santos",
    "Houston",
    "Fujairah",
    "Busan",
];

const CARGOES: [&str; 4] = ["Iron ore", "Grain in bulk", "Coal", "Containers"];

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn sample_text(name: &str) -> String {
    let mut rng = rand::thread_rng();
    match name {
        "Vessel Name" => VESSEL_NAMES
            .choose(&mut rng)
            .copied()
            .unwrap_or(VESSEL_NAMES[0])
            .to_string(),
        "IMO Number" => format!("{}", rng.gen_range(9_000_000..10_000_000)),
        "Voyage Number" => format!("{:03}{}", rng.gen_range(1..400), {
            *['E', 'W', 'N', 'S'].choose(&mut rng).unwrap_or(&'E')
        }),
        "Next Port" => PORTS.choose(&mut rng).copied().unwrap_or(PORTS[0]).to_string(),
        "Cargo Description" => CARGOES
            .choose(&mut rng)
            .copied()
            .unwrap_or(CARGOES[0])
            .to_string(),
        "Remarks" => "NIL".to_string(),
        "Master" => "J. Halvorsen".to_string(),
        _ => "N/A".to_string(),
    }
}

/// Generate a plausible sample value for one field definition.
pub fn sample_value(def: &FieldDef) -> FieldValue {
    let mut rng = rand::thread_rng();
    match &def.kind {
        FieldKind::Text => FieldValue::Text(sample_text(&def.name)),
        FieldKind::Integer => {
            let (min, max) = def
                .range
                .map(|r| (r.min as i64, r.max as i64))
                .unwrap_or((0, 10));
            FieldValue::Integer(rng.gen_range(min..=max))
        }
        FieldKind::Decimal => {
            let (min, max) = def.range.map(|r| (r.min, r.max)).unwrap_or((0.0, 100.0));
            FieldValue::Decimal(round1(rng.gen_range(min..=max)))
        }
        FieldKind::Date => FieldValue::Date(Utc::now().date_naive()),
        FieldKind::Time => FieldValue::Time(Utc::now().time()),
        FieldKind::Enum(options) => FieldValue::Choice(
            options
                .choose(&mut rng)
                .cloned()
                .unwrap_or_default(),
        ),
    }
}

/// Build a fully prefilled instance for a report type.
///
/// Every field of every applicable section is sampled; the Total Fuel ROB
/// figure is then overwritten with the sum of the sampled tank quantities so
/// the instance passes the ROB reconciliation.
pub fn sample_instance(
    catalog: &FieldCatalog,
    registry: &SchemaRegistry,
    report_type: ReportType,
) -> SchemaResult<ReportInstance> {
    let mut instance = ReportInstance::new(report_type);
    for section_name in registry.get_sections(report_type) {
        let section = catalog.get_fields(section_name)?;
        for (key, def) in section.field_keys() {
            instance.set_value(key, sample_value(def));
        }
    }

    if instance.value(&FieldCatalog::total_rob_key()).is_some() {
        let total: f64 = FUEL_TYPES
            .iter()
            .filter_map(|fuel| instance.numeric_value(&FieldCatalog::rob_field_key(fuel)))
            .sum();
        instance.set_value(FieldCatalog::total_rob_key(), FieldValue::Decimal(round1(total)));
    }

    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation;

    #[test]
    fn test_sampled_numerics_respect_bounds() {
        let catalog = FieldCatalog::new();
        for _ in 0..100 {
            for section in catalog.sections() {
                for (key, def) in section.field_keys() {
                    let value = sample_value(def);
                    if let (Some(range), Some(v)) = (def.range, value.as_f64()) {
                        assert!(range.contains(v), "{} sampled {} out of range", key, v);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sample_instance_reconciles_rob() {
        let catalog = FieldCatalog::new();
        let registry = SchemaRegistry::new();
        for _ in 0..20 {
            let instance =
                sample_instance(&catalog, &registry, ReportType::NoonSeaPassage).unwrap();
            assert!(validation::validate_rob_consistency(&instance).is_ok());
        }
    }

    #[test]
    fn test_sample_instance_has_no_range_warnings() {
        let catalog = FieldCatalog::new();
        let registry = SchemaRegistry::new();
        let instance = sample_instance(&catalog, &registry, ReportType::Departure).unwrap();
        assert!(validation::check_ranges(&catalog, &instance).is_empty());
    }

    #[test]
    fn test_eta_update_samples_only_its_sections() {
        let catalog = FieldCatalog::new();
        let registry = SchemaRegistry::new();
        let instance = sample_instance(&catalog, &registry, ReportType::EtaUpdate).unwrap();
        // Voyage Information (5 fields) + ETA (3 fields)
        assert_eq!(instance.len(), 8);
        assert!(instance.value("Position.Latitude").is_none());
    }

    #[test]
    fn test_enum_fields_sample_a_listed_option() {
        let catalog = FieldCatalog::new();
        let section = catalog.get_fields(crate::catalog::WEATHER).unwrap();
        let (_, wind_dir) = section
            .field_keys()
            .into_iter()
            .find(|(key, _)| key.ends_with("Wind Direction"))
            .unwrap();
        for _ in 0..50 {
            match sample_value(wind_dir) {
                FieldValue::Choice(c) => match &wind_dir.kind {
                    FieldKind::Enum(options) => assert!(options.contains(&c)),
                    _ => unreachable!(),
                },
                other => panic!("expected a choice, got {:?}", other),
            }
        }
    }
}
