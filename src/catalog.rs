//! Field Catalog
//!
//! Static definition of every form section, its fields (flat or nested by
//! subsection), and the per-field range rules. The catalog is built once and
//! only ever read; all lookups are pure.

use std::collections::HashMap;

use report_types::FieldKind;
use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};

/// Section name constants shared with the schema registry.
pub const VOYAGE_INFORMATION: &str = "Voyage Information";
pub const POSITION: &str = "Position";
pub const NAVIGATION: &str = "Navigation";
pub const WEATHER: &str = "Weather";
pub const FUEL_ROB: &str = "Fuel ROB";
pub const FUEL_TOTALS: &str = "Fuel Totals";
pub const CARGO: &str = "Cargo";
pub const ETA: &str = "ETA";
pub const REMARKS: &str = "Remarks";

/// Fuel grades tracked per tank group in the nested "Fuel ROB" section.
pub const FUEL_TYPES: [&str; 4] = ["HSFO", "VLSFO", "MGO", "LNG"];

/// Field name holding the remaining-on-board quantity per fuel grade.
pub const ROB_FIELD: &str = "ROB";

/// Field name holding the separately entered fuel total.
pub const TOTAL_FUEL_ROB_FIELD: &str = "Total Fuel ROB";

/// Inclusive numeric bounds for a field. Invariant: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeRule {
    pub min: f64,
    pub max: f64,
}

impl RangeRule {
    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(min <= max, "range rule with min > max");
        Self { min, max }
    }

    /// Whether a numeric value satisfies the rule.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Definition of a single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, unique within its section
    pub name: String,
    /// Tagged value kind, resolved once at catalog-build time
    pub kind: FieldKind,
    /// Optional numeric bounds
    pub range: Option<RangeRule>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            range: None,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(RangeRule::new(min, max));
        self
    }
}

/// Named group of fields inside a nested section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

/// A form section: either a flat ordered field list or named subsections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Section {
    Flat {
        name: String,
        fields: Vec<FieldDef>,
    },
    Nested {
        name: String,
        subsections: Vec<Subsection>,
    },
}

impl Section {
    pub fn name(&self) -> &str {
        match self {
            Section::Flat { name, .. } | Section::Nested { name, .. } => name,
        }
    }

    /// Fully-qualified keys (`section[.subsection].field`) of every field in
    /// catalog order, paired with the field definition.
    pub fn field_keys(&self) -> Vec<(String, &FieldDef)> {
        match self {
            Section::Flat { name, fields } => fields
                .iter()
                .map(|f| (format!("{}.{}", name, f.name), f))
                .collect(),
            Section::Nested { name, subsections } => subsections
                .iter()
                .flat_map(|sub| {
                    sub.fields
                        .iter()
                        .map(move |f| (format!("{}.{}.{}", name, sub.name, f.name), f))
                })
                .collect(),
        }
    }
}

/// Static mapping from section name to field definitions and range rules.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    sections: Vec<Section>,
    by_name: HashMap<String, usize>,
    rules: HashMap<String, RangeRule>,
}

impl FieldCatalog {
    /// Build the full catalog. Sections are registered in form order.
    pub fn new() -> Self {
        let sections = vec![
            Section::Flat {
                name: VOYAGE_INFORMATION.to_string(),
                fields: vec![
                    FieldDef::new("Vessel Name", FieldKind::Text),
                    FieldDef::new("IMO Number", FieldKind::Text),
                    FieldDef::new("Voyage Number", FieldKind::Text),
                    FieldDef::new("Report Date (UTC)", FieldKind::Date),
                    FieldDef::new("Report Time (UTC)", FieldKind::Time),
                ],
            },
            Section::Flat {
                name: POSITION.to_string(),
                fields: vec![
                    FieldDef::new("Latitude", FieldKind::Decimal).with_range(-90.0, 90.0),
                    FieldDef::new("Longitude", FieldKind::Decimal).with_range(-180.0, 180.0),
                    FieldDef::new("Course Over Ground", FieldKind::Decimal)
                        .with_range(0.0, 360.0),
                ],
            },
            Section::Flat {
                name: NAVIGATION.to_string(),
                fields: vec![
                    FieldDef::new("Distance Over Ground", FieldKind::Decimal)
                        .with_range(0.0, 800.0),
                    FieldDef::new("Average Speed", FieldKind::Decimal).with_range(0.0, 30.0),
                    FieldDef::new("Steaming Hours", FieldKind::Decimal).with_range(0.0, 26.0),
                ],
            },
            Section::Flat {
                name: WEATHER.to_string(),
                fields: vec![
                    FieldDef::new(
                        "Wind Direction",
                        FieldKind::Enum(
                            ["N", "NE", "E", "SE", "S", "SW", "W", "NW"]
                                .iter()
                                .map(|s| s.to_string())
                                .collect(),
                        ),
                    ),
                    FieldDef::new("Wind Force", FieldKind::Integer).with_range(0.0, 12.0),
                    FieldDef::new("Sea State", FieldKind::Integer).with_range(0.0, 9.0),
                    FieldDef::new("Swell Height", FieldKind::Decimal).with_range(0.0, 20.0),
                    FieldDef::new("Air Temperature", FieldKind::Decimal).with_range(-50.0, 50.0),
                    FieldDef::new("Barometric Pressure", FieldKind::Decimal)
                        .with_range(900.0, 1100.0),
                ],
            },
            Section::Nested {
                name: FUEL_ROB.to_string(),
                subsections: FUEL_TYPES
                    .iter()
                    .map(|fuel| Subsection {
                        name: fuel.to_string(),
                        fields: vec![
                            FieldDef::new(ROB_FIELD, FieldKind::Decimal).with_range(0.0, 5000.0),
                            FieldDef::new("Consumed", FieldKind::Decimal).with_range(0.0, 250.0),
                        ],
                    })
                    .collect(),
            },
            Section::Flat {
                name: FUEL_TOTALS.to_string(),
                fields: vec![FieldDef::new(TOTAL_FUEL_ROB_FIELD, FieldKind::Decimal)
                    .with_range(0.0, 20000.0)],
            },
            Section::Flat {
                name: CARGO.to_string(),
                fields: vec![
                    FieldDef::new("Cargo Weight", FieldKind::Decimal).with_range(0.0, 500_000.0),
                    FieldDef::new("Cargo Description", FieldKind::Text),
                ],
            },
            Section::Flat {
                name: ETA.to_string(),
                fields: vec![
                    FieldDef::new("Next Port", FieldKind::Text),
                    FieldDef::new("ETA Date", FieldKind::Date),
                    FieldDef::new("ETA Time", FieldKind::Time),
                ],
            },
            Section::Flat {
                name: REMARKS.to_string(),
                fields: vec![
                    FieldDef::new("Remarks", FieldKind::Text),
                    FieldDef::new("Master", FieldKind::Text),
                ],
            },
        ];

        let by_name = sections
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name().to_string(), i))
            .collect();

        let mut rules = HashMap::new();
        for section in &sections {
            for (_, def) in section.field_keys() {
                if let Some(range) = def.range {
                    rules.insert(def.name.clone(), range);
                }
            }
        }

        Self {
            sections,
            by_name,
            rules,
        }
    }

    /// Look up a section by name.
    pub fn get_fields(&self, section_name: &str) -> SchemaResult<&Section> {
        self.by_name
            .get(section_name)
            .map(|&i| &self.sections[i])
            .ok_or_else(|| SchemaError::UnknownSection {
                name: section_name.to_string(),
            })
    }

    /// Range rule registered for a field name, if any. Accepts either a bare
    /// field name or a fully-qualified key.
    pub fn get_validation_rule(&self, field_name: &str) -> Option<&RangeRule> {
        let bare = field_name.rsplit('.').next().unwrap_or(field_name);
        self.rules.get(bare)
    }

    /// All sections in form order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Fully-qualified key of the ROB field for one fuel grade.
    pub fn rob_field_key(fuel: &str) -> String {
        format!("{}.{}.{}", FUEL_ROB, fuel, ROB_FIELD)
    }

    /// Fully-qualified key of the separately entered fuel total.
    pub fn total_rob_key() -> String {
        format!("{}.{}", FUEL_TOTALS, TOTAL_FUEL_ROB_FIELD)
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::new()
    }
}
