//! # Bulk Catalog Seeding
//!
//! Populates a [`PaintCatalog`] from generic material records. Each record's
//! category is mapped to a [`ProfileType`], then the surface-area engine and
//! naming run on its dimensions.
//!
//! Failures are isolated per record: a bad record is logged and reported in
//! the [`SeedReport`], and the remaining records are still processed.
//!
//! ## Example
//!
//! ```rust
//! use paint_core::catalog::PaintCatalog;
//! use paint_core::profiles::Dimensions;
//! use paint_core::seeding::{seed_catalog, MaterialRecord};
//!
//! let records = vec![
//!     MaterialRecord::new("Barra 20", "Barra Redonda", Dimensions { diameter: Some(20.0), ..Default::default() }),
//!     MaterialRecord::new("Sem medida", "Cantoneira", Dimensions::default()),
//! ];
//!
//! let mut catalog = PaintCatalog::new("Seed");
//! let report = seed_catalog(&mut catalog, &records);
//! assert_eq!(report.created, 1);
//! assert_eq!(report.failed(), 1);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{CatalogEntry, PaintCatalog};
use crate::errors::{CalcError, CalcResult};
use crate::profiles::{Dimensions, ProfileType};

/// Category names used by material services, normalized (lowercase, no accents)
static CATEGORY_ALIASES: Lazy<HashMap<&'static str, ProfileType>> = Lazy::new(|| {
    let mut map = HashMap::new();
    let aliases: [(&str, ProfileType); 26] = [
        ("barra redonda", ProfileType::RoundBar),
        ("barra", ProfileType::RoundBar),
        ("ferro redondo", ProfileType::RoundBar),
        ("vergalhao", ProfileType::RoundBar),
        ("perfil ue", ProfileType::StiffenedU),
        ("perfil u enrijecido", ProfileType::StiffenedU),
        ("u enrijecido", ProfileType::StiffenedU),
        ("perfil us", ProfileType::PlainU),
        ("perfil u simples", ProfileType::PlainU),
        ("perfil u", ProfileType::PlainU),
        ("u simples", ProfileType::PlainU),
        ("chapa", ProfileType::Plate),
        ("chapa lisa", ProfileType::Plate),
        ("chapa xadrez", ProfileType::Plate),
        ("viga w", ProfileType::WBeam),
        ("perfil w", ProfileType::WBeam),
        ("viga", ProfileType::WBeam),
        ("cantoneira", ProfileType::Angle),
        ("perfil l", ProfileType::Angle),
        ("metalon", ProfileType::Metalon),
        ("tubo quadrado", ProfileType::Metalon),
        ("tubo retangular", ProfileType::Metalon),
        ("tubo redondo", ProfileType::RoundTube),
        ("tubo", ProfileType::RoundTube),
        ("tubo industrial", ProfileType::RoundTube),
        ("cano", ProfileType::RoundTube),
    ];
    for (alias, profile_type) in aliases {
        map.insert(alias, profile_type);
    }
    map
});

/// Generic material as held by a material service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Material name, used in logs and failure reports
    pub name: String,

    /// Free-form category, e.g. "Cantoneira" or "UE"
    pub category: String,

    #[serde(default)]
    pub dimensions: Dimensions,
}

impl MaterialRecord {
    pub fn new(name: impl Into<String>, category: impl Into<String>, dimensions: Dimensions) -> Self {
        MaterialRecord {
            name: name.into(),
            category: category.into(),
            dimensions,
        }
    }
}

/// A record that could not be turned into a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedFailure {
    pub name: String,
    pub error: CalcError,
}

/// Outcome of a seeding batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Entries added to the catalog
    pub created: usize,

    /// Records whose code was already in the catalog
    pub skipped: usize,

    pub failures: Vec<SeedFailure>,
}

impl SeedReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Number of records processed
    pub fn total(&self) -> usize {
        self.created + self.skipped + self.failed()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Map a material category to a profile type.
///
/// Accepts raw tags ("UE", "met") and the category names used by material
/// services ("Perfil U Enrijecido", "Cantoneira", "Tubo Redondo").
pub fn profile_type_for_category(category: &str) -> CalcResult<ProfileType> {
    if let Ok(profile_type) = ProfileType::from_tag(category) {
        return Ok(profile_type);
    }
    let key = normalize(category);
    CATEGORY_ALIASES
        .get(key.as_str())
        .copied()
        .ok_or_else(|| CalcError::unknown_category(category))
}

/// Seed `catalog` from `records`, isolating failures per record.
pub fn seed_catalog(catalog: &mut PaintCatalog, records: &[MaterialRecord]) -> SeedReport {
    let mut report = SeedReport::default();
    for record in records {
        seed_record(catalog, record, &mut report);
    }
    log_summary(&report);
    report
}

/// Seed `catalog` from loosely typed JSON records.
///
/// A record that does not deserialize is reported as a failure under its
/// `name` (or `#<index>` when it has none) and the batch continues.
pub fn seed_catalog_from_json(catalog: &mut PaintCatalog, values: &[serde_json::Value]) -> SeedReport {
    let mut report = SeedReport::default();
    for (index, value) in values.iter().enumerate() {
        match MaterialRecord::deserialize(value) {
            Ok(record) => seed_record(catalog, &record, &mut report),
            Err(err) => {
                let name = value
                    .get("name")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", index));
                let error = CalcError::from(err);
                warn!(material = %name, code = error.error_code(), "skipping material: {}", error);
                report.failures.push(SeedFailure { name, error });
            }
        }
    }
    log_summary(&report);
    report
}

fn seed_record(catalog: &mut PaintCatalog, record: &MaterialRecord, report: &mut SeedReport) {
    match entry_for(record) {
        Ok(entry) => {
            let code = entry.code.clone();
            match catalog.add_entry(entry) {
                Ok(id) => {
                    debug!(material = %record.name, %code, %id, "catalog entry created");
                    report.created += 1;
                }
                Err(existing) => {
                    debug!(material = %record.name, %code, %existing, "code already in catalog");
                    report.skipped += 1;
                }
            }
        }
        Err(error) => {
            warn!(
                material = %record.name,
                category = %record.category,
                code = error.error_code(),
                "skipping material: {}",
                error
            );
            report.failures.push(SeedFailure {
                name: record.name.clone(),
                error,
            });
        }
    }
}

fn log_summary(report: &SeedReport) {
    info!(
        created = report.created,
        skipped = report.skipped,
        failed = report.failed(),
        "catalog seeding finished"
    );
}

fn entry_for(record: &MaterialRecord) -> CalcResult<CatalogEntry> {
    let profile_type = profile_type_for_category(&record.category)?;
    CatalogEntry::from_geometry(profile_type, &record.dimensions)
}

/// Lowercase, trim, collapse whitespace and strip Portuguese accents
fn normalize(s: &str) -> String {
    let folded: String = s
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            _ => c,
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
