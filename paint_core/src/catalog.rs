//! # Painting Catalog
//!
//! In-memory catalog of profiles with their precomputed paintable perimeter
//! and area. Entries are keyed by UUID and deduplicated by catalog code.
//!
//! ## Structure
//!
//! ```text
//! PaintCatalog
//! ├── meta: CatalogMetadata (version, name, timestamps)
//! ├── entries: HashMap<Uuid, CatalogEntry>
//! └── code index: HashMap<String, Uuid> (rebuilt on load, not serialized)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use paint_core::catalog::{CatalogEntry, PaintCatalog};
//! use paint_core::profiles::{Dimensions, ProfileType};
//!
//! let mut catalog = PaintCatalog::new("Perfis padrão");
//! let dims = Dimensions { leg1: Some(50.0), leg2: Some(50.0), ..Default::default() };
//! let entry = CatalogEntry::from_geometry(ProfileType::Angle, &dims)?;
//!
//! let id = catalog.add_entry(entry).expect("new code");
//! assert_eq!(catalog.find_by_code("L-50x50").map(|e| e.id), Some(id));
//! # Ok::<(), paint_core::errors::CalcError>(())
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::surface_area;
use crate::errors::CalcResult;
use crate::profiles::{Dimensions, Profile, ProfileType};

/// Current schema version for serialized catalogs
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One catalog row: a profile and its paint-relevant geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: Uuid,

    /// Deduplication key, e.g. "UE-100x40x10"
    pub code: String,

    pub description: String,

    pub profile_type: ProfileType,

    /// Dimensions as received (mm)
    pub dimensions: Dimensions,

    /// Paintable perimeter (m)
    pub perimeter_m: f64,

    /// Paintable area per linear metre (m²/m), per piece for plates
    pub area_per_meter_m2: f64,

    pub created: DateTime<Utc>,
}

impl CatalogEntry {
    /// Build an entry by running the surface-area calculation and naming.
    pub fn from_geometry(profile_type: ProfileType, dims: &Dimensions) -> CalcResult<Self> {
        let profile = Profile::from_dimensions(profile_type, dims)?;
        let surface = surface_area::calculate_profile(&profile)?;

        Ok(CatalogEntry {
            id: Uuid::new_v4(),
            code: profile.code(),
            description: profile.description(),
            profile_type,
            dimensions: *dims,
            perimeter_m: surface.perimeter_m,
            area_per_meter_m2: surface.area_per_meter_m2,
            created: Utc::now(),
        })
    }
}

/// Catalog metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Catalog name
    pub name: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Root catalog container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CatalogData")]
pub struct PaintCatalog {
    pub meta: CatalogMetadata,

    /// All entries, keyed by UUID
    entries: HashMap<Uuid, CatalogEntry>,

    #[serde(skip)]
    code_index: HashMap<String, Uuid>,
}

/// Serialized form of [`PaintCatalog`]
#[derive(Deserialize)]
struct CatalogData {
    meta: CatalogMetadata,
    entries: HashMap<Uuid, CatalogEntry>,
}

impl From<CatalogData> for PaintCatalog {
    fn from(data: CatalogData) -> Self {
        let code_index = data
            .entries
            .values()
            .map(|e| (e.code.clone(), e.id))
            .collect();
        PaintCatalog {
            meta: data.meta,
            entries: data.entries,
            code_index,
        }
    }
}

impl PaintCatalog {
    /// Create a new empty catalog.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        PaintCatalog {
            meta: CatalogMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                created: now,
                modified: now,
            },
            entries: HashMap::new(),
            code_index: HashMap::new(),
        }
    }

    /// Add an entry unless its code is already present.
    ///
    /// Returns `Ok(id)` for a new entry, or `Err(existing_id)` when an entry
    /// with the same code exists (the new entry is dropped).
    pub fn add_entry(&mut self, entry: CatalogEntry) -> Result<Uuid, Uuid> {
        if let Some(existing) = self.code_index.get(&entry.code) {
            return Err(*existing);
        }
        let id = entry.id;
        self.code_index.insert(entry.code.clone(), id);
        self.entries.insert(id, entry);
        self.touch();
        Ok(id)
    }

    /// Remove an entry by UUID.
    pub fn remove_entry(&mut self, id: &Uuid) -> Option<CatalogEntry> {
        let entry = self.entries.remove(id)?;
        self.code_index.remove(&entry.code);
        self.touch();
        Some(entry)
    }

    pub fn get_entry(&self, id: &Uuid) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    /// Look up an entry by catalog code (exact match)
    pub fn find_by_code(&self, code: &str) -> Option<&CatalogEntry> {
        self.code_index.get(code).and_then(|id| self.entries.get(id))
    }

    /// Iterate over all entries in no particular order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// All entries of one profile type, sorted by code
    pub fn entries_of_type(&self, profile_type: ProfileType) -> Vec<&CatalogEntry> {
        let mut entries: Vec<_> = self
            .entries
            .values()
            .filter(|e| e.profile_type == profile_type)
            .collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for PaintCatalog {
    fn default() -> Self {
        PaintCatalog::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle(leg: f64) -> CatalogEntry {
        let dims = Dimensions { leg1: Some(leg), leg2: Some(leg), ..Default::default() };
        CatalogEntry::from_geometry(ProfileType::Angle, &dims).unwrap()
    }

    #[test]
    fn test_entry_from_geometry() {
        let dims = Dimensions { width: Some(1000.0), height: Some(2000.0), ..Default::default() };
        let entry = CatalogEntry::from_geometry(ProfileType::Plate, &dims).unwrap();
        assert_eq!(entry.code, "CH-1000x2000");
        assert_eq!(entry.description, "Chapa 1000x2000 mm");
        assert_eq!(entry.perimeter_m, 0.0);
        assert_eq!(entry.area_per_meter_m2, 4.0);
    }

    #[test]
    fn test_add_deduplicates_by_code() {
        let mut catalog = PaintCatalog::new("Teste");
        let first = catalog.add_entry(angle(50.0)).unwrap();
        let dup = catalog.add_entry(angle(50.0));
        assert_eq!(dup, Err(first));
        assert_eq!(catalog.entry_count(), 1);

        catalog.add_entry(angle(38.1)).unwrap();
        assert_eq!(catalog.entry_count(), 2);
    }

    #[test]
    fn test_add_remove_entry() {
        let mut catalog = PaintCatalog::new("Teste");
        let id = catalog.add_entry(angle(50.0)).unwrap();
        assert!(catalog.get_entry(&id).is_some());

        let removed = catalog.remove_entry(&id);
        assert!(removed.is_some());
        assert_eq!(catalog.entry_count(), 0);
        assert!(catalog.find_by_code("L-50x50").is_none());

        // the code is free again once its entry is gone
        assert!(catalog.add_entry(angle(50.0)).is_ok());
        assert_eq!(catalog.entries().count(), 1);
    }

    #[test]
    fn test_entries_of_type_sorted() {
        let mut catalog = PaintCatalog::new("Teste");
        catalog.add_entry(angle(76.2)).unwrap();
        catalog.add_entry(angle(38.1)).unwrap();
        let dims = Dimensions { diameter: Some(20.0), ..Default::default() };
        catalog
            .add_entry(CatalogEntry::from_geometry(ProfileType::RoundBar, &dims).unwrap())
            .unwrap();

        let codes: Vec<_> = catalog
            .entries_of_type(ProfileType::Angle)
            .iter()
            .map(|e| e.code.as_str())
            .collect();
        assert_eq!(codes, ["L-38.1x38.1", "L-76.2x76.2"]);
    }

    #[test]
    fn test_catalog_serialization() {
        let mut catalog = PaintCatalog::new("Perfis");
        catalog.add_entry(angle(50.0)).unwrap();
        let json = serde_json::to_string_pretty(&catalog).unwrap();
        assert!(json.contains("L-50x50"));

        assert!(!json.contains("code_index"));

        let mut roundtrip: PaintCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.name, "Perfis");
        assert_eq!(roundtrip.entry_count(), 1);
        assert!(roundtrip.find_by_code("L-50x50").is_some());
        assert!(roundtrip.add_entry(angle(50.0)).is_err());
    }
}
