//! # paint_core - Painting Surface-Area Engine
//!
//! `paint_core` converts structural-steel profile geometry (round bars, U
//! channels, angles, tubes, plates, W beams) into the paintable perimeter and
//! area that budgeting multiplies by quantities and paint consumption rates.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the offending fields
//! - **Typed Geometry**: Sparse wire dimensions are converted once into a
//!   per-profile union, so formula dispatch is an exhaustive `match`
//!
//! ## Quick Start
//!
//! ```rust
//! use paint_core::calculations::surface_area;
//! use paint_core::profiles::{Dimensions, ProfileType};
//!
//! let dims = Dimensions { side: Some(50.0), ..Default::default() };
//! let result = surface_area::calculate(ProfileType::Metalon, &dims)?;
//!
//! assert_eq!(result.perimeter_m, 0.2);
//! assert_eq!(result.total_area_m2(10.0, 6.0)?, 12.0);
//! # Ok::<(), paint_core::errors::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`profiles`] - Profile types, sparse dimensions, typed geometry, catalog codes
//! - [`calculations`] - Surface-area engine and painting line estimate
//! - [`catalog`] - In-memory catalog of profiles with precomputed areas
//! - [`seeding`] - Bulk catalog population with per-item failure isolation
//! - [`settings`] - Paint system and estimate defaults
//! - [`units`] - Metric unit wrappers and output rounding
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod profiles;
pub mod seeding;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use catalog::{CatalogEntry, PaintCatalog};
pub use errors::{CalcError, CalcResult};
pub use profiles::{Dimensions, Profile, ProfileType};
pub use settings::{EstimateSettings, PaintSystem};
