//! # Calculations
//!
//! Each calculation follows the same pattern:
//!
//! - inputs are plain, JSON-serializable records
//! - results are plain, JSON-serializable records
//! - `calculate(...) -> CalcResult<...>` is a pure function
//!
//! ## Available Calculations
//!
//! - [`surface_area`] - Paintable perimeter, area per metre and total area of steel profiles
//! - [`painting_line`] - Area and paint volume for one budget line

pub mod painting_line;
pub mod surface_area;

// Re-export commonly used types
pub use painting_line::{PaintingLineInput, PaintingLineResult};
pub use surface_area::{
    calculate_area_per_linear_meter, calculate_perimeter, calculate_perimeter_for_tag,
    calculate_total_area, SurfaceAreaResult,
};
