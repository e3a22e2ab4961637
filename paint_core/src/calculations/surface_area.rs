//! # Surface Area Calculation
//!
//! Converts profile geometry into paintable perimeter (m), area per linear
//! metre (m²/m) and total area (m²). Callers run the three steps in sequence:
//!
//! ```rust
//! use paint_core::calculations::surface_area::{
//!     calculate_area_per_linear_meter, calculate_perimeter, calculate_total_area,
//! };
//! use paint_core::profiles::{Dimensions, ProfileType};
//!
//! let dims = Dimensions { diameter: Some(100.0), ..Default::default() };
//!
//! let perimeter = calculate_perimeter(ProfileType::RoundBar, &dims)?;
//! let area = calculate_area_per_linear_meter(ProfileType::RoundBar, &dims, perimeter)?;
//! let total = calculate_total_area(area, 10.0, 6.0, ProfileType::RoundBar)?;
//!
//! assert_eq!(perimeter, 0.628);
//! assert_eq!(total, 37.68);
//! # Ok::<(), paint_core::errors::CalcError>(())
//! ```
//!
//! ## Rounding
//!
//! Intermediate math runs at full precision. Rounding is applied only to the
//! returned values: perimeter to 3 decimals, plate area to 4, total area to 2.

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::profiles::{Dimensions, Profile, ProfileType};
use crate::units::{
    round_to, Meters, Millimeters, PLATE_AREA_DECIMALS, TOTAL_AREA_DECIMALS,
};

/// Perimeter and area per linear metre for one profile.
///
/// ## JSON Example
///
/// ```json
/// { "profile_type": "FR", "perimeter_m": 0.628, "area_per_meter_m2": 0.628 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceAreaResult {
    /// Profile the values were computed for
    pub profile_type: ProfileType,

    /// Paintable perimeter (m), 3 decimals. Always 0 for plates.
    pub perimeter_m: f64,

    /// Paintable area per linear metre (m²/m). For plates: area of both faces of one piece.
    pub area_per_meter_m2: f64,
}

impl SurfaceAreaResult {
    /// Total paintable area for `quantity` pieces of `length_m` metres
    pub fn total_area_m2(&self, quantity: f64, length_m: f64) -> CalcResult<f64> {
        calculate_total_area(self.area_per_meter_m2, quantity, length_m, self.profile_type)
    }
}

/// Paintable perimeter in metres, rounded to 3 decimals.
///
/// Plates need no dimensions here and always return 0; their area comes
/// from [`calculate_area_per_linear_meter`].
///
/// # Errors
///
/// * `CalcError::MissingDimension` - a required field for the type is absent
/// * `CalcError::InvalidInput` - a dimension is zero, negative or not finite,
///   or the perimeter overflows
pub fn calculate_perimeter(profile_type: ProfileType, dims: &Dimensions) -> CalcResult<f64> {
    if profile_type.is_area_rated() {
        return Ok(0.0);
    }
    let profile = Profile::from_dimensions(profile_type, dims)?;
    profile.perimeter_m()
}

/// Same as [`calculate_perimeter`] but starting from a raw type tag.
///
/// # Errors
///
/// * `CalcError::UnknownProfileType` - the tag is not a known profile
pub fn calculate_perimeter_for_tag(tag: &str, dims: &Dimensions) -> CalcResult<f64> {
    let profile_type = ProfileType::from_tag(tag)?;
    calculate_perimeter(profile_type, dims)
}

/// Paintable area per linear metre (m²/m).
///
/// For plates this is `width × height × 2` (both faces) in m², rounded to
/// 4 decimals. Every other profile returns `perimeter_m` unchanged, since a
/// one-metre piece has an area equal to its perimeter.
pub fn calculate_area_per_linear_meter(
    profile_type: ProfileType,
    dims: &Dimensions,
    perimeter_m: f64,
) -> CalcResult<f64> {
    if !profile_type.is_area_rated() {
        return Ok(perimeter_m);
    }
    let profile = Profile::from_dimensions(profile_type, dims)?;
    plate_area_m2(&profile)
}

/// Total paintable area (m²), rounded to 2 decimals.
///
/// Plates are rated per piece, so `length_m` is ignored for them.
///
/// # Errors
///
/// * `CalcError::InvalidQuantity` - negative or non-finite quantity or length
/// * `CalcError::InvalidInput` - negative area per metre, or the product overflows
pub fn calculate_total_area(
    area_per_meter_m2: f64,
    quantity: f64,
    length_m: f64,
    profile_type: ProfileType,
) -> CalcResult<f64> {
    if !area_per_meter_m2.is_finite() || area_per_meter_m2 < 0.0 {
        return Err(CalcError::invalid_input(
            "area_per_meter_m2",
            area_per_meter_m2.to_string(),
            "Area per metre cannot be negative",
        ));
    }
    require_non_negative("quantity", quantity)?;

    let total = if profile_type.is_area_rated() {
        quantity * area_per_meter_m2
    } else {
        require_non_negative("length_m", length_m)?;
        quantity * area_per_meter_m2 * length_m
    };

    ensure_finite("total_area_m2", round_to(total, TOTAL_AREA_DECIMALS))
}

/// Run perimeter then area for a type and its sparse dimensions.
pub fn calculate(profile_type: ProfileType, dims: &Dimensions) -> CalcResult<SurfaceAreaResult> {
    let perimeter_m = calculate_perimeter(profile_type, dims)?;
    let area_per_meter_m2 = calculate_area_per_linear_meter(profile_type, dims, perimeter_m)?;
    Ok(SurfaceAreaResult {
        profile_type,
        perimeter_m,
        area_per_meter_m2,
    })
}

/// Run perimeter then area for an already typed profile.
pub fn calculate_profile(profile: &Profile) -> CalcResult<SurfaceAreaResult> {
    profile.validate()?;
    let perimeter_m = profile.perimeter_m()?;
    let area_per_meter_m2 = match profile {
        Profile::Plate { .. } => plate_area_m2(profile)?,
        _ => perimeter_m,
    };
    Ok(SurfaceAreaResult {
        profile_type: profile.profile_type(),
        perimeter_m,
        area_per_meter_m2,
    })
}

fn plate_area_m2(profile: &Profile) -> CalcResult<f64> {
    match *profile {
        Profile::Plate { width_mm, height_mm, .. } => {
            let width: Meters = Millimeters(width_mm).into();
            let height: Meters = Millimeters(height_mm).into();
            let both_faces = (width * height) * 2.0;
            ensure_finite("area_per_meter_m2", both_faces.rounded(PLATE_AREA_DECIMALS).value())
        }
        _ => Ok(0.0),
    }
}

fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_quantity(field, value))
    }
}
