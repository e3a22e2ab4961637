//! # Painting Line Estimate
//!
//! Sizes one painting line item of a budget: a profile, how many pieces and
//! how long they are. Produces the paintable area and the paint volume for
//! the configured paint system. Pricing and BDI are left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use paint_core::calculations::painting_line::{calculate, PaintingLineInput};
//! use paint_core::profiles::{Dimensions, ProfileType};
//! use paint_core::settings::EstimateSettings;
//!
//! let input = PaintingLineInput {
//!     label: "Guarda-corpo".to_string(),
//!     profile_type: ProfileType::RoundBar,
//!     dimensions: Dimensions { diameter: Some(100.0), ..Default::default() },
//!     quantity: 10.0,
//!     length_m: Some(6.0),
//! };
//!
//! let result = calculate(&input, &EstimateSettings::default())?;
//! assert_eq!(result.total_area_m2, 37.68);
//! # Ok::<(), paint_core::errors::CalcError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::surface_area;
use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::profiles::{Dimensions, Profile, ProfileType};
use crate::settings::EstimateSettings;
use crate::units::{round_to, TOTAL_AREA_DECIMALS};

/// Input parameters for one painting line.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Terças cobertura",
///   "profile_type": "UE",
///   "dimensions": { "height": 100, "flange": 40, "stiffener_lip": 15 },
///   "quantity": 24,
///   "length_m": 6.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintingLineInput {
    /// User label for this line
    #[serde(default)]
    pub label: String,

    /// Profile type tag
    pub profile_type: ProfileType,

    /// Sparse dimensions (mm)
    #[serde(default)]
    pub dimensions: Dimensions,

    /// Number of pieces
    pub quantity: f64,

    /// Piece length (m). Falls back to the configured bar length when absent.
    #[serde(default)]
    pub length_m: Option<f64>,
}

impl PaintingLineInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(CalcError::invalid_quantity("quantity", self.quantity));
        }
        if let Some(length_m) = self.length_m {
            if !self.profile_type.is_area_rated() && (!length_m.is_finite() || length_m < 0.0) {
                return Err(CalcError::invalid_quantity("length_m", length_m));
            }
        }
        Ok(())
    }

    /// Parse one line from loosely typed JSON.
    ///
    /// An unrecognised `profile_type` is reported as `UnknownProfileType`
    /// rather than a generic serialization error.
    pub fn from_json(value: &serde_json::Value) -> CalcResult<Self> {
        if let Some(tag) = value.get("profile_type").and_then(|v| v.as_str()) {
            ProfileType::from_tag(tag)?;
        }
        Ok(PaintingLineInput::deserialize(value)?)
    }

    /// Effective piece length, using the settings default when none is given
    pub fn effective_length_m(&self, settings: &EstimateSettings) -> f64 {
        self.length_m.unwrap_or(settings.default_bar_length_m)
    }
}

/// Results for one painting line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintingLineResult {
    /// Line label copied from the input
    pub label: String,

    /// Catalog code of the profile
    pub code: String,

    /// Catalog description of the profile
    pub description: String,

    /// Paintable perimeter (m)
    pub perimeter_m: f64,

    /// Paintable area per linear metre (m²/m), per piece for plates
    pub area_per_meter_m2: f64,

    /// Length used for the line (m)
    pub length_m: f64,

    /// Paintable surface (m²)
    pub total_area_m2: f64,

    /// Surface times number of coats (m²)
    pub painted_area_m2: f64,

    /// Paint volume including losses (L)
    pub paint_liters: f64,
}

/// Calculate one painting line.
///
/// # Returns
///
/// * `Ok(PaintingLineResult)` - Areas and paint volume
/// * `Err(CalcError)` - Invalid settings, dimensions or quantities
pub fn calculate(input: &PaintingLineInput, settings: &EstimateSettings) -> CalcResult<PaintingLineResult> {
    settings.validate()?;
    input.validate()?;

    let profile = Profile::from_dimensions(input.profile_type, &input.dimensions)?;
    let surface = surface_area::calculate_profile(&profile)?;

    let length_m = input.effective_length_m(settings);
    let total_area_m2 = surface.total_area_m2(input.quantity, length_m)?;

    let system = &settings.paint_system;
    let painted = total_area_m2 * system.coats as f64;
    let liters = painted / system.yield_m2_per_liter * (1.0 + system.loss_percent / 100.0);
    let painted_area_m2 = ensure_finite("painted_area_m2", round_to(painted, TOTAL_AREA_DECIMALS))?;
    let paint_liters = ensure_finite("paint_liters", round_to(liters, TOTAL_AREA_DECIMALS))?;

    Ok(PaintingLineResult {
        label: input.label.clone(),
        code: profile.code(),
        description: profile.description(),
        perimeter_m: surface.perimeter_m,
        area_per_meter_m2: surface.area_per_meter_m2,
        length_m,
        total_area_m2,
        painted_area_m2,
        paint_liters,
    })
}
