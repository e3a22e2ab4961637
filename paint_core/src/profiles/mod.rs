//! # Steel Profiles
//!
//! Profile geometry for the painting engine. Geometry arrives from material
//! services as a sparse [`Dimensions`] record and is converted into the typed
//! [`Profile`] union, which carries exactly the fields each shape needs.
//!
//! ## Supported Profiles
//!
//! | Tag | Profile | Fields (mm) |
//! |-----|---------|-------------|
//! | FR  | Round bar | diameter |
//! | UE  | Stiffened U (lipped channel) | height, flange, stiffener lip |
//! | US  | Plain U channel | height, flange, (stiffener lip = 0) |
//! | CH  | Plate | width, height, (thickness) |
//! | W   | W beam | height |
//! | L   | Angle | leg1, leg2 |
//! | MET | Metalon (square/rectangular tube) | side, or width + height |
//! | TB  | Round tube | diameter |
//!
//! ## Example
//!
//! ```rust
//! use paint_core::profiles::{Dimensions, Profile, ProfileType};
//!
//! let dims = Dimensions {
//!     height: Some(100.0),
//!     flange: Some(40.0),
//!     ..Default::default()
//! };
//!
//! let profile = Profile::from_dimensions(ProfileType::PlainU, &dims)?;
//! assert_eq!(profile, Profile::plain_u(100.0, 40.0));
//! # Ok::<(), paint_core::errors::CalcError>(())
//! ```

pub mod naming;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::str::FromStr;

use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::units::{Meters, Millimeters, PERIMETER_DECIMALS};

pub use naming::{generate_code, generate_description};

/// Stiffener lip assumed for plain U channels when none is given (mm)
pub const PLAIN_U_DEFAULT_LIP_MM: f64 = 0.0;

/// Multiplier used in place of π for round tubes.
///
/// Stored catalog areas were computed with this value, so it must stay 3.0
/// even though round bars use the exact constant.
pub const ROUND_TUBE_PI_APPROX: f64 = 3.0;

/// Height multiplier for the single-parameter W beam perimeter
pub const W_BEAM_HEIGHT_FACTOR: f64 = 6.0;

/// Profile type classification.
///
/// Serializes as its tag. Deserialization goes through
/// [`ProfileType::from_tag`], so JSON accepts the same spellings as the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ProfileType {
    /// Round bar (FR)
    #[serde(rename = "FR")]
    RoundBar,
    /// Lipped U channel (UE)
    #[serde(rename = "UE")]
    StiffenedU,
    /// Plain U channel (US)
    #[serde(rename = "US")]
    PlainU,
    /// Flat plate (CH)
    #[serde(rename = "CH")]
    Plate,
    /// Wide flange beam (W)
    #[serde(rename = "W")]
    WBeam,
    /// Angle (L)
    #[serde(rename = "L")]
    Angle,
    /// Square or rectangular tube (MET)
    #[serde(rename = "MET")]
    Metalon,
    /// Round tube (TB)
    #[serde(rename = "TB")]
    RoundTube,
}

impl ProfileType {
    /// All profile types for iteration
    pub const ALL: [ProfileType; 8] = [
        ProfileType::RoundBar,
        ProfileType::StiffenedU,
        ProfileType::PlainU,
        ProfileType::Plate,
        ProfileType::WBeam,
        ProfileType::Angle,
        ProfileType::Metalon,
        ProfileType::RoundTube,
    ];

    /// Parse from a catalog tag ("FR", "ue", " MET ")
    pub fn from_tag(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "FR" => Ok(ProfileType::RoundBar),
            "UE" => Ok(ProfileType::StiffenedU),
            "US" => Ok(ProfileType::PlainU),
            "CH" => Ok(ProfileType::Plate),
            "W" => Ok(ProfileType::WBeam),
            "L" => Ok(ProfileType::Angle),
            "MET" => Ok(ProfileType::Metalon),
            "TB" => Ok(ProfileType::RoundTube),
            _ => Err(CalcError::unknown_profile_type(s)),
        }
    }

    /// Catalog tag used as code prefix
    pub fn tag(&self) -> &'static str {
        match self {
            ProfileType::RoundBar => "FR",
            ProfileType::StiffenedU => "UE",
            ProfileType::PlainU => "US",
            ProfileType::Plate => "CH",
            ProfileType::WBeam => "W",
            ProfileType::Angle => "L",
            ProfileType::Metalon => "MET",
            ProfileType::RoundTube => "TB",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProfileType::RoundBar => "Barra Redonda",
            ProfileType::StiffenedU => "Perfil U Enrijecido",
            ProfileType::PlainU => "Perfil U Simples",
            ProfileType::Plate => "Chapa",
            ProfileType::WBeam => "Viga W",
            ProfileType::Angle => "Cantoneira",
            ProfileType::Metalon => "Metalon",
            ProfileType::RoundTube => "Tubo Redondo",
        }
    }

    /// Plates are priced by area per piece, everything else by linear metre
    pub fn is_area_rated(&self) -> bool {
        matches!(self, ProfileType::Plate)
    }
}

impl FromStr for ProfileType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileType::from_tag(s)
    }
}

impl TryFrom<String> for ProfileType {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ProfileType::from_tag(&value)
    }
}

impl std::fmt::Display for ProfileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Sparse dimension record as delivered by material services.
///
/// All values are millimetres. Only the fields relevant to the chosen
/// [`ProfileType`] are read; the rest are ignored.
///
/// ## JSON Example
///
/// ```json
/// { "height": 100, "flange": 40, "stiffenerLip": 10 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flange: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "stiffenerLip")]
    pub stiffener_lip: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<f64>,
}

impl Dimensions {
    /// Set a field by its wire name. Returns false for unknown names.
    pub fn set(&mut self, field: &str, value: f64) -> bool {
        let slot = match field {
            "diameter" => &mut self.diameter,
            "height" => &mut self.height,
            "flange" => &mut self.flange,
            "stiffener_lip" | "stiffenerLip" | "lip" => &mut self.stiffener_lip,
            "width" => &mut self.width,
            "thickness" => &mut self.thickness,
            "leg1" => &mut self.leg1,
            "leg2" => &mut self.leg2,
            "side" => &mut self.side,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Tracks absent required fields so they are all reported together.
struct RequiredFields<'a> {
    dims: &'a Dimensions,
    missing: Vec<&'static str>,
}

impl<'a> RequiredFields<'a> {
    fn new(dims: &'a Dimensions) -> Self {
        RequiredFields {
            dims,
            missing: Vec::new(),
        }
    }

    fn take(&mut self, name: &'static str, value: fn(&Dimensions) -> Option<f64>) -> f64 {
        match value(self.dims) {
            Some(v) => v,
            None => {
                self.missing.push(name);
                0.0
            }
        }
    }

    fn finish(self, profile_type: ProfileType) -> CalcResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(CalcError::missing_dimension(profile_type.tag(), self.missing))
        }
    }
}

/// Metalon cross-section variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum MetalonSection {
    /// Square tube
    Square { side_mm: f64 },
    /// Rectangular tube
    Rectangular { width_mm: f64, height_mm: f64 },
}

/// Typed profile geometry. Each variant holds exactly its own dimensions (mm).
///
/// ## JSON Serialization
///
/// ```json
/// { "type": "StiffenedU", "height_mm": 100.0, "flange_mm": 40.0, "lip_mm": 10.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Profile {
    RoundBar {
        diameter_mm: f64,
    },
    StiffenedU {
        height_mm: f64,
        flange_mm: f64,
        lip_mm: f64,
    },
    PlainU {
        height_mm: f64,
        flange_mm: f64,
        lip_mm: f64,
    },
    Plate {
        width_mm: f64,
        height_mm: f64,
        thickness_mm: Option<f64>,
    },
    WBeam {
        height_mm: f64,
    },
    Angle {
        leg1_mm: f64,
        leg2_mm: f64,
    },
    Metalon(MetalonSection),
    RoundTube {
        diameter_mm: f64,
    },
}

impl Profile {
    /// Plain U channel with the default (zero) stiffener lip
    pub fn plain_u(height_mm: f64, flange_mm: f64) -> Self {
        Profile::PlainU {
            height_mm,
            flange_mm,
            lip_mm: PLAIN_U_DEFAULT_LIP_MM,
        }
    }

    /// Square metalon tube
    pub fn metalon_square(side_mm: f64) -> Self {
        Profile::Metalon(MetalonSection::Square { side_mm })
    }

    /// Rectangular metalon tube
    pub fn metalon_rectangular(width_mm: f64, height_mm: f64) -> Self {
        Profile::Metalon(MetalonSection::Rectangular { width_mm, height_mm })
    }

    /// Build a typed profile from a sparse dimension record.
    ///
    /// Every absent required field is reported in one `MissingDimension`
    /// error. Present values are then checked by [`Profile::validate`].
    pub fn from_dimensions(profile_type: ProfileType, dims: &Dimensions) -> CalcResult<Self> {
        let mut req = RequiredFields::new(dims);

        let profile = match profile_type {
            ProfileType::RoundBar => Profile::RoundBar {
                diameter_mm: req.take("diameter", |d| d.diameter),
            },
            ProfileType::StiffenedU => Profile::StiffenedU {
                height_mm: req.take("height", |d| d.height),
                flange_mm: req.take("flange", |d| d.flange),
                lip_mm: req.take("stiffener_lip", |d| d.stiffener_lip),
            },
            ProfileType::PlainU => Profile::PlainU {
                height_mm: req.take("height", |d| d.height),
                flange_mm: req.take("flange", |d| d.flange),
                lip_mm: dims.stiffener_lip.unwrap_or(PLAIN_U_DEFAULT_LIP_MM),
            },
            ProfileType::Plate => Profile::Plate {
                width_mm: req.take("width", |d| d.width),
                height_mm: req.take("height", |d| d.height),
                thickness_mm: dims.thickness,
            },
            ProfileType::WBeam => Profile::WBeam {
                height_mm: req.take("height", |d| d.height),
            },
            ProfileType::Angle => Profile::Angle {
                leg1_mm: req.take("leg1", |d| d.leg1),
                leg2_mm: req.take("leg2", |d| d.leg2),
            },
            ProfileType::Metalon => match dims.side {
                Some(side_mm) => Profile::metalon_square(side_mm),
                None => Profile::metalon_rectangular(
                    req.take("width", |d| d.width),
                    req.take("height", |d| d.height),
                ),
            },
            ProfileType::RoundTube => Profile::RoundTube {
                diameter_mm: req.take("diameter", |d| d.diameter),
            },
        };

        req.finish(profile_type)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Profile type tag for this geometry
    pub fn profile_type(&self) -> ProfileType {
        match self {
            Profile::RoundBar { .. } => ProfileType::RoundBar,
            Profile::StiffenedU { .. } => ProfileType::StiffenedU,
            Profile::PlainU { .. } => ProfileType::PlainU,
            Profile::Plate { .. } => ProfileType::Plate,
            Profile::WBeam { .. } => ProfileType::WBeam,
            Profile::Angle { .. } => ProfileType::Angle,
            Profile::Metalon(_) => ProfileType::Metalon,
            Profile::RoundTube { .. } => ProfileType::RoundTube,
        }
    }

    /// Validate dimension values.
    ///
    /// Main dimensions must be finite and positive. Stiffener lip and plate
    /// thickness may be zero.
    pub fn validate(&self) -> CalcResult<()> {
        match *self {
            Profile::RoundBar { diameter_mm } | Profile::RoundTube { diameter_mm } => {
                positive("diameter", diameter_mm)
            }
            Profile::StiffenedU { height_mm, flange_mm, lip_mm }
            | Profile::PlainU { height_mm, flange_mm, lip_mm } => {
                positive("height", height_mm)?;
                positive("flange", flange_mm)?;
                non_negative("stiffener_lip", lip_mm)
            }
            Profile::Plate { width_mm, height_mm, thickness_mm } => {
                positive("width", width_mm)?;
                positive("height", height_mm)?;
                match thickness_mm {
                    Some(t) => non_negative("thickness", t),
                    None => Ok(()),
                }
            }
            Profile::WBeam { height_mm } => positive("height", height_mm),
            Profile::Angle { leg1_mm, leg2_mm } => {
                positive("leg1", leg1_mm)?;
                positive("leg2", leg2_mm)
            }
            Profile::Metalon(MetalonSection::Square { side_mm }) => positive("side", side_mm),
            Profile::Metalon(MetalonSection::Rectangular { width_mm, height_mm }) => {
                positive("width", width_mm)?;
                positive("height", height_mm)
            }
        }
    }

    /// Paintable perimeter in millimetres at full precision.
    ///
    /// Plates return 0: their area is computed directly from width and height.
    pub fn perimeter_mm(&self) -> Millimeters {
        let mm = match *self {
            Profile::RoundBar { diameter_mm } => diameter_mm * 2.0 * PI,
            Profile::StiffenedU { height_mm, flange_mm, lip_mm }
            | Profile::PlainU { height_mm, flange_mm, lip_mm } => {
                height_mm * 2.0 + flange_mm * 4.0 + lip_mm * 4.0
            }
            Profile::Plate { .. } => 0.0,
            Profile::WBeam { height_mm } => height_mm * W_BEAM_HEIGHT_FACTOR,
            Profile::Angle { leg1_mm, leg2_mm } => leg1_mm * 2.0 + leg2_mm * 2.0,
            Profile::Metalon(MetalonSection::Square { side_mm }) => 4.0 * side_mm,
            Profile::Metalon(MetalonSection::Rectangular { width_mm, height_mm }) => {
                2.0 * (width_mm + height_mm)
            }
            Profile::RoundTube { diameter_mm } => diameter_mm * ROUND_TUBE_PI_APPROX,
        };
        Millimeters(mm)
    }

    /// Paintable perimeter in metres, rounded to 3 decimals.
    ///
    /// Fails with `InvalidInput` when the dimensions are so large that the
    /// perimeter overflows.
    pub fn perimeter_m(&self) -> CalcResult<f64> {
        let perimeter = Meters::from(self.perimeter_mm())
            .rounded(PERIMETER_DECIMALS)
            .value();
        ensure_finite("perimeter_m", perimeter)
    }
}

fn positive(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Dimension must be positive",
        ))
    }
}

fn non_negative(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Dimension cannot be negative",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(pairs: &[(&str, f64)]) -> Dimensions {
        let mut d = Dimensions::default();
        for (name, value) in pairs {
            assert!(d.set(name, *value), "unknown field {}", name);
        }
        d
    }

    #[test]
    fn test_profile_type_parsing() {
        assert_eq!(ProfileType::from_tag("FR").unwrap(), ProfileType::RoundBar);
        assert_eq!(ProfileType::from_tag(" met ").unwrap(), ProfileType::Metalon);
        assert_eq!("tb".parse::<ProfileType>().unwrap(), ProfileType::RoundTube);

        let err = ProfileType::from_tag("HSS").unwrap_err();
        assert_eq!(err, CalcError::unknown_profile_type("HSS"));
    }

    #[test]
    fn test_tags_roundtrip() {
        for ty in ProfileType::ALL {
            assert_eq!(ProfileType::from_tag(ty.tag()).unwrap(), ty);
        }
    }

    #[test]
    fn test_profile_type_serializes_as_tag() {
        let json = serde_json::to_string(&ProfileType::StiffenedU).unwrap();
        assert_eq!(json, "\"UE\"");
        let parsed: ProfileType = serde_json::from_str("\"MET\"").unwrap();
        assert_eq!(parsed, ProfileType::Metalon);
    }

    #[test]
    fn test_profile_type_json_accepts_tag_spellings() {
        let parsed: ProfileType = serde_json::from_str("\" tb \"").unwrap();
        assert_eq!(parsed, ProfileType::RoundTube);

        let err = serde_json::from_str::<ProfileType>("\"IPE\"").unwrap_err();
        assert!(err.to_string().contains("Unknown profile type: 'IPE'"));
    }

    #[test]
    fn test_dimensions_camel_case_alias() {
        let d: Dimensions =
            serde_json::from_str(r#"{"height": 100, "flange": 40, "stiffenerLip": 10}"#).unwrap();
        assert_eq!(d.stiffener_lip, Some(10.0));
        assert_eq!(d.diameter, None);
    }

    #[test]
    fn test_plain_u_default_lip() {
        let d = dims(&[("height", 100.0), ("flange", 40.0)]);
        let profile = Profile::from_dimensions(ProfileType::PlainU, &d).unwrap();
        assert_eq!(profile, Profile::plain_u(100.0, 40.0));
    }

    #[test]
    fn test_stiffened_u_requires_lip() {
        let d = dims(&[("height", 100.0), ("flange", 40.0)]);
        let err = Profile::from_dimensions(ProfileType::StiffenedU, &d).unwrap_err();
        assert_eq!(err.missing_fields(), ["stiffener_lip".to_string()]);
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let err = Profile::from_dimensions(ProfileType::Angle, &Dimensions::default()).unwrap_err();
        assert_eq!(
            err,
            CalcError::missing_dimension("L", ["leg1", "leg2"])
        );
    }

    #[test]
    fn test_metalon_variant_selection() {
        let square = Profile::from_dimensions(
            ProfileType::Metalon,
            &dims(&[("side", 50.0), ("width", 40.0)]),
        )
        .unwrap();
        assert_eq!(square, Profile::metalon_square(50.0));

        let rect = Profile::from_dimensions(
            ProfileType::Metalon,
            &dims(&[("width", 40.0), ("height", 80.0)]),
        )
        .unwrap();
        assert_eq!(rect, Profile::metalon_rectangular(40.0, 80.0));

        let err = Profile::from_dimensions(ProfileType::Metalon, &dims(&[("width", 40.0)])).unwrap_err();
        assert_eq!(err.missing_fields(), ["height".to_string()]);
    }

    #[test]
    fn test_non_positive_dimension_rejected() {
        let err = Profile::from_dimensions(ProfileType::RoundBar, &dims(&[("diameter", 0.0)])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = Profile::from_dimensions(ProfileType::WBeam, &dims(&[("height", f64::NAN)])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = Profile::from_dimensions(
            ProfileType::PlainU,
            &dims(&[("height", 100.0), ("flange", 40.0), ("stiffener_lip", -1.0)]),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_perimeters() {
        let perimeter = |p: Profile| p.perimeter_m().unwrap();
        assert_eq!(perimeter(Profile::RoundBar { diameter_mm: 100.0 }), 0.628);
        assert_eq!(perimeter(Profile::RoundTube { diameter_mm: 100.0 }), 0.3);
        assert_eq!(perimeter(Profile::WBeam { height_mm: 200.0 }), 1.2);
        assert_eq!(perimeter(Profile::Angle { leg1_mm: 50.0, leg2_mm: 30.0 }), 0.16);
        assert_eq!(
            perimeter(Profile::StiffenedU { height_mm: 100.0, flange_mm: 40.0, lip_mm: 10.0 }),
            0.4
        );
        assert_eq!(perimeter(Profile::metalon_square(50.0)), 0.2);
        assert_eq!(perimeter(Profile::metalon_rectangular(40.0, 80.0)), 0.24);
        assert_eq!(
            perimeter(Profile::Plate { width_mm: 1000.0, height_mm: 2000.0, thickness_mm: None }),
            0.0
        );
    }

    #[test]
    fn test_perimeter_overflow_rejected() {
        // 1e308 * 2π overflows f64
        let err = Profile::RoundBar { diameter_mm: 1e308 }.perimeter_m().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(Profile::WBeam { height_mm: 1e308 }.perimeter_m().is_err());
    }

    #[test]
    fn test_profile_serialization() {
        let profile = Profile::StiffenedU { height_mm: 100.0, flange_mm: 40.0, lip_mm: 10.0 };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"type\":\"StiffenedU\""));
        let parsed: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, parsed);
        assert_eq!(parsed.profile_type(), ProfileType::StiffenedU);
    }
}
