//! Catalog code and description strings.
//!
//! Codes are used upstream to deduplicate catalog rows, so both functions are
//! pure and keep a fixed token order per profile type. Numbers print with
//! `f64`'s `Display`, so `100.0` becomes `100` and `1.5` stays `1.5`.

use crate::errors::CalcResult;

use super::{Dimensions, MetalonSection, Profile, ProfileType};

/// Generate the catalog code for a profile, e.g. `UE-100x40x10`.
///
/// # Example
///
/// ```rust
/// use paint_core::profiles::{generate_code, Dimensions, ProfileType};
///
/// let dims = Dimensions {
///     height: Some(100.0),
///     flange: Some(40.0),
///     stiffener_lip: Some(10.0),
///     ..Default::default()
/// };
/// assert_eq!(generate_code(ProfileType::StiffenedU, &dims)?, "UE-100x40x10");
/// # Ok::<(), paint_core::errors::CalcError>(())
/// ```
pub fn generate_code(profile_type: ProfileType, dims: &Dimensions) -> CalcResult<String> {
    let profile = Profile::from_dimensions(profile_type, dims)?;
    Ok(profile.code())
}

/// Generate the human-readable catalog description for a profile.
pub fn generate_description(profile_type: ProfileType, dims: &Dimensions) -> CalcResult<String> {
    let profile = Profile::from_dimensions(profile_type, dims)?;
    Ok(profile.description())
}

impl Profile {
    /// Catalog code: type tag followed by the dimensions in fixed order
    pub fn code(&self) -> String {
        let tag = self.profile_type().tag();
        format!("{}-{}", tag, self.dimension_tokens())
    }

    /// Catalog description in the market's naming
    pub fn description(&self) -> String {
        let name = self.profile_type().display_name();
        match *self {
            Profile::RoundBar { diameter_mm } | Profile::RoundTube { diameter_mm } => {
                format!("{} Ø{} mm", name, diameter_mm)
            }
            Profile::Plate { width_mm, height_mm, thickness_mm: Some(t) } if t > 0.0 => {
                format!("{} {}x{} mm esp. {} mm", name, width_mm, height_mm, t)
            }
            Profile::Metalon(MetalonSection::Square { side_mm }) => {
                format!("{} {}x{} mm", name, side_mm, side_mm)
            }
            _ => format!("{} {} mm", name, self.dimension_tokens()),
        }
    }

    fn dimension_tokens(&self) -> String {
        match *self {
            Profile::RoundBar { diameter_mm } | Profile::RoundTube { diameter_mm } => {
                diameter_mm.to_string()
            }
            Profile::StiffenedU { height_mm, flange_mm, lip_mm } => {
                format!("{}x{}x{}", height_mm, flange_mm, lip_mm)
            }
            Profile::PlainU { height_mm, flange_mm, lip_mm } => {
                if lip_mm > 0.0 {
                    format!("{}x{}x{}", height_mm, flange_mm, lip_mm)
                } else {
                    format!("{}x{}", height_mm, flange_mm)
                }
            }
            Profile::Plate { width_mm, height_mm, thickness_mm } => match thickness_mm {
                Some(t) if t > 0.0 => format!("{}x{}x{}", width_mm, height_mm, t),
                _ => format!("{}x{}", width_mm, height_mm),
            },
            Profile::WBeam { height_mm } => height_mm.to_string(),
            Profile::Angle { leg1_mm, leg2_mm } => format!("{}x{}", leg1_mm, leg2_mm),
            Profile::Metalon(MetalonSection::Square { side_mm }) => side_mm.to_string(),
            Profile::Metalon(MetalonSection::Rectangular { width_mm, height_mm }) => {
                format!("{}x{}", width_mm, height_mm)
            }
        }
    }
}
