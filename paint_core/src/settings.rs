//! # Estimate Settings
//!
//! Defaults applied when turning paintable areas into paint quantities.
//! Settings are plain serde structs so front ends can load them from any
//! configuration format.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Paint system used to convert painted area into litres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintSystem {
    /// Display name (e.g., "Esmalte sintético")
    pub name: String,

    /// Number of coats applied
    pub coats: u32,

    /// Theoretical yield per coat (m² per litre)
    pub yield_m2_per_liter: f64,

    /// Application loss added on top of the theoretical volume (%)
    #[serde(default)]
    pub loss_percent: f64,
}

impl Default for PaintSystem {
    fn default() -> Self {
        PaintSystem {
            name: "Esmalte sintético".to_string(),
            coats: 1,
            yield_m2_per_liter: 10.0,
            loss_percent: 10.0,
        }
    }
}

impl PaintSystem {
    /// Validate paint system parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.coats == 0 {
            return Err(CalcError::invalid_input(
                "coats",
                self.coats.to_string(),
                "At least one coat is required",
            ));
        }
        if !self.yield_m2_per_liter.is_finite() || self.yield_m2_per_liter <= 0.0 {
            return Err(CalcError::invalid_input(
                "yield_m2_per_liter",
                self.yield_m2_per_liter.to_string(),
                "Yield must be positive",
            ));
        }
        if !(0.0..100.0).contains(&self.loss_percent) {
            return Err(CalcError::invalid_input(
                "loss_percent",
                self.loss_percent.to_string(),
                "Loss must be between 0 and 100 %",
            ));
        }
        Ok(())
    }
}

/// Global estimate settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSettings {
    /// Paint system applied to every line
    #[serde(default)]
    pub paint_system: PaintSystem,

    /// Bar length used when a line gives none (m)
    #[serde(default = "default_bar_length_m")]
    pub default_bar_length_m: f64,
}

fn default_bar_length_m() -> f64 {
    6.0
}

impl Default for EstimateSettings {
    fn default() -> Self {
        EstimateSettings {
            paint_system: PaintSystem::default(),
            default_bar_length_m: default_bar_length_m(),
        }
    }
}

impl EstimateSettings {
    /// Validate all settings.
    pub fn validate(&self) -> CalcResult<()> {
        self.paint_system.validate()?;
        if !self.default_bar_length_m.is_finite() || self.default_bar_length_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "default_bar_length_m",
                self.default_bar_length_m.to_string(),
                "Bar length must be positive",
            ));
        }
        Ok(())
    }
}
