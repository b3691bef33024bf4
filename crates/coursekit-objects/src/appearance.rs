//! Course appearance configuration.
//!
//! An immutable bundle of presentation options shared by every object of a
//! layout pass: stroke-width and glyph-size multipliers plus the fonts and
//! em heights used for control numbers and codes.

use coursekit_core::FontDesc;
use serde::{Deserialize, Serialize};

/// Presentation options for one course rendering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseAppearance {
    /// Multiplier on every stroke width (1.0 = ISOM standard).
    pub line_width_mul: f64,
    /// Multiplier on control-circle and finish-circle diameters.
    pub control_circle_size_mul: f64,
    /// Em height of control-number text, in map units.
    pub number_em_height: f64,
    /// Em height of control-code text, in map units.
    pub code_em_height: f64,
    /// Font for control numbers.
    pub number_font: FontDesc,
    /// Font for control codes.
    pub code_font: FontDesc,
}

impl Default for CourseAppearance {
    fn default() -> Self {
        Self {
            line_width_mul: 1.0,
            control_circle_size_mul: 1.0,
            number_em_height: 5.0,
            code_em_height: 4.0,
            number_font: FontDesc::new("Arial", true, false),
            code_font: FontDesc::new("Arial", false, false),
        }
    }
}

impl CourseAppearance {
    /// Standard course stroke width (map units) after the multiplier.
    pub fn line_thickness(&self) -> f64 {
        0.35 * self.line_width_mul
    }

    /// Boundary stroke width after the multiplier.
    pub fn boundary_thickness(&self) -> f64 {
        0.7 * self.line_width_mul
    }
}
