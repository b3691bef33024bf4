//! Text course objects: control numbers, codes and free text.
//!
//! Width and height are derived from font metrics at construction and
//! recomputed whenever the em height changes. Text objects ignore the
//! course scale ratio; their own em height governs their size. Free text
//! can additionally fit its em height to a bounding rectangle, degenerating
//! to zero size for empty text or a zero target dimension.

use std::fmt;

use coursekit_core::{
    Affine, Brush, ColorId, DrawSurface, FontDesc, Glyph, Map, Placement, Point, Rect, Symbol,
    TextMetrics, Vec2,
};
use serde::{Deserialize, Serialize};

use crate::object::rect::distance_to_rect;
use crate::object::{CourseObj, Handles, ObjectCommon, ObjectKindTag};
use crate::symdef::{SymDefCache, SymDefKey};

/// Concrete text variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextKindTag {
    ControlNumber,
    Code,
    FreeText,
}

impl TextKindTag {
    fn name(self) -> &'static str {
        match self {
            TextKindTag::ControlNumber => "Number",
            TextKindTag::Code => "Code",
            TextKindTag::FreeText => "Text",
        }
    }
}

/// A text course object anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObject {
    pub common: ObjectCommon,
    pub kind: TextKindTag,
    pub text: String,
    /// Top-left anchor.
    pub location: Point,
    pub font: FontDesc,
    pub em_height: f64,
    /// Measured (width, height), from font metrics.
    pub size: (f64, f64),
}

impl TextObject {
    pub fn new(
        kind: TextKindTag,
        common: ObjectCommon,
        text: impl Into<String>,
        location: Point,
        font: FontDesc,
        em_height: f64,
        metrics: &dyn TextMetrics,
    ) -> Self {
        let text = text.into();
        let size = measure(&font, em_height, &text, metrics);
        Self {
            common,
            kind,
            text,
            location,
            font,
            em_height,
            size,
        }
    }

    /// A control-number object styled from the appearance bundle.
    pub fn control_number(
        common: ObjectCommon,
        text: impl Into<String>,
        location: Point,
        metrics: &dyn TextMetrics,
    ) -> Self {
        let font = common.appearance.number_font.clone();
        let em = common.appearance.number_em_height;
        Self::new(TextKindTag::ControlNumber, common, text, location, font, em, metrics)
    }

    /// A control-code object styled from the appearance bundle.
    pub fn code(
        common: ObjectCommon,
        text: impl Into<String>,
        location: Point,
        metrics: &dyn TextMetrics,
    ) -> Self {
        let font = common.appearance.code_font.clone();
        let em = common.appearance.code_em_height;
        Self::new(TextKindTag::Code, common, text, location, font, em, metrics)
    }

    pub fn kind_tag(&self) -> ObjectKindTag {
        match self.kind {
            TextKindTag::ControlNumber => ObjectKindTag::ControlNumber,
            TextKindTag::Code => ObjectKindTag::Code,
            TextKindTag::FreeText => ObjectKindTag::FreeText,
        }
    }

    /// Change the em height and re-derive the measured size.
    pub fn set_em_height(&mut self, em_height: f64, metrics: &dyn TextMetrics) {
        self.em_height = em_height;
        self.size = measure(&self.font, em_height, &self.text, metrics);
    }

    /// Fit the em height to a target rectangle: measure at unit size and
    /// scale by the binding dimension. Empty text or a zero target
    /// dimension yields zero size rather than failing.
    pub fn fit_to_rect(&mut self, width: f64, height: f64, metrics: &dyn TextMetrics) {
        if self.text.is_empty() || width <= 0.0 || height <= 0.0 {
            self.em_height = 0.0;
            self.size = (0.0, 0.0);
            return;
        }
        let (w1, h1) = metrics.measure(&self.font, 1.0, &self.text);
        if w1 <= 0.0 || h1 <= 0.0 {
            self.em_height = 0.0;
            self.size = (0.0, 0.0);
            return;
        }
        // width-bound when the text is wider than the target shape
        let em = if w1 / h1 > width / height {
            width / w1
        } else {
            height / h1
        };
        self.em_height = em;
        self.size = (w1 * em, h1 * em);
    }

    /// The measured rectangle: top-left anchor plus size.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.location.x,
            self.location.y,
            self.location.x + self.size.0,
            self.location.y + self.size.1,
        )
    }
}

fn measure(font: &FontDesc, em_height: f64, text: &str, metrics: &dyn TextMetrics) -> (f64, f64) {
    if text.is_empty() || em_height <= 0.0 {
        return (0.0, 0.0);
    }
    metrics.measure(font, em_height, text)
}

impl CourseObj for TextObject {
    fn add_to_map(&self, map: &mut Map, color: ColorId, cache: &mut SymDefCache) {
        let key = SymDefKey::text(&self.font, self.em_height);
        let def = cache.get_or_create(map, color, key, || Glyph::Text {
            font: self.font.clone(),
            em_height: self.em_height,
        });
        map.add_symbol(Symbol {
            def,
            placement: Placement::TextAt {
                location: self.location,
                text: self.text.clone(),
            },
        });
    }

    fn distance_from_point(&self, pt: Point) -> f64 {
        distance_to_rect(self.rect(), pt)
    }

    fn highlight(
        &self,
        surface: &mut dyn DrawSurface,
        world_to_pixel: Affine,
        brush: &Brush,
        _erasing: bool,
    ) {
        let c = world_to_pixel.as_coeffs();
        let scale = (c[0] * c[0] + c[1] * c[1]).sqrt();
        surface.draw_text(
            &self.text,
            world_to_pixel * self.location,
            &self.font,
            self.em_height * scale,
            brush,
        );
    }

    fn offset(&mut self, dx: f64, dy: f64) {
        self.location += Vec2::new(dx, dy);
    }

    fn handles(&self) -> Option<Handles> {
        None
    }

    fn move_handle(&mut self, _old: Point, _new: Point) {
        // text objects have no handles; speculative probes are no-ops
    }
}

impl fmt::Display for TextObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}  text:{:?}  location:({:.2},{:.2})  font:{}  em:{:.2}",
            self.kind.name(),
            self.common,
            self.text,
            self.location.x,
            self.location.y,
            self.font.family,
            self.em_height
        )
    }
}
