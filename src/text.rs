//! Label measurement and auto-resize.
//!
//! When a label is committed the element widens so its text fits. Elements
//! never shrink here; the width is only replaced when the fitted width is
//! larger than the current one.

use crate::constants::{
    APPROX_CHAR_WIDTH_RATIO, ATTRIBUTE_TEXT_FACTOR, ATTRIBUTE_TEXT_PADDING, ENTITY_TEXT_PADDING,
    RELATIONSHIP_TEXT_PADDING,
};
use crate::types::ElementType;

/// Measures the rendered width of a label, in diagram units at element scale 1.
pub trait TextMeasurer {
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f32) -> f32,
{
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self(text, font_size)
    }
}

/// Fixed-advance estimate used when no font backend is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMeasurer;

impl TextMeasurer for ApproximateMeasurer {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * APPROX_CHAR_WIDTH_RATIO
    }
}

/// Rendered width a shape needs to hold a label of `text_width`.
pub fn required_width(element_type: ElementType, text_width: f32) -> f32 {
    match element_type {
        ElementType::Entity => text_width + ENTITY_TEXT_PADDING,
        ElementType::Attribute => text_width * ATTRIBUTE_TEXT_FACTOR + ATTRIBUTE_TEXT_PADDING,
        ElementType::Relationship => text_width + RELATIONSHIP_TEXT_PADDING,
    }
}

/// New base width for a label, or `None` if the current width already fits.
pub fn fitted_base_width(
    element_type: ElementType,
    text: &str,
    font_size: f32,
    current_width: f32,
    measurer: &dyn TextMeasurer,
    element_scale: f32,
) -> Option<f32> {
    let measured = measurer.text_width(text, font_size) * element_scale;
    let base = (required_width(element_type, measured) / element_scale)
        .max(element_type.min_base_width());
    (base > current_width).then_some(base)
}
