//! Linear RGB color helpers.

use crate::Vec3;

/// Color type alias (linear RGB, channels typically 0-1)
pub type Color = Vec3;

/// Display gamma used by [`linear_to_gamma`].
const DISPLAY_GAMMA: f32 = 2.2;

/// Clamp every channel to `[0, 1]`.
///
/// NaN channels come out as 0, so the result is always a valid display value
/// and clamping twice is the same as clamping once.
#[inline]
pub fn clamp_color(c: Color) -> Color {
    // NaN fails the comparison and lands on 0
    let unit = |x: f32| if x > 0.0 { x.min(1.0) } else { 0.0 };
    Color::new(unit(c.x), unit(c.y), unit(c.z))
}

/// Rec. 709 relative luminance.
#[inline]
pub fn luminance(c: Color) -> f32 {
    0.2126 * c.x + 0.7152 * c.y + 0.0722 * c.z
}

/// Gamma-encode a linear color for display.
#[inline]
pub fn linear_to_gamma(c: Color) -> Color {
    let encode = |x: f32| if x > 0.0 { x.powf(1.0 / DISPLAY_GAMMA) } else { 0.0 };
    Color::new(encode(c.x), encode(c.y), encode(c.z))
}
