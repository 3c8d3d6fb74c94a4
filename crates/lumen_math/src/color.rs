use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul};

use glam::DVec3;

use crate::{Coefficient, Interval, MathError};

/// Linear RGB intensity. 1.0 is full device brightness, but values are not
/// clamped until they are written to a pixel.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    rgb: DVec3,
}

impl Color {
    pub const BLACK: Color = Color { rgb: DVec3::ZERO };
    pub const WHITE: Color = Color { rgb: DVec3::ONE };

    /// Fails with [`MathError::NegativeColor`] when any channel is negative
    /// or NaN.
    pub fn new(r: f64, g: f64, b: f64) -> Result<Self, MathError> {
        if !(r >= 0.0 && g >= 0.0 && b >= 0.0) {
            return Err(MathError::NegativeColor { r, g, b });
        }
        Ok(Self {
            rgb: DVec3::new(r, g, b),
        })
    }

    /// Builds a color from 8-bit channels, mapping 255 to 1.0.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: DVec3::new(r as f64, g as f64, b as f64) / 255.0,
        }
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.rgb.x
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.rgb.y
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.rgb.z
    }

    pub fn is_black(&self) -> bool {
        self.rgb == DVec3::ZERO
    }

    /// Divides every channel by `k` (`k >= 1` dims the color).
    pub fn reduce(&self, k: f64) -> Color {
        debug_assert!(k > 0.0, "color reduction factor must be positive");
        Self { rgb: self.rgb / k }
    }

    /// Clamps each channel to the displayable range and quantizes to 8 bits.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let quantize = |c: f64| (255.0 * Interval::UNIT.clamp(c)).round() as u8;
        [quantize(self.rgb.x), quantize(self.rgb.y), quantize(self.rgb.z)]
    }
}

impl From<[u8; 3]> for Color {
    fn from(a: [u8; 3]) -> Self {
        Self::from_rgb8(a[0], a[1], a[2])
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            rgb: self.rgb + rhs.rgb,
        }
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        self.rgb += rhs.rgb;
    }
}

impl Mul<f64> for Color {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        debug_assert!(rhs >= 0.0, "colors cannot be scaled by a negative factor");
        Self {
            rgb: self.rgb * rhs,
        }
    }
}

/// Attenuate each channel by the matching coefficient channel
impl Mul<Coefficient> for Color {
    type Output = Self;

    fn mul(self, rhs: Coefficient) -> Self::Output {
        Self {
            rgb: self.rgb * rhs.as_dvec3(),
        }
    }
}

impl Div<f64> for Color {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        self.reduce(rhs)
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Self {
        iter.fold(Color::BLACK, Add::add)
    }
}
