//! Vector and color math shared across the scene components.

use serde::{Deserialize, Serialize};

/// 3D position vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Largest coordinate magnitude, used by scatter-bounds checks.
    pub fn max_abs(&self) -> f32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Linear RGB color with channels in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string (the `#` is optional). Malformed
    /// input falls back to white rather than failing: scene palettes are
    /// cosmetic and a bad entry should never take a session down.
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Self::WHITE;
        }
        let parse = |s: &str| u8::from_str_radix(s, 16).ok();
        match (parse(&hex[0..2]), parse(&hex[2..4]), parse(&hex[4..6])) {
            (Some(r), Some(g), Some(b)) => Self {
                r: r as f32 / 255.0,
                g: g as f32 / 255.0,
                b: b as f32 / 255.0,
            },
            _ => Self::WHITE,
        }
    }

    /// Construct from hue (degrees), saturation, lightness in [0, 1].
    /// Used for the randomized cosmic-debris palette.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        Self {
            r: r1 + m,
            g: g1 + m,
            b: b1 + m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert!((Vec3::new(3.0, 4.0, 0.0).length() - 5.0).abs() < f32::EPSILON);
        assert_eq!(Vec3::new(-7.0, 2.0, 3.0).max_abs(), 7.0);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#10b981");
        assert!((c.r - 16.0 / 255.0).abs() < 0.001);
        assert!((c.g - 185.0 / 255.0).abs() < 0.001);
        assert!((c.b - 129.0 / 255.0).abs() < 0.001);

        // Prefix optional
        assert_eq!(Color::from_hex("ffffff"), Color::WHITE);
    }

    #[test]
    fn test_color_from_hex_malformed_falls_back_to_white() {
        assert_eq!(Color::from_hex(""), Color::WHITE);
        assert_eq!(Color::from_hex("#12"), Color::WHITE);
        assert_eq!(Color::from_hex("#zzzzzz"), Color::WHITE);
        // Six bytes but not six ASCII digits
        assert_eq!(Color::from_hex("a\u{2603}bc"), Color::WHITE);
        assert_eq!(Color::from_hex("#日b9a"), Color::WHITE);
    }

    #[test]
    fn test_color_from_hsl_primaries() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert!((red.r - 1.0).abs() < 0.001 && red.g.abs() < 0.001);

        let green = Color::from_hsl(120.0, 1.0, 0.5);
        assert!((green.g - 1.0).abs() < 0.001 && green.r.abs() < 0.001);

        // Hue wraps
        let wrapped = Color::from_hsl(360.0, 1.0, 0.5);
        assert!((wrapped.r - 1.0).abs() < 0.001);
    }
}
