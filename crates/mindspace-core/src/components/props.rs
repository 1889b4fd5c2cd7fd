//! Scene prop components.
//!
//! Everything a builder spawns is an entity carrying a `Prop` (what it is),
//! a `Placement` (where it is), a `Tint` (how it looks), and optionally one
//! of the animation components (`Spin`, `Bob`). Large aggregates (star
//! fields, the water plane) are single entities so a 10,000-star sky is one
//! component, not 10,000 entities.

use serde::{Deserialize, Serialize};

use super::math::{Color, Vec3};

/// What a shaped prop represents, for rendering hints and scene queries.
/// Star fields and wave surfaces are their own components rather than
/// `Prop`s, so they are not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropKind {
    TreeTrunk,
    TreeCanopy,
    SoundOrb,
    Crystal,
    GlowOrb,
    Bubble,
    NebulaShell,
    CosmicDebris,
    Ground,
}

/// Render primitive for a prop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32 },
    Sphere { radius: f32 },
    Cone { radius: f32, height: f32 },
    Icosahedron { radius: f32 },
    Plane { width: f32, depth: f32 },
}

/// A visible scene object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Prop {
    pub kind: PropKind,
    pub shape: Shape,
}

impl Prop {
    pub fn new(kind: PropKind, shape: Shape) -> Self {
        Self { kind, shape }
    }
}

/// World transform of a prop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    /// Yaw in radians.
    pub rotation_y: f32,
    pub scale: f32,
}

impl Placement {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_rotation(mut self, rotation_y: f32) -> Self {
        self.rotation_y = rotation_y;
        self
    }
}

/// Surface appearance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tint {
    pub color: Color,
    /// 1.0 is fully opaque.
    pub opacity: f32,
    /// Emissive intensity; 0.0 disables the glow.
    pub emissive: f32,
}

impl Tint {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            emissive: 0.0,
        }
    }

    pub fn translucent(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            emissive: 0.0,
        }
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}

/// Decorative yaw rotation at a fixed angular rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Spin {
    /// Radians per second.
    pub rate: f32,
}

impl Spin {
    /// The standard decorative rate used by every spinning prop.
    pub const DECORATIVE_RATE: f32 = 0.6;

    pub fn decorative() -> Self {
        Self {
            rate: Self::DECORATIVE_RATE,
        }
    }
}

/// Gentle vertical float around a base height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bob {
    pub amplitude: f32,
    /// Radians per second through the sine cycle.
    pub rate: f32,
    pub base_y: f32,
    /// Phase offset so a group of props does not float in lockstep.
    pub phase: f32,
}

/// A horizontal grid whose vertex heights are rewritten in place each
/// frame. Heights are stored row-major, `(segments_x + 1) * (segments_z + 1)`
/// entries, and the grid is centered on the prop's placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveSurface {
    pub width: f32,
    pub depth: f32,
    pub segments_x: u32,
    pub segments_z: u32,
    pub amplitude: f32,
    pub heights: Vec<f32>,
}

impl WaveSurface {
    pub fn new(width: f32, depth: f32, segments_x: u32, segments_z: u32, amplitude: f32) -> Self {
        let count = ((segments_x + 1) * (segments_z + 1)) as usize;
        Self {
            width,
            depth,
            segments_x,
            segments_z,
            amplitude,
            heights: vec![0.0; count],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.heights.len()
    }

    /// Local x/z of a vertex index, centered grid.
    pub fn vertex_xz(&self, index: usize) -> (f32, f32) {
        let cols = (self.segments_x + 1) as usize;
        let ix = (index % cols) as f32;
        let iz = (index / cols) as f32;
        let x = ix / self.segments_x as f32 * self.width - self.width / 2.0;
        let z = iz / self.segments_z as f32 * self.depth - self.depth / 2.0;
        (x, z)
    }
}

/// A cloud of points rendered as one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleField {
    pub points: Vec<Vec3>,
    pub point_size: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_surface_vertex_layout() {
        let wave = WaveSurface::new(100.0, 100.0, 32, 32, 2.0);
        assert_eq!(wave.vertex_count(), 33 * 33);

        // Corners of the centered grid.
        let (x0, z0) = wave.vertex_xz(0);
        assert!((x0 + 50.0).abs() < 0.001);
        assert!((z0 + 50.0).abs() < 0.001);

        let (xn, zn) = wave.vertex_xz(wave.vertex_count() - 1);
        assert!((xn - 50.0).abs() < 0.001);
        assert!((zn - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_placement_builder() {
        let p = Placement::at(Vec3::new(1.0, 2.0, 3.0)).with_rotation(1.5);
        assert_eq!(p.position.y, 2.0);
        assert!((p.rotation_y - 1.5).abs() < f32::EPSILON);
        assert_eq!(p.scale, 1.0);
    }

    #[test]
    fn test_tint_constructors() {
        let glow = Tint::solid(Color::WHITE).with_emissive(0.3);
        assert_eq!(glow.opacity, 1.0);
        assert!((glow.emissive - 0.3).abs() < f32::EPSILON);

        let water = Tint::translucent(Color::from_hex("#0ea5e9"), 0.7);
        assert!((water.opacity - 0.7).abs() < f32::EPSILON);
    }
}
