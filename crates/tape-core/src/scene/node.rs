//! Renderable scene nodes.

use crate::generation::{AnimationDescriptor, Color, MaterialKind, MaterialProperties, ShapeKind};
use serde::{Deserialize, Serialize};

/// Concrete geometry with typed parameters.
///
/// Segment counts are whole numbers; dimensions are world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
    },
    Cone {
        radius: f64,
        height: f64,
        radial_segments: u32,
    },
    Torus {
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Plane {
        width: f64,
        height: f64,
    },
    Ring {
        inner_radius: f64,
        outer_radius: f64,
        theta_segments: u32,
    },
    /// One of the regular polyhedra, parameterized by circumradius.
    Polyhedron { shape: ShapeKind, radius: f64 },
}

impl Geometry {
    /// Shape family this geometry was built from.
    pub fn shape(&self) -> ShapeKind {
        match self {
            Geometry::Sphere { .. } => ShapeKind::Sphere,
            Geometry::Box { .. } => ShapeKind::Cube,
            Geometry::Cylinder { .. } => ShapeKind::Cylinder,
            Geometry::Cone { .. } => ShapeKind::Cone,
            Geometry::Torus { .. } => ShapeKind::Torus,
            Geometry::Plane { .. } => ShapeKind::Plane,
            Geometry::Ring { .. } => ShapeKind::Ring,
            Geometry::Polyhedron { shape, .. } => *shape,
        }
    }
}

/// Resolved surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Color,
    /// Emissive color, present for glowing materials.
    pub emissive: Option<Color>,
    pub properties: MaterialProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

/// A drawable object in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub geometry: Geometry,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub animation: AnimationDescriptor,
    pub transform: Transform,
}

impl SceneNode {
    /// The fixed node shown when a generated object cannot be materialized:
    /// a red unit box with a flat material and no motion.
    pub fn fallback() -> Self {
        Self {
            geometry: Geometry::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            material: Material {
                kind: MaterialKind::Basic,
                color: Color::RED,
                emissive: None,
                properties: MaterialProperties::NONE,
            },
            cast_shadow: false,
            receive_shadow: false,
            animation: AnimationDescriptor::None,
            transform: Transform::default(),
        }
    }

    /// Advances the animation by one frame.
    ///
    /// `elapsed_ms` is the wall clock in milliseconds; sine-driven motion is a
    /// function of it while rotation accumulates a fixed rate per call.
    pub fn animate(&mut self, elapsed_ms: f64) {
        let t = &mut self.transform;
        match self.animation {
            AnimationDescriptor::None => {}
            AnimationDescriptor::Tumble { x, y, z } => {
                t.rotation[0] += x;
                t.rotation[1] += y;
                t.rotation[2] += z;
            }
            AnimationDescriptor::SpinBob {
                spin,
                bob_frequency,
                bob_amplitude,
            } => {
                t.rotation[1] += spin;
                t.position[1] = (elapsed_ms * bob_frequency).sin() * bob_amplitude;
            }
            AnimationDescriptor::Pulse {
                x,
                y,
                frequency,
                amplitude,
            } => {
                t.rotation[0] += x;
                t.rotation[1] += y;
                let s = 1.0 + (elapsed_ms * frequency).sin() * amplitude;
                t.scale = [s; 3];
            }
            AnimationDescriptor::Rainbow { spin, hue_speed } => {
                t.rotation[1] += spin;
                let time = elapsed_ms * 0.001;
                self.material.color = Color::from_hsl((time * hue_speed) % 1.0, 0.8, 0.5);
            }
            AnimationDescriptor::Spin { y } => t.rotation[1] += y,
        }
    }
}
