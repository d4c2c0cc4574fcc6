//! Typed object descriptor.
//!
//! `ObjectDescriptor` is the synthesized description of a generated object:
//! geometry, material and per-frame animation. It is what gets persisted in
//! chat messages and what the materializer interprets into a scene node.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Primitive shape kinds known to the classifier.
///
/// The discriminant order is also the classification priority order
/// (see [`crate::generation::tables::SHAPES`]).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShapeKind {
    Sphere,
    Cube,
    Cylinder,
    Cone,
    Torus,
    Plane,
    Ring,
    Dodecahedron,
    Icosahedron,
    Octahedron,
    Tetrahedron,
}

impl ShapeKind {
    /// Name of the rendering library geometry constructor for this shape.
    pub fn geometry_name(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "SphereGeometry",
            ShapeKind::Cube => "BoxGeometry",
            ShapeKind::Cylinder => "CylinderGeometry",
            ShapeKind::Cone => "ConeGeometry",
            ShapeKind::Torus => "TorusGeometry",
            ShapeKind::Plane => "PlaneGeometry",
            ShapeKind::Ring => "RingGeometry",
            ShapeKind::Dodecahedron => "DodecahedronGeometry",
            ShapeKind::Icosahedron => "IcosahedronGeometry",
            ShapeKind::Octahedron => "OctahedronGeometry",
            ShapeKind::Tetrahedron => "TetrahedronGeometry",
        }
    }

    /// Number of geometry parameters this shape expects.
    pub fn param_count(self) -> usize {
        match self {
            ShapeKind::Sphere => 3,
            ShapeKind::Cube => 3,
            ShapeKind::Cylinder => 4,
            ShapeKind::Cone => 3,
            ShapeKind::Torus => 4,
            ShapeKind::Plane => 2,
            ShapeKind::Ring => 3,
            ShapeKind::Dodecahedron
            | ShapeKind::Icosahedron
            | ShapeKind::Octahedron
            | ShapeKind::Tetrahedron => 1,
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const RED: Color = Color(0xff0000);

    /// Builds a color from HSL components, each in `0.0..=1.0`.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let hue = hue.rem_euclid(1.0);
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let sector = hue * 6.0;
        let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = lightness - chroma / 2.0;
        let to_byte = |v: f64| (((v + m) * 255.0).round().clamp(0.0, 255.0)) as u32;
        Color((to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:06x}", self.0)
    }
}

/// Material families supported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MaterialKind {
    Standard,
    Physical,
    Lambert,
    Basic,
}

impl MaterialKind {
    /// Name of the rendering library material constructor.
    pub fn material_name(self) -> &'static str {
        match self {
            MaterialKind::Standard => "MeshStandardMaterial",
            MaterialKind::Physical => "MeshPhysicalMaterial",
            MaterialKind::Lambert => "MeshLambertMaterial",
            MaterialKind::Basic => "MeshBasicMaterial",
        }
    }
}

/// Optional material properties. Unset properties use the renderer defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metalness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub transparent: bool,
    /// When set, the material glows in its own color at this intensity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissive_intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearcoat: Option<f64>,
}

impl MaterialProperties {
    pub const NONE: MaterialProperties = MaterialProperties {
        metalness: None,
        roughness: None,
        transmission: None,
        opacity: None,
        transparent: false,
        emissive_intensity: None,
        clearcoat: None,
    };

    /// Returns every set numeric property with its name.
    pub fn numeric(&self) -> Vec<(&'static str, f64)> {
        [
            ("metalness", self.metalness),
            ("roughness", self.roughness),
            ("transmission", self.transmission),
            ("opacity", self.opacity),
            ("emissiveIntensity", self.emissive_intensity),
            ("clearcoat", self.clearcoat),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// Per-frame animation pattern attached to a generated object.
///
/// Rates are per frame; frequencies multiply the wall clock in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum AnimationDescriptor {
    /// No motion.
    None,
    /// Constant rotation around each axis.
    Tumble { x: f64, y: f64, z: f64 },
    /// Rotation around y plus a vertical sine bob.
    SpinBob {
        spin: f64,
        bob_frequency: f64,
        bob_amplitude: f64,
    },
    /// Slow tumble plus a uniform scale pulse.
    Pulse {
        x: f64,
        y: f64,
        frequency: f64,
        amplitude: f64,
    },
    /// Rotation around y while cycling the hue of the material color.
    Rainbow { spin: f64, hue_speed: f64 },
    /// Fast rotation around y only.
    Spin { y: f64 },
}

impl AnimationDescriptor {
    /// Every numeric rate carried by the pattern.
    pub fn rates(&self) -> Vec<f64> {
        match *self {
            AnimationDescriptor::None => Vec::new(),
            AnimationDescriptor::Tumble { x, y, z } => vec![x, y, z],
            AnimationDescriptor::SpinBob {
                spin,
                bob_frequency,
                bob_amplitude,
            } => vec![spin, bob_frequency, bob_amplitude],
            AnimationDescriptor::Pulse {
                x,
                y,
                frequency,
                amplitude,
            } => vec![x, y, frequency, amplitude],
            AnimationDescriptor::Rainbow { spin, hue_speed } => vec![spin, hue_speed],
            AnimationDescriptor::Spin { y } => vec![y],
        }
    }
}

/// Geometry part of a descriptor: the shape and its (already scaled) parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryDescriptor {
    pub shape: ShapeKind,
    pub params: Vec<f64>,
}

/// Material part of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub kind: MaterialKind,
    pub color: Color,
    #[serde(default)]
    pub properties: MaterialProperties,
}

/// Complete synthesized description of a generated object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescriptor {
    pub geometry: GeometryDescriptor,
    pub material: MaterialDescriptor,
    pub animation: AnimationDescriptor,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_color_display() {
        assert_eq!(Color(0xff0000).to_string(), "0xff0000");
        assert_eq!(Color(0x00ff).to_string(), "0x0000ff");
    }

    #[test]
    fn test_color_from_hsl() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5), Color(0xff0000));
        assert_eq!(Color::from_hsl(1.0 / 3.0, 1.0, 0.5), Color(0x00ff00));
        assert_eq!(Color::from_hsl(0.0, 0.0, 1.0), Color(0xffffff));
    }

    #[test]
    fn test_shape_kind_round_trips_through_name() {
        for kind in ShapeKind::iter() {
            let parsed: ShapeKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_descriptor_serializes_with_tagged_animation() {
        let descriptor = ObjectDescriptor {
            geometry: GeometryDescriptor {
                shape: ShapeKind::Cube,
                params: vec![2.0, 2.0, 2.0],
            },
            material: MaterialDescriptor {
                kind: MaterialKind::Standard,
                color: Color(0xff0000),
                properties: MaterialProperties::default(),
            },
            animation: AnimationDescriptor::Spin { y: 0.05 },
            cast_shadow: true,
            receive_shadow: true,
        };

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["geometry"]["shape"], "cube");
        assert_eq!(json["animation"]["pattern"], "spin");
        assert_eq!(json["castShadow"], true);
        assert_eq!(json["material"]["color"], 0xff0000);
    }
}
