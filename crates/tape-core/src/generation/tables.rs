//! Static classification tables.
//!
//! Every table is scanned front to back and the first entry with a keyword
//! hit wins, so entry order here is match priority.

use super::descriptor::{AnimationDescriptor, Color, MaterialKind, MaterialProperties, ShapeKind};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// A shape primitive with its keywords, geometry template and defaults.
#[derive(Debug)]
pub struct ShapeEntry {
    pub kind: ShapeKind,
    pub keywords: &'static [&'static str],
    /// Geometry parameters as literal text, e.g. `"1.5, 32, 32"`.
    pub template: &'static str,
    pub default_color: Color,
    pub animation: AnimationDescriptor,
}

/// A named color.
#[derive(Debug)]
pub struct ColorEntry {
    pub name: &'static str,
    pub color: Color,
}

/// Material presets selectable by keyword.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MaterialPreset {
    Metallic,
    Glass,
    Crystal,
    Glowing,
    Plasma,
    Wood,
    Matte,
    /// Used when no material keyword matches.
    Default,
}

#[derive(Debug)]
pub struct MaterialEntry {
    pub preset: MaterialPreset,
    pub keywords: &'static [&'static str],
    pub kind: MaterialKind,
    pub properties: MaterialProperties,
}

/// Animation modifiers that override a shape's base animation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AnimationModifier {
    Floating,
    Pulsing,
    Rainbow,
    Spinning,
    Still,
}

#[derive(Debug)]
pub struct AnimationEntry {
    pub modifier: AnimationModifier,
    pub keywords: &'static [&'static str],
    pub animation: AnimationDescriptor,
}

/// Shape used when no shape keyword matches.
pub const DEFAULT_SHAPE: ShapeKind = ShapeKind::Cube;

pub const LARGE_KEYWORDS: &[&str] = &["large", "big", "huge"];
pub const LARGE_MULTIPLIER: f64 = 1.5;
pub const SMALL_KEYWORDS: &[&str] = &["small", "tiny", "mini"];
pub const SMALL_MULTIPLIER: f64 = 0.5;

const GENTLE_TUMBLE: AnimationDescriptor = AnimationDescriptor::Tumble {
    x: 0.01,
    y: 0.01,
    z: 0.0,
};

/// Shape table, indexed by `ShapeKind` discriminant.
pub static SHAPES: [ShapeEntry; 11] = [
    ShapeEntry {
        kind: ShapeKind::Sphere,
        keywords: &["sphere", "ball", "orb", "globe", "planet"],
        template: "1.5, 32, 32",
        default_color: Color(0x4fc3f7),
        animation: AnimationDescriptor::SpinBob {
            spin: 0.02,
            bob_frequency: 0.001,
            bob_amplitude: 0.3,
        },
    },
    ShapeEntry {
        kind: ShapeKind::Cube,
        keywords: &["cube", "box", "block", "dice"],
        template: "2, 2, 2",
        default_color: Color(0xff6b6b),
        animation: AnimationDescriptor::Tumble {
            x: 0.01,
            y: 0.01,
            z: 0.005,
        },
    },
    ShapeEntry {
        kind: ShapeKind::Cylinder,
        keywords: &["cylinder", "tube", "pipe", "column", "pillar"],
        template: "1, 1, 3, 32",
        default_color: Color(0x81c784),
        animation: AnimationDescriptor::SpinBob {
            spin: 0.02,
            bob_frequency: 0.001,
            bob_amplitude: 0.2,
        },
    },
    ShapeEntry {
        kind: ShapeKind::Cone,
        keywords: &["cone", "funnel", "spike"],
        template: "1.5, 3, 8",
        default_color: Color(0xffb74d),
        animation: AnimationDescriptor::SpinBob {
            spin: 0.015,
            bob_frequency: 0.0015,
            bob_amplitude: 0.4,
        },
    },
    ShapeEntry {
        kind: ShapeKind::Torus,
        keywords: &["torus", "donut", "doughnut"],
        template: "1.5, 0.5, 16, 100",
        default_color: Color(0xba68c8),
        animation: AnimationDescriptor::Tumble {
            x: 0.01,
            y: 0.02,
            z: 0.0,
        },
    },
    ShapeEntry {
        kind: ShapeKind::Plane,
        keywords: &["plane", "floor", "sheet", "flat"],
        template: "3, 3",
        default_color: Color(0x90a4ae),
        animation: GENTLE_TUMBLE,
    },
    ShapeEntry {
        kind: ShapeKind::Ring,
        keywords: &["ring", "halo", "hoop"],
        template: "0.5, 1.5, 32",
        default_color: Color(0xffd54f),
        animation: GENTLE_TUMBLE,
    },
    ShapeEntry {
        kind: ShapeKind::Dodecahedron,
        keywords: &["dodecahedron", "d12"],
        template: "1.5",
        default_color: Color(0x4db6ac),
        animation: GENTLE_TUMBLE,
    },
    ShapeEntry {
        kind: ShapeKind::Icosahedron,
        keywords: &["icosahedron", "d20"],
        template: "1.5",
        default_color: Color(0x7986cb),
        animation: GENTLE_TUMBLE,
    },
    ShapeEntry {
        kind: ShapeKind::Octahedron,
        keywords: &["octahedron", "diamond", "gem"],
        template: "1.5",
        default_color: Color(0xe0f7fa),
        animation: AnimationDescriptor::Tumble {
            x: 0.01,
            y: 0.015,
            z: 0.005,
        },
    },
    ShapeEntry {
        kind: ShapeKind::Tetrahedron,
        keywords: &["tetrahedron", "pyramid", "triangle"],
        template: "1.5",
        default_color: Color(0xa1887f),
        animation: GENTLE_TUMBLE,
    },
];

pub static COLORS: [ColorEntry; 13] = [
    ColorEntry {
        name: "red",
        color: Color(0xff0000),
    },
    ColorEntry {
        name: "green",
        color: Color(0x00ff00),
    },
    ColorEntry {
        name: "blue",
        color: Color(0x0000ff),
    },
    ColorEntry {
        name: "yellow",
        color: Color(0xffff00),
    },
    ColorEntry {
        name: "purple",
        color: Color(0x800080),
    },
    ColorEntry {
        name: "orange",
        color: Color(0xffa500),
    },
    ColorEntry {
        name: "pink",
        color: Color(0xffc0cb),
    },
    ColorEntry {
        name: "cyan",
        color: Color(0x00ffff),
    },
    ColorEntry {
        name: "gold",
        color: Color(0xffd700),
    },
    ColorEntry {
        name: "silver",
        color: Color(0xc0c0c0),
    },
    ColorEntry {
        name: "white",
        color: Color(0xffffff),
    },
    ColorEntry {
        name: "black",
        color: Color(0x222222),
    },
    ColorEntry {
        name: "brown",
        color: Color(0x8b4513),
    },
];

pub static MATERIALS: [MaterialEntry; 7] = [
    MaterialEntry {
        preset: MaterialPreset::Metallic,
        keywords: &["metal", "metallic", "steel", "chrome", "shiny"],
        kind: MaterialKind::Standard,
        properties: MaterialProperties {
            metalness: Some(0.9),
            roughness: Some(0.1),
            ..MaterialProperties::NONE
        },
    },
    MaterialEntry {
        preset: MaterialPreset::Glass,
        keywords: &["glass", "transparent", "clear"],
        kind: MaterialKind::Physical,
        properties: MaterialProperties {
            transmission: Some(0.9),
            opacity: Some(0.1),
            transparent: true,
            roughness: Some(0.0),
            metalness: Some(0.0),
            ..MaterialProperties::NONE
        },
    },
    MaterialEntry {
        preset: MaterialPreset::Crystal,
        keywords: &["crystal", "ice"],
        kind: MaterialKind::Physical,
        properties: MaterialProperties {
            transmission: Some(0.7),
            opacity: Some(0.3),
            transparent: true,
            roughness: Some(0.0),
            metalness: Some(0.1),
            clearcoat: Some(1.0),
            ..MaterialProperties::NONE
        },
    },
    MaterialEntry {
        preset: MaterialPreset::Glowing,
        keywords: &["glow", "neon", "emissive", "bright"],
        kind: MaterialKind::Standard,
        properties: MaterialProperties {
            emissive_intensity: Some(0.3),
            ..MaterialProperties::NONE
        },
    },
    MaterialEntry {
        preset: MaterialPreset::Plasma,
        keywords: &["plasma", "energy", "electric"],
        kind: MaterialKind::Standard,
        properties: MaterialProperties {
            emissive_intensity: Some(0.5),
            ..MaterialProperties::NONE
        },
    },
    MaterialEntry {
        preset: MaterialPreset::Wood,
        keywords: &["wood", "wooden", "timber"],
        kind: MaterialKind::Standard,
        properties: MaterialProperties {
            metalness: Some(0.0),
            roughness: Some(0.9),
            ..MaterialProperties::NONE
        },
    },
    MaterialEntry {
        preset: MaterialPreset::Matte,
        keywords: &["matte", "rubber", "plastic"],
        kind: MaterialKind::Lambert,
        properties: MaterialProperties::NONE,
    },
];

/// Generic material profile used when no material keyword matches.
pub static DEFAULT_MATERIAL: MaterialEntry = MaterialEntry {
    preset: MaterialPreset::Default,
    keywords: &[],
    kind: MaterialKind::Standard,
    properties: MaterialProperties {
        metalness: Some(0.3),
        roughness: Some(0.4),
        ..MaterialProperties::NONE
    },
};

pub static ANIMATIONS: [AnimationEntry; 5] = [
    AnimationEntry {
        modifier: AnimationModifier::Floating,
        keywords: &["float", "floating", "hover", "levitat"],
        animation: AnimationDescriptor::SpinBob {
            spin: 0.01,
            bob_frequency: 0.001,
            bob_amplitude: 1.5,
        },
    },
    AnimationEntry {
        modifier: AnimationModifier::Pulsing,
        keywords: &["pulse", "pulsing", "beat", "throb"],
        animation: AnimationDescriptor::Pulse {
            x: 0.005,
            y: 0.01,
            frequency: 0.003,
            amplitude: 0.3,
        },
    },
    AnimationEntry {
        modifier: AnimationModifier::Rainbow,
        keywords: &["rainbow", "colorful", "colourful"],
        animation: AnimationDescriptor::Rainbow {
            spin: 0.02,
            hue_speed: 0.2,
        },
    },
    AnimationEntry {
        modifier: AnimationModifier::Spinning,
        keywords: &["spin", "spinning", "rotat", "twirl"],
        animation: AnimationDescriptor::Spin { y: 0.05 },
    },
    AnimationEntry {
        modifier: AnimationModifier::Still,
        keywords: &["static", "still", "frozen"],
        animation: AnimationDescriptor::None,
    },
];

impl ShapeKind {
    /// Table entry for this shape.
    pub fn entry(self) -> &'static ShapeEntry {
        &SHAPES[self as usize]
    }
}

/// Returns true when any keyword is a substring of the lowercased text.
pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
