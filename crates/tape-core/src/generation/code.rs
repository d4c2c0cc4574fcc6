//! Rendering-library code text for object descriptors.
//!
//! The text is for display and dataset export only. Nothing here is ever
//! compiled or executed; the materializer works from the descriptor.

use super::descriptor::{AnimationDescriptor, MaterialDescriptor, ObjectDescriptor};
use once_cell::sync::Lazy;
use regex::Regex;

/// Name the generated drawable is bound to in rendered code.
pub const OBJECT_BINDING: &str = "object";

static REQUIRED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"const\s+geometry\s*=\s*new\s+THREE\.",
        r"const\s+material\s*=\s*new\s+THREE\.",
        r"const\s+object\s*=\s*new\s+THREE\.Mesh",
        r"object\.castShadow\s*=\s*true",
        r"object\.receiveShadow\s*=\s*true",
        r"object\.userData\.animate\s*=",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("required code pattern is valid"))
    .collect()
});

/// Renders the descriptor as a rendering-library code fragment.
pub fn render_code(descriptor: &ObjectDescriptor) -> String {
    let params = descriptor
        .geometry
        .params
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "const geometry = new THREE.{geometry}({params});\n\
         const material = new THREE.{material}({{ {properties} }});\n\
         const {binding} = new THREE.Mesh(geometry, material);\n\
         {binding}.castShadow = {cast};\n\
         {binding}.receiveShadow = {receive};\n\
         {binding}.userData.animate = () => {{\n    {animation}\n}};",
        geometry = descriptor.geometry.shape.geometry_name(),
        material = descriptor.material.kind.material_name(),
        properties = material_properties(&descriptor.material),
        binding = OBJECT_BINDING,
        cast = descriptor.cast_shadow,
        receive = descriptor.receive_shadow,
        animation = animation_expression(&descriptor.animation),
    )
}

/// Renders the material constructor argument body, e.g.
/// `color: 0xff0000, metalness: 0.3, roughness: 0.4`.
pub fn material_properties(material: &MaterialDescriptor) -> String {
    let props = &material.properties;
    let mut parts = vec![format!("color: {}", material.color)];

    if props.emissive_intensity.is_some() {
        parts.push(format!("emissive: {}", material.color));
    }
    for (name, value) in props.numeric() {
        parts.push(format!("{}: {}", name, value));
    }
    if props.transparent {
        parts.push("transparent: true".to_string());
    }

    parts.join(", ")
}

/// Renders the per-frame animation body.
pub fn animation_expression(animation: &AnimationDescriptor) -> String {
    let b = OBJECT_BINDING;
    match *animation {
        AnimationDescriptor::None => String::new(),
        AnimationDescriptor::Tumble { x, y, z } => [("x", x), ("y", y), ("z", z)]
            .into_iter()
            .filter(|(_, rate)| *rate != 0.0)
            .map(|(axis, rate)| format!("{b}.rotation.{axis} += {rate};"))
            .collect::<Vec<_>>()
            .join(" "),
        AnimationDescriptor::SpinBob {
            spin,
            bob_frequency,
            bob_amplitude,
        } => format!(
            "{b}.rotation.y += {spin}; {b}.position.y = Math.sin(Date.now() * {bob_frequency}) * {bob_amplitude};"
        ),
        AnimationDescriptor::Pulse {
            x,
            y,
            frequency,
            amplitude,
        } => format!(
            "{b}.rotation.x += {x}; {b}.rotation.y += {y}; {b}.scale.setScalar(1 + Math.sin(Date.now() * {frequency}) * {amplitude});"
        ),
        AnimationDescriptor::Rainbow { spin, hue_speed } => format!(
            "{b}.rotation.y += {spin}; const time = Date.now() * 0.001; {b}.material.color.setHSL((time * {hue_speed}) % 1, 0.8, 0.5);"
        ),
        AnimationDescriptor::Spin { y } => format!("{b}.rotation.y += {y};"),
    }
}

/// Checks that a code fragment has the structure of a generated object:
/// geometry, material, mesh binding, both shadow flags and the animate hook.
pub fn validate_code(code: &str) -> bool {
    REQUIRED_PATTERNS.iter().all(|pattern| pattern.is_match(code))
}
