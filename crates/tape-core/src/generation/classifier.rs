//! Keyword prompt classifier.

use super::descriptor::{AnimationDescriptor, Color, MaterialKind, MaterialProperties, ShapeKind};
use super::tables::{
    ANIMATIONS, AnimationModifier, COLORS, DEFAULT_MATERIAL, DEFAULT_SHAPE, LARGE_KEYWORDS,
    LARGE_MULTIPLIER, MATERIALS, MaterialPreset, SHAPES, SMALL_KEYWORDS, SMALL_MULTIPLIER,
    contains_any,
};
use serde::{Deserialize, Serialize};

/// Generation parameters selected from a prompt.
///
/// Transient: only the object descriptor synthesized from it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub shape: ShapeKind,
    pub color: Color,
    /// Name of the matched color, `None` when the shape default was used.
    pub color_name: Option<String>,
    pub material: MaterialPreset,
    pub material_kind: MaterialKind,
    pub material_properties: MaterialProperties,
    pub animation: AnimationDescriptor,
    /// Matched animation modifier, `None` when the shape's base animation is used.
    pub animation_modifier: Option<AnimationModifier>,
    pub size_multiplier: f64,
}

/// Classifies free text into generation parameters.
///
/// Lowercases the text and runs substring containment tests against each
/// table in table order; the first entry with a hit wins regardless of where
/// its keyword appears in the text. Total over all inputs: every category
/// falls back to a default.
pub fn classify(prompt: &str) -> Classification {
    let text = prompt.to_lowercase();

    let shape = SHAPES
        .iter()
        .find(|entry| contains_any(&text, entry.keywords))
        .unwrap_or_else(|| DEFAULT_SHAPE.entry());

    let color_entry = COLORS.iter().find(|entry| text.contains(entry.name));
    let color = color_entry.map_or(shape.default_color, |entry| entry.color);

    let material = MATERIALS
        .iter()
        .find(|entry| contains_any(&text, entry.keywords))
        .unwrap_or(&DEFAULT_MATERIAL);

    let animation_entry = ANIMATIONS
        .iter()
        .find(|entry| contains_any(&text, entry.keywords));
    let animation = animation_entry.map_or(shape.animation, |entry| entry.animation);

    let size_multiplier = size_multiplier(&text);

    let classification = Classification {
        shape: shape.kind,
        color,
        color_name: color_entry.map(|entry| entry.name.to_string()),
        material: material.preset,
        material_kind: material.kind,
        material_properties: material.properties,
        animation,
        animation_modifier: animation_entry.map(|entry| entry.modifier),
        size_multiplier,
    };

    tracing::debug!(
        shape = %classification.shape,
        color = %classification.color,
        material = %classification.material,
        size = classification.size_multiplier,
        "Classified prompt"
    );

    classification
}

fn size_multiplier(text: &str) -> f64 {
    if contains_any(text, LARGE_KEYWORDS) {
        LARGE_MULTIPLIER
    } else if contains_any(text, SMALL_KEYWORDS) {
        SMALL_MULTIPLIER
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_uses_defaults() {
        for input in ["", "   ", "\n\t"] {
            let result = classify(input);
            assert_eq!(result.shape, ShapeKind::Cube);
            assert_eq!(result.color, ShapeKind::Cube.entry().default_color);
            assert_eq!(result.color_name, None);
            assert_eq!(result.material, MaterialPreset::Default);
            assert_eq!(result.material_kind, MaterialKind::Standard);
            assert_eq!(result.material_properties.metalness, Some(0.3));
            assert_eq!(result.material_properties.roughness, Some(0.4));
            assert_eq!(result.animation, ShapeKind::Cube.entry().animation);
            assert_eq!(result.animation_modifier, None);
            assert_eq!(result.size_multiplier, 1.0);
        }
    }

    #[test]
    fn test_table_order_beats_input_order() {
        let first = classify("cube sphere");
        let second = classify("sphere cube");
        assert_eq!(first, second);
        assert_eq!(first.shape, ShapeKind::Sphere);
    }

    #[test]
    fn test_material_table_order_beats_input_order() {
        let first = classify("wooden metal box");
        let second = classify("metal wooden box");
        assert_eq!(first, second);
        assert_eq!(first.material, MaterialPreset::Metallic);
    }

    #[test]
    fn test_is_case_insensitive() {
        assert_eq!(classify("A Big BLUE Torus"), classify("a big blue torus"));
    }

    #[test]
    fn test_large_red_cube() {
        let result = classify("large red cube");
        assert_eq!(result.shape, ShapeKind::Cube);
        assert_eq!(result.color, Color(0xff0000));
        assert_eq!(result.color_name.as_deref(), Some("red"));
        assert_eq!(result.material, MaterialPreset::Default);
        assert_eq!(result.animation, ShapeKind::Cube.entry().animation);
        assert!(result.size_multiplier > 1.0);
    }

    #[test]
    fn test_shape_default_color_when_no_color_named() {
        let result = classify("a torus");
        assert_eq!(result.color, ShapeKind::Torus.entry().default_color);
    }

    #[test]
    fn test_animation_modifier_overrides_base() {
        let result = classify("floating pyramid");
        assert_eq!(result.shape, ShapeKind::Tetrahedron);
        assert!(matches!(
            result.animation,
            AnimationDescriptor::SpinBob { bob_amplitude, .. } if bob_amplitude == 1.5
        ));
        assert_eq!(result.animation_modifier, Some(AnimationModifier::Floating));
    }

    #[test]
    fn test_crystal_keywords() {
        assert_eq!(classify("ice sphere").material, MaterialPreset::Crystal);
        assert_eq!(classify("crystal cone").material, MaterialPreset::Crystal);
        // Substring matching: "dice" also carries the crystal keyword.
        let dice = classify("dice");
        assert_eq!(dice.shape, ShapeKind::Cube);
        assert_eq!(dice.material, MaterialPreset::Crystal);
    }

    fn assert_complete(result: &Classification, input: &str) {
        let expected_params = result.shape.param_count();
        assert_eq!(
            result.shape.entry().template.split(',').count(),
            expected_params,
            "{input}"
        );
        assert!(
            [SMALL_MULTIPLIER, 1.0, LARGE_MULTIPLIER].contains(&result.size_multiplier),
            "{input}"
        );
        assert!(result.color.0 <= 0xffffff, "{input}");
        assert!(
            result.animation.rates().iter().all(|rate| rate.is_finite()),
            "{input}"
        );
        assert_eq!(
            result.material_kind,
            MATERIALS
                .iter()
                .chain(std::iter::once(&DEFAULT_MATERIAL))
                .find(|entry| entry.preset == result.material)
                .map(|entry| entry.kind)
                .unwrap(),
            "{input}"
        );
    }

    #[test]
    fn test_every_table_keyword_classifies_completely() {
        let keywords = SHAPES
            .iter()
            .flat_map(|entry| entry.keywords.iter())
            .chain(COLORS.iter().map(|entry| &entry.name))
            .chain(MATERIALS.iter().flat_map(|entry| entry.keywords.iter()))
            .chain(ANIMATIONS.iter().flat_map(|entry| entry.keywords.iter()))
            .chain(LARGE_KEYWORDS.iter())
            .chain(SMALL_KEYWORDS.iter());

        for keyword in keywords {
            let result = classify(keyword);
            assert_complete(&result, keyword);
            assert_complete(&classify(&keyword.to_uppercase()), keyword);
        }
    }

    #[test]
    fn test_unusual_input_classifies_completely() {
        let long = "spinning golden sphere ".repeat(10_000);
        let inputs = [
            "ÄÖÜ ß 日本語の立方体 🚀",
            "İSTANBUL KÜRE",
            "\0\u{0}<script>",
            "1234567890 !@#$%^&*()",
            "красный куб",
            long.as_str(),
        ];
        for input in inputs {
            let label: String = input.chars().take(32).collect();
            assert_complete(&classify(input), &label);
        }
        assert_eq!(classify(&long).shape, ShapeKind::Sphere);
        assert_eq!(classify(&long).color_name.as_deref(), Some("gold"));
    }

    #[test]
    fn test_size_large_wins_over_small() {
        assert_eq!(classify("tiny huge orb").size_multiplier, LARGE_MULTIPLIER);
        assert_eq!(classify("tiny orb").size_multiplier, SMALL_MULTIPLIER);
    }

    #[test]
    fn test_substring_matching() {
        // "planet" contains "plane", but sphere is earlier in the table.
        assert_eq!(classify("a planet").shape, ShapeKind::Sphere);
        // "golden" contains "gold".
        assert_eq!(classify("golden ring").color, Color(0xffd700));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let prompt = "spinning golden sphere made of glass";
        assert_eq!(classify(prompt), classify(prompt));
    }
}
