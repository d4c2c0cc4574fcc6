//! Training dataset generation.
//!
//! Builds prompt/code example pairs from the classification tables so the
//! generated code can be used to fine-tune an external model.

use crate::generation::code::{render_code, validate_code};
use crate::generation::tables::{COLORS, SHAPES};
use crate::generation::generate;
use serde::{Deserialize, Serialize};

/// System prompt placed at the head of every fine-tune record.
pub const SYSTEM_PROMPT: &str = "You are an expert Three.js developer. Generate only clean JavaScript code without any markdown formatting, comments, or explanations.";

/// Hand-picked prompts combining material, animation and color keywords.
pub const ADVANCED_PROMPTS: &[&str] = &[
    "spinning golden sphere",
    "glowing blue cube",
    "floating red cylinder",
    "pulsing green torus",
    "rotating rainbow cone",
    "transparent glass sphere",
    "metallic silver cube",
    "wooden brown cylinder",
    "crystal clear diamond",
    "glowing plasma ball",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingCategory {
    BasicShapes,
    AdvancedObjects,
}

/// A single prompt with the code generated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub prompt: String,
    pub code: String,
    pub category: TrainingCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTuneMessage {
    pub role: String,
    pub content: String,
}

/// Chat-format fine-tune record (system, user, assistant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTuneRecord {
    pub messages: Vec<FineTuneMessage>,
}

/// Generates one basic example per shape and color, followed by the
/// advanced prompts.
pub fn generate_examples() -> Vec<TrainingExample> {
    let basic = SHAPES.iter().flat_map(|shape| {
        COLORS.iter().map(move |color| {
            example(
                format!("Create a {} {}", color.name, shape.kind),
                TrainingCategory::BasicShapes,
            )
        })
    });

    let advanced = ADVANCED_PROMPTS
        .iter()
        .map(|prompt| example(prompt.to_string(), TrainingCategory::AdvancedObjects));

    basic.chain(advanced).collect()
}

fn example(prompt: String, category: TrainingCategory) -> TrainingExample {
    let (_, descriptor) = generate(&prompt);
    TrainingExample {
        code: render_code(&descriptor),
        prompt,
        category,
    }
}

/// Wraps an example into a fine-tune record.
pub fn fine_tune_record(example: &TrainingExample) -> FineTuneRecord {
    FineTuneRecord {
        messages: vec![
            FineTuneMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            FineTuneMessage {
                role: "user".to_string(),
                content: format!("Create Three.js code for: {}", example.prompt),
            },
            FineTuneMessage {
                role: "assistant".to_string(),
                content: example.code.clone(),
            },
        ],
    }
}

/// Counts the examples whose code passes structural validation.
pub fn count_valid(examples: &[TrainingExample]) -> usize {
    examples.iter().filter(|e| validate_code(&e.code)).count()
}
