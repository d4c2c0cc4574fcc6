//! Prompt-to-object generation.
//!
//! This module contains the pure generation pipeline: static keyword tables,
//! the classifier that picks parameters from free text, and the synthesizer
//! that turns a classification into a typed [`ObjectDescriptor`].
//!
//! # Module Structure
//!
//! - `tables`: Shape, color, material, animation and size tables
//! - `classifier`: First-match-wins keyword classification (`classify`)
//! - `descriptor`: The typed object description (`ObjectDescriptor`)
//! - `synthesizer`: Classification to descriptor (`synthesize`)
//! - `code`: Display-only code text and its structural validation

pub mod code;
mod classifier;
mod descriptor;
mod synthesizer;
pub mod tables;

pub use classifier::{Classification, classify};
pub use descriptor::{
    AnimationDescriptor, Color, GeometryDescriptor, MaterialDescriptor, MaterialKind,
    MaterialProperties, ObjectDescriptor, ShapeKind,
};
pub use synthesizer::{scale_template, synthesize};
pub use tables::{AnimationModifier, MaterialPreset};

/// Classifies a prompt and synthesizes its object descriptor in one step.
pub fn generate(prompt: &str) -> (Classification, ObjectDescriptor) {
    let classification = classify(prompt);
    let descriptor = synthesize(&classification);
    (classification, descriptor)
}
