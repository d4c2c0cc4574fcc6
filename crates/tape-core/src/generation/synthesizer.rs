//! Object descriptor synthesis.

use super::classifier::Classification;
use super::descriptor::{GeometryDescriptor, MaterialDescriptor, ObjectDescriptor};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static NUMERIC_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("numeric literal pattern is valid"));

/// Combines a classification into an object descriptor.
///
/// The geometry parameters come from the shape's template text with every
/// numeric literal multiplied by the size multiplier (segment counts included).
pub fn synthesize(classification: &Classification) -> ObjectDescriptor {
    let template = classification.shape.entry().template;
    let scaled = scale_template(template, classification.size_multiplier);

    ObjectDescriptor {
        geometry: GeometryDescriptor {
            shape: classification.shape,
            params: parse_params(&scaled),
        },
        material: MaterialDescriptor {
            kind: classification.material_kind,
            color: classification.color,
            properties: classification.material_properties,
        },
        animation: classification.animation,
        cast_shadow: true,
        receive_shadow: true,
    }
}

/// Multiplies every numeric literal in `template` by `multiplier`.
pub fn scale_template(template: &str, multiplier: f64) -> String {
    NUMERIC_LITERAL
        .replace_all(template, |caps: &Captures| {
            let value: f64 = caps[0].parse().unwrap_or(0.0);
            format!("{}", value * multiplier)
        })
        .into_owned()
}

fn parse_params(text: &str) -> Vec<f64> {
    text.split(',')
        .filter_map(|part| part.trim().parse::<f64>().ok())
        .collect()
}
