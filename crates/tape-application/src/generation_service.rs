//! Prompt generation with simulated model latency.

use std::time::Duration;
use tape_core::config::{AiProvider, AppConfig};
use tape_core::generation::{Classification, ObjectDescriptor, classify, synthesize};

/// Result of one generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub prompt: String,
    pub classification: Classification,
    pub descriptor: ObjectDescriptor,
}

/// Runs the classifier behind a cosmetic "thinking" delay.
///
/// Cheap to clone so each submission can run without holding application
/// state.
#[derive(Debug, Clone)]
pub struct GenerationService {
    provider: AiProvider,
    delay: Duration,
}

impl GenerationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            provider: config.ai_provider,
            delay: Duration::from_millis(config.generation_delay_ms),
        }
    }

    /// Generates an object description. Never fails and cannot be cancelled.
    pub async fn generate(&self, prompt: &str) -> Generation {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.provider {
            AiProvider::Gemini => {
                tracing::info!(prompt, "Generating with gemini provider (local classifier)")
            }
            AiProvider::Local => tracing::info!(prompt, "Generating with local classifier"),
        }

        let classification = classify(prompt);
        let descriptor = synthesize(&classification);
        Generation {
            prompt: prompt.to_string(),
            classification,
            descriptor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tape_core::generation::ShapeKind;

    #[tokio::test(start_paused = true)]
    async fn test_generate_waits_configured_delay() {
        let service = GenerationService::new(&AppConfig::default());
        let started = tokio::time::Instant::now();

        let generation = service.generate("large red cube").await;

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(generation.classification.shape, ShapeKind::Cube);
        assert_eq!(generation.descriptor.geometry.params, vec![3.0, 3.0, 3.0]);
    }

    #[tokio::test]
    async fn test_providers_behave_identically() {
        let local = GenerationService::new(&AppConfig {
            generation_delay_ms: 0,
            ..AppConfig::default()
        });
        let gemini = GenerationService::new(&AppConfig {
            generation_delay_ms: 0,
            ai_provider: AiProvider::Gemini,
            ..AppConfig::default()
        });

        assert_eq!(
            local.generate("glass torus").await,
            gemini.generate("glass torus").await
        );
    }
}
