//! Scene session: the live group of shown objects.

use super::materializer::materialize;
use super::node::SceneNode;
use crate::chat::Chat;
use crate::config::AppConfig;

/// Render pipeline switches taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSettings {
    pub post_processing: bool,
    pub physics: bool,
}

impl From<&AppConfig> for RenderSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            post_processing: config.enable_post_processing,
            physics: config.enable_physics,
        }
    }
}

/// Owns the "current objects" group of the scene.
#[derive(Debug, Default)]
pub struct SceneSession {
    children: Vec<SceneNode>,
    settings: RenderSettings,
}

impl SceneSession {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            children: Vec::new(),
            settings,
        }
    }

    /// Removes every object from the group.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Replaces the group contents with `node`.
    pub fn show(&mut self, node: SceneNode) {
        self.clear();
        self.children.push(node);
    }

    /// Rebuilds the object of the chat's latest successful generation.
    ///
    /// The scene is cleared first. A descriptor that no longer materializes
    /// is logged and the scene stays empty; the chat record is not touched.
    /// Returns whether an object is now shown.
    pub fn materialize_last_object_of(&mut self, chat: &Chat) -> bool {
        self.clear();
        let Some(descriptor) = chat.last_object() else {
            return false;
        };

        match materialize(descriptor) {
            Ok(node) => {
                self.children.push(node);
                true
            }
            Err(e) => {
                tracing::warn!(chat_id = %chat.id, "Failed to restore object: {}", e);
                false
            }
        }
    }

    /// Runs one animation frame on every shown object.
    pub fn tick(&mut self, elapsed_ms: f64) {
        for node in &mut self.children {
            node.animate(elapsed_ms);
        }
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn settings(&self) -> RenderSettings {
        self.settings
    }
}
