//! Studio use case: the explicit application state behind the shell.
//!
//! `StudioUseCase` owns the chat store, the scene, the auth store and the
//! preferences, and is the only place that applies the side effects which
//! couple them (scene cleared on new chat, replay on switch, and so on).

use crate::generation_service::GenerationService;
use crate::notice::Notice;
use anyhow::Result;
use std::sync::Arc;
use tape_core::auth::{AuthError, AuthStore, SessionUser};
use tape_core::chat::{Chat, ChatListSnapshot, ChatMessage, ChatStore, DeleteOutcome};
use tape_core::config::AppConfig;
use tape_core::generation::ObjectDescriptor;
use tape_core::scene::{SceneNode, SceneSession, materialize};
use tape_core::state::{Preferences, PreferencesRepository, Theme, is_supported_model};
use tokio::sync::{Mutex, watch};

const FIRST_RUN_NOTICE: &str = "Objects are generated locally from keywords in your prompt. \
Try shapes like sphere, cube or torus with colors, materials and motion.";

pub struct StudioUseCase {
    config: AppConfig,
    generation: GenerationService,
    chats: ChatStore,
    scene: SceneSession,
    auth: AuthStore,
    preferences_repository: Arc<dyn PreferencesRepository>,
    preferences: Preferences,
}

impl StudioUseCase {
    pub fn new(
        config: AppConfig,
        chats: ChatStore,
        scene: SceneSession,
        auth: AuthStore,
        preferences_repository: Arc<dyn PreferencesRepository>,
        preferences: Preferences,
    ) -> Self {
        Self {
            generation: GenerationService::new(&config),
            config,
            chats,
            scene,
            auth,
            preferences_repository,
            preferences,
        }
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    pub fn generation_service(&self) -> GenerationService {
        self.generation.clone()
    }

    /// Generates and applies a prompt while holding the studio.
    pub async fn submit_prompt(&mut self, prompt: &str) -> Result<Notice> {
        let generation = self.generation.generate(prompt).await;
        self.apply_generation(&generation.prompt, generation.descriptor)
            .await
    }

    /// Shows the generated object and records the prompt in the current chat.
    ///
    /// A descriptor that fails to materialize is replaced by the fallback
    /// node and recorded as an error message.
    pub async fn apply_generation(
        &mut self,
        prompt: &str,
        descriptor: ObjectDescriptor,
    ) -> Result<Notice> {
        match materialize(&descriptor) {
            Ok(node) => {
                let shape = node.geometry.shape();
                self.scene.show(node);
                self.chats
                    .append_message(ChatMessage::generated(prompt, descriptor))
                    .await?;
                Ok(Notice::success(format!("Generated a {}", shape)))
            }
            Err(e) => {
                tracing::error!(prompt, "Generation failed, showing fallback: {}", e);
                self.scene.show(SceneNode::fallback());
                self.chats
                    .append_message(ChatMessage::failed(prompt, e.to_string()))
                    .await?;
                Ok(Notice::error(format!(
                    "Could not build that object, showing a placeholder ({})",
                    e
                )))
            }
        }
    }

    // ------------------------------------------------------------------
    // Chats
    // ------------------------------------------------------------------

    pub async fn new_chat(&mut self) -> Result<String> {
        let id = self.chats.create().await?;
        self.scene.clear();
        Ok(id)
    }

    /// Switches chats and replays the chosen chat's last object. Returns
    /// whether an object is shown.
    pub async fn switch_chat(&mut self, id: &str) -> Result<bool> {
        self.chats.switch_to(id).await?;
        Ok(self.scene.materialize_last_object_of(self.chats.current()))
    }

    pub async fn rename_chat(&mut self, id: &str, name: &str) -> Result<()> {
        self.chats.rename(id, name).await?;
        Ok(())
    }

    pub async fn delete_chat(&mut self, id: &str) -> Result<DeleteOutcome> {
        let outcome = self.chats.delete(id).await?;
        match &outcome {
            DeleteOutcome::Removed => {}
            DeleteOutcome::SwitchedTo(_) => {
                self.scene.materialize_last_object_of(self.chats.current());
            }
            DeleteOutcome::Recreated(_) => self.scene.clear(),
        }
        Ok(outcome)
    }

    /// Shows the current chat's last object, as done at startup.
    pub fn replay_current(&mut self) -> bool {
        self.scene.materialize_last_object_of(self.chats.current())
    }

    pub fn chats(&self) -> &[Chat] {
        self.chats.chats()
    }

    pub fn current_chat(&self) -> &Chat {
        self.chats.current()
    }

    pub fn subscribe_chats(&self) -> watch::Receiver<ChatListSnapshot> {
        self.chats.subscribe()
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn sign_up(&mut self, name: &str, email: &str, password: &str) -> Notice {
        match self.auth.sign_up(name, email, password).await {
            Ok(user) => Notice::success(format!("Welcome, {}!", user.name)),
            Err(e) => auth_notice(e),
        }
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Notice {
        match self.auth.sign_in(email, password).await {
            Ok(user) => Notice::success(format!("Welcome back, {}!", user.name)),
            Err(e) => auth_notice(e),
        }
    }

    pub async fn sign_out(&mut self) -> Notice {
        match self.auth.sign_out().await {
            Ok(()) => Notice::info("Signed out"),
            Err(e) => auth_notice(e),
        }
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.auth.current_user()
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    pub async fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.preferences.theme.toggled();
        self.preferences_repository.set_theme(theme).await?;
        self.preferences.theme = theme;
        Ok(theme)
    }

    pub async fn select_model(&mut self, model: &str) -> Result<Notice> {
        if !is_supported_model(model) {
            return Ok(Notice::warning(format!("Unknown model '{}'", model)));
        }
        self.preferences_repository.set_model(model).await?;
        self.preferences.model = model.to_string();
        Ok(Notice::info(format!("Model set to {}", model)))
    }

    /// The notice to show on first start, until acknowledged.
    pub fn first_run_notice(&self) -> Option<Notice> {
        (!self.preferences.first_run_notice_seen).then(|| Notice::info(FIRST_RUN_NOTICE))
    }

    pub async fn acknowledge_first_run_notice(&mut self) -> Result<()> {
        if !self.preferences.first_run_notice_seen {
            self.preferences_repository
                .mark_first_run_notice_seen()
                .await?;
            self.preferences.first_run_notice_seen = true;
        }
        Ok(())
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    // ------------------------------------------------------------------
    // Scene
    // ------------------------------------------------------------------

    /// Runs one animation frame.
    pub fn tick(&mut self, elapsed_ms: f64) {
        self.scene.tick(elapsed_ms);
    }

    pub fn scene(&self) -> &SceneSession {
        &self.scene
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

fn auth_notice(error: AuthError) -> Notice {
    match error {
        AuthError::Storage(e) => {
            tracing::error!("Auth storage failure: {}", e);
            Notice::error("Could not save account data")
        }
        other => Notice::error(other.to_string()),
    }
}

/// Runs one submission against a shared studio.
///
/// The studio is only locked to read the generation service and to apply
/// the result, so overlapping submissions proceed independently and the
/// last one to finish determines the shown object.
pub async fn submit_shared(studio: &Arc<Mutex<StudioUseCase>>, prompt: &str) -> Result<Notice> {
    let service = studio.lock().await.generation_service();
    let generation = service.generate(prompt).await;
    studio
        .lock()
        .await
        .apply_generation(&generation.prompt, generation.descriptor)
        .await
}
