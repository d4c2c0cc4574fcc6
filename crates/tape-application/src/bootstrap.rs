//! Wires repositories and stores into a ready `StudioUseCase`.

use crate::studio_usecase::StudioUseCase;
use anyhow::Result;
use std::sync::Arc;
use tape_core::auth::AuthStore;
use tape_core::chat::ChatStore;
use tape_core::config::AppConfig;
use tape_core::scene::{RenderSettings, SceneSession};
use tape_core::state::{Preferences, PreferencesRepository};
use tape_core::storage::LocalStorage;
use tape_infrastructure::{
    LocalStorageChatRepository, LocalStoragePreferencesRepository, LocalStorageSessionRepository,
    LocalStorageUserRepository,
};

/// Builds the studio over `storage`: restores the session, loads chats and
/// replays the current chat's last object.
pub async fn bootstrap(config: AppConfig, storage: Arc<dyn LocalStorage>) -> Result<StudioUseCase> {
    let preferences_repository: Arc<dyn PreferencesRepository> =
        Arc::new(LocalStoragePreferencesRepository::new(storage.clone()));
    let preferences = preferences_repository.load().await.unwrap_or_else(|e| {
        tracing::error!("Failed to load preferences: {}", e);
        Preferences::default()
    });

    let auth = AuthStore::restore(
        Arc::new(LocalStorageUserRepository::new(storage.clone())),
        Arc::new(LocalStorageSessionRepository::new(storage.clone())),
    )
    .await;

    let chats = ChatStore::load(Arc::new(LocalStorageChatRepository::new(storage))).await;
    let scene = SceneSession::new(RenderSettings::from(&config));

    let mut studio = StudioUseCase::new(
        config,
        chats,
        scene,
        auth,
        preferences_repository,
        preferences,
    );
    let replayed = studio.replay_current();

    tracing::info!(
        chats = studio.chats().len(),
        replayed,
        signed_in = studio.current_user().is_some(),
        "Studio ready"
    );
    Ok(studio)
}
