use async_trait::async_trait;
use std::sync::Arc;
use tape_application::{NoticeLevel, StudioUseCase, bootstrap, submit_shared};
use tape_core::chat::{DeleteOutcome, MessageRole};
use tape_core::config::AppConfig;
use tape_core::generation::{Color, MaterialPreset, ShapeKind, classify, synthesize};
use tape_core::scene::{Geometry, SceneNode, materialize};
use tape_core::state::Theme;
use tape_core::storage::{LocalStorage, keys};
use tape_core::{Result as TapeResult, TapeError};
use tape_infrastructure::{FileLocalStorage, MemoryLocalStorage};
use tempfile::TempDir;
use tokio::sync::Mutex;

fn instant_config() -> AppConfig {
    AppConfig {
        generation_delay_ms: 0,
        ..AppConfig::default()
    }
}

async fn studio() -> (StudioUseCase, Arc<MemoryLocalStorage>) {
    let storage = Arc::new(MemoryLocalStorage::new());
    let studio = bootstrap(instant_config(), storage.clone()).await.unwrap();
    (studio, storage)
}

#[tokio::test]
async fn large_red_cube_is_generated_shown_and_recorded() {
    let classification = classify("large red cube");
    assert_eq!(classification.shape, ShapeKind::Cube);
    assert_eq!(classification.color, Color(0xff0000));
    assert_eq!(classification.material, MaterialPreset::Default);
    assert_eq!(classification.animation, ShapeKind::Cube.entry().animation);
    assert!(classification.size_multiplier > 1.0);

    let (mut studio, _) = studio().await;
    let notice = studio.submit_prompt("large red cube").await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);

    let children = studio.scene().children();
    assert_eq!(children.len(), 1);
    assert_eq!(
        children[0].geometry,
        Geometry::Box {
            width: 2.0 * classification.size_multiplier,
            height: 2.0 * classification.size_multiplier,
            depth: 2.0 * classification.size_multiplier,
        }
    );

    let message = studio.current_chat().messages.last().unwrap();
    assert_eq!(message.role, MessageRole::User);
    assert_eq!(message.content, "large red cube");
    assert!(message.object.is_some());
    assert!(message.error.is_none());
    assert_eq!(studio.current_chat().name, "large red cube");
}

#[tokio::test]
async fn malformed_descriptor_falls_back_and_records_error() {
    let (mut studio, _) = studio().await;

    let mut descriptor = synthesize(&classify("blue sphere"));
    descriptor.geometry.params = vec![f64::NAN];

    let notice = studio
        .apply_generation("blue sphere", descriptor)
        .await
        .unwrap();
    assert!(notice.is_error());

    assert_eq!(studio.scene().children(), &[SceneNode::fallback()]);

    let message = studio.current_chat().messages.last().unwrap();
    assert!(message.error.is_some());
    assert!(message.object.is_none());

    let json = serde_json::to_value(message).unwrap();
    assert!(json.get("objectCode").is_none());
}

#[tokio::test]
async fn deleting_the_only_chat_leaves_exactly_one() {
    let (mut studio, _) = studio().await;
    studio.submit_prompt("green torus").await.unwrap();
    let only = studio.current_chat().id.clone();

    let outcome = studio.delete_chat(&only).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Recreated(_)));
    assert_eq!(studio.chats().len(), 1);
    assert!(studio.current_chat().messages.is_empty());
    assert!(studio.scene().children().is_empty());
}

#[tokio::test]
async fn duplicate_sign_up_keeps_first_session() {
    let (mut studio, _) = studio().await;
    let first = studio.sign_up("Ada", "ada@example.com", "pw").await;
    assert_eq!(first.level, NoticeLevel::Success);

    let second = studio.sign_up("Bob", "ada@example.com", "other").await;
    assert!(second.is_error());
    assert_eq!(studio.current_user().unwrap().name, "Ada");
}

#[tokio::test]
async fn materializing_twice_is_idempotent() {
    let descriptor = synthesize(&classify("shiny golden spinning ring"));
    assert_eq!(
        materialize(&descriptor).unwrap(),
        materialize(&descriptor).unwrap()
    );
}

#[tokio::test]
async fn switching_chats_replays_last_object() {
    let (mut studio, _) = studio().await;
    studio.submit_prompt("purple cone").await.unwrap();
    let first = studio.current_chat().id.clone();
    let shown = studio.scene().children()[0].clone();

    studio.new_chat().await.unwrap();
    assert!(studio.scene().children().is_empty());

    assert!(studio.switch_chat(&first).await.unwrap());
    assert_eq!(studio.scene().children(), &[shown]);
}

#[tokio::test]
async fn state_survives_restart_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let storage: Arc<dyn LocalStorage> =
        Arc::new(FileLocalStorage::with_dir(temp_dir.path().to_path_buf()));

    {
        let mut studio = bootstrap(instant_config(), storage.clone()).await.unwrap();
        studio.submit_prompt("small yellow cylinder").await.unwrap();
        studio.sign_up("Ada", "ada@example.com", "pw").await;
        assert_eq!(studio.toggle_theme().await.unwrap(), Theme::Light);
        studio.acknowledge_first_run_notice().await.unwrap();
    }

    let studio = bootstrap(instant_config(), storage).await.unwrap();
    assert_eq!(studio.current_chat().messages.len(), 1);
    assert_eq!(studio.scene().children().len(), 1);
    assert_eq!(studio.current_user().unwrap().email, "ada@example.com");
    assert_eq!(studio.preferences().theme, Theme::Light);
    assert!(studio.first_run_notice().is_none());
}

#[tokio::test]
async fn corrupt_storage_is_treated_as_empty() {
    let storage = Arc::new(MemoryLocalStorage::new());
    storage.set_item(keys::CHATS, "garbage").await.unwrap();
    storage.set_item(keys::USERS, "{").await.unwrap();
    storage.set_item(keys::SESSION, "nope").await.unwrap();

    let studio = bootstrap(instant_config(), storage).await.unwrap();
    assert_eq!(studio.chats().len(), 1);
    assert!(studio.current_user().is_none());
    assert!(studio.first_run_notice().is_some());
}

#[tokio::test]
async fn chat_document_is_written_under_one_key() {
    let (mut studio, storage) = studio().await;
    studio.new_chat().await.unwrap();

    let raw = storage.get_item(keys::CHATS).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["chats"].as_array().unwrap().len(), 2);
    assert_eq!(json["currentChatId"], studio.current_chat().id.as_str());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn overlapping_submissions_last_to_finish_wins() {
    let storage = Arc::new(MemoryLocalStorage::new());
    let config = AppConfig {
        generation_delay_ms: 20,
        ..AppConfig::default()
    };
    let studio = Arc::new(Mutex::new(bootstrap(config, storage).await.unwrap()));

    let handles: Vec<_> = ["red cube", "blue sphere", "gold ring"]
        .into_iter()
        .map(|prompt| {
            let studio = studio.clone();
            tokio::spawn(async move { submit_shared(&studio, prompt).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let studio = studio.lock().await;
    let messages = &studio.current_chat().messages;
    assert_eq!(messages.len(), 3);

    let last = messages.last().unwrap().object.as_ref().unwrap();
    assert_eq!(studio.scene().children(), &[materialize(last).unwrap()]);
}

#[tokio::test]
async fn unsupported_model_is_rejected_with_notice() {
    let (mut studio, _) = studio().await;
    let notice = studio.select_model("gpt-2").await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(studio.preferences().model, "gemini-1.5-flash");

    studio.select_model("gemini-1.5-pro").await.unwrap();
    assert_eq!(studio.preferences().model, "gemini-1.5-pro");
}

/// Reads succeed with nothing stored; every write fails.
struct ReadOnlyStorage;

#[async_trait]
impl LocalStorage for ReadOnlyStorage {
    async fn get_item(&self, _key: &str) -> TapeResult<Option<String>> {
        Ok(None)
    }

    async fn set_item(&self, key: &str, _value: &str) -> TapeResult<()> {
        Err(TapeError::storage(format!("{key} is read-only")))
    }

    async fn remove_item(&self, key: &str) -> TapeResult<()> {
        Err(TapeError::storage(format!("{key} is read-only")))
    }
}

#[tokio::test]
async fn unwritable_storage_does_not_stop_startup() {
    let mut studio = bootstrap(instant_config(), Arc::new(ReadOnlyStorage))
        .await
        .unwrap();
    assert_eq!(studio.chats().len(), 1);
    let current = studio.current_chat().id.clone();

    assert!(studio.new_chat().await.is_err());
    assert_eq!(studio.chats().len(), 1);
    assert_eq!(studio.current_chat().id, current);
    assert_eq!(studio.subscribe_chats().borrow().chats.len(), 1);
}
