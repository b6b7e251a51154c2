use std::sync::Arc;

use noticeboard::command_handlers::{AddFormController, KeyGenerator};
use noticeboard::ui_state::{HomeState, ListContent, Overlay};
use noticeboard::{Database, DocumentStore, SnapshotEvent};
use tempfile::NamedTempFile;

async fn create_test_database() -> Database {
    let temp_file = NamedTempFile::new().unwrap();
    let (_, path) = temp_file.keep().unwrap();
    let db_url = format!("sqlite:{}?mode=rwc", path.to_str().unwrap());

    Database::connect(&db_url).await.unwrap()
}

async fn refresh(home: &mut HomeState, db: &Database) {
    let docs = db.get_ordered_announcements().await.unwrap();
    home.apply_event(SnapshotEvent::Snapshot(docs));
}

#[tokio::test]
async fn test_empty_board_shows_placeholder() {
    let db = create_test_database().await;
    let mut home = HomeState::new();
    assert_eq!(home.list_content(), ListContent::Loading);

    refresh(&mut home, &db).await;

    assert_eq!(home.list_content(), ListContent::Empty("NO ANNOUNCEMENTS"));
    assert_eq!(home.overlay(), Overlay::None);
}

#[tokio::test]
async fn test_post_and_open_announcement() {
    let db = create_test_database().await;
    let keys: KeyGenerator = Arc::new(|| "bake-sale".to_string());
    let store: Arc<dyn DocumentStore> = Arc::new(db.clone());
    let controller = AddFormController::new(store, keys);
    let mut home = HomeState::new();
    refresh(&mut home, &db).await;

    // Open the form and fill it in.
    home.toggle_add_form();
    assert_eq!(home.overlay(), Overlay::AddForm);
    home.form.title = "Bake sale".to_string();
    home.form.content = "Tuesday in the lobby\nBring cash".to_string();

    let payload = home.begin_submit().expect("form is valid");
    let result = controller.write(payload).await.map_err(|e| e.to_string());
    home.finish_submit(result);

    assert_eq!(home.overlay(), Overlay::None);
    assert!(home.form.title.is_empty());

    refresh(&mut home, &db).await;
    let rows = match home.list_content() {
        ListContent::Rows(rows) => rows.to_vec(),
        other => panic!("expected rows, got {:?}", other),
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, "bake-sale");

    home.select(&rows[0].key);
    assert_eq!(home.overlay(), Overlay::DetailPopup);
    let record = home.selected_announcement().unwrap();
    assert_eq!(record.title, "Bake sale");
    assert_eq!(record.preview(), "Tuesday in the lobby");

    home.back_pressed();
    assert_eq!(home.overlay(), Overlay::None);
}

#[tokio::test]
async fn test_missing_content_is_rejected_before_writing() {
    let db = create_test_database().await;
    let mut home = HomeState::new();

    home.toggle_add_form();
    home.form.title = "Only a title".to_string();

    assert!(home.begin_submit().is_none());
    assert_eq!(home.overlay(), Overlay::Alert);
    assert_eq!(home.alert.as_ref().unwrap().message, "Title and content cannot be empty");

    home.dismiss_alert();
    assert_eq!(home.overlay(), Overlay::AddForm);
    assert_eq!(db.count_announcements().await.unwrap(), 0);
}
