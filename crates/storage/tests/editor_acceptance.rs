use std::sync::Arc;
use std::time::Duration;

use editor_core::{EditorCommand, EditorState, RecordEditor, UiDirective};
use shared::domain::{CatchRecord, RecordId};
use storage::Storage;
use tokio::time::timeout;
use tokio_stream::StreamExt;

async fn seeded_storage() -> (Storage, RecordId) {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let id = storage
        .insert_record(&CatchRecord {
            name: "Pika".to_string(),
            kind: "electric".to_string(),
            sprite: "pikachu.png".to_string(),
            date: "1999-02-27".to_string(),
            place: "Route 2".to_string(),
            game: "Yellow".to_string(),
            notes: String::new(),
            caught: false,
            dex_no: "025".to_string(),
            ..CatchRecord::default()
        })
        .await
        .expect("seed record");
    (storage, id)
}

async fn wait_for_load(editor: &RecordEditor, id: RecordId) -> EditorState {
    let mut states = editor.observe();
    timeout(Duration::from_secs(1), async {
        loop {
            let state = states.next().await.expect("state stream stays open");
            if state.id == Some(id) {
                return state;
            }
        }
    })
    .await
    .expect("initial load within deadline")
}

async fn expect_navigate_back(
    directives: &mut tokio_stream::wrappers::ReceiverStream<UiDirective>,
) {
    let directive = timeout(Duration::from_secs(1), directives.next())
        .await
        .expect("directive within deadline")
        .expect("directive stream stays open");
    assert_eq!(directive, UiDirective::NavigateBack);
}

#[tokio::test]
async fn editing_an_existing_record_saves_through_update() {
    let (storage, id) = seeded_storage().await;
    let editor = RecordEditor::new(Arc::new(storage.clone()), Some(&id.0.to_string()));
    let mut directives = editor.directives().expect("directive stream");

    let loaded = wait_for_load(&editor, id).await;
    assert_eq!(loaded.name, "Pika");
    assert!(!loaded.caught);

    editor.dispatch(EditorCommand::CaughtChanged(true));
    editor.dispatch(EditorCommand::PlaceChanged("Viridian Forest".to_string()));
    editor.dispatch(EditorCommand::Save);
    expect_navigate_back(&mut directives).await;

    let stored = storage.load_record(id).await.expect("load").expect("row");
    assert!(stored.caught);
    assert_eq!(stored.place, "Viridian Forest");
    assert_eq!(stored.name, "Pika");
}

#[tokio::test]
async fn a_new_record_saves_through_create() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let editor = RecordEditor::new(Arc::new(storage.clone()), None);
    let mut directives = editor.directives().expect("directive stream");

    editor.dispatch(EditorCommand::NameChanged("Bulba".to_string()));
    editor.dispatch(EditorCommand::KindChanged("grass".to_string()));
    editor.dispatch(EditorCommand::DexNoChanged("001".to_string()));
    editor.dispatch(EditorCommand::Save);
    expect_navigate_back(&mut directives).await;

    let records = storage.list_records().await.expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Bulba");
    assert_eq!(records[0].kind, "grass");
    assert!(records[0].id.is_some());
}

#[tokio::test]
async fn deleting_an_existing_record_clears_the_store() {
    let (storage, id) = seeded_storage().await;
    let editor = RecordEditor::new(Arc::new(storage.clone()), Some(&id.0.to_string()));
    let mut directives = editor.directives().expect("directive stream");
    wait_for_load(&editor, id).await;

    editor.dispatch(EditorCommand::Delete);
    expect_navigate_back(&mut directives).await;

    assert!(storage.list_records().await.expect("list").is_empty());
}
