//! Inbound commands driving the edit-screen controller.

/// The closed set of instructions the view can send to the editor.
///
/// Field-change variants map one-to-one onto snapshot fields, apply
/// synchronously and never fail. `Save`, `Delete` and `NavigateBack` start
/// asynchronous work bound to the editor's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    NameChanged(String),
    KindChanged(String),
    SpriteChanged(String),
    DateChanged(String),
    PlaceChanged(String),
    GameChanged(String),
    NotesChanged(String),
    CaughtChanged(bool),
    DexNoChanged(String),
    Save,
    Delete,
    NavigateBack,
}

impl EditorCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::NameChanged(_) => "name_changed",
            EditorCommand::KindChanged(_) => "kind_changed",
            EditorCommand::SpriteChanged(_) => "sprite_changed",
            EditorCommand::DateChanged(_) => "date_changed",
            EditorCommand::PlaceChanged(_) => "place_changed",
            EditorCommand::GameChanged(_) => "game_changed",
            EditorCommand::NotesChanged(_) => "notes_changed",
            EditorCommand::CaughtChanged(_) => "caught_changed",
            EditorCommand::DexNoChanged(_) => "dex_no_changed",
            EditorCommand::Save => "save",
            EditorCommand::Delete => "delete",
            EditorCommand::NavigateBack => "navigate_back",
        }
    }
}
