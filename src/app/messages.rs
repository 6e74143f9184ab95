use super::document::DocumentId;

/// All messages that can be sent through the FLTK channel.
/// Each menu callback, tab-bar hit, and input binding sends one of these;
/// the dispatch loop in main handles them.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // File
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    FileSaveAll,
    FileQuit,
    WindowClose,

    // Tabs
    TabActivate(usize),
    TabClose(usize),
    TabCloseActive,

    // Edit
    ShowFind,
    FindNext,
    ShowReplace,

    // View
    ZoomIn,
    ZoomOut,

    // Settings
    OpenThemePicker,

    // Document state
    BufferModified(DocumentId),
    StatusRefresh,
}
