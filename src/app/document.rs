use std::cell::Cell;
use std::rc::Rc;

use fltk::app::Sender;
use fltk::text::TextBuffer;

use super::messages::Message;
use super::text_ops::extract_filename;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// One in-memory text buffer with a dirty flag and an optional file binding.
pub struct Document {
    pub id: DocumentId,
    pub buffer: TextBuffer,
    pub file_path: Option<String>,
    pub has_unsaved_changes: Rc<Cell<bool>>,
    pub display_name: String,
    pub cursor_position: i32,
}

impl Document {
    fn new(id: DocumentId, display_name: String, content: &str, sender: Sender<Message>) -> Self {
        let mut buffer = TextBuffer::default();
        let has_unsaved_changes = Rc::new(Cell::new(false));

        let changes = has_unsaved_changes.clone();
        let doc_id = id;
        buffer.add_modify_callback(move |_pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                changes.set(true);
                sender.send(Message::BufferModified(doc_id));
            }
        });

        if !content.is_empty() {
            buffer.set_text(content);
        }
        // Programmatic fill is not an edit.
        has_unsaved_changes.set(false);

        Self {
            id,
            buffer,
            file_path: None,
            has_unsaved_changes,
            display_name,
            cursor_position: 0,
        }
    }

    pub fn new_untitled(id: DocumentId, counter: u32, sender: Sender<Message>) -> Self {
        let display_name = if counter <= 1 {
            "Untitled".to_string()
        } else {
            format!("Untitled {}", counter)
        };
        Self::new(id, display_name, "", sender)
    }

    /// A document with initial content and an explicit title, not yet bound
    /// to any file.
    pub fn new_with_content(
        id: DocumentId,
        title: &str,
        content: &str,
        sender: Sender<Message>,
    ) -> Self {
        Self::new(id, title.to_string(), content, sender)
    }

    pub fn new_from_file(
        id: DocumentId,
        path: String,
        content: &str,
        sender: Sender<Message>,
    ) -> Self {
        let display_name = extract_filename(&path);
        let mut doc = Self::new(id, display_name, content, sender);
        doc.file_path = Some(path);
        doc
    }

    pub fn is_dirty(&self) -> bool {
        self.has_unsaved_changes.get()
    }

    pub fn mark_clean(&self) {
        self.has_unsaved_changes.set(false);
    }

    /// True for the reusable open-target: never saved, never titled by a
    /// file, and still empty.
    pub fn is_blank_untitled(&self) -> bool {
        self.file_path.is_none() && self.buffer.length() == 0
    }

    /// Whether a save would actually write: dirty content, or no bound path
    /// yet. A clean, bound document saves as a no-op.
    pub fn needs_save(&self) -> bool {
        self.is_dirty() || self.file_path.is_none()
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn update_display_name(&mut self) {
        if let Some(ref path) = self.file_path {
            self.display_name = extract_filename(path);
        }
    }

    /// Release the buffer contents when a tab closes.
    pub fn cleanup(&mut self) {
        self.buffer.set_text("");
    }
}
