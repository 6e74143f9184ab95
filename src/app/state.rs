use std::fs;

use fltk::{
    app::Sender,
    dialog,
    enums::Font,
    frame::Frame,
    menu::MenuBar,
    prelude::*,
    text::{TextBuffer, TextEditor},
    window::Window,
};

use super::error::AppError;
use super::messages::Message;
use super::settings::AppSettings;
use super::tab_registry::TabRegistry;
use super::text_ops::{cursor_line_col, find_wrapping, replace_all_literal};
use super::theme_store::{ThemeStore, UNSTYLED};
use crate::ui::dialogs::replace::show_replace_dialog;
use crate::ui::dialogs::theme_picker::show_theme_picker;
use crate::ui::file_dialogs::{native_open_dialog, native_save_dialog};
use crate::ui::main_window::MainWidgets;
use crate::ui::tab_bar::TabBar;
use crate::ui::theme::apply_palette;

pub const DEFAULT_FONT_SIZE: i32 = 14;
pub const MIN_FONT_SIZE: i32 = 6;

/// The application context: every handler receives this instead of reaching
/// for globals. Constructed once at startup with its dependencies.
pub struct AppState {
    pub tab_registry: TabRegistry,
    pub settings: AppSettings,
    pub theme_store: ThemeStore,
    pub editor: TextEditor,
    pub window: Window,
    pub menu: MenuBar,
    pub tab_bar: TabBar,
    pub status_bar: Frame,
    font_size: i32,
    last_search: Option<String>,
    /// Last directory used in a file open/save dialog.
    last_open_directory: Option<String>,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        sender: Sender<Message>,
        settings: AppSettings,
        theme_store: ThemeStore,
    ) -> Self {
        let mut tab_registry = TabRegistry::new(sender.clone());
        tab_registry.insert_untitled();

        let mut editor = widgets.text_editor;
        editor.set_text_font(Font::Courier);
        editor.set_text_size(DEFAULT_FONT_SIZE);

        let mut state = Self {
            tab_registry,
            settings,
            theme_store,
            editor,
            window: widgets.wind,
            menu: widgets.menu,
            tab_bar: widgets.tab_bar,
            status_bar: widgets.status_bar,
            font_size: DEFAULT_FONT_SIZE,
            last_search: None,
            last_open_directory: None,
        };
        state.bind_active_buffer();
        let theme = state.settings.theme.clone();
        state.apply_theme(&theme);
        state.refresh_all();
        state
    }

    /// Bind the active document's buffer to the editor. With no documents
    /// left the editor gets a detached scratch buffer.
    pub fn bind_active_buffer(&mut self) {
        match self.tab_registry.active_document() {
            Some(doc) => self.editor.set_buffer(doc.buffer.clone()),
            None => self.editor.set_buffer(TextBuffer::default()),
        }
    }

    pub fn update_window_title(&mut self) {
        if let Some(doc) = self.tab_registry.active_document() {
            let prefix = if doc.is_dirty() { "*" } else { "" };
            self.window
                .set_label(&format!("{}{} - QuillPad", prefix, doc.display_name));
        } else {
            self.window.set_label("QuillPad");
        }
    }

    pub fn update_status(&mut self) {
        let label = match self.tab_registry.active_document() {
            Some(doc) => {
                let text = doc.text();
                let pos = self.editor.insert_position().max(0) as usize;
                let (line, col) = cursor_line_col(&text, pos);
                format!("Ln {}, Col {}, Ch {}", line, col, text.chars().count())
            }
            None => "Ln 1, Col 1, Ch 0".to_string(),
        };
        self.status_bar.set_label(&label);
    }

    /// One-shot status message; overwritten by the next cursor update.
    pub fn show_status(&mut self, message: &str) {
        self.status_bar.set_label(message);
    }

    pub fn rebuild_tab_bar(&mut self) {
        let active = self.tab_registry.active_index();
        self.tab_bar.rebuild(self.tab_registry.documents(), active);
    }

    pub fn refresh_all(&mut self) {
        self.update_window_title();
        self.update_status();
        self.rebuild_tab_bar();
    }

    // --- Tabs ---

    pub fn insert_new_tab(&mut self) {
        self.tab_registry.insert_untitled();
        self.bind_active_buffer();
        self.refresh_all();
    }

    /// Switch focus to a tab; no-op for the sentinel or out of range.
    pub fn switch_to_tab(&mut self, index: usize) {
        if self.tab_registry.is_sentinel(index) {
            return;
        }
        let cursor = self.editor.insert_position();
        if let Some(current) = self.tab_registry.active_document_mut() {
            current.cursor_position = cursor;
        }

        self.tab_registry.activate(index);

        if let Some(doc) = self.tab_registry.active_document() {
            let buffer = doc.buffer.clone();
            let cursor = doc.cursor_position;
            self.editor.set_buffer(buffer);
            self.editor.set_insert_position(cursor);
            self.editor.show_insert_position();
        }
        self.refresh_all();
    }

    /// Close a tab, resolving unsaved changes with the user first.
    /// Returns false when the close was aborted or the index was the
    /// sentinel.
    pub fn close_tab(&mut self, index: usize) -> bool {
        let Some(doc) = self.tab_registry.document_at(index) else {
            return false;
        };

        if doc.is_dirty() {
            let name = doc.display_name.clone();
            let choice = dialog::choice2_default(
                &format!("\"{}\" has unsaved changes.", name),
                "Save",
                "Discard",
                "Cancel",
            );
            match choice {
                Some(0) => {
                    let previous = self.tab_registry.active_index();
                    if previous != index {
                        self.switch_to_tab(index);
                    }
                    self.file_save(index);
                    let still_dirty = self
                        .tab_registry
                        .document_at(index)
                        .is_some_and(|d| d.is_dirty());
                    if still_dirty {
                        // Save-as was cancelled or the write failed.
                        if previous != index {
                            self.switch_to_tab(previous);
                        }
                        return false;
                    }
                }
                Some(1) => {}
                _ => return false,
            }
        }

        self.tab_registry.close(index);
        self.bind_active_buffer();
        if let Some(doc) = self.tab_registry.active_document() {
            let cursor = doc.cursor_position;
            self.editor.set_insert_position(cursor);
        }
        self.refresh_all();
        true
    }

    // --- File operations ---

    pub fn file_open(&mut self) {
        if let Some(path) = native_open_dialog(self.last_open_directory.as_deref()) {
            self.open_file(path);
        }
    }

    pub fn open_file(&mut self, path: String) {
        // A file already open in some tab just gets focused again.
        if let Some(existing) = self.tab_registry.find_by_path(&path) {
            self.switch_to_tab(existing);
            return;
        }

        if let Some(parent) = std::path::Path::new(&path).parent() {
            self.last_open_directory = Some(parent.to_string_lossy().to_string());
        }

        match fs::read_to_string(&path) {
            Ok(content) => {
                self.tab_registry.adopt_file(path, &content);
                self.bind_active_buffer();
                self.editor.set_insert_position(0);
                self.refresh_all();
            }
            Err(e) => {
                let err = AppError::Open { path, source: e };
                dialog::alert_default(&err.to_string());
            }
        }
    }

    pub fn file_save(&mut self, index: usize) {
        let (path, text) = {
            let Some(doc) = self.tab_registry.document_at(index) else {
                return;
            };
            // A clean, bound document needs no write.
            if !doc.needs_save() {
                return;
            }
            (doc.file_path.clone(), doc.text())
        };

        let Some(path) = path else {
            self.file_save_as(index);
            return;
        };

        match fs::write(&path, &text) {
            Ok(_) => {
                if let Some(doc) = self.tab_registry.document_at_mut(index) {
                    doc.mark_clean();
                }
                let name = super::text_ops::extract_filename(&path);
                self.show_status(&format!("Saved {}", name));
                self.update_window_title();
                self.rebuild_tab_bar();
            }
            Err(e) => {
                let err = AppError::Save { path, source: e };
                dialog::alert_default(&err.to_string());
            }
        }
    }

    pub fn file_save_as(&mut self, index: usize) {
        let text = {
            let Some(doc) = self.tab_registry.document_at(index) else {
                return;
            };
            doc.text()
        };

        let Some(path) = native_save_dialog(self.last_open_directory.as_deref()) else {
            return;
        };
        if let Some(parent) = std::path::Path::new(&path).parent() {
            self.last_open_directory = Some(parent.to_string_lossy().to_string());
        }

        match fs::write(&path, &text) {
            Ok(_) => {
                if let Some(doc) = self.tab_registry.document_at_mut(index) {
                    doc.file_path = Some(path.clone());
                    doc.update_display_name();
                    doc.mark_clean();
                }
                let name = super::text_ops::extract_filename(&path);
                self.show_status(&format!("Saved as {}", name));
                self.update_window_title();
                self.rebuild_tab_bar();
            }
            Err(e) => {
                let err = AppError::Save { path, source: e };
                dialog::alert_default(&err.to_string());
            }
        }
    }

    /// Save every real document in index order; a failure on one does not
    /// abort the remaining saves.
    pub fn save_all(&mut self) {
        for index in 0..self.tab_registry.real_count() {
            self.file_save(index);
        }
    }

    // --- Find / Replace ---

    pub fn show_find(&mut self) {
        let default = self.last_search.clone().unwrap_or_default();
        let Some(term) = dialog::input_default("Text to find:", &default) else {
            return;
        };
        if term.is_empty() {
            return;
        }
        self.last_search = Some(term.clone());
        self.find_in_active(&term);
    }

    pub fn find_next(&mut self) {
        match self.last_search.clone() {
            Some(term) => self.find_in_active(&term),
            None => self.show_find(),
        }
    }

    /// Case-sensitive forward search from the cursor, wrapping once.
    fn find_in_active(&mut self, term: &str) {
        if term.is_empty() {
            return;
        }
        let Some(doc) = self.tab_registry.active_document() else {
            return;
        };
        let text = doc.text();
        let start = self.editor.insert_position().max(0) as usize;

        match find_wrapping(&text, term, start) {
            Some(pos) => {
                let end = pos + term.len();
                doc.buffer.clone().select(pos as i32, end as i32);
                self.editor.set_insert_position(end as i32);
                self.editor.show_insert_position();
                self.update_status();
            }
            None => {
                dialog::message_default(&format!("'{}' not found.", term));
            }
        }
    }

    pub fn show_replace(&mut self) {
        let Some((find, with)) = show_replace_dialog() else {
            return;
        };
        // Replacing the empty string is a textual no-op.
        if find.is_empty() {
            return;
        }
        let Some(doc) = self.tab_registry.active_document() else {
            return;
        };

        let (new_text, count) = replace_all_literal(&doc.text(), &find, &with);
        if count > 0 {
            doc.buffer.clone().set_text(&new_text);
            self.editor.set_insert_position(0);
        }
        self.show_status(&format!("Replaced '{}' with '{}'", find, with));
        self.update_window_title();
        self.rebuild_tab_bar();
    }

    // --- Zoom ---

    fn set_font_size(&mut self, size: i32) {
        self.font_size = size.max(MIN_FONT_SIZE);
        self.editor.set_text_size(self.font_size);
        self.editor.redraw();
    }

    pub fn zoom_in(&mut self) {
        self.set_font_size(self.font_size + 1);
    }

    pub fn zoom_out(&mut self) {
        self.set_font_size(self.font_size - 1);
    }

    // --- Themes ---

    /// Resolve and apply a theme. Resolution failure leaves the widgets
    /// unstyled; the name is still the current choice.
    pub fn apply_theme(&mut self, name: &str) {
        let palette = self.theme_store.resolve(name);
        apply_palette(
            &mut self.editor,
            &mut self.window,
            &mut self.menu,
            &mut self.status_bar,
            palette.as_ref(),
        );
        self.tab_bar
            .apply_palette(palette.as_ref().unwrap_or(&UNSTYLED));
    }

    pub fn open_theme_picker(&mut self) {
        let themes = self.theme_store.list_themes();
        let Some(chosen) = show_theme_picker(&themes, &self.settings.theme) else {
            return;
        };
        self.settings.theme = chosen.clone();
        self.apply_theme(&chosen);
        if let Err(e) = self.settings.save() {
            eprintln!("Failed to save settings: {}", e);
        }
        self.show_status(&format!("Theme changed to {}", chosen));
    }

    // --- Quit ---

    /// Handle a quit request. Returns true if the app should exit.
    pub fn file_quit(&mut self) -> bool {
        if !self.tab_registry.any_dirty() {
            return true;
        }
        let choice = dialog::choice2_default(
            "You have unsaved changes. Quit anyway?",
            "Quit",
            "Cancel",
            "",
        );
        choice == Some(0)
    }
}
