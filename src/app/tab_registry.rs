use fltk::app::Sender;

use super::document::{Document, DocumentId};
use super::messages::Message;

/// Ordered collection of documents, one per tab slot, with a sentinel "+"
/// slot pinned after the last real document. The sentinel is an affordance
/// for creating documents and is never a document itself: every index
/// operation here rejects it explicitly.
pub struct TabRegistry {
    documents: Vec<Document>,
    active: usize,
    next_id: u64,
    untitled_counter: u32,
    sender: Sender<Message>,
}

/// Re-derive the active slot after removing `closed`. Prefers the slot that
/// now occupies the vacated position, else the new last real slot. Closing a
/// slot below the active one keeps the same document active.
fn active_after_close(closed: usize, active: usize, remaining: usize) -> usize {
    if remaining == 0 {
        return 0;
    }
    if closed < active {
        active - 1
    } else if closed == active {
        closed.min(remaining - 1)
    } else {
        active
    }
}

impl TabRegistry {
    pub fn new(sender: Sender<Message>) -> Self {
        Self {
            documents: Vec::new(),
            active: 0,
            next_id: 1,
            untitled_counter: 0,
            sender,
        }
    }

    fn next_document_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Total slots including the sentinel.
    pub fn slot_count(&self) -> usize {
        self.documents.len() + 1
    }

    /// Real documents only.
    pub fn real_count(&self) -> usize {
        self.documents.len()
    }

    pub fn sentinel_index(&self) -> usize {
        self.documents.len()
    }

    pub fn is_sentinel(&self, index: usize) -> bool {
        index == self.documents.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Insert a document immediately before the sentinel and activate it.
    pub fn insert(&mut self, content: &str, title: &str) -> usize {
        let id = self.next_document_id();
        let doc = Document::new_with_content(id, title, content, self.sender.clone());
        self.documents.push(doc);
        self.active = self.documents.len() - 1;
        self.active
    }

    pub fn insert_untitled(&mut self) -> usize {
        self.untitled_counter += 1;
        let id = self.next_document_id();
        let doc = Document::new_untitled(id, self.untitled_counter, self.sender.clone());
        self.documents.push(doc);
        self.active = self.documents.len() - 1;
        self.active
    }

    pub fn insert_from_file(&mut self, path: String, content: &str) -> usize {
        let id = self.next_document_id();
        let doc = Document::new_from_file(id, path, content, self.sender.clone());
        self.documents.push(doc);
        self.active = self.documents.len() - 1;
        self.active
    }

    /// Place freshly opened file content: when exactly one blank untitled
    /// document exists it absorbs the content and binds to the path, so blank
    /// tabs don't accumulate. Zero or several candidates get a new slot.
    pub fn adopt_file(&mut self, path: String, content: &str) -> usize {
        let candidates: Vec<usize> = self
            .documents
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_blank_untitled())
            .map(|(i, _)| i)
            .collect();

        if let [index] = candidates[..] {
            let doc = &mut self.documents[index];
            doc.buffer.set_text(content);
            doc.file_path = Some(path);
            doc.update_display_name();
            doc.mark_clean();
            self.active = index;
            index
        } else {
            self.insert_from_file(path, content)
        }
    }

    /// Remove the slot at `index`. Returns false (no-op) for the sentinel or
    /// out of range. Dirty resolution is the caller's responsibility; this
    /// only mutates the collection.
    pub fn close(&mut self, index: usize) -> bool {
        if index >= self.documents.len() {
            return false;
        }
        let mut doc = self.documents.remove(index);
        doc.cleanup();
        self.active = active_after_close(index, self.active, self.documents.len());
        true
    }

    /// Focus the slot at `index`; no-op for the sentinel or out of range.
    pub fn activate(&mut self, index: usize) {
        if index < self.documents.len() {
            self.active = index;
        }
    }

    /// Read a slot. Sentinel and out-of-range reads yield None, never panic.
    pub fn document_at(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn document_at_mut(&mut self, index: usize) -> Option<&mut Document> {
        self.documents.get_mut(index)
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.documents.get(self.active)
    }

    pub fn active_document_mut(&mut self) -> Option<&mut Document> {
        self.documents.get_mut(self.active)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn index_of(&self, id: DocumentId) -> Option<usize> {
        self.documents.iter().position(|d| d.id == id)
    }

    pub fn find_by_path(&self, path: &str) -> Option<usize> {
        self.documents
            .iter()
            .position(|d| d.file_path.as_deref() == Some(path))
    }

    pub fn any_dirty(&self) -> bool {
        self.documents.iter().any(|d| d.is_dirty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TabRegistry {
        let (sender, _receiver) = fltk::app::channel::<Message>();
        TabRegistry::new(sender)
    }

    #[test]
    fn test_new_registry_has_only_sentinel() {
        let reg = registry();
        assert_eq!(reg.slot_count(), 1);
        assert_eq!(reg.real_count(), 0);
        assert!(reg.is_sentinel(0));
        assert!(reg.document_at(0).is_none());
        assert!(reg.active_document().is_none());
    }

    #[test]
    fn test_insert_places_before_sentinel_and_activates() {
        let mut reg = registry();
        let first = reg.insert_untitled();
        assert_eq!(first, 0);
        assert_eq!(reg.slot_count(), 2);
        assert_eq!(reg.sentinel_index(), 1);
        assert_eq!(reg.active_index(), 0);

        let second = reg.insert("hello", "notes");
        assert_eq!(second, 1);
        assert_eq!(reg.sentinel_index(), 2);
        assert_eq!(reg.active_index(), 1);
        assert_eq!(reg.active_document().unwrap().display_name, "notes");
    }

    #[test]
    fn test_close_sentinel_is_noop() {
        let mut reg = registry();
        reg.insert_untitled();
        let slots = reg.slot_count();
        let active = reg.active_index();

        assert!(!reg.close(reg.sentinel_index()));
        assert!(!reg.close(99));
        assert_eq!(reg.slot_count(), slots);
        assert_eq!(reg.active_index(), active);
    }

    #[test]
    fn test_insert_close_sequences_leave_survivors_plus_sentinel() {
        let mut reg = registry();
        reg.insert_untitled();
        reg.insert_untitled();
        reg.insert_untitled();
        assert_eq!(reg.slot_count(), 4);

        assert!(reg.close(1));
        assert!(reg.close(0));
        assert_eq!(reg.slot_count(), 2);
        assert_eq!(reg.real_count(), 1);
    }

    #[test]
    fn test_close_shifts_indices_and_rederives_active() {
        // Blank doc at 0, sentinel at 1; insert a second doc; close(0).
        let mut reg = registry();
        reg.insert_untitled();
        assert_eq!(reg.active_index(), 0);
        assert_eq!(reg.sentinel_index(), 1);

        reg.insert_untitled();
        assert_eq!(reg.slot_count(), 3);
        assert_eq!(reg.active_index(), 1);

        let survivor = reg.document_at(1).unwrap().id;
        assert!(reg.close(0));
        assert_eq!(reg.slot_count(), 2);
        assert_eq!(reg.active_index(), 0);
        assert_eq!(reg.document_at(0).unwrap().id, survivor);
        assert!(reg.is_sentinel(1));
    }

    #[test]
    fn test_close_active_middle_prefers_vacated_position() {
        let mut reg = registry();
        reg.insert_untitled();
        reg.insert_untitled();
        reg.insert_untitled();
        reg.activate(1);

        let next = reg.document_at(2).unwrap().id;
        assert!(reg.close(1));
        assert_eq!(reg.active_index(), 1);
        assert_eq!(reg.active_document().unwrap().id, next);
    }

    #[test]
    fn test_close_last_active_falls_back_to_new_last() {
        let mut reg = registry();
        reg.insert_untitled();
        reg.insert_untitled();
        assert_eq!(reg.active_index(), 1);

        assert!(reg.close(1));
        assert_eq!(reg.active_index(), 0);
        assert!(reg.active_document().is_some());
    }

    #[test]
    fn test_close_above_active_keeps_active_document() {
        let mut reg = registry();
        reg.insert_untitled();
        reg.insert_untitled();
        reg.insert_untitled();
        reg.activate(0);
        let active_id = reg.active_document().unwrap().id;

        assert!(reg.close(2));
        assert_eq!(reg.active_index(), 0);
        assert_eq!(reg.active_document().unwrap().id, active_id);
    }

    #[test]
    fn test_activate_rejects_sentinel_and_out_of_range() {
        let mut reg = registry();
        reg.insert_untitled();
        reg.insert_untitled();
        reg.activate(0);

        reg.activate(reg.sentinel_index());
        assert_eq!(reg.active_index(), 0);
        reg.activate(42);
        assert_eq!(reg.active_index(), 0);
    }

    #[test]
    fn test_adopt_file_reuses_single_blank_untitled() {
        let mut reg = registry();
        reg.insert_untitled();
        assert_eq!(reg.real_count(), 1);

        let index = reg.adopt_file("/tmp/a.txt".to_string(), "contents");
        assert_eq!(index, 0);
        assert_eq!(reg.real_count(), 1);

        let doc = reg.document_at(0).unwrap();
        assert_eq!(doc.file_path.as_deref(), Some("/tmp/a.txt"));
        assert_eq!(doc.display_name, "a.txt");
        assert!(!doc.is_dirty());
        assert_eq!(doc.text(), "contents");
    }

    #[test]
    fn test_adopt_file_with_no_candidate_creates_slot() {
        let mut reg = registry();
        reg.insert("already typed", "Untitled");
        assert_eq!(reg.real_count(), 1);

        let index = reg.adopt_file("/tmp/b.txt".to_string(), "x");
        assert_eq!(index, 1);
        assert_eq!(reg.real_count(), 2);
    }

    #[test]
    fn test_adopt_file_with_two_candidates_creates_slot() {
        let mut reg = registry();
        reg.insert_untitled();
        reg.insert_untitled();
        assert_eq!(reg.real_count(), 2);

        let index = reg.adopt_file("/tmp/c.txt".to_string(), "x");
        assert_eq!(index, 2);
        assert_eq!(reg.real_count(), 3);
        // The blanks are untouched.
        assert!(reg.document_at(0).unwrap().is_blank_untitled());
        assert!(reg.document_at(1).unwrap().is_blank_untitled());
    }

    #[test]
    fn test_edit_sets_dirty_save_clears_it() {
        let mut reg = registry();
        reg.insert_untitled();
        let doc = reg.active_document_mut().unwrap();
        assert!(!doc.is_dirty());

        doc.buffer.append("typed");
        assert!(doc.is_dirty());
        assert!(doc.needs_save());

        doc.file_path = Some("/tmp/d.txt".to_string());
        doc.mark_clean();
        assert!(!doc.needs_save());
    }

    #[test]
    fn test_insert_from_file_is_clean_and_bound() {
        let mut reg = registry();
        reg.insert_from_file("/tmp/e.txt".to_string(), "body");
        let doc = reg.active_document().unwrap();
        assert!(!doc.is_dirty());
        assert!(!doc.needs_save());
        assert_eq!(doc.display_name, "e.txt");
    }

    #[test]
    fn test_find_by_path() {
        let mut reg = registry();
        reg.insert_untitled();
        reg.insert_from_file("/tmp/f.txt".to_string(), "");
        assert_eq!(reg.find_by_path("/tmp/f.txt"), Some(1));
        assert_eq!(reg.find_by_path("/tmp/nope"), None);
    }

    #[test]
    fn test_active_after_close_rules() {
        // Closing below the active slot shifts it down.
        assert_eq!(active_after_close(0, 2, 2), 1);
        // Closing the active slot prefers the vacated position.
        assert_eq!(active_after_close(1, 1, 2), 1);
        // ...unless it was the last real slot.
        assert_eq!(active_after_close(2, 2, 2), 1);
        // Closing above the active slot changes nothing.
        assert_eq!(active_after_close(2, 0, 2), 0);
        // No documents left.
        assert_eq!(active_after_close(0, 0, 0), 0);
    }
}
