use std::collections::HashSet;

/// Whether the document opens with a properties block: `---` on the first
/// line and a closing `---` line somewhere after it.
pub fn has_properties_block(content: &str) -> bool {
    content.starts_with("---\n") && content.contains("\n---\n")
}

/// Per-session record of which documents already had their properties
/// folded, keyed by a host-supplied stable document id. Eviction is
/// explicit; dropping the session forgets everything.
#[derive(Debug, Default)]
pub struct FoldSession {
    seen: HashSet<String>,
}

impl FoldSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the document as opened this session. Returns true the first
    /// time a given id is seen.
    pub fn mark_opened(&mut self, doc_id: &str) -> bool {
        self.seen.insert(doc_id.to_string())
    }

    pub fn evict(&mut self, doc_id: &str) {
        self.seen.remove(doc_id);
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
