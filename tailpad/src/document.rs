//! The bound file and its text
//!
//! `content` is what the user sees. `last_synced` is the text as last read
//! from or written to disk; the two only differ while the user has unsaved
//! edits.

use std::path::{Path, PathBuf};

/// Read a whole file as text. Invalid UTF-8 becomes U+FFFD instead of failing.
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    std::fs::write(path, text)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    path: Option<PathBuf>,
    content: String,
    last_synced: String,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `path` with `content` as both the buffer and the synced text.
    pub fn bind(&mut self, path: PathBuf, content: String) {
        self.last_synced = content.clone();
        self.content = content;
        self.path = Some(path);
    }

    /// Point at `path` without touching the text, e.g. before a save-as.
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// Live edit from the text widget.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Replace the buffer with text just read from the bound file.
    pub fn refresh(&mut self, content: String) {
        self.last_synced = content.clone();
        self.content = content;
    }

    /// The buffer was just written to disk.
    pub fn mark_synced(&mut self) {
        self.last_synced = self.content.clone();
    }

    /// Exact comparison against the buffer, no normalisation.
    pub fn is_diverged(&self, disk_content: &str) -> bool {
        disk_content != self.content
    }

    pub fn is_dirty(&self) -> bool {
        self.content != self.last_synced
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.path.is_some()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    #[cfg(test)]
    fn last_synced(&self) -> &str {
        &self.last_synced
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// File name of the bound path, or "untitled".
    pub fn title(&self) -> String {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string())
    }
}
