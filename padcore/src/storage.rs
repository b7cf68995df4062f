//! File browsing for the open and save dialogs

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Which files the browser lists. Directories are always listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    /// `*.txt`
    Text,
    /// `*`
    All,
}

impl FileFilter {
    pub fn label(&self) -> &'static str {
        match self {
            FileFilter::Text => "text files (*.txt)",
            FileFilter::All => "all files (*)",
        }
    }

    pub fn accepts(&self, path: &Path) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Text => path
                .extension()
                .map(|e| e.to_string_lossy().eq_ignore_ascii_case("txt"))
                .unwrap_or(false),
        }
    }
}

/// Simple file browser state
#[derive(Debug, Clone)]
pub struct FileBrowser {
    pub current_dir: PathBuf,
    pub entries: Vec<FileEntry>,
    pub selected_index: Option<usize>,
    pub filter: FileFilter,
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
}

impl FileBrowser {
    /// Browser rooted at `start_dir`. An unreadable start directory yields an
    /// empty listing rather than an error; the dialog stays usable.
    pub fn new(start_dir: PathBuf) -> Self {
        let mut browser = Self {
            current_dir: start_dir,
            entries: Vec::new(),
            selected_index: None,
            filter: FileFilter::Text,
        };
        browser.refresh_or_log();
        browser
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.set_filter(filter);
        self
    }

    pub fn set_filter(&mut self, filter: FileFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.refresh_or_log();
        }
    }

    fn refresh_or_log(&mut self) {
        if let Err(e) = self.refresh() {
            tracing::warn!(dir = %self.current_dir.display(), error = %e, "could not list directory");
        }
    }

    /// Re-read the current directory: `..` first, then directories, then
    /// files, each group sorted case-insensitively. Hidden entries are skipped.
    pub fn refresh(&mut self) -> Result<()> {
        self.entries.clear();
        self.selected_index = None;

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_directory: true,
            });
        }

        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in std::fs::read_dir(&self.current_dir)?.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            if name.starts_with('.') {
                continue;
            }

            let is_directory = path.is_dir();
            if !is_directory && !self.filter.accepts(&path) {
                continue;
            }

            let entry = FileEntry { name, path, is_directory };
            if is_directory {
                dirs.push(entry);
            } else {
                files.push(entry);
            }
        }

        dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        self.entries.extend(dirs);
        self.entries.extend(files);
        Ok(())
    }

    pub fn navigate_to(&mut self, path: PathBuf) -> Result<()> {
        if !path.is_dir() {
            return Err(StorageError::NotADirectory(path));
        }
        self.current_dir = path;
        self.refresh()
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected_index.and_then(|i| self.entries.get(i))
    }

    pub fn select_by_name(&mut self, name: &str) {
        self.selected_index = self.entries.iter().position(|e| e.name == name);
    }

    /// Directory a "save" lands in.
    pub fn save_directory(&self) -> &Path {
        &self.current_dir
    }
}

/// Get the documents directory
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
        .or_else(|| directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
