// Chunk: docs/chunks/file_documents - File-bound sessions with language and EOL tracking

//! A [`TextEditSession`] bound to a file on disk.
//!
//! The document owns the path, the detected language and the directory used
//! to resolve run configuration. Failed I/O never touches the in-memory
//! state.

use std::fs;
use std::path::{Path, PathBuf};

use gapline_syntax::{detect_language, Language};

use crate::eol::EolMode;
use crate::error::BufferError;
use crate::gap_buffer::{GapBuffer, DEFAULT_CAPACITY};
use crate::session::{SessionOptions, TextEditSession};

#[derive(Debug)]
pub struct Document {
    session: TextEditSession,
    path: Option<PathBuf>,
    language: Language,
    /// Gap left after the text on every load and reload.
    load_slack: usize,
}

impl Document {
    /// An untitled, empty document.
    pub fn new() -> Self {
        Self {
            session: TextEditSession::new(),
            path: None,
            language: Language::Plain,
            load_slack: DEFAULT_CAPACITY,
        }
    }

    /// Reads and decodes `path`, detecting its line endings and language.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        let mut doc = Self::new();
        doc.load_from(path.as_ref())?;
        Ok(doc)
    }

    /// Like [`Document::open`], applying session options first.
    ///
    /// `initial_capacity` becomes the free space left after the file's
    /// text, so it also applies on [`Document::reload`].
    pub fn open_with(path: impl AsRef<Path>, options: SessionOptions) -> Result<Self, BufferError> {
        let mut doc = Self::new();
        doc.session.set_tab_width(options.tab_width);
        doc.load_slack = options.initial_capacity;
        doc.load_from(path.as_ref())?;
        Ok(doc)
    }

    fn load_from(&mut self, path: &Path) -> Result<(), BufferError> {
        let bytes = fs::read(path).map_err(|source| BufferError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let (buffer, eol) = GapBuffer::load_with_slack(&bytes, self.load_slack)?;

        self.session.replace_buffer(buffer);
        self.path = Some(path.to_path_buf());
        self.language = detect_language(path);
        tracing::debug!(
            path = %path.display(),
            language = self.language.name(),
            eol = eol.label(),
            "opened document"
        );
        Ok(())
    }

    /// Re-reads the file from disk, discarding unsaved edits.
    pub fn reload(&mut self) -> Result<(), BufferError> {
        let path = self.path.clone().ok_or(BufferError::NoPath)?;
        self.load_from(&path)
    }

    /// Writes the buffer to its path with the current EOL mode.
    pub fn save(&mut self) -> Result<(), BufferError> {
        let path = self.path.clone().ok_or(BufferError::NoPath)?;
        self.write_to(&path)
    }

    /// Writes the buffer to a new path, which becomes the document's path.
    /// The language is re-detected from the new file name.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<(), BufferError> {
        let path = path.as_ref();
        self.write_to(path)?;
        self.path = Some(path.to_path_buf());
        self.language = detect_language(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<(), BufferError> {
        let buffer = self.session.buffer();
        let bytes = buffer.save(buffer.eol_mode());
        fs::write(path, &bytes).map_err(|source| BufferError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.session.buffer_mut().mark_clean();
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved document");
        Ok(())
    }

    // ==================== Accessors ====================

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory containing the file, used to resolve `build.<ext>`.
    pub fn file_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn eol_mode(&self) -> EolMode {
        self.session.buffer().eol_mode()
    }

    /// Changes the line endings written on the next save.
    pub fn set_eol_mode(&mut self, mode: EolMode) {
        self.session.buffer_mut().set_eol_mode(mode);
    }

    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    pub fn session(&self) -> &TextEditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TextEditSession {
        &mut self.session
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
