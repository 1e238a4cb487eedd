//! Project items: the logical template files fed into the compiler
//!
//! A project item pairs identity paths (used for diagnostics and generated
//! class naming) with a physical location (used for I/O). The two are
//! independent. File kind resolves in order: explicit value, extension
//! inference, unknown.

use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What kind of template a file holds, deciding the generated class shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    /// `.razor` component files.
    Component,
    /// `.cshtml` view/page files.
    Legacy,
}

impl FileKind {
    /// Infer a kind from a file path's extension. Unrecognized or absent
    /// paths have no kind.
    pub fn infer(file_path: Option<&str>) -> Option<FileKind> {
        let extension = Path::new(file_path?).extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("razor") {
            Some(FileKind::Component)
        } else if extension.eq_ignore_ascii_case("cshtml") {
            Some(FileKind::Legacy)
        } else {
            None
        }
    }
}

/// A logical template file. `exists` never errors; `read` is allowed to fail
/// for a missing file.
pub trait ProjectItem {
    /// Project-relative base the file path is rooted under.
    fn base_path(&self) -> &str;

    /// Logical path used for diagnostics and identity.
    fn file_path(&self) -> Option<&str>;

    /// Physical path relative to the project root, for build outputs.
    fn relative_physical_path(&self) -> Option<&str>;

    /// Absolute location on disk, when there is one.
    fn physical_path(&self) -> Option<&Path>;

    fn exists(&self) -> bool;

    /// Explicit kind if supplied, else inferred from the file extension.
    fn file_kind(&self) -> Option<FileKind> {
        FileKind::infer(self.file_path())
    }

    /// Open the item's content for reading.
    fn read(&self) -> io::Result<Box<dyn Read>>;

    /// Final segment of the logical path.
    fn file_name(&self) -> Option<&str> {
        let path = self.file_path()?;
        path.rsplit('/').next()
    }
}

/// A project item backed by a file on disk.
pub struct FileSystemProjectItem {
    base_path: String,
    file_path: Option<String>,
    relative_physical_path: Option<String>,
    file_kind: Option<FileKind>,
    file: PathBuf,
}

impl FileSystemProjectItem {
    /// `file_kind: None` defers to extension inference on `file_path`.
    pub fn new(
        base_path: impl Into<String>,
        file_path: Option<&str>,
        relative_physical_path: Option<&str>,
        file_kind: Option<FileKind>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            file_path: file_path.map(str::to_string),
            relative_physical_path: relative_physical_path.map(str::to_string),
            file_kind,
            file: file.into(),
        }
    }
}

impl ProjectItem for FileSystemProjectItem {
    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    fn relative_physical_path(&self) -> Option<&str> {
        self.relative_physical_path.as_deref()
    }

    fn physical_path(&self) -> Option<&Path> {
        Some(&self.file)
    }

    fn exists(&self) -> bool {
        self.file.exists()
    }

    fn file_kind(&self) -> Option<FileKind> {
        self.file_kind.or_else(|| FileKind::infer(self.file_path()))
    }

    fn read(&self) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(File::open(&self.file)?))
    }
}

/// An in-memory project item, for tests and embedded sources.
pub struct InMemoryProjectItem {
    file_path: Option<String>,
    file_kind: Option<FileKind>,
    content: String,
}

impl InMemoryProjectItem {
    pub fn new(file_path: Option<&str>, file_kind: Option<FileKind>, content: impl Into<String>) -> Self {
        Self {
            file_path: file_path.map(str::to_string),
            file_kind,
            content: content.into(),
        }
    }
}

impl ProjectItem for InMemoryProjectItem {
    fn base_path(&self) -> &str {
        "/"
    }

    fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    fn relative_physical_path(&self) -> Option<&str> {
        None
    }

    fn physical_path(&self) -> Option<&Path> {
        None
    }

    fn exists(&self) -> bool {
        true
    }

    fn file_kind(&self) -> Option<FileKind> {
        self.file_kind.or_else(|| FileKind::infer(self.file_path()))
    }

    fn read(&self) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(Cursor::new(self.content.clone().into_bytes())))
    }
}
