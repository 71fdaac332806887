// filesystem seam for the writer

use camino::Utf8Path;
use std::io;

/// The file operations the merge-writer performs, so tests can observe and
/// fail them.
pub trait Filesystem {
    fn exists(&self, path: &Utf8Path) -> bool;
    /// Create `path` and any missing parents; succeeds if it already exists.
    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()>;
    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String>;
    fn write(&self, path: &Utf8Path, contents: &str) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

impl<T: Filesystem + ?Sized> Filesystem for &T {
    fn exists(&self, path: &Utf8Path) -> bool {
        (**self).exists(path)
    }

    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }
}
