// Shared test helpers: an in-memory filesystem that counts and fails operations
#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use mdmint_core::fs::Filesystem;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// In-memory `Filesystem` that records how often each operation ran.
#[derive(Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<Utf8PathBuf, String>>,
    dirs: RefCell<Vec<Utf8PathBuf>>,
    pub exists_calls: Cell<usize>,
    pub mkdir_calls: Cell<usize>,
    pub read_calls: Cell<usize>,
    pub write_calls: Cell<usize>,
    pub fail_mkdir: bool,
    pub fail_read: bool,
    pub fail_write: bool,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// A filesystem that already holds `path` with `contents`
    pub fn with_file(path: &str, contents: &str) -> Self {
        let fs = Self::new();
        fs.files
            .borrow_mut()
            .insert(Utf8PathBuf::from(path), contents.to_string());
        fs
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Utf8Path::new(path)).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.borrow().keys().map(|p| p.to_string()).collect()
    }

    pub fn created_dirs(&self) -> Vec<String> {
        self.dirs.borrow().iter().map(|p| p.to_string()).collect()
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl Filesystem for MemoryFs {
    fn exists(&self, path: &Utf8Path) -> bool {
        bump(&self.exists_calls);
        self.files.borrow().contains_key(path)
    }

    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()> {
        bump(&self.mkdir_calls);
        if self.fail_mkdir {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "mkdir denied"));
        }
        self.dirs.borrow_mut().push(path.to_owned());
        Ok(())
    }

    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String> {
        bump(&self.read_calls);
        if self.fail_read {
            return Err(io::Error::new(io::ErrorKind::Other, "read failed"));
        }
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> io::Result<()> {
        bump(&self.write_calls);
        if self.fail_write {
            return Err(io::Error::new(io::ErrorKind::Other, "write failed"));
        }
        self.files
            .borrow_mut()
            .insert(path.to_owned(), contents.to_string());
        Ok(())
    }
}

/// Convert a path to a TOML-safe string for use in config values
///
/// Forward slashes avoid backslash escapes on Windows.
pub fn path_to_toml_string(path: &Path) -> String {
    let path_str = path.display().to_string().replace('\\', "/");
    format!("\"\"\"{}\"\"\"", path_str)
}
