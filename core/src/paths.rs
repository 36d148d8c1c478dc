use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Anchor for relative paths given on the command line.
///
/// Relative inputs resolve against the directory the program lives in, never
/// against the invoking shell's working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDir {
    root: PathBuf,
}

impl BaseDir {
    pub fn new(root: impl Into<PathBuf>) -> CoreResult<Self> {
        let root = root.into();
        if !root.is_absolute() {
            return Err(CoreError::InvalidInput(format!(
                "base directory must be absolute: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn from_current_exe() -> CoreResult<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or_else(|| {
            CoreError::InvalidInput(format!("executable has no parent: {}", exe.display()))
        })?;
        Self::new(dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
