use super::backend::StorageBackend;
use crate::error::{Result, TodoError};
use std::fs;
use std::path::{Path, PathBuf};

const ENTRY_EXT: &str = ".json";

/// Filesystem backend: every key is one `<key>.json` file under `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}{}", key, ENTRY_EXT)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TodoError::Io)?;
        }
        Ok(())
    }
}

/// Rejects list names that cannot be a plain file name under the root.
pub fn validate_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\'])
        || key.contains(std::path::MAIN_SEPARATOR);
    if bad {
        return Err(TodoError::Store(format!("Invalid list name: {:?}", key)));
    }
    Ok(())
}

impl StorageBackend for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(TodoError::Io)?;
        Ok(Some(content))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        self.ensure_dir()?;

        // Write next to the target, then rename over it
        let tmp_file = self
            .root
            .join(format!(".{}-{}.tmp", key, std::process::id()));
        fs::write(&tmp_file, value).map_err(TodoError::Io)?;
        fs::rename(&tmp_file, &path).map_err(TodoError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let backend = FsBackend::new(PathBuf::from("/tmp/unused"));
        assert!(backend.entry_path("").is_err());
        assert!(backend.entry_path("../x").is_err());
        assert!(backend.entry_path("a/b").is_err());
        assert!(backend.entry_path(".hidden").is_err());
        assert!(backend.entry_path("groceries").is_ok());
    }

    #[test]
    fn entry_path_uses_json_extension() {
        let backend = FsBackend::new(PathBuf::from("/data"));
        assert_eq!(
            backend.entry_path("work").unwrap(),
            PathBuf::from("/data/work.json")
        );
    }
}
