//! Filesystem-based schema storage implementation.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use docgen_core::Schema;

use crate::error::StoreError;
use crate::store::{check_name, SchemaStore, StoredSchema};

/// Filesystem implementation of the SchemaStore trait.
///
/// Stores each schema as a pretty-printed `<name>.json` file in a directory.
/// Files are opened with create-new semantics, so two writers can never
/// both claim a name.
pub struct FilesystemStore {
    dir: PathBuf,
}

impl FilesystemStore {
    /// Create a new FilesystemStore with the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

fn write_schema(writer: &mut impl Write, stored: &StoredSchema) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(stored)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write `stored` to a freshly created file. The file is deleted if the write fails.
fn write_or_remove(mut file: impl Write, path: &Path, stored: &StoredSchema) -> Result<(), StoreError> {
    match write_schema(&mut file, stored) {
        Ok(()) => Ok(()),
        Err(e) => {
            drop(file);
            if let Err(remove_err) = fs::remove_file(path) {
                tracing::warn!("Failed to remove partial schema file {}: {}", path.display(), remove_err);
            }
            Err(e)
        }
    }
}

impl SchemaStore for FilesystemStore {
    fn create(&self, schema: &Schema) -> Result<StoredSchema, StoreError> {
        check_name(schema.name())?;
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(schema.name());
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(schema.name().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let stored = StoredSchema::new(schema.clone());
        write_or_remove(file, &path, &stored)?;

        tracing::info!("Stored schema '{}' to {}", schema.name(), path.display());
        Ok(stored)
    }

    fn get(&self, name: &str) -> Result<Option<StoredSchema>, StoreError> {
        if check_name(name).is_err() {
            return Ok(None);
        }

        let content = match fs::read_to_string(self.path_for(name)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgen_core::{FieldMap, FieldRule};
    use std::io;
    use tempfile::TempDir;

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn stored() -> StoredSchema {
        let mut fields = FieldMap::new();
        fields.insert("id", FieldRule::new("integer"));
        StoredSchema::new(Schema::new("players", fields).unwrap())
    }

    #[test]
    fn test_failed_write_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("players.json");
        fs::write(&path, "{").unwrap();

        let err = write_or_remove(FullDisk, &path, &stored()).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(!path.exists());

        let store = FilesystemStore::new(dir.path());
        assert!(store.get("players").unwrap().is_none());
        store.create(&stored().schema).unwrap();
    }
}
