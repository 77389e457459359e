//! File-backed index store

use crate::index::error::IndexError;
use crate::index::table::{parse_table, render_table};
use crate::index::Index;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Replace `path` with `contents` via a sibling temp file and a rename
///
/// Readers see either the old or the new file, never a partial write.
pub(crate) async fn write_atomic(path: &Path, contents: &str) -> Result<(), IndexError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| IndexError::io(parent, e))?;
    }

    let mut tmp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)
        .await
        .map_err(|e| IndexError::io(&tmp_path, e))?;

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(IndexError::io(path, e));
    }

    Ok(())
}

/// Loads and persists the index table file
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    /// Create a store for the given index file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the index file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index
    ///
    /// A missing file is an empty index. Read failures and malformed contents
    /// are errors.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Index, IndexError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No index at {}, starting empty", self.path.display());
                return Ok(Index::default());
            }
            Err(e) => return Err(IndexError::io(&self.path, e)),
        };

        let records = parse_table(&text)?;
        debug!("Loaded {} index records", records.len());
        Ok(Index::from_records(records))
    }

    /// Replace the index file with the given index in one step
    #[instrument(skip(self, index), fields(path = %self.path.display(), records = index.len()))]
    pub async fn save(&self, index: &Index) -> Result<(), IndexError> {
        write_atomic(&self.path, &render_table(index.records())).await?;
        debug!("Index written");
        Ok(())
    }
}
