use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskpadError};
use crate::model::Task;

/// Single-file JSON store for the full record set.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Open a store at `path`. If the file is absent but a legacy
    /// `todos.json` sits next to it, the legacy file is renamed into place;
    /// a failed rename just leaves the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists()
            && let Some(dir) = path.parent()
        {
            let legacy = dir.join("todos.json");
            if legacy.exists() {
                let _ = fs::rename(&legacy, &path);
            }
        }
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full record set. A missing file is an empty store; a present
    /// but unparseable file is `Corrupt` so the caller can decide whether to
    /// recover.
    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data)
            .map_err(|_| TaskpadError::Corrupt(self.path.display().to_string()))
    }

    /// Write the full record set. Serializes to a sibling temp file and
    /// renames over the target so a crash mid-write never leaves a truncated
    /// file at the primary path.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
