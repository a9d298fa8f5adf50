//! Diagram payload format and on-disk storage.
//!
//! A saved diagram is `{ elements, connections, version }`. Parsing is
//! lenient about shape (missing lists, legacy paired connection metadata,
//! missing font sizes) but strict about structure: duplicate ids, dangling
//! endpoints and self-connections are rejected as malformed.
//!
//! [`Storage`] owns the autosave location. Writes go through a temp file in
//! the target directory and are renamed into place so a crash mid-write never
//! leaves a truncated autosave behind.

use crate::constants::{
    APP_DIR_NAME, AUTOSAVE_BACKUP_FILE_NAME, AUTOSAVE_FILE_NAME, DIAGRAM_VERSION, MAX_ID,
};
use crate::diagram::{ChangeSet, Diagram};
use crate::error::{EditorError, EditorResult};
use crate::perf::measure_and_log;
use crate::types::{Connection, Element};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{error, info};

/// Autosave writes slower than this are logged.
const SAVE_WARN_MS: f64 = 50.0;

fn default_version() -> String {
    DIAGRAM_VERSION.to_string()
}

/// Serialized diagram payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramFile {
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for DiagramFile {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl DiagramFile {
    pub fn new(elements: Vec<Element>, connections: Vec<Connection>) -> Self {
        Self {
            elements,
            connections,
            version: default_version(),
        }
    }

    pub fn from_diagram(diagram: &Diagram) -> Self {
        Self::new(diagram.elements().to_vec(), diagram.connections().to_vec())
    }

    /// Parse and structurally check a payload.
    pub fn from_json(text: &str) -> EditorResult<Self> {
        let file: DiagramFile =
            serde_json::from_str(text).map_err(|e| EditorError::MalformedImport(e.to_string()))?;
        file.validate()?;
        Ok(file)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize diagram")
    }

    pub fn into_diagram(self) -> Diagram {
        Diagram::from_parts(self.elements, self.connections)
    }

    fn validate(&self) -> EditorResult<()> {
        let malformed = |msg: String| Err(EditorError::MalformedImport(msg));

        let out_of_range = self
            .elements
            .iter()
            .map(|el| el.id)
            .chain(self.connections.iter().map(|conn| conn.id))
            .find(|&id| id > MAX_ID);
        if let Some(id) = out_of_range {
            return malformed(format!("id {} is out of range", id));
        }

        let mut ids = HashSet::new();
        for element in &self.elements {
            if !ids.insert(element.id) {
                return malformed(format!("duplicate id {}", element.id));
            }
        }
        let element_ids = ids.clone();
        for conn in &self.connections {
            if !ids.insert(conn.id) {
                return malformed(format!("duplicate id {}", conn.id));
            }
            for endpoint in [conn.from, conn.to] {
                if !element_ids.contains(&endpoint) {
                    return malformed(format!(
                        "connection {} references missing element {}",
                        conn.id, endpoint
                    ));
                }
            }
            if conn.from == conn.to {
                return malformed(format!("connection {} connects an element to itself", conn.id));
            }
        }
        Ok(())
    }
}

/// Durable storage for the autosave file and explicit save/load.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/erboard`, if the platform has a data directory.
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|d| Self::new(d.join(APP_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn autosave_path(&self) -> PathBuf {
        self.dir.join(AUTOSAVE_FILE_NAME)
    }

    pub fn autosave_backup_path(&self) -> PathBuf {
        self.dir.join(AUTOSAVE_BACKUP_FILE_NAME)
    }

    pub fn save_autosave(&self, file: &DiagramFile) -> Result<()> {
        measure_and_log("autosave", SAVE_WARN_MS, || {
            save_to_file(&self.autosave_path(), file)
        })
    }

    /// Load the autosave; `Ok(None)` when none exists yet.
    pub fn load_autosave(&self) -> Result<Option<DiagramFile>> {
        let path = self.autosave_path();
        if !path.exists() {
            return Ok(None);
        }
        load_from_file(&path).map(Some)
    }

    /// Rename the autosave to its backup path, replacing any older backup.
    pub fn move_autosave_aside(&self) -> Result<PathBuf> {
        let from = self.autosave_path();
        let to = self.autosave_backup_path();
        fs::rename(&from, &to).with_context(|| {
            format!("Failed to move {} to {}", from.display(), to.display())
        })?;
        Ok(to)
    }

    /// Listener for [`Diagram::subscribe`] that persists every model change
    /// while `enabled` is set.
    ///
    /// Selection-only changes are skipped. Failures are logged and never
    /// reach the editor.
    pub fn autosave_listener(
        self,
        enabled: Rc<Cell<bool>>,
    ) -> impl FnMut(&Diagram, &ChangeSet) + 'static {
        move |diagram: &Diagram, changes: &ChangeSet| {
            if !enabled.get() || !changes.touches_model() {
                return;
            }
            if let Err(e) = self.save_autosave(&DiagramFile::from_diagram(diagram)) {
                error!("Autosave failed: {:#}", e);
            }
        }
    }
}

/// Write a diagram to `path` atomically.
pub fn save_to_file(path: &Path, file: &DiagramFile) -> Result<()> {
    let json = file.to_json_pretty()?;
    write_atomic(path, json.as_bytes())?;
    info!(path = %path.display(), elements = file.elements.len(), "Diagram saved");
    Ok(())
}

/// Read and check a diagram file.
pub fn load_from_file(path: &Path) -> Result<DiagramFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file = DiagramFile::from_json(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!(path = %path.display(), elements = file.elements.len(), "Diagram loaded");
    Ok(file)
}

/// Replace `path` through a temp file in the same directory.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create {}", parent.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    tmp.write_all(bytes).context("Failed to write temp file")?;
    tmp.as_file().sync_all().context("Failed to sync temp file")?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
