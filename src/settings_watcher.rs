//! Hot reload for the settings file.
//!
//! Watches the settings file's parent directory (editors often replace files
//! rather than write in place) and reports changes to the watched file only.
//! [`SettingsWatcher::poll`] never blocks.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use tracing::debug;

pub use crate::settings::default_settings_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching settings file");

        Ok(Self {
            path,
            _watcher: watcher,
            rx,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next relevant event, if any. Unrelated files in the directory are skipped.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if let Some(settings_event) = self.classify(&event) {
                        return Some(settings_event);
                    }
                }
                Ok(Err(e)) => return Some(SettingsEvent::Error(e.to_string())),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    return Some(SettingsEvent::Error("watcher disconnected".to_string()));
                }
            }
        }
    }

    fn classify(&self, event: &Event) -> Option<SettingsEvent> {
        let file_name = self.path.file_name()?;
        if !event.paths.iter().any(|p| p.file_name() == Some(file_name)) {
            return None;
        }
        match event.kind {
            EventKind::Create(_) => Some(SettingsEvent::Created),
            EventKind::Modify(_) => Some(SettingsEvent::Modified),
            EventKind::Remove(_) => Some(SettingsEvent::Deleted),
            _ => None,
        }
    }
}
