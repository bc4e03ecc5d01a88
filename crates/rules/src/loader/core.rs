//! [`SnapshotFile`]: the rule collection as a YAML file on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::events::EditorCommand;
use crate::schema::Rule;

use super::error::Result;
use super::watcher::handle_fs_event;

/// Parse snapshot YAML. Blank content is an empty collection.
pub fn parse_snapshot(contents: &str) -> Result<Vec<Rule>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(contents)?)
}

/// YAML file holding the saved rule collection, with optional hot-reload.
pub struct SnapshotFile {
    path: PathBuf,
    /// Active filesystem watcher (held to keep it alive).
    _watcher: Option<RecommendedWatcher>,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _watcher: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection. A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<Rule>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no rules file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let rules = parse_snapshot(&contents)?;
        info!(path = %self.path.display(), count = rules.len(), "loaded rules file");
        Ok(rules)
    }

    /// Atomically write the collection.
    ///
    /// Writes to a `.tmp` dotfile next to the target first, then renames it
    /// into place to avoid partial writes on crash. Parent directories are
    /// created as needed.
    pub fn write(&self, rules: &[Rule]) -> Result<()> {
        let dir = self.dir();
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
        let tmp_path = dir.join(format!(".{}.tmp", self.file_name()));

        let yaml = serde_yaml::to_string(rules)?;
        fs::write(&tmp_path, yaml)?;
        fs::rename(&tmp_path, &self.path)?;

        info!(path = %self.path.display(), count = rules.len(), "wrote rules file");
        Ok(())
    }

    /// Start watching the file. Every create/modify re-reads it and sends
    /// [`EditorCommand::ApplyRules`]; removal sends an empty snapshot.
    /// Parse errors are logged and nothing is sent, so the editor keeps its
    /// previous state.
    ///
    /// The parent directory is watched so that atomic replacements (rename
    /// over the target) are seen. `poll` is the rescan interval of the
    /// polling backend; native backends (inotify, FSEvents, ReadDirectoryChanges)
    /// deliver events as they happen and ignore it.
    pub fn watch(&mut self, commands: UnboundedSender<EditorCommand>, poll: Duration) -> Result<()> {
        let target = self.path.clone();
        let dir = self.dir().to_path_buf();
        let dir = if dir.as_os_str().is_empty() { PathBuf::from(".") } else { dir };
        fs::create_dir_all(&dir)?;

        let config = notify::Config::default().with_poll_interval(poll);
        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<notify::Event, notify::Error>| match res {
                Ok(event) => handle_fs_event(&event, &target, &commands),
                Err(e) => warn!(error = %e, "filesystem watcher error"),
            },
            config,
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        info!(
            path = %self.path.display(),
            poll_ms = poll.as_millis() as u64,
            "watching rules file for changes"
        );
        self._watcher = Some(watcher);
        Ok(())
    }

    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "rules.yml".to_string())
    }
}
