//! Filesystem event handler for the notify watcher (hot-reload).

use std::fs;
use std::path::Path;

use notify::event::{CreateKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::events::EditorCommand;

use super::core::parse_snapshot;

/// Handle a single filesystem event for the watched snapshot file.
pub(super) fn handle_fs_event(
    event: &Event,
    target: &Path,
    commands: &UnboundedSender<EditorCommand>,
) {
    let Some(target_name) = target.file_name() else {
        return;
    };

    // Only the snapshot itself; our own `.tmp` dotfiles never match.
    if !event.paths.iter().any(|p| p.file_name() == Some(target_name)) {
        return;
    }

    let rules = match &event.kind {
        EventKind::Create(CreateKind::File)
        | EventKind::Create(CreateKind::Any)
        | EventKind::Modify(ModifyKind::Data(_))
        | EventKind::Modify(ModifyKind::Name(_))
        | EventKind::Modify(ModifyKind::Any) => {
            if !target.exists() {
                // Renamed away.
                Vec::new()
            } else {
                match fs::read_to_string(target).map_err(|e| e.to_string()).and_then(|c| {
                    parse_snapshot(&c).map_err(|e| e.to_string())
                }) {
                    Ok(rules) => rules,
                    Err(e) => {
                        warn!(
                            path = %target.display(),
                            error = %e,
                            "failed to parse rules file during hot-reload, keeping previous version"
                        );
                        return;
                    }
                }
            }
        }
        EventKind::Remove(RemoveKind::File) | EventKind::Remove(RemoveKind::Any) => Vec::new(),
        _ => return,
    };

    info!(path = %target.display(), count = rules.len(), "hot-reloaded rules file");
    if commands.send(EditorCommand::ApplyRules { rules }).is_err() {
        warn!("editor command channel closed, dropping reload");
    }
}
