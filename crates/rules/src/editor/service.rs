//! Channel-driven editor loop.

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::events::{EditorCommand, EditorEvent, EventSink};

use super::core::RuleEditor;
use super::error::EditorError;

/// Drain `commands` into `editor` one at a time until every sender is
/// dropped, then hand the editor back.
///
/// Rejected saves are published as [`EditorEvent::SaveRejected`] so the
/// sender can surface the message; requests for missing rows are logged.
pub async fn run<S: EventSink>(
    mut editor: RuleEditor<S>,
    mut commands: UnboundedReceiver<EditorCommand>,
) -> RuleEditor<S> {
    while let Some(command) = commands.recv().await {
        let topic = command.topic();
        let position = match &command {
            EditorCommand::Save { position, .. } => Some(*position),
            _ => None,
        };

        match editor.handle(command) {
            Ok(()) => debug!(topic, "handled editor command"),
            Err(EditorError::Validation(reason)) => {
                if let Some(position) = position {
                    editor
                        .sink_mut()
                        .publish(EditorEvent::SaveRejected { position, reason });
                }
            }
            Err(e) => warn!(topic, error = %e, "editor command failed"),
        }
    }
    info!("command channel closed, editor loop exiting");
    editor
}
