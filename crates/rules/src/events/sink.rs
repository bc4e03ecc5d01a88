//! Outbound delivery of editor notifications.

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use super::EditorEvent;

/// Receives editor notifications. Publishing happens only after the change
/// it reports is fully committed and renumbered.
pub trait EventSink {
    fn publish(&mut self, event: EditorEvent);
}

/// Records events in order.
impl EventSink for Vec<EditorEvent> {
    fn publish(&mut self, event: EditorEvent) {
        self.push(event);
    }
}

/// Forwards events over an unbounded channel. A dropped receiver is logged
/// and the event discarded.
impl EventSink for UnboundedSender<EditorEvent> {
    fn publish(&mut self, event: EditorEvent) {
        let topic = event.topic();
        if self.send(event).is_err() {
            warn!(topic, "event receiver dropped, discarding notification");
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn publish(&mut self, event: EditorEvent) {
        (**self).publish(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn publish(&mut self, event: EditorEvent) {
        (**self).publish(event);
    }
}
