use crate::app_event::AppEvent;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

#[derive(Clone, Debug)]
pub(crate) struct AppEventSender {
    app_event_tx: UnboundedSender<AppEvent>,
}

impl AppEventSender {
    pub(crate) fn new(app_event_tx: UnboundedSender<AppEvent>) -> Self {
        Self { app_event_tx }
    }

    /// Send an event to the app event channel. A closed channel means the
    /// event loop is shutting down, so the event is dropped.
    pub(crate) fn send(&self, event: AppEvent) {
        if let Err(err) = self.app_event_tx.send(event) {
            debug!("dropping app event after shutdown: {:?}", err.0);
        }
    }
}
