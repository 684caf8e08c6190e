use log::info;
use pageflow_foundation::{ContentEvent, ContentView};

/// Logs what a list widget would be told to do.
pub struct LogView;

impl ContentView for LogView {
    fn on_event(&mut self, event: &ContentEvent) {
        match event {
            ContentEvent::ShowBlockingError(error) if error.is_empty_tip() => {
                info!("[view] empty list: {error}")
            }
            ContentEvent::ShowBlockingError(error) => info!("[view] error tip: {error}"),
            ContentEvent::ShowTransientMessage(error) => info!("[view] toast: {error}"),
            ContentEvent::InsertRange { start, count } => {
                info!("[view] insert {count} row(s) at {start}")
            }
            ContentEvent::RemoveRange { start, count } => {
                info!("[view] remove {count} row(s) at {start}")
            }
            ContentEvent::ChangeRange { start, count } => {
                info!("[view] rebind {count} row(s) at {start}")
            }
            other => info!("[view] {other:?}"),
        }
    }
}
