//! A minimal terminal spinner shown while a generation is outstanding.

use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;

const FRAMES: &[&str] = &["⠷", "⠯", "⠟", "⠻", "⠽", "⠾"];

const INTERVAL: Duration = Duration::from_millis(100);

/// A terminal spinner tied to one outstanding request.
///
/// Start it when the request goes Pending, and resolve it with
/// [`Spinner::finish`] once the request reaches a terminal state.
/// Draws on stderr so result output on stdout stays clean.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: tokio::sync::watch::Sender<()>,
}

impl Spinner {
    /// Start spinning next to `message` (e.g. `"generating"`).
    pub fn start(message: &str) -> Self {
        let (cancel, mut cancelled) = tokio::sync::watch::channel(());
        let message = message.to_string();

        let handle = tokio::spawn(async move {
            for frame in FRAMES.iter().cycle() {
                // \r returns to column 0, \x1b[2K wipes the old frame
                eprint!("\x1b[2K\r{frame} {message}");
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancelled.changed() => break,
                }
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self { handle, cancel }
    }

    /// Stop spinning and leave a resolution line in its place,
    /// e.g. `finish("✓", "video ready")`.
    pub async fn finish(self, symbol: &str, text: &str) {
        let _ = self.cancel.send(());
        let _ = self.handle.await;
        eprintln!("{symbol} {text}");
    }

    /// Stop spinning and leave nothing behind.
    pub async fn dismiss(self) {
        let _ = self.cancel.send(());
        let _ = self.handle.await;
    }
}
