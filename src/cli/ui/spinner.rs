//! Progress spinner for the non-interactive commands

use std::io::{self, Write};
use std::time::Duration;

use is_terminal::IsTerminal;
use tokio::sync::oneshot;

const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Animated progress line on stdout, cleared when dropped
///
/// Nothing is drawn when stdout is not a terminal.
pub struct Spinner {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        if !io::stdout().is_terminal() {
            return Self {
                stop_tx: None,
                handle: None,
            };
        }

        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(Self::run_spinner(message.into(), stop_rx));

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn stop(mut self) {
        self.stop_internal();
    }

    fn stop_internal(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
            Self::clear_line();
        }
    }

    async fn run_spinner(message: String, mut stop_rx: oneshot::Receiver<()>) {
        let mut frame = 0;
        let mut stdout = io::stdout();

        loop {
            let spinner_char = SPINNER_CHARS[frame % SPINNER_CHARS.len()];
            print!("\r{} {}", spinner_char, message);
            let _ = stdout.flush();
            frame += 1;

            tokio::select! {
                _ = tokio::time::sleep(SPINNER_INTERVAL) => {},
                _ = &mut stop_rx => break,
            }
        }

        Self::clear_line();
    }

    fn clear_line() {
        print!("\r\x1b[K");
        let _ = io::stdout().flush();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop_internal();
    }
}

/// Run a future while a spinner shows `message`
pub async fn with_spinner<F, T>(message: impl Into<String>, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let _spinner = Spinner::start(message);
    future.await
}
