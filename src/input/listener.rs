//! Line-oriented input listener
//!
//! Reads commands on a dedicated thread, since terminal reads block, and
//! forwards them to the event loop over a channel.

use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::commands::InputEvent;

/// Listener that turns input lines into [`InputEvent`]s
pub struct InputListener {
    event_tx: mpsc::Sender<InputEvent>,
    running: Arc<AtomicBool>,
}

impl InputListener {
    /// Create a new input listener
    pub fn new(event_tx: mpsc::Sender<InputEvent>) -> Self {
        Self {
            event_tx,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start reading commands from stdin
    pub fn start(&self) -> Result<(), InputError> {
        self.start_with(BufReader::new(io::stdin()))
    }

    /// Start reading commands from `reader`
    ///
    /// End of input is forwarded as [`InputEvent::Quit`]. After `stop()` the
    /// thread exits when the next line arrives.
    pub fn start_with<R>(&self, reader: R) -> Result<(), InputError>
    where
        R: BufRead + Send + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(InputError::AlreadyRunning);
        }

        let event_tx = self.event_tx.clone();
        let running = Arc::clone(&self.running);

        thread::Builder::new()
            .name("input-listener".to_string())
            .spawn(move || {
                info!("input listener thread started");

                if let Err(e) = read_loop(reader, event_tx, &running) {
                    error!(?e, "input listener error");
                }

                running.store(false, Ordering::SeqCst);
                info!("input listener thread stopped");
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                InputError::ThreadSpawn(e.to_string())
            })?;

        Ok(())
    }

    /// Ask the listener thread to stop
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the listener is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Errors that can occur in the input listener
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input listener is already running")]
    AlreadyRunning,

    #[error("failed to spawn listener thread: {0}")]
    ThreadSpawn(String),

    #[error("failed to read input: {0}")]
    Read(#[from] io::Error),
}

fn read_loop<R: BufRead>(
    reader: R,
    event_tx: mpsc::Sender<InputEvent>,
    running: &AtomicBool,
) -> Result<(), InputError> {
    for line in reader.lines() {
        if !running.load(Ordering::SeqCst) {
            return Ok(());
        }

        let Some(event) = InputEvent::parse(&line?) else {
            continue;
        };
        debug!(?event, "input event");

        let quit = event == InputEvent::Quit;
        if event_tx.blocking_send(event).is_err() {
            warn!("failed to send input event - channel closed?");
            return Ok(());
        }
        if quit {
            return Ok(());
        }
    }

    // End of input ends the session.
    debug!("end of input");
    let _ = event_tx.blocking_send(InputEvent::Quit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_listener_creation() {
        let (tx, _rx) = mpsc::channel(32);
        let listener = InputListener::new(tx);
        assert!(!listener.is_running());
    }

    #[tokio::test]
    async fn test_forwards_commands_until_quit() {
        let (tx, mut rx) = mpsc::channel(32);
        let listener = InputListener::new(tx);

        let input = Cursor::new("240\n\nclick\nquit\n1080\n");
        listener.start_with(input).unwrap();

        assert_eq!(rx.recv().await, Some(InputEvent::Select("240".into())));
        assert_eq!(rx.recv().await, Some(InputEvent::Click));
        assert_eq!(rx.recv().await, Some(InputEvent::Quit));

        // Nothing after `quit` is forwarded.
        drop(listener);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_end_of_input_quits() {
        let (tx, mut rx) = mpsc::channel(32);
        let listener = InputListener::new(tx);

        listener.start_with(Cursor::new("720p")).unwrap();

        assert_eq!(rx.recv().await, Some(InputEvent::Select("720p".into())));
        assert_eq!(rx.recv().await, Some(InputEvent::Quit));
    }

    #[test]
    fn test_rejects_second_start() {
        let (tx, _rx) = mpsc::channel(32);
        let listener = InputListener::new(tx);

        // The first reader blocks until `_hold` is dropped, so the thread is
        // still running when the second start is attempted.
        let (_hold, reader) = blocking_reader();
        listener.start_with(BufReader::new(reader)).unwrap();

        assert!(matches!(
            listener.start_with(Cursor::new("")),
            Err(InputError::AlreadyRunning)
        ));
    }

    fn blocking_reader() -> (std::sync::mpsc::Sender<()>, BlockingReader) {
        let (tx, rx) = std::sync::mpsc::channel();
        (tx, BlockingReader { rx })
    }

    /// Reader that reports end of input once its sender is dropped
    struct BlockingReader {
        rx: std::sync::mpsc::Receiver<()>,
    }

    impl io::Read for BlockingReader {
        fn read(&mut self, _out: &mut [u8]) -> io::Result<usize> {
            while self.rx.recv().is_ok() {}
            Ok(0)
        }
    }
}
