//! Refresh timer: a background thread that opportunistically repaints the
//! prompt at a fixed interval.
//!
//! The timer never blocks on the gate. If a handler or another writer holds
//! it when a tick fires, the tick is dropped rather than queued; the next
//! ordinary redraw repaints anyway.

use crate::engine::Shared;
use crossbeam_channel::{bounded, select, tick, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Handle to the refresh thread. Dropping it signals shutdown; [`join`]
/// additionally waits for the thread to finish so no repaint can land after
/// the loop has quit.
///
/// [`join`]: RefreshTimer::join
pub(crate) struct RefreshTimer {
    handle: Option<JoinHandle<()>>,
    shutdown_tx: Sender<()>,
}

impl RefreshTimer {
    /// Spawn the refresh thread, repainting every `interval`.
    pub(crate) fn spawn(interval: Duration, shared: Arc<Shared>) -> Self {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("promptline-refresh".to_string())
            .spawn(move || {
                let ticker = tick(interval);
                loop {
                    select! {
                        recv(shutdown_rx) -> _ => break,
                        recv(ticker) -> _ => {
                            // Opportunistic acquire: back off if anyone
                            // holds the gate.
                            if let Some(mut renderer) = shared.try_gate() {
                                let prompt = shared.prompt_text();
                                if let Err(err) = renderer.redraw(&prompt) {
                                    warn!(error = %err, "refresh repaint failed");
                                }
                            } else {
                                debug!("refresh tick dropped, gate busy");
                            }
                        }
                    }
                }
            })
            .expect("Failed to spawn refresh thread");

        Self {
            handle: Some(handle),
            shutdown_tx,
        }
    }

    /// Signal shutdown and wait for the thread to finish.
    pub(crate) fn join(mut self) {
        let _ = self.shutdown_tx.try_send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.try_send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::CaptureConsole;

    #[test]
    fn test_timer_repaints_when_gate_free() {
        let capture = CaptureConsole::new();
        let shared = Arc::new(Shared::new(
            Box::new(|| "tick > ".to_string()),
            Box::new(capture.clone()),
        ));
        let timer = RefreshTimer::spawn(Duration::from_millis(5), Arc::clone(&shared));
        thread::sleep(Duration::from_millis(50));
        timer.join();
        assert!(capture.printed().contains("tick > "));
    }

    #[test]
    fn test_timer_backs_off_while_gate_held() {
        let capture = CaptureConsole::new();
        let shared = Arc::new(Shared::new(
            Box::new(|| "busy > ".to_string()),
            Box::new(capture.clone()),
        ));
        let gate = shared.gate();
        let timer = RefreshTimer::spawn(Duration::from_millis(5), Arc::clone(&shared));
        thread::sleep(Duration::from_millis(50));
        // Every tick so far was dropped.
        assert_eq!(capture.contents(), "");
        drop(gate);
        timer.join();
    }

    #[test]
    fn test_no_repaint_after_join() {
        let capture = CaptureConsole::new();
        let shared = Arc::new(Shared::new(
            Box::new(|| ">".to_string()),
            Box::new(capture.clone()),
        ));
        let timer = RefreshTimer::spawn(Duration::from_millis(5), Arc::clone(&shared));
        thread::sleep(Duration::from_millis(20));
        timer.join();
        let after = capture.contents();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(capture.contents(), after);
    }
}
