// Chunk: docs/chunks/run_output - Running the open file and capturing its output

//! Background thread draining a child's output pipe into an [`OutputCapture`].

use std::io::{self, ErrorKind, Read};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};

use crate::capture::OutputCapture;

const CHUNK_SIZE: usize = 4096;

/// Handle to a running reader thread.
#[derive(Debug)]
pub struct ReaderHandle {
    thread: Option<JoinHandle<()>>,
    /// Receives one message (or a disconnect) when the thread is done.
    done: Receiver<()>,
}

/// Starts a thread that copies `reader` into `capture` until EOF or error.
pub fn spawn_reader<R>(mut reader: R, capture: OutputCapture) -> io::Result<ReaderHandle>
where
    R: Read + Send + 'static,
{
    let (done_tx, done_rx) = bounded(1);

    let thread = thread::Builder::new()
        .name("gapline-run-output".into())
        .spawn(move || {
            let mut buf = [0u8; CHUNK_SIZE];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if let Err(err) = capture.append_bytes(&buf[..n]) {
                            tracing::warn!(%err, "dropping run output");
                            break;
                        }
                    }
                    Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                    Err(err) => {
                        tracing::debug!(%err, "run output pipe closed with error");
                        break;
                    }
                }
            }
            if let Err(err) = capture.finish() {
                tracing::warn!(%err, "dropping trailing run output");
            }
            let _ = done_tx.send(());
        })?;

    Ok(ReaderHandle {
        thread: Some(thread),
        done: done_rx,
    })
}

impl ReaderHandle {
    /// True once the thread has stopped reading.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits up to `timeout` for the thread to finish and joins it.
    ///
    /// Returns false if it is still blocked on the pipe (for example when a
    /// grandchild process inherited it). The thread is then detached; it
    /// exits on its own once the pipe closes.
    pub fn join_timeout(&mut self, timeout: Duration) -> bool {
        let Some(thread) = self.thread.take() else {
            return true;
        };

        match self.done.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if thread.join().is_err() {
                    tracing::warn!("run output reader panicked");
                }
                true
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(?timeout, "run output reader did not finish; detaching");
                false
            }
        }
    }
}
