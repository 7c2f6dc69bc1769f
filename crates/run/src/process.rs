// Chunk: docs/chunks/run_output - Running the open file and capturing its output

//! A command started through the platform shell, with its combined
//! stdout/stderr streamed into an [`OutputCapture`].

use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::capture::OutputCapture;
use crate::reader::{spawn_reader, ReaderHandle};
use crate::RunError;

/// How long [`RunProcess::kill`] waits for the reader thread by default.
pub const DEFAULT_KILL_TIMEOUT: Duration = Duration::from_secs(1);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Handle to a running command.
///
/// Dropping the handle kills the command.
#[derive(Debug)]
pub struct RunProcess {
    child: Child,
    reader: Option<ReaderHandle>,
    capture: OutputCapture,
    kill_timeout: Duration,
    exit_code: Option<i32>,
}

impl RunProcess {
    /// Starts `command_line` through the platform shell in `cwd`.
    ///
    /// The capture is cleared first. stderr is merged into stdout so the
    /// capture shows both streams in the order the command wrote them. On
    /// unix the shell leads a new process group, so [`RunProcess::kill`]
    /// reaches everything the command starts.
    pub fn spawn(
        command_line: &str,
        cwd: Option<&Path>,
        capture: OutputCapture,
    ) -> Result<Self, RunError> {
        let mut command = shell_command(command_line);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        capture.clear();
        let mut child = command.spawn().map_err(|source| RunError::Spawn {
            command: command_line.to_string(),
            source,
        })?;
        tracing::info!(pid = child.id(), command = command_line, "started run");

        let reader = match child.stdout.take() {
            Some(stdout) => match spawn_reader(stdout, capture.clone()) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunError::Reader(err));
                }
            },
            None => None,
        };

        Ok(Self {
            child,
            reader,
            capture,
            kill_timeout: DEFAULT_KILL_TIMEOUT,
            exit_code: None,
        })
    }

    /// Sets how long [`RunProcess::kill`] waits for the output reader.
    pub fn with_kill_timeout(mut self, timeout: Duration) -> Self {
        self.kill_timeout = timeout;
        self
    }

    pub fn capture(&self) -> &OutputCapture {
        &self.capture
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn is_running(&mut self) -> bool {
        self.try_wait().is_none()
    }

    /// Returns the exit code once the command has exited.
    ///
    /// A command ended by a signal reports -1, as does a failure to query
    /// its status.
    pub fn try_wait(&mut self) -> Option<i32> {
        if self.exit_code.is_some() {
            return self.exit_code;
        }
        match self.child.try_wait() {
            Ok(Some(status)) => self.record_exit(status),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(%err, "failed to query run status; assuming it exited");
                self.exit_code = Some(-1);
                self.exit_code
            }
        }
    }

    /// Waits up to `timeout` for the command to exit.
    ///
    /// On exit the output reader is joined (bounded by the kill timeout) so
    /// the capture holds everything the command wrote. A timeout too large
    /// to represent as a deadline waits indefinitely.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<i32> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            if let Some(code) = self.try_wait() {
                self.join_reader();
                return Some(code);
            }
            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return None;
                    }
                    POLL_INTERVAL.min(deadline - now)
                }
                None => POLL_INTERVAL,
            };
            thread::sleep(pause);
        }
    }

    /// Terminates the command, including any processes it started, and
    /// releases its output pipe.
    ///
    /// Returns false if the reader thread was still blocked after the kill
    /// timeout and had to be detached.
    pub fn kill(&mut self) -> bool {
        // On unix the group can outlive the shell: a process still holding
        // the output pipe is signalled even after the shell was reaped.
        if self.exit_code.is_none() || (cfg!(unix) && self.reader.is_some()) {
            match kill_tree(&mut self.child) {
                Ok(()) => tracing::debug!(pid = self.child.id(), "killed run"),
                Err(err) => tracing::warn!(%err, "failed to kill run"),
            }
        }
        if self.exit_code.is_none() {
            match self.child.wait() {
                Ok(status) => {
                    self.record_exit(status);
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to reap run");
                    self.exit_code = Some(-1);
                }
            }
        }
        self.join_reader()
    }

    fn record_exit(&mut self, status: ExitStatus) -> Option<i32> {
        let code = status.code().unwrap_or(-1);
        tracing::info!(code, "run exited");
        self.exit_code = Some(code);
        self.exit_code
    }

    fn join_reader(&mut self) -> bool {
        match self.reader.take() {
            Some(mut reader) => reader.join_timeout(self.kill_timeout),
            None => true,
        }
    }
}

impl Drop for RunProcess {
    fn drop(&mut self) {
        if self.exit_code.is_none() || self.reader.is_some() {
            self.kill();
        }
    }
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(format!("exec 2>&1; {command_line}"));
    command
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(format!("{command_line} 2>&1"));
    command
}

/// Sends SIGKILL to the run's process group, whose id is the shell's pid.
#[cfg(unix)]
fn kill_tree(child: &mut Child) -> io::Result<()> {
    let pgid = libc::pid_t::try_from(child.id())
        .map_err(|_| io::Error::new(ErrorKind::InvalidInput, "pid out of range"))?;
    // SAFETY: killpg takes plain integers and touches no memory of ours.
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } == 0 {
        return Ok(());
    }
    let err = io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::ESRCH) {
        // Every process in the group has already exited.
        return Ok(());
    }
    // Some platforms refuse to signal a group whose leader is a zombie.
    kill_child(child).map_err(|_| err)
}

/// Kills the shell and its descendants with `taskkill /T`, falling back to
/// the shell alone.
#[cfg(windows)]
fn kill_tree(child: &mut Child) -> io::Result<()> {
    let status = Command::new("taskkill")
        .args(["/F", "/T", "/PID"])
        .arg(child.id().to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(status) if status.success() => Ok(()),
        _ => kill_child(child),
    }
}

fn kill_child(child: &mut Child) -> io::Result<()> {
    match child.kill() {
        // Already exited; the caller's wait() reaps it.
        Err(err) if err.kind() == ErrorKind::InvalidInput => Ok(()),
        other => other,
    }
}
