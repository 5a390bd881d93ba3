//! External response generators.
//!
//! A generator is an opaque, fallible text-to-text capability. The selector
//! hands it the user's original utterance and uses whatever comes back as the
//! reply.

use std::fmt;
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, anyhow, bail};
use crossbeam_channel::{RecvTimeoutError, bounded};
use log::debug;

use crate::error::{PalaverError, Result};

/// Response generator trait.
pub trait ResponseGenerator: Send + Sync {
    /// Produce a reply for `utterance`.
    fn generate(&self, utterance: &str) -> anyhow::Result<String>;

    /// Get the name of this generator for debugging and logging.
    fn name(&self) -> &str;
}

/// Adapts a closure into a [`ResponseGenerator`].
///
/// # Examples
///
/// ```
/// use palaver::response::{FnGenerator, ResponseGenerator};
///
/// let echo = FnGenerator::new("echo", |text: &str| Ok(format!("You said: {text}")));
/// assert_eq!(echo.generate("hi").unwrap(), "You said: hi");
/// ```
pub struct FnGenerator<F> {
    name: String,
    f: F,
}

impl<F> FnGenerator<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    pub fn new<S: Into<String>>(name: S, f: F) -> Self {
        FnGenerator {
            name: name.into(),
            f,
        }
    }
}

impl<F> ResponseGenerator for FnGenerator<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    fn generate(&self, utterance: &str) -> anyhow::Result<String> {
        (self.f)(utterance)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnGenerator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGenerator").field("name", &self.name).finish()
    }
}

/// Runs another generator on a worker thread and gives up after a deadline.
///
/// A timed-out call is reported as a failure. The worker thread is detached
/// and its late result is discarded; backends that hold external resources,
/// such as [`CommandGenerator::with_timeout`], enforce their own deadline so
/// the worker finishes too.
pub struct TimeoutGenerator {
    inner: Arc<dyn ResponseGenerator>,
    timeout: Duration,
}

impl TimeoutGenerator {
    pub fn new(inner: Arc<dyn ResponseGenerator>, timeout: Duration) -> Self {
        TimeoutGenerator { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ResponseGenerator for TimeoutGenerator {
    fn generate(&self, utterance: &str) -> anyhow::Result<String> {
        let (tx, rx) = bounded(1);
        let inner = Arc::clone(&self.inner);
        let utterance = utterance.to_string();

        thread::Builder::new()
            .name(format!("palaver-{}", self.inner.name()))
            .spawn(move || {
                let _ = tx.send(inner.generate(&utterance));
            })
            .context("failed to spawn generator thread")?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(PalaverError::timeout(format!(
                "generator '{}' did not answer within {:?}",
                self.inner.name(),
                self.timeout
            ))
            .into()),
            Err(RecvTimeoutError::Disconnected) => Err(anyhow!(
                "generator '{}' stopped without answering",
                self.inner.name()
            )),
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

impl fmt::Debug for TimeoutGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeoutGenerator")
            .field("inner", &self.inner.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Interval between exit checks while a command runs under a deadline.
const COMMAND_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Pipes the utterance to an external command and reads the reply from its
/// standard output.
///
/// The command gets the utterance followed by a newline on stdin; its stdout,
/// trimmed, is the reply. A non-zero exit status is a failure. With a timeout
/// set, a command still running at the deadline is killed and the call fails.
/// The child is always reaped before `generate` returns.
#[derive(Clone, Debug)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandGenerator {
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        CommandGenerator {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// Split a command line on whitespace into program and arguments.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| PalaverError::config("generator command is empty"))?;
        Ok(Self::new(program, parts.collect()))
    }

    /// Kill the command if it has not exited after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn wait(&self, child: &mut Child) -> anyhow::Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return child
                .wait()
                .with_context(|| format!("failed to wait for '{}'", self.program));
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child
                .try_wait()
                .with_context(|| format!("failed to wait for '{}'", self.program))?
            {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                debug!("Killing '{}' (pid {}) after {:?}", self.program, child.id(), timeout);
                reap(child);
                return Err(PalaverError::timeout(format!(
                    "'{}' did not exit within {:?}",
                    self.program, timeout
                ))
                .into());
            }
            thread::sleep(COMMAND_POLL_INTERVAL);
        }
    }
}

/// Kill `child` if it is still running and collect its exit status.
fn reap(child: &mut Child) {
    // Fails only when the child has already exited.
    let _ = child.kill();
    let _ = child.wait();
}

/// Drain a child pipe on its own thread so a chatty command cannot block on a
/// full pipe while we wait for it.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        buffer
    })
}

impl ResponseGenerator for CommandGenerator {
    fn generate(&self, utterance: &str) -> anyhow::Result<String> {
        debug!("Running generator command {:?} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start '{}'", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = writeln!(stdin, "{utterance}") {
                reap(&mut child);
                return Err(e).with_context(|| format!("failed to write to '{}'", self.program));
            }
        }

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let status = self.wait(&mut child)?;

        let stdout = stdout
            .join()
            .map_err(|_| anyhow!("stdout reader for '{}' panicked", self.program))?;
        let stderr = stderr
            .join()
            .map_err(|_| anyhow!("stderr reader for '{}' panicked", self.program))?;

        if !status.success() {
            bail!(
                "'{}' exited with {}: {}",
                self.program,
                status,
                String::from_utf8_lossy(&stderr).trim()
            );
        }

        let reply = String::from_utf8(stdout)
            .with_context(|| format!("'{}' produced invalid UTF-8", self.program))?;
        Ok(reply.trim().to_string())
    }

    fn name(&self) -> &str {
        &self.program
    }
}
