//! External command execution.
//!
//! Every call to `az`, `azcopy` or `git` goes through [`Invocation`]: the
//! argument list is built explicitly (never through a shell), output is
//! captured, and the child is killed once its timeout elapses.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::{RemoteError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A single external command, built argument by argument.
#[derive(Clone)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    /// Indices into `args` that are never displayed
    secrets: Vec<usize>,
    envs: Vec<(String, String)>,
    cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            secrets: Vec::new(),
            envs: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append an argument that is shown as `<redacted>` in logs and errors.
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secrets.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    /// Set an environment variable for this invocation only.
    ///
    /// Values are never logged.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Run the command and capture its output, whatever the exit status.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Spawn` if the program cannot be started and
    /// `RemoteError::Timeout` if it is still running after `timeout`.
    pub fn run(&self, timeout: Duration) -> Result<Captured> {
        debug!(command = %self, "running");

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| RemoteError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        // Drain both pipes while waiting so a chatty child never blocks on a full pipe.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let start = Instant::now();
        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if start.elapsed() >= timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RemoteError::Timeout {
                        program: self.program.clone(),
                        secs: timeout.as_secs(),
                    }
                    .into());
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        let captured = Captured {
            code: status.code(),
            stdout: collect(stdout),
            stderr: collect(stderr),
        };
        trace!(program = %self.program, code = ?captured.code, "finished");
        Ok(captured)
    }

    /// Run the command and require a zero exit status.
    ///
    /// # Errors
    ///
    /// Same as [`Invocation::run`], plus `RemoteError::Failed` on a non-zero exit.
    pub fn run_checked(&self, timeout: Duration) -> Result<Captured> {
        let captured = self.run(timeout)?;
        if captured.success() {
            Ok(captured)
        } else {
            Err(RemoteError::Failed {
                command: self.to_string(),
                code: captured.code,
                stderr: captured.stderr.trim().to_string(),
            }
            .into())
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for (i, arg) in self.args.iter().enumerate() {
            if self.secrets.contains(&i) {
                f.write_str(" <redacted>")?;
                continue;
            }
            let arg = redact(arg);
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_keys: Vec<&str> = self.envs.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("Invocation")
            .field("command", &self.to_string())
            .field("env", &env_keys)
            .field("cwd", &self.cwd)
            .finish()
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Hide SAS query strings in URLs.
fn redact(arg: &str) -> String {
    match arg.split_once('?') {
        Some((base, _)) if base.starts_with("https://") => format!("{}?<redacted>", base),
        _ => arg.to_string(),
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}
