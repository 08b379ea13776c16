//! The seam between the supervisor and the operating system's process table.

use std::{
    ffi::OsString,
    fmt,
    fs::File,
    io,
    path::Path,
    process::{ExitStatus, Stdio},
};

use async_trait::async_trait;
use tokio::process::{Child, Command};

/// How a process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Exit code, absent when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessExit {
    /// Whether the process exited with code zero.
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl From<ExitStatus> for ProcessExit {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// A daemon handed back by [`ProcessLauncher::spawn`].
pub trait LaunchedProcess: Send + fmt::Debug {
    /// OS process id.
    fn id(&self) -> u32;

    /// Returns how the process ended if it already has, without blocking.
    fn try_exited(&mut self) -> io::Result<Option<ProcessExit>>;
}

/// Starts daemons and runs their control commands.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Starts `program` in the background with both output streams appended to `log`.
    fn spawn(
        &self,
        program: &Path,
        args: &[OsString],
        log: File,
    ) -> io::Result<Box<dyn LaunchedProcess>>;

    /// Runs `program` to completion with its output discarded.
    async fn run_quiet(&self, program: &Path, args: &[OsString]) -> io::Result<ProcessExit>;
}

/// Launches real OS processes through [`tokio::process`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

#[async_trait]
impl ProcessLauncher for SystemLauncher {
    fn spawn(
        &self,
        program: &Path,
        args: &[OsString],
        log: File,
    ) -> io::Result<Box<dyn LaunchedProcess>> {
        let stderr = log.try_clone()?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(stderr));

        // keep terminal signals aimed at the CLI away from the daemon
        #[cfg(unix)]
        command.process_group(0);

        let child = command.spawn()?;
        let id = child
            .id()
            .ok_or_else(|| io::Error::other("spawned process has no pid"))?;

        Ok(Box::new(SystemProcess { child, id }))
    }

    async fn run_quiet(&self, program: &Path, args: &[OsString]) -> io::Result<ProcessExit> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        Ok(status.into())
    }
}

/// A child of this process. Dropping it leaves the process running.
#[derive(Debug)]
struct SystemProcess {
    child: Child,
    id: u32,
}

impl LaunchedProcess for SystemProcess {
    fn id(&self) -> u32 {
        self.id
    }

    fn try_exited(&mut self) -> io::Result<Option<ProcessExit>> {
        Ok(self.child.try_wait()?.map(ProcessExit::from))
    }
}
