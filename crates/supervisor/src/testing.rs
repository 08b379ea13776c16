//! In-memory launcher for supervisor tests.

use std::{
    collections::HashMap,
    ffi::OsString,
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, AtomicU32, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;

use crate::launcher::{LaunchedProcess, ProcessExit, ProcessLauncher};

type Invocation = (PathBuf, Vec<OsString>);

/// Records every invocation and hands out increasing fake pids.
///
/// Daemons launched against a config registered with [`MockLauncher::fail_with`] write the given
/// message to their log and report an exit code of 1.
#[derive(Debug)]
pub(crate) struct MockLauncher {
    next_pid: AtomicU32,
    failing: Mutex<HashMap<PathBuf, String>>,
    fail_stops: AtomicBool,
    spawned: Mutex<Vec<Invocation>>,
    stopped: Mutex<Vec<Invocation>>,
}

impl MockLauncher {
    pub(crate) fn new() -> Self {
        Self {
            next_pid: AtomicU32::new(1000),
            failing: Mutex::default(),
            fail_stops: AtomicBool::new(false),
            spawned: Mutex::default(),
            stopped: Mutex::default(),
        }
    }

    pub(crate) fn fail_with(&self, config: &Path, message: &str) {
        self.failing
            .lock()
            .unwrap()
            .insert(config.to_path_buf(), message.to_string());
    }

    pub(crate) fn fail_stops(&self) {
        self.fail_stops.store(true, Ordering::SeqCst);
    }

    pub(crate) fn spawned(&self) -> Vec<Invocation> {
        self.spawned.lock().unwrap().clone()
    }

    pub(crate) fn stopped(&self) -> Vec<Invocation> {
        self.stopped.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessLauncher for MockLauncher {
    fn spawn(
        &self,
        program: &Path,
        args: &[OsString],
        mut log: File,
    ) -> io::Result<Box<dyn LaunchedProcess>> {
        self.spawned
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));

        let failing = self.failing.lock().unwrap();
        let failure = args
            .iter()
            .find_map(|arg| failing.get(Path::new(arg)).cloned());
        drop(failing);
        let exited = match failure {
            Some(message) => {
                writeln!(log, "{message}")?;
                Some(ProcessExit { code: Some(1) })
            }
            None => None,
        };

        Ok(Box::new(MockProcess {
            pid: self.next_pid.fetch_add(1, Ordering::SeqCst),
            exited,
        }))
    }

    async fn run_quiet(&self, program: &Path, args: &[OsString]) -> io::Result<ProcessExit> {
        self.stopped
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));

        if self.fail_stops.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such binary"));
        }

        Ok(ProcessExit { code: Some(0) })
    }
}

#[derive(Debug)]
struct MockProcess {
    pid: u32,
    exited: Option<ProcessExit>,
}

impl LaunchedProcess for MockProcess {
    fn id(&self) -> u32 {
        self.pid
    }

    fn try_exited(&mut self) -> io::Result<Option<ProcessExit>> {
        Ok(self.exited)
    }
}
