// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module lifecycle: Start, Exit, Reap, and the restart sweep.
//!
//! The reaper is a watcher task per running module instead of a signal
//! handler: each `Start` spawns a task that awaits the child's exit
//! future and, on completion, takes the table lock and performs exactly
//! what a `SIGCHLD` handler would — state to `Dead`, handle dropped,
//! exit status recorded, restart requested — then runs the restart sweep
//! while still holding the lock, so the sweep is atomic with respect to
//! any other reap.

use std::process::ExitStatus;
use std::sync::Arc;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use parking_lot::Mutex;
use tokio::process::Command;
use tracing::{error, info, warn};

use crate::config::Config;

pub const MAX_FAIL_FOR_STOP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Off,
    Running,
    Dead,
    Exited,
}

/// One supervised child process definition plus its mutable runtime state.
pub struct Module {
    pub name: &'static str,
    pub path: std::path::PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<std::path::PathBuf>,
    pub state: State,
    pub pid: Option<u32>,
    pub num_fails: u32,
    pub restart_requested: bool,
    pub last_exit: Option<ExitStatus>,
}

impl Module {
    fn new(
        name: &'static str,
        path: std::path::PathBuf,
        args: Vec<String>,
        cwd: Option<std::path::PathBuf>,
    ) -> Self {
        Module {
            name,
            path,
            args,
            cwd,
            state: State::Off,
            pid: None,
            num_fails: 0,
            restart_requested: false,
            last_exit: None,
        }
    }

    fn is_parked(&self) -> bool {
        matches!(self.state, State::Off | State::Exited)
    }
}

/// The fixed set of modules the supervisor owns: `ts_bot` and
/// `ts_webserver`, named to match the original tool's own module names.
pub struct ModuleTable {
    pub bot: Module,
    pub webserver: Module,
    pub dirty: bool,
    /// Set once the graceful-shutdown command has been processed; the
    /// restart sweep refuses to act on it.
    pub stopped: bool,
    pub starting: bool,
}

impl ModuleTable {
    pub fn new(cfg: &Config) -> Self {
        ModuleTable {
            bot: Module::new("ts_bot", cfg.bot_path.clone(), cfg.bot_args.clone(), None),
            webserver: Module::new(
                "ts_webserver",
                cfg.web_path.clone(),
                cfg.web_args.clone(),
                Some(cfg.web_dir.clone()),
            ),
            dirty: false,
            stopped: false,
            starting: true,
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Module> {
        match name {
            "ts_bot" => Some(&mut self.bot),
            "ts_webserver" => Some(&mut self.webserver),
            _ => None,
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Module> {
        std::iter::once(&mut self.bot).chain(std::iter::once(&mut self.webserver))
    }

    pub fn names(&self) -> [&'static str; 2] {
        [self.bot.name, self.webserver.name]
    }
}

/// Start (init) a module: spawn its child process with stdout/stderr
/// piped — the async-Rust stand-in for the dedicated pipe the original
/// dup2'd both onto — and hand the owned `Child` back to the caller,
/// which spawns the relay and watcher tasks. Returns `None` on any spawn
/// failure, leaving the module's state untouched (the failure-recovery
/// undo the original performed by hand: free pipe slot, close fds — has
/// no counterpart here since nothing was claimed until `spawn`
/// succeeds).
pub fn start(module: &mut Module) -> Option<tokio::process::Child> {
    info!("Attempting to start up '{}'", module.name);
    if module.state == State::Running {
        error!("{} is already running!", module.name);
        return None;
    }

    let mut cmd = Command::new(&module.path);
    cmd.args(&module.args);
    if let Some(cwd) = &module.cwd {
        cmd.current_dir(cwd);
    }
    cmd.kill_on_drop(false);
    cmd.stdout(std::process::Stdio::piped());
    cmd.stderr(std::process::Stdio::piped());

    match cmd.spawn() {
        Ok(child) => {
            module.pid = child.id();
            module.state = State::Running;
            Some(child)
        }
        Err(e) => {
            error!("Failed to start {}: {}", module.name, e);
            None
        }
    }
}

/// Exit a module: idempotent for modules already parked. Sends
/// termination, then kill if that fails to land, marks `Dead` then
/// `Exited`.
pub fn exit(module: &mut Module) {
    if module.is_parked() {
        return;
    }

    if module.state == State::Running {
        if let Some(pid) = module.pid {
            let pid = Pid::from_raw(pid as i32);
            if signal::kill(pid, Signal::SIGTERM).is_err() {
                if let Err(e) = signal::kill(pid, Signal::SIGKILL) {
                    warn!("failed to kill pid {}: {}", pid, e);
                }
            }
        }
        module.state = State::Dead;
    }
    module.pid = None;
    module.state = State::Exited;
}

/// Run the restart sweep: for every module with `restart_requested` set,
/// retry Start under the bounded failure counter, giving up permanently
/// past [`MAX_FAIL_FOR_STOP`]. Freshly started children are handed to
/// `on_started` so the caller can spawn their watcher tasks without
/// holding the table lock across an `.await`.
pub fn restart_sweep(
    table: &mut ModuleTable,
    mut on_started: impl FnMut(&'static str, tokio::process::Child),
) {
    for module in table.iter_mut() {
        if !module.restart_requested {
            continue;
        }

        info!(
            "{} has died with status {:?}, attempting to restart",
            module.name, module.last_exit
        );

        if table.starting {
            error!("{} failed on supervisor startup!", module.name);
            module.restart_requested = false;
            continue;
        }
        if table.stopped {
            return;
        }

        loop {
            exit(module);
            module.num_fails += 1;
            if module.num_fails < MAX_FAIL_FOR_STOP {
                if let Some(child) = start(module) {
                    on_started(module.name, child);
                    break;
                }
            } else {
                error!("{} failed too many times. Leaving off", module.name);
                break;
            }
        }
        module.restart_requested = false;
    }
    table.dirty = false;
}

/// A watcher only reaps the module it was spawned to watch. A
/// `restart`/`enable` may have already replaced the module's child with a
/// new one by the time the watcher's `child.wait()` resolves — e.g. the
/// old, SIGTERM'd child exiting only after the new one is already
/// `Running` — so checking `state == Running` alone would mark a healthy
/// replacement `Dead` and trigger a spurious restart. Comparing the pid
/// the watcher was spawned with against the pid currently recorded on
/// the module closes that gap.
fn should_reap(module: &Module, watched_pid: Option<u32>) -> bool {
    module.state == State::Running && module.pid == watched_pid
}

/// Spawn the relay tasks for a module's stdout/stderr plus the watcher
/// task that awaits its exit: on exit, performs the Reap transition
/// under the table lock and immediately runs the restart sweep while
/// still holding it, recursively launching anything the sweep restarts.
pub fn launch(
    table: Arc<Mutex<ModuleTable>>,
    sink: Arc<crate::logsink::LogSink>,
    name: &'static str,
    mut child: tokio::process::Child,
) {
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(crate::logsink::relay(stdout, name, sink.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(crate::logsink::relay(stderr, name, sink.clone()));
    }

    let watched_pid = child.id();

    tokio::spawn(async move {
        let status = child.wait().await;

        let mut started = Vec::new();
        {
            let mut guard = table.lock();
            if let Some(module) = guard.get_mut(name) {
                if should_reap(module, watched_pid) {
                    module.state = State::Dead;
                    module.pid = None;
                    module.last_exit = status.ok();
                    module.restart_requested = true;
                    guard.dirty = true;
                }
            }
            if guard.dirty {
                restart_sweep(&mut guard, |n, c| started.push((n, c)));
            }
        }
        for (started_name, started_child) in started {
            launch(table.clone(), sink.clone(), started_name, started_child);
        }
    });
}

#[cfg(test)]
#[path = "module_tests.rs"]
mod tests;
