use super::*;

fn make_module(path: &str, args: &[&str]) -> Module {
    Module::new(
        "ts_bot",
        std::path::PathBuf::from(path),
        args.iter().map(|s| s.to_string()).collect(),
        None,
    )
}

#[test]
fn start_sets_running_on_success() {
    let mut module = make_module("/bin/sleep", &["5"]);
    let child = start(&mut module);
    assert!(child.is_some());
    assert_eq!(module.state, State::Running);
    assert!(module.pid.is_some());
}

#[test]
fn start_fails_on_bad_path() {
    let mut module = make_module("/no/such/executable", &[]);
    let child = start(&mut module);
    assert!(child.is_none());
    assert_eq!(module.state, State::Off);
}

#[test]
fn start_refuses_when_already_running() {
    let mut module = make_module("/bin/sleep", &["5"]);
    module.state = State::Running;
    module.pid = Some(1);
    let child = start(&mut module);
    assert!(child.is_none());
}

#[test]
fn exit_is_idempotent_when_parked() {
    let mut module = make_module("/bin/true", &[]);
    assert_eq!(module.state, State::Off);
    exit(&mut module);
    assert_eq!(module.state, State::Off);
}

#[test]
fn exit_transitions_running_to_exited() {
    let mut module = make_module("/bin/sleep", &["5"]);
    start(&mut module);
    exit(&mut module);
    assert_eq!(module.state, State::Exited);
    assert!(module.pid.is_none());
}

#[test]
fn restart_sweep_skips_during_startup() {
    let mut table = ModuleTable {
        bot: make_module("/bin/true", &[]),
        webserver: make_module("/bin/true", &[]),
        dirty: true,
        stopped: false,
        starting: true,
    };
    table.bot.restart_requested = true;

    let mut started = Vec::new();
    restart_sweep(&mut table, |n, c| started.push((n, c)));

    assert!(started.is_empty());
    assert!(!table.bot.restart_requested);
    assert!(!table.dirty);
}

#[test]
fn restart_sweep_stops_on_stopped_status() {
    let mut table = ModuleTable {
        bot: make_module("/bin/true", &[]),
        webserver: make_module("/bin/true", &[]),
        dirty: true,
        stopped: true,
        starting: false,
    };
    table.bot.restart_requested = true;

    let mut started = Vec::new();
    restart_sweep(&mut table, |n, c| started.push((n, c)));

    assert!(started.is_empty());
}

#[test]
fn restart_sweep_gives_up_past_max_fails() {
    let mut table = ModuleTable {
        bot: make_module("/no/such/executable", &[]),
        webserver: make_module("/bin/true", &[]),
        dirty: true,
        stopped: false,
        starting: false,
    };
    table.bot.restart_requested = true;
    table.bot.num_fails = MAX_FAIL_FOR_STOP - 1;

    let mut started = Vec::new();
    restart_sweep(&mut table, |n, c| started.push((n, c)));

    assert!(started.is_empty());
    assert_eq!(table.bot.num_fails, MAX_FAIL_FOR_STOP);
    assert_eq!(table.bot.state, State::Exited);
    assert!(!table.bot.restart_requested);
}

#[test]
fn should_reap_matches_the_watched_pid() {
    let mut module = make_module("/bin/sleep", &["5"]);
    module.state = State::Running;
    module.pid = Some(123);
    assert!(should_reap(&module, Some(123)));
}

#[test]
fn should_reap_refuses_a_stale_watcher() {
    // Simulates a watcher for the old child of a `restart`: the table
    // already shows a new, healthy child running under a different pid
    // by the time the old child's `wait()` resolves.
    let mut module = make_module("/bin/sleep", &["5"]);
    module.state = State::Running;
    module.pid = Some(456);
    assert!(!should_reap(&module, Some(123)));
}

#[test]
fn should_reap_refuses_when_module_not_running() {
    let mut module = make_module("/bin/sleep", &["5"]);
    module.state = State::Exited;
    module.pid = None;
    assert!(!should_reap(&module, Some(123)));
}

#[test]
fn restart_sweep_restarts_healthy_module() {
    let mut table = ModuleTable {
        bot: make_module("/bin/sleep", &["5"]),
        webserver: make_module("/bin/true", &[]),
        dirty: true,
        stopped: false,
        starting: false,
    };
    table.bot.restart_requested = true;

    let mut started = Vec::new();
    restart_sweep(&mut table, |n, c| started.push((n, c)));

    assert_eq!(started.len(), 1);
    assert_eq!(started[0].0, "ts_bot");
    assert_eq!(table.bot.state, State::Running);
    assert_eq!(table.bot.num_fails, 1);
}
