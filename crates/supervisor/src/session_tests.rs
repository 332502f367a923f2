use super::*;
use crate::logsink::LogSink;
use crate::module::ModuleTable;
use std::path::PathBuf;

fn test_context() -> Arc<SupervisorContext> {
    let mut table = ModuleTable {
        bot: Module {
            name: "ts_bot",
            path: PathBuf::from("/bin/sleep"),
            args: vec!["5".to_string()],
            cwd: None,
            state: crate::module::State::Off,
            pid: None,
            num_fails: 0,
            restart_requested: false,
            last_exit: None,
        },
        webserver: Module {
            name: "ts_webserver",
            path: PathBuf::from("/bin/sleep"),
            args: vec!["5".to_string()],
            cwd: None,
            state: crate::module::State::Off,
            pid: None,
            num_fails: 0,
            restart_requested: false,
            last_exit: None,
        },
        dirty: false,
        stopped: false,
        starting: false,
    };
    table.dirty = false;
    Arc::new(SupervisorContext::new(table, LogSink::new(tempfile::tempfile().unwrap())))
}

#[test]
fn stop_sets_stopped_and_replies() {
    let ctx = test_context();
    let reply = dispatch(&ctx, Command::Stop);
    assert_eq!(reply, protocol::STOPPING_REPLY);
    assert!(ctx.table.lock().stopped);
}

#[test]
fn unknown_command_reply() {
    let ctx = test_context();
    assert_eq!(dispatch(&ctx, Command::Unknown), protocol::UNKNOWN_COMMAND_REPLY);
}

#[test]
fn disable_with_no_args_replies_no_argument() {
    let ctx = test_context();
    assert_eq!(dispatch(&ctx, Command::Disable(vec![])), protocol::NO_ARGUMENT_REPLY);
}

#[test]
fn disable_unknown_module_name_is_ok() {
    let ctx = test_context();
    let reply = dispatch(&ctx, Command::Disable(vec!["not_a_module".to_string()]));
    assert_eq!(reply, protocol::OK_REPLY);
}

#[tokio::test]
async fn enable_starts_module_and_replies_ok() {
    let ctx = test_context();
    let reply = dispatch(&ctx, Command::Enable(vec!["ts_bot".to_string()]));
    assert_eq!(reply, protocol::OK_REPLY);
    assert_eq!(ctx.table.lock().bot.state, crate::module::State::Running);
    dispatch(&ctx, Command::Disable(vec!["ts_bot".to_string()]));
}

#[tokio::test]
async fn restart_replies_fail_on_bad_path() {
    let ctx = test_context();
    ctx.table.lock().bot.path = PathBuf::from("/no/such/executable");
    let reply = dispatch(&ctx, Command::Restart(vec!["ts_bot".to_string()]));
    assert_eq!(reply, protocol::FAIL_REPLY);
}
