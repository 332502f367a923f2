use super::*;
use std::io::Write as _;

#[test]
fn check_not_running_ok_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    let sock_path = dir.path().join("ts_manager_sock");
    assert!(check_not_running(&sock_path).is_ok());
}

#[test]
fn check_not_running_fails_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let sock_path = dir.path().join("ts_manager_sock");
    std::fs::write(&sock_path, b"").unwrap();
    assert!(matches!(
        check_not_running(&sock_path),
        Err(SupervisorError::AlreadyRunning(_))
    ));
}

#[test]
fn open_log_sink_truncates_existing_contents() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("ts_manager_log.txt");
    std::fs::write(&log_path, b"stale contents").unwrap();

    let mut file = open_log_sink(&log_path).unwrap();
    file.write_all(b"fresh").unwrap();
    drop(file);

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(contents, "fresh");
}
