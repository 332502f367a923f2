use super::*;

#[test]
fn orders_files_oldest_first() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["ts3server_2023-01-02__00_00_00_1.log", "ts3server_2023-01-01__00_00_00_1.log"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    let files = scan_dir(dir.path()).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].path.ends_with("ts3server_2023-01-01__00_00_00_1.log"));
    assert!(files[1].path.ends_with("ts3server_2023-01-02__00_00_00_1.log"));
    assert!(files[0].created_at < files[1].created_at);
}

#[test]
fn ignores_files_without_the_log_suffix() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ts3server_2023-01-01__00_00_00_2.log"), b"").unwrap();
    fs::write(dir.path().join("readme.txt"), b"").unwrap();

    let files = scan_dir(dir.path()).unwrap();
    assert!(files.is_empty());
}

#[test]
fn skips_unparseable_filenames_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("garbage_1.log"), b"").unwrap();
    fs::write(dir.path().join("ts3server_2023-01-01__00_00_00_1.log"), b"").unwrap();

    let files = scan_dir(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
}
