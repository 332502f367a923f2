use super::*;
use std::path::Path;

#[test]
fn joins_regardless_of_trailing_separator() {
    let with_slash = join(Path::new("/var/log/"), "ts3server_1.log");
    let without_slash = join(Path::new("/var/log"), "ts3server_1.log");
    assert_eq!(with_slash, without_slash);
    assert_eq!(with_slash, Path::new("/var/log/ts3server_1.log"));
}
