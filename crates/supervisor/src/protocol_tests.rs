use super::*;

#[test]
fn parses_stop() {
    assert_eq!(parse("stop"), Command::Stop);
}

#[test]
fn parses_restart_with_args() {
    assert_eq!(
        parse("restart ts_bot ts_webserver"),
        Command::Restart(vec!["ts_bot".to_string(), "ts_webserver".to_string()])
    );
}

#[test]
fn parses_disable_no_args() {
    assert_eq!(parse("disable"), Command::Disable(vec![]));
}

#[test]
fn unknown_verb() {
    assert_eq!(parse("frobnicate"), Command::Unknown);
}

#[test]
fn empty_payload_is_unknown() {
    assert_eq!(parse(""), Command::Unknown);
}

#[test]
fn encode_request_frames_length_prefix() {
    let frame = encode_request("stop");
    assert_eq!(&frame[0..4], &4u32.to_be_bytes());
    assert_eq!(&frame[4..], b"stop");
}

#[test]
fn encode_request_quit_is_sentinel() {
    let frame = encode_request("quit");
    assert_eq!(frame, CLOSE_SENTINEL.to_be_bytes().to_vec());
}

#[tokio::test]
async fn read_frame_roundtrips() {
    let frame = encode_request("restart ts_bot");
    let mut cursor = std::io::Cursor::new(frame);
    let payload = read_frame(&mut cursor).await.unwrap().unwrap();
    assert_eq!(payload, "restart ts_bot");
}

#[tokio::test]
async fn read_frame_sentinel_closes() {
    let frame = encode_request("quit");
    let mut cursor = std::io::Cursor::new(frame);
    let payload = read_frame(&mut cursor).await.unwrap();
    assert!(payload.is_none());
}

#[tokio::test]
async fn read_frame_oversized_length_closes() {
    let mut buf = Vec::new();
    buf.extend_from_slice(&(MAX_PAYLOAD_LEN as u32 + 1).to_be_bytes());
    let mut cursor = std::io::Cursor::new(buf);
    let payload = read_frame(&mut cursor).await.unwrap();
    assert!(payload.is_none());
}

#[tokio::test]
async fn read_frame_eof_on_header_closes() {
    let mut cursor = std::io::Cursor::new(Vec::<u8>::new());
    let payload = read_frame(&mut cursor).await.unwrap();
    assert!(payload.is_none());
}
