use super::*;

#[test]
fn parse_event_id_accepts_digits() {
    assert_eq!(parse_event_id("42"), Ok(42));
    assert_eq!(parse_event_id(" 7 "), Ok(7));
}

#[test]
fn parse_event_id_rejects_garbage() {
    let err = parse_event_id("abc").unwrap_err();
    assert_eq!(err.message(), "无效的事件编号: abc");
}
