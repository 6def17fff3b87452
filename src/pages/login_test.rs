use super::*;

#[test]
fn validate_login_input_trims_username() {
    assert_eq!(
        validate_login_input("  alice  ", "secret"),
        Ok(Credentials { username: "alice".to_owned(), password: "secret".to_owned() })
    );
}

#[test]
fn validate_login_input_keeps_password_whitespace() {
    let creds = validate_login_input("alice", " pw ").unwrap();
    assert_eq!(creds.password, " pw ");
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "secret"), Err("请输入用户名和密码"));
    assert_eq!(validate_login_input("alice", ""), Err("请输入用户名和密码"));
}
