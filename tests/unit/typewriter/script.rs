use super::*;

#[test]
fn default_script_is_the_welcome_message() {
    let s = Script::default();
    assert_eq!(s.len(), 3);
    assert_eq!(s.full_text(), "Hello,\nWelcome to\nDOOFIO.SITE");
    assert_eq!(s.line_chars(1), 10);
    assert_eq!(s.char_at(2, 6), Some('.'));
    assert_eq!(s.char_at(2, 11), None);
    assert_eq!(s.char_at(3, 0), None);
}

#[test]
fn counts_chars_not_bytes() {
    let s = Script::new(["héllo", "✓"]).unwrap();
    assert_eq!(s.line_chars(0), 5);
    assert_eq!(s.char_at(0, 1), Some('é'));
    assert_eq!(s.char_at(1, 0), Some('✓'));
}

#[test]
fn rejects_empty_scripts_and_embedded_breaks() {
    assert!(Script::new(Vec::<String>::new()).is_err());
    assert!(Script::new(["a\nb"]).is_err());
}

#[test]
fn prefix_check_follows_separators() {
    let s = Script::default();
    assert!(s.is_revealed_prefix(""));
    assert!(s.is_revealed_prefix("Hello,\nWel"));
    assert!(!s.is_revealed_prefix("Hello,Wel"));
}

#[test]
fn serializes_as_a_plain_list() {
    let s: Script = serde_json::from_str(r#"["a", "b"]"#).unwrap();
    assert_eq!(s.lines(), &["a".to_owned(), "b".to_owned()]);
    assert_eq!(serde_json::to_string(&s).unwrap(), r#"["a","b"]"#);
}
