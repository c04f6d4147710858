mod support;
use support::editor::Editor;

#[test]
fn test_yy_then_p_pastes_line_below() {
    let mut ed = Editor::new("|one\ntwo");
    ed.keys("yy");
    assert_eq!(ed.clipboard().as_deref(), Some("one\n"));
    ed.keys("p");
    assert_eq!(ed.render(), "one\n|one\ntwo");
}

#[test]
fn test_yy_then_shift_p_pastes_line_above() {
    let mut ed = Editor::new("one\n|two");
    ed.keys("yyP");
    assert_eq!(ed.render(), "one\n|two\ntwo");
}

#[test]
fn test_yank_keeps_cursor() {
    let mut ed = Editor::new("on|e\ntwo");
    ed.keys("yy");
    assert_eq!(ed.cursor(), 2);
    assert_eq!(ed.text(), "one\ntwo");
}

#[test]
fn test_yank_last_line_is_still_linewise() {
    let mut ed = Editor::new("one\n|two");
    ed.keys("yy");
    assert_eq!(ed.clipboard().as_deref(), Some("two\n"));
    ed.keys("p");
    assert_eq!(ed.text(), "one\ntwo\ntwo");
}

#[test]
fn test_yank_word_and_paste_charwise() {
    let mut ed = Editor::new("|foo bar");
    ed.keys("yw");
    assert_eq!(ed.clipboard().as_deref(), Some("foo "));
    assert_eq!(ed.cursor(), 0);

    ed.keys("P");
    assert_eq!(ed.render(), "foo| foo bar");
}

#[test]
fn test_charwise_paste_after_cursor() {
    let mut ed = Editor::new("|foo bar");
    ed.keys("yw");
    ed.keys("p");
    assert_eq!(ed.render(), "ffoo| oo bar");
}

#[test]
fn test_yank_to_line_end() {
    let mut ed = Editor::new("|abc\ndef");
    ed.keys("y$");
    assert_eq!(ed.clipboard().as_deref(), Some("abc"));
    assert_eq!(ed.cursor(), 0);
}

#[test]
fn test_count_paste_repeats() {
    let mut ed = Editor::new("|a");
    ed.set_clipboard("x");
    ed.keys("2p");
    assert_eq!(ed.render(), "ax|x");

    let mut ed = Editor::new("|a");
    ed.keys("yy3p");
    assert_eq!(ed.text(), "a\na\na\na");
    ed.keys("u");
    assert_eq!(ed.text(), "a");
}

#[test]
fn test_paste_with_empty_clipboard_does_nothing() {
    let mut ed = Editor::new("|abc");
    ed.keys("pP");
    assert_eq!(ed.render(), "|abc");
}

#[test]
fn test_delete_then_paste_moves_line() {
    let mut ed = Editor::new("|one\ntwo");
    ed.keys("ddp");
    assert_eq!(ed.render(), "two\n|one");
}

#[test]
fn test_linewise_paste_lands_on_first_non_blank() {
    let mut ed = Editor::new("|a");
    ed.set_clipboard("    indented\n");
    ed.keys("p");
    assert_eq!(ed.render(), "a\n    |indented");
}

#[test]
fn test_paste_is_one_undo_step() {
    let mut ed = Editor::new("|a\nb");
    ed.keys("yyp");
    assert_eq!(ed.text(), "a\na\nb");
    ed.keys("u");
    assert_eq!(ed.text(), "a\nb");
}

#[test]
fn test_yank_with_non_motion_keeps_clipboard() {
    let mut ed = Editor::new("|abc");
    ed.set_clipboard("kept");
    ed.keys("yi");
    assert_eq!(ed.clipboard().as_deref(), Some("kept"));
    assert_eq!(ed.cursor(), 0);
}
