use vim_core::{Engine, EngineConfig, Mode};

mod support;
use support::editor::Editor;

fn editor_with_config(config: EngineConfig, text: &str) -> Editor {
    Editor::with_engine(Engine::builder().config(config).build(), text)
}

#[test]
fn test_dd_deletes_line() {
    let mut ed = Editor::new("one\n|two\nthree");
    ed.keys("dd");
    assert_eq!(ed.render(), "one\n|three");
    assert_eq!(ed.clipboard().as_deref(), Some("two\n"));
}

#[test]
fn test_count_dd_deletes_multiple_lines() {
    let mut ed = Editor::new("|one\ntwo\nthree");
    ed.keys("2dd");
    assert_eq!(ed.text(), "three");
    assert_eq!(ed.clipboard().as_deref(), Some("one\ntwo\n"));
}

#[test]
fn test_dd_on_last_line_takes_preceding_newline() {
    let mut ed = Editor::new("one\ntwo\n|three");
    ed.keys("dd");
    assert_eq!(ed.render(), "one\n|two");
    assert_eq!(ed.clipboard().as_deref(), Some("three\n"));
}

#[test]
fn test_dd_on_only_line_empties_buffer() {
    let mut ed = Editor::new("|  only");
    ed.keys("dd");
    assert_eq!(ed.text(), "");
    assert_eq!(ed.clipboard().as_deref(), Some("  only\n"));
}

#[test]
fn test_dw_deletes_word() {
    let mut ed = Editor::new("|foo bar");
    ed.keys("dw");
    assert_eq!(ed.render(), "|bar");
    assert_eq!(ed.clipboard().as_deref(), Some("foo "));
}

#[test]
fn test_dw_on_last_word() {
    let mut ed = Editor::new("foo |bar");
    ed.keys("dw");
    assert_eq!(ed.render(), "foo| ");
    assert_eq!(ed.clipboard().as_deref(), Some("bar"));
}

#[test]
fn test_count_before_or_after_operator() {
    let mut ed = Editor::new("|a b c d");
    ed.keys("2dw");
    assert_eq!(ed.text(), "c d");

    let mut ed = Editor::new("|a b c d");
    ed.keys("d2w");
    assert_eq!(ed.text(), "c d");
}

#[test]
fn test_de_includes_last_character() {
    let mut ed = Editor::new("|foo bar");
    ed.keys("de");
    assert_eq!(ed.text(), " bar");
    assert_eq!(ed.clipboard().as_deref(), Some("foo"));
}

#[test]
fn test_d_paragraph_is_linewise() {
    let mut ed = Editor::new("|a\nb\n\nc");
    ed.keys("d}");
    assert_eq!(ed.text(), "\nc");
    assert_eq!(ed.clipboard().as_deref(), Some("a\nb\n"));
}

#[test]
fn test_dj_and_dk_delete_lines() {
    let mut ed = Editor::new("|a\nb\nc");
    ed.keys("dj");
    assert_eq!(ed.text(), "c");
    assert_eq!(ed.clipboard().as_deref(), Some("a\nb\n"));

    let mut ed = Editor::new("a\n|b\nc");
    ed.keys("dk");
    assert_eq!(ed.text(), "c");
}

#[test]
fn test_linewise_motion_to_last_line_takes_preceding_newline() {
    let mut ed = Editor::new("a\n|b\nc");
    ed.keys("dj");
    assert_eq!(ed.render(), "|a");
    assert_eq!(ed.clipboard().as_deref(), Some("b\nc\n"));

    let mut ed = Editor::new("a\n|b\nc");
    ed.keys("dG");
    assert_eq!(ed.text(), "a");
    assert_eq!(ed.clipboard().as_deref(), Some("b\nc\n"));

    let mut ed = Editor::new("a\n|\nc");
    ed.keys("dj");
    assert_eq!(ed.text(), "a");
    assert_eq!(ed.clipboard().as_deref(), Some("\nc\n"));
}

#[test]
fn test_linewise_motion_to_buffer_end_with_trailing_newline() {
    let mut ed = Editor::new("a\n|b\nc\n");
    ed.keys("dj");
    assert_eq!(ed.text(), "a\n");
}

#[test]
fn test_d_with_non_motion_does_nothing() {
    let mut ed = Editor::new("|abc");
    ed.keys("di");
    assert_eq!(ed.text(), "abc");
    assert_eq!(ed.mode(), Mode::Normal);
    assert_eq!(ed.clipboard(), None);
}

#[test]
fn test_x_deletes_characters() {
    let mut ed = Editor::new("|abc");
    ed.keys("x");
    assert_eq!(ed.text(), "bc");
    assert_eq!(ed.clipboard().as_deref(), Some("a"));

    let mut ed = Editor::new("|abcd");
    ed.keys("3x");
    assert_eq!(ed.text(), "d");
}

#[test]
fn test_x_count_stops_at_line_end() {
    let mut ed = Editor::new("a|bc\ndef");
    ed.keys("9x");
    assert_eq!(ed.render(), "|a\ndef");
}

#[test]
fn test_x_on_empty_line_does_nothing() {
    let mut ed = Editor::new("a\n|\nb");
    ed.keys("x");
    assert_eq!(ed.text(), "a\n\nb");
}

#[test]
fn test_shift_d_deletes_to_line_end() {
    let mut ed = Editor::new("hello| world\nnext");
    ed.keys("D");
    assert_eq!(ed.render(), "hell|o\nnext");
    assert_eq!(ed.clipboard().as_deref(), Some(" world"));
}

#[test]
fn test_shift_c_changes_to_line_end() {
    let mut ed = Editor::new("hello| world");
    ed.keys("C");
    assert_eq!(ed.render(), "hello|");
    assert_eq!(ed.mode(), Mode::Insert);
}

#[test]
fn test_cw_changes_to_word_end() {
    let mut ed = Editor::new("|foo bar");
    ed.keys("cw");
    assert_eq!(ed.render(), "| bar");
    assert_eq!(ed.mode(), Mode::Insert);

    ed.type_text("baz");
    ed.keys("<Esc>");
    assert_eq!(ed.render(), "ba|z bar");
    assert_eq!(ed.mode(), Mode::Normal);
}

#[test]
fn test_cc_keeps_indent() {
    let mut ed = Editor::new("  |foo\nbar");
    ed.keys("cc");
    assert_eq!(ed.render(), "  |\nbar");
    assert_eq!(ed.mode(), Mode::Insert);
    assert_eq!(ed.clipboard().as_deref(), Some("  foo\n"));
}

#[test]
fn test_cc_without_auto_indent_clears_line() {
    let config = EngineConfig {
        auto_indent: false,
        ..EngineConfig::default()
    };
    let mut ed = editor_with_config(config, "  |foo\nbar");
    ed.keys("cc");
    assert_eq!(ed.render(), "|\nbar");
}

#[test]
fn test_linewise_change_to_last_line_leaves_line_to_type_into() {
    let mut ed = Editor::new("a\n|b\nc");
    ed.keys("cj");
    assert_eq!(ed.render(), "a\n|");
    assert_eq!(ed.mode(), Mode::Insert);
    assert_eq!(ed.clipboard().as_deref(), Some("b\nc\n"));
}

#[test]
fn test_cd_is_not_a_change() {
    let mut ed = Editor::new("|foo\nbar");
    ed.keys("cd");
    assert_eq!(ed.text(), "foo\nbar");
    assert_eq!(ed.mode(), Mode::Normal);
}

#[test]
fn test_s_substitutes_character() {
    let mut ed = Editor::new("|abc");
    ed.keys("s");
    assert_eq!(ed.render(), "|bc");
    assert_eq!(ed.mode(), Mode::Insert);
}

#[test]
fn test_join_lines() {
    let mut ed = Editor::new("|foo\n  bar\nbaz");
    ed.keys("J");
    assert_eq!(ed.render(), "foo| bar\nbaz");

    let mut ed = Editor::new("|foo\n  bar\nbaz");
    ed.keys("3J");
    assert_eq!(ed.render(), "foo bar| baz");
}

#[test]
fn test_join_before_closing_paren_adds_no_space() {
    let mut ed = Editor::new("|f(\n)");
    ed.keys("J");
    assert_eq!(ed.text(), "f()");
}

#[test]
fn test_join_on_last_line_does_nothing() {
    let mut ed = Editor::new("a\n|b");
    ed.keys("J");
    assert_eq!(ed.text(), "a\nb");
}

#[test]
fn test_toggle_case() {
    let mut ed = Editor::new("|abc");
    ed.keys("~");
    assert_eq!(ed.render(), "A|bc");

    let mut ed = Editor::new("|aBc");
    ed.keys("3~");
    assert_eq!(ed.render(), "Ab|C");
}

#[test]
fn test_replace_characters() {
    let mut ed = Editor::new("|abc");
    ed.keys("rx");
    assert_eq!(ed.render(), "|xbc");

    let mut ed = Editor::new("|abc");
    ed.keys("2rx");
    assert_eq!(ed.render(), "x|xc");
}

#[test]
fn test_replace_count_past_line_end_fails() {
    let mut ed = Editor::new("|abc\ndef");
    ed.keys("5rx");
    assert_eq!(ed.text(), "abc\ndef");
}

#[test]
fn test_indent_and_unindent() {
    let mut ed = Editor::new("|foo\nbar");
    ed.keys(">");
    assert_eq!(ed.render(), "    |foo\nbar");
    ed.keys("<");
    assert_eq!(ed.render(), "|foo\nbar");
}

#[test]
fn test_indent_count_skips_empty_lines() {
    let mut ed = Editor::new("|a\n\nb");
    ed.keys("3>");
    assert_eq!(ed.text(), "    a\n\n    b");
}

#[test]
fn test_indent_follows_shiftwidth_and_expandtab() {
    let config = EngineConfig {
        shift_width: 2,
        ..EngineConfig::default()
    };
    let mut ed = editor_with_config(config, "|foo");
    ed.keys(">");
    assert_eq!(ed.text(), "  foo");

    let config = EngineConfig {
        expand_tab: false,
        ..EngineConfig::default()
    };
    let mut ed = editor_with_config(config, "|foo");
    ed.keys(">");
    assert_eq!(ed.text(), "\tfoo");
    ed.keys("<");
    assert_eq!(ed.text(), "foo");
}

#[test]
fn test_unindent_removes_partial_indent() {
    let mut ed = Editor::new("  |foo");
    ed.keys("<");
    assert_eq!(ed.text(), "foo");
}

#[test]
fn test_visual_delete() {
    let mut ed = Editor::new("|hello world");
    ed.keys("v");
    assert_eq!(ed.selected(), "h");
    ed.keys("e");
    assert_eq!(ed.selected(), "hello");
    ed.keys("d");
    assert_eq!(ed.render(), "| world");
    assert_eq!(ed.clipboard().as_deref(), Some("hello"));
    assert!(!ed.engine.snapshot().has_anchor);
}

#[test]
fn test_visual_yank_collapses_to_start() {
    let mut ed = Editor::new("|hello");
    ed.keys("vll");
    assert_eq!(ed.selected(), "hel");
    ed.keys("y");
    assert_eq!(ed.clipboard().as_deref(), Some("hel"));
    assert_eq!(ed.text(), "hello");
    assert_eq!(ed.selected(), "");
    assert_eq!(ed.cursor(), 0);
}

#[test]
fn test_visual_selection_keeps_anchor_when_reversing() {
    let mut ed = Editor::new("ab|cde");
    ed.keys("vl");
    assert_eq!(ed.selected(), "cd");
    ed.keys("hh");
    assert_eq!(ed.selected(), "bc");
}

#[test]
fn test_visual_shrinking_forward_keeps_anchor() {
    let mut ed = Editor::new("|a}a");
    ed.keys("vwl");
    let (begin, end) = ed.buf.selection();
    assert!(begin == 0 && end >= 1, "selection ({begin}, {end}) lost the start");
}

#[test]
fn test_visual_line_delete_to_last_line() {
    let mut ed = Editor::new("a\n|b\nc");
    ed.keys("Vjd");
    assert_eq!(ed.render(), "|a");
    assert_eq!(ed.clipboard().as_deref(), Some("b\nc\n"));
}

#[test]
fn test_visual_line_delete() {
    let mut ed = Editor::new("|a\nb\nc");
    ed.keys("V");
    assert_eq!(ed.selected(), "a\n");
    ed.keys("j");
    assert_eq!(ed.selected(), "a\nb\n");
    ed.keys("d");
    assert_eq!(ed.text(), "c");
    assert_eq!(ed.clipboard().as_deref(), Some("a\nb\n"));
}

#[test]
fn test_visual_line_on_last_line_selects_preceding_newline() {
    let mut ed = Editor::new("a\n|b");
    ed.keys("V");
    assert_eq!(ed.selected(), "\nb");
    ed.keys("y");
    assert_eq!(ed.clipboard().as_deref(), Some("b\n"));
}

#[test]
fn test_visual_change() {
    let mut ed = Editor::new("|foo bar");
    ed.keys("vec");
    assert_eq!(ed.render(), "| bar");
    assert_eq!(ed.mode(), Mode::Insert);
}

#[test]
fn test_visual_x() {
    let mut ed = Editor::new("|abc");
    ed.keys("vlx");
    assert_eq!(ed.text(), "c");
}

#[test]
fn test_visual_case_commands() {
    let mut ed = Editor::new("|abc def");
    ed.keys("vegU");
    assert_eq!(ed.render(), "|ABC def");

    let mut ed = Editor::new("|ABC");
    ed.keys("vlgu");
    assert_eq!(ed.text(), "abC");

    let mut ed = Editor::new("|abc");
    ed.keys("vl~");
    assert_eq!(ed.text(), "ABc");
    assert_eq!(ed.selected(), "");
}

#[test]
fn test_case_g_commands_need_selection() {
    let mut ed = Editor::new("|abc");
    ed.keys("gU");
    assert_eq!(ed.text(), "abc");
}

#[test]
fn test_visual_replace() {
    let mut ed = Editor::new("|abc");
    ed.keys("vlrx");
    assert_eq!(ed.render(), "|xxc");
    assert_eq!(ed.selected(), "");
}

#[test]
fn test_visual_line_indent() {
    let mut ed = Editor::new("|a\nb\nc");
    ed.keys("Vj>");
    assert_eq!(ed.render(), "    |a\n    b\nc");
    assert_eq!(ed.selected(), "");
}

#[test]
fn test_escape_clears_selection() {
    let mut ed = Editor::new("|abc");
    ed.keys("vl<Esc>");
    assert_eq!(ed.selected(), "");
    assert!(!ed.engine.snapshot().has_anchor);
}

#[test]
fn test_increment_and_decrement() {
    let mut ed = Editor::new("x = |41;");
    ed.keys("<C-a>");
    assert_eq!(ed.render(), "x = 4|2;");

    let mut ed = Editor::new("n |-1");
    ed.keys("<C-x>");
    assert_eq!(ed.render(), "n -|2");

    let mut ed = Editor::new("n -|1");
    ed.keys("<C-a>");
    assert_eq!(ed.render(), "n |0");
}

#[test]
fn test_increment_without_number_does_nothing() {
    let mut ed = Editor::new("|abc");
    ed.keys("<C-a>");
    assert_eq!(ed.text(), "abc");
}

#[test]
fn test_undo_and_redo() {
    let mut ed = Editor::new("|abc");
    ed.keys("x");
    assert_eq!(ed.text(), "bc");
    ed.keys("u");
    assert_eq!(ed.text(), "abc");
    ed.keys("<C-r>");
    assert_eq!(ed.text(), "bc");
}

#[test]
fn test_counted_delete_is_one_undo_step() {
    let mut ed = Editor::new("|one\ntwo\nthree");
    ed.keys("2dd");
    ed.keys("u");
    assert_eq!(ed.text(), "one\ntwo\nthree");
}

#[test]
fn test_insert_session_is_one_undo_step() {
    let mut ed = Editor::new("|abc");
    ed.keys("i");
    ed.type_text("xy");
    ed.keys("<Esc>");
    assert_eq!(ed.text(), "xyabc");
    ed.keys("u");
    assert_eq!(ed.text(), "abc");
}

#[test]
fn test_undo_with_empty_history_does_nothing() {
    let mut ed = Editor::new("|abc");
    ed.keys("u<C-r>");
    assert_eq!(ed.text(), "abc");
}
