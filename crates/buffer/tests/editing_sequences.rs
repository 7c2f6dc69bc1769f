// Chunk: docs/chunks/edit_session - Caret, selection and editing over a gap buffer

//! Integration tests for realistic editing sequences.
//!
//! These tests verify that the caret, the gap buffer and the line-count
//! cache stay consistent through mixed editing patterns.

use gapline_buffer::{coords, Caret, DirtyLines, TextEditSession};

fn type_text(session: &mut TextEditSession, text: &str) {
    for ch in text.chars() {
        let mut utf8 = [0u8; 4];
        session.insert_at_caret(ch.encode_utf8(&mut utf8)).unwrap();
    }
}

#[test]
fn test_type_word_then_delete_entirely() {
    let mut s = TextEditSession::new();

    type_text(&mut s, "hello");
    assert_eq!(s.text(), "hello");
    assert_eq!(s.caret(), Caret::new(0, 5));

    for _ in 0..5 {
        s.backspace();
    }
    assert!(s.buffer().is_empty());
    assert_eq!(s.caret(), Caret::new(0, 0));
    assert_eq!(s.backspace(), DirtyLines::None);
}

#[test]
fn test_type_multiple_lines_and_navigate() {
    let mut s = TextEditSession::new();

    s.insert_at_caret("first line").unwrap();
    s.insert_newline_with_indent().unwrap();
    s.insert_at_caret("second line").unwrap();
    s.insert_newline_with_indent().unwrap();
    s.insert_at_caret("third line").unwrap();

    assert_eq!(s.total_lines(), 3);
    assert_eq!(s.line_text(0), "first line");
    assert_eq!(s.line_text(1), "second line");
    assert_eq!(s.line_text(2), "third line");

    s.set_caret(Caret::new(1, 7));
    s.insert_at_caret("awesome ").unwrap();
    assert_eq!(s.line_text(1), "second awesome line");

    s.move_up(false);
    assert_eq!(s.caret().line, 0);
    s.move_down(false);
    s.move_down(false);
    assert_eq!(s.caret().line, 2);
}

#[test]
fn test_split_and_rejoin_lines() {
    let mut s = TextEditSession::from_str("helloworld");

    s.set_caret(Caret::new(0, 5));
    s.insert_newline_with_indent().unwrap();
    assert_eq!(s.total_lines(), 2);
    assert_eq!(s.text(), "hello\nworld");

    s.backspace();
    assert_eq!(s.total_lines(), 1);
    assert_eq!(s.text(), "helloworld");
    assert_eq!(s.caret(), Caret::new(0, 5));
}

#[test]
fn test_rapid_insert_delete_cycles() {
    let mut s = TextEditSession::new();

    type_text(&mut s, "teh");
    for _ in 0..3 {
        s.backspace();
    }
    type_text(&mut s, "the quikc");
    s.backspace();
    s.backspace();
    type_text(&mut s, "ck brown fox");

    assert_eq!(s.text(), "the quick brown fox");
}

#[test]
fn test_indented_block_typing() {
    let mut s = TextEditSession::new();
    s.insert_at_caret("fn main() {").unwrap();
    s.insert_newline_with_indent().unwrap();
    s.insert_tab().unwrap();
    s.insert_at_caret("let x = 1;").unwrap();
    s.insert_newline_with_indent().unwrap();
    s.insert_at_caret("let y = 2;").unwrap();

    assert_eq!(s.text(), "fn main() {\n    let x = 1;\n    let y = 2;");
    assert_eq!(s.caret(), Caret::new(2, 14));
}

#[test]
fn test_multiline_deletion_with_delete_forward() {
    let mut s = TextEditSession::from_str("line1\nline2\nline3\nline4");
    s.set_caret(Caret::new(1, 0));

    for _ in 0..6 {
        s.delete_forward();
    }

    assert_eq!(s.total_lines(), 3);
    assert_eq!(s.line_text(1), "line3");
    assert_eq!(s.caret(), Caret::new(1, 0));
}

#[test]
fn test_select_with_shift_movement_then_paste() {
    let mut s = TextEditSession::from_str("alpha\nbeta\ngamma");
    s.set_caret(Caret::new(0, 2));
    s.move_down(true);
    s.move_down(true);
    assert_eq!(s.selected_text().as_deref(), Some("pha\nbeta\nga"));

    let dirty = s.paste("X\r\nY").unwrap();
    assert_eq!(dirty, DirtyLines::FromLineToEnd(0));
    assert_eq!(s.text(), "alX\nYmma");
    assert_eq!(s.caret(), Caret::new(1, 1));
}

#[test]
fn test_dirty_lines_merge_across_a_burst() {
    let mut s = TextEditSession::from_str("a\nb\nc");
    s.set_caret(Caret::new(2, 1));

    let mut dirty = DirtyLines::None;
    dirty.merge(s.insert_at_caret("!").unwrap());
    s.goto_line(1);
    dirty.merge(s.insert_at_caret(">").unwrap());
    assert_eq!(dirty, DirtyLines::FromLineToEnd(0));
}

#[test]
fn test_caret_and_index_agree_after_every_edit() {
    let mut s = TextEditSession::from_str("one\ntwo\nthree");
    let steps: Vec<Box<dyn Fn(&mut TextEditSession)>> = vec![
        Box::new(|s: &mut TextEditSession| s.set_caret(Caret::new(1, 1))),
        Box::new(|s: &mut TextEditSession| {
            s.insert_at_caret("XX\nY").unwrap();
        }),
        Box::new(|s: &mut TextEditSession| {
            s.backspace();
        }),
        Box::new(|s: &mut TextEditSession| {
            s.insert_newline_with_indent().unwrap();
        }),
        Box::new(|s: &mut TextEditSession| s.move_to_buffer_end(false)),
        Box::new(|s: &mut TextEditSession| {
            s.delete_forward();
        }),
        Box::new(|s: &mut TextEditSession| {
            s.backspace();
        }),
    ];

    for step in steps {
        step(&mut s);
        let idx = s.caret_index();
        assert_eq!(coords::index_to_linecol(s.buffer(), idx), s.caret());
        assert!(s.buffer().gap_start() <= s.buffer().gap_end());
        assert_eq!(s.total_lines(), coords::total_lines(s.buffer()));
    }
}
