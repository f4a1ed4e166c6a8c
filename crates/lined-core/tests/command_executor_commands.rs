use lined_core::{
    Command, CommandExecutor, CommandResult, CursorCommand, EditCommand, Line, Motion,
    Selection,
};
use pretty_assertions::assert_eq;

fn move_to(executor: &mut CommandExecutor, motion: Motion, extend: bool) {
    executor
        .execute(Command::Cursor(CursorCommand::Move { motion, extend }))
        .unwrap();
}

fn move_right(executor: &mut CommandExecutor, count: usize, extend: bool) {
    for _ in 0..count {
        move_to(executor, Motion::CharRight, extend);
    }
}

#[test]
fn test_delete_selection_collapses_cursor_and_rebuilds_lines() {
    let mut executor = CommandExecutor::new(b"abcdef").unwrap();
    move_right(&mut executor, 2, false);
    move_right(&mut executor, 3, true);
    assert_eq!(executor.editor().selection(), Some(Selection::new(2, 5)));

    let result = executor
        .execute(Command::Edit(EditCommand::DeleteSelection))
        .unwrap();

    assert_eq!(result, CommandResult::Success);
    let editor = executor.editor();
    assert_eq!(editor.text(), b"abf");
    assert_eq!(editor.cursor().offset(), 2);
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.line_index().lines(), &[Line::new(0, 3)]);
}

#[test]
fn test_backward_selection_deletes_same_range() {
    let mut executor = CommandExecutor::new(b"abcdef").unwrap();
    move_right(&mut executor, 5, false);
    for _ in 0..3 {
        move_to(&mut executor, Motion::CharLeft, true);
    }
    assert_eq!(executor.editor().selection(), Some(Selection::new(5, 2)));

    executor
        .execute(Command::Edit(EditCommand::Backspace))
        .unwrap();
    assert_eq!(executor.editor().text(), b"abf");
    assert_eq!(executor.editor().cursor().offset(), 2);
}

#[test]
fn test_delete_forward_with_selection_deletes_only_selection() {
    let mut executor = CommandExecutor::new(b"one two").unwrap();
    move_to(&mut executor, Motion::WordRight, true);
    executor
        .execute(Command::Edit(EditCommand::DeleteForward))
        .unwrap();
    assert_eq!(executor.editor().text(), b"two");
}

#[test]
fn test_insert_then_delete_is_identity() {
    let original = b"first line\nsecond line\n".to_vec();
    let mut executor = CommandExecutor::new(&original).unwrap();
    move_to(&mut executor, Motion::LineDown, false);
    move_right(&mut executor, 3, false);

    executor
        .execute(Command::Edit(EditCommand::InsertText(b"XYZ\n".to_vec())))
        .unwrap();
    assert_eq!(executor.editor().line_count(), 4);

    for _ in 0..4 {
        executor
            .execute(Command::Edit(EditCommand::Backspace))
            .unwrap();
    }
    assert_eq!(executor.editor().text(), original.as_slice());
    assert_eq!(executor.editor().line_count(), 3);
    assert_eq!(executor.editor().cursor().offset(), 14);
}

#[test]
fn test_newline_splits_line_and_moves_to_next_row() {
    let mut executor = CommandExecutor::new(b"hello world").unwrap();
    move_right(&mut executor, 5, false);
    executor
        .execute(Command::Edit(EditCommand::InsertNewline))
        .unwrap();

    let editor = executor.editor();
    assert_eq!(editor.text(), b"hello\n world");
    assert_eq!(editor.line_bytes(0), Some(&b"hello"[..]));
    assert_eq!(editor.line_bytes(1), Some(&b" world"[..]));
    assert_eq!((editor.cursor().row(), editor.cursor().col()), (1, 0));
}

#[test]
fn test_tab_inserts_four_spaces_by_default() {
    let mut executor = CommandExecutor::empty();
    executor
        .execute(Command::Edit(EditCommand::InsertTab))
        .unwrap();
    assert_eq!(executor.editor().text(), b"    ");
    assert_eq!(executor.editor().cursor().col(), 4);
}

#[test]
fn test_select_all_then_type_replaces_document() {
    let mut executor = CommandExecutor::new(b"ab\ncd").unwrap();
    executor
        .execute(Command::Cursor(CursorCommand::SelectAll))
        .unwrap();
    assert_eq!(
        executor.editor().selection().map(|s| s.normalize()),
        Some((0, 5))
    );
    assert_eq!(executor.editor().cursor().offset(), 5);

    executor
        .execute(Command::Edit(EditCommand::InsertChar(b'z')))
        .unwrap();
    assert_eq!(executor.editor().text(), b"z");
    assert_eq!(executor.editor().line_count(), 1);
}

#[test]
fn test_select_all_on_empty_document() {
    let mut executor = CommandExecutor::empty();
    executor
        .execute(Command::Cursor(CursorCommand::SelectAll))
        .unwrap();
    assert_eq!(executor.editor().selected_bytes(), None);
    let result = executor
        .execute(Command::Edit(EditCommand::DeleteSelection))
        .unwrap();
    assert_eq!(result, CommandResult::NotPerformed);
}

#[test]
fn test_goto_line_bounds() {
    let mut executor = CommandExecutor::new(b"a\nb\nc").unwrap();
    move_to(&mut executor, Motion::DocumentEnd, false);

    let result = executor
        .execute(Command::Cursor(CursorCommand::GotoLine { line: 1 }))
        .unwrap();
    assert_eq!(result, CommandResult::Success);
    assert_eq!(executor.editor().cursor().offset(), 0);

    for line in [0, 4] {
        let result = executor
            .execute(Command::Cursor(CursorCommand::GotoLine { line }))
            .unwrap();
        assert_eq!(result, CommandResult::NotPerformed);
        assert_eq!(executor.editor().cursor().offset(), 0);
    }

    executor
        .execute(Command::Cursor(CursorCommand::GotoLineOrEnd { line: 3 }))
        .unwrap();
    assert_eq!(executor.editor().cursor().offset(), 5);
}

#[test]
fn test_version_tracks_buffer_changes_only() {
    let mut executor = CommandExecutor::new(b"abc").unwrap();
    move_to(&mut executor, Motion::LineEnd, false);
    assert_eq!(executor.version(), 0);
    assert!(!executor.editor().is_modified());

    executor
        .execute(Command::Edit(EditCommand::Backspace))
        .unwrap();
    assert_eq!(executor.version(), 1);
    assert!(executor.editor().is_modified());

    executor.mark_saved();
    assert!(!executor.editor().is_modified());
}

#[test]
fn test_execute_batch_reports_noops() {
    let mut executor = CommandExecutor::empty();
    let results = executor
        .execute_batch([
            Command::Edit(EditCommand::Backspace),
            Command::Edit(EditCommand::DeleteForward),
            Command::Edit(EditCommand::InsertChar(b'a')),
        ])
        .unwrap();
    assert_eq!(
        results,
        vec![
            CommandResult::NotPerformed,
            CommandResult::NotPerformed,
            CommandResult::Success
        ]
    );
}
