//! Command interface example
//!
//! Demonstrates how to use `CommandExecutor` to drive the editor.

use lined_core::{
    Command, CommandExecutor, CommandResult, CursorCommand, EditCommand, EditorConfig, Motion,
    ViewCommand,
};

fn show(executor: &CommandExecutor) {
    let editor = executor.editor();
    let cursor = editor.cursor();
    println!("  text: {:?}", editor.text_lossy());
    println!(
        "  cursor: offset {} (row {}, col {})",
        cursor.offset(),
        cursor.row(),
        cursor.col()
    );
}

fn main() {
    println!("=== Command interface ===\n");

    let config = EditorConfig::default().with_tab_width(2);
    let mut executor = CommandExecutor::with_config(b"", config).unwrap();

    // 1. Typing
    println!("1. Typing:");
    for byte in b"Hello World" {
        executor
            .execute(Command::Edit(EditCommand::InsertChar(*byte)))
            .unwrap();
    }
    show(&executor);

    // 2. Select the last word and replace it
    println!("\n2. Replace the last word:");
    executor
        .execute(Command::Cursor(CursorCommand::Move {
            motion: Motion::WordLeft,
            extend: true,
        }))
        .unwrap();
    println!(
        "  selected: {:?}",
        executor
            .editor()
            .selected_bytes()
            .map(String::from_utf8_lossy)
    );
    executor
        .execute(Command::Edit(EditCommand::InsertText(b" Rust".to_vec())))
        .unwrap();
    show(&executor);

    // 3. Several lines at once
    println!("\n3. Batch:");
    let results = executor
        .execute_batch([
            Command::Edit(EditCommand::InsertNewline),
            Command::Edit(EditCommand::InsertTab),
            Command::Edit(EditCommand::InsertText(b"indented".to_vec())),
            Command::Cursor(CursorCommand::Move {
                motion: Motion::LineUp,
                extend: false,
            }),
        ])
        .unwrap();
    println!("  results: {results:?}");
    show(&executor);

    // 4. Goto line
    println!("\n4. Goto line:");
    for line in [1, 2] {
        let result = executor
            .execute(Command::Cursor(CursorCommand::GotoLine { line }))
            .unwrap();
        match result {
            CommandResult::Success => println!("  line {line}: moved"),
            CommandResult::NotPerformed => println!("  line {line}: out of range"),
        }
    }
    executor
        .execute(Command::Cursor(CursorCommand::GotoLineOrEnd { line: 2 }))
        .unwrap();
    show(&executor);

    // 5. Zoom
    println!("\n5. Zoom:");
    executor
        .execute(Command::View(ViewCommand::ZoomIn))
        .unwrap();
    println!("  font size: {}", executor.editor().font_size());

    println!("\n  lines: {}", executor.editor().line_count());
    println!("  modified: {}", executor.editor().is_modified());
}
