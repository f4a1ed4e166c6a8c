//! State management example
//!
//! Demonstrates how to drive an `EditorSession` tick by tick and query its state.

use lined_core::{
    CursorCommand, EditCommand, EditorConfig, EditorSession, Motion, SessionCommand,
    ViewportSize,
};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn print_document_state(session: &EditorSession) {
    let state = session.document_state();
    println!("  lines: {}", state.line_count);
    println!("  bytes: {}", state.byte_count);
    println!("  modified: {}", state.is_modified);
    println!("  version: {}", state.version);
}

fn print_cursor_state(session: &EditorSession) {
    let state = session.cursor_state();
    println!(
        "  offset {} (row {}, col {})",
        state.offset, state.row, state.col
    );
    if let Some(selection) = state.selection {
        println!("  selection: {:?}", selection.normalize());
    }
    println!("  on screen: {:?}", session.cursor_screen());
}

fn print_viewport(session: &EditorSession) {
    let state = session.viewport_state();
    println!("  scroll: {:?}", state.scroll);
    println!("  visible rows: {:?}", state.visible_rows);
    for line in session.visible_lines() {
        let marker = if line.selection.is_some() { '*' } else { ' ' };
        println!(
            "  {marker}{:>3} | {}",
            line.row + 1,
            String::from_utf8_lossy(line.text)
        );
    }
}

fn main() {
    println!("=== Session state ===\n");

    let mut session = EditorSession::new(EditorConfig::default()).unwrap();
    let viewport = ViewportSize::new(320, 80);

    let body: Vec<u8> = (1..=12)
        .flat_map(|i| format!("line {i}\n").into_bytes())
        .collect();
    session
        .tick(
            [SessionCommand::from(EditCommand::InsertText(body))],
            FRAME,
            viewport,
        )
        .unwrap();

    println!("1. After inserting text:");
    print_document_state(&session);

    println!("\n2. Cursor:");
    print_cursor_state(&session);

    println!("\n3. Viewport (scrolled to the cursor):");
    print_viewport(&session);

    println!("\n4. Select two lines from the top:");
    session
        .tick(
            [
                SessionCommand::from(CursorCommand::Move {
                    motion: Motion::DocumentStart,
                    extend: false,
                }),
                SessionCommand::from(CursorCommand::Move {
                    motion: Motion::LineDown,
                    extend: true,
                }),
                SessionCommand::from(CursorCommand::Move {
                    motion: Motion::LineDown,
                    extend: true,
                }),
                SessionCommand::Copy,
            ],
            FRAME,
            viewport,
        )
        .unwrap();
    print_cursor_state(&session);
    print_viewport(&session);

    println!("\n5. Notifications:");
    session.notify("hello from the host");
    for _ in 0..3 {
        session
            .tick(Vec::<SessionCommand>::new(), Duration::from_secs(1), viewport)
            .unwrap();
        match session.notification() {
            Some(notification) => println!(
                "  {:?} ({:?} left)",
                notification.message, notification.remaining
            ),
            None => println!("  (no notification)"),
        }
    }
}
