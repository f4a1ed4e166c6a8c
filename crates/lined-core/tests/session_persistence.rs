use lined_core::{
    CursorCommand, EditCommand, EditorConfig, EditorSession, MemoryClipboard, Motion,
    SessionCommand, SessionError, ViewportSize,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);
const VIEW: ViewportSize = ViewportSize {
    width: 800,
    height: 600,
};

fn session() -> EditorSession {
    EditorSession::new(EditorConfig::default())
        .unwrap()
        .with_clipboard(MemoryClipboard::new())
}

#[test]
fn test_open_edit_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "alpha\nbeta\n").unwrap();

    let mut session = session();
    session.open(&path).unwrap();
    assert_eq!(session.document_state().line_count, 3);
    assert!(!session.document_state().is_modified);

    session
        .tick(
            [
                SessionCommand::from(CursorCommand::Move {
                    motion: Motion::LineDown,
                    extend: false,
                }),
                SessionCommand::from(EditCommand::InsertText(b"new ".to_vec())),
                SessionCommand::Save,
            ],
            FRAME,
            VIEW,
        )
        .unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"alpha\nnew beta\n");
    assert!(!session.document_state().is_modified);
}

#[test]
fn test_save_truncates_longer_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shrink.txt");
    fs::write(&path, "a much longer original body").unwrap();

    let mut session = session();
    session.open(&path).unwrap();
    session
        .tick(
            [
                SessionCommand::from(CursorCommand::SelectAll),
                SessionCommand::from(EditCommand::InsertText(b"short".to_vec())),
                SessionCommand::Save,
            ],
            FRAME,
            VIEW,
        )
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "short");
}

#[test]
fn test_open_failure_leaves_buffer_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exists.txt");
    fs::write(&path, "kept").unwrap();

    let mut session = session();
    session.open(&path).unwrap();
    let err = session.open(dir.path().join("missing.txt")).unwrap_err();

    assert!(matches!(err, SessionError::Io(_)));
    assert_eq!(session.editor().text(), b"kept");
    assert_eq!(session.path(), Some(path.as_path()));
}

#[test]
fn test_save_as_sets_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.txt");

    let mut session = session();
    session
        .tick(
            [SessionCommand::from(EditCommand::InsertText(b"draft".to_vec()))],
            FRAME,
            VIEW,
        )
        .unwrap();
    assert!(matches!(session.save(), Err(SessionError::NoPath)));

    session.save_as(&path).unwrap();
    assert_eq!(session.path(), Some(path.as_path()));
    assert_eq!(fs::read(&path).unwrap(), b"draft");
    assert!(!session.document_state().is_modified);
}

#[test]
fn test_save_into_missing_directory_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session();
    session.set_path(dir.path().join("no/such/dir/file.txt"));

    session.tick([SessionCommand::Save], FRAME, VIEW).unwrap();

    let message = &session.notification().unwrap().message;
    assert!(message.starts_with("Save failed"), "{message}");
}

#[test]
fn test_binary_bytes_survive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bytes.bin");
    let bytes: Vec<u8> = (0..=255).collect();
    fs::write(&path, &bytes).unwrap();

    let mut session = session();
    session.open(&path).unwrap();
    assert_eq!(session.editor().text(), bytes.as_slice());
    session.save().unwrap();
    assert_eq!(fs::read(&path).unwrap(), bytes);
}

#[test]
fn test_cut_and_paste_between_lines() {
    let mut session = session();
    session
        .tick(
            [
                SessionCommand::from(EditCommand::InsertText(b"first\nsecond".to_vec())),
                SessionCommand::from(CursorCommand::Move {
                    motion: Motion::LineStart,
                    extend: false,
                }),
                SessionCommand::from(CursorCommand::Move {
                    motion: Motion::LineEnd,
                    extend: true,
                }),
                SessionCommand::Cut,
                SessionCommand::from(CursorCommand::Move {
                    motion: Motion::DocumentStart,
                    extend: false,
                }),
                SessionCommand::Paste,
            ],
            FRAME,
            VIEW,
        )
        .unwrap();

    assert_eq!(session.editor().text(), b"secondfirst\n");
    assert_eq!(session.cursor().offset(), 6);
}
