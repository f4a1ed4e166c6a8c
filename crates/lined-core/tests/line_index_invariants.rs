use lined_core::{
    Command, CommandExecutor, CursorCommand, EditCommand, LineIndex, Motion, TextBuffer,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALPHABET: &[u8] = b"ab \n";

/// Line boundaries computed the obvious way.
fn naive_lines(text: &[u8]) -> Vec<(usize, usize)> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (offset, &byte) in text.iter().enumerate() {
        if byte == b'\n' {
            lines.push((start, offset));
            start = offset + 1;
        }
    }
    lines.push((start, text.len()));
    lines
}

fn assert_partition(text: &[u8], index: &LineIndex) {
    let actual: Vec<(usize, usize)> = index
        .lines()
        .iter()
        .map(|line| (line.start, line.end))
        .collect();
    assert_eq!(actual, naive_lines(text));

    for offset in 0..=text.len() {
        let containing = index
            .lines()
            .iter()
            .filter(|line| line.contains(offset))
            .count();
        assert_eq!(containing, 1, "offset {offset} in {text:?}");

        let row = index.row_for_offset(offset);
        assert!(index.line(row).unwrap().contains(offset));
    }
}

fn random_bytes(rng: &mut StdRng, max_len: usize) -> Vec<u8> {
    let len = rng.gen_range(1..=max_len);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

#[test]
fn test_rebuild_matches_naive_split_after_random_edits() {
    let mut rng = StdRng::seed_from_u64(0x11ed);
    let mut buffer = TextBuffer::new();
    let mut index = LineIndex::new();
    let mut model: Vec<u8> = Vec::new();

    for _ in 0..500 {
        if model.is_empty() || rng.gen_bool(0.6) {
            let offset = rng.gen_range(0..=model.len());
            let bytes = random_bytes(&mut rng, 6);
            let capacity_before = buffer.capacity();

            buffer.insert_bytes(offset, &bytes).unwrap();
            model.splice(offset..offset, bytes.iter().copied());
            assert!(buffer.capacity() >= capacity_before);
        } else {
            let offset = rng.gen_range(0..model.len());
            let len = rng.gen_range(1..=(model.len() - offset).min(5));

            buffer.delete_range(offset, len).unwrap();
            model.drain(offset..offset + len);
        }

        index.rebuild(buffer.as_bytes()).unwrap();
        assert_eq!(buffer.as_bytes(), model.as_slice());
        assert_partition(buffer.as_bytes(), &index);
    }
}

#[test]
fn test_partition_edge_cases() {
    let cases: [&[u8]; 7] = [b"", b"\n", b"\n\n", b"abc", b"abc\n", b"\nabc", b"a\n\nb"];
    for text in cases {
        let index = LineIndex::from_bytes(text).unwrap();
        assert_partition(text, &index);
    }
}

#[test]
fn test_insert_grows_count_by_inserted_length() {
    let mut buffer = TextBuffer::from_bytes(b"hello").unwrap();
    let before = buffer.len();
    buffer.insert_bytes(2, b"\n\n\n").unwrap();
    assert_eq!(buffer.len(), before + 3);
    buffer.delete_range(2, 3).unwrap();
    assert_eq!(buffer.as_bytes(), b"hello");
}

#[test]
fn test_cursor_stays_consistent_under_random_commands() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut executor = CommandExecutor::new(b"seed text\nwith two lines").unwrap();
    let motions = [
        Motion::CharLeft,
        Motion::CharRight,
        Motion::LineUp,
        Motion::LineDown,
        Motion::WordLeft,
        Motion::WordRight,
        Motion::LineStart,
        Motion::LineEnd,
        Motion::DocumentStart,
        Motion::DocumentEnd,
        Motion::PageUp,
        Motion::PageDown,
        Motion::NextEmptyLine,
        Motion::PrevEmptyLine,
    ];

    for _ in 0..1000 {
        let command = match rng.gen_range(0..10) {
            0..=4 => Command::Cursor(CursorCommand::Move {
                motion: motions[rng.gen_range(0..motions.len())],
                extend: rng.gen_bool(0.3),
            }),
            5 => Command::Edit(EditCommand::InsertText(random_bytes(&mut rng, 4))),
            6 => Command::Edit(EditCommand::InsertChar(
                ALPHABET[rng.gen_range(0..ALPHABET.len())],
            )),
            7 => Command::Edit(EditCommand::Backspace),
            8 => Command::Edit(EditCommand::DeleteForward),
            _ => Command::Cursor(CursorCommand::GotoLine {
                line: rng.gen_range(0..=executor.editor().line_count()),
            }),
        };
        executor.execute(command).unwrap();

        let editor = executor.editor();
        let cursor = editor.cursor();
        assert!(cursor.offset() <= editor.len());

        let line = editor.line_index().line(cursor.row()).unwrap();
        assert!(line.contains(cursor.offset()));
        assert_eq!(cursor.col(), cursor.offset() - line.start);

        if let Some(selection) = editor.selection() {
            assert!(selection.start <= editor.len());
            assert!(selection.end <= editor.len());
            assert_eq!(selection.end, cursor.offset());
        }
        assert_partition(editor.text(), editor.line_index());
    }
}
