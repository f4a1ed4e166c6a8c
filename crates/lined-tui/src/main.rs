//! Terminal front end for `lined-core`
//!
//! A small line editor built with crossterm and ratatui.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p lined-tui -- <file_path>
//! cargo run -p lined-tui -- --tab-width 2 --log-file lined.log notes.txt
//! ```
//!
//! Logging goes to `--log-file` (filtered by `RUST_LOG`); without it nothing is logged,
//! since the editor owns the terminal.
//!
//! # Shortcuts
//!
//! - Arrows: move the cursor
//! - Ctrl+Left/Right: previous/next word
//! - Ctrl+Up/Down: previous/next blank line
//! - Shift+any motion: extend the selection
//! - Home/End: line start/end (Ctrl: document start/end)
//! - PageUp/PageDown: page
//! - Ctrl+A: select all
//! - Ctrl+C / Ctrl+X / Ctrl+V: copy / cut / paste
//! - Ctrl+G: go to line
//! - Ctrl+S: save
//! - Ctrl+Q: quit
//! - Esc: clear the selection

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lined_core::config::DEFAULT_TAB_WIDTH;
use lined_core::cursor::DEFAULT_PAGE_LINES;
use lined_core::platform::byte_cells;
use lined_core::{
    CursorCommand, EditCommand, EditorConfig, EditorSession, MonospaceMeasure, Motion,
    SessionCommand, ViewportSize,
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    fs::File,
    io::stdout,
    mem,
    path::{Path, PathBuf},
    sync::Mutex,
    time::{Duration, Instant},
};

/// A minimal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "lined", version, about, long_about = None)]
struct Cli {
    /// File to edit (created on first save if it does not exist)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Spaces inserted by the Tab key
    #[arg(long, default_value_t = DEFAULT_TAB_WIDTH)]
    tab_width: usize,

    /// Lines moved by PageUp/PageDown
    #[arg(long, default_value_t = DEFAULT_PAGE_LINES)]
    page_lines: usize,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    GotoLine,
}

struct App {
    session: EditorSession,
    /// Commands collected since the last tick
    pending: Vec<SessionCommand>,
    /// Text area size from the last frame
    viewport: ViewportSize,
    should_quit: bool,
    /// Waiting for y/n after quitting with unsaved changes
    confirm_quit: bool,
    input_mode: InputMode,
    input_buffer: String,
}

impl App {
    fn new(session: EditorSession) -> Self {
        Self {
            session,
            pending: Vec::new(),
            viewport: ViewportSize::default(),
            should_quit: false,
            confirm_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.confirm_quit {
            match key.code {
                KeyCode::Char('y' | 'Y') => {
                    self.confirm_quit = false;
                    // A failed save leaves its notification up and keeps the editor open.
                    self.should_quit = self.session.save().is_ok();
                }
                KeyCode::Char('n' | 'N') => self.should_quit = true,
                KeyCode::Esc => self.confirm_quit = false,
                _ => {}
            }
            return;
        }

        if self.input_mode == InputMode::GotoLine {
            self.handle_prompt_key(key);
            return;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                if self.session.document_state().is_modified {
                    self.confirm_quit = true;
                } else {
                    self.should_quit = true;
                }
            }
            (KeyModifiers::CONTROL, KeyCode::Char('g')) => {
                self.input_mode = InputMode::GotoLine;
                self.input_buffer.clear();
            }
            _ => {
                if let Some(command) = command_for_key(key) {
                    self.pending.push(command);
                }
            }
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Enter => {
                let input = mem::take(&mut self.input_buffer);
                self.input_mode = InputMode::Normal;
                match input.trim().parse::<usize>() {
                    Ok(line) if line > 0 => self
                        .pending
                        .push(CursorCommand::GotoLineOrEnd { line }.into()),
                    _ => self.session.notify(format!("Not a line number: {input}")),
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => self.input_buffer.push(c),
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: String) {
        self.pending
            .push(EditCommand::InsertText(text.into_bytes()).into());
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // text
                Constraint::Length(1), // status
                Constraint::Length(1), // shortcuts
            ])
            .split(frame.area());

        self.render_editor(frame, chunks[0]);
        self.render_status_line(frame, chunks[1]);
        self.render_shortcuts(frame, chunks[2]);
    }

    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        let title = self
            .session
            .path()
            .and_then(Path::file_name)
            .map_or_else(|| "[No Name]".to_string(), |name| name.to_string_lossy().into_owned());
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Keep one spare column so a cursor at the end of a long line stays on screen.
        self.viewport = ViewportSize::new(
            i32::from(inner.width.saturating_sub(1)),
            i32::from(inner.height),
        );

        let scroll = self.session.scroll();
        let height = usize::from(inner.height);
        let mut display_lines = vec![Line::from(""); height];

        for line in self.session.visible_lines() {
            let Ok(screen_row) = usize::try_from(line.y) else {
                continue;
            };
            if screen_row >= height {
                continue;
            }

            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_selected = false;
            let mut cell = 0i32;
            for (col, &byte) in line.text.iter().enumerate() {
                let x = cell + scroll.x;
                cell += i32::try_from(byte_cells(byte)).unwrap_or(1);
                if x < 0 {
                    continue;
                }
                if x >= i32::from(inner.width) {
                    break;
                }

                let selected = line
                    .selection
                    .as_ref()
                    .is_some_and(|span| span.contains(&col));
                if selected != run_selected && !run.is_empty() {
                    spans.push(styled_run(mem::take(&mut run), run_selected));
                }
                run_selected = selected;
                run.push(display_char(byte));
            }
            if !run.is_empty() {
                spans.push(styled_run(run, run_selected));
            }
            if line.text.is_empty() && line.selection.is_some() && scroll.x == 0 {
                spans.push(styled_run(" ".to_string(), true));
            }
            display_lines[screen_row] = Line::from(spans);
        }

        frame.render_widget(Paragraph::new(display_lines), inner);

        let cursor = self.session.cursor_screen();
        let x = cursor.x + scroll.x;
        let y = cursor.y + scroll.y;
        if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y))
            && x < inner.width
            && y < inner.height
        {
            frame.set_cursor_position((inner.x + x, inner.y + y));
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let status_text = if self.input_mode == InputMode::GotoLine {
            format!("Go to line: {}  (Enter=Go, Esc=Cancel)", self.input_buffer)
        } else if self.confirm_quit {
            "File modified. Save before quitting? (y/n, Esc=Cancel)".to_string()
        } else if let Some(notification) = self.session.notification() {
            notification.message.clone()
        } else {
            let document = self.session.document_state();
            let cursor = self.session.cursor_state();
            let selected = cursor
                .selection
                .map(|selection| selection.len())
                .filter(|len| *len > 0)
                .map_or_else(String::new, |len| format!(" | Sel:{len}"));
            format!(
                "Ln:{} Col:{}{} | Lines:{} Bytes:{}{}",
                cursor.row + 1,
                cursor.col + 1,
                selected,
                document.line_count,
                document.byte_count,
                if document.is_modified { " | Modified" } else { "" },
            )
        };

        let status_line = Paragraph::new(status_text).style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

        frame.render_widget(status_line, area);
    }

    fn render_shortcuts(&self, frame: &mut Frame, area: Rect) {
        let shortcuts = if self.confirm_quit {
            "Y:Save and quit  N:Quit without saving  Esc:Cancel"
        } else {
            "Ctrl-S:Save  Ctrl-Q:Quit  Ctrl-G:Go to line  Ctrl-A:Select all  Ctrl-C/X/V:Copy/Cut/Paste  Ctrl-Arrows:Word/Blank line"
        };

        let shortcuts_line =
            Paragraph::new(shortcuts).style(Style::default().bg(Color::Blue).fg(Color::White));

        frame.render_widget(shortcuts_line, area);
    }
}

/// Editor command for a key press in normal mode.
fn command_for_key(key: KeyEvent) -> Option<SessionCommand> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    let motion = |motion: Motion| -> Option<SessionCommand> {
        Some(CursorCommand::Move { motion, extend }.into())
    };

    match key.code {
        KeyCode::Char('s') if ctrl => Some(SessionCommand::Save),
        KeyCode::Char('c') if ctrl => Some(SessionCommand::Copy),
        KeyCode::Char('x') if ctrl => Some(SessionCommand::Cut),
        KeyCode::Char('v') if ctrl => Some(SessionCommand::Paste),
        KeyCode::Char('a') if ctrl => Some(CursorCommand::SelectAll.into()),
        KeyCode::Left if ctrl => motion(Motion::WordLeft),
        KeyCode::Right if ctrl => motion(Motion::WordRight),
        KeyCode::Up if ctrl => motion(Motion::PrevEmptyLine),
        KeyCode::Down if ctrl => motion(Motion::NextEmptyLine),
        KeyCode::Home if ctrl => motion(Motion::DocumentStart),
        KeyCode::End if ctrl => motion(Motion::DocumentEnd),
        KeyCode::Left => motion(Motion::CharLeft),
        KeyCode::Right => motion(Motion::CharRight),
        KeyCode::Up => motion(Motion::LineUp),
        KeyCode::Down => motion(Motion::LineDown),
        KeyCode::Home => motion(Motion::LineStart),
        KeyCode::End => motion(Motion::LineEnd),
        KeyCode::PageUp => motion(Motion::PageUp),
        KeyCode::PageDown => motion(Motion::PageDown),
        KeyCode::Esc => Some(CursorCommand::ClearSelection.into()),
        KeyCode::Backspace => Some(EditCommand::Backspace.into()),
        KeyCode::Delete => Some(EditCommand::DeleteForward.into()),
        KeyCode::Enter => Some(EditCommand::InsertNewline.into()),
        KeyCode::Tab => Some(EditCommand::InsertTab.into()),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            let mut encoded = [0u8; 4];
            let bytes = c.encode_utf8(&mut encoded).as_bytes();
            Some(match bytes {
                [byte] => EditCommand::InsertChar(*byte).into(),
                _ => EditCommand::InsertText(bytes.to_vec()).into(),
            })
        }
        _ => None,
    }
}

/// Glyph drawn for a document byte; control bytes get a placeholder.
fn display_char(byte: u8) -> char {
    match byte {
        b' '..=b'~' | 0xa0..=0xff => char::from(byte),
        _ => '·',
    }
}

fn styled_run(text: String, selected: bool) -> Span<'static> {
    if selected {
        Span::styled(text, Style::default().add_modifier(Modifier::REVERSED))
    } else {
        Span::raw(text)
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    // One cell per byte: a font size of 1 makes pixels and cells the same unit.
    let config = EditorConfig::default()
        .with_font_size(1)
        .with_font_range(1, 1)
        .with_tab_width(cli.tab_width)
        .with_page_lines(cli.page_lines);
    let mut session = EditorSession::new(config)
        .context("Invalid editor settings")?
        .with_measure(MonospaceMeasure::cells());

    if let Some(path) = &cli.path {
        if path.exists() {
            session
                .open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
        } else {
            session.set_path(path);
            session.notify(format!("New file: {}", path.display()));
        }
    }

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        let now = Instant::now();
        let commands = mem::take(&mut app.pending);
        app.session
            .tick(commands, now - last_tick, app.viewport)
            .context("Editor error")?;
        last_tick = now;

        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Paste(text) => app.handle_paste(text),
                _ => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lined_core::Command;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_shift_extends_and_ctrl_jumps_words() {
        assert_eq!(
            command_for_key(key(KeyCode::Left, KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
            Some(SessionCommand::Core(Command::Cursor(CursorCommand::Move {
                motion: Motion::WordLeft,
                extend: true,
            })))
        );
        assert_eq!(
            command_for_key(key(KeyCode::Down, KeyModifiers::NONE)),
            Some(SessionCommand::Core(Command::Cursor(CursorCommand::Move {
                motion: Motion::LineDown,
                extend: false,
            })))
        );
    }

    #[test]
    fn test_characters_become_inserts() {
        assert_eq!(
            command_for_key(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(EditCommand::InsertChar(b'a').into())
        );
        assert_eq!(
            command_for_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(EditCommand::InsertChar(b'A').into())
        );
        assert_eq!(
            command_for_key(key(KeyCode::Char('é'), KeyModifiers::NONE)),
            Some(EditCommand::InsertText("é".as_bytes().to_vec()).into())
        );
        assert_eq!(
            command_for_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(SessionCommand::Copy)
        );
        assert_eq!(command_for_key(key(KeyCode::Char('z'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn test_display_char() {
        assert_eq!(display_char(b'a'), 'a');
        assert_eq!(display_char(b'\t'), '·');
        assert_eq!(display_char(0x85), '·');
        assert_eq!(display_char(0xe9), 'é');
    }

    #[test]
    fn test_goto_prompt_queues_goto() {
        let session = EditorSession::new(EditorConfig::default()).unwrap();
        let mut app = App::new(session);
        app.handle_key_event(key(KeyCode::Char('g'), KeyModifiers::CONTROL));
        assert_eq!(app.input_mode, InputMode::GotoLine);

        for c in ['1', 'x', '2'] {
            app.handle_key_event(key(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.handle_key_event(key(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(
            app.pending,
            vec![SessionCommand::from(CursorCommand::GotoLineOrEnd { line: 12 })]
        );
    }

    #[test]
    fn test_quit_with_unsaved_changes_asks_first() {
        let mut session = EditorSession::new(EditorConfig::default()).unwrap();
        session
            .tick(
                [SessionCommand::from(EditCommand::InsertChar(b'x'))],
                Duration::ZERO,
                ViewportSize::new(10, 10),
            )
            .unwrap();
        let mut app = App::new(session);

        app.handle_key_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.confirm_quit);
        assert!(!app.should_quit);

        app.handle_key_event(key(KeyCode::Char('n'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }
}
