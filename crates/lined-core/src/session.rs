//! Editor Session
//!
//! Ties the command executor to the host: the file on disk, the clipboard, text
//! measurement and the visible window.
//!
//! # Overview
//!
//! A host drives the session one tick at a time. Each [`EditorSession::tick`]:
//!
//! 1. applies the queued [`SessionCommand`]s in order,
//! 2. measures the cursor's on-screen position,
//! 3. scrolls the viewport so the cursor is visible,
//! 4. counts down the status notification.
//!
//! Rendering then reads the state queries ([`EditorSession::visible_lines`],
//! [`EditorSession::cursor_screen`], [`EditorSession::document_state`], ...).
//!
//! # Example
//!
//! ```rust
//! use lined_core::{EditCommand, EditorConfig, EditorSession, SessionCommand, ViewportSize};
//! use std::time::Duration;
//!
//! let mut session = EditorSession::new(EditorConfig::default()).unwrap();
//! session
//!     .tick(
//!         [
//!             SessionCommand::from(EditCommand::InsertText(b"first".to_vec())),
//!             SessionCommand::from(EditCommand::InsertNewline),
//!         ],
//!         Duration::from_millis(16),
//!         ViewportSize::new(640, 480),
//!     )
//!     .unwrap();
//!
//! let state = session.document_state();
//! assert_eq!(state.line_count, 2);
//! assert!(state.is_modified);
//! ```

use crate::commands::{
    Command, CommandError, CommandExecutor, CommandResult, CursorCommand, EditCommand,
    EditorCore, ViewCommand,
};
use crate::config::{ConfigError, EditorConfig};
use crate::cursor::Cursor;
use crate::platform::{
    Clipboard, FsPersistence, MemoryClipboard, MonospaceMeasure, Persistence, TextMeasure,
};
use crate::selection::Selection;
use crate::viewport::{self, ScreenPoint, ViewportScroll, ViewportSize};
use std::fmt;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

/// Session error type
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    /// The editor rejected a command.
    Command(#[from] CommandError),

    #[error("i/o error: {0}")]
    /// Loading or saving the file failed.
    Io(#[from] io::Error),

    #[error("no file name to save to")]
    /// `save` was requested before the session had a path.
    NoPath,

    #[error(transparent)]
    /// The configuration is unusable.
    Config(#[from] ConfigError),
}

impl SessionError {
    /// Returns `true` if the session cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::Command(err) if err.is_fatal())
    }
}

/// Everything a host can ask the session to do within a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// An editor command.
    Core(Command),
    /// Copy the selection to the clipboard.
    Copy,
    /// Copy the selection to the clipboard and delete it.
    Cut,
    /// Insert the clipboard contents at the cursor.
    Paste,
    /// Write the buffer to the session's path.
    Save,
}

impl From<Command> for SessionCommand {
    fn from(command: Command) -> Self {
        SessionCommand::Core(command)
    }
}

impl From<EditCommand> for SessionCommand {
    fn from(command: EditCommand) -> Self {
        SessionCommand::Core(command.into())
    }
}

impl From<CursorCommand> for SessionCommand {
    fn from(command: CursorCommand) -> Self {
        SessionCommand::Core(command.into())
    }
}

impl From<ViewCommand> for SessionCommand {
    fn from(command: ViewCommand) -> Self {
        SessionCommand::Core(command.into())
    }
}

/// Transient status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text shown to the user.
    pub message: String,
    /// Time left before the message disappears.
    pub remaining: Duration,
}

/// Document state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    /// Total line count
    pub line_count: usize,
    /// Total document byte count
    pub byte_count: usize,
    /// Whether the document changed since it was opened or saved
    pub is_modified: bool,
    /// Document version number (incremented after each modification)
    pub version: u64,
    /// File the document is saved to, if any
    pub path: Option<PathBuf>,
}

/// Cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    /// Byte offset
    pub offset: usize,
    /// Line index
    pub row: usize,
    /// Byte column within the line
    pub col: usize,
    /// Active selection (gesture order; may be empty)
    pub selection: Option<Selection>,
}

/// Viewport state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportState {
    /// Viewport size in pixels, as passed to the last tick
    pub size: ViewportSize,
    /// Current scroll offsets
    pub scroll: ViewportScroll,
    /// Line height in pixels (equal to the font size)
    pub line_height: u32,
    /// Rows intersecting the viewport
    pub visible_rows: Range<usize>,
}

/// One line as the renderer needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine<'a> {
    /// Line index
    pub row: usize,
    /// Offset of the first byte of the line
    pub start: usize,
    /// Line content without its terminator
    pub text: &'a [u8],
    /// Selected byte columns on this line (relative to `start`)
    pub selection: Option<Range<usize>>,
    /// Top of the line on screen (scroll applied)
    pub y: i32,
}

/// A text editor bound to a file, a clipboard and a display.
pub struct EditorSession {
    executor: CommandExecutor,
    path: Option<PathBuf>,
    viewport: ViewportSize,
    scroll: ViewportScroll,
    cursor_screen: ScreenPoint,
    notification: Option<Notification>,
    persistence: Box<dyn Persistence>,
    clipboard: Box<dyn Clipboard>,
    measure: Box<dyn TextMeasure>,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("executor", &self.executor)
            .field("path", &self.path)
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .field("cursor_screen", &self.cursor_screen)
            .field("notification", &self.notification)
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    /// Create a session with an empty, unnamed document.
    ///
    /// Uses the filesystem, an in-process clipboard and monospace measurement until
    /// the host installs its own collaborators.
    pub fn new(config: EditorConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            executor: CommandExecutor::from_core(EditorCore::empty(config)),
            path: None,
            viewport: ViewportSize::default(),
            scroll: ViewportScroll::default(),
            cursor_screen: ScreenPoint::default(),
            notification: None,
            persistence: Box::new(FsPersistence),
            clipboard: Box::new(MemoryClipboard::new()),
            measure: Box::new(MonospaceMeasure::default()),
        })
    }

    /// Use `persistence` for open and save.
    pub fn with_persistence(mut self, persistence: impl Persistence + 'static) -> Self {
        self.persistence = Box::new(persistence);
        self
    }

    /// Use `clipboard` for copy, cut and paste.
    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    /// Use `measure` to place the cursor on screen.
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self.refresh_view();
        self
    }

    /// Editor state.
    pub fn editor(&self) -> &EditorCore {
        self.executor.editor()
    }

    /// File the document is saved to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Name the document without touching the disk (a new file).
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Replace the document with the contents of `path`.
    ///
    /// On failure the current document and path are kept.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        info!(path = %path.display(), "opening file");
        let bytes = self.persistence.load(path)?;
        self.executor.load(&bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "file loaded");

        self.path = Some(path.to_path_buf());
        self.scroll = ViewportScroll::default();
        self.refresh_view();
        Ok(())
    }

    /// Write the document to its path.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let Some(path) = self.path.clone() else {
            self.notify("No file name");
            return Err(SessionError::NoPath);
        };
        self.write_to(&path)
    }

    /// Write the document to `path` and make it the session's path.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), SessionError> {
        let path = path.into();
        self.write_to(&path)?;
        self.path = Some(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<(), SessionError> {
        info!(path = %path.display(), "saving file");
        let bytes = self.executor.editor().text();
        match self.persistence.save(path, bytes) {
            Ok(()) => {
                info!(path = %path.display(), bytes = bytes.len(), "file saved");
                self.executor.mark_saved();
                self.notify(format!("Saved {}", path.display()));
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "save failed");
                self.notify(format!("Save failed: {err}"));
                Err(err.into())
            }
        }
    }

    /// Copy the selection to the clipboard.
    ///
    /// Not performed when nothing is selected.
    pub fn copy(&mut self) -> CommandResult {
        match self.executor.editor().selected_bytes() {
            Some(bytes) => {
                self.clipboard.set_text(bytes);
                CommandResult::Success
            }
            None => CommandResult::NotPerformed,
        }
    }

    /// Copy the selection to the clipboard, then delete it.
    pub fn cut(&mut self) -> Result<CommandResult, SessionError> {
        if self.copy() == CommandResult::NotPerformed {
            return Ok(CommandResult::NotPerformed);
        }
        Ok(self.execute(EditCommand::DeleteSelection.into())?)
    }

    /// Insert the clipboard contents at the cursor, replacing any selection.
    pub fn paste(&mut self) -> Result<CommandResult, SessionError> {
        let text = self.clipboard.get_text();
        Ok(self.execute(EditCommand::InsertText(text).into())?)
    }

    /// Apply one editor command.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        self.executor.execute(command)
    }

    /// Apply one session command.
    pub fn run(&mut self, command: SessionCommand) -> Result<CommandResult, SessionError> {
        match command {
            SessionCommand::Core(command) => Ok(self.execute(command)?),
            SessionCommand::Copy => Ok(self.copy()),
            SessionCommand::Cut => self.cut(),
            SessionCommand::Paste => self.paste(),
            SessionCommand::Save => self.save().map(|()| CommandResult::Success),
        }
    }

    /// Post a status message for the configured duration.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification {
            message: message.into(),
            remaining: self.executor.editor().config().notification_duration,
        });
    }

    /// Run one frame: apply `commands`, then bring the view up to date.
    ///
    /// Failed commands are logged and skipped; save failures are also posted as a
    /// notification. A fatal error stops the batch and is returned after the view has
    /// been refreshed.
    pub fn tick(
        &mut self,
        commands: impl IntoIterator<Item = SessionCommand>,
        elapsed: Duration,
        viewport: ViewportSize,
    ) -> Result<(), SessionError> {
        self.viewport = viewport;

        let mut outcome = Ok(());
        for command in commands {
            match self.run(command) {
                Ok(_) => {}
                Err(err) if err.is_fatal() => {
                    error!(%err, "fatal editor error");
                    outcome = Err(err);
                    break;
                }
                Err(err) => warn!(%err, "command failed"),
            }
        }

        self.refresh_view();
        self.advance_notification(elapsed);
        outcome
    }

    fn advance_notification(&mut self, elapsed: Duration) {
        if let Some(notification) = &mut self.notification {
            notification.remaining = notification.remaining.saturating_sub(elapsed);
            if notification.remaining.is_zero() {
                self.notification = None;
            }
        }
    }

    fn line_height(&self) -> i32 {
        i32::try_from(self.executor.editor().font_size()).unwrap_or(i32::MAX)
    }

    /// Width of `text` at the current font settings.
    pub fn text_width(&self, text: &[u8]) -> f32 {
        let editor = self.executor.editor();
        self.measure.measure(
            text,
            editor.font_size() as f32,
            editor.config().font_spacing,
        )
    }

    /// Recompute the cursor's screen position and the scroll offsets.
    fn refresh_view(&mut self) {
        let editor = self.executor.editor();
        let cursor = editor.cursor();
        let line = editor.line_bytes(cursor.row()).unwrap_or_default();
        let prefix = &line[..cursor.col().min(line.len())];

        let x = self.text_width(prefix).round() as i32;
        let line_height = self.line_height();
        let y = i32::try_from(cursor.row())
            .unwrap_or(i32::MAX)
            .saturating_mul(line_height);

        self.cursor_screen = ScreenPoint::new(x, y);
        if self.viewport.width > 0 && self.viewport.height > 0 {
            self.scroll = viewport::recompute_scroll(
                self.cursor_screen,
                line_height,
                self.viewport,
                self.scroll,
            );
        }
    }

    /// Current status message, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.executor.editor().cursor()
    }

    /// Cursor position in document pixels (before scrolling).
    pub fn cursor_screen(&self) -> ScreenPoint {
        self.cursor_screen
    }

    /// Current scroll offsets.
    pub fn scroll(&self) -> ViewportScroll {
        self.scroll
    }

    /// Lines intersecting the viewport, with their selection spans.
    pub fn visible_lines(&self) -> Vec<RenderLine<'_>> {
        let editor = self.executor.editor();
        let index = editor.line_index();
        let text = editor.text();
        let selection = editor.selection().filter(|selection| !selection.is_empty());
        let line_height = self.line_height();

        self.visible_rows()
            .filter_map(|row| {
                let line = index.line(row)?;
                let span = selection
                    .and_then(|selection| selection.span_on_line(line))
                    .map(|(start, end)| start - line.start..end - line.start);
                let y = i32::try_from(row)
                    .unwrap_or(i32::MAX)
                    .saturating_mul(line_height)
                    .saturating_add(self.scroll.y);
                Some(RenderLine {
                    row,
                    start: line.start,
                    text: &text[line.range()],
                    selection: span,
                    y,
                })
            })
            .collect()
    }

    fn visible_rows(&self) -> Range<usize> {
        viewport::visible_rows(
            self.scroll,
            self.viewport,
            self.line_height(),
            self.executor.editor().line_count(),
        )
    }

    /// Get document state
    pub fn document_state(&self) -> DocumentState {
        let editor = self.executor.editor();
        DocumentState {
            line_count: editor.line_count(),
            byte_count: editor.len(),
            is_modified: editor.is_modified(),
            version: self.executor.version(),
            path: self.path.clone(),
        }
    }

    /// Get cursor state
    pub fn cursor_state(&self) -> CursorState {
        let editor = self.executor.editor();
        let cursor = editor.cursor();
        CursorState {
            offset: cursor.offset(),
            row: cursor.row(),
            col: cursor.col(),
            selection: editor.selection(),
        }
    }

    /// Get viewport state
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            size: self.viewport,
            scroll: self.scroll,
            line_height: self.executor.editor().font_size(),
            visible_rows: self.visible_rows(),
        }
    }
}
