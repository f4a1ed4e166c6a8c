//! Command Interface Layer
//!
//! Provides a unified command interface for convenient frontend integration.
//!
//! # Overview
//!
//! The input layer never touches the buffer directly. It translates key presses into
//! [`Command`] values and hands them to a [`CommandExecutor`], which:
//!
//! 1. applies the command to the [`EditorCore`] (buffer, cursor, selection),
//! 2. rebuilds the [`LineIndex`] if the buffer changed,
//! 3. re-derives the cursor row and column from the rebuilt index.
//!
//! Step 3 runs after every command, so the cursor never reports a row or column that
//! disagrees with the buffer.
//!
//! # Example
//!
//! ```rust
//! use lined_core::{Command, CommandExecutor, CursorCommand, EditCommand, Motion};
//!
//! let mut executor = CommandExecutor::empty();
//!
//! for byte in b"hello world" {
//!     executor.execute(Command::Edit(EditCommand::InsertChar(*byte))).unwrap();
//! }
//!
//! // Select "world" backwards with shift+ctrl+left.
//! executor.execute(Command::Cursor(CursorCommand::Move {
//!     motion: Motion::WordLeft,
//!     extend: true,
//! })).unwrap();
//! assert_eq!(executor.editor().selected_bytes(), Some(&b" world"[..]));
//!
//! executor.execute(Command::Edit(EditCommand::DeleteSelection)).unwrap();
//! assert_eq!(executor.editor().text(), b"hello");
//! ```

use crate::config::{ConfigError, EditorConfig};
use crate::cursor::{Cursor, Motion, Navigator, recompute_derived};
use crate::line_index::LineIndex;
use crate::selection::{self, Selection};
use crate::storage::{StorageError, TextBuffer};
use std::borrow::Cow;
use thiserror::Error;
use tracing::{debug, error};

/// Text editing commands
///
/// Every edit first consumes an active selection: inserting replaces it, deleting
/// removes exactly it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert one byte at the cursor.
    InsertChar(u8),
    /// Insert a line terminator at the cursor.
    InsertNewline,
    /// Insert `tab_width` spaces at the cursor.
    InsertTab,
    /// Insert a run of bytes at the cursor (paste).
    InsertText(Vec<u8>),
    /// Delete the byte before the cursor.
    Backspace,
    /// Delete the byte under the cursor.
    DeleteForward,
    /// Delete the selected range; not performed when nothing is selected.
    DeleteSelection,
}

/// Cursor & selection commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorCommand {
    /// Move the cursor.
    Move {
        /// Where to move.
        motion: Motion,
        /// Extend the selection (shift held) instead of clearing it.
        extend: bool,
    },
    /// Jump to the start of a 1-based line; not performed when out of range.
    GotoLine {
        /// 1-based line number.
        line: usize,
    },
    /// Jump to the start of a 1-based line, or to the end of the document when the
    /// line cannot be reached.
    GotoLineOrEnd {
        /// 1-based line number.
        line: usize,
    },
    /// Select the whole document.
    SelectAll,
    /// Drop the selection.
    ClearSelection,
}

/// View commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    /// Increase the font size by one.
    ZoomIn,
    /// Decrease the font size by one.
    ZoomOut,
    /// Set the font size (clamped to the configured range).
    SetFontSize {
        /// Requested size in pixels.
        size: u32,
    },
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text editing commands
    Edit(EditCommand),
    /// Cursor command
    Cursor(CursorCommand),
    /// View commands
    View(ViewCommand),
}

impl From<EditCommand> for Command {
    fn from(command: EditCommand) -> Self {
        Command::Edit(command)
    }
}

impl From<CursorCommand> for Command {
    fn from(command: CursorCommand) -> Self {
        Command::Cursor(command)
    }
}

impl From<ViewCommand> for Command {
    fn from(command: ViewCommand) -> Self {
        Command::View(command)
    }
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// The command was applied.
    Success,
    /// The command was valid but had nothing to act on (out-of-range line, no
    /// selection). State is unchanged; the caller may apply a fallback.
    NotPerformed,
}

/// Command error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    /// The buffer or line index rejected an operation.
    Storage(#[from] StorageError),

    #[error(transparent)]
    /// The settings failed [`EditorConfig::validate`].
    Config(#[from] ConfigError),
}

impl CommandError {
    /// Returns `true` if editing cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CommandError::Storage(StorageError::Allocation(_)))
    }
}

/// Editor Core state structure
///
/// Holds the buffer and everything derived from it. Read access is public; mutation
/// goes through [`CommandExecutor`] so the line index and cursor stay in sync.
///
/// # Example
///
/// ```rust
/// use lined_core::{EditorConfig, EditorCore};
///
/// let core = EditorCore::new(b"Hello\nWorld", EditorConfig::default()).unwrap();
/// assert_eq!(core.line_count(), 2);
/// assert_eq!(core.text(), b"Hello\nWorld");
/// ```
#[derive(Debug, Clone)]
pub struct EditorCore {
    buffer: TextBuffer,
    line_index: LineIndex,
    cursor: Cursor,
    selection: Option<Selection>,
    font_size: u32,
    config: EditorConfig,
    modified: bool,
}

impl EditorCore {
    /// Create an editor holding `text`, cursor at the start.
    ///
    /// `config` is validated first.
    pub fn new(text: &[u8], config: EditorConfig) -> Result<Self, CommandError> {
        config.validate()?;
        let mut core = Self::empty(config);
        core.buffer.load(text)?;
        core.line_index.rebuild(core.buffer.as_bytes())?;
        Ok(core)
    }

    /// Create an editor with an empty buffer.
    ///
    /// `config` is trusted as given; use [`EditorCore::new`] to have it validated.
    pub fn empty(config: EditorConfig) -> Self {
        Self {
            buffer: TextBuffer::with_initial_capacity(config.initial_capacity),
            line_index: LineIndex::new(),
            cursor: Cursor::default(),
            selection: None,
            font_size: config.clamp_font_size(config.font_size),
            config,
            modified: false,
        }
    }

    /// Whole document.
    pub fn text(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Whole document as text, replacing invalid UTF-8.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        self.buffer.to_string_lossy()
    }

    /// Underlying byte storage.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Line boundaries of the current content.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Total line count
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Document length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` for an empty document.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current selection, in gesture order.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Bytes covered by a non-empty selection.
    pub fn selected_bytes(&self) -> Option<&[u8]> {
        let (lo, hi) = self
            .selection
            .filter(|selection| !selection.is_empty())?
            .normalize();
        self.buffer.slice(lo, hi).ok()
    }

    /// Content of line `row`, without its terminator.
    pub fn line_bytes(&self, row: usize) -> Option<&[u8]> {
        self.line_index.line_bytes(self.buffer.as_bytes(), row)
    }

    /// Current font size (also the line height).
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Returns `true` if the buffer changed since it was loaded or last saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    fn navigator(&self) -> Navigator<'_> {
        Navigator::new(self.buffer.as_bytes(), &self.line_index)
            .with_page_lines(self.config.page_lines)
    }

    /// Place the cursor at an offset that is valid for the current line index.
    fn move_cursor_to(&mut self, offset: usize) {
        self.cursor = recompute_derived(offset, &self.line_index);
    }
}

/// Command executor
///
/// `CommandExecutor` is the main interface for the editor, responsible for:
///
/// - Execute various editor commands
/// - Keep the line index consistent with the buffer after each edit
/// - Re-derive cursor row/column after every command
///
/// # Command Types
///
/// - [`EditCommand`] - Text insertion and deletion
/// - [`CursorCommand`] - Cursor movement, selection operations
/// - [`ViewCommand`] - Font zoom
///
/// # Example
///
/// ```rust
/// use lined_core::{Command, CommandExecutor, CommandResult, CursorCommand};
///
/// let mut executor = CommandExecutor::new(b"one\ntwo\nthree").unwrap();
///
/// let result = executor.execute(Command::Cursor(CursorCommand::GotoLine { line: 2 })).unwrap();
/// assert_eq!(result, CommandResult::Success);
/// assert_eq!(executor.editor().cursor().offset(), 4);
///
/// // The last line is not addressable by line number.
/// let result = executor.execute(Command::Cursor(CursorCommand::GotoLine { line: 3 })).unwrap();
/// assert_eq!(result, CommandResult::NotPerformed);
/// ```
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    editor: EditorCore,
    /// Set by buffer mutations, cleared once the line index has been rebuilt.
    needs_rebuild: bool,
    /// Incremented after each buffer mutation.
    version: u64,
}

impl CommandExecutor {
    /// Create a new command executor
    pub fn new(text: &[u8]) -> Result<Self, CommandError> {
        Self::with_config(text, EditorConfig::default())
    }

    /// Create a command executor with explicit settings.
    pub fn with_config(text: &[u8], config: EditorConfig) -> Result<Self, CommandError> {
        Ok(Self::from_core(EditorCore::new(text, config)?))
    }

    /// Create an empty command executor
    pub fn empty() -> Self {
        Self::from_core(EditorCore::empty(EditorConfig::default()))
    }

    /// Wrap an existing editor state.
    pub fn from_core(editor: EditorCore) -> Self {
        Self {
            editor,
            needs_rebuild: false,
            version: 0,
        }
    }

    /// Get a reference to the Editor Core
    pub fn editor(&self) -> &EditorCore {
        &self.editor
    }

    /// Document version; changes whenever the buffer content changes.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Execute command
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        debug!(?command, "execute");

        let result = match command {
            Command::Edit(edit_cmd) => self.execute_edit(edit_cmd),
            Command::Cursor(cursor_cmd) => Ok(self.execute_cursor(cursor_cmd)),
            Command::View(view_cmd) => Ok(self.execute_view(view_cmd)),
        };

        // The buffer may have changed even if the command failed part-way.
        self.sync()?;

        if let Err(err) = &result
            && err.is_fatal()
        {
            error!(%err, "editing cannot continue");
        }
        result
    }

    /// Batch execute commands, stopping at the first error.
    pub fn execute_batch(
        &mut self,
        commands: impl IntoIterator<Item = Command>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        let mut results = Vec::new();

        for command in commands {
            let result = self.execute(command)?;
            results.push(result);
        }

        Ok(results)
    }

    /// Replace the whole document, as when opening a file.
    ///
    /// On failure the previous document is kept.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), CommandError> {
        let mut line_index = LineIndex::new();
        line_index.rebuild(bytes)?;
        self.editor.buffer.load(bytes)?;
        self.editor.line_index = line_index;
        self.editor.selection = None;
        self.editor.move_cursor_to(0);
        self.editor.modified = false;
        self.needs_rebuild = false;
        self.version += 1;
        Ok(())
    }

    /// Mark the current content as saved.
    pub fn mark_saved(&mut self) {
        self.editor.modified = false;
    }

    /// Rebuild the line index after a buffer mutation, then re-derive the cursor.
    fn sync(&mut self) -> Result<(), CommandError> {
        if self.needs_rebuild {
            self.editor
                .line_index
                .rebuild(self.editor.buffer.as_bytes())?;
            self.needs_rebuild = false;
            self.version += 1;
            self.editor.modified = true;
        }
        let offset = self.editor.cursor.offset();
        self.editor.move_cursor_to(offset);
        Ok(())
    }

    // Private method: execute edit command
    fn execute_edit(&mut self, command: EditCommand) -> Result<CommandResult, CommandError> {
        match command {
            EditCommand::InsertChar(byte) => self.insert_at_cursor(&[byte]),
            EditCommand::InsertNewline => self.insert_at_cursor(b"\n"),
            EditCommand::InsertTab => {
                let spaces = vec![b' '; self.editor.config.tab_width];
                self.insert_at_cursor(&spaces)
            }
            EditCommand::InsertText(text) => self.insert_at_cursor(&text),
            EditCommand::Backspace => self.execute_backspace_command(),
            EditCommand::DeleteForward => self.execute_delete_forward_command(),
            EditCommand::DeleteSelection => {
                if self.delete_selection()? {
                    Ok(CommandResult::Success)
                } else {
                    Ok(CommandResult::NotPerformed)
                }
            }
        }
    }

    fn insert_at_cursor(&mut self, bytes: &[u8]) -> Result<CommandResult, CommandError> {
        let replaced = self.delete_selection()?;
        if bytes.is_empty() {
            return Ok(if replaced {
                CommandResult::Success
            } else {
                CommandResult::NotPerformed
            });
        }

        let offset = self.editor.cursor.offset();
        self.editor.buffer.insert_bytes(offset, bytes)?;
        self.needs_rebuild = true;
        self.set_pending_cursor(offset + bytes.len());
        Ok(CommandResult::Success)
    }

    fn execute_backspace_command(&mut self) -> Result<CommandResult, CommandError> {
        if self.delete_selection()? {
            return Ok(CommandResult::Success);
        }

        let offset = self.editor.cursor.offset();
        if offset == 0 {
            return Ok(CommandResult::NotPerformed);
        }
        self.editor.buffer.delete_range(offset - 1, 1)?;
        self.needs_rebuild = true;
        self.set_pending_cursor(offset - 1);
        Ok(CommandResult::Success)
    }

    fn execute_delete_forward_command(&mut self) -> Result<CommandResult, CommandError> {
        if self.delete_selection()? {
            return Ok(CommandResult::Success);
        }

        let offset = self.editor.cursor.offset();
        if offset >= self.editor.buffer.len() {
            return Ok(CommandResult::NotPerformed);
        }
        self.editor.buffer.delete_range(offset, 1)?;
        self.needs_rebuild = true;
        Ok(CommandResult::Success)
    }

    /// Remove the selected bytes and collapse the cursor onto the start of the range.
    ///
    /// Always clears the selection. Returns `true` if any bytes were removed.
    fn delete_selection(&mut self) -> Result<bool, CommandError> {
        let Some(selection) = self.editor.selection.take() else {
            return Ok(false);
        };
        if selection.is_empty() {
            return Ok(false);
        }

        let (lo, hi) = selection.normalize();
        self.editor.buffer.delete_range(lo, hi - lo)?;
        self.needs_rebuild = true;
        self.set_pending_cursor(lo);
        Ok(true)
    }

    /// Record a cursor offset computed against the buffer as it is *after* an edit.
    ///
    /// Row and column are derived in [`Self::sync`] once the index is rebuilt.
    fn set_pending_cursor(&mut self, offset: usize) {
        self.editor.cursor = Cursor::pending(offset);
    }

    // Private method: execute cursor command
    fn execute_cursor(&mut self, command: CursorCommand) -> CommandResult {
        match command {
            CursorCommand::Move { motion, extend } => {
                let before = self.editor.cursor;
                let target = self.editor.navigator().target(before, motion);
                if extend {
                    selection::begin_or_extend(
                        &mut self.editor.selection,
                        before.offset(),
                        target,
                    );
                } else {
                    self.editor.selection = None;
                }
                self.editor.move_cursor_to(target);
                CommandResult::Success
            }
            CursorCommand::GotoLine { line } => match self.editor.navigator().goto_line(line) {
                Some(target) => {
                    self.editor.selection = None;
                    self.editor.move_cursor_to(target);
                    CommandResult::Success
                }
                None => {
                    debug!(line, line_count = self.editor.line_count(), "goto-line out of range");
                    CommandResult::NotPerformed
                }
            },
            CursorCommand::GotoLineOrEnd { line } => {
                let navigator = self.editor.navigator();
                let target = navigator
                    .goto_line(line)
                    .unwrap_or_else(|| navigator.target(self.editor.cursor, Motion::DocumentEnd));
                self.editor.selection = None;
                self.editor.move_cursor_to(target);
                CommandResult::Success
            }
            CursorCommand::SelectAll => {
                let all = selection::select_all(&self.editor.line_index);
                self.editor.selection = Some(all);
                self.editor.move_cursor_to(all.end);
                CommandResult::Success
            }
            CursorCommand::ClearSelection => {
                self.editor.selection = None;
                CommandResult::Success
            }
        }
    }

    // Private method: execute view command
    fn execute_view(&mut self, command: ViewCommand) -> CommandResult {
        let requested = match command {
            ViewCommand::ZoomIn => self.editor.font_size.saturating_add(1),
            ViewCommand::ZoomOut => self.editor.font_size.saturating_sub(1),
            ViewCommand::SetFontSize { size } => size,
        };
        let clamped = self.editor.config.clamp_font_size(requested);
        if clamped == self.editor.font_size {
            return CommandResult::NotPerformed;
        }
        self.editor.font_size = clamped;
        CommandResult::Success
    }
}
