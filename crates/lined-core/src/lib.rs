#![warn(missing_docs)]
//! Lined Core - Headless Line-Oriented Text Editor Kernel
//!
//! # Overview
//!
//! `lined-core` holds the state of a small text editor: the document bytes, the line
//! boundaries, a cursor, an optional selection and the scroll position of the window
//! showing them. It does not draw anything, read the keyboard or talk to the OS
//! clipboard; the host supplies those through the traits in [`platform`] and feeds key
//! presses in as [`Command`] values.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditorSession (file, clipboard, viewport)  │  ← Host API
//! ├─────────────────────────────────────────────┤
//! │  CommandExecutor / EditorCore               │  ← Commands
//! ├─────────────────────────────────────────────┤
//! │  Cursor navigation & Selection              │  ← Motions
//! ├─────────────────────────────────────────────┤
//! │  Line Index                                 │  ← Line Access
//! ├─────────────────────────────────────────────┤
//! │  TextBuffer over DynArray<u8>               │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Using Command Interface
//!
//! ```rust
//! use lined_core::{Command, CommandExecutor, CursorCommand, EditCommand, Motion};
//!
//! let mut executor = CommandExecutor::new(b"hello\nworld").unwrap();
//!
//! executor.execute(Command::Cursor(CursorCommand::Move {
//!     motion: Motion::LineDown,
//!     extend: false,
//! })).unwrap();
//! executor.execute(Command::Edit(EditCommand::InsertChar(b'>'))).unwrap();
//!
//! assert_eq!(executor.editor().text(), b"hello\n>world");
//! assert_eq!(executor.editor().cursor().row(), 1);
//! ```
//!
//! ## Using a Session
//!
//! ```rust
//! use lined_core::{EditorConfig, EditorSession};
//!
//! let session = EditorSession::new(EditorConfig::default()).unwrap();
//! let state = session.document_state();
//! println!("Line count: {}, Bytes: {}", state.line_count, state.byte_count);
//! ```
//!
//! # Module Description
//!
//! - [`dyn_array`] - Growable array with fallible, doubling growth
//! - [`storage`] - Contiguous byte buffer
//! - [`line_index`] - Line boundary table, rebuilt after every edit
//! - [`cursor`] - Cursor model and navigation
//! - [`selection`] - Anchor/active selection
//! - [`viewport`] - Scroll-to-cursor rules
//! - [`commands`] - Unified command interface
//! - [`session`] - File, clipboard and rendering state
//! - [`platform`] - Host collaborator traits
//! - [`config`] - Tunable settings
//!
//! # Text Model
//!
//! - The document is a plain byte sequence; offsets, columns and motions count bytes
//! - `\n` is the only line terminator
//! - Display width comes from [`TextMeasure`]; the default measure uses `unicode-width`

pub mod commands;
pub mod config;
pub mod cursor;
pub mod dyn_array;
pub mod line_index;
pub mod platform;
pub mod selection;
pub mod session;
pub mod storage;
pub mod viewport;

pub use commands::{
    Command, CommandError, CommandExecutor, CommandResult, CursorCommand, EditCommand,
    EditorCore, ViewCommand,
};
pub use config::{ConfigError, EditorConfig};
pub use cursor::{Cursor, Motion, Navigator, recompute_derived};
pub use dyn_array::DynArray;
pub use line_index::{Line, LineIndex};
pub use platform::{
    Clipboard, FsPersistence, MemoryClipboard, MonospaceMeasure, Persistence, TextMeasure,
};
pub use selection::{Selection, SelectionDirection};
pub use session::{
    CursorState, DocumentState, EditorSession, Notification, RenderLine, SessionCommand,
    SessionError, ViewportState,
};
pub use storage::{StorageError, TextBuffer};
pub use viewport::{ScreenPoint, ViewportScroll, ViewportSize};
