//! # UI Module
//!
//! Terminal user interface for proofread.
//!
//! ## Components
//!
//! - [`App`] - All UI state: rules, selection, mode, inputs, current report
//! - [`keys`] - Key presses to app operations and [`keys::Effect`]s
//! - [`mod@render`] - Drawing the TUI from an [`App`]
//! - [`config`] / [`theme`] - Persisted settings and color palettes
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  PROOFREAD   [ Text ] [ File ]   server url          │
//! ├──────────────┬───────────────────────────────────────┤
//! │              │  Input (text or file path)            │
//! │   Rules      ├───────────────────┬───────────────────┤
//! │  [x] ...     │  Stats (count,    │  Corrections      │
//! │  [ ] ...     │  error types)     │  (word → fix)     │
//! │              ├───────────────────┼───────────────────┤
//! │              │  Original         │  Corrected        │
//! │              │  (highlighted)    │                   │
//! ├──────────────┴───────────────────┴───────────────────┤
//! │  status / key help                                   │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod keys;
pub mod render;
pub mod theme;

pub use app::App;
pub use render::render;
