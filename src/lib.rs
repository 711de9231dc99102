//! proofread - a terminal client for a remote grammar and style checker
//!
//! This library provides the rule selection, request dispatch, result
//! highlighting and export pieces, plus the TUI built on top of them. The
//! checking itself happens on the server.

pub mod checker;
pub mod logging;
pub mod ui;
