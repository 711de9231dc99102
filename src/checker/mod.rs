//! # Checker Module
//!
//! Everything that talks to, or interprets answers from, the remote checking
//! service.
//!
//! | Piece | Module |
//! |-------|--------|
//! | Wire types (`Rule`, `CheckResult`, ...) | [`model`] |
//! | HTTP client and the [`CheckService`] seam | [`client`] |
//! | Background jobs and [`Completion`]s | [`dispatcher`] |
//! | Segment-based highlighting, HTML escaping | [`highlight`] |
//! | Display-ready [`Report`] | [`report`] |
//! | Writing `corrected_text.txt` | [`export`] |
//!
//! The service exposes three endpoints:
//!
//! ```text
//! GET  /get_rules   -> [{ "name": "..." }]
//! POST /check       <- { "text": "...", "rules": ["..."] }
//! POST /upload      <- multipart: file, rules*
//! ```

pub mod client;
pub mod dispatcher;
pub mod export;
pub mod highlight;
pub mod model;
pub mod report;

pub use client::{CheckService, HttpCheckService, DEFAULT_SERVER_URL};
pub use dispatcher::{run_job, Completion, Dispatcher, Job, Outcome};
pub use export::{export_corrected, EXPORT_FILE_NAME};
pub use highlight::{escape_html, highlight, to_html, Segment};
pub use model::{CheckRequest, CheckResult, Rule, Stats, TextError, UploadRequest};
pub use report::Report;
