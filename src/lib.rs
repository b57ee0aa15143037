//! # worksheet_gen
//!
//! A fully offline, deterministic maths worksheet generator.
//!
//! The library generates printable worksheets across 29 problem types, from
//! number bonds and times tables up to factorising quadratics and surds. Every
//! worksheet carries an ID that regenerates it exactly, so a teacher can hand
//! out the ID and the class sees identical problems.
//!
//! ## How it works
//!
//! 1. Build a [`WorksheetRequest`] with a type id, difficulty, count and
//!    options, or from an existing worksheet ID.
//! 2. Call [`generate_worksheet`]. The request becomes a [`WorksheetKey`],
//!    the encoded key seeds a [`Mulberry32`] stream, and the uniqueness
//!    enforcer draws problems from the selected [`WorksheetType`] until it
//!    has enough distinct questions.
//! 3. The returned [`Worksheet`] holds the ID, title, instruction and the
//!    ordered [`Problem`]s, ready for any renderer.
//!
//! ## Key features
//!
//! - **Reproducible**: the worksheet ID is the whole recipe. Old IDs for
//!   retired types (`equation1`, `equation2`) still resolve.
//! - **No repeats**: duplicates are rejected within a bounded retry budget;
//!   if a type cannot supply enough distinct problems the worksheet says so
//!   via `truncated` rather than looping.
//! - **Checked**: [`worksheet_engine::validator`] verifies every type for
//!   determinism, well-formed output and a minimum question-space size.
//!
//! ## Quick start
//!
//! ```rust
//! use worksheet_gen::{generate_worksheet, Difficulty, Registry, WorksheetRequest};
//!
//! let registry = Registry::builtin();
//!
//! // Minimal: only the type is required (defaults: normal, 20 problems, fresh ID).
//! let sheet = generate_worksheet(&registry, WorksheetRequest::new("times-tables"));
//! println!("{} ({})", sheet.title, sheet.id);
//!
//! // Full control:
//! let mut request = WorksheetRequest::new("equations");
//! request.id = Some("class7b".into());
//! request.difficulty = Difficulty::Hard;
//! request.count = 12;
//! let sheet = generate_worksheet(&registry, request);
//! assert_eq!(sheet.problems.len(), 12);
//!
//! // The ID brings the same worksheet back:
//! let again = generate_worksheet(&registry, WorksheetRequest::from_id(sheet.id.clone()));
//! assert_eq!(again.problems, sheet.problems);
//! ```

pub mod config;
pub mod games;
pub mod telemetry;
pub mod worksheet_engine;

// Convenience re-exports so callers can use `worksheet_gen::generate_worksheet`
// directly without reaching into `worksheet_engine::`.
pub use worksheet_engine::{
    generate_worksheet, generate_worksheet_with_limit, Difficulty, Mulberry32, OptionValue,
    Options, Problem, Registry, Worksheet, WorksheetKey, WorksheetRequest, WorksheetType,
};
