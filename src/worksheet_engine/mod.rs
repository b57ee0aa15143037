//! Core worksheet engine: seeded generation, dedup, IDs and the type registry.
//!
//! ## Module overview
//!
//! | Module         | Purpose |
//! |----------------|---------|
//! | `rng`          | Mulberry32 PRNG and the string-to-seed hash |
//! | `helpers`      | Integer helpers: ranges, shuffling, gcd/lcm, primes, pools |
//! | `format`       | Pure formatting: minus glyph, fractions, powers, surds, algebra |
//! | `models`       | Shared types: problems, difficulty, options, worksheets |
//! | `types`        | The `WorksheetType` trait and every problem type |
//! | `unique`       | Uniqueness enforcer with the bounded retry budget |
//! | `worksheet_id` | Encode/decode of reproducible worksheet IDs |
//! | `registry`     | Registered types, master list and display groups |
//! | `validator`    | Offline consistency checks over the registry |
//! | `generator`    | Single entry point `generate_worksheet()` |
//! | `answer_key`   | Answer-key lines and the JSON export |

pub mod answer_key;
pub mod format;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod registry;
pub mod rng;
pub mod types;
pub mod unique;
pub mod validator;
pub mod worksheet_id;

pub use generator::{generate_worksheet, generate_worksheet_with_limit, WorksheetRequest};
pub use models::{Difficulty, OptionValue, Options, Problem, Worksheet};
pub use registry::Registry;
pub use rng::Mulberry32;
pub use types::WorksheetType;
pub use worksheet_id::WorksheetKey;
