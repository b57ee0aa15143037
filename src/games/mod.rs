//! Mini-game rules as plain state machines.
//!
//! Rendering, input and timers belong to the caller. Each game is one owned
//! value with methods that apply a player action and report the result.
//!
//! | Module      | Game |
//! |-------------|------|
//! | `scores`    | Top-5 high-score boards and their storage keys |
//! | `simon`     | Repeat a growing pad sequence |
//! | `drill`     | Timed addition drill with streak bonuses |
//! | `target`    | Pick tiles that sum to a target |
//! | `buzzer`    | First-to-buzz quiz for several players |
//! | `challenge` | Typed-answer run drawn from any worksheet type |

pub mod buzzer;
pub mod challenge;
pub mod drill;
pub mod scores;
pub mod simon;
pub mod target;
