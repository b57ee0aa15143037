//! Problem-type generators grouped by theme.
//!
//! Every problem type is a unit struct implementing [`WorksheetType`]. The
//! trait takes `&self`, so a type has no state of its own: the only thing
//! that changes between calls is the RNG stream passed in. That is what makes
//! a worksheet ID reproducible.
//!
//! All types follow the same rule: compute the answer from "nice" values
//! first, then derive the question from it.
//!
//! | Module        | Types |
//! |---------------|-------|
//! | `arithmetic`  | addition, subtraction, multiplication, division, negative numbers, order of operations, comparison |
//! | `facts`       | times tables, squares, number bonds, doubles and halves, shapes |
//! | `fractions`   | simplifying, adding, fraction of an amount |
//! | `percentages` | percentage of an amount, percentage change, ratio sharing |
//! | `number`      | rounding, place value, HCF/LCM, prime factors, powers, sequences, mean |
//! | `algebra`     | equations, expanding brackets, factorising quadratics, surds |

use rand::RngCore;

use crate::worksheet_engine::models::{Difficulty, OptionSpec, Options, Problem};

pub mod algebra;
pub mod arithmetic;
pub mod facts;
pub mod fractions;
pub mod number;
pub mod percentages;

/// One problem family.
pub trait WorksheetType: Send + Sync {
    /// Stable identifier stored in worksheet IDs. Renaming breaks old IDs.
    fn id(&self) -> &'static str;

    fn label(&self) -> &'static str;

    /// Exactly `count` problems. Duplicates are allowed; the uniqueness
    /// enforcer deals with them. Must not panic for any difficulty or for an
    /// empty `options` map.
    fn generate(
        &self,
        rng: &mut dyn RngCore,
        difficulty: Difficulty,
        count: usize,
        options: &Options,
    ) -> Vec<Problem>;

    fn instruction(&self, _options: &Options) -> Option<String> {
        None
    }

    fn print_title(&self, _options: &Options) -> String {
        self.label().to_string()
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[]
    }

    /// Fixed small question sets that cannot reach the distinct-problem floor.
    fn pool_exempt(&self) -> bool {
        false
    }
}
