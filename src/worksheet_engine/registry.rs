use tracing::warn;

use crate::worksheet_engine::types::{
    algebra, arithmetic, facts, fractions, number, percentages, WorksheetType,
};

/// A display group: a heading in the type picker and the ids listed under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub name: &'static str,
    pub type_ids: &'static [&'static str],
}

static BUILTIN_TYPES: &[&dyn WorksheetType] = &[
    &arithmetic::Addition,
    &arithmetic::Subtraction,
    &arithmetic::Multiplication,
    &arithmetic::Division,
    &arithmetic::NegativeNumbers,
    &arithmetic::OrderOfOperations,
    &arithmetic::CompareNumbers,
    &facts::TimesTables,
    &facts::SquareNumbers,
    &facts::NumberBonds,
    &facts::DoublesHalves,
    &fractions::SimplifyFractions,
    &fractions::FractionAddition,
    &fractions::FractionOfAmount,
    &percentages::PercentageOfAmount,
    &percentages::PercentageChange,
    &percentages::RatioSharing,
    &number::Rounding,
    &number::PlaceValue,
    &number::HcfLcm,
    &number::PrimeFactorisation,
    &number::Powers,
    &number::Sequences,
    &number::Mean,
    &algebra::Equations,
    &algebra::ExpandingBrackets,
    &algebra::FactorisingQuadratics,
    &algebra::SimplifySurds,
    &facts::Shapes,
];

/// Master list: every id the UI offers, in menu order.
const BUILTIN_MASTER: &[&str] = &[
    "addition", "subtraction", "multiplication", "division", "negative-numbers",
    "order-of-operations", "compare-numbers",
    "times-tables", "square-numbers", "number-bonds", "doubles-halves",
    "simplify-fractions", "fraction-addition", "fraction-of-amount",
    "percentage-of-amount", "percentage-change", "ratio-sharing",
    "rounding", "place-value", "hcf-lcm", "prime-factorisation", "powers", "sequences", "mean",
    "equations", "expanding-brackets", "factorising-quadratics", "simplify-surds",
    "shapes",
];

const BUILTIN_GROUPS: &[Group] = &[
    Group {
        name: "Arithmetic",
        type_ids: &[
            "addition", "subtraction", "multiplication", "division", "negative-numbers",
            "order-of-operations", "compare-numbers",
        ],
    },
    Group {
        name: "Number facts",
        type_ids: &["times-tables", "square-numbers", "number-bonds", "doubles-halves"],
    },
    Group {
        name: "Fractions & percentages",
        type_ids: &[
            "simplify-fractions", "fraction-addition", "fraction-of-amount",
            "percentage-of-amount", "percentage-change", "ratio-sharing",
        ],
    },
    Group {
        name: "Number",
        type_ids: &["rounding", "place-value", "hcf-lcm", "prime-factorisation", "powers", "sequences", "mean"],
    },
    Group {
        name: "Algebra",
        type_ids: &["equations", "expanding-brackets", "factorising-quadratics", "simplify-surds"],
    },
    Group {
        name: "Geometry",
        type_ids: &["shapes"],
    },
];

pub const DEFAULT_TYPE: &str = "addition";

/// The set of problem types a worksheet can be generated from.
///
/// Built at compile time from static tables; nothing is discovered at
/// runtime. The master list and groups exist separately from the type table
/// so the validator can catch a type that was written but never listed.
#[derive(Clone)]
pub struct Registry {
    types: Vec<&'static dyn WorksheetType>,
    master: Vec<&'static str>,
    groups: Vec<Group>,
    default_type: String,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::builtin()
    }
}

impl Registry {
    /// Every shipped problem type.
    pub fn builtin() -> Self {
        Registry::new(BUILTIN_TYPES.to_vec(), BUILTIN_MASTER.to_vec(), BUILTIN_GROUPS.to_vec())
    }

    pub fn new(
        types: Vec<&'static dyn WorksheetType>,
        master: Vec<&'static str>,
        groups: Vec<Group>,
    ) -> Self {
        Registry { types, master, groups, default_type: DEFAULT_TYPE.to_string() }
    }

    /// Type used when a request names an unknown id.
    pub fn with_default_type(mut self, type_id: impl Into<String>) -> Self {
        self.default_type = type_id.into();
        self
    }

    pub fn default_type_id(&self) -> &str {
        &self.default_type
    }

    pub fn get(&self, type_id: &str) -> Option<&'static dyn WorksheetType> {
        self.types.iter().copied().find(|t| t.id() == type_id)
    }

    /// Look up `type_id`, falling back to the default type when it is not
    /// registered. Never fails.
    pub fn resolve(&self, type_id: &str) -> &'static dyn WorksheetType {
        if let Some(ty) = self.get(type_id) {
            return ty;
        }
        warn!(
            target: "worksheet",
            requested = type_id,
            fallback = %self.default_type,
            "unknown worksheet type; using default"
        );
        self.get(&self.default_type)
            .or_else(|| self.types.first().copied())
            .unwrap_or(&arithmetic::Addition)
    }

    /// Registered types in table order.
    pub fn types(&self) -> impl Iterator<Item = &'static dyn WorksheetType> + '_ {
        self.types.iter().copied()
    }

    pub fn master_list(&self) -> &[&'static str] {
        &self.master
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// First display group listing `type_id`.
    pub fn group_of(&self, type_id: &str) -> Option<&'static str> {
        self.groups.iter().find(|g| g.type_ids.contains(&type_id)).map(|g| g.name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_types_are_all_listed() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), registry.master_list().len());
        for ty in registry.types() {
            assert!(registry.master_list().contains(&ty.id()), "{} not in master list", ty.id());
            assert!(registry.group_of(ty.id()).is_some(), "{} not in any group", ty.id());
        }
    }

    #[test]
    fn unknown_types_fall_back_to_the_default() {
        let registry = Registry::builtin();
        assert_eq!(registry.resolve("no-such-type").id(), "addition");
        assert_eq!(registry.resolve("equations").id(), "equations");

        let registry = registry.with_default_type("times-tables");
        assert_eq!(registry.resolve("").id(), "times-tables");
    }

    #[test]
    fn bad_default_still_resolves() {
        let registry = Registry::builtin().with_default_type("nope");
        assert_eq!(registry.resolve("also-nope").id(), "addition");
    }

    #[test]
    fn groups_name_the_display_headings() {
        let registry = Registry::builtin();
        assert_eq!(registry.group_of("simplify-surds"), Some("Algebra"));
        assert_eq!(registry.group_of("shapes"), Some("Geometry"));
        assert_eq!(registry.group_of("equation1"), None);
    }
}
