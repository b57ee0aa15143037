//! Offline consistency checker for the registry and every problem type.
//!
//! Run by the `worksheet check` command and by the crate tests. It catches
//! the mistakes that do not show up as compile errors: a type missing from
//! the menu, a generator that panics or returns the wrong number of
//! problems, non-deterministic output, and question spaces too small to fill
//! a worksheet without repeats.

use std::collections::HashSet;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::worksheet_engine::{
    models::{Difficulty, Options, Problem},
    registry::Registry,
    rng::Mulberry32,
    types::WorksheetType,
};

/// Knobs for [`check_registry`]; the `[validator]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Problems generated per type, difficulty and option variation.
    pub samples: usize,
    /// Distinct dedup keys required among `samples` problems.
    pub min_distinct: usize,
    /// Seed string for the sampling runs.
    pub seed: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig { samples: 50, min_distinct: 20, seed: "check".to_string() }
    }
}

/// One problem found by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub type_id: String,
    pub difficulty: Option<Difficulty>,
    /// `"defaults"` or `"key=value"` for the option variation that failed.
    pub variant: Option<String>,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.type_id)?;
        if let Some(d) = self.difficulty {
            write!(f, " [{d}]")?;
        }
        if let Some(v) = &self.variant {
            write!(f, " ({v})")?;
        }
        write!(f, ": {}", self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub types_checked: usize,
    pub runs: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// The default options plus every single-option change from them.
pub fn option_variants(ty: &dyn WorksheetType) -> Vec<(String, Options)> {
    let mut variants = vec![("defaults".to_string(), Options::new())];
    for spec in ty.options() {
        let default = spec.default_value();
        for value in spec.all_values().into_iter().filter(|v| *v != default) {
            let label = format!("{}={value}", spec.id);
            let mut options = Options::new();
            options.insert(spec.id.to_string(), value);
            variants.push((label, options));
        }
    }
    variants
}

pub fn check_registry(registry: &Registry, config: &ValidatorConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_listing(registry, &mut report.issues);

    for ty in registry.types() {
        report.types_checked += 1;
        for difficulty in Difficulty::ALL {
            for (label, options) in option_variants(ty) {
                report.runs += 1;
                let before = report.issues.len();
                check_run(ty, difficulty, &label, &options, config, &mut report.issues);
                debug!(
                    target: "worksheet",
                    type_id = ty.id(),
                    difficulty = %difficulty,
                    variant = %label,
                    issues = report.issues.len() - before,
                    "validated"
                );
            }
        }
    }
    report
}

/// Master list, display groups and registered types agree with each other.
fn check_listing(registry: &Registry, issues: &mut Vec<Issue>) {
    let listing_issue = |type_id: &str, message: String| Issue {
        type_id: type_id.to_string(),
        difficulty: None,
        variant: None,
        message,
    };

    let mut seen = HashSet::new();
    for &id in registry.master_list() {
        if !seen.insert(id) {
            issues.push(listing_issue(id, "listed twice in the master list".into()));
        }
        if registry.get(id).is_none() {
            issues.push(listing_issue(id, "in the master list but not registered".into()));
        }
        if registry.group_of(id).is_none() {
            issues.push(listing_issue(id, "in the master list but in no display group".into()));
        }
    }

    let mut registered = HashSet::new();
    for ty in registry.types() {
        if !registered.insert(ty.id()) {
            issues.push(listing_issue(ty.id(), "registered twice".into()));
        }
        if !registry.master_list().contains(&ty.id()) {
            issues.push(listing_issue(ty.id(), "registered but missing from the master list".into()));
        }
    }

    for group in registry.groups() {
        for &id in group.type_ids {
            if !registry.master_list().contains(&id) {
                issues.push(listing_issue(id, format!("in group \"{}\" but not in the master list", group.name)));
            }
        }
    }
}

fn sample(ty: &dyn WorksheetType, difficulty: Difficulty, options: &Options, config: &ValidatorConfig) -> Result<Vec<Problem>, String> {
    let mut rng = Mulberry32::from_seed_str(&config.seed);
    catch_unwind(AssertUnwindSafe(|| ty.generate(&mut rng, difficulty, config.samples, options))).map_err(|payload| {
        payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string())
    })
}

fn check_run(
    ty: &dyn WorksheetType,
    difficulty: Difficulty,
    label: &str,
    options: &Options,
    config: &ValidatorConfig,
    issues: &mut Vec<Issue>,
) {
    let mut push = |message: String| {
        issues.push(Issue {
            type_id: ty.id().to_string(),
            difficulty: Some(difficulty),
            variant: Some(label.to_string()),
            message,
        })
    };

    let first = match sample(ty, difficulty, options, config) {
        Ok(problems) => problems,
        Err(panic) => {
            push(format!("generator panicked: {panic}"));
            return;
        }
    };

    if first.len() != config.samples {
        push(format!("asked for {} problems, got {}", config.samples, first.len()));
    }

    for (i, problem) in first.iter().enumerate() {
        if !problem.is_well_formed() {
            push(format!("problem {i} is missing a question or an answer"));
        }
        if let Some(bad) = bad_answer(problem) {
            push(format!("problem {i}: {bad}"));
        }
    }

    match sample(ty, difficulty, options, config) {
        Ok(second) if second != first => push("same seed produced different problems".into()),
        Ok(_) => {}
        Err(panic) => push(format!("generator panicked on rerun: {panic}")),
    }

    if !ty.pool_exempt() {
        let distinct = first.iter().map(Problem::dedup_key).collect::<HashSet<_>>().len();
        if distinct < config.min_distinct {
            push(format!(
                "only {distinct} distinct problems in {} (need {})",
                config.samples, config.min_distinct
            ));
        }
    }
}

/// Answers that render as `NaN` or as a fraction over 1.
fn bad_answer(problem: &Problem) -> Option<String> {
    let fields = [&problem.answer, &problem.answer_html, &problem.answer_key_html];
    for field in fields.into_iter().flatten() {
        if field.contains("NaN") || field.contains("Infinity") {
            return Some(format!("answer is not a number: {field}"));
        }
        if field.contains("/1 ") || field.ends_with("/1") || field.contains("<sub>1</sub>") {
            return Some(format!("fraction answer over 1: {field}"));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    use crate::worksheet_engine::{
        registry::Group,
        types::{arithmetic::Addition, number::Rounding},
    };

    struct Broken;

    impl WorksheetType for Broken {
        fn id(&self) -> &'static str { "broken" }
        fn label(&self) -> &'static str { "Broken" }

        fn generate(&self, rng: &mut dyn RngCore, d: Difficulty, count: usize, _o: &Options) -> Vec<Problem> {
            if d == Difficulty::Hard {
                panic!("hard is not implemented");
            }
            // Short by one, with a tiny question space and fraction-over-one answers.
            (1..count)
                .map(|_| {
                    let n = rng.next_u32() % 3;
                    Problem::text(format!("{n} ="), format!("{n}/1"))
                })
                .collect()
        }
    }

    #[test]
    fn builtin_registry_is_clean() {
        let report = check_registry(&Registry::builtin(), &ValidatorConfig::default());
        let issues: Vec<String> = report.issues.iter().map(ToString::to_string).collect();
        assert!(report.is_clean(), "{issues:#?}");
        assert_eq!(report.types_checked, Registry::builtin().len());
    }

    #[test]
    fn listing_mismatches_are_reported() {
        let registry = Registry::new(
            vec![&Addition as &dyn WorksheetType, &Rounding],
            vec!["addition", "addition", "ghost"],
            vec![Group { name: "Arithmetic", type_ids: &["addition", "orphan"] }],
        );
        let mut issues = Vec::new();
        check_listing(&registry, &mut issues);
        let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
        assert!(messages.iter().any(|m| m.starts_with("addition: listed twice")));
        assert!(messages.iter().any(|m| m.starts_with("ghost: in the master list but not registered")));
        assert!(messages.iter().any(|m| m.starts_with("rounding: registered but missing")));
        assert!(messages.iter().any(|m| m.starts_with("orphan: in group")));
    }

    #[test]
    fn broken_generators_are_reported() {
        let registry = Registry::new(vec![&Broken as &dyn WorksheetType], vec!["broken"], vec![Group { name: "Misc", type_ids: &["broken"] }]);
        let report = check_registry(&registry, &ValidatorConfig::default());
        let messages: Vec<String> = report.issues.iter().map(ToString::to_string).collect();
        assert!(messages.iter().any(|m| m.contains("[hard]") && m.contains("panicked")));
        assert!(messages.iter().any(|m| m.contains("asked for 50 problems, got 49")));
        assert!(messages.iter().any(|m| m.contains("fraction answer over 1")));
        assert!(messages.iter().any(|m| m.contains("distinct problems")));
    }

    #[test]
    fn variants_cover_each_non_default_value() {
        let variants = option_variants(&Rounding);
        let labels: Vec<&str> = variants.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["defaults", "roundTo=10", "roundTo=100", "roundTo=1000"]);
        assert_eq!(option_variants(&Addition).len(), 1);
    }
}
