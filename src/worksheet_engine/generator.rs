use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::worksheet_engine::{
    models::{resolve_options, Difficulty, Options, Worksheet},
    registry::Registry,
    rng::Mulberry32,
    unique::generate_unique,
    worksheet_id::{decode, fresh_base_id, WorksheetKey},
};

/// Requests above this many problems are clamped.
pub const DEFAULT_MAX_COUNT: usize = 200;

/// What the caller asks for.
///
/// When `id` is an existing worksheet ID it wins entirely and the other
/// fields are ignored, so the same worksheet comes back. Any other `id` text
/// is used as the base id for a new worksheet with the given parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetRequest {
    pub id: Option<String>,
    pub type_id: String,
    pub difficulty: Difficulty,
    pub count: usize,
    pub options: Options,
}

impl WorksheetRequest {
    /// A fresh worksheet of `type_id` with default difficulty and count.
    pub fn new(type_id: impl Into<String>) -> Self {
        WorksheetRequest {
            id: None,
            type_id: type_id.into(),
            difficulty: Difficulty::Normal,
            count: 20,
            options: Options::new(),
        }
    }

    /// Regenerate the worksheet behind an existing ID.
    pub fn from_id(id: impl Into<String>) -> Self {
        WorksheetRequest { id: Some(id.into()), ..WorksheetRequest::new("") }
    }
}

/// Work out the reproducibility key for a request.
fn request_key(request: WorksheetRequest) -> WorksheetKey {
    let base_id = match request.id {
        Some(raw) => {
            if let Some(key) = decode(raw.trim()) {
                return key;
            }
            // `|` would split the encoded ID in the wrong place.
            let cleaned: String = raw.trim().chars().filter(|&c| c != '|').collect();
            debug!(target: "worksheet", raw = %raw, "id did not decode; using it as a base id");
            if cleaned.is_empty() { fresh_base_id() } else { cleaned }
        }
        None => fresh_base_id(),
    };
    WorksheetKey {
        base_id,
        type_id: request.type_id,
        difficulty: request.difficulty,
        count: request.count,
        options: request.options,
    }
}

/// Build a worksheet. Never fails: unknown types fall back to the
/// registry default and short question spaces come back `truncated`.
pub fn generate_worksheet(registry: &Registry, request: WorksheetRequest) -> Worksheet {
    generate_worksheet_with_limit(registry, request, DEFAULT_MAX_COUNT)
}

/// [`generate_worksheet`] with a caller-chosen count ceiling.
pub fn generate_worksheet_with_limit(registry: &Registry, request: WorksheetRequest, max_count: usize) -> Worksheet {
    let mut key = request_key(request);

    let ty = registry.resolve(&key.type_id);
    key.type_id = ty.id().to_string();
    key.options = resolve_options(ty.options(), &key.options);
    key.count = key.count.min(max_count);

    // The whole ID seeds the stream, so changing any part of it changes the
    // problems, and regenerating from the ID reproduces them.
    let id = key.encode();
    let mut rng = Mulberry32::from_seed_str(&id);
    let batch = generate_unique(ty, &mut rng, key.difficulty, key.count, &key.options);

    info!(
        target: "worksheet",
        id = %id,
        type_id = ty.id(),
        difficulty = %key.difficulty,
        count = batch.problems.len(),
        truncated = batch.truncated,
        "worksheet generated"
    );

    Worksheet {
        id,
        type_id: key.type_id,
        label: ty.label().to_string(),
        title: ty.print_title(&key.options),
        instruction: ty.instruction(&key.options),
        difficulty: key.difficulty,
        options: key.options,
        problems: batch.problems,
        truncated: batch.truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::models::OptionValue;

    #[test]
    fn regenerating_from_the_id_is_identical() {
        let registry = Registry::builtin();
        let mut request = WorksheetRequest::new("fraction-addition");
        request.options.insert("mixedNumbers".into(), OptionValue::Bool(true));
        let first = generate_worksheet(&registry, request);
        let again = generate_worksheet(&registry, WorksheetRequest::from_id(first.id.clone()));
        assert_eq!(again.id, first.id);
        assert_eq!(again.problems, first.problems);
        assert_eq!(again.options, first.options);
    }

    #[test]
    fn fresh_ids_carry_resolved_options() {
        let registry = Registry::builtin();
        let sheet = generate_worksheet(&registry, WorksheetRequest::new("subtraction"));
        assert!(sheet.id.ends_with("|subtraction|normal|20|allowNegatives=0"), "{}", sheet.id);
        assert_eq!(sheet.id.split('|').next().map(str::len), Some(8));
    }

    #[test]
    fn undecodable_id_becomes_the_base_id() {
        let registry = Registry::builtin();
        let mut request = WorksheetRequest::new("addition");
        request.id = Some("my|class".into());
        request.count = 5;
        let sheet = generate_worksheet(&registry, request.clone());
        assert_eq!(sheet.id, "myclass|addition|normal|5");
        assert_eq!(generate_worksheet(&registry, request).problems, sheet.problems);
    }

    #[test]
    fn unknown_type_falls_back_and_count_is_clamped() {
        let registry = Registry::builtin();
        let mut request = WorksheetRequest::new("calculus");
        request.id = Some("abc".into());
        request.count = 10_000;
        let sheet = generate_worksheet_with_limit(&registry, request, 30);
        assert_eq!(sheet.type_id, "addition");
        assert_eq!(sheet.problems.len(), 30);
        assert_eq!(sheet.id, "abc|addition|normal|30");
    }

    #[test]
    fn legacy_ids_regenerate_as_equations() {
        let registry = Registry::builtin();
        let sheet = generate_worksheet(&registry, WorksheetRequest::from_id("abc|equation2|easy|10"));
        assert_eq!(sheet.type_id, "equations");
        assert_eq!(sheet.title, "Two-Step Equations");
        assert_eq!(sheet.id, "abc|equations|easy|10|equationMode=two");
        assert_eq!(sheet.problems.len(), 10);
    }
}
