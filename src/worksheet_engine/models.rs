use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy   => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard   => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy"   => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard"   => Ok(Difficulty::Hard),
            other    => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// One user-tunable knob value. Checkboxes are `Bool`, selects are `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
}

impl OptionValue {
    pub fn text(s: impl Into<String>) -> Self {
        OptionValue::Text(s.into())
    }

    pub fn as_bool(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Text(s) => matches!(s.as_str(), "1" | "true"),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            OptionValue::Bool(b) => if *b { "1".into() } else { "0".into() },
            OptionValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// Flat option map. Sorted keys keep worksheet IDs stable.
pub type Options = BTreeMap<String, OptionValue>;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OptionKind {
    /// `values` are `(value, label)` pairs in display order.
    Select { values: &'static [(&'static str, &'static str)], default: &'static str },
    Checkbox { default: bool },
}

/// Declares one option a problem type accepts.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OptionSpec {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: OptionKind,
}

impl OptionSpec {
    pub fn default_value(&self) -> OptionValue {
        match self.kind {
            OptionKind::Select { default, .. } => OptionValue::text(default),
            OptionKind::Checkbox { default }   => OptionValue::Bool(default),
        }
    }

    /// Every value this option can take, in display order.
    pub fn all_values(&self) -> Vec<OptionValue> {
        match self.kind {
            OptionKind::Select { values, .. } => values.iter().map(|(v, _)| OptionValue::text(*v)).collect(),
            OptionKind::Checkbox { .. }       => vec![OptionValue::Bool(false), OptionValue::Bool(true)],
        }
    }

    /// Coerce a raw value to this option's kind; `None` if it does not fit.
    fn coerce(&self, raw: &OptionValue) -> Option<OptionValue> {
        match self.kind {
            OptionKind::Checkbox { .. } => match raw {
                OptionValue::Bool(b) => Some(OptionValue::Bool(*b)),
                OptionValue::Text(s) => match s.as_str() {
                    "1" | "true"  => Some(OptionValue::Bool(true)),
                    "0" | "false" => Some(OptionValue::Bool(false)),
                    _ => None,
                },
            },
            OptionKind::Select { values, .. } => {
                let text = raw.as_text();
                values.iter().any(|(v, _)| *v == text).then(|| OptionValue::Text(text))
            }
        }
    }
}

/// Effective options for a type: every declared option present, defaults
/// filled in, values coerced to the declared kind, unknown keys dropped.
pub fn resolve_options(specs: &[OptionSpec], options: &Options) -> Options {
    specs
        .iter()
        .map(|spec| {
            let value = options
                .get(spec.id)
                .and_then(|raw| spec.coerce(raw))
                .unwrap_or_else(|| spec.default_value());
            (spec.id.to_string(), value)
        })
        .collect()
}

/// Read one option as text, falling back to the spec default.
pub fn option_text(specs: &[OptionSpec], options: &Options, id: &str) -> String {
    resolve_options(specs, options)
        .get(id)
        .map(OptionValue::as_text)
        .unwrap_or_default()
}

/// Read one checkbox option, falling back to the spec default.
pub fn option_flag(specs: &[OptionSpec], options: &Options, id: &str) -> bool {
    resolve_options(specs, options)
        .get(id)
        .map(OptionValue::as_bool)
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Problem
// ---------------------------------------------------------------------------

/// One question/answer unit.
///
/// At least one of `question`/`question_html` and one of `answer`/`answer_html`
/// are set. `answer_prefix` is only used when rendering the answer key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_key_html: Option<String>,
}

impl Problem {
    /// Plain-text question and answer.
    pub fn text(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Problem {
            question: Some(question.into()),
            answer: Some(answer.into()),
            ..Problem::default()
        }
    }

    /// Markup question and answer, with plain-text versions alongside.
    pub fn html(
        question: impl Into<String>, question_html: impl Into<String>,
        answer: impl Into<String>, answer_html: impl Into<String>,
    ) -> Self {
        Problem {
            question: Some(question.into()),
            question_html: Some(question_html.into()),
            answer: Some(answer.into()),
            answer_html: Some(answer_html.into()),
            ..Problem::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.answer_prefix = Some(prefix.into());
        self
    }

    pub fn with_key_html(mut self, key_html: impl Into<String>) -> Self {
        self.answer_key_html = Some(key_html.into());
        self
    }

    /// Key used to decide whether two problems are the same question.
    ///
    /// Taken from `question_html`, else `question`, else the whole problem as
    /// JSON; never from the answer. Whitespace runs collapse to one space.
    pub fn dedup_key(&self) -> String {
        let raw = match (&self.question_html, &self.question) {
            (Some(html), _) => html.clone(),
            (None, Some(text)) => text.clone(),
            (None, None) => serde_json::to_string(self).unwrap_or_default(),
        };
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn is_well_formed(&self) -> bool {
        let present = |f: &Option<String>| f.as_deref().is_some_and(|s| !s.trim().is_empty());
        (present(&self.question) || present(&self.question_html))
            && (present(&self.answer) || present(&self.answer_html))
    }
}

// ---------------------------------------------------------------------------
// Worksheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    /// Reproducibility key; regenerating from it yields this exact worksheet.
    pub id: String,
    pub type_id: String,
    pub label: String,
    pub title: String,
    pub instruction: Option<String>,
    pub difficulty: Difficulty,
    pub options: Options,
    pub problems: Vec<Problem>,
    /// Not enough distinct problems were found; some are repeated.
    pub truncated: bool,
}
