//! Worksheet ID codec.
//!
//! An ID is `baseId|type|difficulty|count`, optionally followed by
//! `|key=value,key=value`. Booleans are written `1`/`0`; text values are
//! percent-encoded the way a browser's `encodeURIComponent` would, so `|`,
//! `,` and `=` inside a value never collide with the separators.
//!
//! IDs are persisted and shared, so the format is frozen. The only rewrites
//! are the legacy equation aliases applied while decoding.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::worksheet_engine::models::{Difficulty, OptionValue, Options};

/// Everything needed to regenerate a worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetKey {
    pub base_id: String,
    pub type_id: String,
    pub difficulty: Difficulty,
    pub count: usize,
    pub options: Options,
}

impl WorksheetKey {
    pub fn encode(&self) -> String {
        encode(&self.base_id, &self.type_id, self.difficulty, self.count, &self.options)
    }
}

/// Type ids that were retired in favour of `equations` plus an option.
const LEGACY_ALIASES: &[(&str, &str, &str, &str)] = &[
    ("equation1", "equations", "equationMode", "one"),
    ("equation2", "equations", "equationMode", "two"),
];

pub fn encode(base_id: &str, type_id: &str, difficulty: Difficulty, count: usize, options: &Options) -> String {
    let mut id = format!("{base_id}|{type_id}|{difficulty}|{count}");
    if !options.is_empty() {
        let pairs: Vec<String> = options
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    OptionValue::Bool(true) => "1".to_string(),
                    OptionValue::Bool(false) => "0".to_string(),
                    OptionValue::Text(s) => percent_encode(s),
                };
                format!("{}={value}", percent_encode(key))
            })
            .collect();
        id.push('|');
        id.push_str(&pairs.join(","));
    }
    id
}

/// Parse an ID back into its key. `None` for anything malformed: fewer than
/// four segments, a count that is not plain decimal digits, an unknown
/// difficulty, or a broken percent escape.
pub fn decode(id: &str) -> Option<WorksheetKey> {
    let mut segments = id.splitn(5, '|');
    let base_id = segments.next()?.to_string();
    let mut type_id = segments.next()?.to_string();
    let difficulty: Difficulty = segments.next()?.parse().ok()?;
    let count = segments.next()?;
    // Canonical digits only, so a decoded key re-encodes to the same ID.
    let canonical = !count.is_empty()
        && count.bytes().all(|b| b.is_ascii_digit())
        && (count == "0" || !count.starts_with('0'));
    if !canonical {
        return None;
    }
    let count: usize = count.parse().ok()?;
    // splitn keeps any further `|` inside the final segment.
    let mut options = match segments.next() {
        Some(csv) => decode_options(csv)?,
        None => Options::new(),
    };

    if let Some(&(_, to, key, value)) = LEGACY_ALIASES.iter().find(|(from, ..)| *from == type_id) {
        type_id = to.to_string();
        options.insert(key.to_string(), OptionValue::text(value));
    }

    Some(WorksheetKey { base_id, type_id, difficulty, count, options })
}

fn decode_options(csv: &str) -> Option<Options> {
    let mut options = Options::new();
    for pair in csv.split(',').filter(|p| !p.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = match value {
            "1" => OptionValue::Bool(true),
            "0" => OptionValue::Bool(false),
            other => OptionValue::Text(percent_decode(other)?),
        };
        options.insert(percent_decode(key)?, value);
    }
    Some(options)
}

/// Characters `encodeURIComponent` leaves alone.
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Inverse of [`percent_encode`]. `None` on a truncated escape, a non-hex
/// digit, or bytes that are not UTF-8.
pub fn percent_decode(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = s.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

const BASE_ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const BASE_ID_LEN: usize = 8;

/// A random base id drawn from `rng`.
pub fn base_id_from<R: Rng>(rng: &mut R) -> String {
    (0..BASE_ID_LEN)
        .map(|_| BASE_ID_CHARS[rng.gen_range(0..BASE_ID_CHARS.len())] as char)
        .collect()
}

/// A fresh base id from OS entropy.
pub fn fresh_base_id() -> String {
    base_id_from(&mut StdRng::from_entropy())
}
