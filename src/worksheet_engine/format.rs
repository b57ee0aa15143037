//! String formatting for questions and answers.
//!
//! All pure functions of their numeric input. Negative numbers always use the
//! minus glyph `−` (U+2212), never the ASCII hyphen, so equal values format
//! identically wherever they appear and dedup keys stay comparable.

use crate::worksheet_engine::helpers::reduce;

pub const MINUS: char = '\u{2212}';
pub const TIMES: char = '\u{00D7}';
pub const DIVIDE: char = '\u{00F7}';

/// `-5` → `"−5"`.
pub fn signed(n: i64) -> String {
    if n < 0 {
        format!("{MINUS}{}", n.unsigned_abs())
    } else {
        n.to_string()
    }
}

/// Negative numbers in brackets, for use as an operand: `(−5)`.
pub fn operand(n: i64) -> String {
    if n < 0 { format!("({})", signed(n)) } else { n.to_string() }
}

/// Thousands separators: `47382` → `"47,382"`.
pub fn with_commas(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 { format!("{MINUS}{out}") } else { out }
}

/// Unicode superscript digits: `12` → `"¹²"`.
pub fn superscript(n: u32) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    n.to_string()
        .chars()
        .map(|c| DIGITS[c.to_digit(10).unwrap_or(0) as usize])
        .collect()
}

pub fn power_text(base: i64, exp: u32) -> String {
    format!("{}{}", operand(base), superscript(exp))
}

pub fn power_html(base: i64, exp: u32) -> String {
    format!("{}<sup>{exp}</sup>", operand(base))
}

/// Stacked fraction markup, exactly as given (no reduction).
pub fn fraction_html(n: i64, d: i64) -> String {
    let sign = if (n < 0) != (d < 0) && n != 0 { MINUS.to_string() } else { String::new() };
    format!(
        "{sign}<span class=\"frac\"><sup>{}</sup>&frasl;<sub>{}</sub></span>",
        n.unsigned_abs(),
        d.unsigned_abs()
    )
}

pub fn fraction_text(n: i64, d: i64) -> String {
    let sign = if (n < 0) != (d < 0) && n != 0 { MINUS.to_string() } else { String::new() };
    format!("{sign}{}/{}", n.unsigned_abs(), d.unsigned_abs())
}

/// A fraction-valued answer: reduced, and a whole number when the
/// denominator reduces to 1. Returns `(text, html)`.
pub fn fraction_answer(n: i64, d: i64) -> (String, String) {
    let (n, d) = reduce(n, d);
    if d == 1 {
        let s = signed(n);
        return (s.clone(), s);
    }
    (fraction_text(n, d), fraction_html(n, d))
}

/// Like [`fraction_answer`], but improper fractions become mixed numbers.
pub fn mixed_answer(n: i64, d: i64) -> (String, String) {
    let (n, d) = reduce(n, d);
    let whole = n.abs() / d;
    let rest = n.abs() % d;
    if d == 1 || whole == 0 || rest == 0 {
        return fraction_answer(n, d);
    }
    let sign = if n < 0 { MINUS.to_string() } else { String::new() };
    (
        format!("{sign}{whole} {rest}/{d}"),
        format!("{sign}{whole}{}", fraction_html(rest, d)),
    )
}

/// Surd in LaTeX: `coef·√radicand`, omitting a unit coefficient or radicand.
pub fn surd_latex(coef: i64, radicand: i64) -> String {
    match (coef, radicand) {
        (_, 1) => signed(coef),
        (1, r) => format!("\\sqrt{{{r}}}"),
        (-1, r) => format!("{MINUS}\\sqrt{{{r}}}"),
        (c, r) => format!("{}\\sqrt{{{r}}}", signed(c)),
    }
}

/// A leading algebraic term: `1x` → `x`, `-1x` → `−x`, `0x` → `0`.
pub fn term(coef: i64, var: &str) -> String {
    match coef {
        0 => "0".to_string(),
        1 if !var.is_empty() => var.to_string(),
        -1 if !var.is_empty() => format!("{MINUS}{var}"),
        c => format!("{}{var}", signed(c)),
    }
}

/// Join terms into an expression with ` + ` / ` − ` between them. Zero terms
/// after the first are dropped; the leading term keeps its sign.
pub fn expression(terms: &[(i64, &str)]) -> String {
    let mut out = String::new();
    for &(coef, var) in terms {
        if out.is_empty() {
            if coef != 0 {
                out = term(coef, var);
            }
            continue;
        }
        if coef == 0 {
            continue;
        }
        let op = if coef < 0 { MINUS } else { '+' };
        out.push_str(&format!(" {op} {}", term(coef.abs(), var)));
    }
    if out.is_empty() { "0".to_string() } else { out }
}

/// `(x + 3)` / `(x − 3)` / `(x)`.
pub fn linear_factor(var: &str, constant: i64) -> String {
    format!("({})", expression(&[(1, var), (constant, "")]))
}
