//! CSS value normalization.
//!
//! Every other component compares values in their normalized form, so the
//! functions here are total: they never fail and return an empty or neutral
//! value for empty input.
//!
//! # Example
//!
//! ```
//! use classwind::normalize::{normalize, to_pixels, expand_box_shorthand};
//!
//! assert_eq!(normalize("  1.5REM "), "1.5rem");
//! assert_eq!(normalize("Helvetica Neue"), "Helvetica Neue");
//! assert_eq!(to_pixels("1.5rem", 16.0), Some(24.0));
//! assert_eq!(expand_box_shorthand("1px 2px"), ["1px", "2px", "1px", "2px"]);
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Default root font size used for rem/em conversion.
pub const BASE_FONT_SIZE_PX: f64 = 16.0;

const NUMBER: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)";

static PIXEL: LazyLock<Regex> = LazyLock::new(|| unit_regex("px"));
static REM: LazyLock<Regex> = LazyLock::new(|| unit_regex("rem"));
static EM: LazyLock<Regex> = LazyLock::new(|| unit_regex("em"));
static PERCENT: LazyLock<Regex> = LazyLock::new(|| unit_regex("%"));
static BARE_NUMBER: LazyLock<Regex> = LazyLock::new(|| unit_regex(""));
static LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^({NUMBER})(px|rem|em)?$")).expect("length pattern is valid")
});

fn unit_regex(unit: &str) -> Regex {
    Regex::new(&format!("(?i)^{NUMBER}{}$", regex::escape(unit))).expect("unit pattern is valid")
}

/// Normalize a raw CSS value.
///
/// Whitespace is trimmed and inner runs are collapsed to a single space. The
/// value is lower-cased unless case is significant: function calls and
/// custom-property references (anything with a parenthesis), quoted strings,
/// and capitalized proper nouns such as font family names keep their case.
pub fn normalize(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if has_quote(trimmed) {
        return trimmed.to_string();
    }

    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    if preserves_case(&collapsed) {
        collapsed
    } else {
        collapsed.to_lowercase()
    }
}

fn has_quote(value: &str) -> bool {
    value.contains('"') || value.contains('\'')
}

fn preserves_case(value: &str) -> bool {
    if value.contains('(') || has_quote(value) {
        return true;
    }
    let mut chars = value.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(first), Some(second)) if first.is_uppercase() && second.is_lowercase()
    )
}

/// Whether the value is a pixel length (`12px`).
pub fn is_pixel(value: &str) -> bool {
    PIXEL.is_match(value.trim())
}

/// Whether the value is a rem length (`1.5rem`).
pub fn is_rem(value: &str) -> bool {
    REM.is_match(value.trim())
}

/// Whether the value is an em length (`2em`).
pub fn is_em(value: &str) -> bool {
    EM.is_match(value.trim())
}

/// Whether the value is a percentage (`50%`).
pub fn is_percent(value: &str) -> bool {
    PERCENT.is_match(value.trim())
}

/// Whether the value is a unitless number (`1.25`).
pub fn is_bare_number(value: &str) -> bool {
    BARE_NUMBER.is_match(value.trim())
}

/// Parse a unitless number.
pub fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if is_bare_number(value) {
        value.parse().ok()
    } else {
        None
    }
}

/// Convert a length to pixels.
///
/// Handles `px`, `rem`, `em` (relative to `base_font_size_px`) and bare
/// numbers, which are taken as pixels. Percentages, viewport units and
/// anything else are unconvertible and yield `None`.
pub fn to_pixels(value: &str, base_font_size_px: f64) -> Option<f64> {
    let caps = LENGTH.captures(value.trim())?;
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2).map(|m| m.as_str().to_ascii_lowercase());

    match unit.as_deref() {
        None | Some("px") => Some(number),
        Some("rem") | Some("em") => Some(number * base_font_size_px),
        _ => None,
    }
}

/// Split a value on top-level whitespace, keeping parenthesized and bracketed
/// groups such as `calc(1px + 2px)` intact.
pub fn split_top_level(value: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in value.trim().chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, '(' | '[') => {
                depth += 1;
                current.push(ch);
            }
            (None, ')' | ']') => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            (None, c) if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            (None, c) => current.push(c),
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Expand a box shorthand (`margin`, `padding`, `inset`, ...) to
/// `[top, right, bottom, left]`.
///
/// Follows the CSS one-to-four value rule. Values beyond the fourth are
/// dropped. Empty input yields four empty strings.
pub fn expand_box_shorthand(value: &str) -> [String; 4] {
    let mut parts = split_top_level(value);
    parts.truncate(4);

    match parts.as_slice() {
        [] => Default::default(),
        [all] => [all.clone(), all.clone(), all.clone(), all.clone()],
        [vertical, horizontal] => [
            vertical.clone(),
            horizontal.clone(),
            vertical.clone(),
            horizontal.clone(),
        ],
        [top, horizontal, bottom] => [
            top.clone(),
            horizontal.clone(),
            bottom.clone(),
            horizontal.clone(),
        ],
        [top, right, bottom, left, ..] => [top.clone(), right.clone(), bottom.clone(), left.clone()],
    }
}

/// Normalize a color value.
///
/// Short hex forms expand to their long form (`#abc` to `#aabbcc`, `#abcd`
/// to `#aabbccdd`) and hex digits are lower-cased. Functional notations have
/// their function name lower-cased and the whitespace around parentheses,
/// commas and slashes removed. Named colors are only trimmed and lower-cased.
pub fn normalize_color(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    if let Some(hex) = value.strip_prefix('#') {
        return normalize_hex(hex).unwrap_or_else(|| value.to_ascii_lowercase());
    }

    if let Some(open) = value.find('(')
        && value.ends_with(')')
    {
        let name = value[..open].trim().to_ascii_lowercase();
        return format!("{name}{}", compact_arguments(&value[open..]));
    }

    value.to_ascii_lowercase()
}

fn normalize_hex(hex: &str) -> Option<String> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let hex = hex.to_ascii_lowercase();
    match hex.len() {
        3 | 4 => Some(format!(
            "#{}",
            hex.chars().flat_map(|c| [c, c]).collect::<String>()
        )),
        6 | 8 => Some(format!("#{hex}")),
        _ => None,
    }
}

fn compact_arguments(arguments: &str) -> String {
    let mut out = String::with_capacity(arguments.len());
    let mut pending_space = false;

    for ch in arguments.chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space
            && !out.ends_with(['(', ',', '/'])
            && !matches!(ch, ')' | ',' | '/')
        {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }
    out
}
