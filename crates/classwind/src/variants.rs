//! Variant composition.
//!
//! Variants are conditional prefixes on a utility class (`md:`, `hover:`,
//! `group-hover:`). This module applies a declaration's variant list to its
//! generated classes, splits rendered classes back into variant segments, and
//! derives variant names from selectors and media queries.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::{FrameworkVersion, MatchingContext};
use crate::normalize::{BASE_FONT_SIZE_PX, to_pixels};
use crate::order::ClassToken;

/// Prefix every class with the variant chain, in the given order.
///
/// Variants already present on a class stay after the new ones. An empty
/// variant list or class list returns the classes unchanged.
///
/// ```
/// use classwind::variants::apply_variants;
///
/// let classes = vec!["p-4".to_string(), "hover:bg-white".to_string()];
/// let tokens = apply_variants(&["md"], &classes);
/// let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, vec!["md:p-4", "md:hover:bg-white"]);
/// ```
pub fn apply_variants<S: AsRef<str>>(variants: &[S], classes: &[String]) -> Vec<ClassToken> {
    classes
        .iter()
        .map(|class| {
            let mut token = ClassToken::parse(class);
            if !variants.is_empty() {
                let mut chain: Vec<String> = variants.iter().map(|v| v.as_ref().to_string()).collect();
                chain.append(&mut token.variants);
                token.variants = chain;
            }
            token
        })
        .collect()
}

/// Split a rendered class into its variant segments and base class.
///
/// Colons inside brackets or parentheses (arbitrary values and arbitrary
/// variants) do not split.
pub fn split_variants(class: &str) -> (Vec<&str>, &str) {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, ch) in class.char_indices() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                segments.push(&class[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    (segments, &class[start..])
}

/// Collapse repeated variant segments to their first occurrence.
///
/// `hover:focus:hover` becomes `hover:focus`; distinct segments keep their
/// relative order.
pub fn dedupe_segments<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(segments.len());
    for segment in segments {
        let segment = segment.as_ref();
        if !segment.is_empty() && !seen.iter().any(|s| s == segment) {
            seen.push(segment.to_string());
        }
    }
    seen
}

/// A selector with its state pseudo-classes lifted out as variants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorVariants {
    /// The selector without the converted pseudo-classes.
    pub base: String,
    /// Variant names, group/peer variants first.
    pub variants: Vec<String>,
}

/// Extract variants from a selector.
///
/// Pseudo-classes and pseudo-elements on the subject become plain variants
/// (`.btn:hover` gives `hover`). State on an ancestor `.group` or sibling
/// `.peer` becomes `group-*` or `peer-*`. Unknown pseudos stay in the base.
///
/// ```
/// use classwind::variants::variants_from_selector;
///
/// let extracted = variants_from_selector(".group:hover .card:first-child");
/// assert_eq!(extracted.base, ".group .card");
/// assert_eq!(extracted.variants, vec!["group-hover", "first"]);
/// ```
pub fn variants_from_selector(selector: &str) -> SelectorVariants {
    let compounds = split_compounds(selector);
    let last = compounds.len().saturating_sub(1);
    let mut base = String::new();
    let mut relational = Vec::new();
    let mut subject = Vec::new();

    for (index, (combinator, compound)) in compounds.iter().enumerate() {
        let (stripped, names) = lift_pseudos(compound);
        let kept = if index == last {
            subject.extend(names);
            stripped
        } else if let Some((marker, label)) = relational_marker(&stripped) {
            let label = label.map(|label| format!("/{label}")).unwrap_or_default();
            relational.extend(names.into_iter().map(|name| format!("{marker}-{name}{label}")));
            stripped
        } else {
            compound.clone()
        };
        base.push_str(combinator);
        base.push_str(&kept);
    }

    relational.extend(subject);
    SelectorVariants {
        base,
        variants: dedupe_segments(&relational),
    }
}

/// Find a `.group`/`.peer` marker class, with its name for `.group\/name`.
fn relational_marker(compound: &str) -> Option<(&'static str, Option<String>)> {
    let find = |marker: &'static str| {
        compound.split('.').skip(1).find_map(|class| {
            if class == marker {
                Some((marker, None))
            } else {
                class
                    .strip_prefix(marker)
                    .and_then(|rest| rest.strip_prefix("\\/"))
                    .filter(|label| !label.is_empty())
                    .map(|label| (marker, Some(label.to_string())))
            }
        })
    };
    find("group").or_else(|| find("peer"))
}

/// Split a selector into compounds, each paired with its leading combinator.
fn split_compounds(selector: &str) -> Vec<(String, String)> {
    let mut compounds = Vec::new();
    let mut combinator = String::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in selector.trim().chars() {
        let is_combinator = depth == 0 && (ch.is_whitespace() || matches!(ch, '>' | '+' | '~'));
        if is_combinator {
            if !current.is_empty() {
                compounds.push((std::mem::take(&mut combinator), std::mem::take(&mut current)));
            }
            if !ch.is_whitespace() {
                combinator = format!(" {ch} ");
            } else if combinator.is_empty() {
                combinator = " ".to_string();
            }
            continue;
        }
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        current.push(ch);
    }
    if !current.is_empty() {
        compounds.push((combinator, current));
    }
    if let Some(first) = compounds.first_mut() {
        first.0.clear();
    }
    compounds
}

/// Remove convertible pseudo-classes from a compound selector.
fn lift_pseudos(compound: &str) -> (String, Vec<String>) {
    let mut kept = String::new();
    let mut names = Vec::new();
    let mut depth = 0usize;
    let mut pieces: Vec<String> = vec![String::new()];

    for ch in compound.chars() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                let previous_is_colon = pieces.last().is_some_and(|p| p == ":");
                if !previous_is_colon {
                    pieces.push(String::new());
                }
            }
            _ => {}
        }
        if let Some(piece) = pieces.last_mut() {
            piece.push(ch);
        }
    }

    for (index, piece) in pieces.into_iter().enumerate() {
        if index == 0 {
            kept.push_str(&piece);
            continue;
        }
        match pseudo_variant(piece.trim_start_matches(':')) {
            Some(name) => names.push(name.to_string()),
            None => kept.push_str(&piece),
        }
    }
    (kept, names)
}

fn pseudo_variant(pseudo: &str) -> Option<&'static str> {
    Some(match pseudo.to_ascii_lowercase().as_str() {
        "hover" => "hover",
        "focus" => "focus",
        "focus-visible" => "focus-visible",
        "focus-within" => "focus-within",
        "active" => "active",
        "visited" => "visited",
        "target" => "target",
        "disabled" => "disabled",
        "enabled" => "enabled",
        "checked" => "checked",
        "indeterminate" => "indeterminate",
        "required" => "required",
        "invalid" => "invalid",
        "valid" => "valid",
        "read-only" => "read-only",
        "placeholder-shown" => "placeholder-shown",
        "empty" => "empty",
        "first-child" => "first",
        "last-child" => "last",
        "only-child" => "only",
        "first-of-type" => "first-of-type",
        "last-of-type" => "last-of-type",
        "nth-child(odd)" | "nth-child(2n+1)" => "odd",
        "nth-child(even)" | "nth-child(2n)" => "even",
        "before" => "before",
        "after" => "after",
        "placeholder" => "placeholder",
        "selection" => "selection",
        "marker" => "marker",
        "first-line" => "first-line",
        "first-letter" => "first-letter",
        "file-selector-button" => "file",
        _ => return None,
    })
}

static MIN_WIDTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\s*min-width\s*:\s*([0-9.]+(?:px|rem|em)?)\s*\)").expect("media pattern is valid")
});

/// Map a media query to a variant name.
///
/// `min-width` queries map to the breakpoint whose width matches, looked up in
/// the screens scale of the active layer. Color-scheme, motion and print
/// queries map to `dark`, `motion-reduce`/`motion-safe` and `print`.
pub fn variant_for_media(query: &str, context: &MatchingContext) -> Option<String> {
    let lowered = query.to_ascii_lowercase();
    if lowered.contains("prefers-color-scheme") && lowered.contains("dark") {
        return Some("dark".to_string());
    }
    if lowered.contains("prefers-reduced-motion") {
        return Some(if lowered.contains("no-preference") {
            "motion-safe"
        } else {
            "motion-reduce"
        }
        .to_string());
    }
    if lowered.trim() == "print" {
        return Some("print".to_string());
    }

    let width = MIN_WIDTH.captures(query)?.get(1)?.as_str();
    let width_px = to_pixels(width, BASE_FONT_SIZE_PX)?;

    let layers = match context.version() {
        FrameworkVersion::Current => [context.current(), context.legacy()],
        FrameworkVersion::Legacy => [context.legacy(), context.legacy()],
    };
    layers.into_iter().find_map(|layer| {
        layer
            .screens
            .iter()
            .find(|(_, value)| to_pixels(value, BASE_FONT_SIZE_PX) == Some(width_px))
            .map(|(key, _)| key.to_string())
    })
}
