//! Deterministic class ordering.
//!
//! [`sort_classes`] produces the same output for any permutation of the same
//! input and is idempotent. Classes are ordered by:
//!
//! 1. number of variant segments (fewer first),
//! 2. the variant chain: breakpoints, then known pseudo-states in a fixed
//!    order, then other variants, then `group-*`, then `peer-*`,
//! 3. the full variant prefix, lexicographically,
//! 4. the [`SemanticGroup`] of the base class,
//! 5. the base class, lexicographically.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::variants::{dedupe_segments, split_variants};

/// Ordering bucket of a utility class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum SemanticGroup {
    /// Display, position, overflow, z-index.
    Layout = 1,
    /// Flexbox and grid.
    FlexGrid = 2,
    /// Width and height.
    Sizing = 3,
    /// Margin, padding, space-between.
    Spacing = 4,
    /// Fonts and text.
    Typography = 5,
    /// Backgrounds and foreground colors.
    Background = 6,
    /// Borders, radius, outlines, rings.
    Border = 7,
    /// Shadows, opacity, filters, transitions, transforms.
    Effects = 8,
    /// Everything else.
    Misc = 9,
}

const LAYOUT_EXACT: &[&str] = &[
    "container", "block", "inline-block", "inline", "hidden", "contents", "flow-root", "table",
    "static", "fixed", "absolute", "relative", "sticky", "visible", "invisible", "collapse",
];
const LAYOUT_PREFIXES: &[&str] = &[
    "table-", "inset-", "top-", "right-", "bottom-", "left-", "start-", "end-", "z-", "float-",
    "clear-", "overflow-", "overscroll-", "box-", "object-", "aspect-", "columns-", "display-",
];

const FLEX_GRID_EXACT: &[&str] = &["flex", "inline-flex", "grid", "inline-grid", "grow", "shrink"];
const FLEX_GRID_PREFIXES: &[&str] = &[
    "flex-", "grid-", "col-", "row-", "auto-cols-", "auto-rows-", "gap-", "justify-", "items-",
    "content-", "self-", "place-", "order-", "grow-", "shrink-", "basis-",
];

const SIZING_PREFIXES: &[&str] = &["w-", "h-", "min-w-", "min-h-", "max-w-", "max-h-", "size-"];

const SPACING_PREFIXES: &[&str] = &[
    "m-", "mx-", "my-", "mt-", "mr-", "mb-", "ml-", "ms-", "me-", "p-", "px-", "py-", "pt-", "pr-",
    "pb-", "pl-", "ps-", "pe-", "space-x-", "space-y-",
];

const TYPOGRAPHY_EXACT: &[&str] = &[
    "underline", "overline", "line-through", "no-underline", "uppercase", "lowercase",
    "capitalize", "normal-case", "italic", "not-italic", "truncate", "antialiased",
    "subpixel-antialiased",
];
const TYPOGRAPHY_PREFIXES: &[&str] = &[
    "font-", "leading-", "tracking-", "decoration-", "underline-offset-", "whitespace-", "break-",
    "list-", "indent-", "align-", "line-clamp-", "hyphens-",
];
const TEXT_TYPOGRAPHY: &[&str] = &[
    "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
    "left", "center", "right", "justify", "start", "end", "ellipsis", "clip", "wrap", "nowrap",
    "balance", "pretty",
];

const BACKGROUND_PREFIXES: &[&str] = &["bg-", "from-", "via-", "to-"];

const BORDER_EXACT: &[&str] = &["border", "rounded", "outline", "ring", "outline-none"];
const BORDER_PREFIXES: &[&str] = &["border-", "rounded-", "outline-", "ring-", "divide-"];

const EFFECTS_EXACT: &[&str] = &[
    "shadow", "filter", "isolate", "isolation-auto", "blur", "grayscale", "invert", "sepia",
    "drop-shadow", "transition", "transform", "backdrop-filter",
];
const EFFECTS_PREFIXES: &[&str] = &[
    "shadow-", "opacity-", "filter-", "mix-blend-", "bg-blend-", "blur-", "brightness-",
    "contrast-", "drop-shadow-", "grayscale-", "hue-rotate-", "invert-", "saturate-", "sepia-",
    "backdrop-", "transition-", "duration-", "ease-", "delay-", "animate-", "scale-", "rotate-",
    "translate-", "skew-", "origin-",
];

impl SemanticGroup {
    /// Classify a base class (without variants).
    ///
    /// Important markers and negative prefixes are ignored, and arbitrary
    /// values are classified by the prefix in front of the bracket.
    pub fn of(base: &str) -> Self {
        let name = base
            .trim_start_matches('!')
            .trim_end_matches('!')
            .trim_start_matches('-');
        let stem = match name.find("-[") {
            Some(index) => &name[..=index],
            None => name,
        };

        let matches = |exact: &[&str], prefixes: &[&str]| {
            exact.contains(&stem) || prefixes.iter().any(|p| stem.starts_with(p))
        };

        if let Some(rest) = stem.strip_prefix("text-") {
            return if is_text_color(rest, name) {
                Self::Background
            } else {
                Self::Typography
            };
        }

        if matches(FLEX_GRID_EXACT, FLEX_GRID_PREFIXES) {
            Self::FlexGrid
        } else if matches(LAYOUT_EXACT, LAYOUT_PREFIXES) {
            Self::Layout
        } else if matches(&[], SIZING_PREFIXES) {
            Self::Sizing
        } else if matches(&[], SPACING_PREFIXES) {
            Self::Spacing
        } else if matches(TYPOGRAPHY_EXACT, TYPOGRAPHY_PREFIXES) {
            Self::Typography
        } else if matches(EFFECTS_EXACT, EFFECTS_PREFIXES) {
            Self::Effects
        } else if matches(&[], BACKGROUND_PREFIXES) {
            Self::Background
        } else if matches(BORDER_EXACT, BORDER_PREFIXES) {
            Self::Border
        } else {
            Self::Misc
        }
    }

    /// Position in the fixed group order (1 to 9).
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Group name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::FlexGrid => "flex-grid",
            Self::Sizing => "sizing",
            Self::Spacing => "spacing",
            Self::Typography => "typography",
            Self::Background => "background",
            Self::Border => "border",
            Self::Effects => "effects",
            Self::Misc => "misc",
        }
    }
}

/// Whether a `text-*` suffix names a color rather than a size or alignment.
fn is_text_color(rest: &str, name: &str) -> bool {
    if rest.is_empty() {
        // text-[...]: look inside the brackets
        let inner = name
            .split_once('[')
            .map(|(_, v)| v.trim_end_matches(']'))
            .unwrap_or_default();
        return inner.starts_with('#')
            || inner.starts_with("color:")
            || ["rgb", "hsl", "oklch", "oklab", "lab(", "lch("]
                .iter()
                .any(|f| inner.starts_with(f));
    }
    !TEXT_TYPOGRAPHY.contains(&rest)
}

/// A utility class split into its variant chain and base class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassToken {
    /// Variant segments in nesting order (`["md", "hover"]`).
    pub variants: Vec<String>,
    /// The class without variants.
    pub base: String,
    /// Ordering bucket of the base class.
    pub group: SemanticGroup,
}

impl ClassToken {
    /// Create a token without variants.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            group: SemanticGroup::of(&base),
            variants: Vec::new(),
            base,
        }
    }

    /// Parse a rendered class such as `md:hover:p-4`.
    pub fn parse(class: &str) -> Self {
        let (variants, base) = split_variants(class.trim());
        Self {
            variants: variants.into_iter().map(str::to_string).collect(),
            group: SemanticGroup::of(base),
            base: base.to_string(),
        }
    }

    /// Add variants in front of the existing chain.
    pub fn with_variants<S: AsRef<str>>(mut self, variants: &[S]) -> Self {
        let mut chain: Vec<String> = variants.iter().map(|v| v.as_ref().to_string()).collect();
        chain.append(&mut self.variants);
        self.variants = chain;
        self
    }

    /// Collapse repeated variant segments to their first occurrence.
    pub fn deduped(mut self) -> Self {
        self.variants = dedupe_segments(&self.variants);
        self
    }

    /// The variant prefix without the trailing colon (`md:hover`).
    pub fn prefix(&self) -> String {
        self.variants.join(":")
    }
}

impl fmt::Display for ClassToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for variant in &self.variants {
            write!(f, "{variant}:")?;
        }
        f.write_str(&self.base)
    }
}

const BREAKPOINTS: &[&str] = &["sm", "md", "lg", "xl", "2xl"];

const STATE_ORDER: &[&str] = &[
    "first", "last", "only", "odd", "even", "first-of-type", "last-of-type", "empty", "visited",
    "target", "hover", "focus", "focus-visible", "focus-within", "active", "enabled", "disabled",
    "checked", "indeterminate", "required", "valid", "invalid", "placeholder-shown", "read-only",
];

/// Sort key of a single variant: (tier, position within tier).
fn variant_rank(variant: &str) -> (u8, usize) {
    if let Some(index) = BREAKPOINTS.iter().position(|b| *b == variant) {
        return (0, index);
    }
    if let Some(bp) = variant.strip_prefix("max-")
        && let Some(index) = BREAKPOINTS.iter().position(|b| *b == bp)
    {
        return (0, BREAKPOINTS.len() + index);
    }
    if let Some(index) = STATE_ORDER.iter().position(|s| *s == variant) {
        return (1, index);
    }
    let state_position = |state: &str| {
        STATE_ORDER
            .iter()
            .position(|s| *s == state)
            .unwrap_or(STATE_ORDER.len())
    };
    if let Some(state) = variant.strip_prefix("group-") {
        return (3, state_position(state));
    }
    if let Some(state) = variant.strip_prefix("peer-") {
        return (4, state_position(state));
    }
    (2, 0)
}

fn compare_tokens(a: &ClassToken, b: &ClassToken) -> Ordering {
    a.variants
        .len()
        .cmp(&b.variants.len())
        .then_with(|| {
            let ranks_a = a.variants.iter().map(|v| variant_rank(v));
            let ranks_b = b.variants.iter().map(|v| variant_rank(v));
            ranks_a.cmp(ranks_b)
        })
        .then_with(|| a.prefix().cmp(&b.prefix()))
        .then_with(|| a.group.cmp(&b.group))
        .then_with(|| a.base.cmp(&b.base))
}

/// Deduplicate and deterministically order a class list.
///
/// ```
/// use classwind::order::sort_classes;
///
/// let sorted = sort_classes(&["md:p-4", "hover:bg-blue-600", "flex", "md:w-1/2", "hover:hover:bg-blue-600"]);
/// assert_eq!(sorted, vec!["flex", "md:w-1/2", "md:p-4", "hover:bg-blue-600"]);
/// ```
pub fn sort_classes<S: AsRef<str>>(classes: &[S]) -> Vec<String> {
    sort_tokens(classes.iter().map(|c| ClassToken::parse(c.as_ref())))
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Deduplicate and order parsed tokens.
pub fn sort_tokens(tokens: impl IntoIterator<Item = ClassToken>) -> Vec<ClassToken> {
    let mut seen = HashSet::new();
    let mut unique: Vec<ClassToken> = tokens
        .into_iter()
        .filter(|token| !token.base.is_empty())
        .map(ClassToken::deduped)
        .filter(|token| seen.insert(token.to_string()))
        .collect();

    unique.sort_by(compare_tokens);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    #[test]
    fn group_classification() {
        assert_eq!(SemanticGroup::of("block"), SemanticGroup::Layout);
        assert_eq!(SemanticGroup::of("absolute"), SemanticGroup::Layout);
        assert_eq!(SemanticGroup::of("flex"), SemanticGroup::FlexGrid);
        assert_eq!(SemanticGroup::of("grid-cols-3"), SemanticGroup::FlexGrid);
        assert_eq!(SemanticGroup::of("w-1/2"), SemanticGroup::Sizing);
        assert_eq!(SemanticGroup::of("min-w-0"), SemanticGroup::Sizing);
        assert_eq!(SemanticGroup::of("mx-auto"), SemanticGroup::Spacing);
        assert_eq!(SemanticGroup::of("-mt-4"), SemanticGroup::Spacing);
        assert_eq!(SemanticGroup::of("space-y-2"), SemanticGroup::Spacing);
        assert_eq!(SemanticGroup::of("font-bold"), SemanticGroup::Typography);
        assert_eq!(SemanticGroup::of("text-lg"), SemanticGroup::Typography);
        assert_eq!(SemanticGroup::of("underline"), SemanticGroup::Typography);
        assert_eq!(SemanticGroup::of("bg-white"), SemanticGroup::Background);
        assert_eq!(SemanticGroup::of("rounded-lg"), SemanticGroup::Border);
        assert_eq!(SemanticGroup::of("border"), SemanticGroup::Border);
        assert_eq!(SemanticGroup::of("shadow-md"), SemanticGroup::Effects);
        assert_eq!(SemanticGroup::of("mix-blend-multiply"), SemanticGroup::Effects);
        assert_eq!(SemanticGroup::of("isolate"), SemanticGroup::Effects);
        assert_eq!(SemanticGroup::of("cursor-pointer"), SemanticGroup::Misc);
    }

    #[test]
    fn text_color_is_not_typography() {
        assert_eq!(SemanticGroup::of("text-blue-600"), SemanticGroup::Background);
        assert_eq!(SemanticGroup::of("text-[#ff0000]"), SemanticGroup::Background);
        assert_eq!(SemanticGroup::of("text-[13px]"), SemanticGroup::Typography);
        assert_eq!(SemanticGroup::of("text-center"), SemanticGroup::Typography);
    }

    #[test]
    fn arbitrary_values_group_by_prefix() {
        assert_eq!(SemanticGroup::of("m-[13px]"), SemanticGroup::Spacing);
        assert_eq!(SemanticGroup::of("w-[calc(100%-2rem)]"), SemanticGroup::Sizing);
        assert_eq!(SemanticGroup::of("bg-[url(a.png)]"), SemanticGroup::Background);
        assert_eq!(SemanticGroup::of("!p-4"), SemanticGroup::Spacing);
    }

    #[test]
    fn token_round_trip() {
        let token = ClassToken::parse("md:hover:bg-[url(a:b)]");
        assert_eq!(token.variants, vec!["md", "hover"]);
        assert_eq!(token.base, "bg-[url(a:b)]");
        assert_eq!(token.group, SemanticGroup::Background);
        assert_eq!(token.to_string(), "md:hover:bg-[url(a:b)]");
    }

    #[test]
    fn variant_scenario() {
        let sorted = sort_classes(&["md:p-4", "hover:bg-blue-600", "flex", "md:w-1/2"]);
        assert_eq!(sorted, vec!["flex", "md:w-1/2", "md:p-4", "hover:bg-blue-600"]);
    }

    #[test]
    fn groups_order_unvarianted_classes() {
        let sorted = sort_classes(&["shadow", "p-4", "text-lg", "block", "rounded", "bg-white", "w-4", "flex"]);
        assert_eq!(
            sorted,
            vec!["block", "flex", "w-4", "p-4", "text-lg", "bg-white", "rounded", "shadow"]
        );
    }

    #[test]
    fn variant_precedence() {
        let sorted = sort_classes(&[
            "peer-focus:p-1",
            "group-hover:p-1",
            "focus:p-1",
            "hover:p-1",
            "lg:p-1",
            "sm:p-1",
            "first:p-1",
            "dark:p-1",
        ]);
        assert_eq!(
            sorted,
            vec![
                "sm:p-1",
                "lg:p-1",
                "first:p-1",
                "hover:p-1",
                "focus:p-1",
                "dark:p-1",
                "group-hover:p-1",
                "peer-focus:p-1",
            ]
        );
    }

    #[test]
    fn repeated_segments_collapse() {
        assert_eq!(sort_classes(&["hover:hover:text-x"]), vec!["hover:text-x"]);
        assert_eq!(
            sort_classes(&["hover:focus:hover:bg-y", "hover:focus:bg-y"]),
            vec!["hover:focus:bg-y"]
        );
    }

    #[test]
    fn duplicates_collapse() {
        let classes = ["p-4", "m-2", "md:flex", "hover:underline"];
        let doubled: Vec<&str> = classes.iter().chain(classes.iter()).copied().collect();
        assert_eq!(sort_classes(&doubled), sort_classes(&classes));
    }

    #[test]
    fn sorting_is_deterministic_and_idempotent() {
        let classes = vec![
            "md:p-4", "hover:bg-blue-600", "flex", "md:w-1/2", "p-2", "m-2", "text-sm",
            "lg:hover:underline", "group-hover:opacity-50", "peer-checked:block", "mt-[3px]",
            "rounded", "border", "shadow", "sm:grid", "dark:bg-gray-900", "focus:ring",
        ];
        let expected = sort_classes(&classes);
        assert_eq!(sort_classes(&expected), expected);

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let mut shuffled = classes.clone();
            shuffled.shuffle(&mut rng);
            assert_eq!(sort_classes(&shuffled), expected);
        }
    }

    #[test]
    fn empty_input() {
        assert!(sort_classes::<&str>(&[]).is_empty());
        assert!(sort_classes(&["", "  "]).is_empty());
    }
}
