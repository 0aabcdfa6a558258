//! Rule assembly.
//!
//! The [`Converter`] drives every declaration of a [`CssRule`] through the
//! matcher table, applies variants and important modifiers, then hands the
//! collected classes to the orderer and the warnings to the reporter.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::context::{FrameworkVersion, MatchingContext};
use crate::logging::targets;
use crate::matcher::{BuiltinMatchers, PropertyMatcher, property_category};
use crate::normalize::normalize;
use crate::order::{ClassToken, sort_tokens};
use crate::report::{
    CategoryCoverage, CoverageStats, SELECTOR_ADVISORY, StylesheetSummary, WarningCategory,
    aggregate_warnings, calculate_coverage, no_handler_warning, summarize,
};
use crate::resolve::{ResolutionCache, Resolver};
use crate::variants::{apply_variants, variants_from_selector};

static IMPORTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*!\s*important\s*$").expect("important pattern is valid"));

static SIMPLE_SELECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[.#]?-?[A-Za-z_][\w-]*$").expect("selector pattern is valid")
});

/// A single property/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Property name.
    pub property: String,
    /// Raw value, without the `!important` flag.
    pub value: String,
    /// Variants attached to this declaration only.
    pub variants: Vec<String>,
    /// Whether the declaration carried `!important`.
    pub important: bool,
}

impl Declaration {
    /// Create a declaration. A trailing `!important` is split off the value.
    ///
    /// ```
    /// use classwind::assemble::Declaration;
    ///
    /// let declaration = Declaration::new("margin", "1rem !important");
    /// assert_eq!(declaration.value, "1rem");
    /// assert!(declaration.important);
    /// ```
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let (value, important) = match IMPORTANT.find(&value) {
            Some(found) => (value[..found.start()].to_string(), true),
            None => (value, false),
        };
        Self {
            property: property.into(),
            value,
            variants: Vec::new(),
            important,
        }
    }

    /// Attach variants to this declaration.
    pub fn with_variants<S: AsRef<str>>(mut self, variants: &[S]) -> Self {
        self.variants
            .extend(variants.iter().map(|variant| variant.as_ref().to_string()));
        self
    }

    /// Mark the declaration as important.
    pub fn important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }
}

/// A selector with its declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CssRule {
    /// The rule's selector.
    pub selector: String,
    /// Variants applied to every declaration, outermost first.
    pub variants: Vec<String>,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl CssRule {
    /// Create an empty rule.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            ..Default::default()
        }
    }

    /// Append a declaration.
    pub fn declaration(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration::new(property, value));
        self
    }

    /// Append a prepared declaration.
    pub fn push(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Append a rule-wide variant (a breakpoint from an enclosing media query, say).
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variants.push(variant.into());
        self
    }

    /// Move pseudo-classes of the selector into rule variants.
    ///
    /// ```
    /// use classwind::assemble::CssRule;
    ///
    /// let rule = CssRule::new(".btn:hover").variant("md").lift_selector_variants();
    /// assert_eq!(rule.selector, ".btn");
    /// assert_eq!(rule.variants, vec!["md", "hover"]);
    /// ```
    pub fn lift_selector_variants(mut self) -> Self {
        let extracted = variants_from_selector(&self.selector);
        self.selector = extracted.base;
        self.variants.extend(extracted.variants);
        self
    }
}

/// Outcome of transforming one rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleResult {
    /// The rule's selector.
    pub selector: String,
    /// Sorted, deduplicated classes.
    pub classes: Vec<String>,
    /// Deduplicated warnings.
    pub warnings: Vec<String>,
    /// Warning counts per category, before deduplication.
    pub warnings_by_category: BTreeMap<WarningCategory, usize>,
    /// Declaration coverage.
    pub coverage: CoverageStats,
}

/// Transforms CSS rules into utility classes.
pub struct Converter {
    context: MatchingContext,
    cache: ResolutionCache,
    matchers: Box<dyn PropertyMatcher>,
}

impl Converter {
    /// Create a converter using the built-in matchers.
    pub fn new(context: MatchingContext) -> Self {
        Self::with_matchers(context, BuiltinMatchers)
    }

    /// Create a converter using a custom matcher table.
    pub fn with_matchers(context: MatchingContext, matchers: impl PropertyMatcher + 'static) -> Self {
        Self {
            context,
            cache: ResolutionCache::new(),
            matchers: Box::new(matchers),
        }
    }

    /// The context rules are resolved against.
    pub fn context(&self) -> &MatchingContext {
        &self.context
    }

    /// Drop memoized resolutions.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn resolver(&self) -> Resolver<'_> {
        let resolver = Resolver::new(&self.context);
        if self.context.config().cache {
            resolver.with_cache(&self.cache)
        } else {
            resolver
        }
    }

    /// Transform one rule.
    pub fn transform_rule(&self, rule: &CssRule) -> RuleResult {
        let resolver = self.resolver();
        let version = self.context.version();

        let mut tokens: Vec<ClassToken> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();
        let mut categories: BTreeMap<String, CategoryCoverage> = BTreeMap::new();
        let (mut matched, mut non_arbitrary) = (0, 0);

        for declaration in &rule.declarations {
            let value = normalize(&declaration.value);
            let category = categories
                .entry(property_category(&declaration.property).to_string())
                .or_default();
            category.total += 1;

            let output = self
                .matchers
                .match_property(&declaration.property, &value, &resolver);
            warnings.extend(output.warnings);

            if output.classes.is_empty() {
                tracing::trace!(
                    target: targets::ASSEMBLE,
                    property = %declaration.property,
                    value = %value,
                    "no handler"
                );
                warnings.push(no_handler_warning(&declaration.property, &value));
                continue;
            }

            matched += 1;
            category.matched += 1;
            if !output.classes.iter().any(|class| is_arbitrary(class)) {
                non_arbitrary += 1;
            }

            let mut chain = rule.variants.clone();
            chain.extend(declaration.variants.iter().cloned());
            let mut applied = apply_variants(&chain, &output.classes);
            if declaration.important {
                for token in &mut applied {
                    token.base = important(&token.base, version);
                }
            }
            tokens.extend(applied);
        }

        if needs_selector_advisory(&rule.selector) {
            warnings.push(SELECTOR_ADVISORY.to_string());
        }

        let total = rule.declarations.len();
        let aggregated = aggregate_warnings(&warnings);
        let classes: Vec<String> = sort_tokens(tokens)
            .iter()
            .map(ToString::to_string)
            .collect();

        tracing::debug!(
            target: targets::ASSEMBLE,
            selector = %rule.selector,
            matched,
            total,
            classes = classes.len(),
            warnings = aggregated.warnings.len(),
            "rule transformed"
        );

        RuleResult {
            selector: rule.selector.clone(),
            classes,
            warnings: aggregated.warnings,
            warnings_by_category: aggregated.by_category,
            coverage: calculate_coverage(matched, total, non_arbitrary, Some(categories)),
        }
    }

    /// Transform several rules independently.
    pub fn transform_rules(&self, rules: &[CssRule]) -> Vec<RuleResult> {
        rules.iter().map(|rule| self.transform_rule(rule)).collect()
    }

    /// Transform several rules and merge the results.
    pub fn transform_stylesheet(&self, rules: &[CssRule]) -> StylesheetSummary {
        summarize(&self.transform_rules(rules))
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("context", &self.context)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Render the important modifier for a base class.
fn important(base: &str, version: FrameworkVersion) -> String {
    if base.starts_with('!') || base.ends_with('!') {
        return base.to_string();
    }
    match version {
        FrameworkVersion::Legacy => format!("!{base}"),
        FrameworkVersion::Current => format!("{base}!"),
    }
}

fn is_arbitrary(class: &str) -> bool {
    class.contains("-[")
}

fn needs_selector_advisory(selector: &str) -> bool {
    let selector = selector.trim();
    !(selector.is_empty() || selector.starts_with('*') || SIMPLE_SELECTOR.is_match(selector))
}
