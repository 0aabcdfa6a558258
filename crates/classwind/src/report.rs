//! Coverage statistics and warning aggregation.
//!
//! Warnings are plain strings. Their category is recovered by looking for a
//! fixed marker phrase; every marker lives in this module, next to the
//! constructors that embed it and the one function that classifies them.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::Result;
use crate::assemble::RuleResult;
use crate::logging::targets;

const ARBITRARY_MARKER: &str = "arbitrary value";
const NO_HANDLER_MARKERS: (&str, &str) = ("No direct", "equivalent");
const NOT_TRANSFORMED_MARKER: &str = "Could not transform";
const APPROXIMATE_MARKER: &str = "approximate";
const TOKEN_MISS_MARKER: &str = "token-miss";
const V3_FALLBACK_MARKER: &str = "v3-fallback";

/// Advisory attached once to rules whose selector is more than a single class.
pub const SELECTOR_ADVISORY: &str = "Complex selector may need manual adjustment";

/// Maximum number of classes listed in the text summary.
const SAMPLE_CLASSES: usize = 20;
/// Maximum number of warnings listed in the text summary.
const SAMPLE_WARNINGS: usize = 10;

/// Warning produced when a value is rendered as an arbitrary class.
pub fn arbitrary_value_warning(property: &str, value: &str) -> String {
    format!("Using {ARBITRARY_MARKER} for {property}: {value}")
}

/// Warning produced when no matcher handles a declaration.
pub fn no_handler_warning(property: &str, value: &str) -> String {
    let (no_direct, equivalent) = NO_HANDLER_MARKERS;
    format!("{no_direct} utility {equivalent} for '{property}: {value}'")
}

/// The fixed warning categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningCategory {
    /// A value was emitted as an arbitrary class.
    ArbitraryValue,
    /// No matcher handled the declaration.
    NoHandler,
    /// A token was matched approximately.
    Approximate,
    /// Strict mode rejected a non-token value.
    TokenMiss,
    /// A token came from the legacy layer.
    V3Fallback,
    /// Anything else.
    Other,
}

impl WarningCategory {
    /// All categories in report order.
    pub const ALL: [Self; 6] = [
        Self::ArbitraryValue,
        Self::NoHandler,
        Self::Approximate,
        Self::TokenMiss,
        Self::V3Fallback,
        Self::Other,
    ];

    /// Classify a warning string.
    pub fn classify(warning: &str) -> Self {
        let (no_direct, equivalent) = NO_HANDLER_MARKERS;
        if warning.contains(ARBITRARY_MARKER) {
            Self::ArbitraryValue
        } else if (warning.contains(no_direct) && warning.contains(equivalent))
            || warning.contains(NOT_TRANSFORMED_MARKER)
        {
            Self::NoHandler
        } else if warning.contains(APPROXIMATE_MARKER) {
            Self::Approximate
        } else if warning.contains(TOKEN_MISS_MARKER) {
            Self::TokenMiss
        } else if warning.contains(V3_FALLBACK_MARKER) {
            Self::V3Fallback
        } else {
            Self::Other
        }
    }

    /// Category name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ArbitraryValue => "arbitrary-value",
            Self::NoHandler => "no-handler",
            Self::Approximate => "approximate",
            Self::TokenMiss => "token-miss",
            Self::V3Fallback => "v3-fallback",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Matched/total counters for one property category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCoverage {
    /// Declarations that produced at least one class.
    pub matched: usize,
    /// All declarations.
    pub total: usize,
}

/// Declaration coverage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageStats {
    /// Declarations that produced at least one class.
    pub matched: usize,
    /// All declarations.
    pub total: usize,
    /// Matched declarations that needed no arbitrary value.
    pub non_arbitrary: usize,
    /// `round(matched / total * 100)`, zero when there are no declarations.
    pub percentage: u32,
    /// Per-category counters.
    pub categories: BTreeMap<String, CategoryCoverage>,
}

impl CoverageStats {
    /// Add another set of counters to this one.
    pub fn merge(&mut self, other: &CoverageStats) {
        self.matched += other.matched;
        self.total += other.total;
        self.non_arbitrary += other.non_arbitrary;
        for (name, counts) in &other.categories {
            let entry = self.categories.entry(name.clone()).or_default();
            entry.matched += counts.matched;
            entry.total += counts.total;
        }
        self.percentage = percentage(self.matched, self.total);
    }
}

fn percentage(matched: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (matched as f64 / total as f64 * 100.0).round() as u32
    }
}

/// Build coverage statistics.
///
/// ```
/// use classwind::report::calculate_coverage;
///
/// assert_eq!(calculate_coverage(8, 10, 6, None).percentage, 80);
/// assert_eq!(calculate_coverage(0, 0, 0, None).percentage, 0);
/// ```
pub fn calculate_coverage(
    matched: usize,
    total: usize,
    non_arbitrary: usize,
    categories: Option<BTreeMap<String, CategoryCoverage>>,
) -> CoverageStats {
    CoverageStats {
        matched,
        total,
        non_arbitrary,
        percentage: percentage(matched, total),
        categories: categories.unwrap_or_default(),
    }
}

/// Deduplicated warnings with per-category counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedWarnings {
    /// Unique warnings in first-seen order, repeated ones suffixed with their count.
    pub warnings: Vec<String>,
    /// Count of every input warning (before deduplication) per category.
    pub by_category: BTreeMap<WarningCategory, usize>,
}

/// Deduplicate and classify warnings.
///
/// ```
/// use classwind::report::{aggregate_warnings, WarningCategory};
///
/// let warnings = vec!["Using arbitrary value for top: 3px".to_string(); 3];
/// let aggregated = aggregate_warnings(&warnings);
///
/// assert_eq!(aggregated.warnings, vec!["Using arbitrary value for top: 3px (3 occurrences)"]);
/// assert_eq!(aggregated.by_category[&WarningCategory::ArbitraryValue], 3);
/// ```
pub fn aggregate_warnings<S: AsRef<str>>(warnings: &[S]) -> AggregatedWarnings {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_category = BTreeMap::new();

    for warning in warnings {
        let warning = warning.as_ref();
        *by_category.entry(WarningCategory::classify(warning)).or_insert(0) += 1;
        let count = counts.entry(warning).or_insert(0);
        if *count == 0 {
            order.push(warning);
        }
        *count += 1;
    }

    let warnings = order
        .into_iter()
        .map(|warning| match counts[warning] {
            1 => warning.to_string(),
            n => format!("{warning} ({n} occurrences)"),
        })
        .collect();

    AggregatedWarnings {
        warnings,
        by_category,
    }
}

/// Stylesheet-wide result of merging rule results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StylesheetSummary {
    /// Number of merged rules.
    pub rules: usize,
    /// Summed coverage.
    pub coverage: CoverageStats,
    /// All classes, rule after rule.
    pub classes: Vec<String>,
    /// All rule warnings, rule after rule.
    pub warnings: Vec<String>,
    /// Summed warning counts per category.
    pub warnings_by_category: BTreeMap<WarningCategory, usize>,
    /// Pre-rendered Markdown summary.
    pub text: String,
}

impl StylesheetSummary {
    /// Render the summary as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Merge rule results into a stylesheet summary.
pub fn summarize(results: &[RuleResult]) -> StylesheetSummary {
    let mut summary = StylesheetSummary {
        rules: results.len(),
        ..Default::default()
    };

    for result in results {
        summary.coverage.merge(&result.coverage);
        summary.classes.extend(result.classes.iter().cloned());
        summary.warnings.extend(result.warnings.iter().cloned());
        for (category, count) in &result.warnings_by_category {
            *summary.warnings_by_category.entry(*category).or_insert(0) += count;
        }
    }
    summary.coverage.percentage = percentage(summary.coverage.matched, summary.coverage.total);

    tracing::debug!(
        target: targets::REPORT,
        rules = summary.rules,
        matched = summary.coverage.matched,
        total = summary.coverage.total,
        "summarized stylesheet"
    );

    summary.text = render_text(&summary);
    summary
}

fn render_text(summary: &StylesheetSummary) -> String {
    let coverage = &summary.coverage;
    let mut text = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(text, "## Conversion Summary");
    let _ = writeln!(text);
    let _ = writeln!(text, "- Rules: {}", summary.rules);
    let _ = writeln!(
        text,
        "- Coverage: {}% ({}/{} declarations)",
        coverage.percentage, coverage.matched, coverage.total
    );
    let _ = writeln!(text, "- Non-arbitrary matches: {}", coverage.non_arbitrary);

    if !coverage.categories.is_empty() {
        let _ = writeln!(text);
        let _ = writeln!(text, "### Coverage by category");
        for (name, counts) in &coverage.categories {
            let _ = writeln!(
                text,
                "- {name}: {}/{} ({}%)",
                counts.matched,
                counts.total,
                percentage(counts.matched, counts.total)
            );
        }
    }

    if !summary.warnings_by_category.is_empty() {
        let _ = writeln!(text);
        let _ = writeln!(text, "### Warnings by category");
        for category in WarningCategory::ALL {
            if let Some(count) = summary.warnings_by_category.get(&category) {
                let _ = writeln!(text, "- {category}: {count}");
            }
        }
    }

    if !summary.classes.is_empty() {
        let _ = writeln!(text);
        let _ = writeln!(text, "### Classes");
        let sample: Vec<String> = summary
            .classes
            .iter()
            .take(SAMPLE_CLASSES)
            .map(|class| format!("`{class}`"))
            .collect();
        let _ = write!(text, "{}", sample.join(" "));
        if summary.classes.len() > SAMPLE_CLASSES {
            let _ = write!(text, " (+{} more)", summary.classes.len() - SAMPLE_CLASSES);
        }
        let _ = writeln!(text);
    }

    if !summary.warnings.is_empty() {
        let _ = writeln!(text);
        let _ = writeln!(text, "### Warnings");
        for warning in summary.warnings.iter().take(SAMPLE_WARNINGS) {
            let _ = writeln!(text, "- {warning}");
        }
        if summary.warnings.len() > SAMPLE_WARNINGS {
            let _ = writeln!(text, "- ... and {} more", summary.warnings.len() - SAMPLE_WARNINGS);
        }
    }

    text
}
