//! Translate CSS declarations into utility-class tokens.
//!
//! This crate resolves individual CSS property/value pairs against a
//! design-token theme and assembles the resulting utility classes into a
//! deterministic, variant-qualified class list, featuring:
//!
//! - **Normalization**: canonical value strings, unit predicates, pixel conversion
//! - **Token layers**: a legacy (theme config) and a current (design tokens) layer
//! - **Resolution**: exact, approximate, and strict matching with provenance warnings
//! - **Assembly**: per-rule class generation through a closed matcher table
//! - **Ordering**: semantic-group and variant-precedence sorting
//! - **Reporting**: coverage statistics and categorized warnings
//!
//! # Example
//!
//! ```
//! use classwind::prelude::*;
//!
//! let context = MatchingContext::new(TokenSource::tailwind_defaults(), ConversionConfig::default())?;
//! let converter = Converter::new(context);
//!
//! let rule = CssRule::new(".card")
//!     .declaration("margin", "1rem")
//!     .declaration("padding", "2rem");
//! let result = converter.transform_rule(&rule);
//!
//! assert_eq!(result.classes, vec!["m-4", "p-8"]);
//! assert_eq!(result.coverage.percentage, 100);
//! # Ok::<(), classwind::Error>(())
//! ```

pub mod assemble;
pub mod context;
pub mod logging;
pub mod matcher;
pub mod normalize;
pub mod order;
pub mod report;
pub mod resolve;
pub mod tokens;
pub mod variants;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::assemble::{Converter, CssRule, Declaration, RuleResult};
    pub use crate::context::{ConversionConfig, FrameworkVersion, MatchingContext, Thresholds};
    pub use crate::matcher::{BuiltinMatchers, MatchOutput, PropertyMatcher};
    pub use crate::order::{ClassToken, SemanticGroup, sort_classes};
    pub use crate::report::{
        CoverageStats, StylesheetSummary, WarningCategory, aggregate_warnings,
        calculate_coverage, summarize,
    };
    pub use crate::resolve::{Resolution, ResolutionCache, ResolutionResult, Resolver, ScaleKind};
    pub use crate::tokens::{ColorScale, TokenLayer, TokenScale, TokenSource};
    pub use crate::variants::{apply_variants, variant_for_media, variants_from_selector};
}
