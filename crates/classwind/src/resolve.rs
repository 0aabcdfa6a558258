//! Value-to-token resolution.
//!
//! The [`Resolver`] decides whether a CSS value is represented by a token in
//! one of the scales, following this procedure:
//!
//! 1. Normalize the raw value.
//! 2. When targeting the current version and the current layer's scale is
//!    populated, look for an exact string match, then (if allowed) for the
//!    nearest token within the category threshold. A strict miss here is a
//!    `token-miss`.
//! 3. Otherwise consult the legacy layer the same way. A match found there
//!    while targeting the current version is annotated as `v3-fallback`.
//! 4. With no verdict anywhere, return [`Resolution::Miss`] without a warning
//!    so the caller can fall back to an arbitrary value.
//!
//! Results may be memoized in a [`ResolutionCache`]. The cache is a pure
//! optimization; clearing it never changes an outcome.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::context::{FrameworkVersion, MatchingContext, Thresholds};
use crate::logging::targets;
use crate::normalize::{BASE_FONT_SIZE_PX, normalize, normalize_color, parse_number, to_pixels};
use crate::tokens::{TokenLayer, TokenScale};

/// The scales a value can be resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Spacing scale (margins, padding, gaps, sizes).
    Spacing,
    /// Font-size scale.
    FontSize,
    /// Line-height scale.
    LineHeight,
    /// Border-radius scale.
    Radius,
    /// Color palette. Exact matches only.
    Color,
}

impl ScaleKind {
    /// Human-readable scale name used in warnings.
    pub fn name(self) -> &'static str {
        match self {
            Self::Spacing => "spacing",
            Self::FontSize => "font-size",
            Self::LineHeight => "line-height",
            Self::Radius => "border-radius",
            Self::Color => "color",
        }
    }

    fn scale(self, layer: &TokenLayer) -> Option<&TokenScale> {
        match self {
            Self::Spacing => Some(&layer.spacing),
            Self::FontSize => Some(&layer.font_size),
            Self::LineHeight => Some(&layer.line_height),
            Self::Radius => Some(&layer.border_radius),
            Self::Color => None,
        }
    }

    fn is_populated(self, layer: &TokenLayer) -> bool {
        match self.scale(layer) {
            Some(scale) => !scale.is_empty(),
            None => !layer.colors.is_empty(),
        }
    }

    fn threshold(self, thresholds: &Thresholds) -> f64 {
        match self {
            Self::Spacing => thresholds.spacing,
            Self::FontSize => thresholds.font,
            Self::LineHeight => thresholds.line_height,
            Self::Radius => thresholds.radius,
            Self::Color => 0.0,
        }
    }

    /// Convert a value to the unit distances are measured in.
    fn comparable(self, value: &str) -> Option<f64> {
        match self {
            Self::Spacing | Self::FontSize | Self::Radius => to_pixels(value, BASE_FONT_SIZE_PX),
            Self::LineHeight => parse_number(value),
            Self::Color => None,
        }
    }

    fn format_distance(self, distance: f64) -> String {
        match self {
            Self::LineHeight => format!("{distance:.2}"),
            _ => format!("{distance:.1}px"),
        }
    }
}

/// Which token layer supplied a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Theme-configuration layer.
    Legacy,
    /// Design-token layer.
    Current,
}

/// Outcome of resolving one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The value equals a token's value.
    Exact(String),
    /// The nearest token is within the category threshold.
    Approximate {
        /// Token key.
        key: String,
        /// Distance from the input, in pixels (or unitless for line-height).
        distance: f64,
    },
    /// No token represents the value.
    Miss,
}

/// A [`Resolution`] plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    /// The outcome.
    pub resolution: Resolution,
    /// Provenance warning (`approximate`, `token-miss`, `v3-fallback`).
    pub warning: Option<String>,
    /// Layer that produced a match, if any.
    pub layer: Option<LayerKind>,
}

impl ResolutionResult {
    /// A miss without a warning.
    pub fn miss() -> Self {
        Self {
            resolution: Resolution::Miss,
            warning: None,
            layer: None,
        }
    }

    fn exact(key: impl Into<String>, layer: LayerKind) -> Self {
        Self {
            resolution: Resolution::Exact(key.into()),
            warning: None,
            layer: Some(layer),
        }
    }

    /// The matched token key, exact or approximate.
    pub fn key(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Exact(key) | Resolution::Approximate { key, .. } => Some(key),
            Resolution::Miss => None,
        }
    }

    /// Whether a token matched exactly.
    pub fn is_exact(&self) -> bool {
        matches!(self.resolution, Resolution::Exact(_))
    }

    /// Whether nothing matched.
    pub fn is_miss(&self) -> bool {
        matches!(self.resolution, Resolution::Miss)
    }

    /// Whether the match came from the legacy layer while targeting the current version.
    pub fn is_fallback(&self) -> bool {
        self.warning
            .as_deref()
            .is_some_and(|w| w.starts_with(V3_FALLBACK))
    }
}

const V3_FALLBACK: &str = "v3-fallback";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: ScaleKind,
    raw: String,
    approximate: bool,
}

/// Memoization layer for resolver results.
///
/// A cache must only be shared by resolvers built over the same
/// [`MatchingContext`]. It is safe to use from several threads.
pub struct ResolutionCache {
    entries: Mutex<HashMap<CacheKey, ResolutionResult>>,
    max_size: usize,
}

impl ResolutionCache {
    /// Create a new cache.
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Create a cache holding at most `max_size` entries.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::with_capacity(max_size.min(4096))),
            max_size: max_size.max(1),
        }
    }

    fn get(&self, key: &CacheKey) -> Option<ResolutionResult> {
        self.entries.lock().get(key).cloned()
    }

    fn insert(&self, key: CacheKey, result: ResolutionResult) {
        let mut entries = self.entries.lock();
        // Simple eviction: drop half when full
        if entries.len() >= self.max_size && !entries.contains_key(&key) {
            let target = (entries.len() / 2).max(1);
            let keys: Vec<_> = entries.keys().take(target).cloned().collect();
            for key in keys {
                entries.remove(&key);
            }
        }
        entries.insert(key, result);
    }

    /// Drop every cached result.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        tracing::debug!(target: targets::RESOLVE, dropped = entries.len(), "resolver cache cleared");
        entries.clear();
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("len", &self.len())
            .field("max_size", &self.max_size)
            .finish()
    }
}

/// Resolves values against the token layers of a [`MatchingContext`].
///
/// # Example
///
/// ```
/// use classwind::prelude::*;
///
/// let spacing: TokenScale = [("4", "1rem")].into_iter().collect();
/// let layer = TokenLayer { spacing, ..Default::default() };
/// let config = ConversionConfig::default().approximate(true);
/// let context = MatchingContext::new(TokenSource::current(layer), config)?;
/// let resolver = Resolver::new(&context);
///
/// assert_eq!(resolver.resolve("1rem", ScaleKind::Spacing).resolution, Resolution::Exact("4".into()));
/// assert_eq!(
///     resolver.resolve("15px", ScaleKind::Spacing).resolution,
///     Resolution::Approximate { key: "4".into(), distance: 1.0 },
/// );
/// # Ok::<(), classwind::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    context: &'a MatchingContext,
    cache: Option<&'a ResolutionCache>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver without a cache.
    pub fn new(context: &'a MatchingContext) -> Self {
        Self {
            context,
            cache: None,
        }
    }

    /// Memoize results in `cache`.
    pub fn with_cache(mut self, cache: &'a ResolutionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The context this resolver reads.
    pub fn context(&self) -> &'a MatchingContext {
        self.context
    }

    /// Resolve a spacing value.
    pub fn resolve_spacing(&self, raw: &str) -> ResolutionResult {
        self.resolve(raw, ScaleKind::Spacing)
    }

    /// Resolve a font size.
    pub fn resolve_font_size(&self, raw: &str) -> ResolutionResult {
        self.resolve(raw, ScaleKind::FontSize)
    }

    /// Resolve a line height.
    pub fn resolve_line_height(&self, raw: &str) -> ResolutionResult {
        self.resolve(raw, ScaleKind::LineHeight)
    }

    /// Resolve a border radius.
    pub fn resolve_radius(&self, raw: &str) -> ResolutionResult {
        self.resolve(raw, ScaleKind::Radius)
    }

    /// Resolve a color.
    pub fn resolve_color(&self, raw: &str) -> ResolutionResult {
        self.resolve(raw, ScaleKind::Color)
    }

    /// Resolve `raw` against the scale named by `kind`.
    pub fn resolve(&self, raw: &str, kind: ScaleKind) -> ResolutionResult {
        let raw = raw.trim();
        if raw.is_empty() {
            return ResolutionResult::miss();
        }

        let key = CacheKey {
            kind,
            raw: raw.to_string(),
            approximate: self.context.approximate_flag(),
        };
        if let Some(cache) = self.cache
            && let Some(hit) = cache.get(&key)
        {
            tracing::trace!(target: targets::RESOLVE, scale = kind.name(), value = raw, "cache hit");
            return hit;
        }

        let result = self.resolve_uncached(raw, kind);
        if let Some(cache) = self.cache {
            cache.insert(key, result.clone());
        }
        result
    }

    fn resolve_uncached(&self, raw: &str, kind: ScaleKind) -> ResolutionResult {
        let normalized = match kind {
            ScaleKind::Color => normalize_color(raw),
            _ => normalize(raw),
        };
        let context = self.context;
        let mut searched = false;

        if context.version() == FrameworkVersion::Current && kind.is_populated(context.current()) {
            if let Some(found) = self.search(context.current(), raw, &normalized, kind, LayerKind::Current) {
                return found;
            }
            if context.is_strict() {
                return token_miss(raw, kind);
            }
            tracing::trace!(target: targets::RESOLVE, scale = kind.name(), value = raw, "no token in current layer");
            return ResolutionResult::miss();
        }

        if kind.is_populated(context.legacy()) {
            searched = true;
            if let Some(found) = self.search(context.legacy(), raw, &normalized, kind, LayerKind::Legacy) {
                return if context.version() == FrameworkVersion::Current {
                    mark_fallback(found, raw, kind)
                } else {
                    found
                };
            }
        }

        if searched && context.is_strict() {
            return token_miss(raw, kind);
        }
        ResolutionResult::miss()
    }

    fn search(
        &self,
        layer: &TokenLayer,
        raw: &str,
        normalized: &str,
        kind: ScaleKind,
        layer_kind: LayerKind,
    ) -> Option<ResolutionResult> {
        let Some(scale) = kind.scale(layer) else {
            return layer
                .colors
                .find_key(normalized)
                .map(|key| ResolutionResult::exact(key, layer_kind));
        };

        if let Some(key) = scale.find_exact(normalized) {
            tracing::trace!(target: targets::RESOLVE, scale = kind.name(), value = raw, key, "exact match");
            return Some(ResolutionResult::exact(key, layer_kind));
        }

        if self.context.allows_approximate() {
            return self.nearest(scale, raw, normalized, kind, layer_kind);
        }
        None
    }

    fn nearest(
        &self,
        scale: &TokenScale,
        raw: &str,
        normalized: &str,
        kind: ScaleKind,
        layer_kind: LayerKind,
    ) -> Option<ResolutionResult> {
        let threshold = kind.threshold(self.context.thresholds());
        if threshold <= 0.0 {
            return None;
        }
        let target = kind.comparable(normalized)?;

        let mut best: Option<(&str, f64)> = None;
        for (key, value) in scale.iter() {
            let Some(candidate) = kind.comparable(value) else {
                continue;
            };
            let distance = (candidate - target).abs();
            if best.is_none_or(|(_, closest)| distance < closest) {
                best = Some((key, distance));
            }
        }

        let (key, distance) = best?;
        if distance > threshold {
            return None;
        }

        tracing::debug!(target: targets::RESOLVE, scale = kind.name(), value = raw, key, distance, "approximate match");
        Some(ResolutionResult {
            resolution: Resolution::Approximate {
                key: key.to_string(),
                distance,
            },
            warning: Some(format!(
                "approximate: {} value '{raw}' matched token '{key}' (off by {})",
                kind.name(),
                kind.format_distance(distance),
            )),
            layer: Some(layer_kind),
        })
    }
}

fn token_miss(raw: &str, kind: ScaleKind) -> ResolutionResult {
    ResolutionResult {
        resolution: Resolution::Miss,
        warning: Some(format!(
            "token-miss: no {} token for '{raw}' (strict mode)",
            kind.name()
        )),
        layer: None,
    }
}

fn mark_fallback(mut found: ResolutionResult, raw: &str, kind: ScaleKind) -> ResolutionResult {
    tracing::debug!(target: targets::RESOLVE, scale = kind.name(), value = raw, "resolved from legacy layer");
    found.warning = Some(match (&found.resolution, found.warning.take()) {
        (Resolution::Approximate { .. }, Some(approximate)) => format!("{V3_FALLBACK} {approximate}"),
        _ => format!(
            "{V3_FALLBACK}: {} value '{raw}' resolved from the legacy theme as '{}'",
            kind.name(),
            found.key().unwrap_or_default(),
        ),
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ConversionConfig;
    use crate::tokens::TokenSource;

    fn spacing_layer() -> TokenLayer {
        TokenLayer {
            spacing: [("2", "0.5rem"), ("4", "1rem"), ("8", "2rem")].into_iter().collect(),
            ..Default::default()
        }
    }

    fn context(source: TokenSource, config: ConversionConfig) -> MatchingContext {
        MatchingContext::new(source, config).unwrap()
    }

    #[test]
    fn exact_match_under_any_policy() {
        for config in [
            ConversionConfig::default(),
            ConversionConfig::default().approximate(true),
            ConversionConfig::default().strict(true),
        ] {
            let ctx = context(TokenSource::current(spacing_layer()), config);
            let result = Resolver::new(&ctx).resolve_spacing("1rem");
            assert_eq!(result.resolution, Resolution::Exact("4".into()));
            assert_eq!(result.warning, None);
            assert_eq!(result.layer, Some(LayerKind::Current));
        }
    }

    #[test]
    fn exact_requires_literal_equality() {
        let ctx = context(TokenSource::current(spacing_layer()), ConversionConfig::default());
        assert!(Resolver::new(&ctx).resolve_spacing("16px").is_miss());
    }

    #[test]
    fn approximate_within_threshold() {
        let config = ConversionConfig::default().approximate(true);
        let ctx = context(TokenSource::current(spacing_layer()), config);
        let result = Resolver::new(&ctx).resolve_spacing("15px");

        assert_eq!(
            result.resolution,
            Resolution::Approximate { key: "4".into(), distance: 1.0 }
        );
        let warning = result.warning.unwrap();
        assert!(warning.contains("approximate"));
        assert!(warning.contains("15px"));
        assert!(warning.contains("'4'"));
        assert!(warning.contains("1.0px"));
    }

    #[test]
    fn approximate_beyond_threshold_misses() {
        let config = ConversionConfig::default().approximate(true);
        let ctx = context(TokenSource::current(spacing_layer()), config);
        let result = Resolver::new(&ctx).resolve_spacing("20px");
        assert!(result.is_miss());
        assert_eq!(result.warning, None);
    }

    #[test]
    fn zero_threshold_disables_approximate() {
        let config = ConversionConfig::default()
            .approximate(true)
            .thresholds(Thresholds { spacing: 0.0, ..Default::default() });
        let ctx = context(TokenSource::current(spacing_layer()), config);
        assert!(Resolver::new(&ctx).resolve_spacing("15px").is_miss());
    }

    #[test]
    fn strict_reports_token_miss() {
        let config = ConversionConfig::default().approximate(true).strict(true);
        let ctx = context(TokenSource::current(spacing_layer()), config);
        let result = Resolver::new(&ctx).resolve_spacing("15px");

        assert!(result.is_miss());
        let warning = result.warning.unwrap();
        assert!(warning.contains("token-miss"));
        assert!(warning.contains("spacing"));
        assert!(warning.contains("15px"));
    }

    #[test]
    fn legacy_fallback_is_annotated() {
        let source = TokenSource::layered(spacing_layer(), TokenLayer::default());
        let ctx = context(source, ConversionConfig::default());
        let result = Resolver::new(&ctx).resolve_spacing("1rem");

        assert_eq!(result.resolution, Resolution::Exact("4".into()));
        assert_eq!(result.layer, Some(LayerKind::Legacy));
        assert!(result.warning.as_deref().unwrap().contains("v3-fallback"));
        assert!(result.is_fallback());
    }

    #[test]
    fn legacy_fallback_approximate_is_annotated() {
        let source = TokenSource::layered(spacing_layer(), TokenLayer::default());
        let ctx = context(source, ConversionConfig::default().approximate(true));
        let result = Resolver::new(&ctx).resolve_spacing("17px");

        assert_eq!(
            result.resolution,
            Resolution::Approximate { key: "4".into(), distance: 1.0 }
        );
        assert!(result.warning.unwrap().starts_with("v3-fallback approximate"));
    }

    #[test]
    fn legacy_version_has_no_fallback_annotation() {
        let ctx = context(TokenSource::legacy(spacing_layer()), ConversionConfig::default());
        let result = Resolver::new(&ctx).resolve_spacing("2rem");
        assert_eq!(result.resolution, Resolution::Exact("8".into()));
        assert_eq!(result.warning, None);
    }

    #[test]
    fn legacy_version_ignores_current_layer() {
        let source = TokenSource {
            version: FrameworkVersion::Legacy,
            ..TokenSource::current(spacing_layer())
        };
        let ctx = context(source, ConversionConfig::default());
        assert!(Resolver::new(&ctx).resolve_spacing("1rem").is_miss());
    }

    #[test]
    fn empty_input_misses_without_warning() {
        let config = ConversionConfig::default().strict(true);
        let ctx = context(TokenSource::current(spacing_layer()), config);
        let result = Resolver::new(&ctx).resolve_spacing("   ");
        assert_eq!(result, ResolutionResult::miss());
    }

    #[test]
    fn absent_layers_miss_without_warning() {
        let ctx = context(TokenSource::default(), ConversionConfig::default().strict(true));
        assert_eq!(Resolver::new(&ctx).resolve_spacing("1rem"), ResolutionResult::miss());
    }

    #[test]
    fn line_height_distance_is_unitless() {
        let layer = TokenLayer {
            line_height: [("tight", "1.25"), ("normal", "1.5")].into_iter().collect(),
            ..Default::default()
        };
        let ctx = context(TokenSource::current(layer), ConversionConfig::default().approximate(true));
        let result = Resolver::new(&ctx).resolve_line_height("1.3");

        assert_eq!(result.key(), Some("tight"));
        assert!(result.warning.unwrap().contains("0.05"));
    }

    #[test]
    fn colors_match_exactly_only() {
        let ctx = context(
            TokenSource::tailwind_defaults(),
            ConversionConfig::default().approximate(true),
        );
        let resolver = Resolver::new(&ctx);

        assert_eq!(resolver.resolve_color("#2563EB").key(), Some("blue-600"));
        assert_eq!(resolver.resolve_color("#000").key(), Some("black"));
        assert!(resolver.resolve_color("#2563ea").is_miss());
    }

    #[test]
    fn cache_is_transparent() {
        let config = ConversionConfig::default().approximate(true);
        let ctx = context(TokenSource::current(spacing_layer()), config);
        let cache = ResolutionCache::new();
        let cached = Resolver::new(&ctx).with_cache(&cache);
        let uncached = Resolver::new(&ctx);

        let first = cached.resolve_spacing("15px");
        assert_eq!(cache.len(), 1);
        assert_eq!(cached.resolve_spacing("15px"), first);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cached.resolve_spacing("15px"), first);
        assert_eq!(uncached.resolve_spacing("15px"), first);
    }

    #[test]
    fn cache_evicts_when_full() {
        let ctx = context(TokenSource::current(spacing_layer()), ConversionConfig::default());
        let cache = ResolutionCache::with_capacity(4);
        let resolver = Resolver::new(&ctx).with_cache(&cache);

        for px in 0..10 {
            resolver.resolve_spacing(&format!("{px}px"));
        }
        assert!(cache.len() <= 4);
    }

    #[test]
    fn font_size_uses_its_own_threshold() {
        let layer = TokenLayer {
            spacing: [("4", "1rem")].into_iter().collect(),
            font_size: [("base", "1rem")].into_iter().collect(),
            ..Default::default()
        };
        let ctx = context(TokenSource::current(layer.clone()), ConversionConfig::default().approximate(true));
        let resolver = Resolver::new(&ctx);

        assert!(resolver.resolve_font_size("17.5px").is_miss());
        assert_eq!(
            resolver.resolve_spacing("17.5px").resolution,
            Resolution::Approximate { key: "4".into(), distance: 1.5 }
        );
        assert_eq!(resolver.resolve_font_size("16.5px").key(), Some("base"));

        let widened = ConversionConfig::default()
            .approximate(true)
            .thresholds(Thresholds { font: 2.0, ..Default::default() });
        let ctx = context(TokenSource::current(layer), widened);
        assert_eq!(
            Resolver::new(&ctx).resolve_font_size("17.5px").resolution,
            Resolution::Approximate { key: "base".into(), distance: 1.5 }
        );
    }

    #[test]
    fn radius_uses_its_own_threshold() {
        let layer = TokenLayer {
            border_radius: [("md", "0.375rem")].into_iter().collect(),
            ..Default::default()
        };
        let ctx = context(TokenSource::current(layer.clone()), ConversionConfig::default().approximate(true));
        let resolver = Resolver::new(&ctx);

        let result = resolver.resolve_radius("7px");
        assert_eq!(result.resolution, Resolution::Approximate { key: "md".into(), distance: 1.0 });
        assert!(result.warning.unwrap().contains("border-radius"));
        assert!(resolver.resolve_radius("9px").is_miss());

        let narrowed = ConversionConfig::default()
            .approximate(true)
            .thresholds(Thresholds { radius: 0.5, ..Default::default() });
        let ctx = context(TokenSource::current(layer), narrowed);
        assert!(Resolver::new(&ctx).resolve_radius("7px").is_miss());
    }

    #[test]
    fn legacy_color_fallback_is_annotated() {
        let source = TokenSource::layered(TokenLayer::tailwind_defaults(), TokenLayer::default());
        let ctx = context(source, ConversionConfig::default());
        let result = Resolver::new(&ctx).resolve_color("#2563EB");

        assert_eq!(result.resolution, Resolution::Exact("blue-600".into()));
        assert_eq!(result.layer, Some(LayerKind::Legacy));
        assert!(result.is_fallback());
    }

    #[test]
    fn cache_respects_capacity_of_one() {
        let ctx = context(TokenSource::current(spacing_layer()), ConversionConfig::default());
        let cache = ResolutionCache::with_capacity(1);
        let resolver = Resolver::new(&ctx).with_cache(&cache);

        for px in 0..10 {
            resolver.resolve_spacing(&format!("{px}px"));
            assert_eq!(cache.len(), 1);
        }
    }

    #[test]
    fn cache_refresh_does_not_evict() {
        let ctx = context(TokenSource::current(spacing_layer()), ConversionConfig::default());
        let cache = ResolutionCache::with_capacity(4);
        for px in 0..4 {
            cache.insert(
                CacheKey { kind: ScaleKind::Spacing, raw: format!("{px}px"), approximate: false },
                ResolutionResult::miss(),
            );
        }
        assert_eq!(cache.len(), 4);

        cache.insert(
            CacheKey { kind: ScaleKind::Spacing, raw: "2px".into(), approximate: false },
            Resolver::new(&ctx).resolve_spacing("2px"),
        );
        assert_eq!(cache.len(), 4);
    }
}
