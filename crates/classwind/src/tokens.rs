//! Design-token layers.
//!
//! A [`TokenSource`] carries two [`TokenLayer`]s: the legacy layer (theme
//! configuration) and the current layer (design tokens). Each layer holds
//! named scales. Scales are ordered; the order decides ties when two
//! candidates are equally close during approximate matching.
//!
//! Layers are plain immutable data. Loading them from disk is the caller's
//! concern; they can also be deserialized from JSON or TOML text:
//!
//! ```
//! use classwind::tokens::TokenLayer;
//!
//! let layer: TokenLayer = serde_json::from_str(r##"{
//!     "spacing": { "4": "1rem", "8": "2rem" },
//!     "colors": { "brand": { "500": "#3B82F6" }, "white": "#fff" }
//! }"##).unwrap();
//!
//! assert_eq!(layer.spacing.get("4"), Some("1rem"));
//! assert_eq!(layer.colors.find_key("#3b82f6").as_deref(), Some("brand-500"));
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use crate::context::FrameworkVersion;
use crate::normalize::{normalize, normalize_color};

/// An ordered mapping from token key to canonical value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TokenScale {
    entries: IndexMap<String, String>,
}

impl TokenScale {
    /// Create an empty scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a token. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Find the first key whose normalized value equals `normalized`.
    pub fn find_exact(&self, normalized: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| normalize(v) == normalized)
            .map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the scale is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TokenScale {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut scale = Self::new();
        for (key, value) in iter {
            scale.insert(key, value);
        }
        scale
    }
}

/// A color entry: either a single value or a set of shades.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorEntry {
    /// A flat color such as `white -> #ffffff`.
    Single(String),
    /// Shades such as `blue -> { 500 -> #3b82f6 }`.
    Shades(TokenScale),
}

/// Key of the shade that renders without a suffix (`border` rather than `border-DEFAULT`).
pub const DEFAULT_SHADE: &str = "DEFAULT";

/// A nested color palette (`name -> shade -> value`, or flat `name -> value`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ColorScale {
    entries: IndexMap<String, ColorEntry>,
}

impl ColorScale {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flat color.
    pub fn insert_color(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name.into(), ColorEntry::Single(value.into()));
    }

    /// Add a color family with shades.
    pub fn insert_shades<K, V>(&mut self, name: impl Into<String>, shades: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(name.into(), ColorEntry::Shades(shades.into_iter().collect()));
    }

    fn insert(&mut self, name: String, entry: ColorEntry) {
        self.entries.insert(name, entry);
    }

    /// Find the utility key (`blue-600`, `white`) of a color.
    ///
    /// Both sides are compared after [`normalize_color`].
    pub fn find_key(&self, color: &str) -> Option<String> {
        let target = normalize_color(color);
        if target.is_empty() {
            return None;
        }

        for (name, entry) in &self.entries {
            match entry {
                ColorEntry::Single(value) if normalize_color(value) == target => {
                    return Some(name.clone());
                }
                ColorEntry::Shades(shades) => {
                    let hit = shades.iter().find(|(_, v)| normalize_color(v) == target);
                    if let Some((shade, _)) = hit {
                        return Some(if shade == DEFAULT_SHADE {
                            name.clone()
                        } else {
                            format!("{name}-{shade}")
                        });
                    }
                }
                ColorEntry::Single(_) => {}
            }
        }
        None
    }

    /// Number of color names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One layer of design tokens.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenLayer {
    /// Spacing scale (margin, padding, gap, sizes).
    pub spacing: TokenScale,
    /// Color palette.
    pub colors: ColorScale,
    /// Font-size scale.
    pub font_size: TokenScale,
    /// Line-height scale.
    pub line_height: TokenScale,
    /// Border-radius scale.
    pub border_radius: TokenScale,
    /// Responsive breakpoints (`md -> 768px`).
    pub screens: TokenScale,
}

impl TokenLayer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every scale in the layer is empty.
    pub fn is_empty(&self) -> bool {
        self.spacing.is_empty()
            && self.colors.is_empty()
            && self.font_size.is_empty()
            && self.line_height.is_empty()
            && self.border_radius.is_empty()
            && self.screens.is_empty()
    }

    /// The framework's default scales.
    pub fn tailwind_defaults() -> Self {
        Self {
            spacing: default_spacing(),
            colors: default_colors(),
            font_size: [
                ("xs", "0.75rem"),
                ("sm", "0.875rem"),
                ("base", "1rem"),
                ("lg", "1.125rem"),
                ("xl", "1.25rem"),
                ("2xl", "1.5rem"),
                ("3xl", "1.875rem"),
                ("4xl", "2.25rem"),
                ("5xl", "3rem"),
                ("6xl", "3.75rem"),
                ("7xl", "4.5rem"),
                ("8xl", "6rem"),
                ("9xl", "8rem"),
            ]
            .into_iter()
            .collect(),
            line_height: [
                ("none", "1"),
                ("tight", "1.25"),
                ("snug", "1.375"),
                ("normal", "1.5"),
                ("relaxed", "1.625"),
                ("loose", "2"),
                ("3", ".75rem"),
                ("4", "1rem"),
                ("5", "1.25rem"),
                ("6", "1.5rem"),
                ("7", "1.75rem"),
                ("8", "2rem"),
                ("9", "2.25rem"),
                ("10", "2.5rem"),
            ]
            .into_iter()
            .collect(),
            border_radius: [
                ("none", "0px"),
                ("sm", "0.125rem"),
                (DEFAULT_SHADE, "0.25rem"),
                ("md", "0.375rem"),
                ("lg", "0.5rem"),
                ("xl", "0.75rem"),
                ("2xl", "1rem"),
                ("3xl", "1.5rem"),
                ("full", "9999px"),
            ]
            .into_iter()
            .collect(),
            screens: [
                ("sm", "640px"),
                ("md", "768px"),
                ("lg", "1024px"),
                ("xl", "1280px"),
                ("2xl", "1536px"),
            ]
            .into_iter()
            .collect(),
        }
    }
}

fn default_spacing() -> TokenScale {
    let mut scale: TokenScale = [("0", "0px"), ("px", "1px")].into_iter().collect();
    for step in [
        0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 14.0,
        16.0, 20.0, 24.0, 28.0, 32.0, 36.0, 40.0, 44.0, 48.0, 52.0, 56.0, 60.0, 64.0, 72.0, 80.0,
        96.0,
    ] {
        scale.insert(format_step(step), format!("{}rem", format_step(step / 4.0)));
    }
    scale
}

fn format_step(value: f64) -> String {
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn default_colors() -> ColorScale {
    const SHADES: [&str; 11] = [
        "50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950",
    ];
    let families: [(&str, [&str; 11]); 4] = [
        (
            "gray",
            [
                "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563",
                "#374151", "#1f2937", "#111827", "#030712",
            ],
        ),
        (
            "red",
            [
                "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626",
                "#b91c1c", "#991b1b", "#7f1d1d", "#450a0a",
            ],
        ),
        (
            "green",
            [
                "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a",
                "#15803d", "#166534", "#14532d", "#052e16",
            ],
        ),
        (
            "blue",
            [
                "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb",
                "#1d4ed8", "#1e40af", "#1e3a8a", "#172554",
            ],
        ),
    ];

    let mut colors = ColorScale::new();
    colors.insert_color("black", "#000000");
    colors.insert_color("white", "#ffffff");
    for (name, values) in families {
        colors.insert_shades(name, SHADES.into_iter().zip(values));
    }
    colors
}

/// Both token layers plus the framework version they were authored for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSource {
    /// Legacy layer (theme configuration).
    pub legacy: TokenLayer,
    /// Current layer (design tokens). Takes precedence when populated.
    pub current: TokenLayer,
    /// Declared framework version.
    pub version: FrameworkVersion,
}

impl TokenSource {
    /// A source with only a current layer.
    pub fn current(layer: TokenLayer) -> Self {
        Self {
            legacy: TokenLayer::default(),
            current: layer,
            version: FrameworkVersion::Current,
        }
    }

    /// A source with only a legacy layer, declared as legacy.
    pub fn legacy(layer: TokenLayer) -> Self {
        Self {
            legacy: layer,
            current: TokenLayer::default(),
            version: FrameworkVersion::Legacy,
        }
    }

    /// A source with both layers, declared as current.
    pub fn layered(legacy: TokenLayer, current: TokenLayer) -> Self {
        Self {
            legacy,
            current,
            version: FrameworkVersion::Current,
        }
    }

    /// The framework defaults as the current layer.
    pub fn tailwind_defaults() -> Self {
        Self::current(TokenLayer::tailwind_defaults())
    }
}
