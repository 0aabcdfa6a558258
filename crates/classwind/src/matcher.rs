//! Property matchers.
//!
//! A [`PropertyMatcher`] turns one normalized declaration into utility
//! classes. An empty [`MatchOutput::classes`] means the property has no
//! handler; the assembler reports that as a `no-handler` warning.
//!
//! [`BuiltinMatchers`] covers a core property set through a closed dispatch
//! table: [`handler_for`] maps a property name to a [`Handler`] variant once,
//! and the variant carries everything needed to render the class.

use crate::normalize::{BASE_FONT_SIZE_PX, expand_box_shorthand, parse_number, split_top_level, to_pixels};
use crate::report::arbitrary_value_warning;
use crate::resolve::{ResolutionResult, Resolver, ScaleKind};
use crate::tokens::DEFAULT_SHADE;

/// Classes and warnings produced for one declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutput {
    /// Generated classes, without variants.
    pub classes: Vec<String>,
    /// Warnings raised while matching.
    pub warnings: Vec<String>,
}

impl MatchOutput {
    /// Output with a single class and no warnings.
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            warnings: Vec::new(),
        }
    }

    /// Whether no handler produced a class.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn extend(&mut self, other: MatchOutput) {
        self.classes.extend(other.classes);
        self.warnings.extend(other.warnings);
    }
}

/// Converts a single declaration into utility classes.
///
/// Implementations must be total and free of side effects. `value` is
/// already normalized.
pub trait PropertyMatcher: Send + Sync {
    /// Match a property/value pair.
    fn match_property(&self, property: &str, value: &str, resolver: &Resolver<'_>) -> MatchOutput;
}

/// The built-in matcher table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMatchers;

impl PropertyMatcher for BuiltinMatchers {
    fn match_property(&self, property: &str, value: &str, resolver: &Resolver<'_>) -> MatchOutput {
        let property = property.trim().to_ascii_lowercase();
        match handler_for(&property) {
            Some(handler) => handler.run(&property, value, resolver),
            None => MatchOutput::default(),
        }
    }
}

/// A scale-backed utility family (`mt-*`, `w-*`, `rounded-*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    prefix: &'static str,
    kind: ScaleKind,
    negative: bool,
    keywords: &'static [(&'static str, &'static str)],
}

const MARGIN_KEYWORDS: &[(&str, &str)] = &[("auto", "auto")];
const INSET_KEYWORDS: &[(&str, &str)] = &[("auto", "auto"), ("100%", "full"), ("50%", "1/2")];
const WIDTH_KEYWORDS: &[(&str, &str)] = &[
    ("auto", "auto"),
    ("100%", "full"),
    ("100vw", "screen"),
    ("min-content", "min"),
    ("max-content", "max"),
    ("fit-content", "fit"),
    ("50%", "1/2"),
    ("25%", "1/4"),
    ("75%", "3/4"),
    ("33.333333%", "1/3"),
    ("66.666667%", "2/3"),
];
const HEIGHT_KEYWORDS: &[(&str, &str)] = &[
    ("auto", "auto"),
    ("100%", "full"),
    ("100vh", "screen"),
    ("min-content", "min"),
    ("max-content", "max"),
    ("fit-content", "fit"),
    ("50%", "1/2"),
];
const MAX_SIZE_KEYWORDS: &[(&str, &str)] = &[
    ("none", "none"),
    ("100%", "full"),
    ("min-content", "min"),
    ("max-content", "max"),
    ("fit-content", "fit"),
];

impl Scale {
    const fn spacing(prefix: &'static str) -> Self {
        Self {
            prefix,
            kind: ScaleKind::Spacing,
            negative: false,
            keywords: &[],
        }
    }

    const fn margin(prefix: &'static str) -> Self {
        Self {
            negative: true,
            keywords: MARGIN_KEYWORDS,
            ..Self::spacing(prefix)
        }
    }

    const fn inset(prefix: &'static str) -> Self {
        Self {
            negative: true,
            keywords: INSET_KEYWORDS,
            ..Self::spacing(prefix)
        }
    }

    const fn sized(prefix: &'static str, keywords: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            keywords,
            ..Self::spacing(prefix)
        }
    }

    const fn of(prefix: &'static str, kind: ScaleKind) -> Self {
        Self {
            prefix,
            kind,
            negative: false,
            keywords: &[],
        }
    }

    fn emit(&self, property: &str, value: &str, resolver: &Resolver<'_>) -> MatchOutput {
        let value = value.trim();
        if value.is_empty() {
            return MatchOutput::default();
        }
        if let Some((_, suffix)) = self.keywords.iter().find(|(k, _)| *k == value) {
            return MatchOutput::class(utility(self.prefix, suffix));
        }

        let (negative, magnitude) = match value.strip_prefix('-') {
            Some(rest) if self.negative => (true, rest),
            _ => (false, value),
        };
        let sign = if negative { "-" } else { "" };

        if is_zero(magnitude)
            && let Some(out) = self.emit_zero(magnitude, resolver)
        {
            return out;
        }

        let result = resolver.resolve(magnitude, self.kind);
        let mut out = MatchOutput::default();
        match result.key() {
            Some(key) => out.classes.push(format!("{sign}{}", utility(self.prefix, key))),
            None => {
                out.classes.push(arbitrary(self.prefix, value));
                if result.warning.is_none() {
                    out.warnings.push(arbitrary_value_warning(property, value));
                }
            }
        }
        out.warnings.extend(result.warning);
        out
    }

    /// Zero renders as the scale's zero token when one exists, or as the
    /// literal `-0`/`-none` class outside strict mode.
    fn emit_zero(&self, magnitude: &str, resolver: &Resolver<'_>) -> Option<MatchOutput> {
        let literal = match self.kind {
            ScaleKind::Spacing => "0",
            ScaleKind::Radius => "none",
            _ => return None,
        };

        let exact = [magnitude, "0", "0px", "0rem"]
            .into_iter()
            .map(|spelling| resolver.resolve(spelling, self.kind))
            .find(ResolutionResult::is_exact);
        if let Some(result) = exact {
            let mut out = MatchOutput::class(utility(self.prefix, result.key().unwrap_or(literal)));
            out.warnings.extend(result.warning);
            return Some(out);
        }

        if resolver.context().is_strict() {
            None
        } else {
            Some(MatchOutput::class(utility(self.prefix, literal)))
        }
    }
}

/// How a property is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// `margin`/`padding` shorthands, expanded to four sides.
    BoxShorthand {
        /// Utility prefix (`m` or `p`).
        prefix: &'static str,
        /// Side scale template.
        scale: Scale,
    },
    /// A single scale-backed utility.
    Scaled(Scale),
    /// `gap` with one or two values.
    Gap,
    /// A color utility (`text`, `bg`, `border`).
    Color(&'static str),
    /// `background` shorthand carrying a single color.
    Background,
    /// `border` shorthand (width, style, color).
    Border,
    /// `border-width`.
    BorderWidth,
    /// `font-weight`.
    FontWeight,
    /// `opacity`.
    Opacity,
    /// `z-index`.
    ZIndex,
    /// `box-shadow`.
    BoxShadow,
    /// A fixed value-to-class table.
    Keyword(&'static [(&'static str, &'static str)]),
}

/// Look up the handler for a lower-cased property name.
pub fn handler_for(property: &str) -> Option<Handler> {
    use Handler::*;

    Some(match property {
        "margin" => BoxShorthand { prefix: "m", scale: Scale::margin("m") },
        "padding" => BoxShorthand { prefix: "p", scale: Scale::spacing("p") },
        "margin-top" => Scaled(Scale::margin("mt")),
        "margin-right" => Scaled(Scale::margin("mr")),
        "margin-bottom" => Scaled(Scale::margin("mb")),
        "margin-left" => Scaled(Scale::margin("ml")),
        "margin-inline" => Scaled(Scale::margin("mx")),
        "margin-block" => Scaled(Scale::margin("my")),
        "margin-inline-start" => Scaled(Scale::margin("ms")),
        "margin-inline-end" => Scaled(Scale::margin("me")),
        "padding-top" => Scaled(Scale::spacing("pt")),
        "padding-right" => Scaled(Scale::spacing("pr")),
        "padding-bottom" => Scaled(Scale::spacing("pb")),
        "padding-left" => Scaled(Scale::spacing("pl")),
        "padding-inline" => Scaled(Scale::spacing("px")),
        "padding-block" => Scaled(Scale::spacing("py")),
        "padding-inline-start" => Scaled(Scale::spacing("ps")),
        "padding-inline-end" => Scaled(Scale::spacing("pe")),
        "gap" => Gap,
        "row-gap" => Scaled(Scale::spacing("gap-y")),
        "column-gap" => Scaled(Scale::spacing("gap-x")),
        "top" => Scaled(Scale::inset("top")),
        "right" => Scaled(Scale::inset("right")),
        "bottom" => Scaled(Scale::inset("bottom")),
        "left" => Scaled(Scale::inset("left")),
        "inset" => Scaled(Scale::inset("inset")),
        "width" => Scaled(Scale::sized("w", WIDTH_KEYWORDS)),
        "height" => Scaled(Scale::sized("h", HEIGHT_KEYWORDS)),
        "min-width" => Scaled(Scale::sized("min-w", MAX_SIZE_KEYWORDS)),
        "min-height" => Scaled(Scale::sized("min-h", MAX_SIZE_KEYWORDS)),
        "max-width" => Scaled(Scale::sized("max-w", MAX_SIZE_KEYWORDS)),
        "max-height" => Scaled(Scale::sized("max-h", MAX_SIZE_KEYWORDS)),
        "font-size" => Scaled(Scale::of("text", ScaleKind::FontSize)),
        "line-height" => Scaled(Scale::of("leading", ScaleKind::LineHeight)),
        "border-radius" => Scaled(Scale::of("rounded", ScaleKind::Radius)),
        "color" => Color("text"),
        "background-color" => Color("bg"),
        "border-color" => Color("border"),
        "background" => Background,
        "border" => Border,
        "border-width" => BorderWidth,
        "font-weight" => FontWeight,
        "opacity" => Opacity,
        "z-index" => ZIndex,
        "box-shadow" => BoxShadow,
        "display" => Keyword(DISPLAY),
        "position" => Keyword(POSITION),
        "flex-direction" => Keyword(FLEX_DIRECTION),
        "flex-wrap" => Keyword(FLEX_WRAP),
        "justify-content" => Keyword(JUSTIFY_CONTENT),
        "align-items" => Keyword(ALIGN_ITEMS),
        "text-align" => Keyword(TEXT_ALIGN),
        "text-decoration" | "text-decoration-line" => Keyword(TEXT_DECORATION),
        "text-transform" => Keyword(TEXT_TRANSFORM),
        "font-style" => Keyword(FONT_STYLE),
        "border-style" => Keyword(BORDER_STYLE),
        "overflow" => Keyword(OVERFLOW),
        "overflow-x" => Keyword(OVERFLOW_X),
        "overflow-y" => Keyword(OVERFLOW_Y),
        "cursor" => Keyword(CURSOR),
        _ => return None,
    })
}

impl Handler {
    fn run(self, property: &str, value: &str, resolver: &Resolver<'_>) -> MatchOutput {
        match self {
            Self::BoxShorthand { prefix, scale } => box_shorthand(property, prefix, scale, value, resolver),
            Self::Scaled(scale) => scale.emit(property, value, resolver),
            Self::Gap => gap(property, value, resolver),
            Self::Color(prefix) => color(property, prefix, value, resolver),
            Self::Background => background(property, value, resolver),
            Self::Border => border(property, value, resolver),
            Self::BorderWidth => border_width(property, value),
            Self::FontWeight => font_weight(property, value),
            Self::Opacity => opacity(property, value),
            Self::ZIndex => z_index(property, value),
            Self::BoxShadow => match value {
                "none" => MatchOutput::class("shadow-none"),
                "" => MatchOutput::default(),
                _ => arbitrary_output(property, "shadow", value),
            },
            Self::Keyword(table) => table
                .iter()
                .find(|(k, _)| *k == value)
                .map(|(_, class)| MatchOutput::class(*class))
                .unwrap_or_default(),
        }
    }
}

/// Emit classes for a four-sided shorthand.
///
/// All sides equal gives one class; matching vertical or horizontal pairs
/// collapse to an axis class; remaining sides are emitted individually.
fn box_shorthand(
    property: &str,
    prefix: &'static str,
    template: Scale,
    value: &str,
    resolver: &Resolver<'_>,
) -> MatchOutput {
    let [top, right, bottom, left] = expand_box_shorthand(value);
    if top.is_empty() {
        return MatchOutput::default();
    }

    let side = |axis: &str| -> &'static str {
        match (prefix, axis) {
            ("m", "x") => "mx",
            ("m", "y") => "my",
            ("m", "t") => "mt",
            ("m", "r") => "mr",
            ("m", "b") => "mb",
            ("m", "l") => "ml",
            ("p", "x") => "px",
            ("p", "y") => "py",
            ("p", "t") => "pt",
            ("p", "r") => "pr",
            ("p", "b") => "pb",
            ("p", "l") => "pl",
            _ => prefix,
        }
    };
    let emit = |axis: &str, v: &str| {
        Scale {
            prefix: side(axis),
            ..template
        }
        .emit(property, v, resolver)
    };

    let mut out = MatchOutput::default();
    if top == bottom && left == right && top == left {
        out.extend(emit("", &top));
    } else {
        if top == bottom {
            out.extend(emit("y", &top));
        } else {
            out.extend(emit("t", &top));
            out.extend(emit("b", &bottom));
        }
        if left == right {
            out.extend(emit("x", &right));
        } else {
            out.extend(emit("r", &right));
            out.extend(emit("l", &left));
        }
    }
    out
}

fn gap(property: &str, value: &str, resolver: &Resolver<'_>) -> MatchOutput {
    match split_top_level(value).as_slice() {
        [] => MatchOutput::default(),
        [all] => Scale::spacing("gap").emit(property, all, resolver),
        [row, column, ..] if row == column => Scale::spacing("gap").emit(property, row, resolver),
        [row, column, ..] => {
            let mut out = Scale::spacing("gap-y").emit(property, row, resolver);
            out.extend(Scale::spacing("gap-x").emit(property, column, resolver));
            out
        }
    }
}

fn color(property: &str, prefix: &str, value: &str, resolver: &Resolver<'_>) -> MatchOutput {
    let keyword = match value {
        "" => return MatchOutput::default(),
        "transparent" => Some("transparent"),
        "currentcolor" => Some("current"),
        "inherit" => Some("inherit"),
        _ => None,
    };
    if let Some(keyword) = keyword {
        return MatchOutput::class(format!("{prefix}-{keyword}"));
    }

    let result = resolver.resolve_color(value);
    let mut out = match result.key() {
        Some(key) => MatchOutput::class(format!("{prefix}-{key}")),
        None if result.warning.is_some() => MatchOutput::class(arbitrary(prefix, value)),
        None => arbitrary_output(property, prefix, value),
    };
    out.warnings.extend(result.warning);
    out
}

fn looks_like_color(value: &str) -> bool {
    value.starts_with('#')
        || ["rgb(", "rgba(", "hsl(", "hsla(", "oklch(", "oklab(", "color("]
            .iter()
            .any(|f| value.starts_with(f))
        || matches!(value, "transparent" | "currentcolor")
}

const BACKGROUND_KEYWORDS: &[&str] = &[
    "repeat", "no-repeat", "repeat-x", "repeat-y", "space", "round", "top", "bottom", "left",
    "right", "center", "fixed", "scroll", "local", "cover", "contain", "auto", "border-box",
    "padding-box", "content-box", "text",
];

/// Whether a `background` component is an image, position, size, repeat or box value.
fn is_background_layer_value(value: &str) -> bool {
    BACKGROUND_KEYWORDS.contains(&value)
        || (value.contains('(') && !looks_like_color(value))
        || value.ends_with('%')
        || to_pixels(value, BASE_FONT_SIZE_PX).is_some()
}

/// A single color component behaves exactly like `background-color`.
fn background(property: &str, value: &str, resolver: &Resolver<'_>) -> MatchOutput {
    if value == "none" {
        return MatchOutput::class("bg-none");
    }
    match split_top_level(value).as_slice() {
        [single] if !is_background_layer_value(single) => color(property, "bg", single, resolver),
        _ => MatchOutput::default(),
    }
}

const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "hidden", "none"];

fn border(property: &str, value: &str, resolver: &Resolver<'_>) -> MatchOutput {
    if matches!(value, "none" | "0") {
        return MatchOutput::class(if value == "0" { "border-0" } else { "border-none" });
    }

    let mut out = MatchOutput::default();
    for part in split_top_level(value) {
        if BORDER_STYLES.contains(&part.as_str()) {
            out.classes.push(format!("border-{part}"));
        } else if part == "thin" || to_pixels(&part, BASE_FONT_SIZE_PX).is_some() {
            out.extend(border_width(property, &part));
        } else {
            out.extend(color(property, "border", &part, resolver));
        }
    }
    out
}

fn border_width(property: &str, value: &str) -> MatchOutput {
    let class = match (value, to_pixels(value, BASE_FONT_SIZE_PX)) {
        ("thin", _) => "border",
        (_, Some(px)) if px == 0.0 => "border-0",
        (_, Some(px)) if px == 1.0 => "border",
        (_, Some(px)) if px == 2.0 => "border-2",
        (_, Some(px)) if px == 4.0 => "border-4",
        (_, Some(px)) if px == 8.0 => "border-8",
        ("", _) => return MatchOutput::default(),
        _ => return arbitrary_output(property, "border", value),
    };
    MatchOutput::class(class)
}

const FONT_WEIGHTS: &[(&str, &str)] = &[
    ("100", "thin"),
    ("200", "extralight"),
    ("300", "light"),
    ("400", "normal"),
    ("normal", "normal"),
    ("500", "medium"),
    ("600", "semibold"),
    ("700", "bold"),
    ("bold", "bold"),
    ("800", "extrabold"),
    ("900", "black"),
];

fn font_weight(property: &str, value: &str) -> MatchOutput {
    match FONT_WEIGHTS.iter().find(|(k, _)| *k == value) {
        Some((_, weight)) => MatchOutput::class(format!("font-{weight}")),
        None if value.is_empty() => MatchOutput::default(),
        None => arbitrary_output(property, "font", value),
    }
}

fn opacity(property: &str, value: &str) -> MatchOutput {
    let fraction = match value.strip_suffix('%') {
        Some(percent) => parse_number(percent).map(|p| p / 100.0),
        None => parse_number(value),
    };
    let Some(fraction) = fraction.filter(|f| (0.0..=1.0).contains(f)) else {
        return if value.is_empty() {
            MatchOutput::default()
        } else {
            arbitrary_output(property, "opacity", value)
        };
    };

    let percent = fraction * 100.0;
    let rounded = percent.round();
    if (percent - rounded).abs() < 1e-6 && rounded as i64 % 5 == 0 {
        MatchOutput::class(format!("opacity-{}", rounded as i64))
    } else {
        arbitrary_output(property, "opacity", value)
    }
}

fn z_index(property: &str, value: &str) -> MatchOutput {
    match value {
        "" => MatchOutput::default(),
        "auto" | "0" | "10" | "20" | "30" | "40" | "50" => MatchOutput::class(format!("z-{value}")),
        "-10" | "-20" | "-30" | "-40" | "-50" => MatchOutput::class(format!("-z-{}", &value[1..])),
        _ => arbitrary_output(property, "z", value),
    }
}

const DISPLAY: &[(&str, &str)] = &[
    ("block", "block"),
    ("inline-block", "inline-block"),
    ("inline", "inline"),
    ("flex", "flex"),
    ("inline-flex", "inline-flex"),
    ("grid", "grid"),
    ("inline-grid", "inline-grid"),
    ("table", "table"),
    ("contents", "contents"),
    ("flow-root", "flow-root"),
    ("none", "hidden"),
];
const POSITION: &[(&str, &str)] = &[
    ("static", "static"),
    ("fixed", "fixed"),
    ("absolute", "absolute"),
    ("relative", "relative"),
    ("sticky", "sticky"),
];
const FLEX_DIRECTION: &[(&str, &str)] = &[
    ("row", "flex-row"),
    ("row-reverse", "flex-row-reverse"),
    ("column", "flex-col"),
    ("column-reverse", "flex-col-reverse"),
];
const FLEX_WRAP: &[(&str, &str)] = &[
    ("wrap", "flex-wrap"),
    ("nowrap", "flex-nowrap"),
    ("wrap-reverse", "flex-wrap-reverse"),
];
const JUSTIFY_CONTENT: &[(&str, &str)] = &[
    ("flex-start", "justify-start"),
    ("start", "justify-start"),
    ("flex-end", "justify-end"),
    ("end", "justify-end"),
    ("center", "justify-center"),
    ("space-between", "justify-between"),
    ("space-around", "justify-around"),
    ("space-evenly", "justify-evenly"),
    ("stretch", "justify-stretch"),
    ("normal", "justify-normal"),
];
const ALIGN_ITEMS: &[(&str, &str)] = &[
    ("flex-start", "items-start"),
    ("start", "items-start"),
    ("flex-end", "items-end"),
    ("end", "items-end"),
    ("center", "items-center"),
    ("baseline", "items-baseline"),
    ("stretch", "items-stretch"),
];
const TEXT_ALIGN: &[(&str, &str)] = &[
    ("left", "text-left"),
    ("center", "text-center"),
    ("right", "text-right"),
    ("justify", "text-justify"),
    ("start", "text-start"),
    ("end", "text-end"),
];
const TEXT_DECORATION: &[(&str, &str)] = &[
    ("underline", "underline"),
    ("overline", "overline"),
    ("line-through", "line-through"),
    ("none", "no-underline"),
];
const TEXT_TRANSFORM: &[(&str, &str)] = &[
    ("uppercase", "uppercase"),
    ("lowercase", "lowercase"),
    ("capitalize", "capitalize"),
    ("none", "normal-case"),
];
const FONT_STYLE: &[(&str, &str)] = &[("italic", "italic"), ("normal", "not-italic")];
const BORDER_STYLE: &[(&str, &str)] = &[
    ("solid", "border-solid"),
    ("dashed", "border-dashed"),
    ("dotted", "border-dotted"),
    ("double", "border-double"),
    ("hidden", "border-hidden"),
    ("none", "border-none"),
];
const OVERFLOW: &[(&str, &str)] = &[
    ("auto", "overflow-auto"),
    ("hidden", "overflow-hidden"),
    ("clip", "overflow-clip"),
    ("visible", "overflow-visible"),
    ("scroll", "overflow-scroll"),
];
const OVERFLOW_X: &[(&str, &str)] = &[
    ("auto", "overflow-x-auto"),
    ("hidden", "overflow-x-hidden"),
    ("clip", "overflow-x-clip"),
    ("visible", "overflow-x-visible"),
    ("scroll", "overflow-x-scroll"),
];
const OVERFLOW_Y: &[(&str, &str)] = &[
    ("auto", "overflow-y-auto"),
    ("hidden", "overflow-y-hidden"),
    ("clip", "overflow-y-clip"),
    ("visible", "overflow-y-visible"),
    ("scroll", "overflow-y-scroll"),
];
const CURSOR: &[(&str, &str)] = &[
    ("auto", "cursor-auto"),
    ("default", "cursor-default"),
    ("pointer", "cursor-pointer"),
    ("wait", "cursor-wait"),
    ("text", "cursor-text"),
    ("move", "cursor-move"),
    ("help", "cursor-help"),
    ("not-allowed", "cursor-not-allowed"),
    ("grab", "cursor-grab"),
];

/// Render `prefix-key`, where the default key renders as the bare prefix.
fn utility(prefix: &str, key: &str) -> String {
    if key == DEFAULT_SHADE {
        prefix.to_string()
    } else {
        format!("{prefix}-{key}")
    }
}

/// Render an arbitrary-value class (`m-[13px]`). Spaces become underscores.
pub fn arbitrary(prefix: &str, value: &str) -> String {
    format!("{prefix}-[{}]", value.trim().replace(' ', "_"))
}

fn arbitrary_output(property: &str, prefix: &str, value: &str) -> MatchOutput {
    MatchOutput {
        classes: vec![arbitrary(prefix, value)],
        warnings: vec![arbitrary_value_warning(property, value)],
    }
}

fn is_zero(value: &str) -> bool {
    to_pixels(value, BASE_FONT_SIZE_PX) == Some(0.0)
}

/// Coverage category of a property.
pub fn property_category(property: &str) -> &'static str {
    let property = property.trim().to_ascii_lowercase();
    match property.as_str() {
        p if p.starts_with("margin") || p.starts_with("padding") || p.ends_with("gap") => "spacing",
        p if (p.ends_with("width") && !p.starts_with("border"))
            || (p.ends_with("height") && p != "line-height") =>
        {
            "sizing"
        }
        "top" | "right" | "bottom" | "left" | "inset" | "display" | "position" | "z-index"
        | "overflow" | "overflow-x" | "overflow-y" | "flex-direction" | "flex-wrap"
        | "justify-content" | "align-items" => "layout",
        p if p.starts_with("font") || p.starts_with("text") || p == "line-height" || p == "letter-spacing" => {
            "typography"
        }
        "color" | "background" | "background-color" => "colors",
        p if p.starts_with("border") || p.starts_with("outline") => "borders",
        "opacity" | "box-shadow" | "filter" | "transform" | "transition" => "effects",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ConversionConfig, MatchingContext};
    use crate::tokens::{TokenLayer, TokenSource};

    fn context(config: ConversionConfig) -> MatchingContext {
        MatchingContext::new(TokenSource::tailwind_defaults(), config).unwrap()
    }

    fn run(ctx: &MatchingContext, property: &str, value: &str) -> MatchOutput {
        BuiltinMatchers.match_property(property, value, &Resolver::new(ctx))
    }

    #[test]
    fn margin_shorthand_variants() {
        let ctx = context(ConversionConfig::default());
        assert_eq!(run(&ctx, "margin", "1rem").classes, vec!["m-4"]);
        assert_eq!(run(&ctx, "margin", "1rem 2rem").classes, vec!["my-4", "mx-8"]);
        assert_eq!(run(&ctx, "margin", "0 auto").classes, vec!["my-0", "mx-auto"]);
        assert_eq!(
            run(&ctx, "margin", "1rem 2rem 0.5rem").classes,
            vec!["mt-4", "mb-2", "mx-8"]
        );
        assert_eq!(
            run(&ctx, "padding", "1rem 2rem 1rem 0.5rem").classes,
            vec!["py-4", "pr-8", "pl-2"]
        );
    }

    #[test]
    fn negative_margins() {
        let ctx = context(ConversionConfig::default());
        assert_eq!(run(&ctx, "margin-top", "-1rem").classes, vec!["-mt-4"]);
        assert_eq!(run(&ctx, "margin-top", "-13px").classes, vec!["mt-[-13px]"]);
        // padding never goes negative
        assert_eq!(run(&ctx, "padding-top", "-1rem").classes, vec!["pt-[-1rem]"]);
    }

    #[test]
    fn arbitrary_fallback_warns() {
        let ctx = context(ConversionConfig::default());
        let out = run(&ctx, "padding", "13px");
        assert_eq!(out.classes, vec!["p-[13px]"]);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("arbitrary value"));
    }

    #[test]
    fn approximate_spacing() {
        let ctx = context(ConversionConfig::default().approximate(true));
        let out = run(&ctx, "padding-left", "17px");
        assert_eq!(out.classes, vec!["pl-4"]);
        assert!(out.warnings[0].contains("approximate"));
    }

    #[test]
    fn strict_miss_renders_arbitrary_with_token_miss() {
        let ctx = context(ConversionConfig::default().strict(true));
        let out = run(&ctx, "margin-left", "13px");
        assert_eq!(out.classes, vec!["ml-[13px]"]);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("token-miss"));
    }

    #[test]
    fn sizes() {
        let ctx = context(ConversionConfig::default());
        assert_eq!(run(&ctx, "width", "100%").classes, vec!["w-full"]);
        assert_eq!(run(&ctx, "width", "50%").classes, vec!["w-1/2"]);
        assert_eq!(run(&ctx, "height", "100vh").classes, vec!["h-screen"]);
        assert_eq!(run(&ctx, "width", "16rem").classes, vec!["w-64"]);
        assert_eq!(run(&ctx, "max-width", "none").classes, vec!["max-w-none"]);
        assert_eq!(
            run(&ctx, "width", "calc(100% - 2rem)").classes,
            vec!["w-[calc(100%_-_2rem)]"]
        );
    }

    #[test]
    fn colors() {
        let ctx = context(ConversionConfig::default());
        assert_eq!(run(&ctx, "color", "#2563eb").classes, vec!["text-blue-600"]);
        assert_eq!(run(&ctx, "background-color", "#fff").classes, vec!["bg-white"]);
        assert_eq!(run(&ctx, "color", "currentcolor").classes, vec!["text-current"]);
        assert_eq!(run(&ctx, "background", "#ef4444").classes, vec!["bg-red-500"]);
        assert_eq!(run(&ctx, "color", "#123456").classes, vec!["text-[#123456]"]);
        assert!(run(&ctx, "background", "url(a.png) no-repeat").is_empty());
    }

    #[test]
    fn zero_uses_the_zero_token() {
        let ctx = context(ConversionConfig::default().strict(true));
        let out = run(&ctx, "margin", "0");
        assert_eq!(out.classes, vec!["m-0"]);
        assert!(out.warnings.is_empty());
        assert_eq!(run(&ctx, "border-radius", "0px").classes, vec!["rounded-none"]);
    }

    #[test]
    fn strict_zero_without_zero_token_is_a_token_miss() {
        let layer = TokenLayer {
            spacing: [("4", "1rem")].into_iter().collect(),
            ..Default::default()
        };
        let strict = MatchingContext::new(
            TokenSource::current(layer.clone()),
            ConversionConfig::default().strict(true),
        )
        .unwrap();

        let out = run(&strict, "margin", "0");
        assert_eq!(out.classes, vec!["m-[0]"]);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("token-miss"));

        let lenient = MatchingContext::new(TokenSource::current(layer), ConversionConfig::default()).unwrap();
        let out = run(&lenient, "margin", "0");
        assert_eq!(out.classes, vec!["m-0"]);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn zero_from_legacy_layer_is_annotated() {
        let legacy = TokenLayer {
            spacing: [("0", "0px"), ("4", "1rem")].into_iter().collect(),
            ..Default::default()
        };
        let ctx = MatchingContext::new(
            TokenSource::layered(legacy, TokenLayer::default()),
            ConversionConfig::default(),
        )
        .unwrap();

        let out = run(&ctx, "padding", "0");
        assert_eq!(out.classes, vec!["p-0"]);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("v3-fallback"));
    }

    #[test]
    fn background_color_component_matches_background_color() {
        let ctx = context(ConversionConfig::default());
        for value in ["white", "tomato", "#2563eb", "#123456", "rgb(1,2,3)", "transparent"] {
            let longhand = run(&ctx, "background-color", value);
            let shorthand = run(&ctx, "background", value);
            assert_eq!(shorthand.classes, longhand.classes, "{value}");
            assert_eq!(shorthand.warnings.len(), longhand.warnings.len(), "{value}");
            assert!(!shorthand.is_empty(), "{value}");
        }

        for value in ["no-repeat", "center", "url(a.png)", "linear-gradient(red,blue)", "50%"] {
            assert!(run(&ctx, "background", value).is_empty(), "{value}");
        }
    }

    #[test]
    fn typography_scales() {
        let ctx = context(ConversionConfig::default());
        assert_eq!(run(&ctx, "font-size", "1.125rem").classes, vec!["text-lg"]);
        assert_eq!(run(&ctx, "line-height", "1.5").classes, vec!["leading-normal"]);
        assert_eq!(run(&ctx, "font-weight", "600").classes, vec!["font-semibold"]);
        assert_eq!(run(&ctx, "font-weight", "550").classes, vec!["font-[550]"]);
    }

    #[test]
    fn radius_and_borders() {
        let ctx = context(ConversionConfig::default());
        assert_eq!(run(&ctx, "border-radius", "0.25rem").classes, vec!["rounded"]);
        assert_eq!(run(&ctx, "border-radius", "0.5rem").classes, vec!["rounded-lg"]);
        assert_eq!(run(&ctx, "border-radius", "0").classes, vec!["rounded-none"]);
        assert_eq!(run(&ctx, "border-width", "2px").classes, vec!["border-2"]);
        assert_eq!(
            run(&ctx, "border", "1px solid #e5e7eb").classes,
            vec!["border", "border-solid", "border-gray-200"]
        );
        assert_eq!(run(&ctx, "border", "none").classes, vec!["border-none"]);
    }

    #[test]
    fn keyword_tables() {
        let ctx = context(ConversionConfig::default());
        assert_eq!(run(&ctx, "display", "none").classes, vec!["hidden"]);
        assert_eq!(run(&ctx, "flex-direction", "column").classes, vec!["flex-col"]);
        assert_eq!(run(&ctx, "justify-content", "space-between").classes, vec!["justify-between"]);
        assert_eq!(run(&ctx, "text-decoration", "none").classes, vec!["no-underline"]);
        assert!(run(&ctx, "display", "ruby").is_empty());
    }

    #[test]
    fn misc_values() {
        let ctx = context(ConversionConfig::default());
        assert_eq!(run(&ctx, "opacity", "0.5").classes, vec!["opacity-50"]);
        assert_eq!(run(&ctx, "opacity", "75%").classes, vec!["opacity-75"]);
        assert_eq!(run(&ctx, "opacity", "0.33").classes, vec!["opacity-[0.33]"]);
        assert_eq!(run(&ctx, "z-index", "10").classes, vec!["z-10"]);
        assert_eq!(run(&ctx, "z-index", "-10").classes, vec!["-z-10"]);
        assert_eq!(run(&ctx, "z-index", "999").classes, vec!["z-[999]"]);
        assert_eq!(run(&ctx, "box-shadow", "none").classes, vec!["shadow-none"]);
        assert_eq!(run(&ctx, "gap", "1rem 2rem").classes, vec!["gap-y-4", "gap-x-8"]);
    }

    #[test]
    fn unknown_property_has_no_handler() {
        let ctx = context(ConversionConfig::default());
        assert_eq!(run(&ctx, "mask-image", "none"), MatchOutput::default());
        assert_eq!(run(&ctx, "--brand", "#fff"), MatchOutput::default());
    }

    #[test]
    fn categories() {
        assert_eq!(property_category("margin-top"), "spacing");
        assert_eq!(property_category("max-width"), "sizing");
        assert_eq!(property_category("line-height"), "typography");
        assert_eq!(property_category("border-width"), "borders");
        assert_eq!(property_category("background-color"), "colors");
        assert_eq!(property_category("display"), "layout");
        assert_eq!(property_category("opacity"), "effects");
        assert_eq!(property_category("cursor"), "other");
    }
}
