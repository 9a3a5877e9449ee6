//! Style rule derivation.
//!
//! Maps one node's attributes onto an ordered list of CSS declarations:
//! geometry to explicit positioning, paints to backgrounds and borders,
//! corner radius to `border-radius`, typography to font rules. Only the
//! node itself and its parent's box are consulted.

use fhtml_tree::node::{
    BlendMode, Color, CornerRadius, Effect, GradientKind, GradientStop, LetterSpacing,
    LineHeight, Paint, Point, ShapeKind, StrokeAlign, StrokeStyle, TextAlign, TextCase,
    TextDecoration, TextStyle, VerticalAlign,
};
use fhtml_tree::{Node, NodeKind, Rect};

use crate::{format_number, round3, Options};

/// Centered text within this distance of its parent's center is centered by CSS.
const CENTER_SNAP_PX: f64 = 20.0;

/// Ordered CSS declarations. Setting an existing property replaces its value
/// in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Declarations {
    entries: Vec<(&'static str, String)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(p, v)| (*p, v.as_str()))
    }
}

/// One generated rule, selected by its class.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub class: String,
    pub declarations: Declarations,
}

/// Derive the declarations for `node`. `parent` is `None` for the screen root.
pub fn rule_for(node: &Node, parent: Option<&Node>, options: &Options) -> Declarations {
    let mut decls = Declarations::new();
    let is_root = parent.is_none();

    geometry(node, parent.and_then(|p| p.bounds), is_root, &mut decls);

    if let Some(opacity) = node.opacity.filter(|o| *o < 1.0) {
        decls.set("opacity", format_number(round3(opacity)));
    }

    match &node.kind {
        NodeKind::Text(text) => {
            typography(&text.style, &mut decls);
            if text.characters.contains('\n') {
                decls.set("white-space", "pre-wrap");
            }
            if let Some(Paint::Solid(color)) = node.fills.first() {
                decls.set("color", css_color(*color));
            }
        }
        NodeKind::Shape(ShapeKind::Line) => {
            if let Some(Paint::Solid(color)) = node.strokes.first() {
                decls.set("background-color", css_color(*color));
            }
        }
        NodeKind::Group => {
            strokes(node, &mut decls);
        }
        NodeKind::Frame | NodeKind::Shape(_) => {
            fills(&node.fills, &mut decls);
            strokes(node, &mut decls);
        }
    }

    effects(&node.effects, &mut decls);

    if let Some(mode) = node.blend_mode.and_then(blend_mode) {
        decls.set("mix-blend-mode", mode);
    }

    match node.kind {
        NodeKind::Shape(ShapeKind::Ellipse) => decls.set("border-radius", "50%"),
        _ => {
            if let Some(radius) = border_radius(node.corner_radius) {
                decls.set("border-radius", radius);
            }
        }
    }

    if options.clip_rounded && node.corner_radius.is_rounded() && !node.children.is_empty() {
        decls.set("overflow", "hidden");
    }

    if node.kind == NodeKind::Frame && !node.children.is_empty() && !decls.contains("position") {
        decls.set("position", "relative");
    }

    decls
}

// =========================================================================
// Geometry
// =========================================================================

fn geometry(node: &Node, parent: Option<Rect>, is_root: bool, decls: &mut Declarations) {
    let Some(b) = node.bounds else {
        return;
    };

    if is_root {
        decls.set("position", "relative");
        decls.set("margin", "0 auto");
        decls.set("width", px(b.width));
        decls.set("height", px(b.height));
        return;
    }

    let (left, top) = match parent {
        Some(p) => (b.x - p.x, b.y - p.y),
        None => (b.x, b.y),
    };

    decls.set("position", "absolute");

    let centered = match (&node.kind, parent) {
        (NodeKind::Text(text), Some(p)) => {
            text.style.align == Some(TextAlign::Center)
                && (left + b.width / 2.0 - p.width / 2.0).abs() < CENTER_SNAP_PX
        }
        _ => false,
    };

    if centered {
        decls.set("left", "50%");
        decls.set("top", px(top));
        decls.set("transform", "translateX(-50%)");
        decls.set("width", "auto");
    } else {
        decls.set("left", px(left));
        decls.set("top", px(top));
        decls.set("width", px(b.width));
    }
    decls.set("height", px(b.height));
}

fn px(value: f64) -> String {
    format!("{}px", format_number(round3(value)))
}

// =========================================================================
// Paints
// =========================================================================

/// `rgb(R, G, B)`, or `rgba(R, G, B, a)` when translucent.
pub fn css_color(color: Color) -> String {
    let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
    let (r, g, b) = (channel(color.r), channel(color.g), channel(color.b));
    if color.a < 1.0 {
        format!("rgba({r}, {g}, {b}, {})", format_number(round3(color.a)))
    } else {
        format!("rgb({r}, {g}, {b})")
    }
}

fn fills(paints: &[Paint], decls: &mut Declarations) {
    match paints {
        [] => {}
        [Paint::Solid(color)] => decls.set("background-color", css_color(*color)),
        [Paint::Image] => {
            decls.set("background-size", "cover");
            decls.set("background-position", "center");
        }
        [layer @ Paint::Gradient { .. }] => {
            if let Some(value) = paint_layer(layer) {
                decls.set("background", value);
            }
        }
        // Paints are listed bottom-up; CSS layers are top-down.
        layers => {
            let values: Vec<String> = layers.iter().rev().filter_map(paint_layer).collect();
            if !values.is_empty() {
                decls.set("background", values.join(", "));
            }
        }
    }
}

fn paint_layer(paint: &Paint) -> Option<String> {
    match paint {
        Paint::Solid(color) => Some(css_color(*color)),
        Paint::Gradient {
            kind,
            stops,
            handles,
        } => gradient(*kind, stops, handles),
        Paint::Image => None,
    }
}

fn gradient(kind: GradientKind, stops: &[GradientStop], handles: &[Point]) -> Option<String> {
    if stops.is_empty() {
        return None;
    }
    let stops = stops
        .iter()
        .map(|s| {
            format!(
                "{} {}%",
                css_color(s.color),
                format_number(round3(s.position * 100.0))
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    Some(match kind {
        GradientKind::Linear => format!("linear-gradient({}deg, {stops})", linear_angle(handles)),
        GradientKind::Radial | GradientKind::Diamond => format!("radial-gradient(circle, {stops})"),
        GradientKind::Angular => format!("conic-gradient({stops})"),
    })
}

/// CSS angle of the first two gradient handles (0deg points up, clockwise).
/// Top-to-bottom when the handles are missing.
fn linear_angle(handles: &[Point]) -> String {
    let [start, end, ..] = handles else {
        return "180".to_string();
    };
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let mut degrees = dx.atan2(-dy).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    format_number(round3(degrees))
}

fn strokes(node: &Node, decls: &mut Declarations) {
    let Some(Paint::Solid(color)) = node.strokes.first() else {
        return;
    };
    let color = css_color(*color);
    let width = px(node.stroke.weight);
    let style = match node.stroke.style {
        StrokeStyle::Solid => "solid",
        StrokeStyle::Dashed => "dashed",
        StrokeStyle::Dotted => "dotted",
    };

    match node.stroke.align {
        StrokeAlign::Inside | StrokeAlign::Center => {
            decls.set("border-style", style);
            decls.set("border-width", width);
            decls.set("border-color", color);
        }
        StrokeAlign::Outside => decls.set("outline", format!("{width} {style} {color}")),
    }
}

fn effects(effects: &[Effect], decls: &mut Declarations) {
    let mut shadows = Vec::new();
    for effect in effects {
        match *effect {
            Effect::DropShadow {
                offset,
                radius,
                color,
            } => shadows.push(shadow("", offset, radius, color)),
            Effect::InnerShadow {
                offset,
                radius,
                color,
            } => shadows.push(shadow("inset ", offset, radius, color)),
            Effect::LayerBlur { radius } => decls.set("filter", format!("blur({})", px(radius))),
            Effect::BackgroundBlur { radius } => {
                decls.set("backdrop-filter", format!("blur({})", px(radius)))
            }
        }
    }
    if !shadows.is_empty() {
        decls.set("box-shadow", shadows.join(", "));
    }
}

fn shadow(prefix: &str, offset: Point, radius: f64, color: Color) -> String {
    format!(
        "{prefix}{} {} {} {}",
        px(offset.x),
        px(offset.y),
        px(radius),
        css_color(color)
    )
}

fn blend_mode(mode: BlendMode) -> Option<&'static str> {
    let name = match mode {
        // Pass-through is the CSS default.
        BlendMode::PassThrough => return None,
        BlendMode::Multiply => "multiply",
        BlendMode::Screen => "screen",
        BlendMode::Overlay => "overlay",
        BlendMode::Darken => "darken",
        BlendMode::Lighten => "lighten",
        BlendMode::ColorDodge => "color-dodge",
        BlendMode::ColorBurn => "color-burn",
        BlendMode::HardLight => "hard-light",
        BlendMode::SoftLight => "soft-light",
        BlendMode::Difference => "difference",
        BlendMode::Exclusion => "exclusion",
        BlendMode::Hue => "hue",
        BlendMode::Saturation => "saturation",
        BlendMode::Color => "color",
        BlendMode::Luminosity => "luminosity",
    };
    Some(name)
}

fn border_radius(radius: CornerRadius) -> Option<String> {
    match radius {
        CornerRadius::None => None,
        CornerRadius::Uniform(r) => Some(px(r)),
        CornerRadius::PerCorner(radii) => Some(
            radii
                .iter()
                .map(|r| px(*r))
                .collect::<Vec<_>>()
                .join(" "),
        ),
    }
}

// =========================================================================
// Typography
// =========================================================================

fn typography(style: &TextStyle, decls: &mut Declarations) {
    if let Some(family) = &style.font_family {
        decls.set("font-family", format!("\"{family}\", sans-serif"));
    }
    if let Some(size) = style.font_size {
        decls.set("font-size", px(size));
    }
    if let Some(weight) = style.font_weight {
        decls.set("font-weight", format_number(weight));
    }
    if style.italic {
        decls.set("font-style", "italic");
    }

    match style.letter_spacing {
        Some(LetterSpacing::Pixels(v)) => decls.set("letter-spacing", px(v)),
        Some(LetterSpacing::Percent(v)) => {
            decls.set("letter-spacing", format!("{}em", format_number(round3(v / 100.0))))
        }
        None => {}
    }

    match style.line_height {
        Some(LineHeight::Pixels(v)) => decls.set("line-height", px(v)),
        Some(LineHeight::Percent(v)) => {
            decls.set("line-height", format!("{}%", format_number(round3(v))))
        }
        Some(LineHeight::PercentFontSize(v)) => {
            let size = style.font_size.unwrap_or(16.0);
            decls.set("line-height", px(size * v / 100.0));
        }
        None => {}
    }

    if let Some(align) = style.align {
        let value = match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justified => "justify",
        };
        decls.set("text-align", value);
    }

    if style.vertical_align == Some(VerticalAlign::Center) {
        decls.set("display", "flex");
        decls.set("align-items", "center");
    }

    if let Some(decoration) = style.decoration {
        let value = match decoration {
            TextDecoration::Underline => "underline",
            TextDecoration::Strikethrough => "line-through",
        };
        decls.set("text-decoration", value);
    }

    if let Some(case) = style.case {
        let value = match case {
            TextCase::Upper => "uppercase",
            TextCase::Lower => "lowercase",
            TextCase::Title => "capitalize",
        };
        decls.set("text-transform", value);
    }
}
