//! Design-file decoding.
//!
//! Deserializes the JSON export into raw `serde` structs that mirror the
//! file format, picks the screen root, then converts the raw tree into
//! [`Node`]s. Hidden nodes and hidden paints are dropped here; absolute
//! bounding boxes are rebased onto the screen root's origin.
//!
//! Missing optional attributes fall back to defaults. Only structural
//! mismatches (not JSON, wrong value types, a node without `type`, no
//! screen to render) are reported as [`LoadError::MalformedInput`].

use serde::Deserialize;
use serde_json::Value;

use crate::node::{
    BlendMode, Color, CornerRadius, Effect, GradientKind, GradientStop, LetterSpacing,
    LineHeight, Node, NodeKind, Paint, Point, Rect, ShapeKind, Stroke, StrokeAlign, StrokeStyle,
    Text, TextAlign, TextCase, TextDecoration, TextStyle, VerticalAlign,
};
use crate::LoadError;

/// Node types that can serve as a screen root.
const SCREEN_TYPES: &[&str] = &["FRAME", "COMPONENT", "COMPONENT_SET", "INSTANCE", "SECTION"];

/// How the screen root is chosen from a full document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RootSelector {
    /// The largest top-level frame of the first page that has one.
    #[default]
    Largest,
    /// The first node (document order) whose id or name equals the key.
    Matching(String),
}

/// Decode a JSON export, choosing the screen root automatically.
pub fn decode_document(json: &str) -> Result<Node, LoadError> {
    decode_document_with(json, &RootSelector::Largest)
}

/// Decode a JSON export with an explicit root selector.
///
/// Accepts either a full file response (`{"document": {...}, ...}`) or a
/// bare node object.
pub fn decode_document_with(json: &str, selector: &RootSelector) -> Result<Node, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    let raw: RawNode = match value {
        Value::Object(mut map) => match map.remove("document") {
            Some(document) => serde_json::from_value(document)?,
            None => serde_json::from_value(Value::Object(map))?,
        },
        _ => return Err(LoadError::malformed("expected a JSON object at the top level")),
    };

    let screen = select_screen(&raw, selector)?;
    tracing::debug!(id = %screen.id, name = %screen.name, "selected screen root");

    let (ox, oy) = screen
        .absolute_bounding_box
        .map(|b| (b.x, b.y))
        .unwrap_or((0.0, 0.0));

    convert(screen, ox, oy).ok_or_else(|| {
        LoadError::malformed(format!(
            "screen `{}` is hidden or has unsupported type {}",
            screen.name, screen.node_type
        ))
    })
}

// =========================================================================
// Raw file format
// =========================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    visible: Option<bool>,
    #[serde(default)]
    absolute_bounding_box: Option<RawRect>,
    #[serde(default)]
    fills: Vec<RawPaint>,
    #[serde(default)]
    strokes: Vec<RawPaint>,
    #[serde(default)]
    stroke_weight: Option<f64>,
    #[serde(default)]
    stroke_align: Option<String>,
    #[serde(default)]
    stroke_dashes: Vec<f64>,
    #[serde(default)]
    corner_radius: Option<f64>,
    #[serde(default)]
    rectangle_corner_radii: Option<[f64; 4]>,
    #[serde(default)]
    rectangle_top_left_corner_radius: Option<f64>,
    #[serde(default)]
    rectangle_top_right_corner_radius: Option<f64>,
    #[serde(default)]
    rectangle_bottom_right_corner_radius: Option<f64>,
    #[serde(default)]
    rectangle_bottom_left_corner_radius: Option<f64>,
    #[serde(default)]
    opacity: Option<f64>,
    #[serde(default)]
    effects: Vec<RawEffect>,
    #[serde(default)]
    blend_mode: Option<String>,
    #[serde(default)]
    characters: Option<String>,
    #[serde(default)]
    style: Option<RawTypeStyle>,
    #[serde(default)]
    children: Vec<RawNode>,
}

impl RawNode {
    fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct RawRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl RawRect {
    fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
struct RawColor {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Default for RawColor {
    fn default() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}

impl From<RawColor> for Color {
    fn from(raw: RawColor) -> Self {
        Color::rgb(raw.r, raw.g, raw.b).with_alpha(raw.a)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct RawVector {
    x: f64,
    y: f64,
}

impl From<RawVector> for Point {
    fn from(raw: RawVector) -> Self {
        Point { x: raw.x, y: raw.y }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPaint {
    #[serde(rename = "type")]
    paint_type: String,
    #[serde(default)]
    visible: Option<bool>,
    #[serde(default)]
    opacity: Option<f64>,
    #[serde(default)]
    color: Option<RawColor>,
    #[serde(default)]
    gradient_stops: Vec<RawStop>,
    #[serde(default)]
    gradient_handle_positions: Vec<RawVector>,
}

#[derive(Debug, Deserialize)]
struct RawStop {
    #[serde(default)]
    color: RawColor,
    #[serde(default)]
    position: f64,
}

#[derive(Debug, Deserialize)]
struct RawEffect {
    #[serde(rename = "type")]
    effect_type: String,
    #[serde(default)]
    visible: Option<bool>,
    #[serde(default)]
    offset: RawVector,
    #[serde(default)]
    radius: f64,
    #[serde(default)]
    color: RawColor,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLetterSpacing {
    Number(f64),
    Unit {
        value: f64,
        #[serde(default)]
        unit: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawTypeStyle {
    font_family: Option<String>,
    font_size: Option<f64>,
    font_weight: Option<f64>,
    italic: Option<bool>,
    font_style: Option<String>,
    letter_spacing: Option<RawLetterSpacing>,
    line_height_px: Option<f64>,
    line_height_percent: Option<f64>,
    line_height_percent_font_size: Option<f64>,
    text_align_horizontal: Option<String>,
    text_align_vertical: Option<String>,
    text_decoration: Option<String>,
    text_case: Option<String>,
}

// =========================================================================
// Screen selection
// =========================================================================

fn select_screen<'a>(raw: &'a RawNode, selector: &RootSelector) -> Result<&'a RawNode, LoadError> {
    match selector {
        RootSelector::Matching(key) => find_node(raw, key)
            .ok_or_else(|| LoadError::malformed(format!("no node with id or name `{key}`"))),
        RootSelector::Largest => match raw.node_type.as_str() {
            "DOCUMENT" => raw
                .children
                .iter()
                .filter(|page| page.node_type == "CANVAS")
                .find_map(largest_frame)
                .ok_or_else(|| LoadError::malformed("document has no top-level frame to render")),
            "CANVAS" => largest_frame(raw)
                .ok_or_else(|| LoadError::malformed("page has no top-level frame to render")),
            _ => Ok(raw),
        },
    }
}

/// Largest visible top-level frame on a page; ties keep the first.
fn largest_frame(page: &RawNode) -> Option<&RawNode> {
    let mut best: Option<(&RawNode, f64)> = None;
    for child in &page.children {
        if !child.is_visible() || !SCREEN_TYPES.contains(&child.node_type.as_str()) {
            continue;
        }
        let Some(bbox) = child.absolute_bounding_box else {
            continue;
        };
        match best {
            Some((_, area)) if area >= bbox.area() => {}
            _ => best = Some((child, bbox.area())),
        }
    }
    best.map(|(node, _)| node)
}

fn find_node<'a>(raw: &'a RawNode, key: &str) -> Option<&'a RawNode> {
    if raw.id == key || raw.name == key {
        return Some(raw);
    }
    raw.children.iter().find_map(|child| find_node(child, key))
}

// =========================================================================
// Raw → model conversion
// =========================================================================

/// Convert a raw node, rebasing onto `(ox, oy)`. Returns `None` for hidden
/// nodes and unsupported leaf types.
fn convert(raw: &RawNode, ox: f64, oy: f64) -> Option<Node> {
    if !raw.is_visible() {
        return None;
    }

    let kind = match raw.node_type.as_str() {
        t if SCREEN_TYPES.contains(&t) => NodeKind::Frame,
        "GROUP" | "CANVAS" => NodeKind::Group,
        "TEXT" => NodeKind::Text(Text {
            characters: raw.characters.clone().unwrap_or_default(),
            style: raw.style.as_ref().map(text_style).unwrap_or_default(),
        }),
        "RECTANGLE" => NodeKind::Shape(ShapeKind::Rectangle),
        "ELLIPSE" => NodeKind::Shape(ShapeKind::Ellipse),
        "LINE" => NodeKind::Shape(ShapeKind::Line),
        "VECTOR" | "STAR" | "POLYGON" | "REGULAR_POLYGON" | "BOOLEAN_OPERATION" => {
            NodeKind::Shape(ShapeKind::Vector)
        }
        other if !raw.children.is_empty() => {
            tracing::warn!(id = %raw.id, node_type = other, "unknown node type, rendering as group");
            NodeKind::Group
        }
        other => {
            tracing::warn!(id = %raw.id, node_type = other, "unknown leaf node type, skipping");
            return None;
        }
    };

    // Vector operands are path geometry, not layout.
    let children = if kind == NodeKind::Shape(ShapeKind::Vector) {
        Vec::new()
    } else {
        raw.children
            .iter()
            .filter_map(|child| convert(child, ox, oy))
            .collect()
    };

    Some(Node {
        id: raw.id.clone(),
        name: raw.name.clone(),
        kind,
        bounds: raw
            .absolute_bounding_box
            .map(|b| Rect::new(b.x, b.y, b.width, b.height).rebased(ox, oy)),
        fills: raw.fills.iter().filter_map(paint).collect(),
        strokes: raw.strokes.iter().filter_map(paint).collect(),
        stroke: stroke(raw),
        corner_radius: corner_radius(raw),
        opacity: raw.opacity,
        effects: raw.effects.iter().filter_map(effect).collect(),
        blend_mode: raw.blend_mode.as_deref().and_then(BlendMode::from_name),
        children,
    })
}

fn paint(raw: &RawPaint) -> Option<Paint> {
    if !raw.visible.unwrap_or(true) {
        return None;
    }
    let opacity = raw.opacity.unwrap_or(1.0);
    let gradient = |kind| Paint::Gradient {
        kind,
        stops: raw
            .gradient_stops
            .iter()
            .map(|s| GradientStop {
                color: s.color.into(),
                position: s.position,
            })
            .collect(),
        handles: raw
            .gradient_handle_positions
            .iter()
            .map(|&h| h.into())
            .collect(),
    };

    match raw.paint_type.as_str() {
        "SOLID" => {
            let color: Color = raw.color.unwrap_or_default().into();
            Some(Paint::Solid(color.with_alpha(color.a * opacity)))
        }
        "GRADIENT_LINEAR" => Some(gradient(GradientKind::Linear)),
        "GRADIENT_RADIAL" => Some(gradient(GradientKind::Radial)),
        "GRADIENT_ANGULAR" => Some(gradient(GradientKind::Angular)),
        "GRADIENT_DIAMOND" => Some(gradient(GradientKind::Diamond)),
        "IMAGE" => Some(Paint::Image),
        _ => None,
    }
}

fn stroke(raw: &RawNode) -> Stroke {
    let align = match raw.stroke_align.as_deref() {
        Some("CENTER") => StrokeAlign::Center,
        Some("OUTSIDE") => StrokeAlign::Outside,
        _ => StrokeAlign::Inside,
    };
    let style = match raw.stroke_dashes.len() {
        0 => StrokeStyle::Solid,
        2 => StrokeStyle::Dashed,
        _ => StrokeStyle::Dotted,
    };
    Stroke {
        weight: raw.stroke_weight.unwrap_or(1.0),
        align,
        style,
    }
}

fn corner_radius(raw: &RawNode) -> CornerRadius {
    let per_corner = raw.rectangle_corner_radii.or_else(|| {
        Some([
            raw.rectangle_top_left_corner_radius?,
            raw.rectangle_top_right_corner_radius?,
            raw.rectangle_bottom_right_corner_radius?,
            raw.rectangle_bottom_left_corner_radius?,
        ])
    });

    match (per_corner, raw.corner_radius) {
        (Some(radii), _) if radii.iter().all(|r| *r == radii[0]) => uniform(radii[0]),
        (Some(radii), _) => CornerRadius::PerCorner(radii),
        (None, Some(r)) => uniform(r),
        (None, None) => CornerRadius::None,
    }
}

fn uniform(r: f64) -> CornerRadius {
    if r > 0.0 {
        CornerRadius::Uniform(r)
    } else {
        CornerRadius::None
    }
}

fn effect(raw: &RawEffect) -> Option<Effect> {
    if !raw.visible.unwrap_or(true) {
        return None;
    }
    match raw.effect_type.as_str() {
        "DROP_SHADOW" => Some(Effect::DropShadow {
            offset: raw.offset.into(),
            radius: raw.radius,
            color: raw.color.into(),
        }),
        "INNER_SHADOW" => Some(Effect::InnerShadow {
            offset: raw.offset.into(),
            radius: raw.radius,
            color: raw.color.into(),
        }),
        "LAYER_BLUR" => Some(Effect::LayerBlur { radius: raw.radius }),
        "BACKGROUND_BLUR" => Some(Effect::BackgroundBlur { radius: raw.radius }),
        _ => None,
    }
}

fn text_style(raw: &RawTypeStyle) -> TextStyle {
    let italic = raw.italic.unwrap_or(false)
        || raw
            .font_style
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains("italic"));

    let letter_spacing = raw.letter_spacing.as_ref().map(|ls| match ls {
        RawLetterSpacing::Number(px) => LetterSpacing::Pixels(*px),
        RawLetterSpacing::Unit { value, unit } if unit.as_deref() == Some("PERCENT") => {
            LetterSpacing::Percent(*value)
        }
        RawLetterSpacing::Unit { value, .. } => LetterSpacing::Pixels(*value),
    });

    let line_height = raw
        .line_height_px
        .map(LineHeight::Pixels)
        .or(raw.line_height_percent.map(LineHeight::Percent))
        .or(raw
            .line_height_percent_font_size
            .map(LineHeight::PercentFontSize));

    TextStyle {
        font_family: raw.font_family.clone(),
        font_size: raw.font_size,
        font_weight: raw.font_weight,
        italic,
        letter_spacing,
        line_height,
        align: match raw.text_align_horizontal.as_deref() {
            Some("LEFT") => Some(TextAlign::Left),
            Some("CENTER") => Some(TextAlign::Center),
            Some("RIGHT") => Some(TextAlign::Right),
            Some("JUSTIFIED") => Some(TextAlign::Justified),
            _ => None,
        },
        vertical_align: match raw.text_align_vertical.as_deref() {
            Some("TOP") => Some(VerticalAlign::Top),
            Some("CENTER") => Some(VerticalAlign::Center),
            Some("BOTTOM") => Some(VerticalAlign::Bottom),
            _ => None,
        },
        decoration: match raw.text_decoration.as_deref() {
            Some("UNDERLINE") => Some(TextDecoration::Underline),
            Some("STRIKETHROUGH") => Some(TextDecoration::Strikethrough),
            _ => None,
        },
        case: match raw.text_case.as_deref() {
            Some("UPPER") => Some(TextCase::Upper),
            Some("LOWER") => Some(TextCase::Lower),
            Some("TITLE") => Some(TextCase::Title),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(json: &str) -> Node {
        decode_document(json).unwrap()
    }

    fn file(frames: &str) -> String {
        format!(
            r#"{{"name": "File", "document": {{"id": "0:0", "type": "DOCUMENT", "children": [
                {{"id": "0:1", "name": "Page 1", "type": "CANVAS", "children": [{frames}]}}
            ]}}}}"#
        )
    }

    // =========================================================================
    // Screen selection
    // =========================================================================

    #[test]
    fn test_bare_node() {
        let root = decode(
            r#"{"id": "1:1", "name": "Screen", "type": "FRAME",
                "absoluteBoundingBox": {"x": 40, "y": 60, "width": 375, "height": 812}}"#,
        );
        assert_eq!(root.id, "1:1");
        assert_eq!(root.kind, NodeKind::Frame);
        assert_eq!(root.bounds, Some(Rect::new(0.0, 0.0, 375.0, 812.0)));
    }

    #[test]
    fn test_largest_frame_is_root() {
        let json = file(
            r#"{"id": "1:1", "name": "Small", "type": "FRAME",
                "absoluteBoundingBox": {"x": 0, "y": 0, "width": 10, "height": 10}},
               {"id": "1:2", "name": "Big", "type": "FRAME",
                "absoluteBoundingBox": {"x": 100, "y": 0, "width": 375, "height": 812}}"#,
        );
        assert_eq!(decode(&json).name, "Big");
    }

    #[test]
    fn test_equal_frames_keep_first() {
        let json = file(
            r#"{"id": "1:1", "name": "A", "type": "FRAME",
                "absoluteBoundingBox": {"x": 0, "y": 0, "width": 10, "height": 10}},
               {"id": "1:2", "name": "B", "type": "INSTANCE",
                "absoluteBoundingBox": {"x": 20, "y": 0, "width": 10, "height": 10}}"#,
        );
        assert_eq!(decode(&json).name, "A");
    }

    #[test]
    fn test_hidden_frame_not_selected() {
        let json = file(
            r#"{"id": "1:1", "name": "Hidden", "type": "FRAME", "visible": false,
                "absoluteBoundingBox": {"x": 0, "y": 0, "width": 1000, "height": 1000}},
               {"id": "1:2", "name": "Shown", "type": "FRAME",
                "absoluteBoundingBox": {"x": 0, "y": 0, "width": 10, "height": 10}}"#,
        );
        assert_eq!(decode(&json).name, "Shown");
    }

    #[test]
    fn test_matching_selector_by_name_and_id() {
        let json = file(
            r#"{"id": "1:1", "name": "Home", "type": "FRAME",
                "absoluteBoundingBox": {"x": 0, "y": 0, "width": 375, "height": 812}},
               {"id": "1:2", "name": "Settings", "type": "FRAME",
                "absoluteBoundingBox": {"x": 400, "y": 0, "width": 10, "height": 10}}"#,
        );
        let by_name =
            decode_document_with(&json, &RootSelector::Matching("Settings".into())).unwrap();
        assert_eq!(by_name.id, "1:2");
        assert_eq!(by_name.bounds, Some(Rect::new(0.0, 0.0, 10.0, 10.0)));

        let by_id = decode_document_with(&json, &RootSelector::Matching("1:1".into())).unwrap();
        assert_eq!(by_id.name, "Home");
    }

    #[test]
    fn test_matching_selector_missing() {
        let json = file(r#"{"id": "1:1", "name": "Home", "type": "FRAME"}"#);
        let err = decode_document_with(&json, &RootSelector::Matching("Nope".into())).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { .. }));
    }

    #[test]
    fn test_document_without_frames() {
        let err = decode_document(&file("")).unwrap_err();
        assert_eq!(
            err,
            LoadError::malformed("document has no top-level frame to render")
        );
    }

    // =========================================================================
    // Malformed input
    // =========================================================================

    #[test]
    fn test_not_json() {
        let err = decode_document("not json").unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { .. }));
    }

    #[test]
    fn test_top_level_array() {
        let err = decode_document("[]").unwrap_err();
        assert_eq!(
            err,
            LoadError::malformed("expected a JSON object at the top level")
        );
    }

    #[test]
    fn test_missing_type() {
        let err = decode_document(r#"{"id": "1:1", "name": "Screen"}"#).unwrap_err();
        match err {
            LoadError::MalformedInput { message } => assert!(message.contains("type")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_children_type() {
        let err =
            decode_document(r#"{"id": "1:1", "type": "FRAME", "children": "oops"}"#).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { .. }));
    }

    #[test]
    fn test_hidden_root() {
        let err = decode_document(r#"{"id": "1:1", "type": "FRAME", "visible": false}"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { .. }));
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    #[test]
    fn test_children_rebased_and_ordered() {
        let root = decode(
            r#"{"id": "1:1", "name": "Screen", "type": "FRAME",
                "absoluteBoundingBox": {"x": 100, "y": 200, "width": 375, "height": 812},
                "children": [
                  {"id": "2:1", "name": "First", "type": "RECTANGLE",
                   "absoluteBoundingBox": {"x": 110, "y": 220, "width": 50, "height": 20}},
                  {"id": "2:2", "name": "Second", "type": "ELLIPSE",
                   "absoluteBoundingBox": {"x": 100, "y": 200, "width": 8, "height": 8}}
                ]}"#,
        );
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(root.children[0].bounds, Some(Rect::new(10.0, 20.0, 50.0, 20.0)));
        assert_eq!(root.children[1].kind, NodeKind::Shape(ShapeKind::Ellipse));
    }

    #[test]
    fn test_hidden_children_dropped() {
        let root = decode(
            r#"{"id": "1:1", "type": "FRAME", "children": [
                  {"id": "2:1", "type": "RECTANGLE", "visible": false},
                  {"id": "2:2", "type": "RECTANGLE"}
                ]}"#,
        );
        assert_eq!(root.count(), 2);
        assert_eq!(root.children[0].id, "2:2");
    }

    #[test]
    fn test_unknown_types() {
        let root = decode(
            r#"{"id": "1:1", "type": "FRAME", "children": [
                  {"id": "2:1", "type": "SLICE"},
                  {"id": "2:2", "type": "WIDGET", "children": [{"id": "3:1", "type": "LINE"}]}
                ]}"#,
        );
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].kind, NodeKind::Group);
        assert_eq!(root.children[0].children[0].kind, NodeKind::Shape(ShapeKind::Line));
    }

    #[test]
    fn test_boolean_operation_is_leaf() {
        let root = decode(
            r#"{"id": "1:1", "type": "FRAME", "children": [
                  {"id": "2:1", "type": "BOOLEAN_OPERATION", "children": [
                     {"id": "3:1", "type": "VECTOR"}, {"id": "3:2", "type": "VECTOR"}
                  ]}
                ]}"#,
        );
        assert_eq!(root.count(), 2);
        assert_eq!(root.children[0].kind, NodeKind::Shape(ShapeKind::Vector));
    }

    #[test]
    fn test_missing_bounding_box() {
        let root = decode(r#"{"id": "1:1", "type": "FRAME"}"#);
        assert_eq!(root.bounds, None);
    }

    #[test]
    fn test_solid_paint_opacity() {
        let root = decode(
            r#"{"id": "1:1", "type": "FRAME", "fills": [
                  {"type": "SOLID", "opacity": 0.5, "color": {"r": 1, "g": 0, "b": 0, "a": 1}},
                  {"type": "SOLID", "visible": false, "color": {"r": 0, "g": 1, "b": 0, "a": 1}},
                  {"type": "EMOJI"}
                ]}"#,
        );
        assert_eq!(
            root.fills,
            vec![Paint::Solid(Color::rgb(1.0, 0.0, 0.0).with_alpha(0.5))]
        );
    }

    #[test]
    fn test_gradient_paint() {
        let root = decode(
            r#"{"id": "1:1", "type": "FRAME", "fills": [{
                  "type": "GRADIENT_LINEAR",
                  "gradientHandlePositions": [{"x": 0, "y": 0.5}, {"x": 1, "y": 0.5}],
                  "gradientStops": [
                    {"position": 0, "color": {"r": 1, "g": 1, "b": 1, "a": 1}},
                    {"position": 1, "color": {"r": 0, "g": 0, "b": 0, "a": 1}}
                  ]}]}"#,
        );
        match &root.fills[0] {
            Paint::Gradient {
                kind,
                stops,
                handles,
            } => {
                assert_eq!(*kind, GradientKind::Linear);
                assert_eq!(stops.len(), 2);
                assert_eq!(handles[1], Point { x: 1.0, y: 0.5 });
            }
            other => panic!("unexpected paint: {other:?}"),
        }
    }

    #[test]
    fn test_corner_radii() {
        let uniform = decode(r#"{"id": "1", "type": "RECTANGLE", "cornerRadius": 12}"#);
        assert_eq!(uniform.corner_radius, CornerRadius::Uniform(12.0));

        let mixed = decode(
            r#"{"id": "1", "type": "RECTANGLE", "cornerRadius": 4,
                "rectangleCornerRadii": [4, 8, 0, 2]}"#,
        );
        assert_eq!(mixed.corner_radius, CornerRadius::PerCorner([4.0, 8.0, 0.0, 2.0]));

        let individual = decode(
            r#"{"id": "1", "type": "RECTANGLE",
                "rectangleTopLeftCornerRadius": 1, "rectangleTopRightCornerRadius": 2,
                "rectangleBottomRightCornerRadius": 3, "rectangleBottomLeftCornerRadius": 4}"#,
        );
        assert_eq!(individual.corner_radius, CornerRadius::PerCorner([1.0, 2.0, 3.0, 4.0]));

        let same = decode(r#"{"id": "1", "type": "FRAME", "rectangleCornerRadii": [6, 6, 6, 6]}"#);
        assert_eq!(same.corner_radius, CornerRadius::Uniform(6.0));

        let zero = decode(r#"{"id": "1", "type": "FRAME", "cornerRadius": 0}"#);
        assert_eq!(zero.corner_radius, CornerRadius::None);
    }

    #[test]
    fn test_stroke_geometry() {
        let node = decode(
            r#"{"id": "1", "type": "RECTANGLE", "strokeWeight": 2, "strokeAlign": "OUTSIDE",
                "strokeDashes": [4, 2],
                "strokes": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 1, "a": 1}}]}"#,
        );
        assert_eq!(
            node.stroke,
            Stroke {
                weight: 2.0,
                align: StrokeAlign::Outside,
                style: StrokeStyle::Dashed,
            }
        );
        assert_eq!(node.strokes.len(), 1);
    }

    #[test]
    fn test_effects() {
        let node = decode(
            r#"{"id": "1", "type": "FRAME", "effects": [
                  {"type": "DROP_SHADOW", "offset": {"x": 0, "y": 4}, "radius": 8,
                   "color": {"r": 0, "g": 0, "b": 0, "a": 0.25}},
                  {"type": "LAYER_BLUR", "radius": 3, "visible": false},
                  {"type": "BACKGROUND_BLUR", "radius": 10}
                ]}"#,
        );
        assert_eq!(
            node.effects,
            vec![
                Effect::DropShadow {
                    offset: Point { x: 0.0, y: 4.0 },
                    radius: 8.0,
                    color: Color::rgb(0.0, 0.0, 0.0).with_alpha(0.25),
                },
                Effect::BackgroundBlur { radius: 10.0 },
            ]
        );
    }

    #[test]
    fn test_text_style() {
        let node = decode(
            r#"{"id": "1", "type": "TEXT", "characters": "Hello",
                "style": {"fontFamily": "Inter", "fontSize": 16, "fontWeight": 600,
                          "italic": true, "letterSpacing": 0.5, "lineHeightPx": 24,
                          "lineHeightPercent": 150, "textAlignHorizontal": "CENTER",
                          "textAlignVertical": "CENTER", "textDecoration": "STRIKETHROUGH",
                          "textCase": "UPPER"}}"#,
        );
        let NodeKind::Text(text) = node.kind else {
            panic!("expected text node");
        };
        assert_eq!(text.characters, "Hello");
        assert_eq!(
            text.style,
            TextStyle {
                font_family: Some("Inter".into()),
                font_size: Some(16.0),
                font_weight: Some(600.0),
                italic: true,
                letter_spacing: Some(LetterSpacing::Pixels(0.5)),
                line_height: Some(LineHeight::Pixels(24.0)),
                align: Some(TextAlign::Center),
                vertical_align: Some(VerticalAlign::Center),
                decoration: Some(TextDecoration::Strikethrough),
                case: Some(TextCase::Upper),
            }
        );
    }

    #[test]
    fn test_text_style_variants() {
        let node = decode(
            r#"{"id": "1", "type": "TEXT",
                "style": {"fontStyle": "Semibold Italic",
                          "letterSpacing": {"value": 5, "unit": "PERCENT"},
                          "lineHeightPercentFontSize": 120, "textCase": "ORIGINAL"}}"#,
        );
        let NodeKind::Text(text) = node.kind else {
            panic!("expected text node");
        };
        assert_eq!(text.characters, "");
        assert!(text.style.italic);
        assert_eq!(text.style.letter_spacing, Some(LetterSpacing::Percent(5.0)));
        assert_eq!(text.style.line_height, Some(LineHeight::PercentFontSize(120.0)));
        assert_eq!(text.style.case, None);
    }

    #[test]
    fn test_text_without_style() {
        let node = decode(r#"{"id": "1", "type": "TEXT", "characters": "Hi"}"#);
        assert_eq!(
            node.kind,
            NodeKind::Text(Text {
                characters: "Hi".into(),
                style: TextStyle::default(),
            })
        );
    }

    #[test]
    fn test_blend_mode() {
        let node = decode(r#"{"id": "1", "type": "FRAME", "blendMode": "MULTIPLY"}"#);
        assert_eq!(node.blend_mode, Some(BlendMode::Multiply));
        let normal = decode(r#"{"id": "1", "type": "FRAME", "blendMode": "NORMAL"}"#);
        assert_eq!(normal.blend_mode, None);
    }
}
