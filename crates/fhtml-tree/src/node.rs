//! Screen node tree.
//!
//! A `Node` is one element of the screen: a frame, a group, a text run or a
//! leaf shape. Every node owns its children; the root node is the screen.
//! Bounding boxes are screen-relative (the root's origin is `(0, 0)`).

/// Axis-aligned bounding box in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Translate so that `(ox, oy)` becomes the origin.
    pub fn rebased(&self, ox: f64, oy: f64) -> Self {
        Self {
            x: self.x - ox,
            y: self.y - oy,
            ..*self
        }
    }
}

/// An RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

/// A point in normalized (0..1) paint space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientKind {
    Linear,
    Radial,
    Angular,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: Color,
    /// Position along the gradient, `0.0..=1.0`.
    pub position: f64,
}

/// A fill or stroke paint. Only visible paints are kept in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// A flat color. `color.a` already includes the paint opacity.
    Solid(Color),
    Gradient {
        kind: GradientKind,
        stops: Vec<GradientStop>,
        handles: Vec<Point>,
    },
    Image,
}

/// Corner rounding of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CornerRadius {
    #[default]
    None,
    Uniform(f64),
    /// Top-left, top-right, bottom-right, bottom-left.
    PerCorner([f64; 4]),
}

impl CornerRadius {
    pub fn is_rounded(&self) -> bool {
        match self {
            CornerRadius::None => false,
            CornerRadius::Uniform(r) => *r > 0.0,
            CornerRadius::PerCorner(radii) => radii.iter().any(|r| *r > 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeAlign {
    #[default]
    Inside,
    Center,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Stroke geometry shared by all of a node's stroke paints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub weight: f64,
    pub align: StrokeAlign,
    pub style: StrokeStyle,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            weight: 1.0,
            align: StrokeAlign::default(),
            style: StrokeStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    DropShadow {
        offset: Point,
        radius: f64,
        color: Color,
    },
    InnerShadow {
        offset: Point,
        radius: f64,
        color: Color,
    },
    LayerBlur {
        radius: f64,
    },
    BackgroundBlur {
        radius: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    PassThrough,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// Parse a design-file blend mode name. `NORMAL` and unknown names map to `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let mode = match name {
            "PASS_THROUGH" => BlendMode::PassThrough,
            "MULTIPLY" => BlendMode::Multiply,
            "SCREEN" => BlendMode::Screen,
            "OVERLAY" => BlendMode::Overlay,
            "DARKEN" => BlendMode::Darken,
            "LIGHTEN" => BlendMode::Lighten,
            "COLOR_DODGE" => BlendMode::ColorDodge,
            "COLOR_BURN" => BlendMode::ColorBurn,
            "HARD_LIGHT" => BlendMode::HardLight,
            "SOFT_LIGHT" => BlendMode::SoftLight,
            "DIFFERENCE" => BlendMode::Difference,
            "EXCLUSION" => BlendMode::Exclusion,
            "HUE" => BlendMode::Hue,
            "SATURATION" => BlendMode::Saturation,
            "COLOR" => BlendMode::Color,
            "LUMINOSITY" => BlendMode::Luminosity,
            _ => return None,
        };
        Some(mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LetterSpacing {
    Pixels(f64),
    /// Percent of the font size.
    Percent(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineHeight {
    Pixels(f64),
    Percent(f64),
    /// Percent of the font size, resolved to pixels when rendered.
    PercentFontSize(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDecoration {
    Underline,
    Strikethrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCase {
    Upper,
    Lower,
    Title,
}

/// Typography of a text node. Absent attributes stay `None` and are not rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub italic: bool,
    pub letter_spacing: Option<LetterSpacing>,
    pub line_height: Option<LineHeight>,
    pub align: Option<TextAlign>,
    pub vertical_align: Option<VerticalAlign>,
    pub decoration: Option<TextDecoration>,
    pub case: Option<TextCase>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub characters: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    /// Vectors, stars, polygons and boolean operations without children.
    Vector,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Frames, components and instances.
    Frame,
    /// Groups and other containers that only carry children.
    Group,
    Text(Text),
    Shape(ShapeKind),
}

/// One node of the screen tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    /// `None` when the source carried no bounding box.
    pub bounds: Option<Rect>,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke: Stroke,
    pub corner_radius: CornerRadius,
    /// `None` means fully opaque.
    pub opacity: Option<f64>,
    pub effects: Vec<Effect>,
    pub blend_mode: Option<BlendMode>,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with no styling and no children.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            bounds: None,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke: Stroke::default(),
            corner_radius: CornerRadius::None,
            opacity: None,
            effects: Vec::new(),
            blend_mode: None,
            children: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        self.walk().count()
    }

    /// Depth-first, parent-before-children iteration over this subtree.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`Node::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
