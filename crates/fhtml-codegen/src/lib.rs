//! fhtml Code Generator
//!
//! Translates a screen tree into two outputs: an HTML document and a
//! stylesheet. HTML generation walks the tree depth-first (parent before
//! children, source child order), assigns a class to every node and collects
//! one style rule per node; CSS generation renders the collected rules.
//!
//! ```text
//! Node tree → compile() → CompilerOutput { html, css }
//! ```
//!
//! Every rule is self-contained: a parent's rounding or clipping is never
//! copied onto its children. With [`Options::clip_rounded`] a rounded parent
//! clips its own content (`overflow: hidden`) instead.

pub mod css;
pub mod html;
pub mod style;

use std::collections::{BTreeMap, BTreeSet};

use fhtml_tree::Node;

pub use style::{Declarations, StyleRule};

/// The compiled output for one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerOutput {
    /// Complete HTML document linking the stylesheet.
    pub html: String,
    pub css: String,
    /// Number of generated elements (one per node).
    pub element_count: usize,
    /// Font families used by text nodes, sorted.
    pub fonts: Vec<String>,
}

/// Generation options.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Document title; the screen name when `None`.
    pub title: Option<String>,
    /// Relative path of the stylesheet linked from the document.
    pub stylesheet_href: String,
    /// Let rounded containers clip their children.
    pub clip_rounded: bool,
    /// Emit a web-font `@import` for the families in use.
    pub import_fonts: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            title: None,
            stylesheet_href: "styles.css".to_string(),
            clip_rounded: false,
            import_fonts: true,
        }
    }
}

/// Weight used by the browser when a text node declares none.
const DEFAULT_FONT_WEIGHT: u16 = 400;

/// State shared between the HTML and CSS generators.
/// HTML generation populates rules and fonts; CSS generation reads them.
#[derive(Debug, Default)]
pub struct CompilationContext {
    pub next_id: usize,
    pub rules: Vec<StyleRule>,
    /// Family → weights requested by text nodes.
    pub fonts: BTreeMap<String, BTreeSet<u16>>,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next class identifier for a node name: `card-title-3`.
    pub fn assign_class(&mut self, name: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", sanitize_class(name), self.next_id)
    }

    /// Record a family and the weight it renders at. Missing or
    /// out-of-range weights render at the CSS default, 400.
    pub fn record_font(&mut self, family: &str, weight: Option<f64>) {
        let weight = weight
            .filter(|w| (1.0..=1000.0).contains(w))
            .map_or(DEFAULT_FONT_WEIGHT, |w| w.round() as u16);
        self.fonts
            .entry(family.to_string())
            .or_default()
            .insert(weight);
    }
}

/// Compile a screen tree with default options.
pub fn compile(root: &Node) -> CompilerOutput {
    compile_with(root, &Options::default())
}

/// Compile a screen tree into an HTML document and its stylesheet.
pub fn compile_with(root: &Node, options: &Options) -> CompilerOutput {
    let mut ctx = CompilationContext::new();

    let body = html::generate(root, &mut ctx, options);
    let title = options.title.as_deref().unwrap_or(&root.name);
    let html_output = html::document(title, &options.stylesheet_href, &body);
    let css_output = css::generate(&ctx, options);

    tracing::debug!(
        elements = ctx.rules.len(),
        fonts = ctx.fonts.len(),
        "generated markup and stylesheet"
    );

    CompilerOutput {
        html: html_output,
        css: css_output,
        element_count: ctx.rules.len(),
        fonts: ctx.fonts.keys().cloned().collect(),
    }
}

/// Lowercase a node name into a CSS class stem. Characters outside
/// `[a-z0-9_-]` become `-`, runs of `-` collapse, edges are trimmed.
pub fn sanitize_class(name: &str) -> String {
    let mut clean = String::with_capacity(name.len());
    for ch in name.chars() {
        let ch = if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            ch.to_ascii_lowercase()
        } else {
            '-'
        };
        if ch == '-' && clean.ends_with('-') {
            continue;
        }
        clean.push(ch);
    }
    let clean = clean.trim_matches('-');

    if clean.is_empty() {
        "node".to_string()
    } else if clean.starts_with(|c: char| c.is_ascii_digit()) {
        format!("n-{clean}")
    } else {
        clean.to_string()
    }
}

/// Format a number, removing `.0` for integers.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Round to three decimals; design files carry float noise (`11.999999`).
pub fn round3(n: f64) -> f64 {
    (n * 1000.0).round() / 1000.0
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
