//! HTML code generator.
//!
//! Walks the screen tree depth-first and emits one element per node, nested
//! exactly like the tree. During generation, assigns a class (`name-N`) to
//! every element and collects its style rule for the CSS generator.

use fhtml_tree::{Node, NodeKind};

use crate::style::{rule_for, StyleRule};
use crate::{escape_html, CompilationContext, Options};

/// Generate the body markup for a screen, populating rules in the context.
pub fn generate(root: &Node, ctx: &mut CompilationContext, options: &Options) -> String {
    let mut html = String::new();
    generate_node(root, None, ctx, options, &mut html, 0);
    html
}

fn generate_node(
    node: &Node,
    parent: Option<&Node>,
    ctx: &mut CompilationContext,
    options: &Options,
    out: &mut String,
    depth: usize,
) {
    let indent = "  ".repeat(depth);
    let class = ctx.assign_class(&node.name);

    if let NodeKind::Text(text) = &node.kind {
        if let Some(family) = &text.style.font_family {
            ctx.record_font(family, text.style.font_weight);
        }
    }

    ctx.rules.push(StyleRule {
        class: class.clone(),
        declarations: rule_for(node, parent, options),
    });

    let tag = element_tag(node);

    // Opening tag
    out.push_str(&indent);
    out.push_str(&format!("<{tag} class=\"{class}\">"));

    // Text content is inline
    if let NodeKind::Text(text) = &node.kind {
        out.push_str(&escape_html(&text.characters));
    }

    // Children
    if !node.children.is_empty() {
        out.push('\n');
        for child in &node.children {
            generate_node(child, Some(node), ctx, options, out, depth + 1);
        }
        out.push_str(&indent);
    }

    // Closing tag
    out.push_str(&format!("</{tag}>"));
    out.push('\n');
}

/// Pick the element for a node: headings and bold runs get their semantic
/// tags, other text is a `span`, everything else a `div`.
fn element_tag(node: &Node) -> &'static str {
    let NodeKind::Text(text) = &node.kind else {
        return "div";
    };
    if text.style.font_size.unwrap_or(0.0) > 24.0 {
        "h2"
    } else if text.style.font_weight.unwrap_or(400.0) >= 600.0 {
        "strong"
    } else {
        "span"
    }
}

/// Wrap body markup in a standalone document linking the stylesheet.
pub fn document(title: &str, stylesheet_href: &str, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    html.push_str(&format!(
        "  <link rel=\"stylesheet\" href=\"{}\">\n",
        escape_html(stylesheet_href)
    ));
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}
