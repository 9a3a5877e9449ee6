//! CSS code generator.
//!
//! Renders the rules collected during HTML generation, preceded by a web-font
//! import and a fixed reset that centers the screen in the viewport.

use crate::{CompilationContext, Options};

const FONTS_URL: &str = "https://fonts.googleapis.com/css2";

const PREAMBLE: &str = "\
* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

html, body {
  width: 100%;
  height: 100%;
  overflow-x: hidden;
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
  position: relative;
  display: flex;
  justify-content: center;
  align-items: center;
  min-height: 100vh;
  background-color: rgb(200, 200, 200);
}
";

/// Generate the stylesheet from the rules in the context.
pub fn generate(ctx: &CompilationContext, options: &Options) -> String {
    let mut css = String::new();

    if options.import_fonts && !ctx.fonts.is_empty() {
        css.push_str(&format!("@import url('{}');\n\n", font_import_url(ctx)));
    }

    css.push_str(PREAMBLE);

    for rule in &ctx.rules {
        css.push('\n');
        css.push_str(&format!(".{} {{\n", rule.class));
        for (property, value) in rule.declarations.iter() {
            css.push_str(&format!("  {property}: {value};\n"));
        }
        css.push_str("}\n");
    }

    css
}

/// `…/css2?family=Inter:wght@400;700&family=Roboto+Mono:wght@400&display=swap`
fn font_import_url(ctx: &CompilationContext) -> String {
    let families: Vec<String> = ctx
        .fonts
        .iter()
        .map(|(family, weights)| {
            let name = urlencoding::encode(family).replace("%20", "+");
            let weights: Vec<String> = weights.iter().map(u16::to_string).collect();
            format!("family={name}:wght@{}", weights.join(";"))
        })
        .collect();
    format!("{FONTS_URL}?{}&display=swap", families.join("&"))
}
