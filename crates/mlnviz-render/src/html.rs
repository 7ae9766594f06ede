//! Self-contained HTML page assembly.

use std::fmt::Write;

use serde::Serialize;

use crate::{Error, Result};

pub const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
pub const VIS_NETWORK_JS: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";
pub const D3_JS: &str = "https://cdn.jsdelivr.net/npm/d3@7.9.0/dist/d3.min.js";
pub const WORDCLOUD_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/wordcloud2.js/1.2.2/wordcloud2.min.js";

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize `value` for embedding inside a `<script>` element.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).map_err(|e| {
        Error::serialization_failed(e.to_string())
            .with_operation("html::script_json")
            .set_source(e)
    })?;
    Ok(json.replace("</", "<\\/"))
}

/// Builder for one artifact page.
///
/// Head content (title, styles, library scripts) and body content are kept
/// apart so elements can be added in any order.
pub struct HtmlPage {
    title: String,
    head: String,
    body: String,
    scripts: String,
}

impl HtmlPage {
    pub fn new(title: &str) -> Self {
        let mut page = Self {
            title: title.to_string(),
            head: String::with_capacity(512),
            body: String::with_capacity(1024),
            scripts: String::with_capacity(4096),
        };
        page.style(
            "html,body{margin:0;padding:0;height:100%;font-family:Arial,sans-serif;background:#fff;color:#343541}",
        );
        page
    }

    /// Load a library from `url`.
    pub fn library(&mut self, url: &str) -> &mut Self {
        let _ = writeln!(self.head, "<script src=\"{}\"></script>", escape_html(url));
        self
    }

    pub fn style(&mut self, css: &str) -> &mut Self {
        let _ = writeln!(self.head, "<style>{css}</style>");
        self
    }

    pub fn heading(&mut self, text: &str) -> &mut Self {
        let _ = writeln!(self.body, "<h2>{}</h2>", escape_html(text));
        self
    }

    /// An empty container the page script draws into.
    pub fn container(&mut self, tag: &str, id: &str, style: &str) -> &mut Self {
        let _ = writeln!(
            self.body,
            "<{tag} id=\"{}\" style=\"{}\"></{tag}>",
            escape_html(id),
            escape_html(style)
        );
        self
    }

    /// Preformatted text block, one entry per line.
    pub fn text_block(&mut self, class: &str, lines: &[String]) -> &mut Self {
        let _ = write!(self.body, "<pre class=\"{}\">", escape_html(class));
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.body.push('\n');
            }
            self.body.push_str(&escape_html(line));
        }
        self.body.push_str("</pre>\n");
        self
    }

    /// Bind `value` as a JSON constant named `name`.
    pub fn data<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<&mut Self> {
        let json = script_json(value)?;
        let _ = writeln!(self.scripts, "const {name} = {json};");
        Ok(self)
    }

    /// Inline script run after every data constant is bound.
    pub fn script(&mut self, js: &str) -> &mut Self {
        self.scripts.push_str(js);
        if !js.ends_with('\n') {
            self.scripts.push('\n');
        }
        self
    }

    pub fn finish(self) -> String {
        let mut output = String::with_capacity(
            self.head.len() + self.body.len() + self.scripts.len() + 256,
        );
        output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        output.push_str("<meta charset=\"UTF-8\">\n");
        output.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(output, "<title>{}</title>", escape_html(&self.title));
        output.push_str(&self.head);
        output.push_str("</head>\n<body>\n");
        output.push_str(&self.body);
        output.push_str("<script>\n");
        output.push_str(&self.scripts);
        output.push_str("</script>\n</body>\n</html>\n");
        output
    }
}
