//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Markdown renderer with syntect code-block highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_theme("base16-ocean.dark", true)
    }

    /// Create a renderer with a named syntect theme; `highlight: false`
    /// leaves code blocks as escaped `<pre><code>` markup
    pub fn with_theme(theme: &str, highlight: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            highlight,
        }
    }

    /// Render a markdown body to HTML.
    ///
    /// Structural transformation only: no sanitization is applied, the
    /// store trusts its input source.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;

        let mut events: Vec<Event> = Vec::new();
        // Fenced blocks are buffered so the whole block reaches syntect at
        // once instead of event-by-event.
        let mut code: Option<(Option<String>, String)> = None;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, buf)) = code.take() {
                        let rendered = self.render_code(&buf, lang.as_deref());
                        events.push(Event::Html(CowStr::from(rendered)));
                    }
                }
                Event::Text(text) if code.is_some() => {
                    if let Some((_, buf)) = code.as_mut() {
                        buf.push_str(&text);
                    }
                }
                other => events.push(other),
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }

    /// Render one code block, highlighted when a syntax for `lang` is known
    fn render_code(&self, code: &str, lang: Option<&str>) -> String {
        if self.highlight {
            if let Some(lang) = lang {
                let syntax = self
                    .syntax_set
                    .find_syntax_by_token(lang)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(lang));
                if let (Some(syntax), Some(theme)) =
                    (syntax, self.theme_set.themes.get(&self.theme_name))
                {
                    match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
                        Ok(highlighted) => return highlighted,
                        Err(e) => {
                            tracing::debug!("highlighting failed for {}: {}", lang, e);
                        }
                    }
                }
            }
        }

        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            lang.unwrap_or("text"),
            html_escape(code)
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading_and_paragraph() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hi\n\nA paragraph.");
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<p>A paragraph.</p>"));
    }

    #[test]
    fn test_render_list_emphasis_and_link() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("- *one*\n- [two](https://example.com)\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<em>one</em>"));
        assert!(html.contains("<a href=\"https://example.com\">two</a>"));
    }

    #[test]
    fn test_render_highlighted_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
        // syntect output, not the escaped fallback
        assert!(!html.contains("language-rust"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_escaped_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```nosuchlang\na < b\n```");
        assert!(html.contains("language-nosuchlang"));
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn test_highlighting_disabled() {
        let renderer = MarkdownRenderer::with_theme("base16-ocean.dark", false);
        let html = renderer.render("```rust\nlet x = 1;\n```");
        assert!(html.contains("language-rust"));
        assert!(html.contains("let x = 1;"));
    }

    #[test]
    fn test_strikethrough_extension() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("~~gone~~");
        assert!(html.contains("<del>gone</del>"));
    }
}
