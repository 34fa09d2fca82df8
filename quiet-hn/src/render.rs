use crate::hn_utils;
use crate::types::{PageData, PageRenderer};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// Renders the single Quiet HN page.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            title: "Quiet Hacker News".to_string(),
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for HtmlRenderer {
    fn render(&self, page: &PageData) -> anyhow::Result<String> {
        let title = encode_text(&self.title);
        let mut html = String::with_capacity(1024 + page.stories.len() * 256);

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html>")?;
        writeln!(html, "<head>")?;
        writeln!(html, "  <meta charset=\"utf-8\">")?;
        writeln!(html, "  <title>{}</title>", title)?;
        writeln!(html, "  <style>")?;
        writeln!(html, "    body {{ padding: 20px; font-family: sans-serif; }}")?;
        writeln!(html, "    li {{ padding: 4px 0; }}")?;
        writeln!(html, "    .host {{ color: #888; font-size: 0.85em; }}")?;
        writeln!(html, "    footer {{ color: #888; margin-top: 20px; }}")?;
        writeln!(html, "  </style>")?;
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "  <h1>{}</h1>", title)?;
        writeln!(html, "  <ol>")?;

        for story in &page.stories {
            write!(
                html,
                "    <li><a href=\"{}\">{}</a>",
                encode_double_quoted_attribute(hn_utils::url::safe_href(story.url())),
                encode_text(story.title())
            )?;
            if !story.host.is_empty() {
                write!(html, " <span class=\"host\">({})</span>", encode_text(&story.host))?;
            }
            writeln!(html, "</li>")?;
        }

        writeln!(html, "  </ol>")?;
        write!(
            html,
            "  <footer>This page was rendered in {}",
            hn_utils::time::format_elapsed(page.elapsed)
        )?;
        if let Some(refreshed_at) = page.refreshed_at {
            write!(
                html,
                ", stories fetched at {}",
                refreshed_at.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }
        writeln!(html, "</footer>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }
}
