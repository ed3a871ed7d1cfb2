//! Command output: Markdown rendering and raw JSON.

use std::io::{self, Write};

use bgl_infrastructure::pretty_json;
use console::Style;

/// Writes a response body for `--raw`: pretty-printed when it is JSON,
/// verbatim otherwise.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_raw(out: &mut dyn Write, body: &[u8]) -> io::Result<()> {
    match pretty_json(body) {
        Some(pretty) => writeln!(out, "{pretty}"),
        None => writeln!(out, "{}", String::from_utf8_lossy(body)),
    }
}

/// Writes Markdown, styled when stdout supports colors.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_markdown(out: &mut dyn Write, markdown: &str) -> io::Result<()> {
    let styled = console::colors_enabled();
    out.write_all(render_markdown(markdown, styled).as_bytes())
}

/// Renders the Markdown subset the formatters produce: `##` headings,
/// `**label**` runs, inline code, bullets and `---` rules.
///
/// Without styling the Markdown is returned as is.
#[must_use]
pub fn render_markdown(markdown: &str, styled: bool) -> String {
    if !styled {
        return markdown.to_string();
    }

    let heading = Style::new().cyan().bold().force_styling(true);
    let rule = Style::new().dim().force_styling(true);

    let mut rendered = String::with_capacity(markdown.len());
    for line in markdown.split_inclusive('\n') {
        let (text, newline) = line
            .strip_suffix('\n')
            .map_or((line, ""), |text| (text, "\n"));

        if let Some(title) = text.strip_prefix("## ") {
            rendered.push_str(&heading.apply_to(title).to_string());
        } else if text == "---" {
            rendered.push_str(&rule.apply_to("─".repeat(40)).to_string());
        } else if let Some(item) = text.strip_prefix("- ") {
            rendered.push_str("  • ");
            rendered.push_str(&render_inline(item));
        } else {
            rendered.push_str(&render_inline(text));
        }
        rendered.push_str(newline);
    }
    rendered
}

/// Styles `**bold**` and `` `code` `` spans. Unclosed markers are kept.
fn render_inline(text: &str) -> String {
    let bold = Style::new().bold().force_styling(true);
    let code = Style::new().yellow().force_styling(true);

    let mut rendered = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let next_bold = rest.find("**");
        let next_code = rest.find('`');
        let (start, marker, style) = match (next_bold, next_code) {
            (Some(b), Some(c)) if c < b => (c, "`", &code),
            (Some(b), _) => (b, "**", &bold),
            (None, Some(c)) => (c, "`", &code),
            (None, None) => break,
        };

        let after = &rest[start + marker.len()..];
        let Some(end) = after.find(marker) else {
            break;
        };
        rendered.push_str(&rest[..start]);
        rendered.push_str(&style.apply_to(&after[..end]).to_string());
        rest = &after[end + marker.len()..];
    }
    rendered.push_str(rest);
    rendered
}
