use crate::digest::nonblank;
use crate::document::{ArticleLink, DayDocument, Headline, Section, SectionItem};
use std::fmt::Write;

/// Highlight lists are truncated to this many items even if the document
/// supplies more
const TOP_N: usize = 3;

pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            ch => out.push(ch),
        }
    }
    out
}

/// Renders a day document as an HTML fragment. All user-supplied text is
/// escaped before interpolation.
pub(crate) fn render_html(doc: &DayDocument) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<h4>{}</h4>", escape(doc.display_title()));
    if let Some(summary) = nonblank(doc.summary.as_deref()) {
        let _ = writeln!(html, "<p>{}</p>", escape(summary));
    }
    if !doc.top3.is_empty() {
        html.push_str("<h5>Top 3 highlights</h5>\n<ul>\n");
        for point in doc.top3.iter().take(TOP_N) {
            let _ = writeln!(html, "<li>{}</li>", escape(point));
        }
        html.push_str("</ul>\n");
    }
    if doc.sections.is_empty() {
        if !doc.headlines.is_empty() {
            html.push_str("<h5>Main topics</h5>\n<ul>\n");
            for headline in &doc.headlines {
                render_headline(&mut html, headline);
            }
            html.push_str("</ul>\n");
        }
    } else {
        for section in &doc.sections {
            render_section(&mut html, section);
        }
    }
    html
}

fn render_section(html: &mut String, section: &Section) {
    let name = section.name.as_deref().unwrap_or("Category");
    let _ = writeln!(html, "<h5>{}</h5>", escape(name));
    if section.items.is_empty() {
        html.push_str("<p><small>No items</small></p>\n");
        return;
    }
    html.push_str("<ul>\n");
    for item in &section.items {
        render_item(html, item);
    }
    html.push_str("</ul>\n");
}

fn render_item(html: &mut String, item: &SectionItem) {
    html.push_str("<li>");
    render_title(html, item.title.as_deref(), item.link.as_deref());
    if let Some(source) = nonblank(item.source.as_deref()) {
        let _ = write!(html, " <small>({})</small>", escape(source));
    }
    if !item.summary_lines.is_empty() {
        let lines = item
            .summary_lines
            .iter()
            .map(String::as_str)
            .map(escape)
            .collect::<Vec<_>>()
            .join("<br>");
        let _ = write!(html, "<br><small>{lines}</small>");
    }
    if let Some(why) = nonblank(item.why_important.as_deref()) {
        let _ = write!(
            html,
            "<br><small><b>Why it matters:</b> {}</small>",
            escape(why)
        );
    }
    html.push_str("</li>\n");
}

fn render_headline(html: &mut String, headline: &Headline) {
    html.push_str("<li>");
    render_title(html, headline.title.as_deref(), headline.link.as_deref());
    if let Some(source) = nonblank(headline.source.as_deref()) {
        let _ = write!(html, " <small>({})</small>", escape(source));
    }
    html.push_str("</li>\n");
}

// Only links passing the ArticleLink prefix check become hyperlinks; anything
// else is shown as plain text.
fn render_title(html: &mut String, title: Option<&str>, link: Option<&str>) {
    let title = escape(title.unwrap_or("untitled"));
    match link.and_then(ArticleLink::parse) {
        Some(link) => {
            let _ = write!(
                html,
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{title}</a>",
                escape(link.as_str())
            );
        }
        None => html.push_str(&title),
    }
}
