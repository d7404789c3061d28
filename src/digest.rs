use crate::document::DayDocument;

pub(crate) static NO_ENTRY_MESSAGE: &str = "No entry for this day yet.";
pub(crate) static LOAD_FAILED_MESSAGE: &str = "Failed to load this day's entry.";

static TOPICS_HEADER: &str = "Main topics";

/// Line-oriented digest of a day document: title, summary, and one bullet per
/// headline.
pub(crate) fn digest_lines(doc: &DayDocument) -> Vec<String> {
    let mut lines = vec![doc.display_title().to_owned()];
    if let Some(summary) = nonblank(doc.summary.as_deref()) {
        lines.push(String::new());
        lines.push(summary.to_owned());
    }
    let topics = topic_lines(doc);
    if !topics.is_empty() {
        lines.push(String::new());
        lines.push(TOPICS_HEADER.to_owned());
        lines.extend(topics);
    }
    lines
}

fn topic_lines(doc: &DayDocument) -> Vec<String> {
    if doc.headlines.is_empty() {
        // The generator flattens section items into headlines, but a document
        // may carry sections alone
        doc.sections
            .iter()
            .flat_map(|sec| sec.items.iter())
            .map(|item| bullet(item.title.as_deref(), item.source.as_deref()))
            .collect()
    } else {
        doc.headlines
            .iter()
            .map(|h| bullet(h.title.as_deref(), h.source.as_deref()))
            .collect()
    }
}

fn bullet(title: Option<&str>, source: Option<&str>) -> String {
    let title = title.unwrap_or("untitled");
    match nonblank(source) {
        Some(source) => format!("- {title} ({source})"),
        None => format!("- {title}"),
    }
}

pub(crate) fn nonblank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
