use serde::Deserialize;

pub(crate) static FALLBACK_TITLE: &str = "Daily News Summary";

/// One day's news summary as published. Every field is optional; absent or
/// empty fields simply drop the corresponding output section.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct DayDocument {
    pub(crate) title: Option<String>,
    pub(crate) summary: Option<String>,
    pub(crate) top3: Vec<String>,
    pub(crate) sections: Vec<Section>,
    pub(crate) headlines: Vec<Headline>,
}

impl DayDocument {
    pub(crate) fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(FALLBACK_TITLE)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Section {
    pub(crate) name: Option<String>,
    pub(crate) items: Vec<SectionItem>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct SectionItem {
    pub(crate) title: Option<String>,
    pub(crate) link: Option<String>,
    pub(crate) source: Option<String>,
    pub(crate) summary_lines: Vec<String>,
    pub(crate) why_important: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Headline {
    pub(crate) title: Option<String>,
    pub(crate) source: Option<String>,
    pub(crate) link: Option<String>,
}

/// A link that passed the `http(s)://` prefix check. Anything else is
/// rendered as plain text instead of a hyperlink.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ArticleLink<'a>(&'a str);

impl<'a> ArticleLink<'a> {
    pub(crate) fn parse(link: &'a str) -> Option<ArticleLink<'a>> {
        (link.starts_with("http://") || link.starts_with("https://")).then_some(ArticleLink(link))
    }

    pub(crate) fn as_str(&self) -> &'a str {
        self.0
    }
}
