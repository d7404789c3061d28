use crate::calendar::DayMarker;
use serde::Deserialize;
use std::collections::BTreeMap;
use time::{format_description::FormatItem, macros::format_description, Date};

pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub(crate) fn iso(date: Date) -> String {
    date.format(&YMD_FMT).unwrap_or_else(|_| date.to_string())
}

/// Wire shape of the published `data/index.json`
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub(crate) struct IndexFile {
    #[serde(default)]
    pub(crate) entries: BTreeMap<String, String>,
}

/// The date → document-path mapping, replaced wholesale on every reload
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct EntryIndex(BTreeMap<Date, String>);

impl EntryIndex {
    pub(crate) fn from_file(file: IndexFile) -> EntryIndex {
        let mut entries = BTreeMap::new();
        for (key, path) in file.entries {
            // Malformed keys are dropped rather than failing the whole index
            if let Ok(date) = Date::parse(&key, &YMD_FMT) {
                entries.insert(date, path);
            }
        }
        EntryIndex(entries)
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.0.contains_key(&date)
    }

    pub(crate) fn path_for(&self, date: Date) -> Option<&str> {
        self.0.get(&date).map(String::as_str)
    }
}

impl DayMarker for EntryIndex {
    fn has_entry(&self, date: Date) -> bool {
        self.contains(date)
    }
}
