use crate::calendar::{month_backwards, month_forwards};
use crate::document::DayDocument;
use crate::fetch::EntrySource;
use crate::index::EntryIndex;
use time::{Date, Duration};

/// All mutable view state: the entry index, the day cursor (whose month is
/// the displayed month), and the current selection. Rendering reads this
/// struct; only the methods below mutate it.
#[derive(Debug)]
pub(crate) struct Viewer<S> {
    source: S,
    index: EntryIndex,
    today: Date,
    cursor: Date,
    selection: Option<Selection>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Selection {
    pub(crate) date: Date,
    pub(crate) content: EntryContent,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum EntryContent {
    /// The selected date has no index entry; no fetch was attempted
    Missing,
    Loaded(DayDocument),
    /// The fetch or parse failed; not retried until the day is reselected
    Failed,
}

impl<S: EntrySource> Viewer<S> {
    pub(crate) fn new(source: S, today: Date) -> Viewer<S> {
        Viewer {
            source,
            index: EntryIndex::default(),
            today,
            cursor: today,
            selection: None,
        }
    }

    /// Loads the index once and opens the start date, or today when today has
    /// an entry
    pub(crate) fn startup(&mut self, start: Option<Date>) {
        self.reload_index();
        match start {
            Some(date) => self.select(date),
            None if self.index.contains(self.today) => self.select(self.today),
            None => (),
        }
    }

    /// Replaces the index wholesale; any failure silently leaves it empty
    pub(crate) fn reload_index(&mut self) {
        self.index = self.source.load_index().unwrap_or_default();
    }

    pub(crate) fn select(&mut self, date: Date) {
        self.cursor = date;
        let content = match self.index.path_for(date) {
            None => EntryContent::Missing,
            Some(path) => match self.source.load_document(path) {
                Ok(doc) => EntryContent::Loaded(doc),
                Err(_) => EntryContent::Failed,
            },
        };
        self.selection = Some(Selection { date, content });
    }

    pub(crate) fn select_cursor(&mut self) {
        self.select(self.cursor);
    }

    pub(crate) fn next_month(&mut self) {
        self.cursor = month_forwards(self.cursor);
    }

    pub(crate) fn previous_month(&mut self) {
        self.cursor = month_backwards(self.cursor);
    }

    pub(crate) fn move_cursor(&mut self, days: i64) -> bool {
        match self.cursor.checked_add(Duration::days(days)) {
            Some(date) => {
                self.cursor = date;
                true
            }
            None => false,
        }
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.cursor = self.today;
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub(crate) fn index(&self) -> &EntryIndex {
        &self.index
    }
}
