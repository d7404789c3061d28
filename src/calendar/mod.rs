mod grid;
mod widget;
pub(crate) use self::grid::{month_backwards, month_forwards, MonthGrid};
pub(crate) use self::widget::{Calendar, GRID_WIDTH};
use time::Date;

pub(crate) trait DayMarker {
    fn has_entry(&self, date: Date) -> bool;
}
