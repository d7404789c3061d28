use super::{DayMarker, MonthGrid};
use crate::theme::{ENTRY_STYLE, LABEL_STYLE, SELECTED_STYLE, WEEKDAY_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use time::Date;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Width of a rendered day cell
const CELL_WIDTH: u16 = 4;

/// Width of the whole grid in columns
pub(crate) const GRID_WIDTH: u16 = DAY_WIDTH * 6 + CELL_WIDTH;

/// Number of lines taken up by the month label, the weekday header, and its
/// rule
const HEADER_LINES: u16 = 3;

static WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

const ACS_HLINE: char = '─';

#[derive(Clone, Copy, Debug)]
pub(crate) struct Calendar<'a, M> {
    grid: MonthGrid,
    today: Date,
    cursor: Date,
    selected: Option<Date>,
    marker: &'a M,
}

impl<'a, M: DayMarker> Calendar<'a, M> {
    pub(crate) fn new(
        cursor: Date,
        today: Date,
        selected: Option<Date>,
        marker: &'a M,
    ) -> Calendar<'a, M> {
        Calendar {
            grid: MonthGrid::containing(cursor),
            today,
            cursor,
            selected,
            marker,
        }
    }

    // A day is shown with brackets when selected and a dot when the index has
    // an entry for it; the cursor and today only differ in style.
    fn show_day(&self, date: Date) -> Span<'static> {
        let day = date.day();
        let selected = self.selected == Some(date);
        let marked = self.marker.has_entry(date);
        let s = if selected {
            format!("[{day:2}]")
        } else if marked {
            format!(" {day:2}•")
        } else {
            format!(" {day:2} ")
        };
        let mut style = if selected {
            SELECTED_STYLE
        } else if marked {
            ENTRY_STYLE
        } else {
            Style::new()
        };
        if date == self.today {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if date == self.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Span::styled(s, style)
    }
}

impl<M: DayMarker> Widget for Calendar<'_, M> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut canvas = BufferCanvas::new(area, buf);
        let label = format!("{} {}", self.grid.month(), self.grid.year());
        canvas.mvprint(0, 0, Span::styled(label, LABEL_STYLE));
        for (col, name) in std::iter::zip(0u16.., WEEKDAYS) {
            canvas.mvprint(
                1,
                col * DAY_WIDTH,
                Span::styled(format!(" {name} "), WEEKDAY_STYLE),
            );
        }
        canvas.hline(2, 0, ACS_HLINE, GRID_WIDTH);
        for (row, week) in std::iter::zip(0u16.., self.grid.weeks()) {
            for (col, cell) in std::iter::zip(0u16.., week) {
                if let Some(date) = cell {
                    canvas.mvprint(HEADER_LINES + row, col * DAY_WIDTH, self.show_day(date));
                }
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn mvprint(&mut self, y: u16, x: u16, span: Span<'_>) {
        if y < self.area.height && x < self.area.width {
            let width = u16::try_from(span.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(Line::from(span)).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, Span::raw(String::from(ch).repeat(length.into())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use std::collections::HashSet;
    use time::macros::date;

    struct SetMarker(HashSet<Date>);

    impl DayMarker for SetMarker {
        fn has_entry(&self, date: Date) -> bool {
            self.0.contains(&date)
        }
    }

    fn rows(buf: &Buffer) -> Vec<String> {
        let area = *buf.area();
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf.cell((x, y)).map(ratatui::buffer::Cell::symbol).unwrap_or(" "))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_march_2024_marked() {
        let marker = SetMarker(HashSet::from([date!(2024 - 03 - 05)]));
        let cal = Calendar::new(date!(2024 - 03 - 20), date!(2024 - 03 - 20), None, &marker);
        let area = Rect::new(0, 0, 34, 9);
        let mut buffer = Buffer::empty(area);
        cal.render(area, &mut buffer);
        let expected = [
            "March 2024                        ",
            " Su   Mo   Tu   We   Th   Fr   Sa ",
            "──────────────────────────────────",
            "                           1    2 ",
            "  3    4    5•   6    7    8    9 ",
            " 10   11   12   13   14   15   16 ",
            " 17   18   19   20   21   22   23 ",
            " 24   25   26   27   28   29   30 ",
            " 31                               ",
        ];
        assert_eq!(rows(&buffer), expected);
        let marked = buffer.cell((11, 4)).unwrap().style();
        assert_eq!(marked.fg, Some(Color::LightYellow));
        assert!(marked.add_modifier.contains(Modifier::BOLD));
        let plain = buffer.cell((16, 4)).unwrap().style();
        assert_eq!(plain.fg, Some(Color::Reset));
    }

    #[test]
    fn test_march_2024_selected() {
        let marker = SetMarker(HashSet::from([date!(2024 - 03 - 05)]));
        let cal = Calendar::new(
            date!(2024 - 03 - 20),
            date!(2024 - 03 - 20),
            Some(date!(2024 - 03 - 05)),
            &marker,
        );
        let area = Rect::new(0, 0, 34, 9);
        let mut buffer = Buffer::empty(area);
        cal.render(area, &mut buffer);
        assert_eq!(rows(&buffer)[4], "  3    4  [ 5]   6    7    8    9 ");
        let selected = buffer.cell((11, 4)).unwrap().style();
        assert_eq!(selected.bg, Some(Color::LightYellow));
        assert_eq!(selected.fg, Some(Color::Black));
    }

    #[test]
    fn test_leading_blanks_are_empty() {
        let marker = SetMarker(HashSet::new());
        let cal = Calendar::new(date!(2024 - 03 - 01), date!(2024 - 03 - 01), None, &marker);
        let area = Rect::new(0, 0, 34, 9);
        let mut buffer = Buffer::empty(area);
        cal.render(area, &mut buffer);
        assert_eq!(&rows(&buffer)[3][..25], "                         ");
    }

    #[test]
    fn test_truncated_area() {
        // Rendering into a narrow area must not panic
        let marker = SetMarker(HashSet::new());
        let cal = Calendar::new(date!(2024 - 03 - 15), date!(2024 - 03 - 15), None, &marker);
        let area = Rect::new(0, 0, 10, 4);
        let mut buffer = Buffer::empty(area);
        cal.render(area, &mut buffer);
    }
}
