use crate::calendar::{Calendar, GRID_WIDTH};
use crate::digest::{digest_lines, LOAD_FAILED_MESSAGE, NO_ENTRY_MESSAGE};
use crate::fetch::EntrySource;
use crate::help::Help;
use crate::index::iso;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use crate::viewer::{EntryContent, Viewer};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    text::Line,
    widgets::{Block, Paragraph, StatefulWidget, Widget, Wrap},
    Terminal,
};
use std::io::{self, Write};

#[derive(Debug)]
pub(crate) struct App<S> {
    viewer: Viewer<S>,
    state: AppState,
    scroll: u16,
}

impl<S: EntrySource> App<S> {
    pub(crate) fn new(viewer: Viewer<S>) -> App<S> {
        App {
            viewer,
            state: AppState::Calendar,
            scroll: 0,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.viewer.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.viewer.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.viewer.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.viewer.move_cursor(7),
                KeyCode::Char('p' | '[') | KeyCode::PageUp => {
                    self.viewer.previous_month();
                    true
                }
                KeyCode::Char('n' | ']') | KeyCode::PageDown => {
                    self.viewer.next_month();
                    true
                }
                KeyCode::Enter => {
                    self.viewer.select_cursor();
                    self.scroll = 0;
                    true
                }
                KeyCode::Char('r') => {
                    self.viewer.reload_index();
                    true
                }
                KeyCode::Char('J') => {
                    self.scroll = self.scroll.saturating_add(1);
                    true
                }
                KeyCode::Char('K') => {
                    self.scroll = self.scroll.saturating_sub(1);
                    true
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.viewer.jump_to_today();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('0') => state.handle_input(JumpToInput::Digit(0)),
                        KeyCode::Char('1') => state.handle_input(JumpToInput::Digit(1)),
                        KeyCode::Char('2') => state.handle_input(JumpToInput::Digit(2)),
                        KeyCode::Char('3') => state.handle_input(JumpToInput::Digit(3)),
                        KeyCode::Char('4') => state.handle_input(JumpToInput::Digit(4)),
                        KeyCode::Char('5') => state.handle_input(JumpToInput::Digit(5)),
                        KeyCode::Char('6') => state.handle_input(JumpToInput::Digit(6)),
                        KeyCode::Char('7') => state.handle_input(JumpToInput::Digit(7)),
                        KeyCode::Char('8') => state.handle_input(JumpToInput::Digit(8)),
                        KeyCode::Char('9') => state.handle_input(JumpToInput::Digit(9)),
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.viewer.select(date);
                            self.scroll = 0;
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn content_lines(&self) -> Vec<String> {
        match self.viewer.selection() {
            None => vec![String::from("Select a day to read its digest.")],
            Some(sel) => match &sel.content {
                EntryContent::Missing => vec![String::from(NO_ENTRY_MESSAGE)],
                EntryContent::Failed => vec![String::from(LOAD_FAILED_MESSAGE)],
                EntryContent::Loaded(doc) => digest_lines(doc),
            },
        }
    }
}

impl<S: EntrySource> Widget for &App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let chunks = Layout::horizontal([
            Constraint::Length(GRID_WIDTH + 2),
            Constraint::Min(0),
        ])
        .split(area);
        let cal = Calendar::new(
            self.viewer.cursor(),
            self.viewer.today(),
            self.viewer.selection().map(|sel| sel.date),
            self.viewer.index(),
        );
        cal.render(chunks[0].inner(Margin::new(1, 1)), buf);
        let title = match self.viewer.selection() {
            Some(sel) => format!(" {} ", iso(sel.date)),
            None => String::from(" newscal "),
        };
        let text = self
            .content_lines()
            .into_iter()
            .map(Line::from)
            .collect::<Vec<_>>();
        Paragraph::new(text)
            .block(Block::bordered().title(title))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(chunks[1], buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Jumping(mut state) = self.state {
            JumpTo.render(area, buf, &mut state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DayDocument;
    use crate::index::{EntryIndex, IndexFile};
    use std::collections::BTreeMap;
    use time::macros::date;

    struct StubSource;

    impl EntrySource for StubSource {
        fn load_index(&self) -> anyhow::Result<EntryIndex> {
            Ok(EntryIndex::from_file(IndexFile {
                entries: BTreeMap::from([(
                    "2024-03-05".to_owned(),
                    "data/2024-03-05.json".to_owned(),
                )]),
            }))
        }

        fn load_document(&self, _path: &str) -> anyhow::Result<DayDocument> {
            anyhow::bail!("offline")
        }
    }

    fn test_app() -> App<StubSource> {
        let mut viewer = Viewer::new(StubSource, date!(2024 - 03 - 15));
        viewer.reload_index();
        App::new(viewer)
    }

    #[test]
    fn test_month_navigation_keys() {
        let mut app = test_app();
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(app.viewer.cursor(), date!(2024 - 04 - 15));
        assert!(app.handle_key(KeyCode::Char('p')));
        assert!(app.handle_key(KeyCode::Char('p')));
        assert_eq!(app.viewer.cursor(), date!(2024 - 02 - 15));
    }

    #[test]
    fn test_cursor_keys() {
        let mut app = test_app();
        assert!(app.handle_key(KeyCode::Left));
        assert!(app.handle_key(KeyCode::Up));
        assert_eq!(app.viewer.cursor(), date!(2024 - 03 - 07));
        assert!(app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Right));
        assert_eq!(app.viewer.cursor(), date!(2024 - 03 - 15));
    }

    #[test]
    fn test_enter_selects_cursor() {
        let mut app = test_app();
        assert!(app.handle_key(KeyCode::Enter));
        let sel = app.viewer.selection().unwrap();
        assert_eq!(sel.date, date!(2024 - 03 - 15));
        assert_eq!(sel.content, EntryContent::Missing);
        assert_eq!(app.content_lines(), [NO_ENTRY_MESSAGE]);
    }

    #[test]
    fn test_failed_load_message() {
        let mut app = test_app();
        app.viewer.select(date!(2024 - 03 - 05));
        assert_eq!(app.content_lines(), [LOAD_FAILED_MESSAGE]);
    }

    #[test]
    fn test_invalid_key() {
        let mut app = test_app();
        assert!(!app.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_quit_key() {
        let mut app = test_app();
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }

    #[test]
    fn test_help_dismiss() {
        let mut app = test_app();
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('z')));
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_jump_dialog_selects() {
        let mut app = test_app();
        assert!(app.handle_key(KeyCode::Char('g')));
        for key in ['2', '0', '2', '4', '0', '3', '0', '5'] {
            assert!(app.handle_key(KeyCode::Char(key)));
        }
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(
            app.viewer.selection().map(|sel| sel.date),
            Some(date!(2024 - 03 - 05))
        );
    }

    #[test]
    fn test_render_marks_and_messages() {
        let mut app = test_app();
        app.viewer.select(date!(2024 - 03 - 05));
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        let rows = (0u16..24)
            .map(|y| {
                (0u16..80)
                    .map(|x| {
                        buffer
                            .cell((x, y))
                            .map(ratatui::buffer::Cell::symbol)
                            .unwrap_or(" ")
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        let all = rows.join("\n");
        assert!(all.contains("March 2024"));
        assert!(all.contains("[ 5]"));
        assert!(all.contains("2024-03-05"));
        assert!(all.contains(LOAD_FAILED_MESSAGE));
    }
}
