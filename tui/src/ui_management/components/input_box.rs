use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    prelude::Rect,
    style::{Color, Style, Stylize},
    text::{Masked, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};

use super::{Component, ComponentRender};

const MASK_CHAR: char = '*';

pub struct InputBox {
    /// Current value of the input box
    text: String,
    /// Position of cursor in the editor area, counted in chars
    cursor_position: usize,
}

impl InputBox {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn reset(&mut self) {
        self.cursor_position = 0;
        self.text.clear();
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    // String::insert and String::remove work on bytes, the cursor counts chars
    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor_position)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        self.cursor_position = self.cursor_position.saturating_add(1).min(self.char_count());
    }

    fn enter_char(&mut self, new_char: char) {
        let idx = self.byte_index();
        self.text.insert(idx, new_char);

        self.move_cursor_right();
    }

    fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }

        self.move_cursor_left();
        let idx = self.byte_index();
        self.text.remove(idx);
    }
}

impl Component for InputBox {
    fn new(_state: &State, _action_tx: UnboundedSender<Action>) -> Self {
        Self {
            text: String::new(),
            cursor_position: 0,
        }
    }

    fn move_with_state(self, _state: &State) -> Self
    where
        Self: Sized,
    {
        Self { ..self }
    }

    fn name(&self) -> &str {
        "Input Box"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            // chords like Ctrl+C or Alt+x are not text
            KeyCode::Char(to_insert)
                if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() =>
            {
                self.enter_char(to_insert);
            }
            KeyCode::Backspace => {
                self.delete_char();
            }
            KeyCode::Left => {
                self.move_cursor_left();
            }
            KeyCode::Right => {
                self.move_cursor_right();
            }
            KeyCode::Home => {
                self.cursor_position = 0;
            }
            KeyCode::End => {
                self.cursor_position = self.char_count();
            }
            _ => {}
        }
    }
}

pub struct RenderProps {
    pub title: String,
    pub area: Rect,
    pub border_color: Color,
    pub show_cursor: bool,
    /// Render every char as `*`, for passwords
    pub masked: bool,
}

impl ComponentRender<RenderProps> for InputBox {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let shown: Text = if props.masked {
            Masked::new(self.text.as_str(), MASK_CHAR).into()
        } else {
            Text::from(self.text.as_str())
        };

        let input = Paragraph::new(shown)
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .fg(props.border_color)
                    .title(props.title),
            );
        frame.render_widget(input, props.area);

        if props.show_cursor {
            // one cell right of the left border, one line below the top border
            frame.set_cursor(
                props.area.x + self.cursor_position as u16 + 1,
                props.area.y + 1,
            )
        }
    }
}
