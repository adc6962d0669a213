use std::cell::Cell;

use comms::room::Room;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    state_store::{action::Action, State},
    ui_management::components::{
        layout::contains,
        usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
        Component, ComponentRender,
    },
};

const CARD_MIN_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 6;

const PRIVATE_ICON: &str = "🔒";
const PUBLIC_ICON: &str = "🏠";
const NO_DESCRIPTION: &str = "No description";
pub const NO_ROOMS_MESSAGE: &str = "No rooms joined yet.";

struct Props {
    /// Rooms in the order the backend listed them
    rooms: Vec<Room>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            rooms: state.rooms.clone(),
        }
    }
}

/// RoomGrid renders the joined rooms as cards, selecting one opens the join modal
pub struct RoomGrid {
    action_tx: UnboundedSender<Action>,
    props: Props,
    // Internal Component State
    /// Index of the highlighted card
    selected: usize,
    /// Area of the last render, ↑ and ↓ move by the column count it allows
    last_area: Cell<Rect>,
}

fn columns(area: Rect) -> usize {
    usize::from((area.width / CARD_MIN_WIDTH).max(1))
}

impl RoomGrid {
    /// Areas of the cards that fit into `area`, paired with the index of their room.
    /// Rows scroll so that the highlighted card is always visible.
    fn card_areas(&self, area: Rect) -> Vec<(usize, Rect)> {
        let columns = columns(area);
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let first_row = (self.selected / columns).saturating_sub(visible_rows - 1);

        let card_width = area.width / columns as u16;
        let card_height = CARD_HEIGHT.min(area.height);

        let first = first_row * columns;
        let last = ((first_row + visible_rows) * columns).min(self.props.rooms.len());

        (first..last)
            .map(|idx| {
                let row = (idx / columns - first_row) as u16;
                let column = (idx % columns) as u16;

                (
                    idx,
                    Rect {
                        x: area.x + column * card_width,
                        y: area.y + row * CARD_HEIGHT,
                        width: card_width,
                        height: card_height,
                    },
                )
            })
            .collect()
    }

    fn select_room(&mut self, idx: usize) {
        let Some(room) = self.props.rooms.get(idx) else {
            return;
        };

        self.selected = idx;
        let _ = self.action_tx.send(Action::SelectRoom { room: room.clone() });
    }

    fn move_selection(&mut self, offset: isize) {
        let last = self.props.rooms.len().saturating_sub(1) as isize;

        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }
}

impl Component for RoomGrid {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        RoomGrid {
            action_tx,
            props: Props::from(state),
            selected: 0,
            last_area: Cell::new(Rect::default()),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        let props = Props::from(state);
        // the list may have shrunk with the last listing
        let selected = self.selected.min(props.rooms.len().saturating_sub(1));

        RoomGrid {
            props,
            selected,
            ..self
        }
    }

    fn name(&self) -> &str {
        "Room Grid"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let row = columns(self.last_area.get()) as isize;

        match key.code {
            KeyCode::Left => self.move_selection(-1),
            KeyCode::Right => self.move_selection(1),
            KeyCode::Up => self.move_selection(-row),
            KeyCode::Down => self.move_selection(row),
            KeyCode::Enter => self.select_room(self.selected),
            _ => (),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, area: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let clicked = self
            .card_areas(area)
            .into_iter()
            .find(|(_, card_area)| contains(*card_area, mouse.column, mouse.row));

        if let Some((idx, _)) = clicked {
            self.select_room(idx);
        }
    }
}

pub struct RenderProps {
    pub area: Rect,
}

fn card<'a>(room: &'a Room, highlighted: bool) -> Paragraph<'a> {
    let icon = if room.is_private() {
        PRIVATE_ICON
    } else {
        PUBLIC_ICON
    };

    let description = match room.description.as_deref() {
        Some(description) => Line::from(description),
        None => Line::from(NO_DESCRIPTION.italic().dim()),
    };

    let border_style = if highlighted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Paragraph::new(vec![
        description,
        Line::from(""),
        Line::from(format!("Members: {}", room.user_count.unwrap_or(0))),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} {} ", icon, room.name)),
    )
}

impl ComponentRender<RenderProps> for RoomGrid {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        self.last_area.set(props.area);

        if self.props.rooms.is_empty() {
            let empty = Paragraph::new(NO_ROOMS_MESSAGE)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, props.area);

            return;
        }

        for (idx, card_area) in self.card_areas(props.area) {
            let room = &self.props.rooms[idx];
            frame.render_widget(card(room, idx == self.selected), card_area);
        }
    }
}

impl HasUsageInfo for RoomGrid {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            lines: vec![
                UsageInfoLine::new(&["←", "→", "↑", "↓"], "to move"),
                UsageInfoLine::new(&["Enter"], "to enter a room"),
            ],
        }
    }
}
