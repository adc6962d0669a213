use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use comms::room::UserId;

use crate::{
    state_store::{action::Action, State},
    ui_management::components::{
        usage::{usage_to_line, HasUsageInfo, UsageInfo, UsageInfoLine},
        Component, ComponentRender,
    },
};

use super::components::{
    join_modal::{self, JoinModal},
    room_grid::{self, RoomGrid},
};

const NOT_SIGNED_IN_MESSAGE: &str = "not signed in";

struct Props {
    /// The user the rooms are listed for
    user_id: Option<UserId>,
    /// Whether a listing is still in flight
    loading: bool,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            user_id: state.session.user_id.clone(),
            loading: state.pending_room_listings > 0,
        }
    }
}

/// MyRoomsPage lists the rooms of the signed in user, and opens the join modal on top of them
pub struct MyRoomsPage {
    action_tx: UnboundedSender<Action>,
    props: Props,
    // Child Components
    room_grid: RoomGrid,
    join_modal: JoinModal,
}

struct PageLayout {
    header: Rect,
    grid: Rect,
    footer: Rect,
}

fn page_layout(area: Rect) -> PageLayout {
    let [header, grid, footer] = *Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area)
    else {
        panic!("The page layout should have 3 chunks")
    };

    PageLayout {
        header,
        grid,
        footer,
    }
}

impl Component for MyRoomsPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        MyRoomsPage {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            room_grid: RoomGrid::new(state, action_tx.clone()),
            join_modal: JoinModal::new(state, action_tx),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        MyRoomsPage {
            props: Props::from(state),
            room_grid: self.room_grid.move_with_state(state),
            join_modal: self.join_modal.move_with_state(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "My Rooms"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // the open modal owns the keyboard, `q` may be part of a password
        if self.join_modal.is_open() {
            self.join_modal.handle_key_event(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Exit);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let _ = self.action_tx.send(Action::Exit);
            }
            KeyCode::Char('r') => {
                let _ = self.action_tx.send(Action::LoadRooms);
            }
            _ => self.room_grid.handle_key_event(key),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, area: Rect) {
        if self.join_modal.is_open() {
            self.join_modal.handle_mouse_event(mouse, area);
        } else {
            self.room_grid
                .handle_mouse_event(mouse, page_layout(area).grid);
        }
    }
}

impl ComponentRender<()> for MyRoomsPage {
    fn render(&self, frame: &mut Frame, _props: ()) {
        let area = frame.size();
        let layout = page_layout(area);

        let user = match self.props.user_id.as_ref() {
            Some(user_id) => Span::from(format!("@{}", user_id)).bold(),
            None => Span::from(NOT_SIGNED_IN_MESSAGE).italic().dim(),
        };
        let mut header_line = vec!["for ".into(), user];
        if self.props.loading {
            header_line.push(Span::from("  loading…").dim());
        }

        let header = Paragraph::new(Line::from(header_line))
            .block(Block::default().borders(Borders::ALL).title("Rooms I'm in"));
        frame.render_widget(header, layout.header);

        self.room_grid.render(
            frame,
            room_grid::RenderProps { area: layout.grid },
        );

        frame.render_widget(
            Paragraph::new(usage_to_line(self.usage_info())),
            layout.footer,
        );

        self.join_modal
            .render(frame, join_modal::RenderProps { area });
    }
}

impl HasUsageInfo for MyRoomsPage {
    fn usage_info(&self) -> UsageInfo {
        let mut lines = self.room_grid.usage_info().lines;
        lines.push(UsageInfoLine::new(&["r"], "to reload"));
        lines.push(UsageInfoLine::new(&["q"], "to quit"));

        UsageInfo { lines }
    }
}
