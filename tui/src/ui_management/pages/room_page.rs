use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    state_store::{action::Action, Route, State},
    ui_management::components::{
        layout::centered_rect,
        usage::{usage_to_line, HasUsageInfo, UsageInfo, UsageInfoLine},
        Component, ComponentRender,
    },
};

struct Props {
    route: Route,
    /// Name of the room, when it is still in the listing
    room_name: Option<String>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        let room_name = match &state.route {
            Route::Room { room_id } => state.room(room_id).map(|room| room.name.clone()),
            Route::MyRooms => None,
        };

        Props {
            route: state.route.clone(),
            room_name,
        }
    }
}

/// RoomPage is where a successful join lands
pub struct RoomPage {
    action_tx: UnboundedSender<Action>,
    props: Props,
}

impl Component for RoomPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        RoomPage {
            action_tx,
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        RoomPage {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Room"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => {
                let _ = self.action_tx.send(Action::Navigate {
                    route: Route::MyRooms,
                });
            }
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Exit);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let _ = self.action_tx.send(Action::Exit);
            }
            _ => (),
        }
    }
}

impl ComponentRender<()> for RoomPage {
    fn render(&self, frame: &mut Frame, _props: ()) {
        let area = centered_rect(frame.size(), 60, 7);

        let name = self.props.room_name.as_deref().unwrap_or("Unknown room");
        let text = Text::from(vec![
            Line::from(Span::from(name.to_string()).bold()),
            Line::from(Span::from(self.props.route.path()).dim()),
            Line::from(""),
            usage_to_line(self.usage_info()),
        ]);

        let room = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Room"));
        frame.render_widget(room, area);
    }
}

impl HasUsageInfo for RoomPage {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            lines: vec![
                UsageInfoLine::new(&["Esc", "b"], "back to my rooms"),
                UsageInfoLine::new(&["q"], "to quit"),
            ],
        }
    }
}
