use comms::room::Room;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    state_store::{action::Action, State},
    ui_management::components::{
        input_box::{self, InputBox},
        layout::{centered_rect, contains},
        usage::{usage_to_line, HasUsageInfo, UsageInfo, UsageInfoLine},
        Component, ComponentRender,
    },
};

const PANEL_WIDTH: u16 = 50;
const PUBLIC_PANEL_HEIGHT: u16 = 8;
const PRIVATE_PANEL_HEIGHT: u16 = 11;

struct Props {
    /// The room the modal is open on, [None] while closed
    room: Option<Room>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            room: state.join_modal.room().cloned(),
        }
    }
}

/// JoinModal asks for the password of a private room, or a confirmation for a public one,
/// before entering the selected room
pub struct JoinModal {
    action_tx: UnboundedSender<Action>,
    props: Props,
    // Internal State for the Component
    password_input: InputBox,
}

impl JoinModal {
    pub fn is_open(&self) -> bool {
        self.props.room.is_some()
    }

    fn requires_password(&self) -> bool {
        self.props.room.as_ref().is_some_and(Room::is_private)
    }

    /// The content panel, everything else in `area` is the clickable background
    pub fn panel_area(&self, area: Rect) -> Rect {
        let height = if self.requires_password() {
            PRIVATE_PANEL_HEIGHT
        } else {
            PUBLIC_PANEL_HEIGHT
        };

        centered_rect(area, PANEL_WIDTH, height)
    }

    fn close(&self) {
        let _ = self.action_tx.send(Action::CloseJoinModal);
    }

    fn submit(&self) {
        let _ = self.action_tx.send(Action::SubmitJoin {
            password: String::from(self.password_input.text()),
        });
    }
}

impl Component for JoinModal {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        JoinModal {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            password_input: InputBox::new(state, action_tx),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        let props = Props::from(state);
        let mut password_input = self.password_input;

        // the password belongs to the room the modal was open on
        if props.room != self.props.room {
            password_input.reset();
        }

        JoinModal {
            props,
            password_input,
            ..self
        }
    }

    fn name(&self) -> &str {
        "Join Modal"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press || !self.is_open() {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let _ = self.action_tx.send(Action::Exit);
            }
            KeyCode::Esc => self.close(),
            KeyCode::Enter => self.submit(),
            _ if self.requires_password() => self.password_input.handle_key_event(key),
            _ => (),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, area: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || !self.is_open() {
            return;
        }

        if !contains(self.panel_area(area), mouse.column, mouse.row) {
            self.close();
        }
    }
}

pub struct RenderProps {
    /// Area the modal is laid over
    pub area: Rect,
}

impl ComponentRender<RenderProps> for JoinModal {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let Some(room) = self.props.room.as_ref() else {
            return;
        };

        let panel = self.panel_area(props.area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Enter Room");
        let inner = block.inner(panel);

        frame.render_widget(Clear, panel);
        frame.render_widget(block, panel);

        let [container_kind, container_name, container_password, _, container_usage] =
            *Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length(1),
                        Constraint::Length(3),
                        Constraint::Length(if room.is_private() { 3 } else { 0 }),
                        Constraint::Min(0),
                        Constraint::Length(1),
                    ]
                    .as_ref(),
                )
                .split(inner)
        else {
            panic!("The modal layout should have 5 chunks")
        };

        frame.render_widget(
            Paragraph::new(Line::from(Span::from(room.kind.to_string()).bold())),
            container_kind,
        );

        let name = Paragraph::new(room.name.as_str())
            .block(Block::default().borders(Borders::ALL).title("Room"));
        frame.render_widget(name, container_name);

        if room.is_private() {
            self.password_input.render(
                frame,
                input_box::RenderProps {
                    title: "Password".into(),
                    area: container_password,
                    border_color: Color::Yellow,
                    show_cursor: true,
                    masked: true,
                },
            );
        }

        frame.render_widget(
            Paragraph::new(usage_to_line(self.usage_info())),
            container_usage,
        );
    }
}

impl HasUsageInfo for JoinModal {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            lines: vec![
                UsageInfoLine::new(&["Enter"], "to enter"),
                UsageInfoLine::new(&["Esc"], "to close"),
            ],
        }
    }
}
