use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, Alert, AlertKind, State};

use super::{
    layout::centered_rect,
    usage::{usage_to_line, HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

const ALERT_WIDTH: u16 = 50;
const ALERT_HEIGHT: u16 = 7;

struct Props {
    alert: Option<Alert>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            alert: state.alert.clone(),
        }
    }
}

/// AlertBox shows the current alert on top of everything and swallows input until dismissed
pub struct AlertBox {
    action_tx: UnboundedSender<Action>,
    props: Props,
}

impl AlertBox {
    pub fn is_shown(&self) -> bool {
        self.props.alert.is_some()
    }
}

impl Component for AlertBox {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        AlertBox {
            action_tx,
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        AlertBox {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Alert"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press || !self.is_shown() {
            return;
        }

        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            let _ = self.action_tx.send(Action::DismissAlert);
        }
    }
}

impl ComponentRender<()> for AlertBox {
    fn render(&self, frame: &mut Frame, _props: ()) {
        let Some(alert) = self.props.alert.as_ref() else {
            return;
        };

        let (title, color) = match alert.kind {
            AlertKind::Info => ("Notice", Color::Green),
            AlertKind::Error => ("Error", Color::Red),
        };

        let area = centered_rect(frame.size(), ALERT_WIDTH, ALERT_HEIGHT);
        let text = Text::from(vec![
            Line::from(alert.message.clone()),
            Line::from(""),
            usage_to_line(self.usage_info()),
        ]);

        let alert_box = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(alert_box, area);
    }
}

impl HasUsageInfo for AlertBox {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            lines: vec![UsageInfoLine::new(&["Enter", "Esc"], "to close")],
        }
    }
}
