use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{prelude::Rect, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, Route, State};

use self::{my_rooms_page::MyRoomsPage, room_page::RoomPage};

use super::components::{alert_box::AlertBox, Component, ComponentRender};

mod my_rooms_page;
mod room_page;

enum ActivePage {
    MyRoomsPage,
    RoomPage,
}

struct Props {
    active_page: ActivePage,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            active_page: match state.route {
                Route::MyRooms => ActivePage::MyRoomsPage,
                Route::Room { .. } => ActivePage::RoomPage,
            },
        }
    }
}

pub struct AppRouter {
    props: Props,
    //
    my_rooms_page: MyRoomsPage,
    room_page: RoomPage,
    /// Drawn over every page, takes the input while shown
    alert_box: AlertBox,
}

impl AppRouter {
    fn get_active_page_component(&self) -> &dyn Component {
        match self.props.active_page {
            ActivePage::MyRoomsPage => &self.my_rooms_page,
            ActivePage::RoomPage => &self.room_page,
        }
    }

    fn get_active_page_component_mut(&mut self) -> &mut dyn Component {
        match self.props.active_page {
            ActivePage::MyRoomsPage => &mut self.my_rooms_page,
            ActivePage::RoomPage => &mut self.room_page,
        }
    }
}

impl Component for AppRouter {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            props: Props::from(state),
            //
            my_rooms_page: MyRoomsPage::new(state, action_tx.clone()),
            room_page: RoomPage::new(state, action_tx.clone()),
            alert_box: AlertBox::new(state, action_tx),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            props: Props::from(state),
            //
            my_rooms_page: self.my_rooms_page.move_with_state(state),
            room_page: self.room_page.move_with_state(state),
            alert_box: self.alert_box.move_with_state(state),
        }
    }

    // route all functions to the active page
    fn name(&self) -> &str {
        self.get_active_page_component().name()
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.alert_box.is_shown() {
            self.alert_box.handle_key_event(key);
        } else {
            self.get_active_page_component_mut().handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, area: Rect) {
        if self.alert_box.is_shown() {
            return;
        }

        self.get_active_page_component_mut()
            .handle_mouse_event(mouse, area)
    }
}

impl ComponentRender<()> for AppRouter {
    fn render(&self, frame: &mut Frame, props: ()) {
        match self.props.active_page {
            ActivePage::MyRoomsPage => self.my_rooms_page.render(frame, props),
            ActivePage::RoomPage => self.room_page.render(frame, props),
        }

        self.alert_box.render(frame, ());
    }
}
