use comms::{
    request::JoinRequest,
    room::{Room, RoomId, UserId},
    ApiError,
};

use super::{
    action::Action,
    effect::{Effect, Outcome},
};

pub const PASSWORD_REQUIRED_MESSAGE: &str = "A password is required to enter this room.";
pub const JOIN_SUCCEEDED_MESSAGE: &str = "Entered the room successfully.";
pub const JOIN_FAILED_MESSAGE: &str = "Failed to enter the room.";

/// Identity of the user the rooms are listed for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user_id: Option<UserId>,
}

/// Pages the application can navigate to
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    MyRooms,
    Room { room_id: RoomId },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::MyRooms => String::from("/my-rooms"),
            Route::Room { room_id } => format!("/room/{}", room_id),
        }
    }
}

/// The join modal is either closed, or open on the room that was selected from the list
#[derive(Debug, Clone, PartialEq)]
pub enum JoinModal {
    Closed,
    Open { room: Room },
}

impl JoinModal {
    pub fn room(&self) -> Option<&Room> {
        match self {
            JoinModal::Closed => None,
            JoinModal::Open { room } => Some(room),
        }
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        matches!(self, JoinModal::Open { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

/// A notice the user has to acknowledge before doing anything else
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Alert {
            kind: AlertKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Alert {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }
}

/// State holds the state of the application
#[derive(Debug, Clone)]
pub struct State {
    pub session: Session,
    /// Rooms the user has joined, replaced as a whole by every successful listing
    pub rooms: Vec<Room>,
    pub join_modal: JoinModal,
    pub route: Route,
    pub alert: Option<Alert>,
    /// Number of room listings still in flight
    pub pending_room_listings: usize,
}

impl State {
    pub fn new(session: Session) -> Self {
        State {
            session,
            rooms: Vec::new(),
            join_modal: JoinModal::Closed,
            route: Route::MyRooms,
            alert: None,
            pending_room_listings: 0,
        }
    }

    /// Applies an action coming from the UI, returning the network call it requires, if any.
    /// [Action::Exit] is not a state change and is left to the store.
    pub fn handle_action(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::LoadRooms => self.load(),
            Action::SelectRoom { room } => {
                self.select_room(room);
                None
            }
            Action::CloseJoinModal => {
                self.close_join_modal();
                None
            }
            Action::SubmitJoin { password } => self.submit_join(&password),
            Action::DismissAlert => {
                self.alert = None;
                None
            }
            Action::Navigate { route } => {
                self.route = route;
                None
            }
            Action::Exit => None,
        }
    }

    /// Starts listing the rooms of the session user. Does nothing without a user id.
    pub fn load(&mut self) -> Option<Effect> {
        let Some(user_id) = self.session.user_id.clone() else {
            tracing::info!("user id not found in the session, not listing rooms");
            return None;
        };

        self.pending_room_listings += 1;

        Some(Effect::ListRooms { user_id })
    }

    pub fn select_room(&mut self, room: Room) {
        self.join_modal = JoinModal::Open { room };
    }

    pub fn close_join_modal(&mut self) {
        self.join_modal = JoinModal::Closed;
    }

    /// Validates the entered password against the selected room and builds the join request.
    pub fn submit_join(&mut self, password: &str) -> Option<Effect> {
        let room = self.join_modal.room()?;

        if room.is_private() && password.trim().is_empty() {
            self.alert = Some(Alert::error(PASSWORD_REQUIRED_MESSAGE));
            return None;
        }

        let request = JoinRequest::for_room(room, password);
        tracing::info!(room_id = %request.room_id(), kind = %request.kind(), "entering room");

        Some(Effect::JoinRoom { request })
    }

    /// Applies the result of a finished network call
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::RoomsListed { user_id, result } => {
                self.pending_room_listings = self.pending_room_listings.saturating_sub(1);

                match result {
                    Ok(rooms) => {
                        tracing::info!(%user_id, count = rooms.len(), "listed rooms");
                        self.rooms = rooms;
                    }
                    Err(ApiError::Status {
                        status,
                        message,
                        body,
                    }) => {
                        tracing::error!(%user_id, status, ?message, %body, "failed to list rooms");
                    }
                    Err(err) => {
                        tracing::error!(%user_id, error = %err, "failed to list rooms");
                    }
                }
            }
            Outcome::RoomJoined { request, result } => match result {
                Ok(()) => {
                    let room_id = request.room_id().clone();
                    tracing::info!(%room_id, "entered room");

                    self.alert = Some(Alert::info(JOIN_SUCCEEDED_MESSAGE));
                    self.join_modal = JoinModal::Closed;
                    self.route = Route::Room { room_id };
                }
                Err(err) => {
                    let message = err.user_message().unwrap_or(JOIN_FAILED_MESSAGE).to_string();
                    tracing::warn!(room_id = %request.room_id(), error = %err, "failed to enter room");

                    self.alert = Some(Alert::error(message));
                }
            },
        }
    }

    pub fn room(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| &room.id == room_id)
    }
}

#[cfg(test)]
mod tests {
    use comms::room::RoomKind;

    use super::*;
    use crate::state_store::fixtures::room;

    fn state_with_user() -> State {
        State::new(Session {
            user_id: UserId::new("7"),
        })
    }

    #[test]
    fn test_load_without_user_id_does_nothing() {
        let mut state = State::new(Session::default());

        assert_eq!(state.load(), None);
        assert_eq!(state.pending_room_listings, 0);
    }

    #[test]
    fn test_load_lists_rooms_of_the_session_user() {
        let mut state = state_with_user();

        assert_eq!(
            state.handle_action(Action::LoadRooms),
            Some(Effect::ListRooms {
                user_id: UserId::new("7").unwrap()
            })
        );
        assert_eq!(state.pending_room_listings, 1);
    }

    #[test]
    fn test_successful_listing_replaces_rooms() {
        let mut state = state_with_user();
        state.rooms = vec![room(1, RoomKind::Public)];
        state.load();

        state.apply_outcome(Outcome::RoomsListed {
            user_id: UserId::new("7").unwrap(),
            result: Ok(vec![room(2, RoomKind::Public), room(3, RoomKind::Private)]),
        });

        assert_eq!(
            state.rooms,
            vec![room(2, RoomKind::Public), room(3, RoomKind::Private)]
        );
        assert_eq!(state.pending_room_listings, 0);
    }

    #[test]
    fn test_failed_listing_keeps_rooms_and_stays_silent() {
        let mut state = state_with_user();
        state.rooms = vec![room(1, RoomKind::Public)];
        state.load();

        state.apply_outcome(Outcome::RoomsListed {
            user_id: UserId::new("7").unwrap(),
            result: Err(ApiError::MalformedPayload("data is not a sequence".into())),
        });

        assert_eq!(state.rooms, vec![room(1, RoomKind::Public)]);
        assert_eq!(state.alert, None);
        assert_eq!(state.pending_room_listings, 0);
    }

    #[test]
    fn test_last_finished_listing_wins() {
        let mut state = state_with_user();
        state.load();
        state.load();
        assert_eq!(state.pending_room_listings, 2);

        let user_id = UserId::new("7").unwrap();
        state.apply_outcome(Outcome::RoomsListed {
            user_id: user_id.clone(),
            result: Ok(vec![room(2, RoomKind::Public)]),
        });
        state.apply_outcome(Outcome::RoomsListed {
            user_id,
            result: Ok(vec![room(1, RoomKind::Public)]),
        });

        assert_eq!(state.rooms, vec![room(1, RoomKind::Public)]);
        assert_eq!(state.pending_room_listings, 0);
    }

    #[test]
    fn test_select_room_opens_the_modal() {
        let mut state = state_with_user();

        assert_eq!(
            state.handle_action(Action::SelectRoom {
                room: room(4, RoomKind::Private)
            }),
            None
        );
        assert_eq!(state.join_modal.room(), Some(&room(4, RoomKind::Private)));

        state.handle_action(Action::CloseJoinModal);
        assert!(!state.join_modal.is_open());
    }

    #[test]
    fn test_submit_without_selected_room_does_nothing() {
        let mut state = state_with_user();

        assert_eq!(state.submit_join("pw"), None);
        assert_eq!(state.alert, None);
    }

    #[test]
    fn test_private_room_requires_a_password() {
        let mut state = state_with_user();
        state.select_room(room(4, RoomKind::Private));

        for password in ["", "   "] {
            assert_eq!(state.submit_join(password), None);
            assert_eq!(state.alert, Some(Alert::error(PASSWORD_REQUIRED_MESSAGE)));
            assert!(state.join_modal.is_open());
        }
    }

    #[test]
    fn test_submit_builds_request_for_the_room_kind() {
        let mut state = state_with_user();

        state.select_room(room(4, RoomKind::Private));
        assert_eq!(
            state.submit_join("secret"),
            Some(Effect::JoinRoom {
                request: JoinRequest::Private {
                    room_id: RoomId::Number(4),
                    password: "secret".into()
                }
            })
        );

        state.select_room(room(5, RoomKind::Public));
        assert_eq!(
            state.submit_join(""),
            Some(Effect::JoinRoom {
                request: JoinRequest::Public {
                    room_id: RoomId::Number(5)
                }
            })
        );
    }

    #[test]
    fn test_successful_join_closes_modal_and_navigates() {
        let mut state = state_with_user();
        state.select_room(room(5, RoomKind::Public));

        state.apply_outcome(Outcome::RoomJoined {
            request: JoinRequest::Public {
                room_id: RoomId::Number(5),
            },
            result: Ok(()),
        });

        assert!(!state.join_modal.is_open());
        assert_eq!(
            state.route,
            Route::Room {
                room_id: RoomId::Number(5)
            }
        );
        assert_eq!(state.route.path(), "/room/5");
        assert_eq!(state.alert, Some(Alert::info(JOIN_SUCCEEDED_MESSAGE)));
    }

    #[test]
    fn test_failed_join_shows_server_message_and_keeps_modal_open() {
        let mut state = state_with_user();
        state.select_room(room(4, RoomKind::Private));
        let request = JoinRequest::Private {
            room_id: RoomId::Number(4),
            password: "guess".into(),
        };

        state.apply_outcome(Outcome::RoomJoined {
            request: request.clone(),
            result: Err(ApiError::Status {
                status: 403,
                message: Some("wrong password".into()),
                body: r#"{"msg":"wrong password"}"#.into(),
            }),
        });

        assert_eq!(state.alert, Some(Alert::error("wrong password")));
        assert_eq!(state.join_modal.room(), Some(&room(4, RoomKind::Private)));
        assert_eq!(state.route, Route::MyRooms);

        state.handle_action(Action::DismissAlert);
        state.apply_outcome(Outcome::RoomJoined {
            request,
            result: Err(ApiError::Transport("connection refused".into())),
        });
        assert_eq!(state.alert, Some(Alert::error(JOIN_FAILED_MESSAGE)));
    }

    #[test]
    fn test_navigate_back_to_the_list() {
        let mut state = state_with_user();
        state.route = Route::Room {
            room_id: RoomId::Number(1),
        };

        state.handle_action(Action::Navigate {
            route: Route::MyRooms,
        });

        assert_eq!(state.route, Route::MyRooms);
        assert_eq!(state.route.path(), "/my-rooms");
    }
}
