use std::sync::Arc;

use comms::transport::client::RoomsApi;
use tokio::{
    sync::{
        broadcast,
        mpsc::{self, UnboundedReceiver, UnboundedSender},
    },
    task::JoinSet,
};

use crate::{Interrupted, Terminator};

use super::{
    action::Action,
    effect::{self, Outcome},
    Session, State,
};

pub struct StateStore {
    state_tx: UnboundedSender<State>,
    api: Arc<dyn RoomsApi>,
}

impl StateStore {
    pub fn new(api: Arc<dyn RoomsApi>) -> (Self, UnboundedReceiver<State>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<State>();

        (StateStore { state_tx, api }, state_rx)
    }
}

impl StateStore {
    pub async fn main_loop(
        self,
        mut terminator: Terminator,
        session: Session,
        mut action_rx: UnboundedReceiver<Action>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        let mut state = State::new(session);
        // network calls in flight, each one finishing on its own
        let mut effects: JoinSet<Outcome> = JoinSet::new();

        // mounting the page lists the rooms once
        if let Some(effect) = state.load() {
            effects.spawn(effect::run(self.api.clone(), effect));
        }

        // the initial state once
        self.state_tx.send(state.clone())?;

        let result = loop {
            tokio::select! {
                // Handle the actions coming from the UI
                // and start the network calls they require
                Some(action) = action_rx.recv() => match action {
                    Action::Exit => {
                        let _ = terminator.terminate(Interrupted::UserInt);

                        break Interrupted::UserInt;
                    },
                    action => {
                        if let Some(effect) = state.handle_action(action) {
                            effects.spawn(effect::run(self.api.clone(), effect));
                        }
                    },
                },
                // Apply the network calls in the order they finish
                Some(finished) = effects.join_next() => match finished {
                    Ok(outcome) => state.apply_outcome(outcome),
                    Err(err) => tracing::error!(error = %err, "network call panicked"),
                },
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break interrupted;
                }
            }

            self.state_tx.send(state.clone())?;
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use comms::{
        request::JoinRequest,
        room::{RoomId, RoomKind, UserId},
        ApiError,
    };
    use tokio::task::JoinHandle;

    use super::*;
    use crate::state_store::{
        fixtures::{room, ApiCall, FakeRoomsApi},
        Alert, Route, JOIN_SUCCEEDED_MESSAGE, PASSWORD_REQUIRED_MESSAGE,
    };

    struct RunningStore {
        action_tx: UnboundedSender<Action>,
        state_rx: UnboundedReceiver<State>,
        interrupt_tx: broadcast::Sender<Interrupted>,
        api: Arc<FakeRoomsApi>,
        handle: JoinHandle<anyhow::Result<Interrupted>>,
    }

    impl RunningStore {
        fn start(user_id: Option<&str>, api: FakeRoomsApi) -> Self {
            let api = Arc::new(api);
            let (store, state_rx) = StateStore::new(api.clone());
            let (action_tx, action_rx) = mpsc::unbounded_channel();
            let (interrupt_tx, interrupt_rx) = broadcast::channel(1);
            let terminator = Terminator::new(interrupt_tx.clone());
            let session = Session {
                user_id: user_id.and_then(UserId::new),
            };

            let handle = tokio::spawn(store.main_loop(terminator, session, action_rx, interrupt_rx));

            RunningStore {
                action_tx,
                state_rx,
                interrupt_tx,
                api,
                handle,
            }
        }

        fn send(&self, action: Action) {
            self.action_tx.send(action).unwrap();
        }

        // waits for the first state snapshot matching the predicate
        async fn state_matching(&mut self, predicate: impl Fn(&State) -> bool) -> State {
            tokio::time::timeout(Duration::from_secs(5), async {
                loop {
                    let state = self.state_rx.recv().await.expect("state store has stopped");
                    if predicate(&state) {
                        break state;
                    }
                }
            })
            .await
            .expect("no matching state in time")
        }

        async fn exit(self) -> Vec<ApiCall> {
            self.send(Action::Exit);
            let interrupted = self.handle.await.unwrap().unwrap();
            assert!(matches!(interrupted, Interrupted::UserInt));

            self.api.calls()
        }
    }

    fn user_id() -> UserId {
        UserId::new("7").unwrap()
    }

    #[tokio::test]
    async fn test_no_user_id_means_no_listing() {
        let mut store = RunningStore::start(None, FakeRoomsApi::default());

        store.state_matching(|_| true).await;
        store.send(Action::LoadRooms);
        let state = store.state_matching(|_| true).await;
        assert!(state.rooms.is_empty());
        assert_eq!(state.pending_room_listings, 0);

        assert_eq!(store.exit().await, vec![]);
    }

    #[tokio::test]
    async fn test_mount_lists_rooms() {
        let rooms = vec![
            room(1, RoomKind::Public),
            room(2, RoomKind::Private),
            room(3, RoomKind::Public),
        ];
        let mut store = RunningStore::start(
            Some("7"),
            FakeRoomsApi::default().reply_to_listing(Ok(rooms.clone())),
        );

        let state = store.state_matching(|state| !state.rooms.is_empty()).await;
        assert_eq!(state.rooms, rooms);
        assert_eq!(state.pending_room_listings, 0);

        assert_eq!(
            store.exit().await,
            vec![ApiCall::ListRooms { user_id: user_id() }]
        );
    }

    #[tokio::test]
    async fn test_malformed_listing_keeps_previous_rooms() {
        let rooms = vec![room(1, RoomKind::Public), room(2, RoomKind::Public)];
        let mut store = RunningStore::start(
            Some("7"),
            FakeRoomsApi::default()
                .reply_to_listing(Ok(rooms.clone()))
                .reply_to_listing(Err(ApiError::MalformedPayload(
                    "data is not a sequence".into(),
                ))),
        );

        store.state_matching(|state| !state.rooms.is_empty()).await;
        store.send(Action::LoadRooms);
        store
            .state_matching(|state| state.pending_room_listings == 1)
            .await;
        let state = store
            .state_matching(|state| state.pending_room_listings == 0)
            .await;

        assert_eq!(state.rooms, rooms);
        assert_eq!(state.alert, None);
        assert_eq!(store.exit().await.len(), 2);
    }

    #[tokio::test]
    async fn test_private_room_without_password_is_not_joined() {
        let mut store = RunningStore::start(None, FakeRoomsApi::default());

        store.send(Action::SelectRoom {
            room: room(4, RoomKind::Private),
        });
        store.send(Action::SubmitJoin {
            password: String::new(),
        });

        let state = store.state_matching(|state| state.alert.is_some()).await;
        assert_eq!(state.alert, Some(Alert::error(PASSWORD_REQUIRED_MESSAGE)));
        assert!(state.join_modal.is_open());

        assert_eq!(store.exit().await, vec![]);
    }

    #[tokio::test]
    async fn test_public_room_is_joined_without_password() {
        let mut store = RunningStore::start(None, FakeRoomsApi::default());

        store.send(Action::SelectRoom {
            room: room(5, RoomKind::Public),
        });
        store.send(Action::SubmitJoin {
            password: String::from("typed anyway"),
        });

        let state = store
            .state_matching(|state| state.route != Route::MyRooms)
            .await;
        assert_eq!(
            state.route,
            Route::Room {
                room_id: RoomId::Number(5)
            }
        );
        assert!(!state.join_modal.is_open());
        assert_eq!(state.alert, Some(Alert::info(JOIN_SUCCEEDED_MESSAGE)));

        assert_eq!(
            store.exit().await,
            vec![ApiCall::JoinRoom {
                request: JoinRequest::Public {
                    room_id: RoomId::Number(5)
                }
            }]
        );
    }

    #[tokio::test]
    async fn test_wrong_password_shows_server_message() {
        let mut store = RunningStore::start(
            None,
            FakeRoomsApi::default().reply_to_join(Err(ApiError::Status {
                status: 403,
                message: Some("wrong password".into()),
                body: r#"{"msg":"wrong password"}"#.into(),
            })),
        );

        store.send(Action::SelectRoom {
            room: room(4, RoomKind::Private),
        });
        store.send(Action::SubmitJoin {
            password: String::from("guess"),
        });

        let state = store.state_matching(|state| state.alert.is_some()).await;
        assert_eq!(state.alert, Some(Alert::error("wrong password")));
        assert_eq!(state.join_modal.room(), Some(&room(4, RoomKind::Private)));
        assert_eq!(state.route, Route::MyRooms);

        assert_eq!(
            store.exit().await,
            vec![ApiCall::JoinRoom {
                request: JoinRequest::Private {
                    room_id: RoomId::Number(4),
                    password: "guess".into()
                }
            }]
        );
    }

    #[tokio::test]
    async fn test_interrupt_stops_the_store() {
        let mut store = RunningStore::start(None, FakeRoomsApi::default());
        store.state_matching(|_| true).await;

        store.interrupt_tx.send(Interrupted::OsSigInt).unwrap();

        let interrupted = store.handle.await.unwrap().unwrap();
        assert!(matches!(interrupted, Interrupted::OsSigInt));
    }
}
