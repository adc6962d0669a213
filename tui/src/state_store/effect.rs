use std::sync::Arc;

use comms::{
    error::Result,
    request::JoinRequest,
    room::{Room, UserId},
    transport::client::RoomsApi,
};

/// A network call requested by a state change
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ListRooms { user_id: UserId },
    JoinRoom { request: JoinRequest },
}

/// The result of an [Effect], to be applied back to the state
#[derive(Debug)]
pub enum Outcome {
    RoomsListed {
        user_id: UserId,
        result: Result<Vec<Room>>,
    },
    RoomJoined {
        request: JoinRequest,
        result: Result<()>,
    },
}

/// Performs the network call of the effect. Never fails, failures are part of the [Outcome].
pub async fn run(api: Arc<dyn RoomsApi>, effect: Effect) -> Outcome {
    match effect {
        Effect::ListRooms { user_id } => {
            tracing::debug!(%user_id, "listing rooms");
            let result = api.list_rooms(&user_id).await;

            Outcome::RoomsListed { user_id, result }
        }
        Effect::JoinRoom { request } => {
            let result = api.join_room(&request).await;

            Outcome::RoomJoined { request, result }
        }
    }
}
