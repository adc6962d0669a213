use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use comms::{
    error::Result,
    request::JoinRequest,
    room::{Room, RoomId, RoomKind, UserId},
    transport::client::RoomsApi,
};

pub fn room(id: u64, kind: RoomKind) -> Room {
    Room {
        id: RoomId::Number(id),
        name: format!("room-{}", id),
        kind,
        description: None,
        user_count: None,
    }
}

/// A call received by [FakeRoomsApi]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListRooms { user_id: UserId },
    JoinRoom { request: JoinRequest },
}

/// Records every call and replies with the queued results, in order.
/// Listings default to no rooms and joins to success once the queue is empty.
#[derive(Default)]
pub struct FakeRoomsApi {
    calls: Mutex<Vec<ApiCall>>,
    listing_replies: Mutex<VecDeque<Result<Vec<Room>>>>,
    join_replies: Mutex<VecDeque<Result<()>>>,
}

impl FakeRoomsApi {
    pub fn reply_to_listing(self, reply: Result<Vec<Room>>) -> Self {
        self.listing_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn reply_to_join(self, reply: Result<()>) -> Self {
        self.join_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoomsApi for FakeRoomsApi {
    async fn list_rooms(&self, user_id: &UserId) -> Result<Vec<Room>> {
        self.calls.lock().unwrap().push(ApiCall::ListRooms {
            user_id: user_id.clone(),
        });

        self.listing_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn join_room(&self, request: &JoinRequest) -> Result<()> {
        self.calls.lock().unwrap().push(ApiCall::JoinRoom {
            request: request.clone(),
        });

        self.join_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}
