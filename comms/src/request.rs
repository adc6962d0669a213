use std::fmt;

use serde::{Deserialize, Serialize};

use crate::room::{Room, RoomId, RoomKind};

/// Body of the private room join request.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateJoinBody {
    pub room_password: String,
}

/// A request to enter a room the user has joined.
/// Public rooms are entered without a body, private ones with the password typed by the user.
#[derive(Clone, PartialEq)]
pub enum JoinRequest {
    Public { room_id: RoomId },
    Private { room_id: RoomId, password: String },
}

impl JoinRequest {
    /// Builds the request matching the kind of the room.
    /// The password is ignored for public rooms.
    pub fn for_room(room: &Room, password: &str) -> Self {
        match room.kind {
            RoomKind::Public => JoinRequest::Public {
                room_id: room.id.clone(),
            },
            RoomKind::Private => JoinRequest::Private {
                room_id: room.id.clone(),
                password: password.to_string(),
            },
        }
    }

    pub fn room_id(&self) -> &RoomId {
        match self {
            JoinRequest::Public { room_id } | JoinRequest::Private { room_id, .. } => room_id,
        }
    }

    pub fn kind(&self) -> RoomKind {
        match self {
            JoinRequest::Public { .. } => RoomKind::Public,
            JoinRequest::Private { .. } => RoomKind::Private,
        }
    }

    /// Last path segment of the join endpoint, `/rooms/{roomId}/{access}`
    pub fn access_segment(&self) -> &'static str {
        match self {
            JoinRequest::Public { .. } => "public",
            JoinRequest::Private { .. } => "private",
        }
    }

    /// The json body to send along with the request, [None] for public rooms
    pub fn body(&self) -> Option<PrivateJoinBody> {
        match self {
            JoinRequest::Public { .. } => None,
            JoinRequest::Private { password, .. } => Some(PrivateJoinBody {
                room_password: password.clone(),
            }),
        }
    }
}

// passwords must not end up in the logs
impl fmt::Debug for JoinRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinRequest::Public { room_id } => f
                .debug_struct("Public")
                .field("room_id", room_id)
                .finish(),
            JoinRequest::Private { room_id, .. } => f
                .debug_struct("Private")
                .field("room_id", room_id)
                .field("password", &"***")
                .finish(),
        }
    }
}

impl fmt::Debug for PrivateJoinBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateJoinBody")
            .field("room_password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(kind: RoomKind) -> Room {
        Room {
            id: RoomId::Number(3),
            name: "room".into(),
            kind,
            description: None,
            user_count: None,
        }
    }

    #[test]
    fn test_public_request_has_no_body() {
        let request = JoinRequest::for_room(&room(RoomKind::Public), "ignored");

        assert_eq!(
            request,
            JoinRequest::Public {
                room_id: RoomId::Number(3)
            }
        );
        assert_eq!(request.access_segment(), "public");
        assert!(request.body().is_none());
    }

    #[test]
    fn test_private_request_body() {
        let request = JoinRequest::for_room(&room(RoomKind::Private), " pw ");

        assert_eq!(request.access_segment(), "private");
        assert_eq!(
            serde_json::to_string(&request.body().unwrap()).unwrap(),
            r#"{"roomPassword":" pw "}"#
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let request = JoinRequest::for_room(&room(RoomKind::Private), "hunter2");

        assert!(!format!("{:?}", request).contains("hunter2"));
        assert!(!format!("{:?}", request.body().unwrap()).contains("hunter2"));
    }
}
