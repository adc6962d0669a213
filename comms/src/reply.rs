use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{ApiError, Result},
    room::{Room, RoomRecord},
};

/// Reply of the room listing endpoint, `{ "data": [ ... ] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomListReply {
    pub data: Vec<RoomRecord>,
}

impl RoomListReply {
    /// Parses the reply, rejecting anything that is not an object carrying a sequence of rooms.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::MalformedPayload(format!("body is not json: {}", e)))?;

        let data = match value.get("data") {
            Some(data @ Value::Array(_)) => data.clone(),
            Some(other) => {
                return Err(ApiError::MalformedPayload(format!(
                    "data is not a sequence: {}",
                    other
                )))
            }
            None => {
                return Err(ApiError::MalformedPayload(format!(
                    "no data in reply: {}",
                    value
                )))
            }
        };

        let data = serde_json::from_value::<Vec<RoomRecord>>(data)
            .map_err(|e| ApiError::MalformedPayload(format!("invalid room record: {}", e)))?;

        Ok(RoomListReply { data })
    }

    pub fn into_rooms(self) -> Vec<Room> {
        self.data.into_iter().map(Room::from).collect()
    }
}

/// Error body the backend may attach to a failed request, `{ "msg": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReply {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorReply {
    /// Extracts a non-empty `msg` from a raw error body, if the body carries one.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorReply>(body)
            .ok()
            .and_then(|reply| reply.msg)
            .filter(|msg| !msg.is_empty())
    }
}
