use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a room.
/// The backend is free to send it either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomId::Number(id) => write!(f, "{}", id),
            RoomId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for RoomId {
    fn from(id: u64) -> Self {
        RoomId::Number(id)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        RoomId::Text(id.to_string())
    }
}

/// Identifier of the user whose rooms are listed. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Returns [None] for blank ids, which are treated the same as a missing id.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let id = id.trim();

        if id.is_empty() {
            None
        } else {
            Some(UserId(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A room as it is sent by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub room_id: RoomId,
    pub room_name: String,
    /// Present and non-empty for private rooms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u32>,
}

/// Whether entering a room requires a password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    Public,
    Private,
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomKind::Public => f.write_str("Public"),
            RoomKind::Private => f.write_str("Private"),
        }
    }
}

/// A room the user has joined.
/// The password of a private room is never kept on the client, only the fact that one is required.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub kind: RoomKind,
    pub description: Option<String>,
    pub user_count: Option<u32>,
}

impl Room {
    pub fn is_private(&self) -> bool {
        self.kind == RoomKind::Private
    }
}

impl From<RoomRecord> for Room {
    fn from(record: RoomRecord) -> Self {
        let kind = match record.room_password.as_deref() {
            Some(password) if !password.is_empty() => RoomKind::Private,
            _ => RoomKind::Public,
        };

        Room {
            id: record.room_id,
            name: record.room_name,
            kind,
            description: record.description.filter(|d| !d.is_empty()),
            user_count: record.user_count,
        }
    }
}
