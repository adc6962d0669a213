use async_trait::async_trait;
use reqwest::Response;
use url::Url;

use crate::{
    error::{ApiError, Result},
    reply::{ErrorReply, RoomListReply},
    request::JoinRequest,
    room::{Room, UserId},
};

/// The operations of the rooms backend the client relies on.
///
/// Every call is independent: implementations must not serialize or de-duplicate calls,
/// callers may have several of them in flight at the same time.
#[async_trait]
pub trait RoomsApi: Send + Sync {
    /// `GET /rooms/{userId}`, the rooms the user has joined
    async fn list_rooms(&self, user_id: &UserId) -> Result<Vec<Room>>;

    /// `POST /rooms/{roomId}/public` or `POST /rooms/{roomId}/private`
    async fn join_room(&self, request: &JoinRequest) -> Result<()>;
}

/// [RoomsApi] implementation talking to the backend over HTTP
#[derive(Debug, Clone)]
pub struct HttpRoomsClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpRoomsClient {
    /// Creates a client for the backend served at `base_url`.
    ///
    /// # Arguments
    ///
    /// - `base_url` - Absolute url the endpoint paths are appended to, a trailing slash is allowed
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: &str, http_client: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{} can not be used as a base url",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends the given path segments to the base url, percent-encoding each of them
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

/// Turns non-2xx responses into [ApiError::Status], keeping the `msg` of the body if there is one
async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;

    Err(ApiError::Status {
        status: status.as_u16(),
        message: ErrorReply::message_from(&body),
        body,
    })
}

#[async_trait]
impl RoomsApi for HttpRoomsClient {
    async fn list_rooms(&self, user_id: &UserId) -> Result<Vec<Room>> {
        let url = self.url(&["rooms", user_id.as_str()])?;
        tracing::debug!(%url, "listing rooms");

        let response = error_for_status(self.http_client.get(url).send().await?).await?;
        let body = response.bytes().await?;

        Ok(RoomListReply::parse(&body)?.into_rooms())
    }

    async fn join_room(&self, request: &JoinRequest) -> Result<()> {
        let room_id = request.room_id().to_string();
        let url = self.url(&["rooms", room_id.as_str(), request.access_segment()])?;
        tracing::debug!(%url, "joining room");

        let builder = self.http_client.post(url);
        let builder = match request.body() {
            Some(body) => builder.json(&body),
            None => builder,
        };

        error_for_status(builder.send().await?).await?;

        Ok(())
    }
}
