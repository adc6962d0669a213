/// Errors raised while talking to the rooms backend
pub mod error;
/// Bodies the client sends to the rooms backend
pub mod request;
/// Bodies the rooms backend replies with
pub mod reply;
/// Rooms and identifiers as seen by the client
pub mod room;
/// Implementation of the rooms backend API over HTTP.
/// Requires the 'client' feature to be enabled and will bring in reqwest alongside with other dependencies
pub mod transport;

pub use error::ApiError;
