/// Transport over HTTP implementation for a client to be able to interact with the rooms backend
#[cfg(feature = "client")]
pub mod client;
