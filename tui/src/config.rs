use std::path::PathBuf;

use clap::Parser;
use comms::room::UserId;
use percent_encoding::percent_decode_str;

use crate::state_store::Session;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// Name of the cookie carrying the user id
pub const USER_ID_COOKIE: &str = "userId";

/// Lists the rooms you have joined and lets you enter them again
#[derive(Debug, Clone, Parser)]
#[command(name = "my-rooms", version, about)]
pub struct Args {
    /// Base url of the rooms backend
    #[arg(long, env = "MY_ROOMS_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Id of the user to list the rooms of, takes precedence over --cookie
    #[arg(long, env = "MY_ROOMS_USER_ID")]
    pub user_id: Option<String>,

    /// Cookie header to read the user id from, e.g. "theme=dark; userId=42"
    #[arg(long, env = "MY_ROOMS_COOKIE")]
    pub cookie: Option<String>,

    /// File the logs are written to, the terminal being used by the interface
    #[arg(long, env = "MY_ROOMS_LOG_FILE", default_value = "my-rooms.log")]
    pub log_file: PathBuf,

    /// Log filter used when RUST_LOG is not set, e.g. "debug" or "my_rooms=trace"
    #[arg(long, env = "MY_ROOMS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Resolves the session user from the explicit id first, then from the cookie header
    pub fn session(&self) -> Session {
        let user_id = self
            .user_id
            .clone()
            .and_then(UserId::new)
            .or_else(|| {
                self.cookie
                    .as_deref()
                    .and_then(|header| cookie_value(header, USER_ID_COOKIE))
                    .and_then(UserId::new)
            });

        Session { user_id }
    }
}

/// Looks up the percent-decoded value of the named cookie in a `Cookie` header
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| {
            percent_decode_str(value.trim())
                .decode_utf8_lossy()
                .into_owned()
        })
}
