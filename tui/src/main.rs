use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use comms::transport::client::{HttpRoomsClient, RoomsApi};
use state_store::StateStore;
use ui_management::UiManager;

use config::Args;
pub use termination::{create_termination, Interrupted, Terminator};

mod config;
mod logging;
mod state_store;
mod termination;
mod ui_management;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    // logs are flushed for as long as the guard lives
    let _log_guard = logging::init(&args.log_file, &args.log_level)?;

    let session = args.session();
    tracing::info!(api_url = %args.api_url, user_id = ?session.user_id, "starting");

    let api: Arc<dyn RoomsApi> = Arc::new(
        HttpRoomsClient::new(&args.api_url)
            .with_context(|| format!("invalid api url: {}", args.api_url))?,
    );

    let (terminator, mut interrupt_rx) = create_termination();
    let (state_store, state_rx) = StateStore::new(api);
    let (ui_manager, action_rx) = UiManager::new();

    tokio::try_join!(
        state_store.main_loop(terminator, session, action_rx, interrupt_rx.resubscribe()),
        ui_manager.main_loop(state_rx, interrupt_rx.resubscribe()),
    )?;

    if let Ok(reason) = interrupt_rx.recv().await {
        match reason {
            Interrupted::UserInt => tracing::info!("exited per user request"),
            Interrupted::OsSigInt => tracing::info!("exited because of an os sig int"),
        }
    } else {
        tracing::warn!("exited because of an unexpected error");
    }

    Ok(())
}
