#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::broadcast;

/// Why the application is shutting down
#[derive(Debug, Clone)]
pub enum Interrupted {
    OsSigInt,
    UserInt,
}

/// Broadcasts the shutdown reason to every running loop
#[derive(Debug, Clone)]
pub struct Terminator {
    interrupt_tx: broadcast::Sender<Interrupted>,
}

impl Terminator {
    pub fn new(interrupt_tx: broadcast::Sender<Interrupted>) -> Self {
        Self { interrupt_tx }
    }

    pub fn terminate(&mut self, interrupted: Interrupted) -> anyhow::Result<()> {
        self.interrupt_tx.send(interrupted)?;

        Ok(())
    }
}

#[cfg(unix)]
async fn terminate_by_unix_signal(mut terminator: Terminator) {
    let mut interrupt_signal = match signal(SignalKind::interrupt()) {
        Ok(interrupt_signal) => interrupt_signal,
        Err(err) => {
            tracing::error!(error = %err, "could not listen for the interrupt signal");
            return;
        }
    };

    interrupt_signal.recv().await;
    tracing::info!("received interrupt signal");

    if let Err(err) = terminator.terminate(Interrupted::OsSigInt) {
        tracing::error!(error = %err, "could not broadcast the interrupt signal");
    }
}

// create a broadcast channel for retrieving the application kill signal
pub fn create_termination() -> (Terminator, broadcast::Receiver<Interrupted>) {
    let (tx, rx) = broadcast::channel(1);
    let terminator = Terminator::new(tx);

    #[cfg(unix)]
    tokio::spawn(terminate_by_unix_signal(terminator.clone()));

    (terminator, rx)
}
