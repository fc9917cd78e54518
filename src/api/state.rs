use std::time::Instant;

use crate::batch::Dispatcher;
use crate::config::Config;
use crate::desktop::Drivers;
use crate::error::{panic_message, ControlError, Result};

/// Shared application state, built once at startup
pub struct AppState {
    pub config: Config,

    /// Executes actions against the driver set
    pub dispatcher: Dispatcher,

    /// For the uptime reported by /health
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, drivers: Drivers) -> Self {
        let dispatcher = Dispatcher::new(drivers, &config);
        Self {
            config,
            dispatcher,
            started_at: Instant::now(),
        }
    }

    pub fn drivers(&self) -> &Drivers {
        self.dispatcher.drivers()
    }

    /// Run driver work on its own blocking worker.
    ///
    /// A panic inside `work` comes back as `ControlError::Internal`.
    pub async fn blocking<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&Dispatcher) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        match tokio::task::spawn_blocking(move || work(&dispatcher)).await {
            Ok(result) => result,
            Err(e) if e.is_panic() => {
                let message = panic_message(e.into_panic().as_ref());
                tracing::error!("Driver worker panicked: {}", message);
                Err(ControlError::Internal(message))
            }
            Err(e) => Err(ControlError::Internal(e.to_string())),
        }
    }
}
