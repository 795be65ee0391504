use projectile_lab::core::{ConfigError, SimConfig, SimError, Simulator};

pub(crate) struct AppRuntime {
    pub(crate) simulator: Simulator,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            simulator: Simulator::new(config)?,
            status_line: String::from("Pick a scenario"),
        })
    }

    /// Command rejections are shown in the status line; launch errors are
    /// already carried by the snapshot.
    pub(crate) fn record(&mut self, result: Result<(), SimError>) {
        match result {
            Ok(()) => {}
            Err(SimError::Command(err)) => self.status_line = err.to_string(),
            Err(SimError::Launch(_)) => {}
            Err(err @ SimError::Incomplete { .. }) => self.status_line = err.to_string(),
        }
    }
}
