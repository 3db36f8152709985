use std::time::Duration;

/// Runtime settings for the identity directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Disables the background discovery refresher entirely.
    ///
    /// Lookups against already-known clients keep working.
    pub offline: bool,
    /// Pause between discovery refresh cycles.
    pub refresh_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            offline: false,
            refresh_interval: Duration::from_secs(60 * 60),
        }
    }
}
