//! Supervisor configuration

use std::time::Duration;

/// Configuration options for the stream supervisor
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// How much stream time each buffer retains (capacity = duration * fps)
    pub buffer_duration: Duration,

    /// Frame rate applied when a start request omits one
    pub default_fps: u32,

    /// How long `shutdown` waits for producer tasks before detaching them
    pub drain_timeout: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            buffer_duration: Duration::from_secs(60),
            default_fps: 25,
            drain_timeout: Duration::from_secs(5),
        }
    }
}

impl SupervisorConfig {
    /// Set the buffer window duration
    pub fn buffer_duration(mut self, duration: Duration) -> Self {
        self.buffer_duration = duration;
        self
    }

    /// Set the default frame rate
    pub fn default_fps(mut self, fps: u32) -> Self {
        self.default_fps = fps;
        self
    }

    /// Set the shutdown drain timeout
    pub fn drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SupervisorConfig::default();

        assert_eq!(config.buffer_duration, Duration::from_secs(60));
        assert_eq!(config.default_fps, 25);
        assert_eq!(config.drain_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_chaining() {
        let config = SupervisorConfig::default()
            .buffer_duration(Duration::from_secs(10))
            .default_fps(30)
            .drain_timeout(Duration::from_millis(500));

        assert_eq!(config.buffer_duration, Duration::from_secs(10));
        assert_eq!(config.default_fps, 30);
        assert_eq!(config.drain_timeout, Duration::from_millis(500));
    }
}
