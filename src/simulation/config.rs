/*!
 * Simulation Configuration
 * Transport, detection threshold, and transit timing for one run
 */

use crate::core::limits::{
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_TRANSIT_DELAY, MAX_CHANNEL_CAPACITY,
};
use crate::core::serde::duration_millis;
use crate::ipc::types::{IpcError, IpcResult, TransportKind};
use crate::monitoring::DeadlockPolicy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable selecting the transport (`bounded`, `relay`, `cell`)
pub const ENV_TRANSPORT: &str = "IPC_SIM_TRANSPORT";
/// Environment variable with the bounded channel capacity
pub const ENV_CAPACITY: &str = "IPC_SIM_CAPACITY";
/// Environment variable with the deadlock threshold
pub const ENV_DEADLOCK_THRESHOLD: &str = "IPC_SIM_DEADLOCK_THRESHOLD";
/// Environment variable with the transit delay in milliseconds
pub const ENV_TRANSIT_MS: &str = "IPC_SIM_TRANSIT_MS";

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Transport built for every new link
    pub transport: TransportKind,

    /// Number of "BLOCKED" log entries that make a deadlock verdict
    pub deadlock_threshold: usize,

    /// Time between a successful send and its "received" log entry
    #[serde(with = "duration_millis")]
    pub transit_delay: Duration,
}

impl SimulationConfig {
    /// Interactive mode: bounded channel, relaxed detection, animated transit
    pub fn interactive() -> Self {
        Self {
            transport: TransportKind::bounded(DEFAULT_CHANNEL_CAPACITY),
            deadlock_threshold: DeadlockPolicy::Relaxed.threshold(),
            transit_delay: DEFAULT_TRANSIT_DELAY,
        }
    }

    /// Scripted mode: bounded channel, strict detection, instant transit
    pub fn scripted() -> Self {
        Self {
            transport: TransportKind::bounded(DEFAULT_CHANNEL_CAPACITY),
            deadlock_threshold: DeadlockPolicy::Strict.threshold(),
            transit_delay: Duration::ZERO,
        }
    }

    /// Interactive defaults overridden by `IPC_SIM_*` environment variables
    pub fn from_env() -> IpcResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Interactive defaults overridden by whatever `lookup` returns
    pub fn from_lookup<F>(lookup: F) -> IpcResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::interactive();

        let capacity = match lookup(ENV_CAPACITY) {
            Some(raw) => parse_var(ENV_CAPACITY, &raw)?,
            None => DEFAULT_CHANNEL_CAPACITY,
        };

        config.transport = match lookup(ENV_TRANSPORT).as_deref().map(str::trim) {
            None | Some("bounded") => TransportKind::bounded(capacity),
            Some("relay") => TransportKind::Relay,
            Some("cell") => TransportKind::Cell,
            Some(other) => {
                return Err(IpcError::InvalidConfig(format!(
                    "{} must be bounded, relay, or cell (got '{}')",
                    ENV_TRANSPORT, other
                )))
            }
        };

        if let Some(raw) = lookup(ENV_DEADLOCK_THRESHOLD) {
            config.deadlock_threshold = parse_var(ENV_DEADLOCK_THRESHOLD, &raw)?;
        }

        if let Some(raw) = lookup(ENV_TRANSIT_MS) {
            config.transit_delay = Duration::from_millis(parse_var(ENV_TRANSIT_MS, &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_deadlock_threshold(mut self, threshold: usize) -> Self {
        self.deadlock_threshold = threshold;
        self
    }

    pub fn with_transit_delay(mut self, delay: Duration) -> Self {
        self.transit_delay = delay;
        self
    }

    /// Reject values the simulator cannot run with
    pub fn validate(&self) -> IpcResult<()> {
        if let Some(capacity) = self.transport.capacity() {
            if capacity > MAX_CHANNEL_CAPACITY {
                return Err(IpcError::InvalidConfig(format!(
                    "channel capacity {} exceeds maximum {}",
                    capacity, MAX_CHANNEL_CAPACITY
                )));
            }
        }

        if self.deadlock_threshold == 0 {
            return Err(IpcError::InvalidConfig(
                "deadlock threshold must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::interactive()
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> IpcResult<T> {
    raw.trim().parse().map_err(|_| {
        IpcError::InvalidConfig(format!("{} is not a valid number: '{}'", key, raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_presets_use_different_thresholds() {
        assert_eq!(SimulationConfig::interactive().deadlock_threshold, 1);
        assert_eq!(SimulationConfig::scripted().deadlock_threshold, 2);
        assert_eq!(SimulationConfig::scripted().transit_delay, Duration::ZERO);
    }

    #[test]
    fn test_empty_lookup_gives_interactive_defaults() {
        let config = SimulationConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SimulationConfig::interactive());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = SimulationConfig::from_lookup(lookup_from(&[
            (ENV_CAPACITY, "5"),
            (ENV_DEADLOCK_THRESHOLD, "3"),
            (ENV_TRANSIT_MS, "25"),
        ]))
        .unwrap();

        assert_eq!(config.transport, TransportKind::bounded(5));
        assert_eq!(config.deadlock_threshold, 3);
        assert_eq!(config.transit_delay, Duration::from_millis(25));
    }

    #[test]
    fn test_unknown_transport_rejected() {
        let err = SimulationConfig::from_lookup(lookup_from(&[(ENV_TRANSPORT, "socket")]))
            .unwrap_err();
        assert!(matches!(err, IpcError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let err = SimulationConfig::interactive()
            .with_deadlock_threshold(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, IpcError::InvalidConfig(_)));
    }
}
