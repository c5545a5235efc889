use crate::{
    core::{Bus, Config},
    error::BusError,
    listeners::ListenerRef,
};

/// Builder for constructing a [`Bus`] with listeners and optional asynchronous dispatch.
pub struct BusBuilder {
    name: String,
    cfg: Config,
    listeners: Vec<(String, ListenerRef)>,
}

impl BusBuilder {
    /// Creates a new builder with the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cfg: Config::default(),
            listeners: Vec::new(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Registers a listener before the bus starts taking traffic.
    pub fn with_listener(mut self, name: impl Into<String>, listener: ListenerRef) -> Self {
        self.listeners.push((name.into(), listener));
        self
    }

    /// Builds the bus.
    ///
    /// Listeners are registered first, then asynchronous dispatch is enabled if
    /// [`Config::async_mode`] asks for it (which needs a Tokio runtime).
    pub fn build(self) -> Result<Bus, BusError> {
        let bus = Bus::with_drain_timeout(self.name, self.cfg.drain_timeout);
        for (name, listener) in self.listeners {
            bus.add_listener(name, listener);
        }

        if let Some((workers, capacity)) = self.cfg.async_mode() {
            bus.enable_async(workers, capacity)?;
        }
        Ok(bus)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::events::Event;
    use crate::listeners::ListenerFn;

    #[test]
    fn test_build_synchronous_outside_runtime() {
        let bus = BusBuilder::new("sync")
            .with_listener("a", ListenerFn::arc("noop", |_ev: &Event| {}))
            .build()
            .unwrap();

        assert_eq!(bus.name(), "sync");
        assert!(!bus.is_async());
        assert_eq!(bus.listener_count("a"), 1);
    }

    #[test]
    fn test_build_async_outside_runtime_fails() {
        let err = BusBuilder::new("async")
            .with_config(Config {
                workers: 2,
                ..Config::default()
            })
            .build()
            .unwrap_err();

        assert_eq!(err.as_label(), "bus_no_runtime");
    }

    #[tokio::test]
    async fn test_build_async() {
        let bus = BusBuilder::new("async")
            .with_config(Config {
                drain_timeout: Duration::from_millis(20),
                workers: 2,
                queue_capacity: 8,
            })
            .build()
            .unwrap();

        assert!(bus.is_async());
        assert_eq!(bus.worker_count(), 2);
        assert_eq!(bus.queue_capacity(), Some(8));
        assert_eq!(bus.drain_timeout(), Duration::from_millis(20));
        bus.close().await;
        assert_eq!(bus.active_workers(), 0);
    }
}
