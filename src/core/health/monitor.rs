//! Background health probing
//!
//! One ticker per monitor. Each tick probes every registered provider in turn
//! and feeds the result into the registry. The registry lock is only taken for
//! the write after a probe returns, never while a probe is running.

use super::registry::HealthRegistry;
use super::types::HealthStatus;
use crate::core::providers::{ProviderError, ProviderType};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Probe future resolving to the observed response time in milliseconds
pub type ProbeFuture = BoxFuture<'static, Result<u64, ProviderError>>;

/// Injected probe function
pub type ProbeFn = Arc<dyn Fn(ProviderType) -> ProbeFuture + Send + Sync>;

/// Health monitor configuration
#[derive(Debug, Clone)]
pub struct HealthMonitorConfig {
    /// Interval between probe cycles
    pub check_interval: Duration,
    /// Timeout for an individual probe
    pub check_timeout: Duration,
    /// Whether the background loop runs at all
    pub auto_check_enabled: bool,
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(60),
            check_timeout: Duration::from_secs(10),
            auto_check_enabled: true,
        }
    }
}

/// Periodic prober for a [`HealthRegistry`]
pub struct HealthMonitor {
    config: HealthMonitorConfig,
    registry: Arc<HealthRegistry>,
    probe: ProbeFn,
    stop_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl HealthMonitor {
    pub fn new(config: HealthMonitorConfig, registry: Arc<HealthRegistry>, probe: ProbeFn) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            config,
            registry,
            probe,
            stop_tx,
            task: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &HealthMonitorConfig {
        &self.config
    }

    /// Spawn the probe loop on the current tokio runtime
    ///
    /// Returns `false` when the loop is already running, the monitor was
    /// stopped, or no runtime is available. A stopped monitor never re-arms.
    pub fn start(&self) -> bool {
        if self.is_stopped() {
            debug!("Health monitor already stopped, not starting");
            return false;
        }

        let mut task = self.task.lock();
        if task.is_some() {
            return false;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No tokio runtime available, background health checks disabled");
                return false;
            }
        };

        info!(
            "Starting health monitor (interval {:?}, timeout {:?})",
            self.config.check_interval, self.config.check_timeout
        );

        let registry = self.registry.clone();
        let probe = self.probe.clone();
        let config = self.config.clone();
        let stop_rx = self.stop_tx.subscribe();

        *task = Some(handle.spawn(run_loop(registry, probe, config, stop_rx)));
        true
    }

    /// Run one probe cycle inline
    pub async fn check_all(&self) {
        let mut stop_rx = self.stop_tx.subscribe();
        probe_cycle(
            &self.registry,
            &self.probe,
            self.config.check_timeout,
            &mut stop_rx,
        )
        .await;
    }

    /// Stop the probe loop; calling it again is a no-op
    pub fn stop(&self) {
        let already_stopped = self.stop_tx.send_replace(true);
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        if !already_stopped {
            info!("Health monitor stopped");
        }
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop_tx.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl std::fmt::Debug for HealthMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthMonitor")
            .field("config", &self.config)
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_loop(
    registry: Arc<HealthRegistry>,
    probe: ProbeFn,
    config: HealthMonitorConfig,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(config.check_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            _ = ticker.tick() => {}
        }

        if !probe_cycle(&registry, &probe, config.check_timeout, &mut stop_rx).await {
            break;
        }
    }

    debug!("Health probe loop exited");
}

/// Probe every registered provider once, sequentially
///
/// Returns `false` if a stop was signalled during the cycle.
async fn probe_cycle(
    registry: &HealthRegistry,
    probe: &ProbeFn,
    timeout: Duration,
    stop_rx: &mut watch::Receiver<bool>,
) -> bool {
    for provider in registry.providers() {
        if *stop_rx.borrow() {
            return false;
        }

        debug!("Running health check for provider: {}", provider);

        let outcome = tokio::select! {
            biased;
            _ = stop_rx.changed() => return false,
            outcome = tokio::time::timeout(timeout, (**probe)(provider.clone())) => outcome,
        };

        match outcome {
            Ok(Ok(response_time_ms)) => {
                registry.record_outcome(&provider, HealthStatus::Up, Some(response_time_ms), None);
            }
            Ok(Err(error)) => {
                debug!("Health check failed for {}: {}", provider, error);
                registry.record_outcome(&provider, HealthStatus::Down, None, Some(error.to_string()));
            }
            Err(_) => {
                let detail = format!("Health check timed out after {}ms", timeout.as_millis());
                debug!("{} for {}", detail, provider);
                registry.record_outcome(&provider, HealthStatus::Down, None, Some(detail));
            }
        }
    }
    true
}
