use std::time::Duration;

use rag_logging::{rag_debug, rag_info};
use ragdemo_engine::EngineHandle;
use tokio_util::sync::CancellationToken;

/// Periodic health probing on the engine runtime. Results arrive as
/// `HealthChecked` engine events. Started explicitly and stopped by
/// [`ServerStatusMonitor::shutdown`] or on drop.
#[derive(Debug)]
pub struct ServerStatusMonitor {
    cancel: CancellationToken,
}

impl ServerStatusMonitor {
    pub fn start(engine: &EngineHandle, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        rag_info!("Server status monitor every {:?}", interval);
        engine.monitor_health(interval, cancel.clone());
        Self { cancel }
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn shutdown(&self) {
        if self.is_running() {
            rag_debug!("Stopping server status monitor");
            self.cancel.cancel();
        }
    }
}

impl Drop for ServerStatusMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdemo_engine::{ClientSettings, EngineEvent};

    #[test]
    fn unreachable_backend_reports_offline_until_shutdown() {
        let engine =
            EngineHandle::new(ClientSettings::with_base_url("http://127.0.0.1:1")).unwrap();
        let monitor = ServerStatusMonitor::start(&engine, Duration::from_secs(60));
        assert!(monitor.is_running());

        let event = engine.recv_timeout(Duration::from_secs(10)).ok();
        assert_eq!(event, Some(EngineEvent::HealthChecked { online: false }));

        monitor.shutdown();
        assert!(!monitor.is_running());
    }
}
