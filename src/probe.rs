use std::time::{Duration, Instant};

use tokio::net::TcpStream;
use tokio::time;

use crate::db::postgres::{collect_details, Driver, PgDriver};
use crate::error::{sanitize_error, ProbeError};
use crate::models::{ConnectionInfo, ConnectionTestResult, PerformanceMetrics};

/// Timeout for the raw TCP reachability check.
pub const TCP_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for establishing the authenticated session.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the connectivity test sequence: TCP reachability first, then a real
/// session plus the metadata battery. One pass, no retries, and every failure
/// is folded into the returned result instead of surfacing as an error.
pub struct Prober {
    tcp_timeout: Duration,
    connect_timeout: Duration,
}

impl Default for Prober {
    fn default() -> Self {
        Self {
            tcp_timeout: TCP_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
        }
    }
}

impl Prober {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the default 5 s / 10 s timeouts.
    pub fn with_timeouts(tcp_timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            tcp_timeout,
            connect_timeout,
        }
    }

    /// Probe against a live PostgreSQL server.
    pub async fn probe(&self, info: &ConnectionInfo) -> ConnectionTestResult {
        self.probe_with(&PgDriver, info).await
    }

    /// Probe through an explicit driver. The production path goes through
    /// [`PgDriver`]; tests substitute a double here.
    pub async fn probe_with(
        &self,
        driver: &dyn Driver,
        info: &ConnectionInfo,
    ) -> ConnectionTestResult {
        let start = Instant::now();

        if !self.host_reachable(&info.host, info.port).await {
            // Fail fast: no point waiting out a doomed session attempt.
            let unreachable = ProbeError::Unreachable {
                host: info.host.clone(),
                port: info.port,
            };
            return ConnectionTestResult {
                error_message: Some(unreachable.to_string()),
                ..Default::default()
            };
        }

        log::debug!("host {}:{} reachable, opening session", info.host, info.port);

        let conn_start = Instant::now();
        let mut session = match driver.open(info, self.connect_timeout).await {
            Ok(session) => session,
            Err(e) => {
                return ConnectionTestResult {
                    host_reachable: true,
                    error_message: Some(sanitize_error(&ProbeError::from(e).to_string())),
                    ..Default::default()
                };
            }
        };
        let connection_time = conn_start.elapsed();

        let query_start = Instant::now();
        let details = collect_details(session.as_mut()).await;
        let query_time = query_start.elapsed();

        session.close().await;

        // Establishment succeeded; a failed metadata query does not undo it.
        ConnectionTestResult {
            host_reachable: true,
            connection_successful: true,
            error_message: None,
            detailed_info: Some(details),
            performance_metrics: PerformanceMetrics::from_durations(
                connection_time,
                query_time,
                start.elapsed(),
            ),
        }
    }

    /// Raw TCP connect, nothing sent beyond the handshake. DNS failures,
    /// refusals and timeouts all collapse to `false`.
    async fn host_reachable(&self, host: &str, port: u16) -> bool {
        if host.is_empty() {
            return false;
        }
        matches!(
            time::timeout(self.tcp_timeout, TcpStream::connect((host, port))).await,
            Ok(Ok(_))
        )
    }
}
