//! Headless monitor: periodic snapshot refresh with risk-summary logging.

use std::sync::Arc;

use launchtrack_app::DashboardSession;
use launchtrack_infra::{
    ApiClient, AppConfig, HttpAnalyticsClient, HttpBackendClient, HttpDispatchClient,
};

fn api_client(base_url: &str, token: &Option<String>) -> ApiClient {
    let client = ApiClient::new(base_url);
    match token {
        Some(token) => client.with_token(token),
        None => client,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    launchtrack_observability::init();

    let config = AppConfig::from_env()?;

    let backend = Arc::new(HttpBackendClient::new(api_client(
        &config.backend_url,
        &config.api_token,
    )));
    let analytics = Arc::new(HttpAnalyticsClient::new(api_client(
        &config.analytics_url,
        &config.api_token,
    )));
    let dispatch = HttpDispatchClient::new(api_client(&config.dispatch_url, &config.api_token));

    let session = DashboardSession::new(
        backend.clone(),
        analytics.clone(),
        backend,
        analytics,
        dispatch,
    );

    tracing::info!(
        backend = %config.backend_url,
        interval_secs = config.refresh_interval.as_secs(),
        "launchtrack monitor started"
    );

    let mut refresh_interval = tokio::time::interval(config.refresh_interval);
    refresh_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received");
                break;
            }
            _ = refresh_interval.tick() => {
                match session.refresh().await {
                    Ok(report) => {
                        let summary = session.snapshot().risk_summary();
                        tracing::info!(
                            stores = report.store_count,
                            insight_failures = report.insight_failures,
                            prediction_failures = report.prediction_failures,
                            high_risk = summary.high,
                            medium_risk = summary.medium,
                            low_risk = summary.low,
                            unknown = summary.unknown,
                            "snapshot refreshed"
                        );
                    }
                    Err(e) => {
                        // Stale-but-valid: the previous snapshot stays up.
                        tracing::warn!(error = %e, "refresh failed, keeping previous snapshot");
                    }
                }
            }
        }
    }

    tracing::info!("launchtrack monitor stopped");
    Ok(())
}
