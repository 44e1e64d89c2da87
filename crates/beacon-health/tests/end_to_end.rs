//! Monitor + HttpProber against a local HTTP server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::sync::watch;

use beacon_core::{ConfigFormat, Endpoint, MonitorConfig};
use beacon_health::{HttpProber, Monitor, MonitorSettings, ProbeConfig};

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn prober() -> HttpProber {
    HttpProber::new(
        ProbeConfig::default()
            .with_timeout(Duration::from_secs(2))
            .with_retry_delay(Duration::from_millis(20)),
    )
    .unwrap()
}

fn endpoints_from_yaml(addr: SocketAddr) -> Vec<Endpoint> {
    let yaml = format!(
        "- name: health\n  url: http://{addr}/health\n\
         - name: broken\n  url: http://{addr}/broken\n  method: get\n"
    );
    MonitorConfig::parse(&yaml, ConfigFormat::Yaml).unwrap().endpoints
}

#[tokio::test]
async fn shared_domain_reports_fifty_percent() {
    let addr = spawn_server().await;
    let mut monitor = Monitor::new(endpoints_from_yaml(addr), prober(), MonitorSettings::default());
    let (_tx, rx) = watch::channel(false);
    let mut out = Vec::new();

    monitor.run_cycle(&mut out, &rx).await.unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{addr} has 50% availability percentage\n")
    );
}

#[tokio::test]
async fn unreachable_domain_reported_as_zero() {
    let addr = spawn_server().await;
    let mut endpoints = endpoints_from_yaml(addr);
    endpoints.push(Endpoint {
        name: "closed".to_string(),
        url: "http://127.0.0.1:1/".to_string(),
        method: http::Method::GET,
        headers: HashMap::new(),
        body: None,
    });

    let mut monitor = Monitor::new(endpoints, prober(), MonitorSettings::default());
    let (_tx, rx) = watch::channel(false);

    let report = monitor.run_cycle(&mut std::io::sink(), &rx).await.unwrap().unwrap();
    let by_domain: HashMap<_, _> = report
        .domains
        .iter()
        .map(|d| (d.domain.clone(), d.percentage))
        .collect();

    assert_eq!(by_domain["127.0.0.1:1"], 0);
    assert_eq!(by_domain[&addr.to_string()], 50);
}
