//! HTTPS listener behaviour.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use sleepy_probe::http::ServerError;
use sleepy_probe::ServerConfig;

mod common;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn https_client() -> reqwest::Client {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn https_serves_same_routes() {
    let https_port = common::free_port();
    let server = common::start_server(ServerConfig {
        listen_https: format!("127.0.0.1:{}", https_port),
        certificate: Some(fixture("localhost.crt")),
        key: Some(fixture("localhost.key")),
        min: Duration::ZERO,
        max: Duration::from_millis(1),
        ..Default::default()
    })
    .await;
    let https_addr: SocketAddr = format!("127.0.0.1:{}", https_port).parse().unwrap();
    common::wait_for_port(https_addr).await;

    let client = https_client();
    let res = client
        .get(format!("https://127.0.0.1:{}/health", https_port))
        .send()
        .await
        .expect("HTTPS listener unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "OK\n");

    let res = client
        .get(format!("https://127.0.0.1:{}/randomsleep", https_port))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "*snore*\n");

    // Plain listener keeps working next to it.
    let res = common::client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn no_https_without_tls_material() {
    let https_port = common::free_port();
    let server = common::start_server(ServerConfig {
        listen_https: format!("127.0.0.1:{}", https_port),
        min: Duration::ZERO,
        max: Duration::from_millis(1),
        ..Default::default()
    })
    .await;
    common::wait_for_port(server.addr).await;

    let result = https_client()
        .get(format!("https://127.0.0.1:{}/health", https_port))
        .send()
        .await;
    assert!(result.is_err(), "HTTPS should not be served");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn https_bind_failure_stops_the_server() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let taken_addr = taken.local_addr().unwrap();

    let server = common::start_server(ServerConfig {
        listen_https: taken_addr.to_string(),
        certificate: Some(fixture("localhost.crt")),
        key: Some(fixture("localhost.key")),
        ..Default::default()
    })
    .await;

    let result = tokio::time::timeout(Duration::from_secs(5), server.task)
        .await
        .expect("server kept running after HTTPS bind failure")
        .unwrap();
    match result {
        Err(ServerError::Serve { scheme, addr, .. }) => {
            assert_eq!(scheme, "https");
            assert_eq!(addr, taken_addr);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn unreadable_certificate_fails_startup() {
    let server = common::start_server(ServerConfig {
        listen_https: format!("127.0.0.1:{}", common::free_port()),
        certificate: Some(fixture("missing.crt")),
        key: Some(fixture("localhost.key")),
        ..Default::default()
    })
    .await;

    let result = tokio::time::timeout(Duration::from_secs(5), server.task)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(result, Err(ServerError::Tls(_))));
}
