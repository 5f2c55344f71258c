//! Concurrency check: sleeping requests must not serialise.

use std::time::{Duration, Instant};

use sleepy_probe::ServerConfig;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_sleeps_overlap() {
    let server = common::start_server(ServerConfig {
        min: Duration::from_millis(300),
        max: Duration::from_millis(300),
        ..Default::default()
    })
    .await;

    let concurrency = 20;
    let client = common::client();
    let start = Instant::now();

    let mut handles = Vec::with_capacity(concurrency);
    for _ in 0..concurrency {
        let client = client.clone();
        let url = server.url("/randomsleep");
        handles.push(tokio::spawn(async move {
            let res = client.get(url).send().await.unwrap();
            assert_eq!(res.status(), 200);
            res.text().await.unwrap()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), "*snore*\n");
    }

    let elapsed = start.elapsed();
    println!("{} sleeps of 300ms took {:?}", concurrency, elapsed);
    // Serial handling would need 6s.
    assert!(elapsed < Duration::from_secs(3), "took {:?}", elapsed);
    assert!(elapsed >= Duration::from_millis(300));

    server.stop().await.unwrap();
}
