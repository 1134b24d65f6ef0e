//! Shared harness: a minimal search node answering `GET /`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Root document of a 7.10.2 node.
#[allow(dead_code)]
pub const ROOT_7_10_2: &str = r#"{"name":"node-1","cluster_name":"graylog","version":{"number":"7.10.2","lucene_version":"8.7.0"},"tagline":"You Know, for Search"}"#;

/// Root document of an 8.x snapshot node.
#[allow(dead_code)]
pub const ROOT_8_SNAPSHOT: &str = r#"{"name":"node-2","version":{"number":"8.1.0-SNAPSHOT"}}"#;

/// A local HTTP server replying to every request with a fixed response.
#[allow(dead_code)]
pub struct SearchNode {
    /// Base URL, e.g. `http://127.0.0.1:49152/`.
    pub url: String,
    hits: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

#[allow(dead_code)]
impl SearchNode {
    /// Serve `body` with status 200.
    pub async fn start(body: &'static str) -> Self {
        Self::start_with_status("200 OK", body).await
    }

    /// Serve `body` with the given status line suffix (e.g. `"503 Service Unavailable"`).
    pub async fn start_with_status(status: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let task = tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    let mut buf = vec![0_u8; 4096];
                    let mut read = 0;
                    while let Ok(n) = socket.read(&mut buf[read..]).await {
                        if n == 0 {
                            break;
                        }
                        read = read.saturating_add(n);
                        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == buf.len() {
                            break;
                        }
                    }
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            url: url_for(addr),
            hits,
            task,
        }
    }

    /// Number of connections accepted so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for SearchNode {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn url_for(addr: SocketAddr) -> String {
    format!("http://{addr}/")
}

/// URL of a loopback port nothing listens on.
#[allow(dead_code)]
pub async fn dead_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    url_for(addr)
}

/// HTTP client that ignores proxy settings from the environment.
#[allow(dead_code)]
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}
