//! Local HTTP server standing in for the remote user API.

#![allow(dead_code)]

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct MockServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Serve `GET /users` with a fixed status and JSON body.
    ///
    /// `GET /slow` answers the same way after `delay`.
    pub async fn start(status: u16, body: &str, delay: Duration) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status");
        let body = body.to_string();
        let slow_body = body.clone();

        let app = Router::new()
            .route(
                "/users",
                get(move || {
                    let body = body.clone();
                    async move { (status, [("content-type", "application/json")], body) }
                }),
            )
            .route(
                "/slow",
                get(move || {
                    let body = slow_body.clone();
                    async move {
                        tokio::time::sleep(delay).await;
                        (status, [("content-type", "application/json")], body)
                    }
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, handle }
    }

    pub async fn ok(body: &str) -> Self {
        Self::start(200, body, Duration::ZERO).await
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr
}
