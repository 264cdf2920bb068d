//! Gridghost Backend Binary
//!
//! Serves room hosting over HTTP and WebSocket.
//! Runs on BIND_ADDR (e.g. 0.0.0.0:8888).

#[tokio::main]
async fn main() {
    gg_core::log();
    gg_core::kys();
    gg_server::run().await.unwrap();
}
