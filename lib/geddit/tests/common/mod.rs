#![allow(missing_docs, clippy::expect_used)]
use rstest::fixture;
use tracing::Level;

mod stub_server;
pub use self::stub_server::*;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Stub server answering `/api/v1/me` with the `aggrolite` account.
#[fixture]
pub async fn reddit() -> StubServer {
    init_tracing();
    StubServer::start(200, AGGROLITE)
        .await
        .expect("stub server should start")
}
