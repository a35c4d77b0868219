use std::convert::TryFrom;
use usergraph::engine::config::Configuration;
use usergraph::engine::store::Store;
use usergraph::{Client, Engine};

#[allow(dead_code)]
pub(crate) fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub(crate) fn sample_engine() -> Engine {
    init();
    Engine::new(Store::try_from(Configuration::sample()).expect("Expected sample store"))
        .build()
        .expect("Expected engine")
}

// Rust's dead code detection seems not to process all integration test crates,
// leading to a false positive on this function.
#[allow(dead_code)]
pub(crate) fn fixture_engine() -> Engine {
    init();
    let config = Configuration::from_file("./tests/fixtures/users.yml")
        .expect("Expected fixture configuration");
    Engine::new(Store::try_from(config).expect("Expected fixture store"))
        .build()
        .expect("Expected engine")
}

#[allow(dead_code)]
pub(crate) fn sample_client() -> Client {
    Client::new_with_engine(sample_engine())
}

#[allow(dead_code)]
pub(crate) fn fixture_client() -> Client {
    Client::new_with_engine(fixture_engine())
}
