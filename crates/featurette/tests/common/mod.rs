//! Fixture loading shared by the integration tests.

use std::path::PathBuf;

use featurette::Feature;

/// Absolute path of a file under `tests/features`.
pub fn feature_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("features")
        .join(name)
}

/// Load and parse a fixture, panicking with the error on failure.
pub fn load(name: &str) -> Feature {
    featurette::load_feature(feature_path(name))
        .unwrap_or_else(|err| panic!("fixture {name} should parse: {err}"))
}
