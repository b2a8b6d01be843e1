//! CI-oriented test-run configuration shared across suites.

pub mod property_test_profile;
