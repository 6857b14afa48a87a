pub mod domain;
pub mod error;
pub mod liveness;
pub mod pairing;
pub mod protocol;

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod domain_tests;
