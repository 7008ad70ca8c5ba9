//! Real-time relay integration tests

pub mod relay_test;
