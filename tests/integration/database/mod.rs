//! Schema and migration tests
