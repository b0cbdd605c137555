/// Storage layer: the `BirdStore` trait with SQLite and in-memory backends.
pub mod db;
/// Tracing subscriber setup.
pub mod logging;
/// Data types: Bird, NewBird.
pub mod models;
/// Axum-based web server and router.
pub mod web;
