// Unnexted reference server
// Wires the route table, the page registry and the renderer into an axum app

pub mod app;
pub mod assets;
pub mod pages;

pub use app::{build_state, router, serve, AppState};
