pub mod errors;
pub mod routes;

pub use routes::{app, AppState};
