pub mod api;
pub mod config;
pub mod error;
pub mod store;

pub use api::{create_router, AppState};
pub use error::StoreError;
pub use store::ReservationStore;
