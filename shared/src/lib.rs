pub mod config;
pub mod contact;
pub mod email;
pub mod error;
pub mod response;
pub mod state;

pub use config::ContactConfig;
pub use state::AppState;
