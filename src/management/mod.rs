mod auth;
mod selection;

pub use auth::TokenManager;
pub use selection::SelectionManager;
