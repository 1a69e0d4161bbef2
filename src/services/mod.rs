pub mod api_client;
pub mod navigator;

pub use api_client::*;
pub use navigator::*;
