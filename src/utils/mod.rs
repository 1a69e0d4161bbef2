// Utils compartidos

pub mod constants;
pub mod query;

pub use constants::*;
pub use query::*;
