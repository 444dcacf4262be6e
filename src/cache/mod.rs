mod facade;
mod state;
pub use facade::*;
pub(crate) use state::*;
