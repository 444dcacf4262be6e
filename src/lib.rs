mod cache;
mod config;
mod constants;
mod coordinator;
mod gate;
mod metrics;
mod model;
mod observer;
mod sources;

mod errors;

pub use cache::*;
pub use config::*;
pub use constants::*;
pub use coordinator::*;
pub use errors::*;
pub use metrics::*;
pub use model::*;
pub use observer::*;
pub use sources::*;

pub(crate) use gate::*;
