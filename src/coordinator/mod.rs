mod builder;
mod event;
mod in_flight;
mod update_coordinator;
pub use builder::*;
pub(crate) use event::*;
pub(crate) use in_flight::*;
pub(crate) use update_coordinator::*;

#[cfg(test)]
mod in_flight_test;
