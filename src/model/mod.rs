mod account;
mod pattern;
mod view;
pub use account::*;
pub use pattern::*;
pub use view::*;

#[cfg(test)]
mod pattern_test;
