pub mod time;

pub use time::*;

#[cfg(test)]
mod time_tests;
