#![allow(clippy::result_large_err)]

pub mod driver;

pub use driver::{RedisDriver, RedisStore};
