pub mod client;
pub mod signature;

pub use client::{ApiHandle, TwitterClient};
