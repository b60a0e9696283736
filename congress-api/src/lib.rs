mod client;
mod congress_url;
mod throttle;
pub mod domain;

pub use client::*;
pub use congress_url::{CongressURL, DEFAULT_BASE_URL};
pub use throttle::Throttler;
