//! Image Relay - a lightweight remote image access server
//!
//! Decodes images server-side into a small bounded cache keyed by path and
//! answers pixel-level queries (extrema, sub-views, single pixels, line
//! profiles) over HTTP without shipping whole pixel buffers.

pub mod accessor;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod image;
pub mod models;

pub use accessor::ImageAccessor;
pub use api::AppState;
pub use config::Config;
