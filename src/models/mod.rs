//! Request and Response models for the image server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{DataParams, LineParams, LoadRequest, MinMaxParams, PixelParams, ViewRequest};
pub use responses::{
    ErrorResponse, HealthResponse, LineResponse, LoadResponse, MinMaxResponse, PixelResponse,
    StatsResponse, ViewResponse,
};
