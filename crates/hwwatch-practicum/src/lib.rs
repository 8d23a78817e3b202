//! # hwwatch Practicum
//! HTTP client for the homework status endpoint.

pub mod client;

pub use client::PracticumClient;
