//! Trait abstractions for external collaborators.
//!
//! The board client talks to one external system (the REST API); the
//! [`HttpClient`] trait is the seam that lets tests substitute a mock
//! for the production reqwest adapter.

mod http;

pub use http::{Headers, HttpClient, Method, Response, TransportError};
