//! HTTP access to the artifact repository.

pub mod client;

pub use client::{ArtifactClient, Auth, HttpResponse, DEFAULT_HTTP_TIMEOUT};
