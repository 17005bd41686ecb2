//! HTTP plumbing for the optional coach-notes service.

pub mod api;
