//! Caller-facing use-case services.
//!
//! # Responsibility
//! - Turn typed repository results into the never-failing roster surface.
//! - Keep UI callers decoupled from storage details.

pub mod student_service;
