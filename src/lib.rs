//! PDF chat service.
//!
//! Upload a PDF into a session, then ask questions about it. Each question is answered by a
//! text-generation model prompted with a cached summary of the document and the session's
//! conversation history.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
