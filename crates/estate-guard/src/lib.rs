//! Account and listing policies for the real-estate collaboration backend.
//!
//! The crate exposes two leaf policies, password history enforcement and
//! collaboration-gated address disclosure, together with the thin services and routers that
//! wire them into account and listing workflows.

pub mod config;
pub mod error;
pub mod identity;
pub mod policies;
pub mod rich_text;
pub mod telemetry;
