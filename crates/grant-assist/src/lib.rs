//! Grant research assistant for Pennsylvania DCNR Community Conservation Partnerships
//! Program applicants: keyword search over uploaded documents and scraped program text,
//! rule-based eligibility and application scoring, and a regional advisor directory.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
