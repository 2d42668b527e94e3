//! Verification engine for functionality test batteries.
//!
//! A case supplies an input payload, an expected output pattern (JSON text
//! that may embed wildcard tokens), and optional ordered lists of persistence
//! preamble actions and epilogue verifications. The engine runs the preamble
//! (fail-fast), invokes the functionality under test, structurally compares
//! the result against the pattern, runs the epilogue (collect-all), and
//! resolves a single outcome carrying every diagnostic found along the way.

pub mod config;
pub mod engine;
pub mod errors;
pub mod matcher;
pub mod model;
pub mod providers;
pub mod report;
pub mod supervisor;
pub mod wildcard;

pub use config::SuiteConfig;
pub use engine::runner::CaseRunner;
pub use matcher::{verify_root, Mismatch};
pub use model::{CaseIdentity, CaseOutcome, CaseSpec};
pub use supervisor::{BatterySupervisor, Harness};
pub use wildcard::Wildcard;
