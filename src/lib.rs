//! Synthetic spectrum-analyzer display: a generated sweep rendered as a
//! spectrum trace, a scrolling waterfall and two axis strips.
pub mod config;
pub mod drivers;
pub use config::ScopeConfig;
