//! Infrastructure Layer - survey log implementations

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlSurveyLog;
pub use memory::InMemorySurveyLog;
