#![deny(unused)]

//! Benchmarking: the built-in prompt set, quality judges, and the
//! orchestrator that sweeps prompts across models.

pub mod judge;
pub mod orchestrator;
pub mod prompts;

pub use judge::{GeneratorJudge, ScriptedJudge};
pub use orchestrator::{BenchmarkOrchestrator, RunReport};
pub use prompts::{BenchmarkPrompt, BUILTIN_PROMPTS};
