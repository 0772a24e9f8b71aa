//! Submission analysis pipeline: run candidate code in a remote sandbox and
//! ask a generative model whether it looks plagiarized.
//!
//! Both entry points, [`Executor::execute`] and
//! [`PlagiarismAnalyzer::analyze`], are total: every failure comes back as a
//! populated result value.

pub mod analyzer;
pub mod executor;
pub mod model;
pub mod prompt;
pub mod sandbox;
pub mod verdict;


pub use analyzer::PlagiarismAnalyzer;
pub use executor::Executor;
