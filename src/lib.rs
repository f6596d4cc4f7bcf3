pub mod cli;
pub mod combat;
pub mod data;
pub mod error;
pub mod optimizer;
pub mod parallel;
