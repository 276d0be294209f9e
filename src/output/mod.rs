pub mod generator;
pub mod writer;

pub use generator::{CommentRecord, Output, OutputGenerator, OutputStatistics};
pub use writer::{OutputWriter, RunSummary};
