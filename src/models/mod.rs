pub mod language;
pub mod options;
pub mod segment;
