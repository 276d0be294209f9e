pub mod definitions;
pub mod detection;

pub use detection::{detect_language, is_supported};
