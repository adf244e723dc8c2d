pub mod analyzer;
pub mod signals;

pub use analyzer::{evaluate, validate, Analyzer, MIN_HISTORY};
pub use signals::IndicatorSet;
