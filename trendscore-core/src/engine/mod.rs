//! Analysis engine: precompute, merge, score.

pub mod merge;
pub mod pipeline;
pub mod precompute;

pub use merge::{merge_by_date, MergedTable};
pub use pipeline::{analyze, Analysis, ScoreCard};
pub use precompute::{compute_warmup, precompute_indicators};
