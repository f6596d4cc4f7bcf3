pub mod candidates;
pub mod speed_variants;
pub mod tuning;

pub use candidates::{CandidateLists, TunedChampion};
pub use speed_variants::{speed_deltas, speed_variants, SpeedVariant};
pub use tuning::{Search, SearchConfig, TuningCandidate, TuningSearch};
