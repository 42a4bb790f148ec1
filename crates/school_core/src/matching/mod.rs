pub mod algorithm;
pub mod nearest;
pub mod types;

pub use algorithm::AlternativeSelector;
pub use nearest::NearestAlternatives;
pub use types::{
    AlternativeAssignment, MatchLimits, DEFAULT_MAX_ALTERNATIVES, DEFAULT_MAX_DISTANCE_KM,
};
