pub mod baseline;
pub mod counters;
pub mod ranking;
pub mod score;
pub mod season;
