// Valuation engine: player pool, VOR baselines, roster-need weighting,
// positional scarcity, suggestion queue.

pub mod need;
pub mod projections;
pub mod scarcity;
pub mod suggest;
pub mod vor;
