// Library root: draft bookkeeping and the valuation engine, shared by the
// application crate and integration tests.

pub mod config;
pub mod draft;
pub mod valuation;
