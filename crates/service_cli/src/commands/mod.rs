//! Pipeline command implementations
//!
//! Each submodule drives one simulation pipeline end to end.

pub mod gbm;
pub mod pi;
