//! Browser-facing helpers kept out of the components.

pub mod export;
pub mod input;
pub mod storage;
pub mod time;
