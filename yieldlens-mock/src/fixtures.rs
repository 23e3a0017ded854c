pub mod charts;
pub mod pools;
