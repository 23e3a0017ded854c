pub mod chart;
pub mod pools;

pub mod util;
