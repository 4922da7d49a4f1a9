pub mod names;
pub mod pipeline;
