pub mod compositor;
pub mod feather;
pub mod glow;
pub mod pipeline;
pub mod raster;
pub mod text;
