pub mod record;
pub mod sheet;
