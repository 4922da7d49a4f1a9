pub mod decode;
pub mod resolver;
