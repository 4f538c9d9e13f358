pub mod errors;
pub mod normalize;
pub mod ports;
