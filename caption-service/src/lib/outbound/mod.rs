pub mod captioner;
pub mod repositories;
