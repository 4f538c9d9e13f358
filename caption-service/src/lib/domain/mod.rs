pub mod caption;
pub mod user;
