pub mod meal;
pub mod summary;
pub mod timestamp;
pub mod user;
