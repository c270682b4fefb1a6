pub mod meals;
pub mod metrics;
pub mod summary;
pub mod users;
