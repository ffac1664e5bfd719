pub mod bank;
pub mod night;
pub mod sessions;
pub mod summary;
