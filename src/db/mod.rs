pub mod employees;
pub mod events;
pub mod history;
pub mod initialize;
pub mod jobs;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod runs;
pub mod stats;
