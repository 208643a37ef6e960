pub mod analytics;
pub mod productivity;
pub mod settings;
pub mod snapshot;
pub mod task;
pub mod workload;
