pub mod ordering;
pub mod task_store;
