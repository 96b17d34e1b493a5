pub mod data;
pub mod tasks;
