pub mod junit_model;
pub mod reader;
