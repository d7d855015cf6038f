pub mod builder;
pub mod context;
pub mod document;
pub mod outcome;
pub mod status_counter;
