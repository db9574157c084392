pub mod fault;
pub mod time;
