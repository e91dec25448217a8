pub mod alert;
pub mod command;
