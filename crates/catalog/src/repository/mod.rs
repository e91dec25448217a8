pub mod alert;
pub mod unit_of_work;
