pub mod alert;
pub mod product;
