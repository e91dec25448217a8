pub mod alert;
pub mod inventory;
pub mod product;
