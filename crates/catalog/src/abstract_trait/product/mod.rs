mod repository;
mod service;

pub use self::repository::{
    DynUnitOfWorkFactory, UnitOfWork, UnitOfWorkFactoryTrait, UnitOfWorkTrait,
};
pub use self::service::{DynProductCommandService, ProductCommandServiceTrait};
