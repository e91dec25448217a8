mod repository;
mod service;

pub use self::repository::{AlertQueryRepositoryTrait, DynAlertQueryRepository};
pub use self::service::{AlertQueryServiceTrait, DynAlertQueryService};
