pub mod app_config;
pub mod database;
pub mod user_repo;
pub mod train_repo;
pub mod reservation_repo;

#[cfg(test)]
mod test_support;

pub use database::DbClient;
pub use user_repo::SqliteUserRepository;
pub use train_repo::SqliteTrainRepository;
pub use reservation_repo::SqliteReservationRepository;
