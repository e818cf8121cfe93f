pub mod database;
pub mod preference_repository;

pub use database::Database;
pub use preference_repository::PreferenceRepository;
