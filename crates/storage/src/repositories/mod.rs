pub mod errors_repo;
pub mod trades_repo;

pub use errors_repo::ErrorsRepository;
pub use trades_repo::TradesRepository;
