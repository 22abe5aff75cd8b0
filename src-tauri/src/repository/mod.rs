//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod trip_repo;
#[cfg(test)]
mod memory_repo;


pub use traits::Repository;
pub use db::DbState;
pub use trip_repo::SqliteTripRepository;

#[cfg(test)]
pub use db::init_db;
#[cfg(test)]
pub use memory_repo::MemoryTripRepository;
