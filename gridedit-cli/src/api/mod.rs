//! Remote dataset access: the HTTP client, the raw-record mapper, and the
//! normalized row model.

pub mod client;
pub mod mapper;
pub mod models;

pub use client::{ApiClient, DEFAULT_DATASET_URL};
pub use mapper::map_record;
pub use models::{Field, REGIONS, Record, Status};
