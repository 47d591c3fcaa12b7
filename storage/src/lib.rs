// storage holds the fixed-width config blob and the JSON documents for
// generators, sampled grids and named catalogues
pub mod blob;
pub mod catalog;
pub mod error;
pub mod models;

pub use blob::{CONFIG_BLOB_LEN, decode_config, encode_config};
pub use catalog::Catalog;
pub use error::StorageError;
pub use models::{GeneratorDoc, GridDoc};
