mod classify;
mod dataset;
mod load;
mod network;
mod record;

pub use dataset::{ALL_CATEGORIES, CategoryFilter, Dataset};
pub use load::{DEFAULT_DATA_PATH, DataSource, describe_load_error, load_dataset};
pub use network::{TheoryNetwork, TheoryNode};
#[cfg(test)]
pub use record::TheoryRow;
