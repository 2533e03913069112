//! Directory adapters - resource snapshot sources and coverage files.

mod in_memory;
mod json_file;

pub use in_memory::InMemoryResourceSource;
pub use json_file::{load_city_zips, load_zip_index, JsonFileResourceSource};
