mod arbitrary;
mod chunk_helpers;
mod property_partition;
mod utils;
