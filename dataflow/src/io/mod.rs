//! Record file IO.
//!
//! Partition and result files share one layout: one `key,value` record per
//! line, both integers, no header row.

mod partition;
mod records;

pub use partition::PartitionSource;
pub use records::{digest, encode, read_table, write_table, HeaderMode};
