//! Key-value media implementing `KeyValueMedium`.

pub mod file;
pub mod memory;

pub use file::FileMedium;
pub use memory::MemoryMedium;
