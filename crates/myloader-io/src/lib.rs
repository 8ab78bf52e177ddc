//! Dump directory walking and statement streaming: the filesystem-facing
//! half of myloader. No SQL execution happens here.

pub mod dump_file;
pub mod error;
pub mod script_reader;
pub mod walker;

pub use dump_file::{classify, is_compressed, DumpFile};
pub use error::WalkError;
pub use script_reader::ScriptReader;
pub use walker::{ensure_backup_directory, walk, DatabaseSchemaFile, SchemaFile, WalkResult};
