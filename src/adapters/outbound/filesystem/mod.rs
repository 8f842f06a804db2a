/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod local_sbom_source;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use local_sbom_source::LocalSbomSource;
