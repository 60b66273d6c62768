pub mod encoding;
pub mod errors;
pub mod mkdir;
pub mod options;
pub mod output;
pub mod path;
pub mod write;

pub use encoding::Encoding;
pub use errors::{Code, Error, OutputFileErr};
pub use options::{Mode, Options, OutputOptions};
pub use output::{output_file, output_file_with};
pub use path::TargetPath;
pub use write::Contents;
