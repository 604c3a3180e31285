pub mod input_loader;

pub use input_loader::{collect_input_files, is_supported_input, load_json_record};
