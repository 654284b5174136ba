pub mod extractor;
pub mod file_magic;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod sql;
pub mod timestamp;
pub mod validate;

pub use extractor::{SafeFileRef, SafeIDI64, SafeUserIdI64};
pub use file_magic::{content_type_for, validate_magic_bytes};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::{contains_pattern, escape_like_pattern};
