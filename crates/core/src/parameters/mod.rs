//! Parameter management types
//!
//! Name/value storage for calibration results and calibration tunables.
//! Parameter definitions that touch the firmware (defaults, loading) live in
//! the firmware crate.

pub mod error;
pub mod storage;

pub use error::ParameterError;
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};
