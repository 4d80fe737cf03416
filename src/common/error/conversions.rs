//! Error conversion implementations.

use super::types::Error;
use crate::common::binary::BinaryError;

impl From<BinaryError> for Error {
    fn from(err: BinaryError) -> Self {
        Error::Truncated(err.to_string())
    }
}
