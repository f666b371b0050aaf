//! Column schemas and header validation.

use std::fmt::Debug;

use crate::error::{ConvertError, Result};
use crate::row::Header;

/// A fixed set of named columns for one file format.
///
/// `ALL` doubles as the allowlist for incoming headers and as the column
/// order of outgoing headers.
pub trait Column: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// Check that every observed column belongs to `C`.
///
/// Only membership matters: the observed order is free, and columns of `C`
/// that are absent from the header are not an error here.
pub fn validate<C: Column>(header: &Header) -> Result<()> {
    for name in header.names() {
        if C::from_name(name).is_none() {
            tracing::debug!(column = %name, "header column outside the known schema");
            return Err(ConvertError::SchemaDrift {
                column: name.clone(),
            });
        }
    }
    Ok(())
}
