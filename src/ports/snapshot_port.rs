//! Keyed store for opaque state blobs.

use crate::domain::error::FincalcError;

pub trait SnapshotPort {
    fn load(&self, key: &str) -> Result<Option<String>, FincalcError>;
    fn save(&self, key: &str, blob: &str) -> Result<(), FincalcError>;
}
