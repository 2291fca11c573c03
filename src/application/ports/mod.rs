mod object_store;

pub use object_store::{ObjectReader, ObjectStore, StorageError, StorageOutcome};

#[cfg(test)]
pub use object_store::MockObjectStore;
