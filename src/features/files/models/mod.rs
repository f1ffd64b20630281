mod file;

pub use file::{StorageBucket, UploadFile};
