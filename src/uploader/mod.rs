pub mod service;

pub use service::{ConfigMapUploader, UploadOutcome};
