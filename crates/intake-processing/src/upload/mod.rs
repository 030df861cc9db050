//! Upload pipeline: sniff → validate → name → store.

mod processor;

pub use processor::UploadProcessor;
