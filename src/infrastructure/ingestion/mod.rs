//! Text ingestion - splitting documents into chunks

pub mod chunkers;

pub use chunkers::FixedSizeSplitter;
