//! Text splitter implementations

mod fixed_size;

pub use fixed_size::FixedSizeSplitter;
