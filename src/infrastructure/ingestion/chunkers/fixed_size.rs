//! Fixed-size text splitter

use crate::domain::{ChunkingConfig, DomainError, TextSplitter};

/// Splits text into consecutive runs of `chunk_size` characters.
///
/// Sizes are counted in `char`s, so multi-byte text is never cut inside a
/// code point. `chunk_overlap` is carried in the configuration but not
/// applied: chunks never share characters.
#[derive(Debug, Clone, Default)]
pub struct FixedSizeSplitter {
    config: ChunkingConfig,
}

impl FixedSizeSplitter {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }
}

impl TextSplitter for FixedSizeSplitter {
    fn split(&self, content: &str) -> Result<Vec<String>, DomainError> {
        self.config.validate()?;

        let chars: Vec<char> = content.chars().collect();

        Ok(chars
            .chunks(self.config.chunk_size)
            .map(|chunk| chunk.iter().collect())
            .collect())
    }

    fn config(&self) -> ChunkingConfig {
        self.config
    }

    fn name(&self) -> &'static str {
        "fixed_size"
    }
}
