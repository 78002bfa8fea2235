use async_trait::async_trait;
use rand::Rng;

use crate::domain::{DomainError, EmbeddingProvider};

/// Vector length of `text-embedding-ada-002`
pub const ADA_002_DIMENSIONS: usize = 1536;

/// Embedding provider returning uniform random vectors in `[0, 1)`.
///
/// Output is unrelated to the input text and differs between calls.
#[derive(Debug, Clone)]
pub struct RandomEmbeddingProvider {
    model: String,
    dimensions: usize,
}

impl RandomEmbeddingProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_dimensions(model, ADA_002_DIMENSIONS)
    }

    pub fn with_dimensions(model: impl Into<String>, dimensions: usize) -> Self {
        Self {
            model: model.into(),
            dimensions,
        }
    }
}

fn random_vector(dimensions: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..dimensions).map(|_| rng.gen_range(0.0f32..1.0)).collect()
}

#[async_trait]
impl EmbeddingProvider for RandomEmbeddingProvider {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, DomainError> {
        Ok(random_vector(self.dimensions))
    }

    fn provider_name(&self) -> &'static str {
        "random"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
