//! Examples command - walks through every orchestration operation once

use std::collections::HashMap;

use serde_json::json;

use crate::application::Application;

const SAMPLE_DOCUMENTS: [&str; 3] = [
    "Rust guarantees memory safety without a garbage collector.",
    "Tokio is an asynchronous runtime for Rust.",
    "Embeddings map text to vectors of numbers.",
];

const SAMPLE_TEXT: &str = "Language models read text in chunks. Splitting a long document \
into pieces of a fixed size keeps each piece within the model's context window.";

/// Run the demonstration sequence against an initialized application
pub async fn run(app: &mut Application) -> anyhow::Result<()> {
    app.initialize().await?;
    let core = app.core()?;
    let logger = app.logger();

    logger.info("Running examples");

    let reply = core
        .simple_chat("Hello, how are you?", Some("You are a helpful assistant."))
        .await?;
    logger.info_with("Example: simple chat", json!({ "response": reply }));

    let chain = core
        .create_prompt_chain("Tell me a short fact about {topic}.")
        .await?;
    let values = HashMap::from([("topic".to_string(), "Rust".to_string())]);
    let reply = chain.invoke(&values).await?;
    logger.info_with("Example: prompt chain", json!({ "response": reply }));

    let documents: Vec<String> = SAMPLE_DOCUMENTS.iter().map(|d| d.to_string()).collect();

    let store = core.create_vector_store(documents.clone()).await?;
    let results = core.similarity_search(&store, "What is Rust?", 2).await?;
    logger.info_with("Example: similarity search", json!({ "results": results }));

    let rag = core.create_rag_chain(documents).await?;
    let answer = rag.invoke("What is Tokio?").await?;
    logger.info_with(
        "Example: RAG chain",
        json!({ "query": answer.query, "result": answer.result }),
    );

    let vector = core.get_embeddings("Hello world").await?;
    logger.info_with(
        "Example: embeddings",
        json!({ "dimensions": vector.len(), "head": &vector[..vector.len().min(3)] }),
    );

    let chunks = core.split_text(SAMPLE_TEXT).await?;
    logger.info_with("Example: text splitting", json!({ "chunks": chunks }));

    logger.info("Examples completed");
    Ok(())
}
