//! Start command - initializes the application and reports the configured model

use serde_json::json;
use tracing::info;

use crate::application::Application;

/// Run the default startup path
pub async fn run(app: &mut Application) -> anyhow::Result<()> {
    app.initialize().await?;

    let model = app.model_manager().model_info();
    app.logger().info_with("Application started", json!(model));
    info!(model = %model.model_name, "Startup complete");

    Ok(())
}
