use clap::Parser;
use llm_shell::cli::{self, Cli, Command};
use llm_shell::infrastructure::logging::init_logging;
use llm_shell::{Application, ConfigStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let store = ConfigStore::from_env()?;
    let config = store.snapshot();
    init_logging(config.app.log_format);

    let mut app = Application::new(store);

    let result = match cli.resolve(&config.app) {
        Command::Start => cli::start::run(&mut app).await,
        Command::Examples => cli::demo::run(&mut app).await,
    };

    app.shutdown().await;
    result
}
