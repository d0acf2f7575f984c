use journal_lib::{logging, run, EnvPaths};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_paths = EnvPaths::from_env();
    let _guard = logging::init_logging(&env_paths)?;

    if let Err(e) = run(env_paths).await {
        tracing::error!("Journal failed to start: {:#}", e);
        return Err(e);
    }
    Ok(())
}
