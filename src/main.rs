mod annotations;
mod capture;
mod config;
mod core;
mod domain;
mod export;
mod render;
mod session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    core::app::run().await
}
