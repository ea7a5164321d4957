use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = healthcheck::cli::Cli::parse();
    if let Err(e) = healthcheck::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
