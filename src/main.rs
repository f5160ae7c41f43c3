use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SSI_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = superstore_insights::Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;

    if let Err(err) = superstore_insights::run(cli) {
        if json_mode {
            let payload = serde_json::json!({
                "error": {
                    "message": format!("{err:#}"),
                }
            });
            eprintln!("{payload}");
        } else {
            eprintln!("error: {err:#}");
        }
        std::process::exit(1);
    }
}
