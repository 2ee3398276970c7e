use clap::Parser;
use grade_page::Audit;
use grade_page::config::ServerConfig;
use grade_page::server;

mod args;
use args::Args;

/// CLI flags override the config file, but only when actually given
fn apply_cli_overrides(config: &mut ServerConfig, args: &Args) {
    if let Some(port) = args.port {
        config.port = port;
    }
    if !args.keywords.is_empty() {
        config.engine.keywords = args.keywords.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.engine.fetch_timeout_ms = timeout_ms;
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match ServerConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ServerConfig::default(),
    };

    apply_cli_overrides(&mut config, &args);

    if args.serve {
        ::log::info!("Starting audit server on port {}", config.port);
        if let Err(e) = server::serve(config).await {
            ::log::error!("Server failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let Some(url) = args.url else {
        eprintln!("A URL is required unless --serve is given");
        std::process::exit(2);
    };

    ::log::info!("Starting audit for URL: {}", url);

    let outcome = Audit::new(url).with_config(&config.engine).run().await;

    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            ::log::error!("Failed to serialize audit outcome: {}", e);
            std::process::exit(1);
        }
    }
}
