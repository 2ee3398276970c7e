use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "grade-page")]
#[command(about = "Scores page markup and timing samples into graded quality reports")]
#[command(version)]
pub struct Args {
    /// URL to audit (required unless --serve is given)
    pub url: Option<String>,

    /// Run the HTTP audit server instead of a one-shot audit
    #[arg(long)]
    pub serve: bool,

    /// Port for the HTTP server
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Target keywords for content analysis, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Base fetch timeout in milliseconds (defaults to the config value)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,
}
