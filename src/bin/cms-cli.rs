use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "cms-cli")]
#[command(about = "Management CLI for the CMS page server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "admin-secret-key")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show runtime status
    Status,
    /// List configured sites
    Sites,
    /// List live pages, or published snapshots
    Pages {
        #[arg(long)]
        site: Option<u64>,
        #[arg(long)]
        snapshots: bool,
    },
    /// Publish a site's live pages as snapshots
    Publish { site: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let request = match cli.command {
        Commands::Status => client.get(format!("{}/admin/status", cli.url)),
        Commands::Sites => client.get(format!("{}/admin/sites", cli.url)),
        Commands::Pages { site, snapshots } => {
            let mut query = vec![("snapshots", snapshots.to_string())];
            if let Some(site) = site {
                query.push(("site", site.to_string()));
            }
            client.get(format!("{}/admin/pages", cli.url)).query(&query)
        }
        Commands::Publish { site } => {
            client.post(format!("{}/admin/sites/{}/snapshots", cli.url, site))
        }
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
