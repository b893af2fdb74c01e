use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use weathertunes::{Config, PlaylistAggregator};

#[derive(Parser)]
#[command(name = "weathertunes")]
#[command(about = "Suggest albums that match the current weather in a city")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (or set BIND_ADDR env var)
        #[arg(long, env = "BIND_ADDR")]
        bind: Option<String>,
    },

    /// Look up the playlist for one city and print it
    Lookup {
        /// City name, as you would type it into a weather site
        city: String,
    },

    /// Check that all required settings are present
    CheckConfig,

    /// Show setup guide
    Setup,
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { bind } => {
            serve(bind).await?;
        }
        Commands::Lookup { city } => {
            lookup(&city).await?;
        }
        Commands::CheckConfig => {
            check_config()?;
        }
        Commands::Setup => {
            show_setup_guide();
        }
    }

    Ok(())
}

fn load_config() -> Result<Config> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let missing = config.get_missing_config();
    if !missing.is_empty() {
        println!("{}", "Missing configuration:".red());
        for item in &missing {
            println!("   - {}", item);
        }
        println!(
            "\n{}",
            "Please copy .env.example to .env and fill in your credentials.".yellow()
        );
        std::process::exit(1);
    }

    Ok(config)
}

async fn serve(bind: Option<String>) -> Result<()> {
    let config = load_config()?;
    let bind_addr = bind.unwrap_or_else(|| config.bind_addr.clone());

    let aggregator =
        PlaylistAggregator::from_config(&config).context("Failed to build provider clients")?;

    weathertunes::server::serve(&bind_addr, aggregator)
        .await
        .with_context(|| format!("Server on {} failed", bind_addr))?;

    Ok(())
}

async fn lookup(city: &str) -> Result<()> {
    let config = load_config()?;
    let aggregator =
        PlaylistAggregator::from_config(&config).context("Failed to build provider clients")?;

    let response = match aggregator.build(city).await {
        Ok(response) => response,
        Err(e) => {
            println!("{}", e.public_message().red());
            std::process::exit(1);
        }
    };

    println!("{}", format!("Weather tunes for {}", response.city).cyan().bold());
    println!("{}", "=".repeat(50));
    println!("Temperature: {}", response.temperature);
    println!("Genre: {}", response.genre.to_string().green());

    if response.playlists.is_empty() {
        println!("{}", "No albums found".yellow());
        return Ok(());
    }

    println!();
    for (i, album) in response.playlists.iter().enumerate() {
        println!(
            "{:2}. {} - {} ({})",
            i + 1,
            album.name.green(),
            album.artist,
            album.release_date
        );
        println!("     {}", album.url.cyan());
    }

    Ok(())
}

fn check_config() -> Result<()> {
    let config = load_config()?;

    println!("{}", "Configuration OK".green());
    println!("  Weather API:      {}", config.weather_api_base);
    println!("  Spotify accounts: {}", config.spotify_accounts_base);
    println!("  Spotify API:      {}", config.spotify_api_base);
    println!("  Request timeout:  {}s", config.request_timeout.as_secs());
    println!("  Bind address:     {}", config.bind_addr);

    Ok(())
}

fn show_setup_guide() {
    println!("{}", "weathertunes Setup Guide".cyan().bold());
    println!("{}", "=".repeat(50));

    println!("\n{}", "1. OpenWeatherMap API Setup".yellow());
    println!("   - Go to https://home.openweathermap.org/api_keys");
    println!("   - Create an API key");

    println!("\n{}", "2. Spotify API Setup".yellow());
    println!("   - Go to https://developer.spotify.com/dashboard/");
    println!("   - Create a new app");
    println!("   - Copy your Client ID and Client Secret");

    println!("\n{}", "3. Configuration".yellow());
    println!("   - Create a .env file with:");
    println!("     WEATHER_API_KEY=your_openweathermap_key");
    println!("     SPOTIFY_CLIENT_ID=your_spotify_client_id");
    println!("     SPOTIFY_CLIENT_SECRET=your_spotify_client_secret");
    println!("   - Optional:");
    println!("     BIND_ADDR=127.0.0.1:8000");
    println!("     REQUEST_TIMEOUT_SECS=10");

    println!("\n{}", "4. Usage".yellow());
    println!("   - weathertunes check-config      (to verify your settings)");
    println!("   - weathertunes lookup London     (to try a single city)");
    println!("   - weathertunes serve             (to start the API)");
    println!("   - curl http://127.0.0.1:8000/api/playlist/London/");

    println!("\n{}", "Ready to go!".green());
}
