use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, Text};
use weather_core::{Config, Endpoint, WeatherGateway};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Log request details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and request settings.
    Configure,

    /// Show weather for a place name, "lat,lon" pair or IP address.
    Show {
        query: String,

        /// Print the multi-day forecast instead of current conditions.
        #[arg(long)]
        forecast: bool,
    },

    /// List places matching a partial name.
    Search { query: String },

    /// Print the raw provider document for any operation.
    Get {
        /// Operation name, e.g. "current", "search" or "astronomy".
        operation: String,

        query: String,
    },

    /// List the supported operations.
    Operations,

    /// Run the HTTP server.
    Serve {
        /// Address to listen on, overrides the configured one.
        #[arg(long)]
        listen: Option<String>,
    },
}

impl Cli {
    pub fn default_log_filter(&self) -> &'static str {
        match (&self.command, self.verbose) {
            (_, true) => "debug",
            (Command::Serve { .. }, false) => "info",
            _ => "warn",
        }
    }

    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { query, forecast } => {
                let gateway = gateway_from_config()?;
                if forecast {
                    let doc = gateway.forecast(&query).await?;
                    print!("{}", output::render_forecast(&doc)?);
                } else {
                    let doc = gateway.current_weather(&query).await?;
                    print!("{}", output::render_current(&doc)?);
                }
                Ok(())
            }
            Command::Search { query } => {
                let doc = gateway_from_config()?.search(&query).await?;
                print!("{}", output::render_search(&doc)?);
                Ok(())
            }
            Command::Get { operation, query } => {
                let endpoint = Endpoint::try_from(operation.as_str())?;
                let doc = gateway_from_config()?.fetch(endpoint, &query).await?;
                let pretty =
                    serde_json::to_string_pretty(&doc).context("Failed to format response")?;
                println!("{pretty}");
                Ok(())
            }
            Command::Operations => {
                print!("{}", output::render_operations());
                Ok(())
            }
            Command::Serve { listen } => {
                let mut config = load_config()?;
                if let Some(listen) = listen {
                    config.server.listen = listen;
                }
                weather_server::serve(config).await
            }
        }
    }
}

fn load_config() -> Result<Config> {
    let mut config = Config::load()?;
    config.apply_env()?;
    Ok(config)
}

fn gateway_from_config() -> Result<WeatherGateway> {
    let config = load_config()?;
    if !config.is_configured() {
        bail!(
            "No WeatherAPI key configured.\n\
             Hint: run `weather configure` or set WEATHER_API_KEY."
        );
    }

    Ok(WeatherGateway::new(config.provider)?)
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key.trim().to_string());

    let current_url = config.provider.base_url.clone();
    config.provider.base_url = Text::new("Base URL:")
        .with_default(&current_url)
        .prompt()
        .context("Failed to read base URL")?;

    config.provider.forecast_days = CustomType::<u32>::new("Forecast days:")
        .with_default(config.provider.forecast_days)
        .with_error_message("Please enter a whole number of days")
        .prompt()
        .context("Failed to read forecast days")?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
