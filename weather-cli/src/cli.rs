use std::{fmt, process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use tracing::{debug, warn};
use weather_core::{Action, Board, Config, HttpWeatherApi, Key, Outcome, Region, WeatherClient};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather query client")]
pub struct Cli {
    /// Weather service URL, e.g. "http://127.0.0.1:8000". Overrides the saved one.
    #[arg(long, global = true, env = "WEATHER_SERVER_URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set and save the weather service URL.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "Chennai".
        location: String,
    },

    /// Show weather for a random location.
    Random,

    /// Show the average global weather.
    Global,

    /// Pick actions from a menu until you quit (the default).
    Interactive,
}

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Location,
    Random,
    Global,
    Quit,
}

impl MenuItem {
    const fn all() -> [MenuItem; 4] {
        [MenuItem::Location, MenuItem::Random, MenuItem::Global, MenuItem::Quit]
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::Location => "Get weather",
            MenuItem::Random => "Get random location weather",
            MenuItem::Global => "Get global average",
            MenuItem::Quit => "Quit",
        })
    }
}

struct Session {
    config: Config,
    board: Arc<Board>,
    client: WeatherClient,
}

impl Session {
    fn open(server: Option<String>) -> anyhow::Result<Self> {
        let config = Config::load()?;
        let url = server.as_deref().unwrap_or(config.server_url()).to_owned();
        debug!(%url, "using weather service");

        let api = HttpWeatherApi::from_str_url(&url)?;
        let board = Arc::new(Board::new());
        let client = WeatherClient::new(Arc::new(api), board.clone());

        Ok(Self { config, board, client })
    }

    async fn run(&mut self, action: Action, input: &str) -> Outcome {
        let outcome = self.client.perform(action, input).await;
        if remembers(&outcome) {
            self.remember(input);
        }
        print!("{}", self.board);
        outcome
    }

    fn remember(&mut self, input: &str) {
        let before = self.config.last_location.clone();
        self.config.remember_location(input);
        if self.config.last_location != before {
            if let Err(err) = self.config.save() {
                warn!(error = %err, "could not save last location");
            }
        }
    }

    async fn interactive(&mut self) -> anyhow::Result<()> {
        loop {
            let choice = match Select::new("What would you like to see?", MenuItem::all().to_vec())
                .prompt()
            {
                Ok(choice) => choice,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    return Ok(());
                }
                Err(err) => return Err(err).context("Failed to read menu choice"),
            };

            match choice {
                MenuItem::Location => {
                    let initial = self.config.last_location.clone().unwrap_or_default();
                    let input = match Text::new("City:").with_initial_value(&initial).prompt() {
                        Ok(input) => input,
                        Err(InquireError::OperationCanceled) => continue,
                        Err(InquireError::OperationInterrupted) => return Ok(()),
                        Err(err) => return Err(err).context("Failed to read city name"),
                    };
                    // The prompt only returns once Enter is pressed in the field.
                    if let Some(action) = Action::from_key(Key::Enter) {
                        self.run(action, &input).await;
                    }
                }
                MenuItem::Random => {
                    self.run(Action::QueryRandom, "").await;
                }
                MenuItem::Global => {
                    self.run(Action::QueryGlobalAverage, "").await;
                }
                MenuItem::Quit => return Ok(()),
            }
            println!();
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let command = self.command.unwrap_or(Command::Interactive);

        if let Command::Configure = command {
            configure()?;
            return Ok(ExitCode::SUCCESS);
        }

        let mut session = Session::open(self.server)?;
        let outcome = match command {
            Command::Show { location } => session.run(Action::QueryLocation, &location).await,
            Command::Random => session.run(Action::QueryRandom, "").await,
            Command::Global => session.run(Action::QueryGlobalAverage, "").await,
            Command::Interactive | Command::Configure => {
                session.interactive().await?;
                return Ok(ExitCode::SUCCESS);
            }
        };

        Ok(match outcome {
            Outcome::Rendered(_) => ExitCode::SUCCESS,
            Outcome::ErrorShown(..) => ExitCode::FAILURE,
        })
    }
}

/// Only a location that produced weather is worth prefilling next time.
fn remembers(outcome: &Outcome) -> bool {
    matches!(outcome, Outcome::Rendered(Region::Primary))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let url = Text::new("Weather service URL:")
        .with_initial_value(config.server_url())
        .prompt()
        .context("Failed to read service URL")?;
    let url = url.trim();

    // Validate before saving.
    HttpWeatherApi::from_str_url(url)?;

    config.set_server_url(url);
    config.save()?;
    println!("Saved to {}", Config::config_file_path()?.display());

    Ok(())
}
