use std::net::SocketAddr;

use clap::Parser;
use weather_core::provider::openweather::OPENWEATHER_API_URL;

#[derive(Debug, Clone, Parser)]
#[command(name = "weather-server", version, about = "Weather API serving the weather client")]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "WEATHER_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// OpenWeatherMap API key used for city lookups.
    #[arg(long, env = "OPENWEATHERMAP_API_KEY", hide_env_values = true)]
    pub openweathermap_api_key: Option<String>,

    /// OpenWeatherMap current weather endpoint.
    #[arg(long, env = "OPENWEATHERMAP_API_URL", default_value = OPENWEATHER_API_URL)]
    pub openweathermap_api_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn config_definition_is_valid() {
        ServerConfig::command().debug_assert();
    }

    #[test]
    fn explicit_arguments() {
        let cfg = ServerConfig::try_parse_from([
            "weather-server",
            "--bind",
            "0.0.0.0:9000",
            "--openweathermap-api-key",
            "KEY",
            "--openweathermap-api-url",
            "http://127.0.0.1:1/weather",
        ])
        .expect("arguments should parse");

        assert_eq!(cfg.bind, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(cfg.openweathermap_api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.openweathermap_api_url, "http://127.0.0.1:1/weather");
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(ServerConfig::try_parse_from(["weather-server", "--bind", "nowhere"]).is_err());
    }
}
