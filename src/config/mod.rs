//! Configuration loading.
//!
//! Sources, lowest precedence first:
//! - built-in defaults (`Settings::default()`)
//! - optional `config/default.{toml,yaml,json}`
//! - `PUSHSUB_`-prefixed environment variables, `__` between nesting levels
//!   (`PUSHSUB_SERVER__PORT=9000`, `PUSHSUB_DELIVERY__TIMEOUT_MS=2000`)

mod settings;

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};

use settings::PartialSettings;

pub use settings::{DeliverySettings, LogSettings, ServerSettings, Settings};

pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("PUSHSUB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    let settings = Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
        },
        delivery: DeliverySettings {
            timeout_ms: partial
                .delivery
                .as_ref()
                .and_then(|d| d.timeout_ms)
                .unwrap_or(default.delivery.timeout_ms),
        },
        log: LogSettings {
            level: partial
                .log
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.log.level),
        },
    };

    if settings.delivery.timeout_ms == 0 {
        return Err(ConfigError::Message(
            "delivery.timeout_ms must be greater than zero".to_string(),
        ));
    }

    Ok(settings)
}

impl DeliverySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
