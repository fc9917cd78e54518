use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Which driver set backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    /// Real OS input, display, clipboard and window APIs
    Native,
    /// In-memory desktop; nothing touches the real machine
    Virtual,
}

impl DriverKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "native" | "os" => Some(DriverKind::Native),
            "virtual" | "dry-run" | "dryrun" => Some(DriverKind::Virtual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverKind::Native => "native",
            DriverKind::Virtual => "virtual",
        }
    }
}

/// Server configuration, built once at startup and handed to the router.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    /// Shared secret; `None` disables authentication
    pub api_key: Option<String>,
    pub screenshot_quality: u8,
    pub screenshot_path: PathBuf,
    pub window_poll_interval: Duration,
    pub driver: DriverKind,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let driver = match lookup("DRIVER") {
            Some(raw) => DriverKind::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Unknown DRIVER '{}', using native", raw);
                DriverKind::Native
            }),
            None => defaults.driver,
        };

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            host: lookup("HOST").unwrap_or(defaults.host),
            api_key: lookup("API_KEY").filter(|k| !k.is_empty()),
            screenshot_quality: lookup("SCREENSHOT_QUALITY")
                .and_then(|q| q.parse::<u8>().ok())
                .map(|q| q.clamp(1, 100))
                .unwrap_or(defaults.screenshot_quality),
            screenshot_path: lookup("SCREENSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.screenshot_path),
            window_poll_interval: lookup("WINDOW_POLL_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.window_poll_interval),
            driver,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn auth_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "127.0.0.1".to_string(),
            api_key: None,
            screenshot_quality: 85,
            screenshot_path: PathBuf::from("screenshot.png"),
            window_poll_interval: Duration::from_millis(200),
            driver: DriverKind::Native,
        }
    }
}
