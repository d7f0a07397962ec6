use super::*;

pub const DEFAULT_CONFIG_PATH: &str = "secrets/login.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    pub login_name: String,
    pub oauth_token: String,
    pub channels: Vec<ChannelLogin>,
    pub default_die_sides: Option<u32>,
}

impl LoginConfig {
    /// Reads the config file (if it exists), then applies environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_file(path)?
            .with_env(|name| std::env::var(name).ok())?
            .validated()
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::File::open(path) {
            Ok(file) => Ok(serde_json::from_reader(std::io::BufReader::new(file))?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(error.into()),
        }
    }

    /// Overrides fields with `BOT_ACCOUNT`, `OAUTH_TOKEN`, `CHANNEL` and `DEFAULT_DIE_SIDES`.
    pub fn with_env(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(login_name) = var("BOT_ACCOUNT") {
            self.login_name = login_name;
        }
        if let Some(oauth_token) = var("OAUTH_TOKEN") {
            self.oauth_token = oauth_token;
        }
        if let Some(channels) = var("CHANNEL") {
            self.channels = channels.split(',').map(str::to_owned).collect();
        }
        if let Some(sides) = var("DEFAULT_DIE_SIDES") {
            let sides = sides.trim().parse().map_err(|error: std::num::ParseIntError| {
                ConfigError::Malformed {
                    name: "DEFAULT_DIE_SIDES",
                    reason: error.to_string(),
                }
            })?;
            self.default_die_sides = Some(sides);
        }
        Ok(self)
    }

    /// Normalizes the values and checks that the required ones are present.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.login_name = self.login_name.trim().to_lowercase();
        if self.login_name.is_empty() {
            return Err(ConfigError::Missing("BOT_ACCOUNT"));
        }

        // The client adds its own prefix
        let token = self.oauth_token.trim();
        self.oauth_token = token.strip_prefix("oauth:").unwrap_or(token).to_owned();
        if self.oauth_token.is_empty() {
            return Err(ConfigError::Missing("OAUTH_TOKEN"));
        }

        self.channels = self
            .channels
            .iter()
            .map(|channel| channel.trim().trim_start_matches('#').to_lowercase())
            .filter(|channel| !channel.is_empty())
            .collect();
        if self.channels.is_empty() {
            return Err(ConfigError::Missing("CHANNEL"));
        }

        if self.default_die_sides == Some(0) {
            return Err(ConfigError::Malformed {
                name: "DEFAULT_DIE_SIDES",
                reason: "a die needs at least one side".to_owned(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn file_values_are_used_without_env() {
        let config: LoginConfig = serde_json::from_str(
            r##"{"login_name": "SnaarfBot", "oauth_token": "oauth:abc", "channels": ["#BBBThunda"]}"##,
        )
        .unwrap();
        let config = config.with_env(env(&[])).unwrap().validated().unwrap();
        assert_eq!(config.login_name, "snaarfbot");
        assert_eq!(config.oauth_token, "abc");
        assert_eq!(config.channels, vec!["bbbthunda"]);
        assert_eq!(config.default_die_sides, None);
    }

    #[test]
    fn env_overrides_file() {
        let config = LoginConfig {
            login_name: "old".to_owned(),
            ..LoginConfig::default()
        }
        .with_env(env(&[
            ("BOT_ACCOUNT", "snaarfbot"),
            ("OAUTH_TOKEN", "xyz"),
            ("CHANNEL", "one, two,,three"),
            ("DEFAULT_DIE_SIDES", "20"),
        ]))
        .unwrap()
        .validated()
        .unwrap();
        assert_eq!(config.login_name, "snaarfbot");
        assert_eq!(config.channels, vec!["one", "two", "three"]);
        assert_eq!(config.default_die_sides, Some(20));
    }

    #[test]
    fn missing_values_are_reported() {
        let error = LoginConfig::default().validated().unwrap_err();
        assert!(matches!(error, ConfigError::Missing("BOT_ACCOUNT")));

        let error = LoginConfig::default()
            .with_env(env(&[("BOT_ACCOUNT", "bot"), ("OAUTH_TOKEN", "oauth:")]))
            .unwrap()
            .validated()
            .unwrap_err();
        assert!(matches!(error, ConfigError::Missing("OAUTH_TOKEN")));

        let error = LoginConfig::default()
            .with_env(env(&[("BOT_ACCOUNT", "bot"), ("OAUTH_TOKEN", "t")]))
            .unwrap()
            .validated()
            .unwrap_err();
        assert!(matches!(error, ConfigError::Missing("CHANNEL")));
    }

    #[test]
    fn malformed_die_sides_are_rejected() {
        let error = LoginConfig::default()
            .with_env(env(&[("DEFAULT_DIE_SIDES", "many")]))
            .unwrap_err();
        assert!(matches!(
            error,
            ConfigError::Malformed {
                name: "DEFAULT_DIE_SIDES",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_means_defaults() {
        let config = LoginConfig::from_file("does/not/exist.json").unwrap();
        assert!(config.login_name.is_empty());
        assert!(config.channels.is_empty());
    }
}
