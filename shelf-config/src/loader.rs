use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use zeroize::Zeroizing;

use crate::{
    error::ConfigLoadError,
    models::{
        ClientConfig, ConfigMetadata, Credentials, DEFAULT_LOG_FILTER,
        DEFAULT_TIMEOUT_SECS,
    },
    sources::{EnvConfig, FileConfig},
    validation::ConfigWarnings,
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![PathBuf::from("shelf.toml"), PathBuf::from("config/shelf.toml")]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Server address taking precedence over every other source.
    pub base_url: Option<String>,
    /// Only consult the `.env` file, not the process environment.
    pub ignore_process_env: bool,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: ClientConfig,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.options.base_url = Some(base_url.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file = self.read_env_file()?;
        let env_file_loaded = env_file.is_some();
        let env_file = env_file.unwrap_or_default();

        let mut env_config = if self.options.ignore_process_env {
            EnvConfig::from_lookup(|name| env_file.get(name).cloned())
        } else {
            EnvConfig::gather_with(&env_file)
        };
        if let Some(base_url) = &self.options.base_url {
            env_config.base_url = Some(base_url.clone());
        }

        let (file_config, config_path) = self.load_file_config(&env_config)?;
        let metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
        };

        compose_config(file_config, env_config, metadata)
    }

    /// Entries of the `.env` file, or `None` when there is none.
    fn read_env_file(
        &self,
    ) -> Result<Option<HashMap<String, String>>, ConfigLoadError> {
        let entries = match &self.options.env_file {
            Some(path) => dotenvy::from_path_iter(path),
            None => dotenvy::dotenv_iter(),
        };
        let entries = match entries {
            Ok(entries) => entries,
            Err(dotenvy::Error::Io(_)) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let mut vars = HashMap::new();
        for entry in entries {
            let (key, value) = entry?;
            vars.insert(key, value);
        }
        Ok(Some(vars))
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = match (&self.options.config_path, &env_config.config_path) {
            (Some(path), _) | (None, Some(path)) => (Some(path.clone()), true),
            (None, None) => (
                DEFAULT_CONFIG_LOCATIONS
                    .iter()
                    .find(|candidate| candidate.exists())
                    .cloned(),
                false,
            ),
        };

        let Some(path) = path else {
            return Ok((None, None));
        };
        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents = fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source: err,
    })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<ConfigLoad, ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if file_config.is_none() {
        warnings.push_with_hint(
            "No shelf.toml detected; falling back to environment variables",
            "Create shelf.toml with a [server] base_url to persist settings",
        );
    }

    let FileConfig {
        server: file_server,
        auth: file_auth,
        logging: file_logging,
    } = file_config.unwrap_or_default();

    let base_url = env
        .base_url
        .or(file_server.base_url)
        .map(|url| url.trim().to_owned())
        .filter(|url| !url.is_empty())
        .ok_or(ConfigLoadError::MissingBaseUrl)?;

    let timeout_secs = match env.timeout_secs {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(_) => {
                warnings.push(format!(
                    "SHELF_TIMEOUT_SECS='{raw}' is not a number of seconds; ignoring it"
                ));
                file_server.timeout_secs
            }
        },
        None => file_server.timeout_secs,
    };
    let timeout_secs = match timeout_secs {
        Some(0) => {
            warnings.push(format!(
                "a timeout of 0 seconds would fail every request; using {DEFAULT_TIMEOUT_SECS}"
            ));
            DEFAULT_TIMEOUT_SECS
        }
        Some(secs) => secs,
        None => DEFAULT_TIMEOUT_SECS,
    };

    if file_auth.password.is_some() {
        warnings.push_with_hint(
            "password stored in the configuration file",
            "Prefer SHELF_PASSWORD or a .env file kept out of version control",
        );
    }

    let username = env.username.or(file_auth.username);
    let password = env.password.or(file_auth.password);
    let credentials = match (username, password) {
        (Some(username), Some(password)) => Some(Credentials {
            username,
            password: Zeroizing::new(password),
        }),
        (Some(username), None) => {
            warnings.push(format!(
                "username '{username}' configured without a password; it will be ignored"
            ));
            None
        }
        (None, Some(_)) => {
            warnings.push("password configured without a username; it will be ignored");
            None
        }
        (None, None) => None,
    };

    let token = env.token.or(file_auth.token).map(Zeroizing::new);

    let log_filter = env
        .log_filter
        .or(file_logging.filter)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

    let config = ClientConfig {
        base_url,
        credentials,
        token,
        timeout: Duration::from_secs(timeout_secs),
        log_filter,
        metadata,
    };

    Ok(ConfigLoad { config, warnings })
}
