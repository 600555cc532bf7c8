use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::twitter::oauth::TwitterCredentials;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Explicit path to the config file (overridden by `--config`).
    pub const CONFIG_PATH: &str = "JOPLEET_CONFIG";
}

/// Default values
pub mod defaults {
    pub const CONFIG_FILE: &str = "jopleet.config";
    pub const SECTION: &str = "authentication";
    pub const TWITTER_API_URL: &str = "https://api.twitter.com/1.1";
}

/// Config keys inside the `authentication` section
pub mod keys {
    pub const JOPLIN_URL: &str = "joplin_url";
    pub const TOKEN: &str = "token";
    pub const PARENT_FOLDER: &str = "parent_folder";
    pub const CONSUMER_KEY: &str = "ConsumerKey";
    pub const CONSUMER_SECRET: &str = "ConsumerSecret";
    pub const ACCESS_TOKEN: &str = "AccessToken";
    pub const ACCESS_TOKEN_SECRET: &str = "AccessTokenSecret";
    pub const TWITTER_API_URL: &str = "twitter_api_url";
}

/// Where the Joplin Data API lives and where notes go
#[derive(Clone, Debug)]
pub struct JoplinConfig {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:41184"
    pub url: String,
    pub token: String,
    pub parent_folder: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub joplin: JoplinConfig,
    pub twitter: TwitterCredentials,
    pub twitter_api_url: String,
}

impl Config {
    /// Load from the resolved config path (see [`config_path`])
    pub fn load(cli_override: Option<&Path>) -> Result<Self, String> {
        let path = config_path(cli_override)?;
        log::info!("[CONFIG] Reading {:?}", path);
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config file {:?}: {}", path, e))?;
        Self::from_ini(&content).map_err(|e| format!("{:?}: {}", path, e))
    }

    pub fn from_ini(content: &str) -> Result<Self, String> {
        let sections = parse_ini(content)?;
        let auth = sections
            .get(defaults::SECTION)
            .ok_or_else(|| format!("missing section [{}]", defaults::SECTION))?;

        let required = |key: &str| -> Result<String, String> {
            auth.get(&key.to_lowercase())
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| format!("missing key '{}' in [{}]", key, defaults::SECTION))
        };

        let twitter_api_url = auth
            .get(keys::TWITTER_API_URL)
            .filter(|v| !v.is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| defaults::TWITTER_API_URL.to_string());

        Ok(Self {
            joplin: JoplinConfig {
                url: required(keys::JOPLIN_URL)?.trim_end_matches('/').to_string(),
                token: required(keys::TOKEN)?,
                parent_folder: required(keys::PARENT_FOLDER)?,
            },
            twitter: TwitterCredentials::new(
                required(keys::CONSUMER_KEY)?,
                required(keys::CONSUMER_SECRET)?,
                required(keys::ACCESS_TOKEN)?,
                required(keys::ACCESS_TOKEN_SECRET)?,
            ),
            twitter_api_url,
        })
    }
}

/// Returns the directory holding the running executable.
/// Symlinks are resolved so an installed link still finds its config.
pub fn exe_dir() -> Result<PathBuf, String> {
    let exe = env::current_exe().map_err(|e| format!("Cannot locate executable: {}", e))?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| format!("Executable {:?} has no parent directory", exe))
}

/// Resolve the config file: CLI flag, then `JOPLEET_CONFIG`, then
/// `jopleet.config` next to the executable (never the working directory).
pub fn config_path(cli_override: Option<&Path>) -> Result<PathBuf, String> {
    if let Some(path) = cli_override {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = env::var(env_vars::CONFIG_PATH) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    Ok(exe_dir()?.join(defaults::CONFIG_FILE))
}

type Sections = HashMap<String, HashMap<String, String>>;

/// Parse a sectioned key/value file.
///
/// Hand-rolled: `[section]` headers, `key = value` or `key: value`,
/// whole-line `#`/`;` comments. Keys are lower-cased, section names are not.
fn parse_ini(content: &str) -> Result<Sections, String> {
    let mut sections: Sections = HashMap::new();
    let mut current: Option<String> = None;

    for (lineno, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let name = name.trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let split_at = trimmed
            .find(['=', ':'])
            .ok_or_else(|| format!("line {}: expected 'key = value'", lineno + 1))?;
        let section = current
            .as_ref()
            .ok_or_else(|| format!("line {}: key outside of any [section]", lineno + 1))?;

        let key = trimmed[..split_at].trim().to_lowercase();
        let value = trimmed[split_at + 1..].trim().to_string();
        let entries = sections.entry(section.clone()).or_default();
        if entries.contains_key(&key) {
            return Err(format!(
                "line {}: duplicate key '{}' in [{}]",
                lineno + 1,
                key,
                section
            ));
        }
        entries.insert(key, value);
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
# jopleet configuration
[authentication]
joplin_url = http://127.0.0.1:41184/
token = abcdef
parent_folder = 0123456789
ConsumerKey = ck
consumersecret: cs
AccessToken = at
; secret below
ACCESSTOKENSECRET = ats
";

    #[test]
    fn test_parse_config() {
        let config = Config::from_ini(SAMPLE).unwrap();
        assert_eq!(config.joplin.url, "http://127.0.0.1:41184");
        assert_eq!(config.joplin.token, "abcdef");
        assert_eq!(config.joplin.parent_folder, "0123456789");
        assert_eq!(config.twitter.consumer_key, "ck");
        assert_eq!(config.twitter.consumer_secret, "cs");
        assert_eq!(config.twitter.access_token, "at");
        assert_eq!(config.twitter.access_token_secret, "ats");
        assert_eq!(config.twitter_api_url, defaults::TWITTER_API_URL);
    }

    #[test]
    fn test_twitter_api_url_override() {
        let content = format!("{}twitter_api_url = http://localhost:9000/1.1/\n", SAMPLE);
        let config = Config::from_ini(&content).unwrap();
        assert_eq!(config.twitter_api_url, "http://localhost:9000/1.1");
    }

    #[test]
    fn test_missing_key_is_error() {
        let content = SAMPLE.replace("token = abcdef\n", "");
        let err = Config::from_ini(&content).unwrap_err();
        assert!(err.contains("'token'"));
    }

    #[test]
    fn test_empty_value_is_error() {
        let content = SAMPLE.replace("AccessToken = at", "AccessToken =");
        let err = Config::from_ini(&content).unwrap_err();
        assert!(err.contains("AccessToken"));
    }

    #[test]
    fn test_missing_section_is_error() {
        let err = Config::from_ini("[other]\nkey = value\n").unwrap_err();
        assert!(err.contains("[authentication]"));
    }

    #[test]
    fn test_section_names_are_case_sensitive() {
        let content = SAMPLE.replace("[authentication]", "[Authentication]");
        assert!(Config::from_ini(&content).is_err());
    }

    #[test]
    fn test_key_outside_section() {
        assert!(parse_ini("token = x\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(defaults::CONFIG_FILE);
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.joplin.parent_folder, "0123456789");

        let missing = Config::from_file(&dir.path().join("nope.config"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_duplicate_key_is_error() {
        let content = format!("{}token = again\n", SAMPLE);
        let err = Config::from_ini(&content).unwrap_err();
        assert!(err.contains("duplicate key 'token'"));
        assert!(err.contains("line 11"));
    }

    #[test]
    fn test_same_key_in_other_section_is_fine() {
        let content = format!("{}[extra]\ntoken = other\n", SAMPLE);
        assert!(Config::from_ini(&content).is_ok());
    }

    // The only test that touches JOPLEET_CONFIG; both steps run in sequence.
    #[test]
    fn test_env_var_then_exe_dir() {
        unsafe { env::remove_var(env_vars::CONFIG_PATH) };
        let exe = env::current_exe().unwrap().canonicalize().unwrap();
        let expected = exe.parent().unwrap().join(defaults::CONFIG_FILE);
        assert_eq!(config_path(None).unwrap(), expected);
        assert_ne!(
            config_path(None).unwrap(),
            env::current_dir().unwrap().join(defaults::CONFIG_FILE)
        );

        unsafe { env::set_var(env_vars::CONFIG_PATH, "/srv/jopleet/custom.config") };
        let from_env = config_path(None);
        let cli_wins = config_path(Some(Path::new("/tmp/cli.config")));
        unsafe { env::remove_var(env_vars::CONFIG_PATH) };

        assert_eq!(from_env.unwrap(), PathBuf::from("/srv/jopleet/custom.config"));
        assert_eq!(cli_wins.unwrap(), PathBuf::from("/tmp/cli.config"));
    }

    #[test]
    fn test_cli_override_wins() {
        let path = config_path(Some(Path::new("/tmp/custom.config"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.config"));
    }
}
