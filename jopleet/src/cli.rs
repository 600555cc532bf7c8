use clap::Parser;
use std::path::PathBuf;

/// Import tweets as notes into a Joplin notebook
#[derive(Parser, Debug)]
#[command(name = "jopleet", version)]
pub struct Cli {
    /// Comma-separated tags to attach to each created note (unknown tags are ignored)
    #[arg(short = 't', long = "tags", value_name = "TAG,...")]
    pub tags: Option<String>,

    /// Config file (default: $JOPLEET_CONFIG, then jopleet.config next to the executable)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stop at the first URL that fails instead of continuing with the rest
    #[arg(long)]
    pub fail_fast: bool,

    /// Tweet URLs, e.g. https://twitter.com/jpmens/status/1323627129914421249
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,
}

impl Cli {
    pub fn tag_names(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_tags_and_urls() {
        let cli = Cli::try_parse_from(["jopleet", "-t", "work, notes,,", "u1", "u2"]).unwrap();
        assert_eq!(cli.tag_names(), vec!["work", "notes"]);
        assert_eq!(cli.urls, vec!["u1", "u2"]);
        assert!(!cli.fail_fast);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_no_tags() {
        let cli = Cli::try_parse_from(["jopleet", "u1"]).unwrap();
        assert!(cli.tag_names().is_empty());
    }

    #[test]
    fn test_url_required() {
        let err = Cli::try_parse_from(["jopleet", "-t", "work"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let err = Cli::try_parse_from(["jopleet", "-x", "u1"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_config_and_fail_fast() {
        let cli = Cli::try_parse_from(["jopleet", "--fail-fast", "-c", "/etc/j.config", "u1"]).unwrap();
        assert!(cli.fail_fast);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/j.config")));
    }
}
