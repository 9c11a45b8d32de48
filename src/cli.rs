use clap::Parser;

use crate::config::{get_config_dir, get_data_dir};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Base URL of the movie backend, overriding the configured one
    #[arg(short, long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Rows per page
    #[arg(short, long, value_name = "COUNT", value_parser = parse_entries)]
    pub entries: Option<usize>,
}

fn parse_entries(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("a page needs at least one row".to_string()),
        Ok(entries) => Ok(entries),
        Err(err) => Err(err.to_string()),
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let describe = option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown");
    let build_date = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown");

    let config_dir_path = get_config_dir().display().to_string();
    let data_dir_path = get_data_dir().display().to_string();

    format!(
        "\
{}-{describe} ({build_date})

Authors: {author}

Config directory: {config_dir_path}
Data directory: {data_dir_path}",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_must_be_positive() {
        assert_eq!(parse_entries("30"), Ok(30));
        assert!(parse_entries("0").is_err());
        assert!(parse_entries("many").is_err());
    }

    #[test]
    fn api_url_overrides_are_optional() {
        let cli = Cli::parse_from(["cinedeck"]);
        assert_eq!(cli.api_url, None);

        let cli = Cli::parse_from(["cinedeck", "--api-url", "http://films:9000", "-e", "10"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://films:9000"));
        assert_eq!(cli.entries, Some(10));
    }
}
