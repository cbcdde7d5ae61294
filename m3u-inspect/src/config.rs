use std::{fs::File, path::Path, path::PathBuf};

use anyhow::Result;
use m3u_parser::ParserOptions;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub strict: Option<bool>,
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
}

impl Config {
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            strict: self.strict.unwrap_or(false), // lenient by default
        }
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let file = File::open(path.as_ref())?;
    let config: Config = serde_yaml::from_reader(file)?;
    Ok(config)
}
