use optable::{Format, Layout, DEFAULT_SENTINEL};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sentinel: String,
    pub format: Format,
    pub layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sentinel: DEFAULT_SENTINEL.to_string(),
            format: Format::default(),
            layout: Layout::default(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&str>) -> Result<Self, Error> {
        match path {
            Some(fname) => {
                let file =
                    File::open(fname).map_err(|e| Error::ConfigOpen(fname.to_string(), e))?;
                serde_yaml::from_reader(BufReader::new(file))
                    .map_err(|e| Error::Config(fname.to_string(), e))
            }
            None => Ok(Config::default()),
        }
    }

    pub fn parse(text: &str) -> Result<Self, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::Config("<inline>".to_string(), e))
    }
}
