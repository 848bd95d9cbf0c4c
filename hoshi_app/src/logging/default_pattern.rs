//! The `"default"` encoder kind: the bot's standard [`PatternEncoder`].

use log4rs::config::{Deserialize, Deserializers};
use log4rs::encode::Encode;
use log4rs::encode::pattern::PatternEncoder;

const fn yes() -> bool {
    true
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternConfig {
    /// Prefix lines with the UTC timestamp.
    #[serde(default = "yes")]
    time: bool,
    /// Include the log target.
    #[serde(default = "yes")]
    target: bool,
}

fn pattern(config: &PatternConfig) -> String {
    let mut pattern = String::from("[");
    if config.time {
        pattern.push_str("{d(%Y-%m-%d %H:%M:%S)(utc)} ");
    }

    pattern.push_str("{h({l:<5})}");
    if config.target {
        pattern.push_str(" {t}");
    }

    pattern.push_str("] {m}{n}");
    pattern
}

pub struct PatternDeserializer;

impl Deserialize for PatternDeserializer {
    type Trait = dyn Encode;
    type Config = PatternConfig;

    fn deserialize(
        &self,
        config: Self::Config,
        _deserializers: &Deserializers,
    ) -> anyhow::Result<Box<Self::Trait>> {
        Ok(Box::new(PatternEncoder::new(&pattern(&config))))
    }
}
