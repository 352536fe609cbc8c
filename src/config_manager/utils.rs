use std::fs;
use std::path::Path;

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::ConfigurationError;

/// Read a configuration file and substitute `${VAR_NAME}` through `lookup`.
/// Unset variables are left as-is.
pub fn read_config_text_with(
    config_path: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigurationError> {
    if !Path::new(config_path).exists() {
        return Err(ConfigurationError::NotFound(config_path.to_string()));
    }

    let content = load_text_file_with_guess_encoding(config_path).map_err(|source| {
        ConfigurationError::Read {
            path: config_path.to_string(),
            source,
        }
    })?;

    Ok(substitute_env_vars(&content, lookup))
}

pub fn substitute_env_vars(content: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static regex");
    pattern
        .replace_all(content, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Load text file, falling back to GBK when the bytes are not UTF-8
pub fn load_text_file_with_guess_encoding(file_path: &str) -> std::io::Result<String> {
    let bytes = fs::read(file_path)?;
    Ok(decode_text(&bytes))
}

fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("Config is not valid UTF-8, decoding as GBK");
            let (cow, _, _) = encoding_rs::GBK.decode(bytes);
            cow.into_owned()
        }
    }
}
