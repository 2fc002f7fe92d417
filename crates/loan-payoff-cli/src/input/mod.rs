pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use tracing::debug;

/// Structured input from `--input <file>` or, failing that, piped stdin.
/// `None` means the caller should build the input from flags.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        debug!(path, "reading JSON input file");
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(value) => {
            debug!("reading JSON input from stdin");
            Ok(Some(serde_json::from_value(value)?))
        }
        None => Ok(None),
    }
}
