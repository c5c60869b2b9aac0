use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// Errors are automatically converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed or a required field is missing.
pub fn parse_json_file<T: DeserializeOwned>(file_path: impl AsRef<Path>) -> Result<T> {
    let data = fs::read_to_string(file_path.as_ref()).map_err(Error::IoError)?;

    parse_json_str(&data)
}

pub fn parse_json_str<T: DeserializeOwned>(data: &str) -> Result<T> {
    let parsed_data: T = serde_json::from_str(data).map_err(Error::DeserializationError)?;

    Ok(parsed_data)
}

/// Writes `value` as pretty-printed JSON, replacing the file if it exists.
pub fn write_json_file<T: Serialize>(file_path: impl AsRef<Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(file_path.as_ref(), json)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dockerinfo_dto::DockerInfoDto;

    #[test]
    fn test_missing_file() {
        let result = parse_json_file::<DockerInfoDto>("does/not/exist.json");
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = parse_json_str::<DockerInfoDto>("{ \"docker_info_list\": [ ");
        assert!(matches!(result, Err(Error::DeserializationError(_))));
    }

    #[test]
    fn test_write_then_read() {
        let path = std::env::temp_dir().join(format!("pipeline_topology_parser_{}.json", std::process::id()));
        let dto: DockerInfoDto =
            parse_json_str(r#"{ "docker_info_list": [ { "container_name": "a", "ip_address": "h", "port": "80" } ] }"#).unwrap();

        write_json_file(&path, &dto).unwrap();
        let back: DockerInfoDto = parse_json_file(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(back.docker_info_list[0].port, 80);
    }
}
