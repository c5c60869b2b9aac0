use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Root of a dockerinfo document: where every container of a deployment runs.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DockerInfoDto {
    pub docker_info_list: Vec<DockerInfoEntryDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DockerInfoEntryDto {
    pub container_name: String,
    pub ip_address: String,

    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
}

// Deployment tooling writes ports either as numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum PortRepr {
    Number(u16),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match PortRepr::deserialize(deserializer)? {
        PortRepr::Number(port) => Ok(port),
        PortRepr::Text(text) => text
            .trim()
            .parse::<u16>()
            .map_err(|e| de::Error::custom(format!("invalid port '{}': {}", text, e))),
    }
}
