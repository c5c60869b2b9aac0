use std::path::Path;

use crate::api::blueprint_dto::BlueprintDto;
use crate::api::dockerinfo_dto::DockerInfoDto;
use crate::domain::topology::topology::Topology;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod export;
pub mod loader;
pub mod logger;

/// Reads a blueprint and a dockerinfo file and resolves them into a `Topology`.
pub fn generate_topology(blueprint_path: impl AsRef<Path>, dockerinfo_path: impl AsRef<Path>) -> Result<Topology> {
    let blueprint: BlueprintDto = parse_json_file(blueprint_path.as_ref())?;
    log::info!("Blueprint '{}' parsed: {} nodes.", blueprint_path.as_ref().display(), blueprint.nodes.len());

    let dockerinfo: DockerInfoDto = parse_json_file(dockerinfo_path.as_ref())?;
    log::info!("Dockerinfo '{}' parsed: {} containers.", dockerinfo_path.as_ref().display(), dockerinfo.docker_info_list.len());

    let topology = Topology::create_from_dto(&blueprint, &dockerinfo)?;
    log::info!("Topology constructed successfully.");

    Ok(topology)
}
