use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;

use crate::api::blueprint_dto::BlueprintDto;
use crate::api::dockerinfo_dto::{DockerInfoDto, DockerInfoEntryDto};
use crate::domain::utils::id::ContainerName;
use crate::error::Error;

/// A deployed container and the address its operations are served on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub container_name: ContainerName,
    pub host: String,
    pub port: u16,

    /// Schema location declared for this node in the blueprint, if any.
    pub proto_uri: Option<String>,
}

impl Node {
    fn from_dto(dto: &DockerInfoEntryDto) -> Self {
        Node {
            container_name: ContainerName::new(dto.container_name.clone()),
            host: dto.ip_address.clone(),
            port: dto.port,
            proto_uri: None,
        }
    }

    /// `host:port` as it appears in the dockerinfo document.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps container names to deployed nodes. Built once per resolution run.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    /// Nodes in dockerinfo order.
    nodes: Vec<Node>,

    /// Container name -> position in `nodes`
    index: HashMap<ContainerName, usize>,
}

impl NodeRegistry {
    /// Builds the registry from the dockerinfo entries and checks that every
    /// container the blueprint names is deployed.
    ///
    /// Containers that are deployed but not used by the blueprint are kept.
    pub fn build(dockerinfo: &DockerInfoDto, blueprint: &BlueprintDto) -> Result<Self, Error> {
        let mut registry = NodeRegistry::default();

        for (position, entry) in dockerinfo.docker_info_list.iter().enumerate() {
            let node = Node::from_dto(entry);

            match registry.index.entry(node.container_name.clone()) {
                Entry::Occupied(existing) => {
                    return Err(Error::DuplicateIdentityError {
                        container_name: node.container_name,
                        first_index: *existing.get(),
                        duplicate_index: position,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(registry.nodes.len());
                }
            }
            registry.nodes.push(node);
        }

        let mut used: HashSet<usize> = HashSet::new();

        for node_dto in &blueprint.nodes {
            let container_name = ContainerName::new(node_dto.container_name.clone());

            let Some(&position) = registry.index.get(&container_name) else {
                return Err(Error::MissingDeploymentError { container_name, referenced_by: "blueprint node".to_string() });
            };

            if node_dto.proto_uri.is_some() {
                registry.nodes[position].proto_uri = node_dto.proto_uri.clone();
            }
            used.insert(position);
        }

        let unused: Vec<&str> = registry
            .nodes
            .iter()
            .enumerate()
            .filter(|(position, _)| !used.contains(position))
            .map(|(_, node)| node.container_name.as_str())
            .collect();
        if !unused.is_empty() {
            tracing::debug!(containers = ?unused, "Deployed containers not used by the blueprint");
        }

        Ok(registry)
    }

    pub fn get(&self, container_name: &ContainerName) -> Option<&Node> {
        self.index.get(container_name).map(|&position| &self.nodes[position])
    }

    pub fn contains(&self, container_name: &ContainerName) -> bool {
        self.index.contains_key(container_name)
    }

    /// Nodes in dockerinfo order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
