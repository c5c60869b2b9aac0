pub mod blueprint_dto;
pub mod dockerinfo_dto;
pub mod topology_dto;
