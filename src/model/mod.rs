pub mod catalog_entry;
pub mod group_version;
pub mod resource_descriptor;
