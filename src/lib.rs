pub mod backend;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod model;
pub mod read;
pub mod store;
pub mod traits;
pub mod util;
