use std::path::PathBuf;

use lazy_static::lazy_static;

pub const SELF_NAME: &str = ".kac";

lazy_static! {
    pub static ref HOME_DIR: PathBuf = home::home_dir().unwrap_or_else(|| PathBuf::from("."));
    pub static ref KAC_HOME_DIR: PathBuf = HOME_DIR.join(SELF_NAME);
}
