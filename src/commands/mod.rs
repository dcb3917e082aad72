mod config;
mod serve;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use serve::{ServeOptions, cmd_serve};
