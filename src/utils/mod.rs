use std::path::PathBuf;

use directories::ProjectDirs;

/// `$XDG_CONFIG_HOME/dock-interact/config.kdl`, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "dock-interact")?;
    Some(dirs.config_dir().join("config.kdl"))
}

/// Config path given on the command line, or the default one.
pub fn config_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    cli_path.or_else(default_config_path)
}
