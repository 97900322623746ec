// locating the config layers that apply to a working directory

use std::path::{Path, PathBuf};

/// per-directory config file
const PROJECT_FILE: &str = ".fuzzypass.toml";

/// file name under `/etc` and the user config dir
const GLOBAL_FILE: &str = "fuzzypass.toml";

/// config layers that exist on disk, lowest priority first: `/etc/fuzzypass.toml`,
/// the user config (`$XDG_CONFIG_HOME` or `~/.config`), then the project hierarchy.
pub fn discover_configs(start: &Path, home: &Path) -> Vec<PathBuf> {
    let xdg_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);

    let mut layers: Vec<PathBuf> = [Path::new("/etc").join(GLOBAL_FILE), user_config(home, xdg_home)]
        .into_iter()
        .filter(|p| p.is_file())
        .collect();
    layers.extend(discover_hierarchy(start, home));
    layers
}

fn user_config(home: &Path, xdg_home: Option<PathBuf>) -> PathBuf {
    xdg_home
        .unwrap_or_else(|| home.join(".config"))
        .join("fuzzypass")
        .join(GLOBAL_FILE)
}

/// `.fuzzypass.toml` files from `home` down to `start`, outermost first.
/// a `start` outside `home` only contributes its own directory.
pub fn discover_hierarchy(start: &Path, home: &Path) -> Vec<PathBuf> {
    let Ok(start) = start.canonicalize() else {
        return Vec::new();
    };
    let home = home.canonicalize().unwrap_or_else(|_| home.to_path_buf());

    let dirs: Vec<&Path> = if start.starts_with(&home) {
        start.ancestors().take_while(|dir| dir.starts_with(&home)).collect()
    } else {
        vec![start.as_path()]
    };

    dirs.into_iter()
        .rev()
        .map(|dir| dir.join(PROJECT_FILE))
        .filter(|p| p.is_file())
        .collect()
}
