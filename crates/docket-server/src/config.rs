use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ServerResult;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Base directory whose immediate subdirectories are the repositories.
    pub repos_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            repos_root: PathBuf::from("repos"),
        }
    }
}

impl ServerConfig {
    /// Load a configuration from a TOML file.
    pub fn from_path(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.repos_root, PathBuf::from("repos"));
    }

    #[test]
    fn from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docket.toml");
        std::fs::write(
            &path,
            "bind_addr = \"0.0.0.0:8080\"\nrepos_root = \"/srv/docket\"\n",
        )
        .unwrap();
        let c = ServerConfig::from_path(&path).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.repos_root, PathBuf::from("/srv/docket"));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docket.toml");
        std::fs::write(&path, "repos_root = \"data\"\n").unwrap();
        let c = ServerConfig::from_path(&path).unwrap();
        assert_eq!(c.bind_addr, ServerConfig::default().bind_addr);
        assert_eq!(c.repos_root, PathBuf::from("data"));
    }
}
