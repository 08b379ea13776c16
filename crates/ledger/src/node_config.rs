//! Locating a node's JSON-RPC endpoint from its configuration file.
//!
//! Node configurations are INI-like: `[section]` headers followed by `key = value` lines, with
//! `#` comments. Every listening port has its own section carrying `ip`, `port` and `protocol`.

use std::{fmt, fs, path::Path};

use tracing::debug;

use crate::{
    constants::{LOCALHOST_IP, UNSPECIFIED_IP},
    errors::{LedgerError, LedgerResult},
};

/// Where a node answers JSON-RPC over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcEndpoint {
    /// Address to connect to.
    pub ip: String,

    /// Port to connect to.
    pub port: u16,
}

impl RpcEndpoint {
    /// Reads the first HTTP port out of the node configuration at `path`.
    pub fn from_node_config(path: &Path) -> LedgerResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| LedgerError::NodeConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let endpoint = Self::parse(&contents).map_err(|reason| LedgerError::NodeConfig {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(path = %path.display(), %endpoint, "found node rpc endpoint");

        Ok(endpoint)
    }

    /// Finds the first section whose protocol list includes `http`.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let section = sections(contents)
            .into_iter()
            .find(|section| {
                section
                    .get("protocol")
                    .is_some_and(|protocols| protocols.split(',').any(|p| p.trim() == "http"))
            })
            .ok_or_else(|| "no port section with protocol http".to_string())?;

        let port = section
            .get("port")
            .ok_or_else(|| format!("section [{}] has no port", section.name))?;
        let port = port
            .parse()
            .map_err(|_| format!("section [{}] has invalid port {port}", section.name))?;

        let ip = match section.get("ip") {
            Some(UNSPECIFIED_IP) | None => LOCALHOST_IP,
            Some(ip) => ip,
        };

        Ok(Self {
            ip: ip.to_string(),
            port,
        })
    }

    /// The URL to send requests to.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.ip, self.port)
    }
}

impl fmt::Display for RpcEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

#[derive(Debug)]
struct Section<'a> {
    name: &'a str,
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> Section<'a> {
    fn get(&self, key: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

fn sections(contents: &str) -> Vec<Section<'_>> {
    let mut sections: Vec<Section<'_>> = Vec::new();

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            sections.push(Section {
                name: name.trim(),
                entries: Vec::new(),
            });
            continue;
        }

        // bare values (e.g. the port list under [server]) carry no key
        let (Some(section), Some((key, value))) = (sections.last_mut(), line.split_once('=')) else {
            continue;
        };
        section.entries.push((key.trim(), value.trim()));
    }

    sections
}
