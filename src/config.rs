//! Configuration for the rent-a-game server and client.
//!
//! Both binaries take one positional argument, the path to a `KEY=value`
//! configuration file (one key per line, no escaping). The server reads
//! `PORT=` and, for the rental protocol, `SERVER_HOSTNAME=`; the client
//! reads `SERVER_IP=` and `SERVER_PORT=`.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Command-line arguments for the server binary.
#[derive(Parser, Debug)]
#[command(name = "rent-a-game-server")]
#[command(version = "0.1.0")]
#[command(about = "A game rental TCP server speaking a text session protocol", long_about = None)]
pub struct ServerArgs {
    /// Path to the KEY=value configuration file
    pub config: PathBuf,

    /// Protocol served to clients
    #[arg(long, value_enum, default_value_t = ProtocolKind::Rental)]
    pub protocol: ProtocolKind,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Command-line arguments for the client binary.
#[derive(Parser, Debug)]
#[command(name = "rent-a-game-client")]
#[command(version = "0.1.0")]
#[command(about = "Interactive client for the rent-a-game server", long_about = None)]
pub struct ClientArgs {
    /// Path to the KEY=value configuration file
    pub config: PathBuf,
}

/// Protocol selector on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolKind {
    /// Stateful handshake/mode/BYE command session.
    Rental,
    /// Stateless alternating-case line transform.
    Echo,
}

/// Protocol the server runs, with its resolved settings.
///
/// The rental hostname is read by every session and never mutated after
/// load, so an `Arc<str>` handed to each handler is all the sharing needed.
#[derive(Debug, Clone)]
pub enum Protocol {
    Rental { hostname: Arc<str> },
    Echo,
}

/// Final resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to bind, kept as the verbatim config-file string.
    pub port: String,
    pub log_level: String,
    pub protocol: Protocol,
}

impl Config {
    /// Load server configuration from the config file named on the command
    /// line. A missing file or a missing required key is fatal.
    pub fn load(args: &ServerArgs) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(&args.config)
            .map_err(|e| ConfigError::FileRead(args.config.clone(), e))?;
        Self::from_contents(&contents, &args.config, args.protocol, &args.log_level)
    }

    fn from_contents(
        contents: &str,
        path: &Path,
        kind: ProtocolKind,
        log_level: &str,
    ) -> Result<Self, ConfigError> {
        let port = file_value(contents, "PORT")
            .ok_or_else(|| ConfigError::MissingKey(path.to_path_buf(), "PORT"))?;

        let protocol = match kind {
            ProtocolKind::Rental => {
                let hostname = file_value(contents, "SERVER_HOSTNAME").ok_or_else(|| {
                    ConfigError::MissingKey(path.to_path_buf(), "SERVER_HOSTNAME")
                })?;
                Protocol::Rental {
                    hostname: hostname.into(),
                }
            }
            ProtocolKind::Echo => Protocol::Echo,
        };

        Ok(Config {
            port,
            log_level: log_level.to_string(),
            protocol,
        })
    }
}

/// Final resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_ip: String,
    pub server_port: String,
}

impl ClientConfig {
    /// Load client configuration from the config file named on the command
    /// line.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
        Self::from_contents(&contents, path)
    }

    fn from_contents(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let server_ip = file_value(contents, "SERVER_IP")
            .ok_or_else(|| ConfigError::MissingKey(path.to_path_buf(), "SERVER_IP"))?;
        let server_port = file_value(contents, "SERVER_PORT")
            .ok_or_else(|| ConfigError::MissingKey(path.to_path_buf(), "SERVER_PORT"))?;
        Ok(ClientConfig {
            server_ip,
            server_port,
        })
    }
}

/// Look up `KEY=` in the file contents. Unknown lines are ignored, the last
/// occurrence of a key wins, and the value is everything after the `=`,
/// verbatim.
fn file_value(contents: &str, key: &str) -> Option<String> {
    let prefix = format!("{key}=");
    contents
        .lines()
        .filter_map(|line| line.strip_prefix(prefix.as_str()))
        .last()
        .map(str::to_string)
}

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    FileRead(PathBuf, std::io::Error),
    MissingKey(PathBuf, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::MissingKey(path, key) => {
                write!(
                    f,
                    "Key {} not found in config file '{}'",
                    key,
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_parsing() {
        let contents = "PORT=4300\nSERVER_HOSTNAME=MYHOST\n";
        let config = Config::from_contents(
            contents,
            Path::new("server.conf"),
            ProtocolKind::Rental,
            "info",
        )
        .unwrap();

        assert_eq!(config.port, "4300");
        match config.protocol {
            Protocol::Rental { ref hostname } => assert_eq!(&**hostname, "MYHOST"),
            ref other => panic!("unexpected protocol: {:?}", other),
        }
    }

    #[test]
    fn test_missing_port_is_fatal() {
        let err = Config::from_contents(
            "SERVER_HOSTNAME=MYHOST\n",
            Path::new("server.conf"),
            ProtocolKind::Rental,
            "info",
        )
        .unwrap_err();

        match err {
            ConfigError::MissingKey(_, "PORT") => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_hostname_required_only_for_rental() {
        let contents = "PORT=4300\n";

        let err = Config::from_contents(
            contents,
            Path::new("server.conf"),
            ProtocolKind::Rental,
            "info",
        )
        .unwrap_err();
        match err {
            ConfigError::MissingKey(_, "SERVER_HOSTNAME") => {}
            other => panic!("unexpected error: {:?}", other),
        }

        let config = Config::from_contents(
            contents,
            Path::new("server.conf"),
            ProtocolKind::Echo,
            "info",
        )
        .unwrap();
        assert!(matches!(config.protocol, Protocol::Echo));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let contents = "PORT=1111\nPORT=2222\nSERVER_HOSTNAME=A\nSERVER_HOSTNAME=B\n";
        let config = Config::from_contents(
            contents,
            Path::new("server.conf"),
            ProtocolKind::Rental,
            "info",
        )
        .unwrap();

        assert_eq!(config.port, "2222");
        match config.protocol {
            Protocol::Rental { ref hostname } => assert_eq!(&**hostname, "B"),
            ref other => panic!("unexpected protocol: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_lines_ignored() {
        let contents = "# comment\nPORT=4300\nGARBAGE\nSERVER_HOSTNAME=MYHOST\n";
        let config = Config::from_contents(
            contents,
            Path::new("server.conf"),
            ProtocolKind::Rental,
            "info",
        )
        .unwrap();
        assert_eq!(config.port, "4300");
    }

    #[test]
    fn test_value_taken_verbatim() {
        // No trimming: an empty PORT= passes loading and fails later at bind.
        let config = Config::from_contents(
            "PORT=\n",
            Path::new("server.conf"),
            ProtocolKind::Echo,
            "info",
        )
        .unwrap();
        assert_eq!(config.port, "");
    }

    #[test]
    fn test_client_config_parsing() {
        let contents = "SERVER_IP=127.0.0.1\nSERVER_PORT=4300\n";
        let config = ClientConfig::from_contents(contents, Path::new("client.conf")).unwrap();
        assert_eq!(config.server_ip, "127.0.0.1");
        assert_eq!(config.server_port, "4300");
    }

    #[test]
    fn test_client_config_missing_key() {
        let err = ClientConfig::from_contents("SERVER_IP=127.0.0.1\n", Path::new("client.conf"))
            .unwrap_err();
        match err {
            ConfigError::MissingKey(_, "SERVER_PORT") => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
