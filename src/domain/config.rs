//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix service, command settings, and the directory source.

use serde::Deserialize;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommandsConfig {
    /// The command word the bot answers to in a room.
    #[serde(default = "default_command_name")]
    pub name: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            name: default_command_name(),
        }
    }
}

fn default_command_name() -> String {
    ".project".to_string()
}

/// Where the project directory data comes from. The file wins when it exists;
/// the environment variable is the fallback.
#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
    #[serde(default = "default_directory_file")]
    pub file: String,
    #[serde(default = "default_directory_env_var")]
    pub env_var: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            file: default_directory_file(),
            env_var: default_directory_env_var(),
        }
    }
}

fn default_directory_file() -> String {
    "data/projects.json".to_string()
}

fn default_directory_env_var() -> String {
    "PROJECTS_JSON".to_string()
}
