use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_server_ip")]
    pub server_ip: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Allowed browser origin; every origin is allowed when unset.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

fn default_port() -> u16 {
    8000
}
fn default_server_ip() -> String {
    "127.0.0.1".to_string()
}
fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    2
}
fn default_catalog_path() -> String {
    "catalog.yaml".to_string()
}

impl Config {
    pub fn load_envs() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Config for a given database with every other setting at its default.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            port: default_port(),
            server_ip: default_server_ip(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            catalog_path: default_catalog_path(),
            cors_origin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_settings() {
        let config: Config = envy::from_iter(vec![(
            "DATABASE_URL".to_string(),
            "postgres://localhost/jobs".to_string(),
        )])
        .unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.server_ip, "127.0.0.1");
        assert_eq!(config.catalog_path, "catalog.yaml");
        assert_eq!(config.cors_origin, None);
    }

    #[test]
    fn database_url_is_required() {
        let result = envy::from_iter::<_, Config>(Vec::<(String, String)>::new());
        assert!(result.is_err());
    }
}
