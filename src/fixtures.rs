#[cfg(test)]
pub mod test {
    use confique::Config;
    use serde::{Deserialize, Serialize};

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct TestConfig {
        /// The application host.
        #[config(default = "localhost")]
        pub host: String,

        /// The port number.
        #[config(default = 8080)]
        pub port: u16,

        /// Enable debug mode.
        #[config(default = false)]
        pub debug: bool,

        /// Database settings.
        #[config(nested)]
        pub database: TestDbConfig,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct TestDbConfig {
        /// Connection string URL.
        pub url: Option<String>,

        /// Connection pool size.
        #[config(default = 5)]
        pub pool_size: usize,
    }

    #[test]
    fn test_config_loads_defaults() {
        let config = TestConfig::builder().load().unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.pool_size, 5);
    }

    // -- Fixture for tagged polymorphic values -----------------------------------

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    #[serde(tag = "_type_")]
    pub enum Endpoint {
        #[serde(rename = "tcp")]
        Tcp { host: String, port: u16 },
        #[serde(rename = "unix")]
        Unix { socket: String },
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct Service {
        pub name: String,
        pub endpoint: Endpoint,
        #[serde(default)]
        pub tags: Vec<String>,
    }

    impl Service {
        pub fn small() -> Self {
            Service {
                name: "small".into(),
                endpoint: Endpoint::Tcp {
                    host: "localhost".into(),
                    port: 8080,
                },
                tags: vec!["dev".into()],
            }
        }
    }

    // -- Fixture for checking partial trees after every argument ----------------

    #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
    #[serde(default, deny_unknown_fields)]
    pub struct Limits {
        pub workers: u32,
        pub ratio: f64,
    }
}
