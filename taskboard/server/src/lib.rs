pub mod config {
    use serde::Deserialize;

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct Config {
        pub database_url: String,
        #[serde(default = "default_port")]
        pub port: u16,
    }

    impl Config {
        /// Loads configuration from environment variables (`DATABASE_URL`, `PORT`).
        pub fn from_env() -> anyhow::Result<Self> {
            Self::load_from(config::Environment::default())
        }

        /// Loads configuration from the given environment source.
        pub fn load_from(environment: config::Environment) -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(environment)
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }
    }

    fn default_port() -> u16 {
        3000
    }

}
pub mod entities;
pub mod task;
pub mod web;
