use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Runtime configuration, layered as defaults < `config.toml` < `BLOCKHUB_*` env.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Max characters of user content copied into an audit message.
    pub audit_excerpt_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:mydb.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            audit_excerpt_len: 64,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("BLOCKHUB_"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_sources() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load()?;
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                loglevel = "debug"
                listen_addr = "127.0.0.1:7000"
                "#,
            )?;
            jail.set_env("BLOCKHUB_LISTEN_ADDR", "127.0.0.1:9000");
            jail.set_env("BLOCKHUB_AUDIT_EXCERPT_LEN", "8");

            let cfg = Config::load()?;
            assert_eq!(cfg.loglevel, "debug");
            assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
            assert_eq!(cfg.audit_excerpt_len, 8);
            assert_eq!(cfg.database_url, "sqlite:mydb.db");
            Ok(())
        });
    }
}
