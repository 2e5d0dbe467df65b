//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use hifi_config::{ConfigError, HiConfig};
use pretty_assertions::assert_eq;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/hifinder/db.sqlite"

[recommend]
range_min_pct = 15
range_max_pct = 5
per_category_limit = 3
max_per_brand = 1

[listings]
reddit_subreddit = "headphonemarket"
reverb_token = "rv-token"
stale_after_days = 14

[cache]
stats_ttl_secs = 60

[general]
default_limit = 50
user_id = "alice"
"#,
        )?;

        let config: HiConfig = Figment::from(Serialized::defaults(HiConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/hifinder/db.sqlite");
        assert_eq!(config.recommend.range_min_pct, 15);
        assert_eq!(config.recommend.range_max_pct, 5);
        assert_eq!(config.recommend.per_category_limit, 3);
        assert_eq!(config.recommend.max_per_brand, 1);
        assert_eq!(config.listings.reddit_subreddit, "headphonemarket");
        assert_eq!(config.listings.reverb_token(), Some("rv-token"));
        assert_eq!(config.listings.user_agent, "hifinder/0.1");
        assert_eq!(config.listings.stale_after_days, 14);
        assert_eq!(config.cache.stats_ttl_secs, 60);
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.general.user_id, "alice");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[recommend]\nmax_per_brand = 3\n")?;

        let config: HiConfig = Figment::from(Serialized::defaults(HiConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.recommend.max_per_brand, 3);
        assert_eq!(config.recommend.range_min_pct, 20);
        assert_eq!(config.general.user_id, "local");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".hifinder")?;
        jail.create_file(".hifinder/config.toml", "[general]\nuser_id = \"bob\"\n")?;

        let config = HiConfig::load().expect("config loads");
        assert_eq!(config.general.user_id, "bob");
        Ok(())
    });
}

#[test]
fn load_in_reads_other_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join(".hifinder")).expect("mkdir");
    std::fs::write(
        HiConfig::project_config_path(dir.path()),
        "[cache]\nstats_ttl_secs = 5\n",
    )
    .expect("write config");

    Jail::expect_with(|_jail| {
        let config = HiConfig::load_in(dir.path()).expect("config loads");
        assert_eq!(config.cache.stats_ttl_secs, 5);
        Ok(())
    });
}

#[test]
fn invalid_project_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".hifinder")?;
        jail.create_file(
            ".hifinder/config.toml",
            "[recommend]\nper_category_limit = 0\n",
        )?;

        let err = HiConfig::load().expect_err("zero limit rejected");
        assert!(
            matches!(&err, ConfigError::InvalidValue { field, .. } if field == "recommend.per_category_limit"),
            "unexpected error: {err}"
        );
        Ok(())
    });
}
