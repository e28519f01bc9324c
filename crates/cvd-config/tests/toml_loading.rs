//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use std::path::PathBuf;

use cvd_config::CvdConfig;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_artifact_paths_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[artifacts]
encoders_path = "artifacts/encoders.json"
model_path = "artifacts/forest.json"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(CvdConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = CvdConfig::from_figment(&figment).expect("config loads");

        assert_eq!(
            config.artifacts.encoders_path,
            PathBuf::from("artifacts/encoders.json")
        );
        assert_eq!(
            config.artifacts.model_path,
            PathBuf::from("artifacts/forest.json")
        );
        assert_eq!(config.media.video_path, PathBuf::from("heart-animation.mp4"));
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.to_string_lossy());
        jail.create_dir(".cvd")?;
        jail.create_file(
            ".cvd/config.toml",
            r#"
[media]
video_path = "clip.mp4"
"#,
        )?;

        let config = CvdConfig::load().expect("config loads");
        assert_eq!(config.media.video_path, PathBuf::from("clip.mp4"));
        assert_eq!(config.media.encoded_path, PathBuf::from("video_base64.txt"));
        Ok(())
    });
}

#[test]
fn empty_path_in_toml_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[artifacts]
model_path = ""
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(CvdConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = CvdConfig::from_figment(&figment).expect_err("empty path should fail");
        assert!(err.to_string().contains("artifacts.model_path"));
        Ok(())
    });
}
