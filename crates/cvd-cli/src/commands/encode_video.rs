use std::path::{Path, PathBuf};

use anyhow::Context;
use base64::Engine as _;
use cvd_config::CvdConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EncodeVideoArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct EncodeVideoResponse {
    input: PathBuf,
    output: PathBuf,
    input_bytes: usize,
    encoded_bytes: usize,
}

/// Handle `cvd encode-video`.
pub fn handle(
    args: &EncodeVideoArgs,
    config: &CvdConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let input = args
        .input
        .clone()
        .unwrap_or_else(|| config.media.video_path.clone());
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| config.media.encoded_path.clone());

    let response = encode_file(&input, &output_path)?;
    output(&response, flags.format)
}

fn encode_file(input: &Path, output: &Path) -> anyhow::Result<EncodeVideoResponse> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("failed to read video at {}", input.display()))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    std::fs::write(output, &encoded)
        .with_context(|| format!("failed to write encoded video to {}", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        bytes = bytes.len(),
        "video encoded"
    );
    Ok(EncodeVideoResponse {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        input_bytes: bytes.len(),
        encoded_bytes: encoded.len(),
    })
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn writes_padded_standard_base64() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("heart.mp4");
        let output = dir.path().join("video_base64.txt");
        std::fs::write(&input, b"heart").unwrap();

        let response = encode_file(&input, &output).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "aGVhcnQ=");
        assert_eq!(response.input_bytes, 5);
        assert_eq!(response.encoded_bytes, 8);
    }

    #[test]
    fn binary_content_survives_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.bin");
        let output = dir.path().join("clip.txt");
        let bytes: Vec<u8> = (0..=255).collect();
        std::fs::write(&input, &bytes).unwrap();

        encode_file(&input, &output).unwrap();
        let encoded = std::fs::read_to_string(&output).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn missing_input_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.mp4");
        let error = encode_file(&input, &dir.path().join("out.txt")).unwrap_err();
        assert!(format!("{error:#}").contains("absent.mp4"));
        assert!(!dir.path().join("out.txt").exists());
    }
}
