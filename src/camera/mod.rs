//! Still image capture.
//!
//! Capturing is delegated to an external command (e.g. `fswebcam`),
//! configured as a template where `{output}` is replaced with the
//! destination path.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Placeholder replaced with the output file path.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Default capture command on Linux.
pub const DEFAULT_CAPTURE_COMMAND: &str = "fswebcam --no-banner -r 1920x1080 {output}";

/// Errors that can occur while capturing an image.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Capture command is empty")]
    EmptyCommand,

    #[error("Capture command must contain {{output}}")]
    MissingOutput,

    #[error("Capture tool '{tool}' failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("Capture tool '{tool}' did not write {path}")]
    NoImage { tool: String, path: PathBuf },

    #[error("Failed to run capture tool: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can take a still photo and write it to a file.
pub trait CaptureTool {
    /// Human-readable name for messages.
    fn name(&self) -> &str;

    /// Capture one image to `output`.
    fn capture(&self, output: &Path) -> Result<(), CaptureError>;
}

/// Capture by running a command template.
#[derive(Debug, Clone)]
pub struct CommandCamera {
    program: String,
    args: Vec<String>,
}

impl CommandCamera {
    /// Parse a whitespace-separated command template.
    ///
    /// The template must contain [`OUTPUT_PLACEHOLDER`] somewhere in its
    /// arguments.
    pub fn from_template(template: &str) -> Result<Self, CaptureError> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(CaptureError::EmptyCommand)?;
        let args: Vec<String> = parts.collect();
        if !args.iter().any(|a| a.contains(OUTPUT_PLACEHOLDER)) {
            return Err(CaptureError::MissingOutput);
        }
        Ok(Self { program, args })
    }

    fn args_for(&self, output: &Path) -> Vec<String> {
        let path = output.display().to_string();
        self.args
            .iter()
            .map(|a| a.replace(OUTPUT_PLACEHOLDER, &path))
            .collect()
    }
}

impl CaptureTool for CommandCamera {
    fn name(&self) -> &str {
        &self.program
    }

    fn capture(&self, output: &Path) -> Result<(), CaptureError> {
        let args = self.args_for(output);
        debug!(tool = %self.program, ?args, "capturing image");

        let result = Command::new(&self.program).args(&args).output()?;
        if !result.status.success() {
            return Err(CaptureError::ToolFailed {
                tool: self.program.clone(),
                message: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        if !output.exists() {
            return Err(CaptureError::NoImage {
                tool: self.program.clone(),
                path: output.to_path_buf(),
            });
        }
        Ok(())
    }
}

/// A fresh timestamped capture path inside `dir`.
pub fn capture_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    dir.join(format!("capture-{}.png", stamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_replaces_output() {
        let camera = CommandCamera::from_template(DEFAULT_CAPTURE_COMMAND).unwrap();
        assert_eq!(camera.name(), "fswebcam");
        let args = camera.args_for(Path::new("/tmp/shot.png"));
        assert_eq!(args.last().map(String::as_str), Some("/tmp/shot.png"));
    }

    #[test]
    fn placeholder_inside_argument_is_replaced() {
        let camera = CommandCamera::from_template("grab --out={output}").unwrap();
        assert_eq!(camera.args_for(Path::new("a.png")), vec!["--out=a.png"]);
    }

    #[test]
    fn empty_template_is_rejected() {
        assert!(matches!(
            CommandCamera::from_template("   "),
            Err(CaptureError::EmptyCommand)
        ));
    }

    #[test]
    fn template_without_output_is_rejected() {
        assert!(matches!(
            CommandCamera::from_template("fswebcam -r 640x480"),
            Err(CaptureError::MissingOutput)
        ));
    }

    #[test]
    fn missing_program_is_io_error() {
        let camera = CommandCamera::from_template("definitely-not-a-camera {output}").unwrap();
        let err = camera.capture(Path::new("/tmp/never.png")).unwrap_err();
        assert!(matches!(err, CaptureError::Io(_)));
    }

    #[test]
    fn capture_path_is_png_in_dir() {
        let path = capture_path(Path::new("/tmp"));
        assert!(path.starts_with("/tmp"));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    }
}
