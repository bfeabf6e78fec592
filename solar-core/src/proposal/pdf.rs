//! PDF conversion through the `wkhtmltopdf` executable.
//!
//! The proposal is rendered to HTML first and piped to `wkhtmltopdf` on
//! stdin. A missing or failing renderer surfaces as a typed error the UI
//! can show; it never takes the session down.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::ClientInfo;

/// Errors raised while converting the proposal to PDF.
#[derive(Debug, Error)]
pub enum PdfError {
    /// No usable wkhtmltopdf executable was found.
    #[error(
        "wkhtmltopdf not found; install it or pass its location with --wkhtmltopdf"
    )]
    RendererNotFound,

    /// The renderer ran but exited with a failure status.
    #[error("wkhtmltopdf failed ({status}): {stderr}")]
    RenderFailed { status: String, stderr: String },

    /// The renderer could not be started or written to.
    #[error("could not run wkhtmltopdf: {0}")]
    Io(#[from] io::Error),
}

// Install locations probed after PATH. The Windows entry matches the
// renderer's default installer target.
const KNOWN_LOCATIONS: &[&str] = &[
    "/usr/bin/wkhtmltopdf",
    "/usr/local/bin/wkhtmltopdf",
    "/opt/homebrew/bin/wkhtmltopdf",
    r"C:\Program Files\wkhtmltopdf\bin\wkhtmltopdf.exe",
];

/// Drives a located wkhtmltopdf binary.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    binary: PathBuf,
}

impl PdfRenderer {
    /// Uses the given executable without probing for it.
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Locates the renderer: the explicit override if given, then `PATH`,
    /// then the known install locations.
    pub fn discover(override_path: Option<&Path>) -> Result<Self, PdfError> {
        if let Some(path) = override_path {
            if path.is_file() {
                return Ok(Self::new(path.to_path_buf()));
            }
            warn!(path = %path.display(), "renderer override does not exist");
            return Err(PdfError::RendererNotFound);
        }

        let binary_name = if cfg!(windows) {
            "wkhtmltopdf.exe"
        } else {
            "wkhtmltopdf"
        };

        if let Some(paths) = std::env::var_os("PATH") {
            for dir in std::env::split_paths(&paths) {
                let candidate = dir.join(binary_name);
                if candidate.is_file() {
                    debug!(path = %candidate.display(), "found renderer on PATH");
                    return Ok(Self::new(candidate));
                }
            }
        }

        for location in KNOWN_LOCATIONS {
            let candidate = Path::new(location);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found renderer at known location");
                return Ok(Self::new(candidate.to_path_buf()));
            }
        }

        Err(PdfError::RendererNotFound)
    }

    /// Converts `html` to a PDF at `output`.
    pub fn render_to_file(
        &self,
        html: &str,
        output: &Path,
    ) -> Result<(), PdfError> {
        let mut child = Command::new(&self.binary)
            .args([
                "--quiet",
                "--enable-local-file-access",
                "--no-print-media-type",
                "--disable-smart-shrinking",
                "-",
            ])
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    PdfError::RendererNotFound
                } else {
                    PdfError::Io(e)
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A failing renderer may exit before reading all of stdin;
            // the broken pipe is reported through the exit status below.
            if let Err(e) = stdin.write_all(html.as_bytes()) {
                if e.kind() != io::ErrorKind::BrokenPipe {
                    return Err(PdfError::Io(e));
                }
                warn!("renderer closed stdin early");
            }
        }

        let result = child.wait_with_output()?;
        if !result.status.success() {
            return Err(PdfError::RenderFailed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        debug!(output = %output.display(), "proposal PDF written");
        Ok(())
    }
}

/// Default output file name for a client, e.g.
/// `Solar_Proposal_Jane_Doe.pdf`. Anything outside `[A-Za-z0-9]` in the
/// client name collapses to a single underscore.
pub fn default_file_name(client: &ClientInfo) -> String {
    let mut slug = String::new();
    let mut last_was_sep = true;
    for c in client.name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    let slug = slug.trim_end_matches('_');

    if slug.is_empty() {
        "Solar_Proposal.pdf".to_string()
    } else {
        format!("Solar_Proposal_{slug}.pdf")
    }
}
