//! Packaging an icon-set into a single `.icns` file.
//!
//! The actual compilation is done by an external tool behind the
//! [`IconCompiler`] trait. On macOS that is `iconutil`, which wants a
//! directory named `*.iconset` holding the same `icon_{N}x{N}[@2x].png`
//! files the asset catalog uses.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::iconset::IconSetReport;

/// Result of one compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    pub success: bool,
    /// Diagnostic output of the tool; empty on a quiet success.
    pub diagnostics: String,
}

impl CompileOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            diagnostics: String::new(),
        }
    }

    pub fn failed(diagnostics: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Compiles a staged `.iconset` directory into a single icon bundle.
pub trait IconCompiler {
    /// Runs the compiler to completion.
    ///
    /// A tool that ran but failed is reported through the outcome, not as an
    /// error. `Err` means the tool could not be run at all.
    fn compile(&self, iconset: &Path, output: &Path) -> Result<CompileOutcome>;
}

// ============================================================================
// iconutil
// ============================================================================

/// The macOS `iconutil` command.
#[derive(Debug, Clone)]
pub struct Iconutil {
    program: PathBuf,
}

impl Default for Iconutil {
    fn default() -> Self {
        Self::new("iconutil")
    }
}

impl Iconutil {
    /// Uses `program` instead of `iconutil` from `PATH`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl IconCompiler for Iconutil {
    fn compile(&self, iconset: &Path, output: &Path) -> Result<CompileOutcome> {
        tracing::debug!(program = %self.program.display(), iconset = %iconset.display(), "running icon compiler");

        let result = Command::new(&self.program)
            .args(["-c", "icns"])
            .arg(iconset)
            .arg("-o")
            .arg(output)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if result.status.success() {
            return Ok(CompileOutcome::succeeded());
        }

        let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
        let diagnostics = if stderr.is_empty() {
            let stdout = String::from_utf8_lossy(&result.stdout).trim().to_string();
            if stdout.is_empty() {
                format!("exited with {}", result.status)
            } else {
                stdout
            }
        } else {
            stderr
        };
        Ok(CompileOutcome::failed(diagnostics))
    }
}

// ============================================================================
// Staging
// ============================================================================

/// Copies the manifest images of `report` into `<staging_root>/<app_name>.iconset`.
///
/// Returns the staging directory. Images missing from disk are skipped.
pub fn stage_iconset(report: &IconSetReport, staging_root: &Path, app_name: &str) -> Result<PathBuf> {
    let iconset = staging_root.join(format!("{app_name}.iconset"));
    fs::create_dir_all(&iconset).map_err(|e| Error::io(&iconset, e))?;

    for name in report.manifest.filenames() {
        let src = report.dir.join(name);
        if !src.is_file() {
            tracing::warn!("skipping missing icon {}", src.display());
            continue;
        }
        let dst = iconset.join(name);
        fs::copy(&src, &dst).map_err(|e| Error::io(&dst, e))?;
    }

    Ok(iconset)
}

/// Stages the icon-set in a temporary directory and compiles it to `output`.
///
/// A failed compile is logged together with the tool's diagnostics and
/// returned as the outcome; it does not abort the caller. The temporary
/// directory is removed before returning.
pub fn package_icns(
    report: &IconSetReport,
    compiler: &dyn IconCompiler,
    output: &Path,
    app_name: &str,
) -> Result<CompileOutcome> {
    let staging = tempfile::Builder::new()
        .prefix(app_name)
        .tempdir()
        .map_err(|e| Error::io(std::env::temp_dir(), e))?;
    let iconset = stage_iconset(report, staging.path(), app_name)?;

    tracing::info!("creating .icns file");
    let outcome = compiler.compile(&iconset, output)?;
    if outcome.success {
        tracing::info!("created {}", output.display());
    } else {
        tracing::error!("icon compiler failed: {}", outcome.diagnostics);
    }

    Ok(outcome)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iconset::{IconSetPlan, IconSetWriter};
    use crate::renderer::IconRenderer;
    use std::cell::RefCell;

    /// Records the staged directory contents instead of compiling.
    struct RecordingCompiler {
        staged: RefCell<Vec<String>>,
        outcome: CompileOutcome,
    }

    impl RecordingCompiler {
        fn new(outcome: CompileOutcome) -> Self {
            Self {
                staged: RefCell::new(Vec::new()),
                outcome,
            }
        }
    }

    impl IconCompiler for RecordingCompiler {
        fn compile(&self, iconset: &Path, _output: &Path) -> Result<CompileOutcome> {
            assert_eq!(iconset.extension().and_then(|e| e.to_str()), Some("iconset"));
            let mut names: Vec<_> = fs::read_dir(iconset)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            *self.staged.borrow_mut() = names;
            Ok(self.outcome.clone())
        }
    }

    fn small_report(dir: &Path) -> IconSetReport {
        IconSetWriter::new(IconSetPlan::from_edges(&[16, 1024]))
            .write(&mut IconRenderer::default(), dir)
            .unwrap()
    }

    #[test]
    fn stages_manifest_images_only() {
        let tmp = tempfile::tempdir().unwrap();
        let report = small_report(&tmp.path().join("set"));
        let staging = tmp.path().join("staging");

        let iconset = stage_iconset(&report, &staging, "Demo").unwrap();

        assert_eq!(iconset, staging.join("Demo.iconset"));
        assert!(iconset.join("icon_16x16.png").is_file());
        assert!(iconset.join("icon_16x16@2x.png").is_file());
        assert!(!iconset.join("icon_1024x1024.png").exists());
        assert!(!iconset.join("Contents.json").exists());
    }

    #[test]
    fn staging_skips_missing_files() {
        let tmp = tempfile::tempdir().unwrap();
        let report = small_report(&tmp.path().join("set"));
        fs::remove_file(report.dir.join("icon_16x16@2x.png")).unwrap();

        let iconset = stage_iconset(&report, &tmp.path().join("staging"), "Demo").unwrap();
        assert!(iconset.join("icon_16x16.png").is_file());
        assert!(!iconset.join("icon_16x16@2x.png").exists());
    }

    #[test]
    fn package_passes_staged_set_to_compiler() {
        let tmp = tempfile::tempdir().unwrap();
        let report = small_report(&tmp.path().join("set"));
        let compiler = RecordingCompiler::new(CompileOutcome::succeeded());

        let outcome =
            package_icns(&report, &compiler, &tmp.path().join("Demo.icns"), "Demo").unwrap();

        assert!(outcome.success);
        assert_eq!(
            *compiler.staged.borrow(),
            vec!["icon_16x16.png".to_string(), "icon_16x16@2x.png".to_string()]
        );
    }

    #[test]
    fn failed_compile_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let report = small_report(&tmp.path().join("set"));
        let compiler = RecordingCompiler::new(CompileOutcome::failed("Invalid Iconset."));

        let outcome =
            package_icns(&report, &compiler, &tmp.path().join("Demo.icns"), "Demo").unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.diagnostics, "Invalid Iconset.");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let tmp = tempfile::tempdir().unwrap();
        let compiler = Iconutil::new(tmp.path().join("no-such-iconutil"));

        let result = compiler.compile(tmp.path(), &tmp.path().join("out.icns"));
        assert!(matches!(result, Err(Error::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_reports_diagnostics() {
        // `false` ignores its arguments and exits with status 1
        let compiler = Iconutil::new("false");
        let tmp = tempfile::tempdir().unwrap();

        let outcome = compiler
            .compile(tmp.path(), &tmp.path().join("out.icns"))
            .unwrap();
        assert!(!outcome.success);
        assert!(outcome.diagnostics.contains("exited with"));
    }
}
