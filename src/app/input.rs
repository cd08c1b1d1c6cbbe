//! Input gating: resume file type and job description length

use super::App;
use crate::constants::{ALLOWED_EXTENSIONS, MIN_JOB_DESCRIPTION_CHARS};
use crate::error::{FileTypeError, SelectionError};
use crate::types::SelectedDocument;
use eframe::egui;
use std::path::Path;
use tracing::{debug, info, warn};

/// Lowercased text after the last dot, if any.
fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Check the extension before anything is read or uploaded.
pub fn check_extension(name: &str) -> Result<String, FileTypeError> {
    match file_extension(name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
        other => Err(FileTypeError {
            extension: other.unwrap_or_default(),
        }),
    }
}

pub fn validate_file(name: &str, payload: Vec<u8>) -> Result<SelectedDocument, FileTypeError> {
    let extension = check_extension(name)?;
    Ok(SelectedDocument {
        name: name.to_string(),
        extension,
        payload,
    })
}

/// Validate by name, then read the bytes from disk.
pub fn load_file(path: &Path) -> Result<SelectedDocument, SelectionError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    check_extension(&name)?;
    let payload = std::fs::read(path).map_err(|source| SelectionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(validate_file(&name, payload)?)
}

pub fn can_submit(doc: Option<&SelectedDocument>, job_text: &str) -> bool {
    doc.is_some() && job_text.trim().chars().count() > MIN_JOB_DESCRIPTION_CHARS
}

impl App {
    /// Recompute the submit-enabled flag. Called on every input change.
    pub fn validate_form(&mut self) {
        self.submit_enabled = can_submit(self.selected.as_ref(), &self.job_description);
    }

    /// Accept a resume from the file dialog or a drop. A rejected file leaves
    /// the current selection untouched.
    pub fn select_file(&mut self, path: &Path) {
        match load_file(path) {
            Ok(doc) => {
                info!(name = %doc.name, bytes = doc.payload.len(), "Resume selected");
                if let Some(dir) = path.parent() {
                    self.settings.last_open_dir = Some(dir.to_string_lossy().into_owned());
                }
                self.selected = Some(doc);
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Resume rejected");
                self.error_message = Some(e.to_string());
            }
        }
        self.validate_form();
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
        self.validate_form();
    }

    /// Track drag hover and take the first dropped file, if any.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context, accept: bool) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.first().cloned(),
            )
        });
        self.drop_hover = accept && hovering;

        let Some(file) = dropped.filter(|_| accept) else {
            return;
        };
        if let Some(path) = &file.path {
            self.select_file(path);
        } else if let Some(bytes) = &file.bytes {
            match validate_file(&file.name, bytes.to_vec()) {
                Ok(doc) => {
                    info!(name = %doc.name, bytes = doc.payload.len(), "Resume dropped");
                    self.selected = Some(doc);
                }
                Err(e) => {
                    warn!(error = %e, name = %file.name, extension = %e.extension, "Dropped file rejected");
                    self.error_message = Some(e.to_string());
                }
            }
            self.validate_form();
        }
    }

    pub fn open_file_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Select resume")
            .add_filter("Resume", ALLOWED_EXTENSIONS)
            .set_directory(self.settings.open_dir_or_default())
            .pick_file();
        match picked {
            Some(path) => self.select_file(&path),
            None => debug!("File dialog dismissed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> SelectedDocument {
        validate_file("cv.pdf", b"%PDF".to_vec()).unwrap()
    }

    #[test]
    fn accepts_allowed_extensions_case_insensitively() {
        for name in ["a.pdf", "b.DOCX", "c.Doc", "d.txt", "archive.v2.pdf"] {
            assert!(validate_file(name, Vec::new()).is_ok(), "{name} should pass");
        }
        assert_eq!(validate_file("CV.PDF", Vec::new()).unwrap().extension, "pdf");
    }

    #[test]
    fn rejects_other_extensions() {
        for name in ["photo.jpg", "resume", "resume.pdf.exe", "notes.md", ".pdf"] {
            assert!(validate_file(name, Vec::new()).is_err(), "{name} should fail");
        }
        let err = validate_file("photo.JPG", Vec::new()).unwrap_err();
        assert_eq!(err.extension, "jpg");
    }

    #[test]
    fn short_job_description_never_submits() {
        let d = doc();
        assert!(!can_submit(Some(&d), ""));
        assert!(!can_submit(Some(&d), &"x".repeat(50)));
        let padded = format!("   {}   ", "x".repeat(50));
        assert!(!can_submit(Some(&d), &padded));
        assert!(!can_submit(None, &"x".repeat(200)));
    }

    #[test]
    fn submit_needs_fifty_one_trimmed_chars() {
        let d = doc();
        assert!(can_submit(Some(&d), &"x".repeat(51)));
        assert!(can_submit(Some(&d), &format!("\n{}\n", "é".repeat(51))));
    }

    #[test]
    fn load_file_checks_extension_before_reading() {
        let err = load_file(Path::new("/definitely/not/here/photo.png")).unwrap_err();
        assert!(matches!(err, SelectionError::FileType(_)));

        let err = load_file(Path::new("/definitely/not/here/cv.pdf")).unwrap_err();
        assert!(matches!(err, SelectionError::Read { .. }));
    }

    #[test]
    fn load_file_reads_payload() {
        let path = std::env::temp_dir().join(format!("resume-match-{}.txt", std::process::id()));
        std::fs::write(&path, b"plain resume").unwrap();
        let doc = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(doc.extension, "txt");
        assert_eq!(doc.payload, b"plain resume");
    }
}
