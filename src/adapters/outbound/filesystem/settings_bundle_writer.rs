use crate::adapters::outbound::formatters::PlistFormatter;
use crate::license_generation::domain::License;
use crate::ports::outbound::{LicenseWriter, ProgressReporter};
use crate::shared::error::LicenseGenError;
use crate::shared::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Characters left as-is in child file names: the URL path set minus `/`
const FILE_NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@')
    .remove(b'_')
    .remove(b'~');

/// SettingsBundleWriter adapter producing Settings.bundle license panes
///
/// Layout inside the output directory:
/// - `<prefix>.plist`: the index pane
/// - `<prefix>/<name>.plist`: one pane per license, `<name>` percent-encoded
///
/// Without an output path the documents are printed to stdout, each
/// announced by a `/// <file>` line on the reporter.
pub struct SettingsBundleWriter<PR: ProgressReporter + ?Sized> {
    prefix: String,
    output_path: Option<PathBuf>,
    reporter: Arc<PR>,
}

/// A rendered document and its path relative to the output directory
struct Document {
    relative_path: PathBuf,
    content: String,
}

impl<PR: ProgressReporter + ?Sized> SettingsBundleWriter<PR> {
    pub fn new(prefix: impl Into<String>, output_path: Option<PathBuf>, reporter: Arc<PR>) -> Self {
        Self {
            prefix: prefix.into(),
            output_path,
            reporter,
        }
    }

    fn index_file(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.plist", self.prefix))
    }

    fn child_directory(&self, base: &Path) -> PathBuf {
        base.join(&self.prefix)
    }

    fn render(&self, licenses: &[License]) -> Vec<Document> {
        let mut documents = vec![Document {
            relative_path: self.index_file(Path::new("")),
            content: PlistFormatter::index(&self.prefix, licenses),
        }];
        for license in licenses {
            let key = utf8_percent_encode(license.name(), FILE_NAME_ENCODE_SET);
            documents.push(Document {
                relative_path: self
                    .child_directory(Path::new(""))
                    .join(format!("{}.plist", key)),
                content: PlistFormatter::license(license),
            });
        }
        documents
    }

    fn print(&self, documents: &[Document]) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for document in documents {
            self.reporter
                .report(&format!("/// {}", document.relative_path.display()));
            writeln!(handle, "{}", document.content).map_err(|e| {
                LicenseGenError::FileWriteError {
                    path: PathBuf::from("<stdout>"),
                    details: e.to_string(),
                }
            })?;
        }
        Ok(())
    }

    /// Writes into a temporary directory next to the final location, then
    /// replaces the previous index and child directory
    fn write_to(&self, output_path: &Path, documents: &[Document]) -> Result<()> {
        if output_path.exists() && !output_path.is_dir() {
            return Err(LicenseGenError::InvalidPath {
                path: output_path.to_path_buf(),
                reason: "Output path exists and is not a directory".to_string(),
            }
            .into());
        }
        fs::create_dir_all(output_path).map_err(|e| write_error(output_path, e))?;

        let staging = tempfile::Builder::new()
            .prefix(".licensegen-")
            .tempdir_in(output_path)
            .map_err(|e| write_error(output_path, e))?;
        fs::create_dir(self.child_directory(staging.path()))
            .map_err(|e| write_error(staging.path(), e))?;

        for document in documents {
            self.reporter.report(&format!(
                "   creating... {}",
                document.relative_path.display()
            ));
            let path = staging.path().join(&document.relative_path);
            fs::write(&path, &document.content).map_err(|e| write_error(&path, e))?;
        }

        let index = self.index_file(output_path);
        if index.exists() {
            fs::remove_file(&index).map_err(|e| write_error(&index, e))?;
        }
        let children = self.child_directory(output_path);
        if children.exists() {
            fs::remove_dir_all(&children).map_err(|e| write_error(&children, e))?;
        }

        fs::rename(self.index_file(staging.path()), &index).map_err(|e| write_error(&index, e))?;
        fs::rename(self.child_directory(staging.path()), &children)
            .map_err(|e| write_error(&children, e))?;

        if let Err(e) = staging.close() {
            self.reporter.report_error(&format!(
                "⚠️  Warning: failed to remove temporary directory: {}",
                e
            ));
        }
        Ok(())
    }
}

fn write_error(path: &Path, error: io::Error) -> LicenseGenError {
    LicenseGenError::FileWriteError {
        path: path.to_path_buf(),
        details: error.to_string(),
    }
}

impl<PR: ProgressReporter + ?Sized> LicenseWriter for SettingsBundleWriter<PR> {
    fn write(&self, licenses: &[License]) -> Result<()> {
        let documents = self.render(licenses);
        match &self.output_path {
            Some(output_path) => {
                self.write_to(output_path, &documents)?;
                self.reporter.report_completion(&format!(
                    "✅ Wrote {} licenses to {}",
                    licenses.len(),
                    self.index_file(output_path).display()
                ));
                Ok(())
            }
            None => self.print(&documents),
        }
    }
}
