use crate::output::generator::{CommentRecord, Output, generate_diff};
use crate::processor::ProcessedFile;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Applies processed files: writes stripped sources back, prints extracted comments
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    dry_run: bool,
    verbose: bool,
    backup: bool,
    json: bool,
}

#[derive(Serialize)]
struct RecordLine<'a> {
    path: String,
    #[serde(flatten)]
    record: &'a CommentRecord,
}

impl OutputWriter {
    pub fn new(dry_run: bool, verbose: bool) -> Self {
        Self {
            dry_run,
            verbose,
            ..Self::default()
        }
    }

    /// Copy the original to `<file>.bak` before overwriting it
    #[must_use]
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Print extracted comments as JSON lines
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn write_file(&self, processed_file: &ProcessedFile) -> Result<()> {
        match &processed_file.output {
            Output::Stripped(content) => self.write_stripped(processed_file, content),
            Output::Extracted(records) => self.print_records(&processed_file.path, records),
        }
    }

    fn write_stripped(&self, processed_file: &ProcessedFile, content: &str) -> Result<()> {
        let path = &processed_file.path;

        if !processed_file.modified() {
            if self.verbose {
                println!("✓ No changes needed: {}", path.display());
            }
            return Ok(());
        }

        if self.dry_run {
            println!("[DRY RUN] Would modify: {}", path.display());
            if self.verbose {
                println!(
                    "  Would remove {} comment(s)",
                    processed_file.stats.comments_removed
                );
                print!("{}", generate_diff(&processed_file.original_content, content));
            }
            return Ok(());
        }

        if self.backup {
            let backup_path = backup_path(path);
            std::fs::copy(path, &backup_path).with_context(|| {
                format!("Failed to create backup: {}", backup_path.display())
            })?;
            if self.verbose {
                println!("  Backup created: {}", backup_path.display());
            }
        }

        replace_contents(path, content)?;

        if self.verbose {
            println!(
                "✓ Modified: {} (removed {} comment(s), {} bytes, {:.1}%)",
                path.display(),
                processed_file.stats.comments_removed,
                processed_file.stats.bytes_saved(),
                processed_file.stats.reduction_percentage()
            );
        } else {
            println!("Modified: {}", path.display());
        }

        Ok(())
    }

    fn print_records(&self, path: &Path, records: &[CommentRecord]) -> Result<()> {
        for record in records {
            if self.json {
                let line = RecordLine {
                    path: path.display().to_string(),
                    record,
                };
                let json = serde_json::to_string(&line)
                    .context("Failed to serialize comment record")?;
                println!("{json}");
            } else {
                println!(
                    "{}:{}: [{}] {}",
                    path.display(),
                    record.start_line,
                    record.kind,
                    record.text
                );
            }
        }
        Ok(())
    }

    pub fn print_summary(&self, summary: &RunSummary) {
        if self.json {
            return;
        }

        let prefix = if self.dry_run { "[DRY RUN] " } else { "" };
        let verb = if self.dry_run { "would be modified" } else { "modified" };

        println!(
            "\n{prefix}Summary: {} files processed, {} {verb}",
            summary.processed_files, summary.modified_files
        );

        if summary.comments_extracted > 0 {
            println!("- Extracted {} comment(s)", summary.comments_extracted);
        }
        if summary.comments_removed > 0 {
            println!(
                "- Removed {} comment(s), {} bytes",
                summary.comments_removed, summary.bytes_saved
            );
        }
        if summary.warnings > 0 {
            println!("- {} scan warning(s)", summary.warnings);
        }
        if summary.failed_files > 0 {
            println!("- {} file(s) failed", summary.failed_files);
        }
    }
}

/// Write `content` to a temporary file beside `path`, then rename it over
/// `path`. The original stays intact if any step fails.
pub fn replace_contents(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let permissions = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?
        .permissions();

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    temp.write_all(content.as_bytes())
        .and_then(|()| temp.as_file().set_permissions(permissions))
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    temp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

/// `<file>.bak` next to the original
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Totals over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed_files: usize,
    pub modified_files: usize,
    pub failed_files: usize,
    pub comments_removed: usize,
    pub comments_extracted: usize,
    pub bytes_saved: usize,
    pub warnings: usize,
}

impl RunSummary {
    pub fn record(&mut self, processed_file: &ProcessedFile) {
        self.processed_files += 1;
        self.warnings += processed_file.warnings.len();

        match &processed_file.output {
            Output::Stripped(_) => {
                if processed_file.modified() {
                    self.modified_files += 1;
                }
                self.comments_removed += processed_file.stats.comments_removed;
                self.bytes_saved += processed_file.stats.bytes_saved();
            }
            Output::Extracted(records) => {
                self.comments_extracted += records.len();
            }
        }
    }

    pub fn record_failure(&mut self) {
        self.failed_files += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::options::ProcessOptions;
    use crate::processor::Processor;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path(Path::new("src/User.java")),
            PathBuf::from("src/User.java.bak")
        );
    }

    #[test]
    fn test_write_file_with_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.c");
        fs::write(&path, "int a; /* c */\n").unwrap();

        let processor = Processor::new(ProcessOptions::strip()).unwrap();
        let processed = processor.process_file(&path).unwrap();
        OutputWriter::new(false, false)
            .with_backup(true)
            .write_file(&processed)
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "int a; \n");
        assert_eq!(
            fs::read_to_string(dir.path().join("a.c.bak")).unwrap(),
            "int a; /* c */\n"
        );
    }

    #[test]
    fn test_replace_contents_leaves_no_temporary_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.ts");
        fs::write(&path, "x; // c\n").unwrap();

        replace_contents(&path, "x; \n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "x; \n");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_replace_contents_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("run.js");
        fs::write(&path, "#!/usr/bin/env node\n// c\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        replace_contents(&path, "#!/usr/bin/env node\n\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_replace_contents_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let error = replace_contents(&dir.path().join("gone.c"), "x").unwrap_err();
        assert!(error.to_string().contains("Failed to read metadata"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.go");
        fs::write(&path, "x := 1 // c\n").unwrap();

        let processor = Processor::new(ProcessOptions::strip()).unwrap();
        let processed = processor.process_file(&path).unwrap();
        OutputWriter::new(true, true).write_file(&processed).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "x := 1 // c\n");
        assert!(!dir.path().join("a.go.bak").exists());
    }

    #[test]
    fn test_run_summary() {
        let dir = tempdir().unwrap();
        let changed = dir.path().join("changed.js");
        let clean = dir.path().join("clean.js");
        fs::write(&changed, "a(); // one\n/* two */").unwrap();
        fs::write(&clean, "b();\n").unwrap();

        let processor = Processor::new(ProcessOptions::strip()).unwrap();
        let mut summary = RunSummary::default();
        summary.record(&processor.process_file(&changed).unwrap());
        summary.record(&processor.process_file(&clean).unwrap());
        summary.record_failure();

        assert_eq!(summary.processed_files, 2);
        assert_eq!(summary.modified_files, 1);
        assert_eq!(summary.comments_removed, 2);
        assert_eq!(summary.bytes_saved, "// one".len() + "/* two */".len());
        assert_eq!(summary.failed_files, 1);
    }

    #[test]
    fn test_record_line_json_shape() {
        let record = CommentRecord {
            kind: crate::models::segment::SegmentKind::LineComment,
            start_line: 3,
            text: "// hi".to_string(),
        };
        let line = RecordLine {
            path: "a.c".to_string(),
            record: &record,
        };
        let value: serde_json::Value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["path"], "a.c");
        assert_eq!(value["kind"], "line_comment");
        assert_eq!(value["start_line"], 3);
        assert_eq!(value["text"], "// hi");
    }
}
