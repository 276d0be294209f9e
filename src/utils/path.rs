use glob::glob;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

/// Expand files, directories and glob patterns into a sorted, de-duplicated file list.
///
/// Directories are walked recursively; `.git` directories are always skipped
/// and, when `respect_gitignore` is set, so is anything matched by the
/// `.gitignore` files between the directory and its repository root.
pub fn expand_paths(patterns: &[String], respect_gitignore: bool) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if is_glob_pattern(pattern) {
            match glob(pattern) {
                Ok(entries) => {
                    paths.extend(entries.flatten().filter(|entry| entry.is_file()));
                }
                Err(err) => warn!("Invalid pattern '{}': {}", pattern, err),
            }
            continue;
        }

        let path = PathBuf::from(pattern);
        if path.is_file() {
            paths.push(path);
        } else if path.is_dir() {
            collect_dir(&path, respect_gitignore, &mut paths);
        } else {
            warn!("No such file or directory: {}", pattern);
        }
    }

    paths.sort();
    paths.dedup();
    paths
}

fn collect_dir(dir: &Path, respect_gitignore: bool, files: &mut Vec<PathBuf>) {
    let absolute_dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    let gitignore = if respect_gitignore {
        create_gitignore_matcher(&absolute_dir)
    } else {
        Gitignore::empty()
    };

    let walker = WalkDir::new(dir).into_iter().filter_entry(|entry| {
        if entry.file_type().is_dir() && entry.file_name() == ".git" {
            return false;
        }
        if !respect_gitignore || entry.depth() == 0 {
            return true;
        }

        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let absolute = absolute_dir.join(relative);
        !gitignore
            .matched_path_or_any_parents(&absolute, entry.file_type().is_dir())
            .is_ignore()
    });

    for entry in walker.flatten() {
        if entry.file_type().is_file() && entry.file_name() != ".gitignore" {
            files.push(entry.into_path());
        }
    }
}

/// Creates a gitignore matcher from every `.gitignore` between `dir` and the
/// enclosing repository root. Without a repository only `dir/.gitignore` counts.
pub fn create_gitignore_matcher(dir: &Path) -> Gitignore {
    let root = dir
        .ancestors()
        .find(|ancestor| ancestor.join(".git").exists())
        .unwrap_or(dir);

    let mut builder = GitignoreBuilder::new(root);
    for ancestor in dir.ancestors() {
        let gitignore = ancestor.join(".gitignore");
        if gitignore.is_file() {
            if let Some(err) = builder.add(&gitignore) {
                warn!("Failed to read {}: {}", gitignore.display(), err);
            } else {
                debug!(path = %gitignore.display(), "loaded gitignore");
            }
        }
        if ancestor == root {
            break;
        }
    }

    builder.build().unwrap_or_else(|_| Gitignore::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_expand_paths() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let file1_path = dir_path.join("Test1.java");
        let file2_path = dir_path.join("Test2.java");
        let file3_path = dir_path.join("test3.js");

        fs::write(&file1_path, "// test").unwrap();
        fs::write(&file2_path, "// test").unwrap();
        fs::write(&file3_path, "// test").unwrap();

        let pattern1 = file1_path.to_str().unwrap().to_string();
        let expanded1 = expand_paths(&[pattern1], true);
        assert_eq!(expanded1, vec![file1_path.clone()]);

        let pattern2 = format!("{}/*.java", dir_path.to_str().unwrap());
        let expanded2 = expand_paths(&[pattern2.clone()], true);
        assert_eq!(expanded2.len(), 2);
        assert!(expanded2.contains(&file1_path));
        assert!(expanded2.contains(&file2_path));

        let pattern3 = format!("{}/*.js", dir_path.to_str().unwrap());
        let expanded3 = expand_paths(&[pattern2.clone(), pattern3, pattern2], true);
        assert_eq!(expanded3.len(), 3);
        assert!(expanded3.contains(&file3_path));
    }

    #[test]
    fn test_directory_respects_gitignore() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("build")).unwrap();
        fs::write(dir.path().join(".gitignore"), "build/\nignored.c\n").unwrap();
        fs::write(dir.path().join("kept.c"), "").unwrap();
        fs::write(dir.path().join("ignored.c"), "").unwrap();
        fs::write(dir.path().join("build").join("gen.c"), "").unwrap();
        fs::write(dir.path().join(".git").join("config"), "").unwrap();

        let root = dir.path().to_str().unwrap().to_string();

        let files = expand_paths(std::slice::from_ref(&root), true);
        assert_eq!(files.len(), 1, "got {files:?}");
        assert!(files[0].ends_with("kept.c"));

        let files = expand_paths(&[root], false);
        assert_eq!(files.len(), 3, "got {files:?}");
        assert!(!files.iter().any(|f| f.ends_with(".gitignore")));
        assert!(!files.iter().any(|f| f.ends_with("config")));
    }

    #[test]
    fn test_gitignore_from_parent_directory() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("subfolder");
        fs::create_dir_all(sub.join(".next")).unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), ".next\n").unwrap();
        fs::write(sub.join("main.js"), "").unwrap();
        fs::write(sub.join(".next").join("chunk.js"), "").unwrap();

        let files = expand_paths(&[sub.to_str().unwrap().to_string()], true);
        assert_eq!(files.len(), 1, "got {files:?}");
        assert!(files[0].ends_with("main.js"));
    }

    #[test]
    fn test_missing_path_is_skipped() {
        let files = expand_paths(&["/no/such/path/anywhere.c".to_string()], true);
        assert!(files.is_empty());
    }
}
