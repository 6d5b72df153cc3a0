//! HCL file parser implementation.
//!
//! This module walks a directory with `walkdir`, dispatches each file by
//! kind and parses configuration documents with the `hcl-rs` crate.

use crate::config::Config;
use crate::error::{BreakdownError, ErrorCollector, Result};
use crate::parser::{blocks, tfvars, FileKind, Parser};
use crate::types::Breakdown;

use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// HCL parser for Terraform/OpenTofu directories.
///
/// The parser walks directories in lexical order, reads `.tf`, `.tfvars`
/// and `.tfvars.json` files, and accumulates a single [`Breakdown`].
pub struct HclParser {
    /// Configuration for parsing behavior
    config: Config,
}

impl HclParser {
    /// Create a new HCL parser with the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Parse all Terraform files under a directory.
    ///
    /// Files that fail to parse are skipped with a warning; the scan
    /// itself only fails when the root can't be walked.
    ///
    /// # Errors
    ///
    /// Returns an error if the path doesn't exist, isn't a directory, or
    /// can't be read.
    pub fn parse_directory(&self, path: &Path) -> Result<Breakdown> {
        if !path.exists() {
            return Err(crate::err!(DirectoryNotFound {
                path: path.to_path_buf(),
            }));
        }
        if !path.is_dir() {
            return Err(crate::err!(NotADirectory {
                path: path.to_path_buf(),
            }));
        }

        let mut breakdown = Breakdown::new();
        let mut error_collector = ErrorCollector::new();
        let mut files = 0_usize;

        let mut walker = WalkDir::new(path)
            .follow_links(self.config.scan.follow_links)
            .sort_by_file_name();
        if let Some(max_depth) = self.config.scan.max_depth {
            walker = walker.max_depth(max_depth);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.should_skip(e))
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) if e.depth() == 0 => {
                    return Err(crate::err!(Walk {
                        path: path.to_path_buf(),
                        source: e,
                    }));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let Some(kind) = FileKind::of(entry.path()) else {
                continue;
            };

            let file_path = clean_path(entry.path());
            files += 1;

            let parsed = match kind {
                FileKind::VariableValues => tfvars::parse_value_file(&file_path, &mut breakdown),
                FileKind::Configuration => self.parse_file(&file_path, &mut breakdown),
            };

            match parsed {
                Ok(()) => tracing::info!(file = %file_path.display(), kind = ?kind, "Parsed"),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(file = %file_path.display(), "Error parsing file, skipping: {}", e);
                    error_collector.add(e);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            files,
            resources = breakdown.resources.len(),
            modules = breakdown.modules.len(),
            providers = breakdown.providers.len(),
            variables = breakdown.variables.len(),
            tfvars = breakdown.tfvars.len(),
            errors = error_collector.count(),
            "Parsing complete"
        );

        Ok(breakdown)
    }

    /// Parse a single Terraform configuration file into `breakdown`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn parse_file(&self, path: &Path, breakdown: &mut Breakdown) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BreakdownError::io(path, e, file!(), line!()))?;

        self.parse_content(&content, path, breakdown)
    }

    /// Check if a walked entry matches an exclusion pattern.
    fn should_skip(&self, entry: &DirEntry) -> bool {
        let Some(file_name) = entry.file_name().to_str() else {
            return false;
        };

        let excluded = self.config.scan.exclude_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(file_name))
                .unwrap_or(false)
        });

        if excluded {
            tracing::debug!(path = %entry.path().display(), reason = "matches exclude pattern", "Skipping path");
        }
        excluded
    }
}

impl Parser for HclParser {
    fn parse_content(&self, content: &str, file_path: &Path, breakdown: &mut Breakdown) -> Result<()> {
        let body = hcl::parse(content).map_err(|e| {
            BreakdownError::hcl_parse(file_path, e.to_string(), file!(), line!())
        })?;

        blocks::classify(&body, file_path, breakdown);
        Ok(())
    }
}

/// Drop `.` components so that scanning `.` records `main.tf`, not `./main.tf`.
fn clean_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_test_parser() -> HclParser {
        HclParser::new(&Config::default())
    }

    #[test]
    fn test_parse_content() {
        let parser = create_test_parser();
        let content = r#"
resource "aws_s3_bucket" "logs" {
  bucket = "my-logs"
}

module "vpc" {
  source = "terraform-aws-modules/vpc/aws"
}
"#;

        let mut breakdown = Breakdown::new();
        parser
            .parse_content(content, Path::new("main.tf"), &mut breakdown)
            .unwrap();

        assert_eq!(breakdown.resources.len(), 1);
        assert_eq!(breakdown.modules.len(), 1);
    }

    #[test]
    fn test_parse_invalid_hcl() {
        let parser = create_test_parser();
        let mut breakdown = Breakdown::new();

        let result = parser.parse_content("this is not valid { hcl", Path::new("bad.tf"), &mut breakdown);

        assert!(matches!(result, Err(BreakdownError::HclParse { .. })));
        assert!(breakdown.is_empty());
    }

    #[test]
    fn test_duplicate_attribute_skips_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.tf"),
            "resource \"null_resource\" \"dup\" {\n  name = \"a\"\n  name = \"b\"\n}\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.tf"), "resource \"null_resource\" \"ok\" {}\n").unwrap();

        let mut breakdown = Breakdown::new();
        let err = create_test_parser()
            .parse_file(&dir.path().join("a.tf"), &mut breakdown)
            .unwrap_err();
        assert!(matches!(err, BreakdownError::HclParse { .. }));
        assert!(breakdown.is_empty());

        let breakdown = create_test_parser().parse_directory(dir.path()).unwrap();
        assert_eq!(breakdown.resources.len(), 1);
        assert_eq!(breakdown.resources[0].name, "ok");
    }

    #[test]
    fn test_missing_directory() {
        let parser = create_test_parser();
        let err = parser.parse_directory(Path::new("definitely/not/here")).unwrap_err();
        assert!(matches!(err, BreakdownError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.tf");
        fs::write(&file, "").unwrap();

        let err = create_test_parser().parse_directory(&file).unwrap_err();
        assert!(matches!(err, BreakdownError::NotADirectory { .. }));
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".terraform")).unwrap();
        fs::write(
            dir.path().join(".terraform/cached.tf"),
            "resource \"null_resource\" \"cached\" {}\n",
        )
        .unwrap();
        fs::write(dir.path().join("main.tf"), "resource \"null_resource\" \"main\" {}\n").unwrap();

        let mut config = Config::default();
        config.scan.exclude_patterns = vec![".terraform".to_string()];
        let breakdown = HclParser::new(&config).parse_directory(dir.path()).unwrap();

        assert_eq!(breakdown.resources.len(), 1);
        assert_eq!(breakdown.resources[0].name, "main");
    }

    #[test]
    fn test_max_depth() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/top.tf"), "variable \"top\" {}\n").unwrap();
        fs::write(dir.path().join("a/b/deep.tf"), "variable \"deep\" {}\n").unwrap();

        let mut config = Config::default();
        config.scan.max_depth = Some(2);
        let breakdown = HclParser::new(&config).parse_directory(dir.path()).unwrap();

        assert_eq!(breakdown.variables.len(), 1);
        assert_eq!(breakdown.variables[0].name, "top");
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path(Path::new("./main.tf")), PathBuf::from("main.tf"));
        assert_eq!(clean_path(Path::new("infra/./env/main.tf")), PathBuf::from("infra/env/main.tf"));
        assert_eq!(clean_path(Path::new("infra/main.tf")), PathBuf::from("infra/main.tf"));
    }
}
