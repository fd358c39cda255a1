//! HTML report output
//!
//! Writes `index.html` plus one page per checked file under `src/`. Templates
//! are read from `<config>/templates/<name>/`; the `default` template falls
//! back to the copy built into the binary.

use chrono::Local;
use minijinja::{context, Environment};
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::DEFAULT_TEMPLATE;
use crate::error::{FintError, Result};
use crate::rules::results::{LineViolations, LintResults};

const INDEX_TEMPLATE: &str = "index.html";
const SRC_TEMPLATE: &str = "src.html";
const TEMPLATES_DIR: &str = "templates";

const DEFAULT_INDEX: &str = include_str!("templates/index.html");
const DEFAULT_SRC: &str = include_str!("templates/src.html");

#[derive(Debug)]
pub struct HtmlReport {
    dir: PathBuf,
    force: bool,
    index: String,
    src: String,
    /// Template directory whose extra files are copied into the report
    assets: Option<PathBuf>,
}

#[derive(Serialize)]
struct FileEntry {
    path: String,
    href: String,
    count: usize,
}

#[derive(Serialize)]
struct LineEntry<'a> {
    number: usize,
    text: &'a str,
    messages: Vec<&'a str>,
}

impl HtmlReport {
    /// Resolve the template and make sure the report can be written. Call
    /// this before checking so a collision fails before any file is touched.
    pub fn prepare(dir: &Path, config_root: &Path, template: &str, force: bool) -> Result<Self> {
        if dir.exists() && !force {
            return Err(FintError::ReportDirExists {
                path: dir.to_path_buf(),
            });
        }

        let template_dir = config_root.join(TEMPLATES_DIR).join(template);
        let index_path = template_dir.join(INDEX_TEMPLATE);
        let src_path = template_dir.join(SRC_TEMPLATE);

        let (index, src, assets) = if index_path.is_file() && src_path.is_file() {
            debug!(template = %template_dir.display(), "Using report template");
            (
                fs::read_to_string(&index_path)?,
                fs::read_to_string(&src_path)?,
                Some(template_dir),
            )
        } else if template == DEFAULT_TEMPLATE {
            debug!("Using built-in report template");
            (DEFAULT_INDEX.to_string(), DEFAULT_SRC.to_string(), None)
        } else {
            return Err(FintError::TemplateNotFound {
                name: template.to_string(),
            });
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            force,
            index,
            src,
            assets,
        })
    }

    /// Render the report for `results`. Paths are shown relative to `src_root`.
    pub fn write(&self, results: &LintResults, src_root: &Path) -> Result<()> {
        if self.dir.exists() {
            if !self.force {
                return Err(FintError::ReportDirExists {
                    path: self.dir.clone(),
                });
            }
            fs::remove_dir_all(&self.dir)?;
        }
        fs::create_dir_all(&self.dir)?;

        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, &self.index)?;
        env.add_template(SRC_TEMPLATE, &self.src)?;

        self.copy_assets()?;

        let mut files = Vec::with_capacity(results.files().len());
        for (path, lines) in results.files() {
            let rel = relative_path(path, src_root);
            let href = format!("src/{}.html", url_path(&rel));
            self.write_source_page(&env, path, &rel, lines)?;

            files.push(FileEntry {
                path: url_path(&rel),
                href,
                count: lines.values().map(Vec::len).sum(),
            });
        }

        let index = env.get_template(INDEX_TEMPLATE)?.render(context! {
            target => results.target_id(),
            locale => results.locale(),
            generated_at => Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_count => results.total_count(),
            fixed_count => results.fixed_count(),
            dirty_count => results.files_with_violations(),
            files => files,
        })?;
        fs::write(self.dir.join(INDEX_TEMPLATE), index)?;

        info!(dir = %self.dir.display(), files = results.checked_file_count(), "HTML report written");
        Ok(())
    }

    fn write_source_page(
        &self,
        env: &Environment<'_>,
        path: &Path,
        rel: &Path,
        violations: &LineViolations,
    ) -> Result<()> {
        let bytes = fs::read(path).map_err(|source| FintError::CannotOpenFile {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let lines: Vec<LineEntry<'_>> = content
            .lines()
            .enumerate()
            .map(|(i, text)| LineEntry {
                number: i + 1,
                text,
                messages: violations
                    .get(&(i + 1))
                    .map(|vs| vs.iter().map(|v| v.message.as_str()).collect())
                    .unwrap_or_default(),
            })
            .collect();

        let depth = rel.components().count();
        let page = env.get_template(SRC_TEMPLATE)?.render(context! {
            path => url_path(rel),
            index_href => format!("{}{}", "../".repeat(depth), INDEX_TEMPLATE),
            lines => lines,
        })?;

        let out = self.dir.join("src").join(format!("{}.html", rel.to_string_lossy()));
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(out, page)?;
        Ok(())
    }

    fn copy_assets(&self) -> Result<()> {
        let Some(template_dir) = &self.assets else {
            return Ok(());
        };

        for entry in WalkDir::new(template_dir).min_depth(1) {
            let entry = entry.map_err(|e| FintError::Io(e.into()))?;
            let rel = entry.path().strip_prefix(template_dir).unwrap_or(entry.path());
            if rel == Path::new(INDEX_TEMPLATE) || rel == Path::new(SRC_TEMPLATE) {
                continue;
            }

            let target = self.dir.join(rel);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }
}

/// `path` relative to `root`, or its file name when it is the root itself
fn relative_path(path: &Path, root: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf()),
    }
}

fn url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
