//! Content catalog built from markdown files on disk.
//!
//! Slugs follow the site's collection loader: a `slug` frontmatter field wins,
//! otherwise the path relative to the collection root is slugified segment by
//! segment, without its extension and without a trailing `/index`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use garden_application::ContentCatalog;
use garden_core::{AppError, AppResult};
use garden_domain::Slug;
use tracing::warn;

const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];
const FRONTMATTER_FENCE: &str = "---";

/// Catalog of published content slugs loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct FilesystemContentCatalog {
    slugs: HashSet<String>,
}

impl FilesystemContentCatalog {
    /// Scans a collection directory for `.md` and `.mdx` entries.
    ///
    /// Files and directories whose name starts with `_` or `.` are skipped.
    pub fn load(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref();
        let mut files = Vec::new();
        collect_content_files(root, &mut files)?;

        let mut slugs = HashSet::with_capacity(files.len());
        for file in files {
            let source = fs::read_to_string(&file).map_err(|error| {
                AppError::Internal(format!(
                    "failed to read content file '{}': {error}",
                    file.display()
                ))
            })?;

            let slug = match frontmatter_slug(&source) {
                Some(slug) => slug,
                None => path_slug(root, &file)?,
            };

            if !slugs.insert(slug.clone()) {
                warn!(slug = %slug, path = %file.display(), "duplicate content slug ignored");
            }
        }

        Ok(Self { slugs })
    }

    /// Creates a catalog from known slugs.
    #[must_use]
    pub fn from_slugs<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slugs: slugs.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the number of published items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    /// Returns whether the catalog holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

#[async_trait]
impl ContentCatalog for FilesystemContentCatalog {
    async fn contains(&self, slug: &Slug) -> AppResult<bool> {
        Ok(self.slugs.contains(slug.as_str()))
    }
}

fn collect_content_files(directory: &Path, files: &mut Vec<PathBuf>) -> AppResult<()> {
    let entries = fs::read_dir(directory).map_err(|error| {
        AppError::Internal(format!(
            "failed to read content directory '{}': {error}",
            directory.display()
        ))
    })?;

    for entry in entries {
        let entry = entry.map_err(|error| {
            AppError::Internal(format!(
                "failed to read entry in '{}': {error}",
                directory.display()
            ))
        })?;
        let path = entry.path();
        let hidden = entry
            .file_name()
            .to_str()
            .is_none_or(|name| name.starts_with('_') || name.starts_with('.'));
        if hidden {
            continue;
        }

        if path.is_dir() {
            collect_content_files(&path, files)?;
        } else if path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| CONTENT_EXTENSIONS.contains(&extension))
        {
            files.push(path);
        }
    }

    Ok(())
}

fn frontmatter_slug(source: &str) -> Option<String> {
    let mut lines = source.lines();
    if lines.next()?.trim_end() != FRONTMATTER_FENCE {
        return None;
    }

    lines
        .take_while(|line| line.trim_end() != FRONTMATTER_FENCE)
        .find_map(|line| line.strip_prefix("slug:"))
        .map(|value| value.trim().trim_matches(|quote| quote == '"' || quote == '\''))
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn path_slug(root: &Path, file: &Path) -> AppResult<String> {
    let relative = file.strip_prefix(root).map_err(|error| {
        AppError::Internal(format!(
            "content file '{}' is outside '{}': {error}",
            file.display(),
            root.display()
        ))
    })?;
    let relative = relative.with_extension("");

    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| component.as_os_str().to_str())
        .map(slugify_segment)
        .collect();
    let slug = segments.join("/");

    Ok(match slug.strip_suffix("/index") {
        Some(parent) => parent.to_owned(),
        None => slug,
    })
}

fn slugify_segment(segment: &str) -> String {
    segment
        .chars()
        .filter_map(|character| {
            if character.is_alphanumeric() {
                Some(character.to_lowercase().collect::<String>())
            } else if character == '-' || character == '_' {
                Some(character.to_string())
            } else if character.is_whitespace() {
                Some("-".to_owned())
            } else {
                None
            }
        })
        .collect()
}
