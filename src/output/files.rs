//! Per-item artifact files
//!
//! Every saved document produces `markdown/{slug}.md` and `yaml/{slug}.yaml`
//! under the output directory.

use crate::crawler::DiseaseLink;
use crate::extract::Document;
use crate::output::markdown::write_markdown;
use crate::output::traits::{DocumentSink, OutputResult};
use crate::output::yaml::write_yaml;
use crate::url::artifact_slug;
use std::fs;
use std::path::{Path, PathBuf};

/// [`DocumentSink`] writing markdown and YAML files
#[derive(Debug, Clone)]
pub struct FileExporter {
    markdown_dir: PathBuf,
    yaml_dir: PathBuf,
    namespace: String,
}

impl FileExporter {
    /// Creates the output directories and returns the exporter
    ///
    /// # Arguments
    ///
    /// * `root` - Output directory
    /// * `namespace` - Leaf namespace used to derive slugs from URLs
    pub fn create(root: &Path, namespace: &str) -> OutputResult<Self> {
        let markdown_dir = root.join("markdown");
        let yaml_dir = root.join("yaml");
        fs::create_dir_all(&markdown_dir)?;
        fs::create_dir_all(&yaml_dir)?;

        Ok(Self {
            markdown_dir,
            yaml_dir,
            namespace: namespace.to_string(),
        })
    }

    pub fn markdown_path(&self, slug: &str) -> PathBuf {
        self.markdown_dir.join(format!("{}.md", slug))
    }

    pub fn yaml_path(&self, slug: &str) -> PathBuf {
        self.yaml_dir.join(format!("{}.yaml", slug))
    }
}

impl DocumentSink for FileExporter {
    fn save(&mut self, link: &DiseaseLink, document: &Document) -> OutputResult<String> {
        let slug = artifact_slug(&link.name, &link.url, &self.namespace);

        let md_path = self.markdown_path(&slug);
        write_markdown(document, &md_path)?;
        tracing::debug!("Markdown exported to {}", md_path.display());

        let yaml_path = self.yaml_path(&slug);
        write_yaml(document, &yaml_path)?;
        tracing::debug!("Data exported to {}", yaml_path.display());

        Ok(slug)
    }
}
