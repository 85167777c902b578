/// Build pipeline: sources -> dictionary -> one rendered file per `files` entry.
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::format::{Format, UnknownFormat};
use crate::loader::{load_dictionary, LoadError, LoaderOptions};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid tokens: {0}")]
    Load(#[from] LoadError),
    #[error("file '{}': {source}", destination.display())]
    Format {
        destination: PathBuf,
        #[source]
        source: UnknownFormat,
    },
}

/// One rendered output file, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub format: Format,
    pub token_count: usize,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub files: Vec<WrittenFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub token_count: usize,
}

/// Parse every token source file in order.
pub fn read_sources(paths: &[PathBuf]) -> Result<Vec<Value>, BuildError> {
    paths
        .iter()
        .map(|path| {
            debug!(path = %path.display(), "reading token source");
            let text = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| BuildError::Json {
                path: path.clone(),
                source,
            })
        })
        .collect()
}

/// Everything except the final write.
pub fn render(config: &BuildConfig) -> Result<Vec<RenderedFile>, BuildError> {
    let sources = read_sources(&config.source)?;
    let options = LoaderOptions {
        prefix: config.prefix.clone(),
    };
    let dictionary = load_dictionary(&sources, &options)?;
    info!(tokens = dictionary.len(), sources = sources.len(), "loaded dictionary");

    let header = config.header.to_header();
    config
        .files
        .iter()
        .map(|file| {
            let format: Format = file.format.parse().map_err(|source| BuildError::Format {
                destination: file.destination.clone(),
                source,
            })?;
            let selected = match &file.filter {
                Some(prefix) => dictionary.filter(prefix),
                None => dictionary.clone(),
            };
            Ok(RenderedFile {
                path: config.build_path.join(&file.destination),
                format,
                token_count: selected.len(),
                contents: format.render(&selected, &header),
            })
        })
        .collect()
}

/// Render and write every configured file, creating parent directories.
pub fn build(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    let rendered = render(config)?;
    let mut report = BuildReport::default();
    for file in rendered {
        write_file(&file.path, &file.contents)?;
        info!(
            path = %file.path.display(),
            format = %file.format,
            tokens = file.token_count,
            "wrote file"
        );
        report.files.push(WrittenFile {
            path: file.path,
            token_count: file.token_count,
        });
    }
    Ok(report)
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| BuildError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileConfig, HeaderConfig};

    fn config_for(dir: &Path, files: Vec<FileConfig>) -> BuildConfig {
        BuildConfig {
            source: vec![dir.join("tokens.json")],
            prefix: None,
            build_path: dir.join("dist"),
            header: HeaderConfig {
                lines: Some(vec!["test".into()]),
                show_timestamp: false,
            },
            files,
        }
    }

    #[test]
    fn test_render_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tokens.json"), r#"{"a": {"value": "1"}}"#).unwrap();
        let config = config_for(
            dir.path(),
            vec![FileConfig {
                destination: "a.scss".into(),
                format: "scss/variables".into(),
                filter: None,
            }],
        );
        let err = render(&config).unwrap_err();
        assert!(matches!(err, BuildError::Format { .. }));
        assert!(err.to_string().contains("scss/variables"));
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), vec![]);
        assert!(matches!(render(&config), Err(BuildError::Io { .. })));
    }

    #[test]
    fn test_bad_json_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tokens.json"), "{not json").unwrap();
        let config = config_for(dir.path(), vec![]);
        assert!(matches!(render(&config), Err(BuildError::Json { .. })));
    }

    #[test]
    fn test_render_filtered_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tokens.json"),
            r##"{"color": {"a": {"value": "#fff"}}, "space": {"s": {"value": "4px"}}}"##,
        )
        .unwrap();
        let config = config_for(
            dir.path(),
            vec![FileConfig {
                destination: "space.d.ts".into(),
                format: "ts".into(),
                filter: Some("space".into()),
            }],
        );
        let files = render(&config).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].token_count, 1);
        assert_eq!(
            files[0].contents,
            "// test\n\nexport declare const spaceS = \"4px\";\n"
        );
        assert_eq!(files[0].path, dir.path().join("dist").join("space.d.ts"));
    }
}
