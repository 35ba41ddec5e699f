//! Workspace object metadata: object type, notebook language, export format

use std::path::Path;

/// Type of an object stored in the remote workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Notebook,
    Directory,
    Library,
    File,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Notebook => "NOTEBOOK",
            ObjectType::Directory => "DIRECTORY",
            ObjectType::Library => "LIBRARY",
            ObjectType::File => "FILE",
        }
    }

    pub fn parse(s: &str) -> Option<ObjectType> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NOTEBOOK" => Some(ObjectType::Notebook),
            "DIRECTORY" => Some(ObjectType::Directory),
            "LIBRARY" => Some(ObjectType::Library),
            "FILE" => Some(ObjectType::File),
            _ => None,
        }
    }
}

/// Notebook language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Scala,
    Sql,
    R,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "PYTHON",
            Language::Scala => "SCALA",
            Language::Sql => "SQL",
            Language::R => "R",
        }
    }

    pub fn parse(s: &str) -> Option<Language> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PYTHON" => Some(Language::Python),
            "SCALA" => Some(Language::Scala),
            "SQL" => Some(Language::Sql),
            "R" => Some(Language::R),
            _ => None,
        }
    }

    /// File extension used when exporting a notebook in `SOURCE` format
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => ".py",
            Language::Scala => ".scala",
            Language::Sql => ".sql",
            Language::R => ".r",
        }
    }
}

/// Import/export format of a notebook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Source,
    Html,
    Jupyter,
    Dbc,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Source => "SOURCE",
            ExportFormat::Html => "HTML",
            ExportFormat::Jupyter => "JUPYTER",
            ExportFormat::Dbc => "DBC",
        }
    }

    pub fn parse(s: &str) -> Option<ExportFormat> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOURCE" => Some(ExportFormat::Source),
            "HTML" => Some(ExportFormat::Html),
            "JUPYTER" => Some(ExportFormat::Jupyter),
            "DBC" => Some(ExportFormat::Dbc),
            _ => None,
        }
    }
}

impl Language {
    /// Infer notebook language and format from a local file name.
    ///
    /// Returns `None` for files that are not notebooks.
    pub fn infer(path: &Path) -> Option<(Language, ExportFormat)> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "py" => Some((Language::Python, ExportFormat::Source)),
            "scala" => Some((Language::Scala, ExportFormat::Source)),
            "sql" => Some((Language::Sql, ExportFormat::Source)),
            "r" | "R" => Some((Language::R, ExportFormat::Source)),
            "ipynb" => Some((Language::Python, ExportFormat::Jupyter)),
            _ => None,
        }
    }
}
