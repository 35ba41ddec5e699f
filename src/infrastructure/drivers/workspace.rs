//! Workspace driver
//!
//! Syncs a local notebook file or directory tree to a workspace path and
//! back. Directory imports skip hidden entries and files whose extension
//! does not name a notebook language.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::ports::{
    DeployAction, Deployed, DownloadReport, DriverError, DriverResult, ResourceDriver,
    ResourceRequest, WorkspaceApi,
};
use crate::domain::value_objects::{ExportFormat, Language, ObjectType, PhysicalId};

pub struct WorkspaceDriver<A> {
    api: A,
}

/// Properties shared by deploy and download
struct WorkspaceAsset<'a> {
    source: PathBuf,
    target: &'a str,
    object_type: Option<ObjectType>,
    language: Option<Language>,
    format: Option<ExportFormat>,
}

impl<'a> WorkspaceAsset<'a> {
    fn from_request(request: &ResourceRequest<'a>) -> DriverResult<Self> {
        let source = request.local_path(request.required_str("source_path")?);
        let target = request.required_str_or("target_path", "workspace_path")?;
        let object_type = parse_property(request, "object_type", ObjectType::parse)?;
        if let Some(kind) = object_type {
            if !matches!(kind, ObjectType::Notebook | ObjectType::Directory) {
                return Err(DriverError::InvalidProperty {
                    property: "object_type".to_string(),
                    message: "must be NOTEBOOK or DIRECTORY".to_string(),
                });
            }
        }
        Ok(Self {
            source,
            target,
            object_type,
            language: parse_property(request, "language", Language::parse)?,
            format: parse_property(request, "format", ExportFormat::parse)?,
        })
    }
}

fn parse_property<T>(
    request: &ResourceRequest<'_>,
    property: &str,
    parse: fn(&str) -> Option<T>,
) -> DriverResult<Option<T>> {
    match request.optional_str(property)? {
        None => Ok(None),
        Some(raw) => parse(raw).map(Some).ok_or_else(|| DriverError::InvalidProperty {
            property: property.to_string(),
            message: format!("has unknown value '{}'", raw),
        }),
    }
}

fn walk_error(path: &Path, err: ignore::Error) -> DriverError {
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    DriverError::io(path, source)
}

/// Join a remote directory and a child name with `/` regardless of platform
fn remote_join(parent: &str, child: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), child)
}

fn remote_parent(path: &str) -> Option<&str> {
    match path.trim_end_matches('/').rfind('/') {
        Some(0) | None => None,
        Some(i) => Some(&path[..i]),
    }
}

impl<A: WorkspaceApi> WorkspaceDriver<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    fn import_notebook(
        &self,
        asset: &WorkspaceAsset<'_>,
        overwrite: bool,
    ) -> DriverResult<()> {
        let inferred = Language::infer(&asset.source);
        let format = asset
            .format
            .or(inferred.map(|(_, format)| format))
            .unwrap_or_default();
        let language = asset.language.or(inferred.map(|(language, _)| language));
        if language.is_none() && format == ExportFormat::Source {
            return Err(DriverError::missing("language"));
        }

        let content = fs::read(&asset.source).map_err(|e| DriverError::io(&asset.source, e))?;
        if let Some(parent) = remote_parent(asset.target) {
            self.api.mkdirs(parent)?;
        }
        self.api
            .import(asset.target, &content, language, format, overwrite)?;
        Ok(())
    }

    /// Returns one warning per skipped file
    fn import_directory(
        &self,
        source: &Path,
        target: &str,
        overwrite: bool,
    ) -> DriverResult<Vec<String>> {
        let mut warnings = Vec::new();
        self.api.mkdirs(target)?;

        let walker = WalkBuilder::new(source)
            .standard_filters(false)
            .hidden(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(source, e))?;
            if entry.depth() == 0 {
                continue;
            }
            let path = entry.path();
            let relative: Vec<String> = path
                .strip_prefix(source)
                .unwrap_or(path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let remote = remote_join(target, &relative.join("/"));

            if entry.file_type().is_some_and(|t| t.is_dir()) {
                self.api.mkdirs(&remote)?;
                continue;
            }

            let Some((language, format)) = Language::infer(path) else {
                warnings.push(format!(
                    "{} does not have a notebook extension (.py, .scala, .sql, .r, .ipynb), skipped",
                    path.display()
                ));
                continue;
            };
            let remote = match path.extension().and_then(|e| e.to_str()) {
                Some(ext) => remote
                    .strip_suffix(&format!(".{}", ext))
                    .unwrap_or(&remote)
                    .to_string(),
                None => remote,
            };
            let content = fs::read(path).map_err(|e| DriverError::io(path, e))?;
            self.api
                .import(&remote, &content, Some(language), format, overwrite)?;
        }
        Ok(warnings)
    }

    fn export_notebook(
        &self,
        remote: &str,
        local: &Path,
        format: ExportFormat,
        overwrite: bool,
    ) -> DriverResult<()> {
        if local.exists() && !overwrite {
            return Err(DriverError::LocalExists {
                path: local.to_path_buf(),
            });
        }
        let content = self.api.export(remote, format)?;
        if let Some(parent) = local.parent() {
            fs::create_dir_all(parent).map_err(|e| DriverError::io(parent, e))?;
        }
        fs::write(local, content).map_err(|e| DriverError::io(local, e))
    }

    fn export_directory(
        &self,
        remote: &str,
        local: &Path,
        overwrite: bool,
        report: &mut DownloadReport,
    ) -> DriverResult<()> {
        if local.is_file() {
            report.warnings.push(format!(
                "{} exists as a file, skipping remote subtree {}",
                local.display(),
                remote
            ));
            return Ok(());
        }
        fs::create_dir_all(local).map_err(|e| DriverError::io(local, e))?;

        for object in self.api.list(remote)? {
            let dst = local.join(object.basename());
            match object.object_type {
                Some(ObjectType::Directory) => {
                    self.export_directory(&object.path, &dst, overwrite, report)?
                }
                Some(ObjectType::Notebook) => {
                    let ext = object.language.map(|l| l.extension()).unwrap_or("");
                    let dst = PathBuf::from(format!("{}{}", dst.display(), ext));
                    match self.export_notebook(&object.path, &dst, ExportFormat::Source, overwrite)
                    {
                        Ok(()) => report.written.push(dst),
                        Err(DriverError::LocalExists { path }) => report.warnings.push(format!(
                            "{} already exists locally as {}, skipped",
                            object.path,
                            path.display()
                        )),
                        Err(e) => return Err(e),
                    }
                }
                _ => report.warnings.push(format!(
                    "{} is neither a directory nor a notebook, skipped",
                    object.path
                )),
            }
        }
        Ok(())
    }
}

impl<A: WorkspaceApi> ResourceDriver for WorkspaceDriver<A> {
    fn deploy(&self, request: &ResourceRequest<'_>) -> DriverResult<Deployed> {
        let asset = WorkspaceAsset::from_request(request)?;
        if !asset.source.exists() {
            return Err(DriverError::InvalidProperty {
                property: "source_path".to_string(),
                message: format!("{} does not exist", asset.source.display()),
            });
        }
        let object_type = asset.object_type.unwrap_or(if asset.source.is_dir() {
            ObjectType::Directory
        } else {
            ObjectType::Notebook
        });

        let warnings = match object_type {
            ObjectType::Directory => {
                self.import_directory(&asset.source, asset.target, request.overwrite)?
            }
            _ => {
                self.import_notebook(&asset, request.overwrite)?;
                Vec::new()
            }
        };

        let output = self.api.get_status(asset.target)?;
        let action = match request.prior.and_then(PhysicalId::remote_path) {
            Some(previous) if previous == asset.target => DeployAction::Updated,
            _ => DeployAction::Created,
        };
        Ok(Deployed::new(PhysicalId::path(asset.target), output, action).with_warnings(warnings))
    }

    fn download(&self, request: &ResourceRequest<'_>) -> DriverResult<DownloadReport> {
        let asset = WorkspaceAsset::from_request(request)?;
        let object_type = match asset.object_type {
            Some(kind) => kind,
            None if asset.source.is_dir() => ObjectType::Directory,
            None => self
                .api
                .get_status(asset.target)?
                .get("object_type")
                .and_then(|v| v.as_str())
                .and_then(ObjectType::parse)
                .unwrap_or(ObjectType::Notebook),
        };

        let mut report = DownloadReport::default();
        match object_type {
            ObjectType::Directory => {
                self.export_directory(asset.target, &asset.source, request.overwrite, &mut report)?
            }
            _ => {
                let format = asset.format.unwrap_or_default();
                self.export_notebook(asset.target, &asset.source, format, request.overwrite)?;
                report.written.push(asset.source);
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::drivers::testing::FakeWorkspace;
    use serde_json::{json, Map, Value};
    use tempfile::tempdir;

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn request<'a>(
        properties: &'a Map<String, Value>,
        base: &'a Path,
        prior: Option<&'a PhysicalId>,
        overwrite: bool,
    ) -> ResourceRequest<'a> {
        ResourceRequest {
            id: "notebooks",
            properties,
            prior,
            base_dir: base,
            overwrite,
        }
    }

    #[test]
    fn deploys_notebook_with_inferred_language() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ingest.py"), "print('hi')").unwrap();
        let api = FakeWorkspace::default();
        let driver = WorkspaceDriver::new(api.clone());
        let properties = props(json!({
            "source_path": "ingest.py",
            "target_path": "/Shared/etl/ingest"
        }));

        let deployed = driver
            .deploy(&request(&properties, dir.path(), None, false))
            .unwrap();

        assert_eq!(deployed.action, DeployAction::Created);
        assert_eq!(deployed.physical_id, PhysicalId::path("/Shared/etl/ingest"));
        assert_eq!(deployed.output["object_type"], "NOTEBOOK");
        assert_eq!(api.language("/Shared/etl/ingest"), Some(Language::Python));
        assert_eq!(api.object_type("/Shared/etl"), Some(ObjectType::Directory));
    }

    #[test]
    fn legacy_workspace_path_is_accepted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("q.sql"), "select 1").unwrap();
        let api = FakeWorkspace::default();
        let driver = WorkspaceDriver::new(api.clone());
        let properties = props(json!({"source_path": "q.sql", "workspace_path": "/Shared/q"}));

        driver
            .deploy(&request(&properties, dir.path(), None, false))
            .unwrap();

        assert_eq!(api.content("/Shared/q").as_deref(), Some("select 1"));
    }

    #[test]
    fn redeploy_to_recorded_path_is_an_update() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.scala"), "val x = 2").unwrap();
        let api = FakeWorkspace::default();
        api.insert_notebook("/Shared/a", Language::Scala, "val x = 1");
        let driver = WorkspaceDriver::new(api.clone());
        let properties = props(json!({"source_path": "a.scala", "target_path": "/Shared/a"}));
        let prior = PhysicalId::path("/Shared/a");

        let deployed = driver
            .deploy(&request(&properties, dir.path(), Some(&prior), true))
            .unwrap();

        assert_eq!(deployed.action, DeployAction::Updated);
        assert_eq!(api.content("/Shared/a").as_deref(), Some("val x = 2"));
    }

    #[test]
    fn existing_notebook_without_overwrite_is_a_remote_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "1").unwrap();
        let api = FakeWorkspace::default();
        api.insert_notebook("/Shared/a", Language::Python, "0");
        let driver = WorkspaceDriver::new(api.clone());
        let properties = props(json!({"source_path": "a.py", "target_path": "/Shared/a"}));

        let err = driver
            .deploy(&request(&properties, dir.path(), None, false))
            .unwrap_err();

        assert!(matches!(err, DriverError::Remote(_)));
        assert_eq!(api.content("/Shared/a").as_deref(), Some("0"));
    }

    #[test]
    fn unknown_extension_needs_explicit_language() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let driver = WorkspaceDriver::new(FakeWorkspace::default());
        let properties = props(json!({"source_path": "notes.txt", "target_path": "/Shared/n"}));

        let err = driver
            .deploy(&request(&properties, dir.path(), None, false))
            .unwrap_err();

        assert_eq!(err.to_string(), "missing required property 'language'");
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = tempdir().unwrap();
        let driver = WorkspaceDriver::new(FakeWorkspace::default());
        let properties = props(json!({"source_path": "gone.py", "target_path": "/Shared/g"}));

        let err = driver
            .deploy(&request(&properties, dir.path(), None, false))
            .unwrap_err();

        assert!(matches!(err, DriverError::InvalidProperty { ref property, .. } if property == "source_path"));
    }

    #[test]
    fn directory_deploy_strips_extensions_and_skips_hidden_and_unknown() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("nb");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::create_dir_all(src.join(".git")).unwrap();
        fs::write(src.join("a.py"), "a").unwrap();
        fs::write(src.join("sub/b.sql"), "b").unwrap();
        fs::write(src.join(".hidden.py"), "h").unwrap();
        fs::write(src.join(".git/config.py"), "g").unwrap();
        fs::write(src.join("README.md"), "r").unwrap();
        let api = FakeWorkspace::default();
        let driver = WorkspaceDriver::new(api.clone());
        let properties = props(json!({"source_path": "nb", "target_path": "/Shared/nb"}));

        let deployed = driver
            .deploy(&request(&properties, dir.path(), None, false))
            .unwrap();

        assert_eq!(api.content("/Shared/nb/a").as_deref(), Some("a"));
        assert_eq!(api.language("/Shared/nb/sub/b"), Some(Language::Sql));
        assert!(api.paths().iter().all(|p| !p.contains(".hidden") && !p.contains(".git")));
        assert!(api.content("/Shared/nb/README").is_none());
        assert_eq!(deployed.warnings.len(), 1);
        assert!(deployed.warnings[0].contains("README.md"));
        assert_eq!(deployed.output["object_type"], "DIRECTORY");
    }

    #[test]
    fn notebook_download_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "local").unwrap();
        let api = FakeWorkspace::default();
        api.insert_notebook("/Shared/a", Language::Python, "remote");
        let driver = WorkspaceDriver::new(api);
        let properties = props(json!({"source_path": "a.py", "target_path": "/Shared/a"}));

        let err = driver
            .download(&request(&properties, dir.path(), None, false))
            .unwrap_err();
        assert!(matches!(err, DriverError::LocalExists { .. }));
        assert_eq!(fs::read_to_string(dir.path().join("a.py")).unwrap(), "local");

        driver
            .download(&request(&properties, dir.path(), None, true))
            .unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a.py")).unwrap(), "remote");
    }

    #[test]
    fn directory_download_appends_language_extension() {
        let dir = tempdir().unwrap();
        let api = FakeWorkspace::default();
        api.insert_notebook("/Shared/nb/a", Language::Python, "a");
        api.insert_notebook("/Shared/nb/sub/b", Language::R, "b");
        let driver = WorkspaceDriver::new(api);
        let properties = props(json!({
            "source_path": "out",
            "target_path": "/Shared/nb",
            "object_type": "DIRECTORY"
        }));

        let report = driver
            .download(&request(&properties, dir.path(), None, false))
            .unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("out/a.py")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dir.path().join("out/sub/b.r")).unwrap(), "b");
        assert_eq!(report.written.len(), 2);
    }

    #[test]
    fn directory_download_skips_existing_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("out")).unwrap();
        fs::write(dir.path().join("out/a.py"), "mine").unwrap();
        let api = FakeWorkspace::default();
        api.insert_notebook("/Shared/nb/a", Language::Python, "theirs");
        let driver = WorkspaceDriver::new(api);
        let properties = props(json!({"source_path": "out", "target_path": "/Shared/nb"}));

        let report = driver
            .download(&request(&properties, dir.path(), None, false))
            .unwrap();

        assert!(report.written.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(fs::read_to_string(dir.path().join("out/a.py")).unwrap(), "mine");
    }

    #[test]
    fn rejects_unsupported_object_type() {
        let dir = tempdir().unwrap();
        let driver = WorkspaceDriver::new(FakeWorkspace::default());
        let properties = props(json!({
            "source_path": "x",
            "target_path": "/Shared/x",
            "object_type": "LIBRARY"
        }));

        let err = driver
            .deploy(&request(&properties, dir.path(), None, false))
            .unwrap_err();

        assert_eq!(err.to_string(), "property 'object_type' must be NOTEBOOK or DIRECTORY");
    }
}
