//! Filesystem driver
//!
//! Copies a local file or directory tree to a remote filesystem path and
//! back. Unlike workspace imports every file is copied verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::ports::{
    DeployAction, Deployed, DownloadReport, DriverError, DriverResult, FilesystemApi,
    ResourceDriver, ResourceRequest,
};
use crate::domain::value_objects::PhysicalId;

pub struct FilesystemDriver<A> {
    api: A,
}

impl<A: FilesystemApi> FilesystemDriver<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    fn upload_tree(&self, source: &Path, target: &str, overwrite: bool) -> DriverResult<()> {
        self.api.mkdirs(target)?;
        let walker = WalkBuilder::new(source)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| {
                let message = e.to_string();
                DriverError::io(
                    source,
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other(message)),
                )
            })?;
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
            let remote = format!("{}/{}", target.trim_end_matches('/'), relative.join("/"));

            if entry.file_type().is_some_and(|t| t.is_dir()) {
                self.api.mkdirs(&remote)?;
            } else {
                let contents = fs::read(path).map_err(|e| DriverError::io(path, e))?;
                self.api.put(&remote, &contents, overwrite)?;
            }
        }
        Ok(())
    }

    fn download_tree(
        &self,
        remote: &str,
        local: &Path,
        overwrite: bool,
        report: &mut DownloadReport,
    ) -> DriverResult<()> {
        fs::create_dir_all(local).map_err(|e| DriverError::io(local, e))?;
        for info in self.api.list(remote)? {
            let dst = local.join(info.basename());
            if info.is_dir {
                self.download_tree(&info.path, &dst, overwrite, report)?;
            } else if dst.exists() && !overwrite {
                report.warnings.push(format!(
                    "{} already exists locally as {}, skipped",
                    info.path,
                    dst.display()
                ));
            } else {
                self.download_file(&info.path, dst, report)?;
            }
        }
        Ok(())
    }

    fn download_file(
        &self,
        remote: &str,
        local: PathBuf,
        report: &mut DownloadReport,
    ) -> DriverResult<()> {
        let contents = self.api.read(remote)?;
        if let Some(parent) = local.parent() {
            fs::create_dir_all(parent).map_err(|e| DriverError::io(parent, e))?;
        }
        fs::write(&local, contents).map_err(|e| DriverError::io(&local, e))?;
        report.written.push(local);
        Ok(())
    }
}

impl<A: FilesystemApi> ResourceDriver for FilesystemDriver<A> {
    fn deploy(&self, request: &ResourceRequest<'_>) -> DriverResult<Deployed> {
        let source = request.local_path(request.required_str("source_path")?);
        let target = request.required_str("target_path")?;

        if source.is_dir() {
            self.upload_tree(&source, target, request.overwrite)?;
        } else {
            let contents = fs::read(&source).map_err(|e| DriverError::io(&source, e))?;
            self.api.put(target, &contents, request.overwrite)?;
        }

        let info = self.api.stat(target)?;
        let output = info.to_json();
        let action = match request.prior.and_then(PhysicalId::remote_path) {
            Some(previous) if previous == target => DeployAction::Updated,
            _ => DeployAction::Created,
        };
        Ok(Deployed::new(PhysicalId::path(target), output, action))
    }

    fn download(&self, request: &ResourceRequest<'_>) -> DriverResult<DownloadReport> {
        let local = request.local_path(request.required_str("source_path")?);
        let target = request.required_str("target_path")?;

        let mut report = DownloadReport::default();
        if self.api.stat(target)?.is_dir {
            self.download_tree(target, &local, request.overwrite, &mut report)?;
        } else if local.exists() && !request.overwrite {
            return Err(DriverError::LocalExists { path: local });
        } else {
            self.download_file(target, local, &mut report)?;
        }
        Ok(report)
    }
}
