//! Resolves contract names to compiled packages

use std::path::{Path, PathBuf};

use cargo_miden::{run, OutputType};
use miden_client::utils::Deserializable;
use miden_mast_package::Package;
use tracing::info;

use crate::DeploymentError;

pub const ARTIFACT_EXTENSION: &str = "masp";

/// Looks up compiled contract packages by contract name, building them from
/// source when a contracts directory is configured and the package is missing.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
    contracts_dir: Option<PathBuf>,
    release: bool,
}

impl ArtifactStore {
    pub fn new(artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
            contracts_dir: None,
            release: true,
        }
    }

    pub fn with_contracts_dir(mut self, contracts_dir: impl Into<PathBuf>, release: bool) -> Self {
        self.contracts_dir = Some(contracts_dir.into());
        self.release = release;
        self
    }

    /// Path of the prebuilt package for `contract_name`.
    pub fn artifact_path(&self, contract_name: &str) -> PathBuf {
        self.artifacts_dir
            .join(artifact_stem(contract_name))
            .with_extension(ARTIFACT_EXTENSION)
    }

    /// Path of the contract project `contract_name` would be built from, if any.
    pub fn project_dir(&self, contract_name: &str) -> Option<PathBuf> {
        self.contracts_dir
            .as_ref()
            .map(|dir| dir.join(artifact_stem(contract_name)))
    }

    pub fn load(&self, contract_name: &str) -> Result<Package, DeploymentError> {
        let path = self.artifact_path(contract_name);
        if path.is_file() {
            return read_package(&path);
        }

        match self.project_dir(contract_name) {
            Some(project) if project.join("Cargo.toml").is_file() => {
                info!(contract = contract_name, project = %project.display(), "building contract");
                build_project_in_dir(&project, self.release)
            }
            _ => Err(DeploymentError::ArtifactNotFound {
                contract: contract_name.to_string(),
                path,
            }),
        }
    }
}

/// Kebab-case file stem for a contract name, `GuessingGame` -> `guessing-game`.
pub fn artifact_stem(contract_name: &str) -> String {
    let mut stem = String::with_capacity(contract_name.len() + 4);
    let mut prev_lower = false;
    for c in contract_name.chars() {
        if c == '_' || c == ' ' {
            stem.push('-');
            prev_lower = false;
        } else if c.is_uppercase() {
            if prev_lower {
                stem.push('-');
            }
            stem.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            stem.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    stem
}

pub fn read_package(path: &Path) -> Result<Package, DeploymentError> {
    let bytes = std::fs::read(path)?;
    Package::read_from_bytes(&bytes).map_err(|e| DeploymentError::MalformedArtifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Compiles the contract project in `dir` with `cargo miden build` and loads the package.
pub fn build_project_in_dir(dir: &Path, release: bool) -> Result<Package, DeploymentError> {
    let profile = if release { "--release" } else { "--debug" };
    let manifest_path = dir.join("Cargo.toml");

    let args = vec![
        "cargo".to_string(),
        "miden".to_string(),
        "build".to_string(),
        profile.to_string(),
        "--manifest-path".to_string(),
        manifest_path.to_string_lossy().to_string(),
    ];

    let build_error = |reason: String| DeploymentError::Build {
        project: dir.to_path_buf(),
        reason,
    };

    let output = run(args.into_iter(), OutputType::Masm)
        .map_err(|e| build_error(e.to_string()))?
        .ok_or_else(|| build_error("cargo miden build produced no output".to_string()))?;

    let masm_path = match output {
        cargo_miden::CommandOutput::BuildCommandOutput { output } => match output {
            cargo_miden::BuildOutput::Masm { artifact_path } => artifact_path,
            other => return Err(build_error(format!("expected Masm output, got {other:?}"))),
        },
        other => return Err(build_error(format!("expected build output, got {other:?}"))),
    };

    read_package(&masm_path)
}
