//! Temporary workspaces and stub oracles for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use salesman_core::SolverOracle;
use salesman_core::test_support::{EnumeratingOracle, ScriptedOracle, square_points};
use tempfile::TempDir;

use crate::CliError;
use crate::backend::OracleBuilder;
use crate::solve::SolveConfig;

#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write the corners of the test square as a points CSV.
    pub(super) fn square_points_csv(&self, name: &str) -> Utf8PathBuf {
        let path = self.path(name);
        salesman_data::write_points(&path, &square_points()).expect("write points");
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture");
}

/// Hands out test oracles instead of real backends.
#[derive(Debug, Clone)]
pub(super) enum StubOracleBuilder {
    Enumerating,
    Scripted(ScriptedOracle),
}

impl OracleBuilder for StubOracleBuilder {
    fn build(&self, _config: &SolveConfig) -> Result<Box<dyn SolverOracle>, CliError> {
        Ok(match self {
            Self::Enumerating => Box::new(EnumeratingOracle),
            Self::Scripted(oracle) => Box::new(oracle.clone()),
        })
    }
}
