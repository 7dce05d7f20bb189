//! Spawning the `cbc` executable.

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
    time::Duration,
};

use crate::CbcError;

/// One `cbc` executable, run in batch mode.
pub(crate) struct CbcProcess {
    exe_path: PathBuf,
}

impl CbcProcess {
    pub(crate) const fn new(exe_path: PathBuf) -> Self {
        Self { exe_path }
    }

    /// Run `cbc <model> [sec <limit>] solve solu <solution>`.
    pub(crate) fn run(
        &self,
        model_path: &Path,
        solution_path: &Path,
        time_limit: Option<Duration>,
    ) -> Result<Output, CbcError> {
        let mut command = Command::new(&self.exe_path);
        command.arg(model_path);
        if let Some(limit) = time_limit {
            command.arg("sec").arg(limit.as_secs_f64().to_string());
        }
        command.arg("solve").arg("solu").arg(solution_path);
        log::debug!("running {command:?}");

        let output = command.output().map_err(|source| CbcError::Spawn {
            path: self.exe_path.clone(),
            source,
        })?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(CbcError::ProcessFailed {
                status: output.status.to_string(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}
