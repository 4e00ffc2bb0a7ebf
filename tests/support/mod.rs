use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn ext_check() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ext-check"));
    cmd.env_remove("INTERPRET_EXT_STRICT")
        .env_remove("INTERPRET_EXT_MANIFESTS")
        .env("INTERPRET_EXT_LOG", "warn");
    cmd
}

/// Run a command and require a zero exit status.
pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn write_manifest(dir: &Path, file_name: &str, manifest: &Value) -> Result<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, serde_json::to_vec_pretty(manifest)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
