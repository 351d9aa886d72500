use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of a project-local data directory
pub const LOCAL_DIR_NAME: &str = ".docket";

/// Environment variable that overrides the data directory
pub const DIR_ENV_VAR: &str = "DOCKET_DIR";

/// Log file written by the interactive mode
pub const LOG_FILE_NAME: &str = "docket.log";

/// Resolve the data directory: explicit flag, then `DOCKET_DIR`, then the nearest
/// `.docket` above the current directory, then `~/.docket`.
pub fn resolve_docket_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let from_env = env::var_os(DIR_ENV_VAR).map(PathBuf::from);
    let current_dir = env::current_dir().context("Could not determine current directory")?;

    if let Some(dir) = choose_dir(explicit, from_env, &current_dir) {
        return Ok(dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(LOCAL_DIR_NAME))
}

fn choose_dir(explicit: Option<PathBuf>, from_env: Option<PathBuf>, start_dir: &Path) -> Option<PathBuf> {
    explicit
        .or(from_env.filter(|p| !p.as_os_str().is_empty()))
        .or_else(|| find_local_docket(start_dir))
}

/// Walk up the directory tree looking for `.docket`
fn find_local_docket(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(LOCAL_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Ensure a directory exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Create `./.docket` in the current directory
pub fn init_local_docket() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    init_docket_in(&current_dir)
}

fn init_docket_in(parent: &Path) -> Result<PathBuf> {
    let dir = parent.join(LOCAL_DIR_NAME);

    if dir.exists() {
        anyhow::bail!("Docket directory already exists: {}", dir.display());
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    Ok(dir)
}

pub fn log_file(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_NAME)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> std::io::Result<()> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "file path has no parent directory")
    })?;

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        let chosen = choose_dir(
            Some(PathBuf::from("/tmp/flag")),
            Some(PathBuf::from("/tmp/env")),
            temp_dir.path(),
        );
        assert_eq!(chosen, Some(PathBuf::from("/tmp/flag")));
    }

    #[test]
    fn test_env_dir_beats_local() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join(LOCAL_DIR_NAME)).unwrap();

        let chosen = choose_dir(None, Some(PathBuf::from("/tmp/env")), temp_dir.path());
        assert_eq!(chosen, Some(PathBuf::from("/tmp/env")));

        // An empty variable counts as unset
        let chosen = choose_dir(None, Some(PathBuf::new()), temp_dir.path());
        assert_eq!(chosen, Some(temp_dir.path().join(LOCAL_DIR_NAME)));
    }

    #[test]
    fn test_local_dir_found_from_subdirectory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let local = temp_dir.path().join(LOCAL_DIR_NAME);
        fs::create_dir(&local).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_docket(&nested), Some(local));
    }

    #[test]
    fn test_init_refuses_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = init_docket_in(temp_dir.path()).unwrap();
        assert!(dir.is_dir());
        assert!(init_docket_in(temp_dir.path()).is_err());
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("todos");

        atomic_write(&file, "first").unwrap();
        atomic_write(&file, "second").unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "second");
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("x").join("y");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
