use std::path::Path;

/// Decides whether a configured tool path can be launched.
pub trait PathValidator {
    fn is_executable(&self, path: &Path) -> bool;
}

/// Checks the real file system: the path must be an existing regular file and, on unix, carry an
/// execute bit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPathValidator;

impl PathValidator for FsPathValidator {
    fn is_executable(&self, path: &Path) -> bool {
        let Ok(meta) = std::fs::metadata(path) else {
            return false;
        };
        if !meta.is_file() {
            return false;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            meta.permissions().mode() & 0o111 != 0
        }
        #[cfg(not(unix))]
        {
            true
        }
    }
}

impl<F> PathValidator for F
where
    F: Fn(&Path) -> bool,
{
    fn is_executable(&self, path: &Path) -> bool {
        self(path)
    }
}
