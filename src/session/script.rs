use crate::console::Console;
use crate::logger::log_debug;
use crate::session::input::{InputSource, ScriptFrame};
use crate::session::models::ScriptError;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a script name to the identity used by the recursion guard.
///
/// Identity is the canonical path, so `./a.txt`, `a.txt` and a symlink to it
/// compare equal. Two distinct files with the same bytes do not.
pub fn resolve(file_name: &str) -> Result<PathBuf, ScriptError> {
    let path = Path::new(file_name);
    let not_found = || ScriptError::NotFound(path.to_path_buf());
    let identity = fs::canonicalize(path).map_err(|_| not_found())?;
    if !identity.is_file() {
        return Err(not_found());
    }
    Ok(identity)
}

/// Start running `file_name` on top of `source`.
///
/// Frames are only removed by `InputSource` when a script runs dry or when
/// the whole chain is drained.
pub fn enter(source: &mut InputSource, file_name: &str, console: &Console) -> Result<(), ScriptError> {
    let identity = resolve(file_name)?;
    if source.contains(&identity) {
        log_debug(&format!(
            "[script] recursion on '{}' at depth {}",
            identity.display(),
            source.depth()
        ));
        return Err(ScriptError::Recursive(PathBuf::from(file_name)));
    }
    let name = Path::new(file_name)
        .file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| file_name.to_string());
    let frame = ScriptFrame::open(identity.clone(), name.clone()).map_err(|err| ScriptError::Open {
        path: identity,
        source: err,
    })?;
    source.push_script(frame);
    console.notice(&format!("running script '{}'...", name));
    Ok(())
}
