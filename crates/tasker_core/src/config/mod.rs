use crate::error::AppError;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "tasker";
const DATA_FILE_NAME: &str = "tasks.json";
const DATA_FILE_ENV_VAR: &str = "TASKER_DATA_FILE";

/// Where the task document lives.
///
/// `TASKER_DATA_FILE` wins when set; otherwise the per-user data directory is
/// used (`%APPDATA%` on Windows, `$XDG_DATA_HOME` or `~/.local/share` elsewhere).
pub fn data_file_path() -> Result<PathBuf, AppError> {
    resolve_data_file(|key| std::env::var(key).ok(), cfg!(windows))
}

fn resolve_data_file<F>(env: F, windows: bool) -> Result<PathBuf, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = non_blank(&env, DATA_FILE_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    let dir = if windows {
        roaming_app_data(&env)?
    } else if let Some(xdg) = non_blank(&env, "XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else {
        home_dir(&env)?.join(".local").join("share")
    };

    Ok(dir.join(APP_DIR_NAME).join(DATA_FILE_NAME))
}

fn roaming_app_data<F>(env: &F) -> Result<PathBuf, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match non_blank(env, "APPDATA") {
        Some(appdata) => Ok(PathBuf::from(appdata)),
        None => Ok(home_dir(env)?.join("AppData").join("Roaming")),
    }
}

fn home_dir<F>(env: &F) -> Result<PathBuf, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(env, "HOME")
        .or_else(|| non_blank(env, "USERPROFILE"))
        .map(PathBuf::from)
        .ok_or_else(|| AppError::invalid_data("HOME is not set"))
}

fn non_blank<F>(env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(key).filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::resolve_data_file;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn data_file_override_takes_precedence() {
        let env = env_of(&[
            ("TASKER_DATA_FILE", "/tmp/custom.json"),
            ("XDG_DATA_HOME", "/xdg"),
            ("HOME", "/home/demo"),
        ]);

        let path = resolve_data_file(env, false).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn data_file_uses_xdg_data_home() {
        let env = env_of(&[("XDG_DATA_HOME", "/xdg"), ("HOME", "/home/demo")]);

        let path = resolve_data_file(env, false).unwrap();
        assert_eq!(path, PathBuf::from("/xdg/tasker/tasks.json"));
    }

    #[test]
    fn data_file_defaults_under_home() {
        let env = env_of(&[("TASKER_DATA_FILE", "  "), ("HOME", "/home/demo")]);

        let path = resolve_data_file(env, false).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/home/demo/.local/share/tasker/tasks.json")
        );
    }

    #[test]
    fn data_file_on_windows_uses_appdata() {
        let env = env_of(&[("APPDATA", "/appdata"), ("XDG_DATA_HOME", "/xdg")]);

        let path = resolve_data_file(env, true).unwrap();
        assert_eq!(path, PathBuf::from("/appdata/tasker/tasks.json"));
    }

    #[test]
    fn data_file_on_windows_falls_back_to_roaming_profile() {
        let env = env_of(&[("USERPROFILE", "/users/demo")]);

        let path = resolve_data_file(env, true).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/users/demo/AppData/Roaming/tasker/tasks.json")
        );
    }

    #[test]
    fn data_file_without_home_is_invalid_data() {
        let err = resolve_data_file(env_of(&[]), false).unwrap_err();
        assert_eq!(err.code(), "invalid_data");
    }
}
