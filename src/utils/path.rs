use crate::error::{OnboardError, Result};
use std::path::{Path, PathBuf};
use uzers::os::unix::UserExt;

/// Directory under the home directory holding onboarding state.
pub const STATE_DIR_NAME: &str = ".agent-onboard";

/// Current user's home directory from `HOME`.
pub fn home_dir() -> Result<PathBuf> {
    std::env::var("HOME")
        .ok()
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .ok_or(OnboardError::HomeNotFound)
}

/// `~/.agent-onboard`
pub fn state_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(STATE_DIR_NAME))
}

/// Expand a leading `~` or `~username` to the matching home directory.
///
/// Paths without a leading tilde are returned unchanged. Returns `None` when
/// the home directory cannot be determined or the user does not exist.
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_str()?;

    let Some(after_tilde) = path_str.strip_prefix('~') else {
        return Some(path.to_path_buf());
    };

    if after_tilde.is_empty() || after_tilde.starts_with('/') {
        let home = home_dir().ok()?;
        return Some(home.join(after_tilde.trim_start_matches('/')));
    }

    let (username, rest) = match after_tilde.split_once('/') {
        Some((username, rest)) => (username, rest),
        None => (after_tilde, ""),
    };
    let user = uzers::get_user_by_name(username)?;
    Some(user.home_dir().join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_expand_tilde_current_user() {
        let home = env::var("HOME").unwrap();

        assert_eq!(expand_tilde("~").unwrap(), PathBuf::from(&home));
        assert_eq!(
            expand_tilde("~/.agent-onboard/config.json").unwrap(),
            PathBuf::from(&home).join(".agent-onboard/config.json")
        );
    }

    #[test]
    fn test_expand_tilde_other_user() {
        if let Some(path) = expand_tilde("~root/.config") {
            assert!(path.starts_with("/"));
            assert!(path.ends_with(".config"));
        }
    }

    #[test]
    fn test_expand_tilde_nonexistent_user() {
        assert!(expand_tilde("~nonexistentuser12345/file").is_none());
    }

    #[test]
    fn test_expand_tilde_no_tilde() {
        assert_eq!(
            expand_tilde("/etc/agent/config.json").unwrap(),
            PathBuf::from("/etc/agent/config.json")
        );
        assert_eq!(
            expand_tilde("relative/~user/config.json").unwrap(),
            PathBuf::from("relative/~user/config.json")
        );
    }

    #[test]
    #[serial]
    fn test_home_missing() {
        let original_home = env::var("HOME").ok();
        env::remove_var("HOME");

        assert!(expand_tilde("~/file").is_none());
        assert!(matches!(state_dir(), Err(OnboardError::HomeNotFound)));

        if let Some(home) = original_home {
            env::set_var("HOME", home);
        }
    }

    #[test]
    #[serial]
    fn test_state_dir_under_home() {
        let home = env::var("HOME").unwrap();
        assert_eq!(
            state_dir().unwrap(),
            PathBuf::from(home).join(".agent-onboard")
        );
    }
}
