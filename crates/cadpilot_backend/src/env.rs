use anyhow::anyhow;

pub(crate) const BACKEND_URL_ENV: &str = "CADPILOT_BACKEND_URL";
pub(crate) const BACKEND_URL_DEFAULT: &str = "http://127.0.0.1:8000";

/// Base URL of the generation backend. Unset means the local default;
/// set-but-empty is a configuration mistake and errors rather than being
/// silently ignored.
pub fn backend_base_url() -> anyhow::Result<String> {
    let value = match std::env::var_os(BACKEND_URL_ENV) {
        Some(value) => value,
        None => return Ok(BACKEND_URL_DEFAULT.to_owned()),
    };

    let value = value.to_string_lossy();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("{BACKEND_URL_ENV} is set but empty"));
    }

    Ok(trimmed.trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use super::{BACKEND_URL_DEFAULT, BACKEND_URL_ENV, backend_base_url};
    use std::sync::{Mutex, MutexGuard, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn lock_env() -> MutexGuard<'static, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    fn with_env_var(value: Option<&str>, check: impl FnOnce()) {
        let _guard = lock_env();

        let prev = std::env::var_os(BACKEND_URL_ENV);
        match value {
            Some(value) => unsafe {
                std::env::set_var(BACKEND_URL_ENV, value);
            },
            None => unsafe {
                std::env::remove_var(BACKEND_URL_ENV);
            },
        }

        check();

        if let Some(value) = prev {
            unsafe {
                std::env::set_var(BACKEND_URL_ENV, value);
            }
        } else {
            unsafe {
                std::env::remove_var(BACKEND_URL_ENV);
            }
        }
    }

    #[test]
    fn backend_base_url_defaults_when_unset() {
        with_env_var(None, || {
            let url = backend_base_url().expect("unset env should not error");
            assert_eq!(url, BACKEND_URL_DEFAULT);
        });
    }

    #[test]
    fn backend_base_url_errors_on_empty() {
        with_env_var(Some("   "), || {
            let err = backend_base_url().expect_err("empty env should error");
            assert!(
                err.to_string().contains("CADPILOT_BACKEND_URL is set but empty"),
                "unexpected error: {err:?}"
            );
        });
    }

    #[test]
    fn backend_base_url_trims_and_strips_trailing_slash() {
        with_env_var(Some(" http://cad.example:9000/ "), || {
            let url = backend_base_url().expect("non-empty env should succeed");
            assert_eq!(url, "http://cad.example:9000");
        });
    }
}
