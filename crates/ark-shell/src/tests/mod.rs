mod probe;
mod server_handle;

use std::env;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

const OVERRIDE_VARS: [&str; 8] = [
    "NEXT_HOST",
    "NEXT_PORT",
    "PORT",
    "ARK_START_URL",
    "ARK_NODE_BINARY",
    "ARK_PROBE_MAX_ATTEMPTS",
    "ARK_PROBE_RETRY_DELAY_MS",
    "ARK_PROBE_ATTEMPT_TIMEOUT_MS",
];

/// Clear every variable the config loader reads, restoring them on drop.
pub(crate) fn clean_env() -> Vec<EnvGuard> {
    OVERRIDE_VARS.iter().map(|key| EnvGuard::remove(key)).collect()
}
