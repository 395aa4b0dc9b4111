use std::time::Duration;

/// Default upper bound on a single decal load.
pub const DEFAULT_DECAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable overriding the decal timeout in milliseconds (`0` disables it).
pub const DECAL_TIMEOUT_ENV: &str = "ROUNDEL_DECAL_TIMEOUT_MS";

/// Renderer options that are not part of the badge itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererOpts {
    /// Upper bound on a decal load; `None` waits indefinitely.
    ///
    /// A timeout requires the tokio time driver on the runtime driving the render.
    pub decal_timeout: Option<Duration>,
}

impl Default for RendererOpts {
    fn default() -> Self {
        Self {
            decal_timeout: Some(DEFAULT_DECAL_TIMEOUT),
        }
    }
}

impl RendererOpts {
    /// Defaults with the decal timeout taken from [`DECAL_TIMEOUT_ENV`] when it parses.
    pub fn from_env() -> Self {
        let mut out = Self::default();
        if let Some(timeout) = std::env::var(DECAL_TIMEOUT_ENV)
            .ok()
            .and_then(|v| parse_timeout_ms(&v))
        {
            out.decal_timeout = timeout;
        }
        out
    }

    /// Return options with the given decal timeout.
    pub fn with_decal_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.decal_timeout = timeout;
        self
    }
}

/// `Some(None)` for `0`, `Some(Some(ms))` for a positive count, `None` when unparsable.
fn parse_timeout_ms(v: &str) -> Option<Option<Duration>> {
    let ms = v.trim().parse::<u64>().ok()?;
    Some((ms > 0).then(|| Duration::from_millis(ms)))
}

#[cfg(test)]
#[path = "../../tests/unit/config/opts.rs"]
mod tests;
