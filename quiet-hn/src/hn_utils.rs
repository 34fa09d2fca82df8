/// Small helpers shared by the resolver and the renderer

/// URL utilities for story links
pub mod url {
    use url::Url;

    /// Hostname shown next to a story title.
    ///
    /// A single leading `www.` is dropped. Unparseable or host-less URLs
    /// yield an empty string.
    pub fn display_host(url_str: &str) -> String {
        let Ok(url) = Url::parse(url_str) else {
            return String::new();
        };

        match url.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => String::new(),
        }
    }

    /// Link target safe to place in an `href`.
    ///
    /// Only absolute `http` and `https` URLs pass through unchanged; anything
    /// else (`javascript:`, `data:`, unparseable) becomes `#`.
    pub fn safe_href(url_str: &str) -> &str {
        match Url::parse(url_str) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url_str,
            _ => "#",
        }
    }
}

/// Time utilities for page rendering
pub mod time {
    use std::time::Duration;

    /// Format a render duration the way the page footer shows it.
    pub fn format_elapsed(elapsed: Duration) -> String {
        let micros = elapsed.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", elapsed.as_secs_f64())
        }
    }
}
