//! Browser-language redirect for index pages
//!
//! Every index page carries a one-shot check that runs once the page is
//! interactive: when the visitor's preferred language equals the configured
//! language (`ja` by default) the browser is sent to the configured path
//! (`/ja`). The check looks only at the browser preference, never at the
//! language of the page it is embedded in.
//!
//! [`MountHook`] models the mount-time behaviour; [`client_script`] is the
//! form it takes in generated HTML.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::LocaleRedirectConfig;

/// Reports the visitor's preferred language
pub trait LanguageDetector {
    fn detect(&self) -> Option<String>;
}

/// Performs client-side navigation
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Language that triggers the redirect, and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRedirect {
    pub language: String,
    pub target: String,
}

impl Default for LocaleRedirect {
    fn default() -> Self {
        Self {
            language: "ja".to_string(),
            target: "/ja".to_string(),
        }
    }
}

impl LocaleRedirect {
    /// `None` when the redirect is disabled
    pub fn from_config(config: &LocaleRedirectConfig) -> Option<Self> {
        config.enabled.then(|| Self {
            language: config.language.clone(),
            target: config.path.clone(),
        })
    }

    /// Navigate to the target iff the detected language matches exactly.
    /// Returns whether navigation was requested.
    pub fn check(&self, detector: &dyn LanguageDetector, navigator: &dyn Navigator) -> bool {
        match detector.detect() {
            Some(language) if language == self.language => {
                navigator.navigate(&self.target);
                true
            }
            _ => false,
        }
    }
}

/// Shared cancellation flag for a pending [`MountHook`]
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Single-fire redirect check bound to one mounted page instance.
///
/// `fire` runs the check on its first call only; later calls (re-renders)
/// are no-ops. A cancelled hook never fires.
#[derive(Debug)]
pub struct MountHook {
    redirect: LocaleRedirect,
    fired: AtomicBool,
    cancel: CancelToken,
}

impl MountHook {
    pub fn new(redirect: LocaleRedirect) -> Self {
        Self {
            redirect,
            fired: AtomicBool::new(false),
            cancel: CancelToken::default(),
        }
    }

    /// Token to cancel the hook if the page goes away before it fires
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    pub fn fire(&self, detector: &dyn LanguageDetector, navigator: &dyn Navigator) -> bool {
        if self.cancel.is_cancelled() {
            tracing::debug!("Locale redirect cancelled before mount");
            return false;
        }
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.redirect.check(detector, navigator)
    }
}

/// Detection from an `Accept-Language` style preference list.
///
/// Yields the lowercased primary subtag of the highest-weighted entry
/// (`ja-JP,en;q=0.8` gives `ja`).
#[derive(Debug, Clone)]
pub struct AcceptLanguageDetector {
    header: String,
}

impl AcceptLanguageDetector {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

impl LanguageDetector for AcceptLanguageDetector {
    fn detect(&self) -> Option<String> {
        let mut best: Option<(&str, f32)> = None;

        for entry in self.header.split(',') {
            let mut parts = entry.split(';');
            let tag = parts.next().unwrap_or_default().trim();
            if tag.is_empty() {
                continue;
            }
            let weight = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            if weight <= 0.0 {
                continue;
            }
            // Equal weights keep the earlier entry
            if best.map_or(true, |(_, w)| weight > w) {
                best = Some((tag, weight));
            }
        }

        let (tag, _) = best?;
        if tag == "*" {
            return None;
        }
        tag.split('-').next().map(|primary| primary.to_ascii_lowercase())
    }
}

/// Inline script performing the check in the browser.
///
/// Navigation to the path the browser is already on is skipped, as a
/// client-side router would.
pub fn client_script(redirect: &LocaleRedirect) -> String {
    let language = js_string(&redirect.language);
    let target = js_string(&redirect.target);

    format!(
        r#"<script>
(function() {{
    var prefs = navigator.languages && navigator.languages.length ? navigator.languages[0] : navigator.language;
    var language = (prefs || '').split('-')[0].toLowerCase();
    var target = {target};
    if (language === {language} && window.location.pathname.replace(/\/$/, '') !== target.replace(/\/$/, '')) {{
        window.location.assign(target);
    }}
}})();
</script>"#
    )
}

/// JSON-quoted string that cannot close the surrounding script element
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}
