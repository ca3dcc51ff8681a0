//! Platform integration: opening links in the default browser and the
//! browser-backed print surface.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use booking_core::print::{PrintSurface, SurfaceHost};

/// Print files older than this are removed when a host starts
const STALE_AFTER: Duration = Duration::from_secs(60 * 60);

/// Makes the browser open its print dialog as soon as the page has loaded
const AUTO_PRINT_BODY: &str = r#"<body onload="window.print()">"#;

/// Open a URL (or local file path) in the default browser.
///
/// Returns `false` if the opener process could not be started.
pub fn open_url(url: &str) -> bool {
    #[cfg(target_os = "windows")]
    let spawned = std::process::Command::new("cmd")
        .args(["/C", "start", "", url])
        .spawn();

    #[cfg(target_os = "macos")]
    let spawned = std::process::Command::new("open").arg(url).spawn();

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let spawned = std::process::Command::new("xdg-open").arg(url).spawn();

    spawned.is_ok()
}

/// Wrap a static print document so that loading it invokes print
fn with_auto_print(html: &str) -> String {
    html.replacen("<body>", AUTO_PRINT_BODY, 1)
}

/// Opens print surfaces as HTML files in a scratch directory
pub struct BrowserSurfaceHost {
    dir: PathBuf,
    counter: AtomicU64,
    opener: fn(&str) -> bool,
}

impl BrowserSurfaceHost {
    /// Host under `$TMP/learnhub-print`, printing through the default browser
    pub fn new() -> Self {
        Self::with_opener(std::env::temp_dir().join("learnhub-print"), open_url)
    }

    /// Host writing into `dir` and handing finished files to `opener`.
    ///
    /// Print files left behind by earlier runs are swept on creation.
    pub fn with_opener(dir: PathBuf, opener: fn(&str) -> bool) -> Self {
        let host = BrowserSurfaceHost {
            dir,
            counter: AtomicU64::new(0),
            opener,
        };
        host.sweep(STALE_AFTER);
        host
    }

    /// Remove print files last modified at least `older_than` ago
    pub fn sweep(&self, older_than: Duration) {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return;
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !(name.starts_with("invoice-") && name.ends_with(".html")) {
                continue;
            }
            let stale = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .and_then(|modified| modified.elapsed().ok())
                .is_some_and(|age| age >= older_than);
            if stale {
                if let Err(e) = std::fs::remove_file(entry.path()) {
                    tracing::debug!(path = %entry.path().display(), error = %e, "could not remove print file");
                }
            }
        }
    }
}

impl Default for BrowserSurfaceHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceHost for BrowserSurfaceHost {
    type Surface = BrowserSurface;

    fn open_surface(&self) -> Option<BrowserSurface> {
        std::fs::create_dir_all(&self.dir).ok()?;
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let path = self.dir.join(format!("invoice-{}-{}.html", std::process::id(), n));
        Some(BrowserSurface {
            path,
            written: false,
            printed: false,
            opener: self.opener,
        })
    }
}

/// A print document on disk that prints itself once the browser loads it.
///
/// A surface dropped before printing removes its file. Printed files stay
/// until the next host sweep, since the browser reads them after `print`.
pub struct BrowserSurface {
    path: PathBuf,
    written: bool,
    printed: bool,
    opener: fn(&str) -> bool,
}

impl BrowserSurface {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_written(&self) -> bool {
        self.written
    }
}

impl PrintSurface for BrowserSurface {
    fn write_document(&mut self, html: &str) {
        match std::fs::write(&self.path, with_auto_print(html)) {
            Ok(()) => self.written = true,
            Err(e) => tracing::debug!(path = %self.path.display(), error = %e, "print surface not writable"),
        }
    }

    fn print(&mut self) {
        if !self.written || self.printed {
            return;
        }
        self.printed = true;
        if !(self.opener)(&self.path.to_string_lossy()) {
            tracing::debug!(path = %self.path.display(), "no browser available for printing");
        }
    }
}

impl Drop for BrowserSurface {
    fn drop(&mut self) {
        if self.written && !self.printed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
