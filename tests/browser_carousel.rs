//! Browser behaviour of the generated pages: carousel timer, hover and
//! fullscreen suspension, keyboard scope, hidden tab panels, and the theme
//! toggle.
//!
//! These tests use headless Chrome over a local HTTP server (pages reference
//! their fingerprinted assets by absolute path, so file:// does not work).
//!
//! Run with: `cargo test --test browser_carousel -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::io::{Read as _, Write as _};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

/// Matches `[carousel] interval_ms` in fixtures/browser-content/config.toml.
const INTERVAL: Duration = Duration::from_millis(300);

const GALLERY_PAGE: &str = "/case-studies/freshly-mobile-app/";

// ===========================================================================
// Minimal static HTTP server
// ===========================================================================

struct TestServer {
    port: u16,
    _stop: std::sync::mpsc::Sender<()>,
}

impl TestServer {
    fn start(root: PathBuf) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = std::sync::mpsc::channel::<()>();

        thread::spawn(move || {
            listener.set_nonblocking(true).unwrap();
            loop {
                if rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        let root = root.clone();
                        thread::spawn(move || serve_request(stream, &root));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self { port, _stop: tx }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

fn serve_request(mut stream: std::net::TcpStream, root: &Path) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(n) if n > 0 => n,
        _ => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request.split_whitespace().nth(1).unwrap_or("/");
    let mut file_path = root.join(path.trim_start_matches('/'));
    if file_path.is_dir() {
        file_path = file_path.join("index.html");
    }

    // No contact backend here: POSTs to the endpoint get a 404 like any miss.
    let (status, body, ct) = if file_path.is_file() {
        let body = std::fs::read(&file_path).unwrap_or_default();
        let ext = file_path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let ct = match ext {
            "html" => "text/html; charset=utf-8",
            "js" => "application/javascript",
            "css" => "text/css",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            _ => "application/octet-stream",
        };
        ("200 OK", body, ct)
    } else {
        ("404 Not Found", b"Not Found".to_vec(), "text/plain")
    };

    let header = format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: {ct}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&body);
}

// ===========================================================================
// Setup helpers
// ===========================================================================

fn generated_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("browser-site")
}

fn ensure_site_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let bin = env!("CARGO_BIN_EXE_folio");
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let status = Command::new(bin)
            .args([
                "build",
                "--source",
                root.join("fixtures/browser-content").to_str().unwrap(),
                "--output",
                generated_dir().to_str().unwrap(),
            ])
            .status()
            .expect("failed to run folio");
        assert!(status.success(), "fixture site generation failed");
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn start_server() -> TestServer {
    ensure_site_built();
    TestServer::start(generated_dir())
}

fn open(server: &TestServer, path: &str) -> std::sync::Arc<Tab> {
    let tab = browser().new_tab().unwrap();
    tab.navigate_to(&server.url(path))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    // Let the deferred script wire up listeners.
    thread::sleep(Duration::from_millis(100));
    tab
}

fn eval(tab: &Tab, js: &str) -> serde_json::Value {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .unwrap_or(serde_json::Value::Null)
}

fn counter(tab: &Tab) -> String {
    eval(tab, "document.querySelector('.carousel-counter').textContent")
        .as_str()
        .unwrap()
        .to_string()
}

fn select_tab(tab: &Tab, id: &str) {
    eval(
        tab,
        &format!("document.querySelector('.tab-button[data-tab=\"{id}\"]').click()"),
    );
}

fn press(tab: &Tab, key: &str) {
    eval(
        tab,
        &format!("document.dispatchEvent(new KeyboardEvent('keydown', {{ key: '{key}' }}))"),
    );
}

fn carousel_event(tab: &Tab, event: &str) {
    eval(
        tab,
        &format!("document.querySelector('[data-carousel]').dispatchEvent(new MouseEvent('{event}'))"),
    );
}

fn click(tab: &Tab, selector: &str) {
    eval(tab, &format!("document.querySelector('{selector}').click()"));
}

// ===========================================================================
// Autoplay
// ===========================================================================

#[test]
#[ignore]
fn autoplay_advances_once_gallery_is_shown() {
    let server = start_server();
    let tab = open(&server, GALLERY_PAGE);
    select_tab(&tab, "gallery");
    assert_eq!(counter(&tab), "1 / 7");

    thread::sleep(INTERVAL * 3 + INTERVAL / 2);
    assert_ne!(counter(&tab), "1 / 7", "autoplay should have advanced");
}

#[test]
#[ignore]
fn hidden_gallery_does_not_advance() {
    let server = start_server();
    let tab = open(&server, GALLERY_PAGE);

    // Overview is the initial tab; the gallery panel is hidden.
    thread::sleep(INTERVAL * 4);
    select_tab(&tab, "gallery");
    assert_eq!(counter(&tab), "1 / 7", "hidden carousel must not advance");

    // Switching away stops it again.
    thread::sleep(INTERVAL + INTERVAL / 2);
    select_tab(&tab, "overview");
    let left_at = counter(&tab);
    thread::sleep(INTERVAL * 4);
    assert_eq!(counter(&tab), left_at);
}

#[test]
#[ignore]
fn hover_stops_autoplay_and_leave_resumes() {
    let server = start_server();
    let tab = open(&server, GALLERY_PAGE);
    select_tab(&tab, "gallery");

    carousel_event(&tab, "mouseenter");
    let held = counter(&tab);
    thread::sleep(INTERVAL * 4);
    assert_eq!(counter(&tab), held, "hover should suspend autoplay");

    carousel_event(&tab, "mouseleave");
    thread::sleep(INTERVAL * 3 + INTERVAL / 2);
    assert_ne!(counter(&tab), held, "leaving should resume autoplay");
}

#[test]
#[ignore]
fn play_button_pauses_autoplay() {
    let server = start_server();
    let tab = open(&server, GALLERY_PAGE);
    select_tab(&tab, "gallery");

    click(&tab, ".carousel-play");
    let held = counter(&tab);
    let label = eval(&tab, "document.querySelector('.carousel-play').textContent");
    assert_eq!(label.as_str(), Some("Play"));
    thread::sleep(INTERVAL * 4);
    assert_eq!(counter(&tab), held);
}

// ===========================================================================
// Fullscreen and keyboard
// ===========================================================================

#[test]
#[ignore]
fn arrow_keys_only_navigate_in_fullscreen() {
    let server = start_server();
    let tab = open(&server, GALLERY_PAGE);
    select_tab(&tab, "gallery");
    click(&tab, ".carousel-play");
    assert_eq!(counter(&tab), "1 / 7");

    press(&tab, "ArrowRight");
    assert_eq!(counter(&tab), "1 / 7", "keys are ignored outside fullscreen");

    click(&tab, ".carousel-fullscreen");
    press(&tab, "ArrowRight");
    assert_eq!(counter(&tab), "2 / 7");
    press(&tab, "ArrowLeft");
    press(&tab, "ArrowLeft");
    assert_eq!(counter(&tab), "7 / 7");

    press(&tab, "Escape");
    let open = eval(
        &tab,
        "document.querySelector('[data-carousel]').classList.contains('fullscreen')",
    );
    assert_eq!(open.as_bool(), Some(false));
    press(&tab, "ArrowRight");
    assert_eq!(counter(&tab), "7 / 7");
}

#[test]
#[ignore]
fn fullscreen_suspends_autoplay() {
    let server = start_server();
    let tab = open(&server, GALLERY_PAGE);
    select_tab(&tab, "gallery");

    click(&tab, ".carousel-fullscreen");
    let held = counter(&tab);
    thread::sleep(INTERVAL * 4);
    assert_eq!(counter(&tab), held);
}

// ===========================================================================
// Theme and contact
// ===========================================================================

#[test]
#[ignore]
fn theme_toggle_writes_storage_key() {
    let server = start_server();
    let tab = open(&server, "/");
    let before = eval(&tab, "document.documentElement.getAttribute('data-theme')");
    let before = before.as_str().unwrap().to_string();

    click(&tab, ".theme-toggle");
    let after = eval(&tab, "document.documentElement.getAttribute('data-theme')");
    let stored = eval(&tab, "localStorage.getItem('folio-theme')");
    assert_ne!(after.as_str(), Some(before.as_str()));
    assert_eq!(stored, after);

    // The stored choice wins on the next page load.
    let tab = open(&server, "/about/");
    let reloaded = eval(&tab, "document.documentElement.getAttribute('data-theme')");
    assert_eq!(reloaded, after);
}

#[test]
#[ignore]
fn contact_failure_shows_error_notice() {
    let server = start_server();
    let tab = open(&server, "/contact/");
    eval(
        &tab,
        r#"(() => {
            const form = document.querySelector('form[data-endpoint]');
            form.elements.name.value = 'Ada';
            form.elements.email.value = 'ada@example.com';
            form.elements.message.value = 'Hello';
            form.requestSubmit();
        })()"#,
    );
    thread::sleep(Duration::from_millis(500));
    let status = eval(
        &tab,
        "document.querySelector('form[data-endpoint]').dataset.status",
    );
    assert_eq!(status.as_str(), Some("error"));
}
