//! Local preview server for the generated site
//!
//! Serves `public/` as-is. With watching on, a rebuild after each change
//! is pushed to open pages over `/__livereload`.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::Blog;

const RELOAD_PATH: &str = "/__livereload";

const RELOAD_SNIPPET: &str = r#"<script>
new WebSocket('ws://' + location.host + '/__livereload').onmessage = function (msg) {
  if (msg.data === 'reload') location.reload();
};
</script>
"#;

struct ServerState {
    public_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Serve the public directory, rebuilding and reloading on change when `watch` is set
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel(16);
    let state = Arc::new(ServerState {
        public_dir: blog.public_dir.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app = Router::new()
        .route(RELOAD_PATH, get(livereload))
        .fallback(serve_file)
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let url = format!("http://{}:{}", ip, port);
    tracing::info!("Serving {:?} at {}", blog.public_dir, url);

    if watch {
        let blog = blog.clone();
        tokio::task::spawn_blocking(move || {
            let notify_pages = || {
                // No receivers just means no page is open
                let _ = reload_tx.send(());
            };
            if let Err(e) = crate::watch::watch_and_rebuild(&blog, notify_pages) {
                tracing::error!("File watcher stopped: {:#}", e);
            }
        });
    }

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}

async fn livereload(ws: WebSocketUpgrade, State(state): State<Arc<ServerState>>) -> Response {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| push_reloads(socket, reload_rx))
}

async fn push_reloads(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    loop {
        tokio::select! {
            signal = reload_rx.recv() => match signal {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    if socket.send(Message::Text("reload".into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                _ => {}
            },
        }
    }
}

/// HTML pages get the reload snippet; everything else goes through `ServeDir`
async fn serve_file(State(state): State<Arc<ServerState>>, request: Request<Body>) -> Response {
    if state.live_reload {
        if let Some(page) = html_page(&state.public_dir, request.uri().path()) {
            return match tokio::fs::read_to_string(&page).await {
                Ok(html) => Html(inject_live_reload(&html)).into_response(),
                Err(_) => StatusCode::NOT_FOUND.into_response(),
            };
        }
    }

    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// The HTML file a request path resolves to. `/ja` and `/page/1/` map to
/// their `index.html`.
fn html_page(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let candidate = public_dir.join(relative);
    let file = if candidate.is_dir() {
        candidate.join("index.html")
    } else {
        candidate
    };

    let is_html = file.extension().is_some_and(|ext| ext == "html");
    (is_html && file.is_file()).then_some(file)
}

fn inject_live_reload(html: &str) -> String {
    match html.rfind("</body>") {
        Some(pos) => format!("{}{}{}", &html[..pos], RELOAD_SNIPPET, &html[pos..]),
        None => format!("{}{}", html, RELOAD_SNIPPET),
    }
}

fn open_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = std::process::Command::new("cmd");
        cmd.args(["/c", "start"]);
        cmd
    } else {
        std::process::Command::new("xdg-open")
    };
    command.arg(url).spawn().map(|_| ())
}
