use super::api::ImageFile;
use crate::{app::build_app, state::AppState};

/// Serves an in-memory backend on an ephemeral port and returns its base URL.
pub async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    let app = build_app(AppState::fake());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{addr}")
}

pub fn png() -> ImageFile {
    ImageFile {
        file_name: "cover.png".into(),
        content_type: "image/png".into(),
        bytes: b"\x89PNG\r\n\x1a\nfake".to_vec(),
    }
}
