use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub struct MockServer {
    pub base_url: String,
    pub last_body: Arc<Mutex<Option<String>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}

impl MockServer {
    pub fn last_body(&self) -> String {
        self.last_body.lock().unwrap().clone().unwrap_or_default()
    }
}

/// Serves a fixed status and body on `route`, remembering the last request body.
pub async fn start_mock_server(
    route: &str,
    response_status: u16,
    response_body: &'static str,
) -> MockServer {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let last_body = Arc::new(Mutex::new(None));
    let captured = Arc::clone(&last_body);

    let app = Router::new().route(
        route,
        post(move |body: Bytes| {
            let captured = Arc::clone(&captured);
            async move {
                *captured.lock().unwrap() = Some(String::from_utf8_lossy(&body).into_owned());
                let status = axum::http::StatusCode::from_u16(response_status).unwrap();
                (status, response_body).into_response()
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    MockServer {
        base_url: format!("http://{}", addr),
        last_body,
        shutdown: Some(shutdown_tx),
    }
}

pub fn build_wav(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let byte_rate = sample_rate * 2;
    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

pub fn write_silence(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_wav(16_000, &vec![0i16; 4000])).unwrap();
    path
}
