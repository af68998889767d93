use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
    word: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EntryBody {
    date: String,
    word: String,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    entry: EntryBody,
    updated: bool,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("daybit_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_daybit"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn save_word(client: &Client, base_url: &str, word: &str) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/entries"))
        .json(&serde_json::json!({ "word": word }))
        .send()
        .await
        .unwrap()
}

async fn today(client: &Client, base_url: &str) -> TodayResponse {
    client
        .get(format!("{base_url}/api/today"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn reset(client: &Client, base_url: &str) {
    let response = client
        .post(format!("{base_url}/api/session/reset"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success() || response.status().is_redirection());
}

#[tokio::test]
async fn http_save_then_update_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    let before = today(&client, &server.base_url).await;
    assert!(before.word.is_none());

    let first: SaveResponse = save_word(&client, &server.base_url, " happy ")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(first.entry.word, "happy");
    assert_eq!(first.entry.date, before.date);
    assert!(!first.updated);

    let second: SaveResponse = save_word(&client, &server.base_url, "tired")
        .await
        .json()
        .await
        .unwrap();
    assert!(second.updated);

    let after = today(&client, &server.base_url).await;
    assert_eq!(after.word.as_deref(), Some("tired"));

    let entries: Vec<EntryBody> = client
        .get(format!("{}/api/entries", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn http_rejects_invalid_words() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    for word in ["", "two words", "abcdefghijklmnopqrstu"] {
        let response = save_word(&client, &server.base_url, word).await;
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST, "{word:?}");
    }
    assert!(today(&client, &server.base_url).await.word.is_none());
}

#[tokio::test]
async fn http_heatmap_marks_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    save_word(&client, &server.base_url, "sunny").await;
    let date = today(&client, &server.base_url).await.date;

    let heatmap: Value = client
        .get(format!("{}/api/heatmap", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let cells = heatmap["cells"].as_array().unwrap();
    assert_eq!(cells.len() % 7, 0);
    assert_eq!(cells.iter().filter(|c| c["in_window"] == true).count(), 365);

    let today_cells: Vec<&Value> = cells.iter().filter(|c| c["is_today"] == true).collect();
    assert_eq!(today_cells.len(), 1);
    let cell = today_cells[0];
    assert_eq!(cell["date"], date.as_str());
    assert_eq!(cell["word"], "sunny");
    assert_eq!(cell["streak_length"], 1);
    assert_eq!(cell["intensity_level"], 1);
}

#[tokio::test]
async fn http_reset_clears_entries() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    save_word(&client, &server.base_url, "gone").await;
    reset(&client, &server.base_url).await;

    assert!(today(&client, &server.base_url).await.word.is_none());
    let entries: Vec<EntryBody> = client
        .get(format!("{}/api/entries", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn http_index_renders_form_and_heatmap() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/entry", server.base_url))
        .form(&[("word", "bright")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let html = response.text().await.unwrap();
    assert!(html.contains("Your Year at a Glance"));
    assert!(html.contains("Update Today"));
    assert!(html.contains("bright"));
    assert!(html.contains("1 words logged"));
}
