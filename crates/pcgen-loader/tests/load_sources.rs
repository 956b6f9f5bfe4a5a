//! Loading from real files and a local HTTP server.

use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use pcgen_loader::{
    load_catalog, AutoSource, DataLocations, Document, FetchError, FileSource, HttpSource,
    LoaderError,
};

const CONFIG: &str = r#"{
    "baseUrl": "https://donasi.example",
    "konfirmasiDefault": "0812xxxxxxx",
    "rekening": {"bsi": "7123", "anBsi": "Yayasan", "mandiri": "1330", "anMandiri": "Yayasan"}
}"#;
const PROGRAMS: &str = r#"{"zakat": {"name": "Zakat", "path": "/zakat", "text": "Ini link Anda: {LINK}"}}"#;
const QRIS: &str = r#"{"Jakarta": {"driveId": "q1"}}"#;

fn write_data_dir(root: &Path) {
    let json = root.join("json");
    std::fs::create_dir_all(&json).unwrap();
    std::fs::write(json.join("data.json"), CONFIG).unwrap();
    std::fs::write(json.join("program.json"), PROGRAMS).unwrap();
    std::fs::write(json.join("qris.json"), QRIS).unwrap();
}

/// Serves the three documents; any other path gets a 404.
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, body) = match path.as_str() {
                    "/json/data.json" => ("200 OK", CONFIG),
                    "/json/program.json" => ("200 OK", PROGRAMS),
                    "/json/qris.json" => ("200 OK", QRIS),
                    _ => ("404 Not Found", "missing"),
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn loads_from_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    let source = FileSource::with_root(dir.path());
    let catalog = load_catalog(&source, &DataLocations::from_base("")).await.unwrap();

    assert_eq!(catalog.config().default_confirmation, "0812xxxxxxx");
    assert!(catalog.program("zakat").is_some());
    assert!(catalog.region("Jakarta").is_some());
}

#[tokio::test]
async fn missing_file_fails_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());
    std::fs::remove_file(dir.path().join("json/qris.json")).unwrap();

    let source = FileSource::with_root(dir.path());
    let err = load_catalog(&source, &DataLocations::from_base("")).await.unwrap_err();

    assert_eq!(err.document(), Document::Qris);
    assert!(matches!(
        err,
        LoaderError::Fetch {
            source: FetchError::Io(_),
            ..
        }
    ));
}

#[tokio::test]
async fn loads_over_http() {
    let base = spawn_server().await;
    let source = HttpSource::new();
    let catalog = load_catalog(&source, &DataLocations::from_base(&base)).await.unwrap();

    assert_eq!(catalog.config().base_url, "https://donasi.example");
    assert_eq!(catalog.program_count(), 1);
}

#[tokio::test]
async fn http_error_status_fails_whole_load() {
    let base = spawn_server().await;
    let locations =
        DataLocations::from_base(&base).with(Document::Programs, format!("{base}/json/nope.json"));

    let err = load_catalog(&HttpSource::new(), &locations).await.unwrap_err();
    assert_eq!(
        err,
        LoaderError::Fetch {
            document: Document::Programs,
            location: format!("{base}/json/nope.json"),
            source: FetchError::Status(404),
        }
    );
}

#[tokio::test]
async fn auto_source_mixes_files_and_http() {
    let base = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    let locations = DataLocations::new(
        format!("{base}/json/data.json"),
        "json/program.json",
        format!("file://{}", dir.path().join("json/qris.json").display()),
    );
    let source = AutoSource::new(FileSource::with_root(dir.path()), HttpSource::new());

    let catalog = load_catalog(&source, &locations).await.unwrap();
    assert_eq!(catalog.region_count(), 1);
}
