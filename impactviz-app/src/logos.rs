use crate::config::{LogoConfig, LogoSource};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::io::Cursor;
use std::time::Duration;
use std::{fs, path::Path, path::PathBuf};

/// A decoded logo, re-encoded as PNG.
#[derive(Debug, Clone)]
pub struct Logo {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Outcome of fetching one logo. Failures carry the message shown in place of the image.
#[derive(Debug, Clone)]
pub enum LogoStatus {
    Loaded(Logo),
    Failed { name: String, message: String },
}

impl LogoStatus {
    pub fn summary(&self) -> String {
        match self {
            LogoStatus::Loaded(logo) => {
                format!("{}: {}x{} px", logo.name, logo.width, logo.height)
            }
            LogoStatus::Failed { name, message } => format!("{}: {}", name, message),
        }
    }
}

/// Fetches every configured logo. Never fails: each problem becomes a `LogoStatus::Failed`.
pub fn fetch_logos(config: &LogoConfig) -> Vec<LogoStatus> {
    let client = match Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "Could not build HTTP client for logos");
            return config
                .sources
                .iter()
                .map(|source| LogoStatus::Failed {
                    name: source.name.clone(),
                    message: format!("Error al preparar la descarga de logos: {}", e),
                })
                .collect();
        }
    };

    config
        .sources
        .iter()
        .map(|source| fetch_logo(&client, source))
        .collect()
}

fn fetch_logo(client: &Client, source: &LogoSource) -> LogoStatus {
    let failed = |message: String| {
        tracing::warn!(logo = %source.name, url = %source.url, %message, "Logo unavailable");
        LogoStatus::Failed {
            name: source.name.clone(),
            message,
        }
    };

    let bytes = match download(client, &source.url) {
        Ok(bytes) => bytes,
        Err(e) => {
            return failed(format!(
                "Error al cargar el logo desde la URL. Por favor, verifica el enlace: {:#}",
                e
            ))
        }
    };

    match decode_logo(&source.name, &bytes) {
        Ok(logo) => {
            tracing::info!(
                logo = %logo.name,
                width = logo.width,
                height = logo.height,
                "Logo loaded"
            );
            LogoStatus::Loaded(logo)
        }
        Err(e) => failed(format!(
            "Error inesperado al procesar la imagen del logo: {:#}",
            e
        )),
    }
}

fn download(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

/// Decodes raw image bytes of any supported format into a PNG logo.
pub fn decode_logo(name: &str, bytes: &[u8]) -> Result<Logo> {
    let image = image::load_from_memory(bytes).context("Unrecognized image data")?;
    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, image::ImageOutputFormat::Png)?;
    Ok(Logo {
        name: name.to_string(),
        width: image.width(),
        height: image.height(),
        png: png.into_inner(),
    })
}

/// Writes the loaded logos into `dir` as `logo_<name>.png`; failed ones are skipped.
pub fn save_logos(dir: &Path, statuses: &[LogoStatus]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    let mut written = Vec::new();
    for status in statuses {
        if let LogoStatus::Loaded(logo) = status {
            let path = dir.join(format!("logo_{}.png", logo.name));
            fs::write(&path, &logo.png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written.push(path);
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn sample_png() -> Vec<u8> {
        let image = image::RgbImage::from_pixel(6, 4, image::Rgb([0x0E, 0x45, 0x4A]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decodes_valid_images() {
        let logo = decode_logo("sustrend", &sample_png()).unwrap();
        assert_eq!((logo.width, logo.height), (6, 4));
        assert_eq!(&logo.png[..4], b"\x89PNG");
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(decode_logo("broken", b"<html>quota exceeded</html>").is_err());
    }

    /// Serves a single HTTP response on a local port and returns its URL.
    fn serve_once(status: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/logo.png", listener.local_addr().unwrap());
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 512];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&chunk[..n]),
                }
            }
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: image/png\r\nContent-Length: {}\r\n\
                 Connection: close\r\n\r\n",
                status,
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(&body).unwrap();
        });
        url
    }

    fn fetch_from(url: String) -> LogoStatus {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let source = LogoSource {
            name: "sustrend".to_string(),
            url,
        };
        fetch_logo(&client, &source)
    }

    #[test]
    fn error_status_degrades_to_link_message() {
        match fetch_from(serve_once("404 Not Found", b"missing".to_vec())) {
            LogoStatus::Failed { name, message } => {
                assert_eq!(name, "sustrend");
                assert!(message.starts_with("Error al cargar el logo desde la URL"));
                assert!(message.contains("404"), "{}", message);
            }
            LogoStatus::Loaded(_) => panic!("a 404 response must not load"),
        }
    }

    #[test]
    fn non_image_body_degrades_to_processing_message() {
        match fetch_from(serve_once("200 OK", b"<html>quota exceeded</html>".to_vec())) {
            LogoStatus::Failed { message, .. } => {
                assert!(message.starts_with("Error inesperado al procesar la imagen del logo"));
            }
            LogoStatus::Loaded(_) => panic!("html is not an image"),
        }
    }

    #[test]
    fn no_sources_fetch_nothing() {
        let config = LogoConfig {
            sources: Vec::new(),
            timeout_secs: 1,
        };
        assert!(fetch_logos(&config).is_empty());
    }

    #[test]
    fn image_body_loads() {
        match fetch_from(serve_once("200 OK", sample_png())) {
            LogoStatus::Loaded(logo) => assert_eq!((logo.width, logo.height), (6, 4)),
            LogoStatus::Failed { message, .. } => panic!("{}", message),
        }
    }

    #[test]
    fn only_loaded_logos_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let statuses = vec![
            LogoStatus::Loaded(decode_logo("sustrend", &sample_png()).unwrap()),
            LogoStatus::Failed {
                name: "ttgreenfoods".to_string(),
                message: "offline".to_string(),
            },
        ];
        let written = save_logos(dir.path(), &statuses).unwrap();
        assert_eq!(written, vec![dir.path().join("logo_sustrend.png")]);
        assert_eq!(statuses[1].summary(), "ttgreenfoods: offline");
    }
}
