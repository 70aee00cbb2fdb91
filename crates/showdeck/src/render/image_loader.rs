//! Background image loading with a one-way pending → loaded | error state machine.
//!
//! Every loader owns its own fetch: there is no cache shared between slides, so a slide that
//! is mounted again starts from `Pending`.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use base64::Engine;
use eframe::egui;
use thiserror::Error;

/// Loaded images fade in over this many seconds.
pub const FADE_IN_SECS: f32 = 0.5;

/// Responses larger than this are rejected rather than decoded.
const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024;

/// Decoded images are scaled down to fit this size before upload.
const MAX_TEXTURE_SIDE: u32 = 4096;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("loader stopped before producing a result")]
    Disconnected,
}

type LoadResult = Result<egui::ColorImage, LoadError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Pending,
    Loaded,
    Error,
}

/// Where an image reference points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Local(PathBuf),
    DataUri(String),
}

/// Settings shared by every loader of one presentation.
#[derive(Debug, Clone)]
pub struct ImageOptions {
    /// Directory that local references resolve against.
    pub assets_dir: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            assets_dir: None,
            timeout: Duration::from_secs(15),
        }
    }
}

impl ImageOptions {
    /// Classify a reference. Local references need an assets directory.
    pub fn resolve(&self, reference: &str) -> Option<ImageSource> {
        let reference = reference.trim();
        if reference.starts_with("https://") || reference.starts_with("http://") {
            return Some(ImageSource::Remote(reference.to_string()));
        }
        if reference.starts_with("data:") {
            return Some(ImageSource::DataUri(reference.to_string()));
        }
        let relative = reference.trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }
        let dir = self.assets_dir.as_ref()?;
        Some(ImageSource::Local(dir.join(relative)))
    }
}

pub struct ImageLoader {
    reference: String,
    phase: LoadPhase,
    texture: Option<egui::TextureHandle>,
    loaded_at: Option<Instant>,
    rx: Option<mpsc::Receiver<LoadResult>>,
}

impl ImageLoader {
    /// Start loading `reference` on a background thread.
    pub fn spawn(reference: &str, options: &ImageOptions, ctx: &egui::Context) -> Self {
        let Some(source) = options.resolve(reference) else {
            log::trace!("No assets directory for image {reference}");
            return Self::failed(reference);
        };

        let (tx, rx) = mpsc::channel();
        let timeout = options.timeout;
        let repaint = ctx.clone();
        let spawned = std::thread::Builder::new()
            .name("showdeck-image".to_string())
            .spawn(move || {
                let result = fetch(&source, timeout).and_then(|bytes| decode(&bytes));
                // The receiver is gone once the slide has been unmounted.
                if tx.send(result).is_ok() {
                    repaint.request_repaint();
                }
            });

        match spawned {
            Ok(_) => Self::from_receiver(reference, rx),
            Err(e) => {
                log::trace!("Could not start image loader for {reference}: {e}");
                Self::failed(reference)
            }
        }
    }

    /// A pending loader fed by `rx`.
    pub fn from_receiver(reference: &str, rx: mpsc::Receiver<LoadResult>) -> Self {
        Self {
            reference: reference.to_string(),
            phase: LoadPhase::Pending,
            texture: None,
            loaded_at: None,
            rx: Some(rx),
        }
    }

    fn failed(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            phase: LoadPhase::Error,
            texture: None,
            loaded_at: None,
            rx: None,
        }
    }

    /// Take a finished result, if any. Returns true when this call changed the phase.
    /// Once loaded or failed, the loader ignores anything else that arrives.
    pub fn poll(&mut self, ctx: &egui::Context) -> bool {
        if self.phase != LoadPhase::Pending {
            return false;
        }
        let Some(rx) = &self.rx else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(mpsc::TryRecvError::Empty) => return false,
            Err(mpsc::TryRecvError::Disconnected) => Err(LoadError::Disconnected),
        };
        match outcome {
            Ok(image) => {
                let texture = ctx.load_texture(
                    format!("showdeck-image:{}", self.reference),
                    image,
                    egui::TextureOptions::LINEAR,
                );
                self.texture = Some(texture);
                self.loaded_at = Some(Instant::now());
                self.phase = LoadPhase::Loaded;
            }
            Err(e) => {
                log::trace!("Image {} failed: {e}", self.reference);
                self.phase = LoadPhase::Error;
            }
        }
        self.rx = None;
        true
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Loaded or failed.
    pub fn is_settled(&self) -> bool {
        self.phase != LoadPhase::Pending
    }

    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }

    /// 0 → 1 over [`FADE_IN_SECS`] after the image arrived.
    pub fn fade_progress(&self) -> f32 {
        match self.loaded_at {
            Some(at) => (at.elapsed().as_secs_f32() / FADE_IN_SECS).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}

fn fetch(source: &ImageSource, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    match source {
        ImageSource::Remote(url) => fetch_remote(url, timeout),
        ImageSource::Local(path) => read_local(path),
        ImageSource::DataUri(uri) => decode_data_uri(uri),
    }
}

fn fetch_remote(url: &str, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into();
    let mut response = agent
        .get(url)
        .call()
        .map_err(|e| LoadError::Network(e.to_string()))?;
    response
        .body_mut()
        .with_config()
        .limit(MAX_IMAGE_BYTES)
        .read_to_vec()
        .map_err(|e| LoadError::Network(e.to_string()))
}

fn read_local(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Payload of a `data:<mime>;base64,<payload>` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, LoadError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| LoadError::Decode("not a data URI".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::Decode("data URI has no payload".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(LoadError::Decode(
            "only base64 data URIs are supported".to_string(),
        ));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| LoadError::Decode(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<egui::ColorImage, LoadError> {
    let mut image = image::load_from_memory(bytes).map_err(|e| LoadError::Decode(e.to_string()))?;
    if image.width() > MAX_TEXTURE_SIDE || image.height() > MAX_TEXTURE_SIDE {
        image = image.thumbnail(MAX_TEXTURE_SIDE, MAX_TEXTURE_SIDE);
    }
    let rgba = image.into_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG.
    const PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn pixel() -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied([1, 1], &[255, 255, 255, 255])
    }

    #[test]
    fn test_success_transitions_once() {
        let ctx = egui::Context::default();
        let (tx, rx) = mpsc::channel();
        let mut loader = ImageLoader::from_receiver("/a.png", rx);
        assert_eq!(loader.phase(), LoadPhase::Pending);
        assert!(!loader.poll(&ctx));
        assert!(loader.texture().is_none());

        tx.send(Ok(pixel())).unwrap();
        assert!(loader.poll(&ctx));
        assert_eq!(loader.phase(), LoadPhase::Loaded);
        assert!(loader.texture().is_some());

        let _ = tx.send(Err(LoadError::Decode("late".into())));
        for _ in 0..3 {
            assert!(!loader.poll(&ctx));
        }
        assert_eq!(loader.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn test_failure_is_terminal() {
        let ctx = egui::Context::default();
        let (tx, rx) = mpsc::channel();
        let mut loader = ImageLoader::from_receiver("/a.png", rx);

        tx.send(Err(LoadError::Network("timed out".into()))).unwrap();
        assert!(loader.poll(&ctx));
        assert_eq!(loader.phase(), LoadPhase::Error);

        let _ = tx.send(Ok(pixel()));
        let _ = tx.send(Err(LoadError::Disconnected));
        assert!(!loader.poll(&ctx));
        assert_eq!(loader.phase(), LoadPhase::Error);
        assert!(loader.texture().is_none());
        assert!(loader.is_settled());
    }

    #[test]
    fn test_dropped_sender_is_an_error() {
        let ctx = egui::Context::default();
        let (tx, rx) = mpsc::channel::<LoadResult>();
        let mut loader = ImageLoader::from_receiver("/a.png", rx);
        drop(tx);
        assert!(loader.poll(&ctx));
        assert_eq!(loader.phase(), LoadPhase::Error);
    }

    #[test]
    fn test_dropping_loader_discards_result() {
        let (tx, rx) = mpsc::channel();
        let loader = ImageLoader::from_receiver("/a.png", rx);
        drop(loader);
        assert!(tx.send(Ok(pixel())).is_err());
    }

    #[test]
    fn test_fade_progress() {
        let ctx = egui::Context::default();
        let (tx, rx) = mpsc::channel();
        let mut loader = ImageLoader::from_receiver("/a.png", rx);
        assert_eq!(loader.fade_progress(), 0.0);
        tx.send(Ok(pixel())).unwrap();
        loader.poll(&ctx);
        assert!(loader.fade_progress() < 1.0);
    }

    #[test]
    fn test_resolve_sources() {
        let options = ImageOptions {
            assets_dir: Some(PathBuf::from("/srv/deck")),
            ..Default::default()
        };
        assert_eq!(
            options.resolve("https://example.com/a.png"),
            Some(ImageSource::Remote("https://example.com/a.png".into()))
        );
        assert_eq!(
            options.resolve("/TicNote Lite.png"),
            Some(ImageSource::Local(PathBuf::from("/srv/deck/TicNote Lite.png")))
        );
        assert!(matches!(
            options.resolve("data:image/png;base64,AAAA"),
            Some(ImageSource::DataUri(_))
        ));
        assert_eq!(options.resolve(""), None);
        assert_eq!(ImageOptions::default().resolve("/a.png"), None);
    }

    #[test]
    fn test_unresolvable_reference_fails_immediately() {
        let ctx = egui::Context::default();
        let loader = ImageLoader::spawn("/a.png", &ImageOptions::default(), &ctx);
        assert_eq!(loader.phase(), LoadPhase::Error);
    }

    #[test]
    fn test_data_uri_decodes() {
        let bytes = decode_data_uri(&format!("data:image/png;base64,{PIXEL_PNG}")).unwrap();
        let image = decode(&bytes).unwrap();
        assert_eq!(image.size, [1, 1]);
    }

    #[test]
    fn test_bad_payloads() {
        assert!(decode_data_uri("data:image/png,plain").is_err());
        assert!(decode_data_uri("data:image/png;base64").is_err());
        assert!(matches!(decode(b"not an image"), Err(LoadError::Decode(_))));
    }

    #[test]
    fn test_missing_local_file() {
        let err = read_local(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_local_load_end_to_end() {
        let dir = std::env::temp_dir().join(format!("showdeck-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let png = base64::engine::general_purpose::STANDARD
            .decode(PIXEL_PNG)
            .unwrap();
        std::fs::write(dir.join("pixel.png"), png).unwrap();

        let ctx = egui::Context::default();
        let options = ImageOptions {
            assets_dir: Some(dir.clone()),
            ..Default::default()
        };
        let mut loader = ImageLoader::spawn("/pixel.png", &options, &ctx);
        let deadline = Instant::now() + Duration::from_secs(5);
        while !loader.is_settled() && Instant::now() < deadline {
            loader.poll(&ctx);
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(loader.phase(), LoadPhase::Loaded);
        std::fs::remove_dir_all(&dir).ok();
    }
}
