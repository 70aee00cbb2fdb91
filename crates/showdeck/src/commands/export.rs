use std::path::{Path, PathBuf};

use anyhow::Context;
use eframe::egui;

use crate::catalog::Catalog;
use crate::render::{self, SlideImages};
use crate::render::image_loader::ImageOptions;
use crate::theme::Theme;

struct ExportApp {
    catalog: Catalog,
    theme: Theme,
    images: SlideImages,
    output_dir: PathBuf,
    current_slide: usize,
    screenshot_requested: bool,
    failures: usize,
    done: bool,
}

impl ExportApp {
    fn new(catalog: Catalog, images: ImageOptions, output_dir: PathBuf) -> Self {
        Self {
            catalog,
            theme: Theme::showcase(),
            images: SlideImages::new(images).without_fade(),
            output_dir,
            current_slide: 0,
            screenshot_requested: false,
            failures: 0,
            done: false,
        }
    }

    fn slide_count(&self) -> usize {
        self.catalog.len()
    }
}

impl eframe::App for ExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.done {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // Check for screenshot result from previous frame
        let mut got_screenshot = false;
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    let filename = format!("slide-{:02}.png", self.current_slide + 1);
                    let path = self.output_dir.join(&filename);
                    match save_color_image(image, &path) {
                        Ok(()) => eprintln!("  Saved {filename}"),
                        Err(e) => {
                            eprintln!("  Failed to save {filename}: {e:#}");
                            self.failures += 1;
                        }
                    }
                    got_screenshot = true;
                }
            }
        });

        if got_screenshot {
            self.screenshot_requested = false;
            self.current_slide += 1;
            if self.current_slide >= self.slide_count() {
                if self.failures > 0 {
                    log::warn!("{} slide(s) could not be saved", self.failures);
                }
                self.done = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        let idx = self.current_slide;
        let Some(slide) = self.catalog.get(idx) else {
            self.done = true;
            return;
        };
        self.images.mount(ctx, idx, 0, slide);
        self.images.poll(ctx);

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scale = {
                    let ref_w = 1920.0;
                    let ref_h = 1080.0;
                    (rect.width() / ref_w).min(rect.height() / ref_h)
                };
                render::render_slide(ui, slide, &self.theme, rect, 1.0, &self.images, scale);
            });

        // Capture only once every image has loaded or failed; the shot arrives next frame
        if !self.screenshot_requested && self.images.all_settled() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
        }

        ctx.request_repaint();
    }
}

fn save_color_image(image: &egui::ColorImage, path: &Path) -> anyhow::Result<()> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
        .collect();

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn run(
    catalog: Catalog,
    images: ImageOptions,
    output_dir: PathBuf,
    width: u32,
    height: u32,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    eprintln!(
        "Exporting {} slides to {} ({}x{})",
        catalog.len(),
        output_dir.display(),
        width,
        height,
    );

    let title = format!("{} export", catalog.title());

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_title(&title)
        .with_decorations(false);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let output_dir_clone = output_dir.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ExportApp::new(catalog, images, output_dir_clone)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    eprintln!("Export complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_color_image_writes_png() {
        let dir = std::env::temp_dir().join(format!("showdeck-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("slide-01.png");
        let image = egui::ColorImage::from_rgba_unmultiplied([4, 2], &[255; 32]);
        save_color_image(&image, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 2));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let image = egui::ColorImage::from_rgba_unmultiplied([1, 1], &[0, 0, 0, 255]);
        assert!(save_color_image(&image, Path::new("/nonexistent/dir/slide.png")).is_err());
    }
}
