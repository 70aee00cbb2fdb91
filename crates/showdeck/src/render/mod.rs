pub mod image_loader;
pub mod layouts;
pub mod modal;
pub mod text;
pub mod widgets;

use std::collections::HashMap;

use eframe::egui;

use crate::catalog::{SlideContent, SlideRecord};
use crate::theme::{self, Theme};

use image_loader::{ImageLoader, ImageOptions};

/// Request raised by a clicked feature card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub image: String,
    pub title: String,
}

/// What the user asked for while a slide was drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideResponse {
    pub open_image: Option<ImageRequest>,
}

impl SlideResponse {
    pub fn open(image: &str, title: &str) -> Self {
        Self {
            open_image: Some(ImageRequest {
                image: image.to_string(),
                title: title.to_string(),
            }),
        }
    }

    /// Keep the first request raised during a frame.
    pub fn merge(&mut self, other: SlideResponse) {
        if self.open_image.is_none() {
            self.open_image = other.open_image;
        }
    }
}

/// Image loaders for the slide currently mounted. Mounting a different slide drops every
/// loader and starts fresh ones, so nothing is carried over between mounts.
pub struct SlideImages {
    options: ImageOptions,
    mounted: Option<(usize, u64)>,
    loaders: HashMap<String, ImageLoader>,
    fade_in: bool,
}

impl SlideImages {
    pub fn new(options: ImageOptions) -> Self {
        Self {
            options,
            mounted: None,
            loaders: HashMap::new(),
            fade_in: true,
        }
    }

    /// Disable the fade-in, for still captures.
    pub fn without_fade(mut self) -> Self {
        self.fade_in = false;
        self
    }

    pub fn options(&self) -> &ImageOptions {
        &self.options
    }

    /// Make `slide` the mounted slide. `generation` changes when the catalog is reloaded,
    /// which remounts even if the index stays the same.
    pub fn mount(
        &mut self,
        ctx: &egui::Context,
        index: usize,
        generation: u64,
        slide: &SlideRecord,
    ) {
        if self.mounted == Some((index, generation)) {
            return;
        }
        self.loaders.clear();
        for reference in slide.content.image_refs() {
            if !self.loaders.contains_key(reference) {
                let loader = ImageLoader::spawn(reference, &self.options, ctx);
                self.loaders.insert(reference.to_string(), loader);
            }
        }
        log::debug!(
            "Mounted slide {} with {} image(s)",
            index + 1,
            self.loaders.len()
        );
        self.mounted = Some((index, generation));
    }

    /// Advance every loader. Called once per frame before drawing.
    pub fn poll(&mut self, ctx: &egui::Context) {
        for loader in self.loaders.values_mut() {
            loader.poll(ctx);
        }
    }

    pub fn get(&self, reference: &str) -> Option<&ImageLoader> {
        self.loaders.get(reference)
    }

    /// Every image of the mounted slide has loaded or failed.
    pub fn all_settled(&self) -> bool {
        self.loaders.values().all(ImageLoader::is_settled)
    }

    pub fn fade_in(&self) -> bool {
        self.fade_in
    }
}

/// Render a single slide: its background, then the layout selected by its type.
/// Unknown types draw the background only.
#[allow(clippy::too_many_arguments)]
pub fn render_slide(
    ui: &egui::Ui,
    slide: &SlideRecord,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) -> SlideResponse {
    theme::paint_background(ui.painter(), &slide.bg_gradient, theme, rect, opacity);

    let padding = egui::vec2(100.0, 70.0) * scale;
    let content = egui::Rect::from_min_max(rect.min + padding, rect.max - padding);

    match &slide.content {
        SlideContent::Cover(s) => layouts::cover::render(
            ui,
            s,
            theme,
            content,
            opacity,
            images,
            scale,
        ),
        SlideContent::Stats(s) => layouts::stats::render(
            ui,
            s,
            theme,
            content,
            opacity,
            images,
            scale,
        ),
        SlideContent::Recording(s) => layouts::recording::render(
            ui,
            s,
            theme,
            content,
            opacity,
            images,
            scale,
        ),
        SlideContent::MeetingFeatures(s) => {
            return layouts::meeting_features::render(
                ui,
                s,
                theme,
                content,
                opacity,
                images,
                scale,
            );
        }
        SlideContent::KnowledgeBase(s) => {
            return layouts::knowledge_base::render(
                ui,
                s,
                theme,
                content,
                opacity,
                images,
                scale,
            );
        }
        SlideContent::Scenarios(s) => layouts::scenarios::render(
            ui,
            s,
            theme,
            content,
            opacity,
            images,
            scale,
        ),
        SlideContent::ProductComparison(s) => layouts::product_comparison::render(
            ui,
            s,
            theme,
            content,
            opacity,
            images,
            scale,
        ),
        SlideContent::ProductEvolution(s) => layouts::product_evolution::render(
            ui,
            s,
            theme,
            content,
            opacity,
            images,
            scale,
        ),
        SlideContent::Partnership(s) => layouts::partnership::render(
            ui,
            s,
            theme,
            content,
            opacity,
            images,
            scale,
        ),
        SlideContent::Features(s) => layouts::legacy::render_features(
            ui,
            s,
            theme,
            content,
            opacity,
            scale,
        ),
        SlideContent::Design(s) => layouts::legacy::render_design(
            ui,
            s,
            theme,
            content,
            opacity,
            scale,
        ),
        SlideContent::Comparison(s) => layouts::legacy::render_comparison(
            ui,
            s,
            theme,
            content,
            opacity,
            scale,
        ),
        SlideContent::Roadmap(s) => layouts::legacy::render_roadmap(
            ui,
            s,
            theme,
            content,
            opacity,
            scale,
        ),
        SlideContent::Unknown => {}
    }
    SlideResponse::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(yaml: &str) -> SlideRecord {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_mount_creates_one_loader_per_reference() {
        let ctx = egui::Context::default();
        let mut images = SlideImages::new(ImageOptions::default());
        let record = slide(
            "id: 4\ntype: meeting_features\nfeatures:\n  - { name: A, image: /a.png }\n  - { name: B, image: /a.png }\ngifUrl: /demo.gif\n",
        );
        images.mount(&ctx, 3, 0, &record);
        assert!(images.get("/a.png").is_some());
        assert!(images.get("/demo.gif").is_some());
        assert!(images.get("/b.png").is_none());
        // No assets directory: local references fail straight away.
        assert!(images.all_settled());
    }

    #[test]
    fn test_remount_replaces_loaders() {
        let ctx = egui::Context::default();
        let mut images = SlideImages::new(ImageOptions::default());
        let first = slide("id: 1\ntype: cover\nheroImage: /hero.png\n");
        let second = slide("id: 2\ntype: partnership\npartnership:\n  image: /final.png\n");
        images.mount(&ctx, 0, 0, &first);
        images.mount(&ctx, 1, 0, &second);
        assert!(images.get("/hero.png").is_none());
        assert!(images.get("/final.png").is_some());
    }

    #[test]
    fn test_slide_without_images_is_settled() {
        let ctx = egui::Context::default();
        let mut images = SlideImages::new(ImageOptions::default());
        images.mount(&ctx, 0, 0, &slide("id: 1\ntype: roadmap\n"));
        assert!(images.all_settled());
    }

    #[test]
    fn test_response_keeps_first_request() {
        let mut response = SlideResponse::default();
        response.merge(SlideResponse::open("/a.png", "A"));
        response.merge(SlideResponse::open("/b.png", "B"));
        assert_eq!(
            response.open_image,
            Some(ImageRequest {
                image: "/a.png".into(),
                title: "A".into(),
            })
        );
    }

    /// Every string painted while rendering `record` full-frame.
    fn painted_text(record: &SlideRecord) -> Vec<String> {
        fn collect(shape: &egui::Shape, out: &mut Vec<String>) {
            match shape {
                egui::Shape::Text(text) => out.push(text.galley.text().to_string()),
                egui::Shape::Vec(shapes) => shapes.iter().for_each(|s| collect(s, out)),
                _ => {}
            }
        }

        let ctx = egui::Context::default();
        let theme = Theme::showcase();
        let mut images = SlideImages::new(ImageOptions::default());
        images.mount(&ctx, 0, 0, record);
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
                render_slide(ui, record, &theme, rect, 1.0, &images, 1.0);
            });
        });
        let mut out = Vec::new();
        for clipped in &output.shapes {
            collect(&clipped.shape, &mut out);
        }
        out
    }

    #[test]
    fn test_absent_image_is_omitted() {
        let text = painted_text(&slide("id: 1\ntype: cover\ntitle: Hi\n"));
        assert!(text.iter().any(|t| t == "Hi"));
        assert!(!text.iter().any(|t| t.contains('\u{1F4F1}')));
    }

    #[test]
    fn test_failed_image_shows_fallback() {
        // No assets directory, so the local reference fails on mount.
        let text = painted_text(&slide("id: 1\ntype: cover\ntitle: Hi\nheroImage: /hero.png\n"));
        assert!(text.iter().any(|t| t.contains('\u{1F4F1}')));
    }

    #[test]
    fn test_render_is_total_over_slide_types() {
        let ctx = egui::Context::default();
        let catalog = crate::catalog::Catalog::embedded().unwrap();
        let theme = Theme::showcase();
        let mut extra = catalog.slides.clone();
        extra.extend([
            slide("id: 20\ntype: features\nfeatures: [A, B]\nhighlight: X\n"),
            slide("id: 21\ntype: design\nspecs: [{ value: 3mm, label: Thin }]\n"),
            slide("id: 22\ntype: comparison\n"),
            slide("id: 23\ntype: roadmap\ntimeline: [{ title: Launch, status: current }]\n"),
            slide("id: 24\ntype: hologram\n"),
            slide("id: 25\ntype: product_comparison\n"),
        ]);
        for (index, record) in extra.iter().enumerate() {
            let mut images = SlideImages::new(ImageOptions::default());
            images.mount(&ctx, index, 0, record);
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let rect =
                        egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
                    let response = render_slide(ui, record, &theme, rect, 1.0, &images, 1.0);
                    assert!(response.open_image.is_none());
                });
            });
        }
    }
}
