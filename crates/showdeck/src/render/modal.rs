//! Full-screen lightbox for feature images.

use eframe::egui::{self, Color32, FontId, Pos2, Stroke};

use crate::controller::ModalState;
use crate::render::image_loader::{ImageLoader, ImageOptions};
use crate::render::text;
use crate::render::widgets::{self, Fit, Placeholder};
use crate::theme::Theme;

/// Owns the loader for the image shown in the lightbox. The loader follows the modal
/// state: opened images start loading, closing drops the loader.
#[derive(Default)]
pub struct Lightbox {
    loader: Option<ImageLoader>,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the loader in line with `modal` and advance it.
    pub fn sync(&mut self, ctx: &egui::Context, modal: &ModalState, options: &ImageOptions) {
        if !modal.is_open {
            self.loader = None;
            return;
        }
        let stale = self
            .loader
            .as_ref()
            .is_none_or(|loader| loader.reference() != modal.image);
        if stale {
            log::debug!("Lightbox loading {}", modal.image);
            self.loader = Some(ImageLoader::spawn(&modal.image, options, ctx));
        }
        if let Some(loader) = &mut self.loader {
            loader.poll(ctx);
        }
    }

    /// Draw the lightbox over `screen` when `modal` is open. Returns true when the
    /// viewer asked to close it: a click on the backdrop or the close button. Clicks on
    /// the image itself are swallowed.
    pub fn show(
        &self,
        ui: &egui::Ui,
        modal: &ModalState,
        theme: &Theme,
        screen: egui::Rect,
        scale: f32,
    ) -> bool {
        if !modal.is_open {
            return false;
        }
        let painter = ui.painter();
        painter.rect_filled(screen, 0.0, Color32::from_black_alpha(204));

        // Registered first so that the image and the close button sit above it.
        let backdrop =
            ui.interact(screen, egui::Id::new("lightbox_backdrop"), egui::Sense::click());

        let frame = egui::Rect::from_center_size(
            screen.center(),
            egui::vec2(screen.width() * 0.9, screen.height() * 0.8),
        );
        let pending = egui::Rect::from_center_size(
            screen.center(),
            egui::vec2(frame.width().min(frame.height()) * 0.5, frame.height() * 0.5),
        );
        let drawn = match self.loader.as_ref().and_then(|l| l.texture()) {
            Some(texture) => {
                let rect = widgets::fit_rect(texture.size_vec2(), frame, Fit::Contain);
                widgets::loader_slot(
                    ui,
                    self.loader.as_ref(),
                    true,
                    rect,
                    Fit::Contain,
                    &Placeholder::default(),
                    theme,
                    1.0,
                    scale,
                )
                .unwrap_or(rect)
            }
            None => {
                widgets::loader_slot(
                    ui,
                    self.loader.as_ref(),
                    true,
                    pending,
                    Fit::Contain,
                    &Placeholder {
                        loading_label: &modal.title,
                        fallback_icon: "\u{1F5BC}",
                        ..Default::default()
                    },
                    theme,
                    1.0,
                    scale,
                );
                pending
            }
        };
        // Hit area only: takes clicks on the image so they never reach the backdrop.
        let _image_hit = ui.interact(drawn, egui::Id::new("lightbox_image"), egui::Sense::click());

        // Close button, top right
        let close_side = 56.0 * scale;
        let close = egui::Rect::from_min_size(
            Pos2::new(
                screen.right() - close_side - 32.0 * scale,
                screen.top() + 32.0 * scale,
            ),
            egui::vec2(close_side, close_side),
        );
        let close_response =
            ui.interact(close, egui::Id::new("lightbox_close"), egui::Sense::click());
        let close_fill = if close_response.hovered() {
            Color32::from_white_alpha(64)
        } else {
            Color32::from_white_alpha(32)
        };
        painter.circle_filled(close.center(), close_side / 2.0, close_fill);
        painter.circle_stroke(
            close.center(),
            close_side / 2.0,
            Stroke::new(1.0, Color32::from_white_alpha(80)),
        );
        text::draw_line_centered(
            ui,
            "\u{2715}",
            close.center(),
            FontId::proportional(close_side * 0.45),
            Color32::WHITE,
        );

        // Title pill, bottom centre
        if !modal.title.is_empty() {
            let font_size = theme.body_size * scale;
            widgets::pill(
                ui,
                &modal.title,
                Pos2::new(screen.center().x, screen.bottom() - 56.0 * scale),
                Color32::from_black_alpha(160),
                Color32::WHITE,
                font_size,
                scale,
            );
        }

        backdrop.clicked() || close_response.clicked()
    }
}
