use eframe::egui::{self, Pos2};

use crate::catalog::{CoreFeature, RecordingSlide};
use crate::render::SlideImages;
use crate::render::layouts::{below, columns};
use crate::render::text;
use crate::render::widgets::{self, Fit, Placeholder};
use crate::theme::{Theme, palette};

/// One row per core feature, text and image alternating sides.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    slide: &RecordingSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let accent = palette("emerald", 300).unwrap_or(theme.accent);
    let header = text::draw_header(
        ui,
        &slide.title,
        &slide.subtitle,
        "",
        accent,
        theme,
        rect,
        opacity,
        scale,
    );
    let body = below(rect, rect.top() + header + 40.0 * scale);
    let count = slide.core_features.len();
    if count == 0 {
        return;
    }

    let gap = 28.0 * scale;
    let row_height = (body.height() - gap * (count - 1) as f32) / count as f32;
    for (i, feature) in slide.core_features.iter().enumerate() {
        let row = egui::Rect::from_min_size(
            Pos2::new(body.left(), body.top() + i as f32 * (row_height + gap)),
            egui::vec2(body.width(), row_height),
        );
        feature_row(ui, feature, i % 2 == 1, row, theme, opacity, images, scale);
    }
}

#[allow(clippy::too_many_arguments)]
fn feature_row(
    ui: &egui::Ui,
    feature: &CoreFeature,
    mirrored: bool,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let accent = theme.accent_for(&feature.color);
    let weights: &[f32] = if mirrored { &[5.0, 7.0] } else { &[7.0, 5.0] };
    let cols = columns(rect, weights, 48.0 * scale);
    let (text_col, media_col) = if mirrored {
        (cols[1], cols[0])
    } else {
        (cols[0], cols[1])
    };

    widgets::card(ui, text_col, theme, opacity, scale);
    let inner = text_col.shrink(24.0 * scale);
    let mut y = inner.top();
    y += text::draw_text(
        ui,
        &feature.title,
        Pos2::new(inner.left(), y),
        theme.h3_size * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        inner.width(),
    );
    y += 4.0 * scale;
    y += text::draw_text(
        ui,
        &feature.subtitle,
        Pos2::new(inner.left(), y),
        theme.small_size * 1.1 * scale,
        Theme::with_opacity(accent, opacity),
        inner.width(),
    );
    y += 10.0 * scale;
    y += text::draw_text(
        ui,
        &feature.description,
        Pos2::new(inner.left(), y),
        theme.small_size * scale,
        Theme::with_opacity(theme.foreground, opacity * 0.9),
        inner.width(),
    );
    y += 12.0 * scale;
    widgets::pill_row(
        ui,
        &feature.stats,
        Pos2::new(inner.left(), y),
        inner.width(),
        accent,
        opacity,
        theme.small_size * 0.85 * scale,
        scale,
    );

    let badge_space = theme.small_size * scale + 28.0 * scale;
    let media = egui::Rect::from_min_max(
        media_col.min,
        Pos2::new(media_col.right(), media_col.bottom() - badge_space / 2.0),
    );
    widgets::image_slot(
        ui,
        images,
        feature.image.as_deref(),
        media,
        Fit::Contain,
        &Placeholder {
            fallback_icon: "\u{1F399}",
            ..Default::default()
        },
        theme,
        opacity,
        scale,
    );
    if !feature.badge.is_empty() {
        widgets::pill(
            ui,
            &feature.badge,
            Pos2::new(media.center().x, media.bottom()),
            Theme::with_opacity(theme.accent_strong(&feature.color), opacity),
            Theme::with_opacity(theme.heading_color, opacity),
            theme.small_size * 0.9 * scale,
            scale,
        );
    }
}
