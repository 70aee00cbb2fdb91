use eframe::egui::{self, FontId, Pos2};

use crate::catalog::CoverSlide;
use crate::render::SlideImages;
use crate::render::layouts::columns;
use crate::render::text;
use crate::render::widgets::{self, Fit, Placeholder};
use crate::theme::{Theme, palette};

/// Title block on the left, hero product shot on the right.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    slide: &CoverSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let cols = columns(rect, &[1.0, 1.0], 80.0 * scale);
    let (left, right) = (cols[0], cols[1]);

    let accent = palette("blue", 300).unwrap_or(theme.accent);
    let width = left.width();

    // Measure first so the text block can be centred vertically.
    let title_size = theme.h1_size * scale;
    let subtitle_size = theme.h3_size * 1.2 * scale;
    let body_size = theme.body_size * scale;
    let gap = 28.0 * scale;
    let pill_height = body_size * 0.9 + 16.0 * scale;
    let block_height = text::measure_text(ui, &slide.title, title_size, width).y
        + gap
        + text::measure_text(ui, &slide.subtitle, subtitle_size, width).y
        + gap
        + text::measure_text(ui, &slide.description, body_size, width).y
        + gap
        + pill_height
        + gap
        + body_size * 1.4;
    let mut y = left.center().y - block_height / 2.0;

    y += text::draw_text(
        ui,
        &slide.title,
        Pos2::new(left.left(), y),
        title_size,
        Theme::with_opacity(theme.heading_color, opacity),
        width,
    );
    y += gap;
    y += text::draw_text(
        ui,
        &slide.subtitle,
        Pos2::new(left.left(), y),
        subtitle_size,
        Theme::with_opacity(accent, opacity),
        width,
    );
    y += gap;
    y += text::draw_text(
        ui,
        &slide.description,
        Pos2::new(left.left(), y),
        body_size,
        Theme::with_opacity(theme.foreground, opacity * 0.9),
        width * 0.9,
    );
    y += gap;

    if !slide.badge.is_empty() {
        badge(ui, &slide.badge, Pos2::new(left.left(), y), theme, opacity, scale);
        y += pill_height + gap;
    }

    if !slide.tagline.is_empty() {
        let mut x = left.left();
        let icon_size = body_size * 1.4;
        if let Some(icon) = slide.tagline_icon.as_deref() {
            let icon_rect =
                egui::Rect::from_min_size(Pos2::new(x, y), egui::vec2(icon_size, icon_size));
            widgets::image_slot(
                ui,
                images,
                Some(icon),
                icon_rect,
                Fit::Contain,
                &Placeholder {
                    fallback_icon: "\u{2728}",
                    ..Default::default()
                },
                theme,
                opacity,
                scale,
            );
            x += icon_size + 12.0 * scale;
        }
        text::draw_line(
            ui,
            &slide.tagline,
            Pos2::new(x, y + (icon_size - body_size * 1.2) / 2.0),
            FontId::proportional(body_size),
            Theme::with_opacity(theme.muted, opacity),
        );
    }

    // Hero card
    let side = right.width().min(right.height()) * 0.9;
    let hero = egui::Rect::from_center_size(right.center(), egui::vec2(side, side));
    widgets::card(ui, hero, theme, opacity, scale);
    widgets::image_slot(
        ui,
        images,
        slide.hero_image.as_deref(),
        hero.shrink(32.0 * scale),
        Fit::Contain,
        &Placeholder {
            loading_label: &slide.hero_label,
            fallback_icon: "\u{1F4F1}",
            fallback_lines: &slide.hero_fallback,
        },
        theme,
        opacity,
        scale,
    );
}

/// Pill with a green status dot ahead of the label.
fn badge(ui: &egui::Ui, label: &str, top_left: Pos2, theme: &Theme, opacity: f32, scale: f32) {
    let font_size = theme.body_size * 0.9 * scale;
    let dot_radius = 6.0 * scale;
    let padding = egui::vec2(20.0 * scale, 8.0 * scale);
    let color = Theme::with_opacity(theme.heading_color, opacity);
    let galley = ui
        .painter()
        .layout_no_wrap(label.to_string(), FontId::proportional(font_size), color);
    let size = egui::vec2(
        galley.rect.width() + dot_radius * 2.0 + 12.0 * scale,
        galley.rect.height(),
    ) + padding * 2.0;
    let rect = egui::Rect::from_min_size(top_left, size);
    ui.painter()
        .rect_filled(rect, size.y / 2.0, Theme::fade(theme.card, opacity * 1.5));

    let dot_color = palette("green", 400).unwrap_or(theme.accent);
    ui.painter().circle_filled(
        Pos2::new(rect.left() + padding.x + dot_radius, rect.center().y),
        dot_radius,
        Theme::with_opacity(dot_color, opacity),
    );
    ui.painter().galley(
        Pos2::new(
            rect.left() + padding.x + dot_radius * 2.0 + 12.0 * scale,
            rect.top() + padding.y,
        ),
        galley,
        color,
    );
}
