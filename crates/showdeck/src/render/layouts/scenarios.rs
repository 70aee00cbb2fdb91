use eframe::egui::{self, FontId, Pos2};

use crate::catalog::{Scenario, ScenariosSlide};
use crate::render::SlideImages;
use crate::render::layouts::{below, grid};
use crate::render::text;
use crate::render::widgets::{self, Fit, Placeholder};
use crate::theme::{Theme, palette};

const COUNTER_COLORS: &[&str] = &["emerald", "teal", "cyan"];

/// Three-column grid of usage scenes with a counter strip underneath.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    slide: &ScenariosSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let accent = palette("teal", 300).unwrap_or(theme.accent);
    let header = text::draw_header(
        ui,
        &slide.title,
        &slide.subtitle,
        &slide.description,
        accent,
        theme,
        rect,
        opacity,
        scale,
    );
    let body = below(rect, rect.top() + header + 36.0 * scale);
    let counters_height = if slide.counters.is_empty() {
        0.0
    } else {
        110.0 * scale
    };
    let grid_area = egui::Rect::from_min_max(
        body.min,
        Pos2::new(body.right(), body.bottom() - counters_height - 24.0 * scale),
    );

    for (scenario, cell) in slide.scenarios.iter().zip(grid(
        grid_area,
        slide.scenarios.len(),
        3,
        24.0 * scale,
    )) {
        scenario_card(ui, scenario, cell, theme, opacity, images, scale);
    }

    if !slide.counters.is_empty() {
        let strip = egui::Rect::from_min_max(
            Pos2::new(body.left(), body.bottom() - counters_height),
            body.max,
        );
        widgets::card(ui, strip, theme, opacity, scale);
        widgets::counter_row(
            ui,
            &slide.counters,
            COUNTER_COLORS,
            theme,
            strip.shrink2(egui::vec2(16.0, 16.0) * scale),
            opacity,
            scale,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn scenario_card(
    ui: &egui::Ui,
    scenario: &Scenario,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let accent = theme.accent_for(&scenario.color);
    widgets::card(ui, rect, theme, opacity, scale);

    let media = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), rect.height() * 0.5))
        .shrink(6.0 * scale);
    widgets::image_slot(
        ui,
        images,
        scenario.image.as_deref(),
        media,
        Fit::Cover,
        &Placeholder {
            fallback_icon: &scenario.icon,
            ..Default::default()
        },
        theme,
        opacity,
        scale,
    );
    if !scenario.category.is_empty() {
        let font_size = theme.small_size * 0.8 * scale;
        let label_w = ui
            .painter()
            .layout_no_wrap(
                scenario.category.clone(),
                FontId::proportional(font_size),
                theme.heading_color,
            )
            .rect
            .width();
        widgets::pill(
            ui,
            &scenario.category,
            Pos2::new(
                media.left() + 16.0 * scale + label_w / 2.0 + 16.0 * scale,
                media.top() + 30.0 * scale,
            ),
            Theme::with_opacity(theme.accent_strong(&scenario.color), 0.9 * opacity),
            Theme::with_opacity(theme.heading_color, opacity),
            font_size,
            scale,
        );
    }

    let inner = below(rect, media.bottom() + 14.0 * scale).shrink2(egui::vec2(20.0 * scale, 0.0));
    let mut y = inner.top();
    let icon_w = text::draw_line(
        ui,
        &scenario.icon,
        Pos2::new(inner.left(), y),
        FontId::proportional(theme.body_size * scale),
        Theme::with_opacity(accent, opacity),
    )
    .x;
    let title_left = inner.left() + icon_w + 10.0 * scale;
    y += text::draw_text(
        ui,
        &scenario.title,
        Pos2::new(title_left, y),
        theme.body_size * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        inner.right() - title_left,
    );
    y += 8.0 * scale;
    text::draw_text(
        ui,
        &scenario.description,
        Pos2::new(inner.left(), y),
        theme.small_size * 0.85 * scale,
        Theme::with_opacity(theme.muted, opacity),
        inner.width(),
    );
}
