//! Layouts kept for decks written before the product-line slide types.

use eframe::egui::{self, FontId, Pos2, Stroke};

use crate::catalog::{
    ComparisonColumn, LegacyComparisonSlide, LegacyDesignSlide, LegacyFeaturesSlide,
    LegacyRoadmapSlide, MilestoneStatus,
};
use crate::render::layouts::{below, columns, grid};
use crate::render::text;
use crate::render::widgets;
use crate::theme::{Theme, palette};

fn heading(
    ui: &egui::Ui,
    title: &str,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) -> egui::Rect {
    let h = text::draw_header(ui, title, "", "", theme.accent, theme, rect, opacity, scale);
    below(rect, rect.top() + h + 56.0 * scale)
}

/// Bullet list with an optional highlight pill, microphone tile on the right.
pub fn render_features(
    ui: &egui::Ui,
    slide: &LegacyFeaturesSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let body = heading(ui, &slide.title, theme, rect, opacity, scale);
    let cols = columns(body, &[3.0, 2.0], 64.0 * scale);

    // Estimate height for vertical centering
    let line = theme.body_size * scale;
    let mut total_height = slide.features.len() as f32 * (line * 1.3 + 16.0 * scale);
    if slide.highlight.is_some() {
        total_height += line * 2.5;
    }
    let mut y = (cols[0].center().y - total_height / 2.0).max(cols[0].top());

    y += text::draw_bullets(
        ui,
        &slide.features,
        theme.accent,
        theme,
        Pos2::new(cols[0].left(), y),
        cols[0].width(),
        opacity,
        scale,
    );
    if let Some(highlight) = slide.highlight.as_deref().filter(|h| !h.is_empty()) {
        let size = text::measure_text(ui, highlight, line, f32::INFINITY);
        widgets::pill(
            ui,
            highlight,
            Pos2::new(cols[0].left() + size.x / 2.0 + 16.0 * scale, y + line * 1.6),
            Theme::with_opacity(theme.accent, 0.3 * opacity),
            Theme::with_opacity(theme.heading_color, opacity),
            line,
            scale,
        );
    }

    let side = cols[1].width().min(cols[1].height()) * 0.7;
    widgets::icon_tile(
        ui,
        "\u{1F3A4}",
        egui::Rect::from_center_size(cols[1].center(), egui::vec2(side, side)),
        theme.card,
        opacity,
        scale,
    );
}

/// Grid of big-number design specs.
pub fn render_design(
    ui: &egui::Ui,
    slide: &LegacyDesignSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let body = heading(ui, &slide.title, theme, rect, opacity, scale);
    let cols = if slide.specs.len() <= 3 { slide.specs.len() } else { 2 };
    let area = egui::Rect::from_center_size(
        body.center(),
        egui::vec2(body.width().min(1400.0 * scale), body.height()),
    );
    for (spec, cell) in slide
        .specs
        .iter()
        .zip(grid(area, slide.specs.len(), cols, 28.0 * scale))
    {
        widgets::card(ui, cell, theme, opacity, scale);
        let inner = cell.shrink(28.0 * scale);
        let mut y = inner.top();
        y += text::draw_text_centered(
            ui,
            &spec.value,
            inner.center().x,
            y,
            theme.h2_size * scale,
            Theme::with_opacity(theme.accent, opacity),
            inner.width(),
        );
        y += 8.0 * scale;
        y += text::draw_text_centered(
            ui,
            &spec.label,
            inner.center().x,
            y,
            theme.h3_size * 0.85 * scale,
            Theme::with_opacity(theme.heading_color, opacity),
            inner.width(),
        );
        text::draw_text_centered(
            ui,
            &spec.desc,
            inner.center().x,
            y + 8.0 * scale,
            theme.small_size * scale,
            Theme::with_opacity(theme.muted, opacity),
            inner.width(),
        );
    }
}

/// Two columns: the traditional approach against ours.
pub fn render_comparison(
    ui: &egui::Ui,
    slide: &LegacyComparisonSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let body = heading(ui, &slide.title, theme, rect, opacity, scale);
    let cols = columns(body, &[1.0, 1.0], 48.0 * scale);
    let muted = palette("slate", 400).unwrap_or(theme.muted);
    comparison_column(
        ui,
        &slide.comparison.traditional,
        muted,
        "\u{2717}",
        cols[0],
        theme,
        opacity,
        scale,
    );
    comparison_column(
        ui,
        &slide.comparison.ours,
        theme.accent,
        "\u{2713}",
        cols[1],
        theme,
        opacity,
        scale,
    );
}

#[allow(clippy::too_many_arguments)]
fn comparison_column(
    ui: &egui::Ui,
    column: &ComparisonColumn,
    accent: egui::Color32,
    marker: &str,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) {
    widgets::card_with(
        ui,
        rect,
        Theme::with_opacity(accent, 0.1),
        Theme::with_opacity(accent, 0.35),
        opacity,
        scale,
    );
    let inner = rect.shrink(36.0 * scale);
    let mut y = inner.top();
    y += text::draw_text(
        ui,
        &column.title,
        Pos2::new(inner.left(), y),
        theme.h3_size * scale,
        Theme::with_opacity(accent, opacity),
        inner.width(),
    );
    y += 24.0 * scale;
    let font = FontId::proportional(theme.body_size * scale);
    for item in &column.items {
        let marker_w = text::draw_line(
            ui,
            marker,
            Pos2::new(inner.left(), y),
            font.clone(),
            Theme::with_opacity(accent, opacity),
        )
        .x;
        let indent = marker_w + 14.0 * scale;
        y += text::draw_text(
            ui,
            item,
            Pos2::new(inner.left() + indent, y),
            font.size,
            Theme::with_opacity(theme.foreground, opacity),
            inner.width() - indent,
        );
        y += 18.0 * scale;
    }
}

/// Horizontal timeline of milestones.
pub fn render_roadmap(
    ui: &egui::Ui,
    slide: &LegacyRoadmapSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let body = heading(ui, &slide.title, theme, rect, opacity, scale);
    let count = slide.timeline.len();
    if count == 0 {
        return;
    }
    let cell_w = body.width() / count as f32;
    let line_y = body.center().y - 40.0 * scale;
    let first = body.left() + cell_w / 2.0;
    let last = body.right() - cell_w / 2.0;
    ui.painter().line_segment(
        [Pos2::new(first, line_y), Pos2::new(last, line_y)],
        Stroke::new(3.0 * scale, Theme::fade(theme.card_border, opacity)),
    );

    for (i, milestone) in slide.timeline.iter().enumerate() {
        let cx = body.left() + cell_w * (i as f32 + 0.5);
        let color = match milestone.status {
            MilestoneStatus::Completed => palette("emerald", 400),
            MilestoneStatus::Current => palette("blue", 400),
            MilestoneStatus::Planned => palette("slate", 400),
        }
        .unwrap_or(theme.muted);
        let radius = if milestone.status == MilestoneStatus::Current {
            16.0 * scale
        } else {
            12.0 * scale
        };
        ui.painter().circle_filled(
            Pos2::new(cx, line_y),
            radius,
            Theme::with_opacity(color, opacity),
        );

        let mut y = line_y + 36.0 * scale;
        y += text::draw_text_centered(
            ui,
            &milestone.phase,
            cx,
            y,
            theme.small_size * scale,
            Theme::with_opacity(color, opacity),
            cell_w - 24.0 * scale,
        );
        y += 6.0 * scale;
        y += text::draw_text_centered(
            ui,
            &milestone.title,
            cx,
            y,
            theme.body_size * scale,
            Theme::with_opacity(theme.heading_color, opacity),
            cell_w - 24.0 * scale,
        );
        text::draw_text_centered(
            ui,
            milestone.status.label(),
            cx,
            y + 6.0 * scale,
            theme.small_size * 0.85 * scale,
            Theme::with_opacity(theme.muted, opacity),
            cell_w - 24.0 * scale,
        );
    }
}
