use eframe::egui::{self, Color32, Pos2};

use crate::catalog::{Contender, ProductComparisonSlide, Score, Summary};
use crate::render::SlideImages;
use crate::render::layouts::{below, columns};
use crate::render::text::{self, TableCell};
use crate::render::widgets::{self, Fit, Placeholder};
use crate::theme::{Theme, palette};

const SUMMARY_COLORS: &[&str] = &["emerald", "cyan", "teal", "blue"];

/// Score card, feature table and score card side by side, summary strip below.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    slide: &ProductComparisonSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let comparison = &slide.comparison;
    let win = palette("emerald", 400).unwrap_or(theme.accent);
    let lose = palette("red", 400).unwrap_or(theme.muted);

    let header = text::draw_header(
        ui,
        &slide.title,
        &slide.subtitle,
        &slide.description,
        palette("emerald", 300).unwrap_or(theme.accent),
        theme,
        rect,
        opacity,
        scale,
    );
    let body = below(rect, rect.top() + header + 32.0 * scale);
    let summary_height = if slide.summary.is_some() {
        150.0 * scale
    } else {
        0.0
    };
    let main = egui::Rect::from_min_max(
        body.min,
        Pos2::new(body.right(), body.bottom() - summary_height - 24.0 * scale),
    );
    let cols = columns(main, &[3.0, 6.0, 3.0], 28.0 * scale);

    score_card(
        ui,
        &comparison.ours,
        &comparison.stats.ours,
        win,
        cols[0],
        theme,
        opacity,
        images,
        scale,
    );
    score_card(
        ui,
        &comparison.theirs,
        &comparison.stats.theirs,
        lose,
        cols[2],
        theme,
        opacity,
        images,
        scale,
    );

    // Feature table
    let table = cols[1];
    widgets::card(ui, table, theme, opacity, scale);
    let rows: Vec<Vec<TableCell<'_>>> = comparison
        .features
        .iter()
        .map(|row| {
            vec![
                TableCell {
                    text: &row.name,
                    color: theme.foreground,
                },
                TableCell {
                    text: &row.ours,
                    color: if row.ours_supported() { win } else { lose },
                },
                TableCell {
                    text: &row.theirs,
                    color: if row.theirs_supported() { win } else { lose },
                },
            ]
        })
        .collect();
    let ours_label = non_empty(&comparison.ours.name, "Ours");
    let theirs_label = non_empty(&comparison.theirs.name, "Theirs");
    let inner = table.shrink(16.0 * scale);
    text::draw_table(
        ui,
        &["Feature", ours_label, theirs_label],
        &rows,
        Theme::with_opacity(win, 0.25),
        theme,
        inner.min,
        inner.width(),
        opacity,
        scale,
    );

    if let Some(summary) = &slide.summary {
        let strip = egui::Rect::from_min_max(
            Pos2::new(body.left(), body.bottom() - summary_height),
            body.max,
        );
        summary_strip(ui, summary, strip, theme, opacity, scale);
    }
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[allow(clippy::too_many_arguments)]
fn score_card(
    ui: &egui::Ui,
    contender: &Contender,
    score: &Score,
    accent: Color32,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    images: &SlideImages,
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
    let inner = rect.shrink(24.0 * scale);
    let cx = inner.center().x;

    let media_side = (inner.width() * 0.6).min(160.0 * scale);
    let media = egui::Rect::from_center_size(
        Pos2::new(cx, inner.top() + media_side / 2.0),
        egui::vec2(media_side, media_side),
    );
    if contender.image.is_some() {
        widgets::image_slot(
            ui,
            images,
            contender.image.as_deref(),
            media,
            Fit::Contain,
            &Placeholder {
                fallback_icon: &contender.icon,
                ..Default::default()
            },
            theme,
            opacity,
            scale,
        );
    } else {
        widgets::icon_tile(
            ui,
            &contender.icon,
            media,
            Theme::with_opacity(accent, 0.2),
            opacity,
            scale,
        );
    }

    let mut y = media.bottom() + 14.0 * scale;
    y += text::draw_text_centered(
        ui,
        &contender.name,
        cx,
        y,
        theme.h3_size * 0.85 * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        inner.width(),
    );
    y += 14.0 * scale;

    let line = theme.small_size * 0.85 * scale;
    for spec in &contender.specs {
        text::draw_text(
            ui,
            &spec.label,
            Pos2::new(inner.left(), y),
            line,
            Theme::with_opacity(theme.muted, opacity),
            inner.width() * 0.45,
        );
        let value_w = text::measure_text(ui, &spec.value, line, inner.width() * 0.55).x;
        let h = text::draw_text(
            ui,
            &spec.value,
            Pos2::new(inner.right() - value_w, y),
            line,
            Theme::with_opacity(theme.foreground, opacity),
            inner.width() * 0.55,
        );
        y += h.max(line * 1.2) + 6.0 * scale;
    }

    // Score, pinned to the bottom of the card
    let bar_height = 10.0 * scale;
    let bottom = inner.bottom();
    let label_size = theme.small_size * 0.85 * scale;
    let score_size = theme.h2_size * 0.8 * scale;
    let label_top = bottom - label_size * 1.3;
    let bar = egui::Rect::from_min_max(
        Pos2::new(inner.left(), label_top - 10.0 * scale - bar_height),
        Pos2::new(inner.right(), label_top - 10.0 * scale),
    );
    let score_top = bar.top() - 10.0 * scale - score_size * 1.2;
    if score_top < y {
        return;
    }
    let score_text = if score.rate.is_empty() {
        score.score.clone()
    } else {
        format!("{} \u{00B7} {}", score.score, score.rate)
    };
    text::draw_text_centered(
        ui,
        &score_text,
        cx,
        score_top,
        score_size,
        Theme::with_opacity(accent, opacity),
        inner.width(),
    );
    ui.painter()
        .rect_filled(bar, bar_height / 2.0, Theme::fade(theme.card, opacity * 1.5));
    let filled = egui::Rect::from_min_size(
        bar.min,
        egui::vec2(bar.width() * score.fraction(), bar.height()),
    );
    ui.painter()
        .rect_filled(filled, bar_height / 2.0, Theme::with_opacity(accent, opacity));
    text::draw_text_centered(
        ui,
        &contender.score_label,
        cx,
        label_top,
        label_size,
        Theme::with_opacity(theme.muted, opacity),
        inner.width(),
    );
}

fn summary_strip(
    ui: &egui::Ui,
    summary: &Summary,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) {
    widgets::card(ui, rect, theme, opacity, scale);
    let inner = rect.shrink2(egui::vec2(32.0, 18.0) * scale);
    let cols = columns(inner, &[5.0, 7.0], 32.0 * scale);

    let mut y = cols[0].top();
    y += text::draw_text(
        ui,
        &summary.title,
        Pos2::new(cols[0].left(), y),
        theme.body_size * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        cols[0].width(),
    );
    y += 6.0 * scale;
    text::draw_text(
        ui,
        &summary.text,
        Pos2::new(cols[0].left(), y),
        theme.small_size * 0.85 * scale,
        Theme::with_opacity(theme.muted, opacity),
        cols[0].width(),
    );

    widgets::counter_row(
        ui,
        &summary.counters,
        SUMMARY_COLORS,
        theme,
        cols[1],
        opacity,
        scale,
    );
}
