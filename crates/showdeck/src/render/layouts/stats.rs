use eframe::egui::{self, Color32, Pos2};

use crate::catalog::{HardwareCard, Stat, StatsSlide};
use crate::render::SlideImages;
use crate::render::layouts::{below, columns, grid};
use crate::render::text;
use crate::render::widgets::{self, Fit, Placeholder};
use crate::theme::Theme;

/// Hardware highlights as a 2x2 card grid. Decks without cards get a single row of
/// headline stats instead.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    slide: &StatsSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let header = text::draw_header(
        ui,
        &slide.title,
        "",
        "",
        theme.accent,
        theme,
        rect,
        opacity,
        scale,
    );
    let body = below(rect, rect.top() + header + 48.0 * scale);

    if slide.cards.is_empty() {
        stat_row(ui, &slide.stats, theme, body, opacity, scale);
        return;
    }

    let width = body.width().min(1500.0 * scale);
    let area = egui::Rect::from_center_size(body.center(), egui::vec2(width, body.height()));
    for (card, cell) in slide
        .cards
        .iter()
        .zip(grid(area, slide.cards.len(), 2, 32.0 * scale))
    {
        hardware_card(ui, card, cell, theme, opacity, images, scale);
    }
}

#[allow(clippy::too_many_arguments)]
fn hardware_card(
    ui: &egui::Ui,
    card: &HardwareCard,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let accent = theme.accent_for(&card.color);
    widgets::card_with(
        ui,
        rect,
        Theme::with_opacity(accent, 0.12),
        Theme::with_opacity(accent, 0.3),
        opacity,
        scale,
    );

    let inner = rect.shrink(32.0 * scale);
    let cols = columns(inner, &[3.0, 2.0], 24.0 * scale);
    let (text_col, media_col) = (cols[0], cols[1]);

    let mut y = text_col.top();
    y += text::draw_text(
        ui,
        &card.value,
        Pos2::new(text_col.left(), y),
        theme.h2_size * 0.9 * scale,
        Theme::with_opacity(accent, opacity),
        text_col.width(),
    );
    y += 8.0 * scale;
    y += text::draw_text(
        ui,
        &card.title,
        Pos2::new(text_col.left(), y),
        theme.h3_size * 0.9 * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        text_col.width(),
    );
    y += 10.0 * scale;
    if !card.caption.is_empty() {
        y += text::draw_text(
            ui,
            &card.caption,
            Pos2::new(text_col.left(), y),
            theme.small_size * scale,
            Theme::with_opacity(theme.muted, opacity),
            text_col.width(),
        );
        y += 8.0 * scale;
    }
    for line in &card.lines {
        y += text::draw_text(
            ui,
            &format!("\u{2022} {line}"),
            Pos2::new(text_col.left(), y),
            theme.small_size * scale,
            Theme::with_opacity(theme.muted, opacity),
            text_col.width(),
        );
        y += 4.0 * scale;
    }

    let side = media_col.width().min(media_col.height());
    let media = egui::Rect::from_center_size(media_col.center(), egui::vec2(side, side));
    if card.image.is_some() {
        widgets::image_slot(
            ui,
            images,
            card.image.as_deref(),
            media,
            Fit::Contain,
            &Placeholder {
                fallback_icon: &card.icon,
                ..Default::default()
            },
            theme,
            opacity,
            scale,
        );
    } else {
        widgets::icon_tile(
            ui,
            &card.icon,
            media.shrink(side * 0.15),
            Theme::with_opacity(accent, 0.2),
            opacity,
            scale,
        );
    }
}

fn stat_row(
    ui: &egui::Ui,
    stats: &[Stat],
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    if stats.is_empty() {
        return;
    }
    let height = 320.0 * scale;
    let row = egui::Rect::from_center_size(rect.center(), egui::vec2(rect.width(), height));
    for (stat, cell) in stats
        .iter()
        .zip(columns(row, &vec![1.0; stats.len()], 32.0 * scale))
    {
        widgets::card(ui, cell, theme, opacity, scale);
        let icon = egui::Rect::from_center_size(
            Pos2::new(cell.center().x, cell.top() + 80.0 * scale),
            egui::vec2(88.0 * scale, 88.0 * scale),
        );
        widgets::icon_tile(ui, &stat.icon, icon, Color32::TRANSPARENT, opacity, scale);
        widgets::stat_block(
            ui,
            &stat.number,
            &stat.label,
            "",
            theme.accent,
            theme,
            egui::Rect::from_min_max(
                Pos2::new(cell.left() + 16.0 * scale, icon.bottom() + 24.0 * scale),
                Pos2::new(cell.right() - 16.0 * scale, cell.bottom()),
            ),
            opacity,
            scale,
        );
    }
}
