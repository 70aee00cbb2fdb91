use eframe::egui::{self, FontId, Pos2};

use crate::catalog::{Opportunity, PartnershipSlide, Vision};
use crate::render::SlideImages;
use crate::render::layouts::{below, columns, grid};
use crate::render::text;
use crate::render::widgets::{self, Fit, Placeholder};
use crate::theme::{Theme, palette};

/// Closing slide: partner image with the opportunities beside it, the shared vision
/// underneath and a closing line at the bottom.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    slide: &PartnershipSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let partnership = &slide.partnership;
    let accent = palette("pink", 300).unwrap_or(theme.accent);
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
    let mut body = below(rect, rect.top() + header + 32.0 * scale);

    let closing_height = if partnership.closing.is_empty() {
        0.0
    } else {
        theme.h3_size * 1.6 * scale
    };
    let vision_height = 220.0 * scale;
    let top_area = egui::Rect::from_min_max(
        body.min,
        Pos2::new(
            body.right(),
            body.bottom() - vision_height - closing_height - 48.0 * scale,
        ),
    );

    let cols = columns(top_area, &[5.0, 7.0], 32.0 * scale);
    widgets::card(ui, cols[0], theme, opacity, scale);
    widgets::image_slot(
        ui,
        images,
        partnership.image.as_deref(),
        cols[0].shrink(12.0 * scale),
        Fit::Cover,
        &Placeholder {
            fallback_icon: "\u{1F91D}",
            ..Default::default()
        },
        theme,
        opacity,
        scale,
    );

    let count = partnership.opportunities.len();
    if count > 0 {
        let gap = 16.0 * scale;
        let height = (cols[1].height() - gap * (count - 1) as f32) / count as f32;
        for (i, opportunity) in partnership.opportunities.iter().enumerate() {
            let cell = egui::Rect::from_min_size(
                Pos2::new(cols[1].left(), cols[1].top() + i as f32 * (height + gap)),
                egui::vec2(cols[1].width(), height),
            );
            opportunity_card(ui, opportunity, cell, theme, opacity, scale);
        }
    }

    body = below(body, top_area.bottom() + 24.0 * scale);
    let vision = egui::Rect::from_min_size(body.min, egui::vec2(body.width(), vision_height));
    vision_card(ui, &partnership.vision, vision, accent, theme, opacity, scale);

    if !partnership.closing.is_empty() {
        text::draw_text_centered(
            ui,
            &partnership.closing,
            body.center().x,
            vision.bottom() + 24.0 * scale,
            theme.h3_size * scale,
            Theme::with_opacity(theme.heading_color, opacity),
            body.width(),
        );
    }
}

fn opportunity_card(
    ui: &egui::Ui,
    opportunity: &Opportunity,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) {
    widgets::card(ui, rect, theme, opacity, scale);
    let inner = rect.shrink2(egui::vec2(24.0, 16.0) * scale);
    let tile_side = inner.height().min(64.0 * scale);
    let tile = egui::Rect::from_center_size(
        Pos2::new(inner.left() + tile_side / 2.0, inner.center().y),
        egui::vec2(tile_side, tile_side),
    );
    widgets::icon_tile(
        ui,
        &opportunity.icon,
        tile,
        Theme::fade(theme.card, 1.5),
        opacity,
        scale,
    );
    let left = tile.right() + 20.0 * scale;
    let width = inner.right() - left;
    let title_size = theme.body_size * scale;
    let desc_size = theme.small_size * 0.9 * scale;
    let block = text::measure_text(ui, &opportunity.title, title_size, width).y
        + 6.0 * scale
        + text::measure_text(ui, &opportunity.desc, desc_size, width).y;
    let mut y = inner.center().y - block / 2.0;
    y += text::draw_text(
        ui,
        &opportunity.title,
        Pos2::new(left, y),
        title_size,
        Theme::with_opacity(theme.heading_color, opacity),
        width,
    );
    text::draw_text(
        ui,
        &opportunity.desc,
        Pos2::new(left, y + 6.0 * scale),
        desc_size,
        Theme::with_opacity(theme.muted, opacity),
        width,
    );
}

fn vision_card(
    ui: &egui::Ui,
    vision: &Vision,
    rect: egui::Rect,
    accent: egui::Color32,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) {
    widgets::card_with(
        ui,
        rect,
        Theme::with_opacity(accent, 0.12),
        Theme::with_opacity(accent, 0.35),
        opacity,
        scale,
    );
    let inner = rect.shrink2(egui::vec2(32.0, 20.0) * scale);
    let cols = columns(inner, &[1.0, 1.0], 32.0 * scale);

    let block = theme.h3_size * 1.3 * scale + theme.body_size * 1.4 * scale;
    let mut y = cols[0].center().y - block / 2.0;
    y += text::draw_text(
        ui,
        &vision.title,
        Pos2::new(cols[0].left(), y),
        theme.h3_size * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        cols[0].width(),
    );
    text::draw_text(
        ui,
        &vision.subtitle,
        Pos2::new(cols[0].left(), y + 8.0 * scale),
        theme.small_size * scale,
        Theme::with_opacity(accent, opacity),
        cols[0].width(),
    );

    let font = FontId::proportional(theme.small_size * scale);
    for (highlight, cell) in vision.highlights.iter().zip(grid(
        cols[1],
        vision.highlights.len(),
        2,
        12.0 * scale,
    )) {
        ui.painter()
            .rect_filled(cell, 12.0 * scale, Theme::fade(theme.card, opacity));
        text::draw_line_centered(
            ui,
            &format!("\u{2728} {highlight}"),
            cell.center(),
            font.clone(),
            Theme::with_opacity(theme.foreground, opacity),
        );
    }
}
