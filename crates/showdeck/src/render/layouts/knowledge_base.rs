use eframe::egui::{self, FontId, Pos2};

use crate::catalog::{Feature, KnowledgeBaseSlide, WorkflowStep};
use crate::render::layouts::{below, columns};
use crate::render::widgets::{self, Fit, Placeholder};
use crate::render::{SlideImages, SlideResponse, text};
use crate::theme::{Theme, palette};

const STAT_COLORS: &[&str] = &["cyan", "blue", "indigo"];

/// Feature cards across the top, then the stats panel beside the workflow strip.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    slide: &KnowledgeBaseSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) -> SlideResponse {
    let accent = palette("cyan", 300).unwrap_or(theme.accent);
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
    let has_footer = !slide.stats.is_empty() || !slide.workflow.is_empty();
    let footer_height = if has_footer { 220.0 * scale } else { 0.0 };
    let cards_area = egui::Rect::from_min_max(
        body.min,
        Pos2::new(body.right(), body.bottom() - footer_height - 28.0 * scale),
    );

    let mut response = SlideResponse::default();
    let count = slide.features.len();
    if count > 0 {
        let weights = vec![1.0; count];
        for (i, (feature, cell)) in slide
            .features
            .iter()
            .zip(columns(cards_area, &weights, 24.0 * scale))
            .enumerate()
        {
            response.merge(feature_card(
                ui,
                feature,
                egui::Id::new(("knowledge_feature", i)),
                cell,
                theme,
                opacity,
                images,
                scale,
            ));
        }
    }

    if has_footer {
        let footer = egui::Rect::from_min_max(
            Pos2::new(body.left(), body.bottom() - footer_height),
            body.max,
        );
        let cols = columns(footer, &[1.0, 1.0], 32.0 * scale);

        widgets::card(ui, cols[0], theme, opacity, scale);
        let inner = cols[0].shrink(24.0 * scale);
        let h = text::draw_text_centered(
            ui,
            &slide.stats_heading,
            inner.center().x,
            inner.top(),
            theme.body_size * scale,
            Theme::with_opacity(theme.heading_color, opacity),
            inner.width(),
        );
        widgets::counter_row(
            ui,
            &slide.stats,
            STAT_COLORS,
            theme,
            below(inner, inner.top() + h + 20.0 * scale),
            opacity,
            scale,
        );

        widgets::card(ui, cols[1], theme, opacity, scale);
        let inner = cols[1].shrink(24.0 * scale);
        let h = text::draw_text_centered(
            ui,
            &slide.workflow_heading,
            inner.center().x,
            inner.top(),
            theme.body_size * scale,
            Theme::with_opacity(theme.heading_color, opacity),
            inner.width(),
        );
        workflow(
            ui,
            &slide.workflow,
            below(inner, inner.top() + h + 20.0 * scale),
            theme,
            opacity,
            scale,
        );
    }

    response
}

#[allow(clippy::too_many_arguments)]
fn feature_card(
    ui: &egui::Ui,
    feature: &Feature,
    id: egui::Id,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) -> SlideResponse {
    let accent = theme.accent_for(&feature.color);
    widgets::card(ui, rect, theme, opacity, scale);
    let inner = rect.shrink(20.0 * scale);

    let media = egui::Rect::from_min_size(
        inner.min,
        egui::vec2(inner.width(), inner.height() * 0.45),
    );
    widgets::image_slot(
        ui,
        images,
        feature.image.as_deref(),
        media,
        Fit::Contain,
        &Placeholder {
            fallback_icon: &feature.icon,
            ..Default::default()
        },
        theme,
        opacity,
        scale,
    );

    let mut y = media.bottom() + 16.0 * scale;
    let icon_size = theme.body_size * scale;
    let title_w = text::draw_line(
        ui,
        &feature.icon,
        Pos2::new(inner.left(), y),
        FontId::proportional(icon_size),
        Theme::with_opacity(accent, opacity),
    )
    .x;
    let name_left = inner.left() + title_w + 10.0 * scale;
    y += text::draw_text(
        ui,
        &feature.name,
        Pos2::new(name_left, y),
        theme.body_size * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        inner.right() - name_left,
    )
    .max(icon_size);
    y += 6.0 * scale;
    y += text::draw_text(
        ui,
        &feature.title,
        Pos2::new(inner.left(), y),
        theme.small_size * 0.95 * scale,
        Theme::with_opacity(accent, opacity),
        inner.width(),
    );
    y += 8.0 * scale;
    text::draw_text(
        ui,
        &feature.description,
        Pos2::new(inner.left(), y),
        theme.small_size * 0.85 * scale,
        Theme::with_opacity(theme.muted, opacity),
        inner.width(),
    );

    match feature.image.as_deref().filter(|i| !i.is_empty()) {
        Some(image) if widgets::clickable(ui, rect, id, accent, opacity, scale) => {
            SlideResponse::open(image, &feature.name)
        }
        _ => SlideResponse::default(),
    }
}

fn workflow(
    ui: &egui::Ui,
    steps: &[WorkflowStep],
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) {
    if steps.is_empty() {
        return;
    }
    let arrow_w = 40.0 * scale;
    let step_w = (rect.width() - arrow_w * (steps.len() - 1) as f32) / steps.len() as f32;
    let tile_side = 56.0 * scale;
    for (i, step) in steps.iter().enumerate() {
        let left = rect.left() + i as f32 * (step_w + arrow_w);
        let cx = left + step_w / 2.0;
        let tile = egui::Rect::from_min_size(
            Pos2::new(cx - tile_side / 2.0, rect.top()),
            egui::vec2(tile_side, tile_side),
        );
        widgets::icon_tile(
            ui,
            &step.icon,
            tile,
            Theme::with_opacity(theme.accent_strong(&step.color), 0.8),
            opacity,
            scale,
        );
        let mut y = tile.bottom() + 10.0 * scale;
        y += text::draw_text_centered(
            ui,
            &step.title,
            cx,
            y,
            theme.small_size * scale,
            Theme::with_opacity(theme.heading_color, opacity),
            step_w,
        );
        text::draw_text_centered(
            ui,
            &step.caption,
            cx,
            y + 2.0 * scale,
            theme.small_size * 0.8 * scale,
            Theme::with_opacity(theme.muted, opacity),
            step_w,
        );
        if i + 1 < steps.len() {
            text::draw_line_centered(
                ui,
                "\u{2192}",
                Pos2::new(left + step_w + arrow_w / 2.0, tile.center().y),
                FontId::proportional(theme.body_size * scale),
                Theme::with_opacity(theme.muted, opacity),
            );
        }
    }
}
