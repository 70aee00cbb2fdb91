use eframe::egui::{self, FontId, Pos2};

use crate::catalog::{Feature, FeatureShowcaseSlide};
use crate::render::layouts::{below, columns, grid};
use crate::render::widgets::{self, Fit, Placeholder};
use crate::render::{SlideImages, SlideResponse, text};
use crate::theme::{Theme, palette};

const COUNTER_COLORS: &[&str] = &["purple", "blue", "green"];

/// Feature grid with counters on the left, the animated demo on the right. Feature cards
/// with an image open it in the lightbox when clicked.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    slide: &FeatureShowcaseSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) -> SlideResponse {
    let accent = palette("purple", 300).unwrap_or(theme.accent);
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
    let cols = columns(body, &[1.0, 1.0], 56.0 * scale);
    let (left, right) = (cols[0], cols[1]);

    let mut response = SlideResponse::default();

    // Left: heading, feature grid, counters
    let mut y = left.top();
    if !slide.features_heading.is_empty() {
        y += text::draw_text(
            ui,
            &slide.features_heading,
            Pos2::new(left.left(), y),
            theme.h3_size * 0.8 * scale,
            Theme::with_opacity(theme.heading_color, opacity),
            left.width(),
        );
        y += 16.0 * scale;
    }
    let counters_height = if slide.stats.is_empty() {
        0.0
    } else {
        130.0 * scale
    };
    let grid_area = egui::Rect::from_min_max(
        Pos2::new(left.left(), y),
        Pos2::new(left.right(), left.bottom() - counters_height - 20.0 * scale),
    );
    for (i, (feature, cell)) in slide
        .features
        .iter()
        .zip(grid(grid_area, slide.features.len(), 2, 16.0 * scale))
        .enumerate()
    {
        response.merge(feature_card(
            ui,
            feature,
            egui::Id::new(("meeting_feature", i)),
            cell,
            theme,
            opacity,
            scale,
        ));
    }
    if !slide.stats.is_empty() {
        let counters = egui::Rect::from_min_max(
            Pos2::new(left.left(), left.bottom() - counters_height),
            left.max,
        );
        widgets::card(ui, counters, theme, opacity, scale);
        widgets::counter_row(
            ui,
            &slide.stats,
            COUNTER_COLORS,
            theme,
            counters.shrink2(egui::vec2(16.0, 22.0) * scale),
            opacity,
            scale,
        );
    }

    // Right: demo frame, caption and flow
    let flow_height = if slide.flow.is_empty() {
        0.0
    } else {
        56.0 * scale
    };
    let caption_height = 90.0 * scale;
    let frame_space = right.height() - flow_height - caption_height;
    let frame_h = frame_space.min(640.0 * scale);
    let frame_w = (frame_h / 2.0).min(320.0 * scale);
    let frame = egui::Rect::from_min_size(
        Pos2::new(right.center().x - frame_w / 2.0, right.top()),
        egui::vec2(frame_w, frame_h),
    );
    widgets::card_with(
        ui,
        frame,
        theme.background,
        Theme::with_opacity(accent, 0.5),
        opacity,
        scale,
    );
    widgets::image_slot(
        ui,
        images,
        slide.gif_url.as_deref(),
        frame.shrink(10.0 * scale),
        Fit::Cover,
        &Placeholder {
            loading_label: "Loading demo",
            fallback_icon: "\u{1F3AC}",
            ..Default::default()
        },
        theme,
        opacity,
        scale,
    );

    let mut y = frame.bottom() + 16.0 * scale;
    y += text::draw_text_centered(
        ui,
        &slide.demo_title,
        right.center().x,
        y,
        theme.h3_size * 0.8 * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        right.width(),
    );
    y += 6.0 * scale;
    text::draw_text_centered(
        ui,
        &slide.demo_caption,
        right.center().x,
        y,
        theme.small_size * scale,
        Theme::with_opacity(theme.muted, opacity),
        right.width(),
    );

    if !slide.flow.is_empty() {
        flow(
            ui,
            &slide.flow,
            Pos2::new(right.center().x, right.bottom() - flow_height / 2.0),
            theme,
            opacity,
            scale,
        );
    }

    response
}

fn feature_card(
    ui: &egui::Ui,
    feature: &Feature,
    id: egui::Id,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) -> SlideResponse {
    let accent = theme.accent_for(&feature.color);
    widgets::card(ui, rect, theme, opacity, scale);

    let inner = rect.shrink(18.0 * scale);
    let icon_side = 52.0 * scale;
    let icon = egui::Rect::from_min_size(inner.min, egui::vec2(icon_side, icon_side));
    widgets::icon_tile(
        ui,
        &feature.icon,
        icon,
        Theme::with_opacity(accent, 0.25),
        opacity,
        scale,
    );

    let text_left = icon.right() + 14.0 * scale;
    let text_width = inner.right() - text_left;
    let mut y = inner.top();
    y += text::draw_text(
        ui,
        &feature.name,
        Pos2::new(text_left, y),
        theme.body_size * 0.9 * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        text_width,
    );
    y += 2.0 * scale;
    y += text::draw_text(
        ui,
        &feature.title,
        Pos2::new(text_left, y),
        theme.small_size * 0.85 * scale,
        Theme::with_opacity(accent, opacity),
        text_width,
    );
    let desc_top = y.max(icon.bottom()) + 8.0 * scale;
    text::draw_text(
        ui,
        &feature.description,
        Pos2::new(inner.left(), desc_top),
        theme.small_size * 0.8 * scale,
        Theme::with_opacity(theme.muted, opacity),
        inner.width(),
    );

    let Some(image) = feature.image.as_deref().filter(|i| !i.is_empty()) else {
        return SlideResponse::default();
    };
    text::draw_line(
        ui,
        "\u{1F50D}",
        Pos2::new(inner.right() - 20.0 * scale, inner.top()),
        FontId::proportional(theme.small_size * scale),
        Theme::with_opacity(theme.muted, opacity * 0.7),
    );
    if widgets::clickable(ui, rect, id, accent, opacity, scale) {
        log::debug!("Opening feature image {image}");
        return SlideResponse::open(image, &feature.name);
    }
    SlideResponse::default()
}

/// Step pills joined by arrows, centred on `center`.
fn flow(ui: &egui::Ui, steps: &[String], center: Pos2, theme: &Theme, opacity: f32, scale: f32) {
    let font = FontId::proportional(theme.small_size * scale);
    let padding = egui::vec2(16.0, 8.0) * scale;
    let arrow_w = 36.0 * scale;
    let widths: Vec<f32> = steps
        .iter()
        .map(|s| {
            ui.painter()
                .layout_no_wrap(s.clone(), font.clone(), theme.foreground)
                .rect
                .width()
                + padding.x * 2.0
        })
        .collect();
    let total: f32 = widths.iter().sum::<f32>() + arrow_w * (steps.len() - 1) as f32;

    let mut x = center.x - total / 2.0;
    for (i, (step, width)) in steps.iter().zip(&widths).enumerate() {
        let color = palette(COUNTER_COLORS[i % COUNTER_COLORS.len()], 500).unwrap_or(theme.accent);
        widgets::pill(
            ui,
            step,
            Pos2::new(x + width / 2.0, center.y),
            Theme::with_opacity(color, 0.8 * opacity),
            Theme::with_opacity(theme.heading_color, opacity),
            font.size,
            scale,
        );
        x += width;
        if i + 1 < steps.len() {
            text::draw_line_centered(
                ui,
                "\u{2192}",
                Pos2::new(x + arrow_w / 2.0, center.y),
                font.clone(),
                Theme::with_opacity(theme.muted, opacity),
            );
            x += arrow_w;
        }
    }
}
