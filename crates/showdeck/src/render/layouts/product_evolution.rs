use eframe::egui::{self, FontId, Pos2};

use crate::catalog::{Dimension, Product, ProductEvolutionSlide};
use crate::render::SlideImages;
use crate::render::layouts::{below, columns};
use crate::render::text;
use crate::render::widgets::{self, Fit, Placeholder};
use crate::theme::{Theme, palette};

const PRODUCT_COLORS: &[&str] = &["blue", "emerald", "purple", "orange"];

/// Strip of evolution dimensions over one card per product.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    slide: &ProductEvolutionSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let evolution = &slide.evolution;
    let header = text::draw_header(
        ui,
        &slide.title,
        &slide.subtitle,
        &slide.description,
        palette("indigo", 300).unwrap_or(theme.accent),
        theme,
        rect,
        opacity,
        scale,
    );
    let mut body = below(rect, rect.top() + header + 32.0 * scale);

    if !evolution.dimensions.is_empty() {
        let strip_height = 96.0 * scale;
        let strip = egui::Rect::from_min_size(body.min, egui::vec2(body.width(), strip_height));
        let weights = vec![1.0; evolution.dimensions.len()];
        for (dimension, cell) in evolution
            .dimensions
            .iter()
            .zip(columns(strip, &weights, 20.0 * scale))
        {
            dimension_card(ui, dimension, cell, theme, opacity, scale);
        }
        body = below(body, strip.bottom() + 24.0 * scale);
    }

    if evolution.products.is_empty() {
        return;
    }
    let weights = vec![1.0; evolution.products.len()];
    for (i, (product, cell)) in evolution
        .products
        .iter()
        .zip(columns(body, &weights, 20.0 * scale))
        .enumerate()
    {
        let color = PRODUCT_COLORS[i % PRODUCT_COLORS.len()];
        product_card(ui, product, color, cell, theme, opacity, images, scale);
    }
}

fn dimension_card(
    ui: &egui::Ui,
    dimension: &Dimension,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) {
    widgets::card(ui, rect, theme, opacity, scale);
    let inner = rect.shrink2(egui::vec2(18.0, 14.0) * scale);
    let icon_size = theme.h3_size * scale;
    let icon_w = text::draw_line(
        ui,
        &dimension.icon,
        Pos2::new(inner.left(), inner.top()),
        FontId::proportional(icon_size),
        Theme::with_opacity(theme.heading_color, opacity),
    )
    .x;
    let left = inner.left() + icon_w + 14.0 * scale;
    let width = inner.right() - left;
    let h = text::draw_text(
        ui,
        &dimension.name,
        Pos2::new(left, inner.top()),
        theme.body_size * 0.9 * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        width,
    );
    text::draw_text(
        ui,
        &dimension.desc,
        Pos2::new(left, inner.top() + h + 4.0 * scale),
        theme.small_size * 0.75 * scale,
        Theme::with_opacity(theme.muted, opacity),
        width,
    );
}

fn status_color(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "released" | "available" => "emerald",
        "coming soon" => "blue",
        "in development" => "purple",
        _ => "slate",
    }
}

#[allow(clippy::too_many_arguments)]
fn product_card(
    ui: &egui::Ui,
    product: &Product,
    color: &str,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    images: &SlideImages,
    scale: f32,
) {
    let accent = theme.accent_for(color);
    widgets::card_with(
        ui,
        rect,
        Theme::with_opacity(accent, 0.1),
        Theme::with_opacity(accent, 0.3),
        opacity,
        scale,
    );
    let inner = rect.shrink(18.0 * scale);
    let small = theme.small_size * 0.8 * scale;

    let media = egui::Rect::from_min_size(inner.min, egui::vec2(inner.width(), 150.0 * scale));
    widgets::image_slot(
        ui,
        images,
        product.image.as_deref(),
        media,
        Fit::Contain,
        &Placeholder {
            fallback_icon: "\u{1F4E6}",
            ..Default::default()
        },
        theme,
        opacity,
        scale,
    );
    if !product.status.is_empty() {
        let pill_w = text::measure_text(ui, &product.status, small, f32::INFINITY).x;
        widgets::pill(
            ui,
            &product.status,
            Pos2::new(
                media.right() - pill_w / 2.0 - 16.0 * scale,
                media.top() + small,
            ),
            Theme::with_opacity(theme.accent_strong(status_color(&product.status)), opacity),
            Theme::with_opacity(theme.heading_color, opacity),
            small,
            scale,
        );
    }

    let mut y = media.bottom() + 12.0 * scale;
    y += text::draw_text(
        ui,
        &product.name,
        Pos2::new(inner.left(), y),
        theme.body_size * 1.1 * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        inner.width(),
    );
    y += text::draw_text(
        ui,
        &product.subtitle,
        Pos2::new(inner.left(), y + 2.0 * scale),
        small,
        Theme::with_opacity(accent, opacity),
        inner.width(),
    );
    y += 10.0 * scale;

    let headline = [product.year.as_str(), product.position.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" \u{00B7} ");
    let target = if product.target.is_empty() {
        String::new()
    } else {
        format!("For {}", product.target)
    };
    for line in [headline, target] {
        if line.is_empty() {
            continue;
        }
        y += text::draw_text(
            ui,
            &line,
            Pos2::new(inner.left(), y),
            small,
            Theme::with_opacity(theme.foreground, opacity * 0.9),
            inner.width(),
        );
        y += 4.0 * scale;
    }
    y += 6.0 * scale;
    y += widgets::pill_row(
        ui,
        &product.features,
        Pos2::new(inner.left(), y),
        inner.width(),
        accent,
        opacity,
        small * 0.9,
        scale * 0.7,
    );
    y += 10.0 * scale;

    for spec in &product.specs {
        if y + small * 1.3 > inner.bottom() - small * 1.6 {
            break;
        }
        text::draw_text(
            ui,
            &spec.label,
            Pos2::new(inner.left(), y),
            small,
            Theme::with_opacity(theme.muted, opacity),
            inner.width() * 0.5,
        );
        let value_w = text::measure_text(ui, &spec.value, small, inner.width() * 0.5).x;
        text::draw_text(
            ui,
            &spec.value,
            Pos2::new(inner.right() - value_w, y),
            small,
            Theme::with_opacity(theme.foreground, opacity),
            inner.width() * 0.5,
        );
        y += small * 1.3;
    }

    if !product.colors.is_empty() {
        text::draw_text(
            ui,
            &product.colors.join(" / "),
            Pos2::new(inner.left(), inner.bottom() - small * 1.3),
            small * 0.9,
            Theme::with_opacity(theme.muted, opacity * 0.8),
            inner.width(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_color() {
        assert_eq!(status_color("Released"), "emerald");
        assert_eq!(status_color("Coming soon"), "blue");
        assert_eq!(status_color("In development"), "purple");
        assert_eq!(status_color("Rumoured"), "slate");
    }
}
