//! Shared visual pieces: cards, pills, counters and the image slot with its
//! placeholder and fallback panels.

use eframe::egui::{self, Color32, FontId, Pos2, Stroke};

use crate::catalog::Counter;
use crate::render::SlideImages;
use crate::render::image_loader::{ImageLoader, LoadPhase};
use crate::render::text;
use crate::theme::Theme;

/// How an image fills its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Whole image visible, letterboxed.
    Contain,
    /// Slot fully covered, image cropped.
    Cover,
}

/// What to show while an image is pending and after it failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Placeholder<'a> {
    pub loading_label: &'a str,
    pub fallback_icon: &'a str,
    pub fallback_lines: &'a [String],
}

pub fn card(ui: &egui::Ui, rect: egui::Rect, theme: &Theme, opacity: f32, scale: f32) {
    card_with(ui, rect, theme.card, theme.card_border, opacity, scale);
}

pub fn card_with(
    ui: &egui::Ui,
    rect: egui::Rect,
    fill: Color32,
    border: Color32,
    opacity: f32,
    scale: f32,
) {
    let radius = 24.0 * scale;
    ui.painter()
        .rect_filled(rect, radius, Theme::fade(fill, opacity));
    ui.painter().rect_stroke(
        rect,
        radius,
        Stroke::new(1.0, Theme::fade(border, opacity)),
        egui::StrokeKind::Inside,
    );
}

/// Rounded label. `center` is the pill's centre. Returns the pill rect.
pub fn pill(
    ui: &egui::Ui,
    label: &str,
    center: Pos2,
    fill: Color32,
    text_color: Color32,
    font_size: f32,
    scale: f32,
) -> egui::Rect {
    let galley = ui
        .painter()
        .layout_no_wrap(label.to_string(), FontId::proportional(font_size), text_color);
    let padding = egui::vec2(16.0 * scale, 8.0 * scale);
    let rect = egui::Rect::from_center_size(center, galley.rect.size() + padding * 2.0);
    ui.painter().rect_filled(rect, rect.height() / 2.0, fill);
    ui.painter()
        .galley(rect.min + padding, galley, text_color);
    rect
}

/// Lay out pills left to right from `pos`, wrapping at `max_width`. Returns the height used.
#[allow(clippy::too_many_arguments)]
pub fn pill_row(
    ui: &egui::Ui,
    labels: &[String],
    pos: Pos2,
    max_width: f32,
    accent: Color32,
    opacity: f32,
    font_size: f32,
    scale: f32,
) -> f32 {
    if labels.is_empty() {
        return 0.0;
    }
    let gap = 12.0 * scale;
    let padding = egui::vec2(16.0 * scale, 8.0 * scale);
    let fill = Theme::with_opacity(accent, 0.2 * opacity);
    let border = Theme::with_opacity(accent, 0.35 * opacity);
    let color = Theme::with_opacity(accent, opacity);

    let mut x = pos.x;
    let mut y = pos.y;
    let mut row_height = 0.0f32;
    for label in labels {
        let galley = ui
            .painter()
            .layout_no_wrap(label.clone(), FontId::proportional(font_size), color);
        let size = galley.rect.size() + padding * 2.0;
        if x > pos.x && x + size.x > pos.x + max_width {
            x = pos.x;
            y += row_height + gap;
            row_height = 0.0;
        }
        let rect = egui::Rect::from_min_size(Pos2::new(x, y), size);
        ui.painter().rect_filled(rect, size.y / 2.0, fill);
        ui.painter().rect_stroke(
            rect,
            size.y / 2.0,
            Stroke::new(1.0, border),
            egui::StrokeKind::Inside,
        );
        ui.painter().galley(rect.min + padding, galley, color);
        x += size.x + gap;
        row_height = row_height.max(size.y);
    }
    y + row_height - pos.y
}

/// Glyph (usually an emoji) centred in `rect`, on a soft tile when `fill` is visible.
pub fn icon_tile(
    ui: &egui::Ui,
    glyph: &str,
    rect: egui::Rect,
    fill: Color32,
    opacity: f32,
    scale: f32,
) {
    if fill.a() > 0 {
        ui.painter()
            .rect_filled(rect, 16.0 * scale, Theme::fade(fill, opacity));
    }
    if glyph.is_empty() {
        return;
    }
    let color = Theme::with_opacity(Color32::WHITE, opacity);
    text::draw_line_centered(
        ui,
        glyph,
        rect.center(),
        FontId::proportional(rect.height() * 0.55),
        color,
    );
}

/// Big value over a small label, centred in `rect`.
#[allow(clippy::too_many_arguments)]
pub fn stat_block(
    ui: &egui::Ui,
    value: &str,
    label: &str,
    caption: &str,
    value_color: Color32,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let cx = rect.center().x;
    let value_size = theme.h3_size * 1.1 * scale;
    let label_size = theme.small_size * scale;
    let mut y = rect.top();
    y += text::draw_text_centered(
        ui,
        value,
        cx,
        y,
        value_size,
        Theme::with_opacity(value_color, opacity),
        rect.width(),
    );
    y += 4.0 * scale;
    y += text::draw_text_centered(
        ui,
        label,
        cx,
        y,
        label_size,
        Theme::with_opacity(theme.foreground, opacity),
        rect.width(),
    );
    if !caption.is_empty() {
        y += 2.0 * scale;
        text::draw_text_centered(
            ui,
            caption,
            cx,
            y,
            label_size * 0.85,
            Theme::with_opacity(theme.muted, opacity * 0.8),
            rect.width(),
        );
    }
}

/// Evenly spaced counters across `rect`, cycling through `colors`.
#[allow(clippy::too_many_arguments)]
pub fn counter_row(
    ui: &egui::Ui,
    counters: &[Counter],
    colors: &[&str],
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    if counters.is_empty() {
        return;
    }
    let cell_w = rect.width() / counters.len() as f32;
    for (i, counter) in counters.iter().enumerate() {
        let cell = egui::Rect::from_min_size(
            Pos2::new(rect.left() + cell_w * i as f32, rect.top()),
            egui::vec2(cell_w, rect.height()),
        );
        let color = colors
            .get(i % colors.len().max(1))
            .map(|name| theme.accent_for(name))
            .unwrap_or(theme.accent);
        stat_block(
            ui,
            &counter.value,
            &counter.label,
            &counter.caption,
            color,
            theme,
            cell,
            opacity,
            scale,
        );
    }
}

/// Hover-highlighted click target. Returns true when clicked this frame.
pub fn clickable(
    ui: &egui::Ui,
    rect: egui::Rect,
    id: egui::Id,
    highlight: Color32,
    opacity: f32,
    scale: f32,
) -> bool {
    let response = ui.interact(rect, id, egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        ui.painter().rect_stroke(
            rect,
            24.0 * scale,
            Stroke::new(2.0 * scale, Theme::with_opacity(highlight, 0.6 * opacity)),
            egui::StrokeKind::Inside,
        );
    }
    response.clicked()
}

/// Where a texture of `tex_size` lands inside `available`.
pub fn fit_rect(tex_size: egui::Vec2, available: egui::Rect, fit: Fit) -> egui::Rect {
    if tex_size.x <= 0.0 || tex_size.y <= 0.0 {
        return available;
    }
    let sx = available.width() / tex_size.x;
    let sy = available.height() / tex_size.y;
    let scale = match fit {
        Fit::Contain => sx.min(sy),
        Fit::Cover => sx.max(sy),
    };
    egui::Rect::from_center_size(available.center(), tex_size * scale)
}

/// Draw the image for `reference` according to its loader phase: a spinner while pending,
/// the fading-in texture once loaded, a static fallback panel after a failure. An absent
/// reference draws nothing.
#[allow(clippy::too_many_arguments)]
pub fn image_slot(
    ui: &egui::Ui,
    images: &SlideImages,
    reference: Option<&str>,
    rect: egui::Rect,
    fit: Fit,
    placeholder: &Placeholder<'_>,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) {
    let Some(reference) = reference.filter(|r| !r.trim().is_empty()) else {
        return;
    };
    loader_slot(
        ui,
        images.get(reference),
        images.fade_in(),
        rect,
        fit,
        placeholder,
        theme,
        opacity,
        scale,
    );
}

/// [`image_slot`] for a loader held outside [`SlideImages`]. Returns the rect the texture
/// was drawn into, if it was drawn.
#[allow(clippy::too_many_arguments)]
pub fn loader_slot(
    ui: &egui::Ui,
    loader: Option<&ImageLoader>,
    fade_in: bool,
    rect: egui::Rect,
    fit: Fit,
    placeholder: &Placeholder<'_>,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) -> Option<egui::Rect> {
    let Some(loader) = loader else {
        fallback_panel(ui, rect, placeholder, theme, opacity, scale);
        return None;
    };
    match loader.phase() {
        LoadPhase::Pending => {
            loading_panel(ui, rect, placeholder, theme, opacity, scale);
            None
        }
        LoadPhase::Error => {
            fallback_panel(ui, rect, placeholder, theme, opacity, scale);
            None
        }
        LoadPhase::Loaded => {
            let Some(texture) = loader.texture() else {
                fallback_panel(ui, rect, placeholder, theme, opacity, scale);
                return None;
            };
            let fade = if fade_in {
                loader.fade_progress()
            } else {
                1.0
            };
            if fade < 1.0 {
                ui.ctx().request_repaint();
            }
            let draw_rect = fit_rect(texture.size_vec2(), rect, fit);
            let tint = Theme::with_opacity(Color32::WHITE, opacity * fade);
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter()
                .with_clip_rect(rect)
                .image(texture.id(), draw_rect, uv, tint);
            Some(draw_rect.intersect(rect))
        }
    }
}

fn loading_panel(
    ui: &egui::Ui,
    rect: egui::Rect,
    placeholder: &Placeholder<'_>,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) {
    let spinner_size = (rect.height() * 0.2).clamp(16.0 * scale, 64.0 * scale);
    let label_size = theme.small_size * scale;
    let label_gap = if placeholder.loading_label.is_empty() {
        0.0
    } else {
        12.0 * scale + label_size
    };
    let top = rect.center().y - (spinner_size + label_gap) / 2.0;
    let spinner_rect = egui::Rect::from_center_size(
        Pos2::new(rect.center().x, top + spinner_size / 2.0),
        egui::vec2(spinner_size, spinner_size),
    );
    egui::Spinner::new()
        .size(spinner_size)
        .color(Theme::with_opacity(theme.muted, opacity))
        .paint_at(ui, spinner_rect);
    if !placeholder.loading_label.is_empty() {
        text::draw_line_centered(
            ui,
            placeholder.loading_label,
            Pos2::new(
                rect.center().x,
                spinner_rect.bottom() + 12.0 * scale + label_size / 2.0,
            ),
            FontId::proportional(label_size),
            Theme::with_opacity(theme.muted, opacity * 0.8),
        );
    }
}

fn fallback_panel(
    ui: &egui::Ui,
    rect: egui::Rect,
    placeholder: &Placeholder<'_>,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) {
    let inner = rect.shrink(8.0 * scale);
    ui.painter()
        .rect_filled(inner, 16.0 * scale, Theme::fade(theme.card, opacity * 0.6));
    dashed_rect(
        ui.painter(),
        inner,
        Stroke::new(2.0 * scale, Theme::fade(theme.card_border, opacity * 1.5)),
        10.0 * scale,
        6.0 * scale,
    );

    let icon = if placeholder.fallback_icon.is_empty() {
        "\u{1F5BC}"
    } else {
        placeholder.fallback_icon
    };
    let icon_size = (inner.height() * 0.25).clamp(18.0 * scale, 96.0 * scale);
    let line_size = theme.small_size * scale;
    let lines_height = placeholder.fallback_lines.len() as f32 * (line_size * 1.4);
    let mut y = inner.center().y - (icon_size + lines_height) / 2.0;

    text::draw_line_centered(
        ui,
        icon,
        Pos2::new(inner.center().x, y + icon_size / 2.0),
        FontId::proportional(icon_size),
        Theme::with_opacity(theme.muted, opacity * 0.7),
    );
    y += icon_size + 8.0 * scale;
    for (i, line) in placeholder.fallback_lines.iter().enumerate() {
        let color = if i == 0 { theme.foreground } else { theme.muted };
        text::draw_line_centered(
            ui,
            line,
            Pos2::new(inner.center().x, y + line_size * 0.7),
            FontId::proportional(if i == 0 { line_size * 1.1 } else { line_size }),
            Theme::with_opacity(color, opacity * 0.8),
        );
        y += line_size * 1.4;
    }
}

/// Dashed outline along the edges of `rect`.
pub fn dashed_rect(painter: &egui::Painter, rect: egui::Rect, stroke: Stroke, dash: f32, gap: f32) {
    let path = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(&path, stroke, dash, gap));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_contain_letterboxes() {
        let available = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 200.0));
        let r = fit_rect(egui::vec2(100.0, 100.0), available, Fit::Contain);
        assert_eq!(r.size(), egui::vec2(200.0, 200.0));
        assert_eq!(r.center(), available.center());
    }

    #[test]
    fn test_fit_cover_fills() {
        let available = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 200.0));
        let r = fit_rect(egui::vec2(100.0, 100.0), available, Fit::Cover);
        assert_eq!(r.size(), egui::vec2(400.0, 400.0));
        assert!(r.contains_rect(available));
    }

    #[test]
    fn test_fit_degenerate_texture() {
        let available = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 200.0));
        assert_eq!(fit_rect(egui::Vec2::ZERO, available, Fit::Contain), available);
    }
}
