use crate::theme::Theme;
use eframe::egui::{self, Align, Color32, FontFamily, FontId, Pos2, Stroke};

/// Create a LayoutJob for a run of plain text.
pub fn text_job(
    text: &str,
    font_size: f32,
    color: Color32,
    max_width: f32,
    halign: Align,
) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    job.halign = halign;
    let format = egui::text::TextFormat {
        font_id: FontId::new(font_size, FontFamily::Proportional),
        color,
        ..Default::default()
    };
    job.append(text, 0.0, format);
    job
}

/// Layout and paint wrapped text, returning the height used.
pub fn draw_text(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let job = text_job(text, font_size, color, max_width, Align::LEFT);
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Wrapped text centred on `center_x`, top edge at `top`. Returns the height used.
pub fn draw_text_centered(
    ui: &egui::Ui,
    text: &str,
    center_x: f32,
    top: f32,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    // Centred jobs lay out around x = 0, so the anchor is the column centre.
    let job = text_job(text, font_size, color, max_width, Align::Center);
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    ui.painter().galley(Pos2::new(center_x, top), galley, color);
    height
}

/// Single line, no wrapping. Returns the size of the drawn text.
pub fn draw_line(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font: FontId,
    color: Color32,
) -> egui::Vec2 {
    let galley = ui.painter().layout_no_wrap(text.to_string(), font, color);
    let size = galley.rect.size();
    ui.painter().galley(pos, galley, color);
    size
}

/// Single line centred on `center`.
pub fn draw_line_centered(
    ui: &egui::Ui,
    text: &str,
    center: Pos2,
    font: FontId,
    color: Color32,
) -> egui::Vec2 {
    let galley = ui.painter().layout_no_wrap(text.to_string(), font, color);
    let size = galley.rect.size();
    ui.painter().galley(center - size / 2.0, galley, color);
    size
}

pub fn measure_text(ui: &egui::Ui, text: &str, font_size: f32, max_width: f32) -> egui::Vec2 {
    if text.is_empty() {
        return egui::Vec2::ZERO;
    }
    let job = text_job(text, font_size, Color32::WHITE, max_width, Align::LEFT);
    ui.painter().layout_job(job).rect.size()
}

/// Centred page header: title, accent subtitle and a narrower description.
/// Returns the height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_header(
    ui: &egui::Ui,
    title: &str,
    subtitle: &str,
    description: &str,
    accent: Color32,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) -> f32 {
    let cx = rect.center().x;
    let mut y = rect.top();
    let width = rect.width();

    let h = draw_text_centered(
        ui,
        title,
        cx,
        y,
        theme.h2_size * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        width,
    );
    y += h;
    if !subtitle.is_empty() {
        y += 12.0 * scale;
        y += draw_text_centered(
            ui,
            subtitle,
            cx,
            y,
            theme.h3_size * 0.85 * scale,
            Theme::with_opacity(accent, opacity),
            width,
        );
    }
    if !description.is_empty() {
        y += 12.0 * scale;
        y += draw_text_centered(
            ui,
            description,
            cx,
            y,
            theme.body_size * 0.85 * scale,
            Theme::with_opacity(theme.muted, opacity),
            width.min(1100.0 * scale),
        );
    }
    y - rect.top()
}

/// Bulleted list with round markers. Returns height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_bullets(
    ui: &egui::Ui,
    items: &[String],
    marker: Color32,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let font_size = theme.body_size * scale;
    let color = Theme::with_opacity(theme.foreground, opacity);
    let marker = Theme::with_opacity(marker, opacity);
    let indent = 28.0 * scale;
    let spacing = 16.0 * scale;

    let mut y = pos.y;
    for item in items {
        let dot = Pos2::new(pos.x + 6.0 * scale, y + font_size * 0.6);
        ui.painter().circle_filled(dot, 6.0 * scale, marker);
        let h = draw_text(
            ui,
            item,
            Pos2::new(pos.x + indent, y),
            font_size,
            color,
            max_width - indent,
        );
        y += h + spacing;
    }
    (y - pos.y - spacing).max(0.0)
}

/// Cell contents for [`draw_table`].
pub struct TableCell<'a> {
    pub text: &'a str,
    pub color: Color32,
}

/// Draw a table with a tinted header row and row separators. Returns height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_table(
    ui: &egui::Ui,
    headers: &[&str],
    rows: &[Vec<TableCell<'_>>],
    header_fill: Color32,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let heading_color = Theme::with_opacity(theme.heading_color, opacity);
    let rule = Theme::fade(theme.card_border, opacity);
    let cell_padding = 12.0 * scale;
    let font_size = theme.small_size * scale;

    let num_cols = headers.len().max(1);
    let col_width = max_width / num_cols as f32;

    let mut y = pos.y;

    // Header
    let header_height = font_size * 1.4 + cell_padding * 2.0;
    let header_rect =
        egui::Rect::from_min_size(pos, egui::vec2(max_width, header_height));
    ui.painter()
        .rect_filled(header_rect, 8.0 * scale, Theme::fade(header_fill, opacity));
    for (col, header) in headers.iter().enumerate() {
        let center = Pos2::new(
            pos.x + col_width * (col as f32 + 0.5),
            header_rect.center().y,
        );
        draw_line_centered(
            ui,
            header,
            center,
            FontId::proportional(font_size * 1.05),
            heading_color,
        );
    }
    y += header_height;

    // Data rows
    for row in rows {
        let mut max_row_height = 0.0f32;
        for (col, cell) in row.iter().enumerate() {
            let center_x = pos.x + col_width * (col as f32 + 0.5);
            let h = draw_text_centered(
                ui,
                cell.text,
                center_x,
                y + cell_padding,
                font_size,
                Theme::with_opacity(cell.color, opacity),
                col_width - cell_padding * 2.0,
            );
            max_row_height = max_row_height.max(h);
        }
        y += max_row_height + cell_padding * 2.0;
        ui.painter().line_segment(
            [Pos2::new(pos.x, y), Pos2::new(pos.x + max_width, y)],
            Stroke::new(1.0, rule),
        );
    }

    y - pos.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_job_wraps_at_width() {
        let job = text_job("Hello world", 20.0, Color32::WHITE, 300.0, Align::Center);
        assert_eq!(job.wrap.max_width, 300.0);
        assert_eq!(job.halign, Align::Center);
        assert_eq!(job.text, "Hello world");
        assert_eq!(job.sections.len(), 1);
    }
}
