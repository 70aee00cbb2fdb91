pub mod cover;
pub mod knowledge_base;
pub mod legacy;
pub mod meeting_features;
pub mod partnership;
pub mod product_comparison;
pub mod product_evolution;
pub mod recording;
pub mod scenarios;
pub mod stats;

use eframe::egui::{self, Pos2};

/// Split `rect` into `weights.len()` columns separated by `gap`, widths proportional to
/// the weights.
pub fn columns(rect: egui::Rect, weights: &[f32], gap: f32) -> Vec<egui::Rect> {
    let total: f32 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return Vec::new();
    }
    let usable = rect.width() - gap * (weights.len() - 1) as f32;
    let mut x = rect.left();
    weights
        .iter()
        .map(|w| {
            let width = usable * w / total;
            let col = egui::Rect::from_min_size(
                Pos2::new(x, rect.top()),
                egui::vec2(width, rect.height()),
            );
            x += width + gap;
            col
        })
        .collect()
}

/// `count` cells in rows of `cols`, filling `rect` top to bottom. A short last row is
/// centred.
pub fn grid(rect: egui::Rect, count: usize, cols: usize, gap: f32) -> Vec<egui::Rect> {
    if count == 0 || cols == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(cols);
    let cell_w = (rect.width() - (cols - 1) as f32 * gap) / cols as f32;
    let cell_h = (rect.height() - (rows - 1) as f32 * gap) / rows as f32;

    (0..count)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            let items_in_row = if row == rows - 1 {
                count - row * cols
            } else {
                cols
            };
            let row_width = items_in_row as f32 * cell_w + (items_in_row - 1) as f32 * gap;
            let row_offset = (rect.width() - row_width) / 2.0;
            egui::Rect::from_min_size(
                Pos2::new(
                    rect.left() + row_offset + col as f32 * (cell_w + gap),
                    rect.top() + row as f32 * (cell_h + gap),
                ),
                egui::vec2(cell_w, cell_h),
            )
        })
        .collect()
}

/// The part of `rect` below `top`.
pub fn below(rect: egui::Rect, top: f32) -> egui::Rect {
    egui::Rect::from_min_max(Pos2::new(rect.left(), top.min(rect.bottom())), rect.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> egui::Rect {
        egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(1000.0, 600.0))
    }

    #[test]
    fn test_columns_respect_weights_and_gap() {
        let cols = columns(area(), &[7.0, 5.0], 40.0);
        assert_eq!(cols.len(), 2);
        assert!((cols[0].width() - 560.0).abs() < 1e-3);
        assert!((cols[1].width() - 400.0).abs() < 1e-3);
        assert!((cols[1].left() - cols[0].right() - 40.0).abs() < 1e-3);
        assert!(columns(area(), &[], 10.0).is_empty());
    }

    #[test]
    fn test_grid_full_rows() {
        let cells = grid(area(), 6, 3, 20.0);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0].left(), 0.0);
        assert!((cells[2].right() - 1000.0).abs() < 1e-3);
        assert!((cells[5].bottom() - 600.0).abs() < 1e-3);
    }

    #[test]
    fn test_grid_centres_short_last_row() {
        let cells = grid(area(), 4, 3, 20.0);
        let last = cells[3];
        assert!((last.center().x - 500.0).abs() < 1e-3);
        assert!(grid(area(), 0, 3, 20.0).is_empty());
    }

    #[test]
    fn test_below_clamps() {
        assert_eq!(below(area(), 900.0).height(), 0.0);
        assert_eq!(below(area(), 100.0).top(), 100.0);
    }
}
