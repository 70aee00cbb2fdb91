use std::sync::LazyLock;

use eframe::egui::{self, Color32};
use regex::Regex;

/// Matches one `from-`/`via-`/`to-` stop in a background token, e.g. `via-blue-700`.
static STOP_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(from|via|to)-([a-z]+)-(\d{2,3})\b").ok());

#[derive(Debug, Clone)]
pub struct Theme {
    /// Fill behind slides whose gradient token does not resolve.
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub muted: Color32,
    pub accent: Color32,
    /// Translucent fill for cards drawn over the gradient.
    pub card: Color32,
    pub card_border: Color32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub body_size: f32,
    pub small_size: f32,
}

impl Theme {
    pub fn showcase() -> Self {
        Self {
            background: Color32::from_rgb(0x0F, 0x17, 0x2A),
            foreground: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            heading_color: Color32::WHITE,
            muted: Color32::from_rgb(0xCB, 0xD5, 0xE1),
            accent: Color32::from_rgb(0x60, 0xA5, 0xFA),
            card: Color32::from_rgba_unmultiplied(255, 255, 255, 26),
            card_border: Color32::from_rgba_unmultiplied(255, 255, 255, 51),
            h1_size: 96.0,
            h2_size: 60.0,
            h3_size: 32.0,
            body_size: 24.0,
            small_size: 18.0,
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Multiply a color's existing alpha by `opacity`.
    pub fn fade(color: Color32, opacity: f32) -> Color32 {
        color.gamma_multiply(opacity.clamp(0.0, 1.0))
    }

    /// Accent for a card's `color` name (`blue`, `emerald`, ...), falling back to the theme
    /// accent for names outside the palette.
    pub fn accent_for(&self, name: &str) -> Color32 {
        palette(name, 400).unwrap_or(self.accent)
    }

    /// Darker companion of [`Theme::accent_for`], used for filled badges.
    pub fn accent_strong(&self, name: &str) -> Color32 {
        palette(name, 600).unwrap_or(self.accent)
    }
}

/// Resolved `bgGradient` token: a diagonal blend from the top-left corner to the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub from: Color32,
    pub via: Option<Color32>,
    pub to: Color32,
}

impl Gradient {
    /// Parse tokens like `from-blue-900 via-blue-700 to-purple-700`. A missing `to` stop
    /// repeats `from`; a token without a resolvable `from` stop yields `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let re = STOP_RE.as_ref()?;
        let mut from = None;
        let mut via = None;
        let mut to = None;
        for caps in re.captures_iter(token) {
            let shade: u16 = caps[3].parse().ok()?;
            let Some(color) = palette(&caps[2], shade) else {
                log::debug!("Unknown colour in background token: {}", &caps[0]);
                continue;
            };
            match &caps[1] {
                "from" => from = Some(color),
                "via" => via = Some(color),
                _ => to = Some(color),
            }
        }
        let from = from?;
        Some(Self {
            from,
            via,
            to: to.unwrap_or(from),
        })
    }

    /// Colour at the anti-diagonal corners (top-right and bottom-left).
    pub fn middle(&self) -> Color32 {
        self.via.unwrap_or_else(|| lerp_color(self.from, self.to, 0.5))
    }

    pub fn paint(&self, painter: &egui::Painter, rect: egui::Rect, opacity: f32) {
        let mid = Theme::fade(self.middle(), opacity);
        let mut mesh = egui::Mesh::default();
        mesh.colored_vertex(rect.left_top(), Theme::fade(self.from, opacity));
        mesh.colored_vertex(rect.right_top(), mid);
        mesh.colored_vertex(rect.left_bottom(), mid);
        mesh.colored_vertex(rect.right_bottom(), Theme::fade(self.to, opacity));
        mesh.add_triangle(0, 2, 1);
        mesh.add_triangle(1, 2, 3);
        painter.add(egui::Shape::mesh(mesh));
    }
}

/// Fill `rect` with the slide background: the resolved gradient, or the theme background.
pub fn paint_background(
    painter: &egui::Painter,
    token: &str,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
) {
    match Gradient::parse(token) {
        Some(gradient) => gradient.paint(painter, rect, opacity),
        None => {
            painter.rect_filled(rect, 0.0, Theme::with_opacity(theme.background, opacity));
        }
    }
}

pub fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_unmultiplied(
        mix(a.r(), b.r()),
        mix(a.g(), b.g()),
        mix(a.b(), b.b()),
        mix(a.a(), b.a()),
    )
}

/// Tailwind colour scale, shades 300 to 900.
pub fn palette(family: &str, shade: u16) -> Option<Color32> {
    let scale: [u32; 7] = match family {
        "slate" => [
            0xcbd5e1, 0x94a3b8, 0x64748b, 0x475569, 0x334155, 0x1e293b, 0x0f172a,
        ],
        "gray" => [
            0xd1d5db, 0x9ca3af, 0x6b7280, 0x4b5563, 0x374151, 0x1f2937, 0x111827,
        ],
        "red" => [
            0xfca5a5, 0xf87171, 0xef4444, 0xdc2626, 0xb91c1c, 0x991b1b, 0x7f1d1d,
        ],
        "orange" => [
            0xfdba74, 0xfb923c, 0xf97316, 0xea580c, 0xc2410c, 0x9a3412, 0x7c2d12,
        ],
        "yellow" => [
            0xfde047, 0xfacc15, 0xeab308, 0xca8a04, 0xa16207, 0x854d0e, 0x713f12,
        ],
        "green" => [
            0x86efac, 0x4ade80, 0x22c55e, 0x16a34a, 0x15803d, 0x166534, 0x14532d,
        ],
        "emerald" => [
            0x6ee7b7, 0x34d399, 0x10b981, 0x059669, 0x047857, 0x065f46, 0x064e3b,
        ],
        "teal" => [
            0x5eead4, 0x2dd4bf, 0x14b8a6, 0x0d9488, 0x0f766e, 0x115e59, 0x134e4a,
        ],
        "cyan" => [
            0x67e8f9, 0x22d3ee, 0x06b6d4, 0x0891b2, 0x0e7490, 0x155e75, 0x164e63,
        ],
        "blue" => [
            0x93c5fd, 0x60a5fa, 0x3b82f6, 0x2563eb, 0x1d4ed8, 0x1e40af, 0x1e3a8a,
        ],
        "indigo" => [
            0xa5b4fc, 0x818cf8, 0x6366f1, 0x4f46e5, 0x4338ca, 0x3730a3, 0x312e81,
        ],
        "purple" => [
            0xd8b4fe, 0xc084fc, 0xa855f7, 0x9333ea, 0x7e22ce, 0x6b21a8, 0x581c87,
        ],
        "pink" => [
            0xf9a8d4, 0xf472b6, 0xec4899, 0xdb2777, 0xbe185d, 0x9d174d, 0x831843,
        ],
        _ => return None,
    };
    if !(300..=900).contains(&shade) || shade % 100 != 0 {
        return None;
    }
    let hex = scale[(shade / 100 - 3) as usize];
    Some(Color32::from_rgb(
        (hex >> 16) as u8,
        (hex >> 8) as u8,
        hex as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_stop_gradient() {
        let g = Gradient::parse("from-blue-900 via-blue-700 to-purple-700").unwrap();
        assert_eq!(g.from, Color32::from_rgb(0x1e, 0x3a, 0x8a));
        assert_eq!(g.via, Some(Color32::from_rgb(0x1d, 0x4e, 0xd8)));
        assert_eq!(g.to, Color32::from_rgb(0x7e, 0x22, 0xce));
        assert_eq!(g.middle(), g.via.unwrap());
    }

    #[test]
    fn test_parse_two_stop_gradient_blends_middle() {
        let g = Gradient::parse("from-slate-900 to-slate-700").unwrap();
        assert!(g.via.is_none());
        assert_eq!(g.middle(), lerp_color(g.from, g.to, 0.5));
    }

    #[test]
    fn test_missing_to_repeats_from() {
        let g = Gradient::parse("from-emerald-900").unwrap();
        assert_eq!(g.from, g.to);
    }

    #[test]
    fn test_unresolvable_tokens() {
        assert!(Gradient::parse("").is_none());
        assert!(Gradient::parse("bg-white").is_none());
        assert!(Gradient::parse("from-chartreuse-900 to-blue-700").is_none());
        assert!(Gradient::parse("from-blue-950").is_none());
    }

    #[test]
    fn test_every_default_deck_token_resolves() {
        let catalog = crate::catalog::Catalog::embedded().unwrap();
        for slide in &catalog.slides {
            assert!(
                Gradient::parse(&slide.bg_gradient).is_some(),
                "slide {} has unresolved background {:?}",
                slide.id,
                slide.bg_gradient
            );
        }
    }

    #[test]
    fn test_palette_bounds() {
        assert!(palette("blue", 300).is_some());
        assert!(palette("blue", 900).is_some());
        assert!(palette("blue", 250).is_none());
        assert!(palette("blue", 1000).is_none());
    }

    #[test]
    fn test_accent_for_unknown_name_uses_theme_accent() {
        let theme = Theme::showcase();
        assert_eq!(theme.accent_for("mauve"), theme.accent);
        assert_eq!(theme.accent_for("green"), palette("green", 400).unwrap());
    }

    #[test]
    fn test_fade_scales_alpha() {
        let c = Color32::from_rgba_unmultiplied(255, 255, 255, 200);
        assert_eq!(Theme::fade(c, 0.5).a(), 100);
        assert_eq!(Theme::fade(c, 0.0).a(), 0);
    }
}
