use eframe::egui::{self, Color32, FontId, Pos2, Stroke};
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::controller::{Controller, NavKey};
use crate::render::image_loader::ImageOptions;
use crate::render::modal::Lightbox;
use crate::render::{self, SlideImages, text, widgets};
use crate::theme::{self, Theme};
use crate::watch::CatalogWatcher;

const CHROME_HEIGHT: f32 = 64.0;
const LANDING_GRADIENT: &str = "from-blue-900 via-indigo-800 to-purple-800";

/// Everything `run` needs, resolved from the command line and the config file.
pub struct RunOptions {
    pub catalog: Catalog,
    /// File the catalog came from; `None` for the embedded deck.
    pub catalog_path: Option<PathBuf>,
    pub windowed: bool,
    /// 0-indexed, clamped into the deck.
    pub start_slide: usize,
    /// Skip the landing page.
    pub present: bool,
    pub watch: bool,
    pub images: ImageOptions,
    pub reset_modal_on_navigate: bool,
}

enum Route {
    Landing,
    Presentation(Box<PresentationView>),
}

/// State that lives exactly as long as the presentation route is mounted.
struct PresentationView {
    controller: Controller,
    images: SlideImages,
    lightbox: Lightbox,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ChromeAction {
    Previous,
    Next,
    ToggleFullscreen,
}

struct ShowdeckApp {
    catalog: Catalog,
    /// Bumped on every reload so mounted slides pick up new content.
    generation: u64,
    theme: Theme,
    route: Route,
    watcher: Option<CatalogWatcher>,
    windowed: bool,
    start_slide: usize,
    image_options: ImageOptions,
    reset_modal_on_navigate: bool,
}

impl ShowdeckApp {
    fn new(options: RunOptions, ctx: &egui::Context) -> Self {
        let watcher = match (&options.catalog_path, options.watch) {
            (Some(path), true) => match CatalogWatcher::new(path, ctx) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    log::warn!("Live reload disabled: {e:#}");
                    None
                }
            },
            (None, true) => {
                log::warn!("--watch needs a catalog file; presenting the embedded deck");
                None
            }
            _ => None,
        };

        let mut app = Self {
            catalog: options.catalog,
            generation: 0,
            theme: Theme::showcase(),
            route: Route::Landing,
            watcher,
            windowed: options.windowed,
            start_slide: options.start_slide,
            image_options: options.images,
            reset_modal_on_navigate: options.reset_modal_on_navigate,
        };
        if options.present {
            app.enter_presentation();
        }
        app
    }

    fn enter_presentation(&mut self) {
        let Some(len) = self.catalog.slide_count() else {
            log::warn!("Catalog has no slides");
            return;
        };
        let controller = Controller::new(len)
            .starting_at(self.start_slide)
            .with_fullscreen(!self.windowed)
            .reset_modal_on_navigate(self.reset_modal_on_navigate);
        log::debug!("Entering presentation at slide {}", controller.current() + 1);
        self.route = Route::Presentation(Box::new(PresentationView {
            controller,
            images: SlideImages::new(self.image_options.clone()),
            lightbox: Lightbox::new(),
        }));
    }

    fn reload_if_changed(&mut self) {
        let Some(watcher) = &self.watcher else {
            return;
        };
        if !watcher.changed() {
            return;
        }
        let catalog = match Catalog::load(watcher.path()) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("Keeping previous catalog: {e:#}");
                return;
            }
        };
        let Some(len) = catalog.slide_count() else {
            return;
        };
        log::info!("Reloaded catalog ({} slides)", len);
        self.catalog = catalog;
        self.generation += 1;
        if let Route::Presentation(view) = &mut self.route {
            view.controller.resize(len);
        }
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1920.0;
        let ref_h = 1080.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }

    fn update_landing(&mut self, ctx: &egui::Context) {
        let mut enter = false;
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
            }
            if i.key_pressed(egui::Key::Enter) {
                enter = true;
            }
        });
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.background).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scale = Self::compute_scale(rect);
                if draw_landing(ui, &self.catalog, &self.theme, rect, scale) {
                    enter = true;
                }
            });

        if enter {
            self.enter_presentation();
            ctx.request_repaint();
        }
    }

    fn update_presentation(&mut self, ctx: &egui::Context) {
        let Route::Presentation(view) = &mut self.route else {
            return;
        };

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        // Key presses in delivery order. Suppressed keys are taken out of the queue so
        // nothing else reacts to them this frame.
        ctx.input_mut(|i| {
            i.events.retain(|event| {
                let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                else {
                    return true;
                };
                match key {
                    egui::Key::Q => {
                        viewport_cmds.push(egui::ViewportCommand::Close);
                        true
                    }
                    egui::Key::Escape => {
                        view.controller.close_image_modal();
                        true
                    }
                    _ => !view
                        .controller
                        .handle_key(NavKey::from_event(*key, *modifiers), &mut viewport_cmds),
                }
            });
        });

        let index = view.controller.current();
        let Some(slide) = self.catalog.get(index) else {
            return;
        };
        view.images.mount(ctx, index, self.generation, slide);
        view.images.poll(ctx);
        view.lightbox
            .sync(ctx, view.controller.modal(), view.images.options());

        let mut response = render::SlideResponse::default();
        let mut action = None;
        let mut close_modal = false;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.background).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scale = Self::compute_scale(rect);

                response = render::render_slide(
                    ui,
                    slide,
                    &self.theme,
                    rect,
                    1.0,
                    &view.images,
                    scale,
                );
                action = draw_chrome(
                    ui,
                    &self.catalog,
                    &view.controller,
                    &self.theme,
                    rect,
                    scale,
                );
                close_modal = view.lightbox.show(
                    ui,
                    view.controller.modal(),
                    &self.theme,
                    rect,
                    scale,
                );
            });

        if let Some(request) = response.open_image {
            view.controller
                .open_image_modal(&request.image, &request.title);
        }
        if close_modal {
            view.controller.close_image_modal();
        }
        match action {
            Some(ChromeAction::Previous) => view.controller.previous_button(),
            Some(ChromeAction::Next) => view.controller.next_button(),
            Some(ChromeAction::ToggleFullscreen) => {
                view.controller.toggle_fullscreen(&mut viewport_cmds)
            }
            None => {}
        }

        // Send collected viewport commands outside the input closure
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
    }
}

impl eframe::App for ShowdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.reload_if_changed();
        match self.route {
            Route::Landing => self.update_landing(ctx),
            Route::Presentation(_) => self.update_presentation(ctx),
        }
    }
}

/// Title, tagline and the single way in. Returns true when the button was clicked.
fn draw_landing(
    ui: &egui::Ui,
    catalog: &Catalog,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> bool {
    theme::paint_background(ui.painter(), LANDING_GRADIENT, theme, rect, 1.0);

    let cx = rect.center().x;
    let width = rect.width() * 0.7;
    let mut y = rect.center().y - 220.0 * scale;

    let mark = egui::Rect::from_center_size(
        Pos2::new(cx, y),
        egui::vec2(96.0 * scale, 96.0 * scale),
    );
    widgets::icon_tile(ui, &catalog.brand_mark(), mark, theme.accent, 1.0, scale);
    y = mark.bottom() + 40.0 * scale;

    y += text::draw_text_centered(
        ui,
        catalog.title(),
        cx,
        y,
        theme.h1_size * 0.8 * scale,
        theme.heading_color,
        width,
    );
    if let Some(subtitle) = catalog.meta.subtitle.as_deref() {
        y += 16.0 * scale;
        y += text::draw_text_centered(
            ui,
            subtitle,
            cx,
            y,
            theme.h3_size * scale,
            theme.accent_for("blue"),
            width,
        );
    }
    if let Some(tagline) = catalog.meta.tagline.as_deref() {
        y += 16.0 * scale;
        y += text::draw_text_centered(
            ui,
            tagline,
            cx,
            y,
            theme.body_size * scale,
            theme.muted,
            width,
        );
    }

    y += 56.0 * scale;
    let label = "Enter presentation  \u{2192}";
    let font_size = theme.body_size * scale;
    let label_w = text::measure_text(ui, label, font_size, f32::INFINITY).x;
    let button = egui::Rect::from_center_size(
        Pos2::new(cx, y + 32.0 * scale),
        egui::vec2(label_w + 64.0 * scale, 64.0 * scale),
    );
    let response = ui.interact(button, ui.id().with("enter_presentation"), egui::Sense::click());
    let fill = if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        theme.accent_strong("blue")
    } else {
        theme.accent_strong("indigo")
    };
    ui.painter().rect_filled(button, button.height() / 2.0, fill);
    text::draw_line_centered(
        ui,
        label,
        button.center(),
        FontId::proportional(font_size),
        Color32::WHITE,
    );
    response.clicked()
}

/// Top bar: brand mark and deck title on the left, counter and controls on the right.
fn draw_chrome(
    ui: &egui::Ui,
    catalog: &Catalog,
    controller: &Controller,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> Option<ChromeAction> {
    let bar = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), CHROME_HEIGHT * scale));
    ui.painter()
        .rect_filled(bar, 0.0, Color32::from_black_alpha(77));
    ui.painter().line_segment(
        [bar.left_bottom(), bar.right_bottom()],
        Stroke::new(1.0, Color32::from_white_alpha(26)),
    );

    let pad = 24.0 * scale;
    let tile_side = 40.0 * scale;
    let tile = egui::Rect::from_min_size(
        Pos2::new(bar.left() + pad, bar.center().y - tile_side / 2.0),
        egui::vec2(tile_side, tile_side),
    );
    widgets::icon_tile(ui, &catalog.brand_mark(), tile, theme.accent, 1.0, scale);
    text::draw_line(
        ui,
        catalog.title(),
        Pos2::new(tile.right() + 14.0 * scale, bar.center().y - 12.0 * scale),
        FontId::proportional(20.0 * scale),
        theme.heading_color,
    );

    let font = FontId::proportional(18.0 * scale);
    let mut action = None;
    let mut right = bar.right() - pad;

    let fullscreen_label = if controller.is_fullscreen() {
        "Exit fullscreen"
    } else {
        "Fullscreen"
    };
    let (clicked, button) = chrome_button(ui, fullscreen_label, right, bar, true, &font, scale);
    if clicked {
        action = Some(ChromeAction::ToggleFullscreen);
    }
    right = button.left() - 16.0 * scale;

    let (clicked, button) = chrome_button(
        ui,
        "Next \u{203A}",
        right,
        bar,
        controller.can_go_next(),
        &font,
        scale,
    );
    if clicked {
        action = Some(ChromeAction::Next);
    }
    right = button.left() - 10.0 * scale;

    let counter = format!("{} / {}", controller.current() + 1, controller.len());
    let counter_galley =
        ui.painter()
            .layout_no_wrap(counter, FontId::monospace(16.0 * scale), theme.muted);
    let counter_w = counter_galley.rect.width();
    ui.painter().galley(
        Pos2::new(
            right - counter_w - 6.0 * scale,
            bar.center().y - counter_galley.rect.height() / 2.0,
        ),
        counter_galley,
        theme.muted,
    );
    right -= counter_w + 22.0 * scale;

    let (clicked, _) = chrome_button(
        ui,
        "\u{2039} Prev",
        right,
        bar,
        controller.can_go_previous(),
        &font,
        scale,
    );
    if clicked {
        action = Some(ChromeAction::Previous);
    }

    action
}

/// Pill button whose right edge sits at `right`. Disabled buttons are dimmed and never
/// report a click.
fn chrome_button(
    ui: &egui::Ui,
    label: &str,
    right: f32,
    bar: egui::Rect,
    enabled: bool,
    font: &FontId,
    scale: f32,
) -> (bool, egui::Rect) {
    let galley = ui
        .painter()
        .layout_no_wrap(label.to_string(), font.clone(), Color32::WHITE);
    let size = galley.rect.size() + egui::vec2(28.0, 14.0) * scale;
    let rect = egui::Rect::from_min_size(
        Pos2::new(right - size.x, bar.center().y - size.y / 2.0),
        size,
    );
    let sense = if enabled {
        egui::Sense::click()
    } else {
        egui::Sense::hover()
    };
    let response = ui.interact(rect, egui::Id::new(("chrome", label)), sense);
    let (fill, text_color) = match (enabled, response.hovered()) {
        (false, _) => (Color32::from_white_alpha(10), Color32::from_white_alpha(80)),
        (true, true) => (Color32::from_white_alpha(51), Color32::WHITE),
        (true, false) => (Color32::from_white_alpha(26), Color32::WHITE),
    };
    if enabled && response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    ui.painter().rect_filled(rect, size.y / 2.0, fill);
    ui.painter()
        .galley(rect.center() - galley.rect.size() / 2.0, galley, text_color);
    (enabled && response.clicked(), rect)
}

pub fn run(options: RunOptions) -> anyhow::Result<()> {
    let title = options.catalog.title().to_string();

    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(ShowdeckApp::new(options, &cc.egui_ctx)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn options(present: bool) -> RunOptions {
        RunOptions {
            catalog: Catalog::embedded().unwrap(),
            catalog_path: None,
            windowed: true,
            start_slide: 100,
            present,
            watch: false,
            images: ImageOptions::default(),
            reset_modal_on_navigate: false,
        }
    }

    #[test]
    fn test_starts_on_landing() {
        let ctx = egui::Context::default();
        let app = ShowdeckApp::new(options(false), &ctx);
        assert!(matches!(app.route, Route::Landing));
    }

    #[test]
    fn test_present_skips_landing_and_clamps_start() {
        let ctx = egui::Context::default();
        let app = ShowdeckApp::new(options(true), &ctx);
        let Route::Presentation(view) = &app.route else {
            panic!("expected presentation route");
        };
        assert_eq!(view.controller.current(), 8);
        assert!(!view.controller.is_fullscreen());
    }

    #[test]
    fn test_keys_are_handled_in_order() {
        let ctx = egui::Context::default();
        let mut app = ShowdeckApp::new(options(true), &ctx);
        if let Route::Presentation(view) = &mut app.route {
            view.controller = Controller::new(NonZeroUsize::new(9).unwrap());
        }
        let key = |key| egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        let input = egui::RawInput {
            events: vec![
                key(egui::Key::ArrowLeft),
                key(egui::Key::ArrowRight),
                key(egui::Key::ArrowRight),
                key(egui::Key::X),
            ],
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.update_presentation(ctx));
        let Route::Presentation(view) = &app.route else {
            panic!("expected presentation route");
        };
        assert_eq!(view.controller.current(), 1);
    }

    #[test]
    fn test_fullscreen_key_flips_flag() {
        let ctx = egui::Context::default();
        let mut app = ShowdeckApp::new(options(true), &ctx);
        let input = egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::F,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.update_presentation(ctx));
        let Route::Presentation(view) = &app.route else {
            panic!("expected presentation route");
        };
        assert!(view.controller.is_fullscreen());
    }

    fn presenting_at(ctx: &egui::Context, index: usize) -> ShowdeckApp {
        let mut app = ShowdeckApp::new(options(true), ctx);
        if let Route::Presentation(view) = &mut app.route {
            view.controller = Controller::new(NonZeroUsize::new(9).unwrap()).starting_at(index);
        }
        step(ctx, &mut app, Vec::new());
        app
    }

    fn view(app: &ShowdeckApp) -> &PresentationView {
        let Route::Presentation(view) = &app.route else {
            panic!("expected presentation route");
        };
        view
    }

    fn step(ctx: &egui::Context, app: &mut ShowdeckApp, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                Pos2::ZERO,
                egui::vec2(1920.0, 1080.0),
            )),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.update_presentation(ctx));
    }

    fn click(ctx: &egui::Context, app: &mut ShowdeckApp, pos: Pos2) {
        let button = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };
        step(ctx, app, vec![egui::Event::PointerMoved(pos)]);
        step(ctx, app, vec![button(true)]);
        step(ctx, app, vec![button(false)]);
    }

    fn center_of(ctx: &egui::Context, id: egui::Id) -> Pos2 {
        ctx.read_response(id)
            .map(|response| response.rect.center())
            .unwrap_or_else(|| panic!("no widget {id:?} in the last frame"))
    }

    #[test]
    fn test_feature_click_opens_lightbox() {
        let ctx = egui::Context::default();
        let mut app = presenting_at(&ctx, 3);
        let card = center_of(&ctx, egui::Id::new(("meeting_feature", 0)));
        click(&ctx, &mut app, card);

        let modal = view(&app).controller.modal();
        assert!(modal.is_open);
        assert_eq!(modal.image, "/summary-feature.png");
        assert_eq!(modal.title, "Summary");
        assert_eq!(view(&app).controller.current(), 3);
    }

    #[test]
    fn test_lightbox_image_click_is_swallowed_and_backdrop_closes() {
        let ctx = egui::Context::default();
        let mut app = presenting_at(&ctx, 3);
        let card = center_of(&ctx, egui::Id::new(("meeting_feature", 0)));
        click(&ctx, &mut app, card);
        assert!(view(&app).controller.modal().is_open);

        let image = center_of(&ctx, egui::Id::new("lightbox_image"));
        click(&ctx, &mut app, image);
        assert!(view(&app).controller.modal().is_open);

        click(&ctx, &mut app, Pos2::new(40.0, 540.0));
        assert!(!view(&app).controller.modal().is_open);
        assert_eq!(view(&app).controller.current(), 3);
    }

    #[test]
    fn test_lightbox_close_button_closes() {
        let ctx = egui::Context::default();
        let mut app = presenting_at(&ctx, 3);
        let card = center_of(&ctx, egui::Id::new(("meeting_feature", 1)));
        click(&ctx, &mut app, card);
        assert!(view(&app).controller.modal().is_open);

        let close = center_of(&ctx, egui::Id::new("lightbox_close"));
        click(&ctx, &mut app, close);
        assert!(!view(&app).controller.modal().is_open);
    }

    #[test]
    fn test_chrome_buttons_stop_at_the_ends() {
        let ctx = egui::Context::default();
        let prev = egui::Id::new(("chrome", "\u{2039} Prev"));
        let next = egui::Id::new(("chrome", "Next \u{203A}"));

        let mut app = presenting_at(&ctx, 0);
        click(&ctx, &mut app, center_of(&ctx, prev));
        assert_eq!(view(&app).controller.current(), 0);
        click(&ctx, &mut app, center_of(&ctx, next));
        assert_eq!(view(&app).controller.current(), 1);

        let mut app = presenting_at(&ctx, 8);
        click(&ctx, &mut app, center_of(&ctx, next));
        assert_eq!(view(&app).controller.current(), 8);
        click(&ctx, &mut app, center_of(&ctx, prev));
        assert_eq!(view(&app).controller.current(), 7);
    }

    #[test]
    fn test_scale_uses_limiting_dimension() {
        let rect = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(3840.0, 1080.0));
        assert_eq!(ShowdeckApp::compute_scale(rect), 1.0);
    }
}
