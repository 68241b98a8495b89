use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub selected: Srgba<f64>,
    pub hovered: Srgba<f64>,
    pub default: Srgba<f64>,
    pub backdrop: Srgba<f64>,
    pub toggle: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            selected: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.95),
                Some(0.95),
            ),
            hovered: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.35, 0.35, 0.35, 0.85),
                Some(0.35),
            ),
            default: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 0.8),
                Some(0.8),
            ),
            backdrop: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.2, 0.2, 0.2, 0.15),
                Some(0.12),
            ),
            toggle: Self::lookup_color(
                context,
                "accent_bg_color",
                Srgba::new(0.25, 0.45, 0.85, 1.0),
                None,
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn faded(color: Srgba<f64>, opacity: f64) -> Srgba<f64> {
    Srgba::new(color.red, color.green, color.blue, color.alpha * opacity)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.orbit-drawing-area {
    background: none;
    background-color: transparent;
}
.orbit-heading {
    font-weight: bold;
    font-size: 18px;
    margin: 24px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
