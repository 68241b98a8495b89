use super::model::{SlotArt, State};
use super::{
    BACKDROP_PADDING, ICON_FILL, ICON_SIZE, LABEL_FONT_SIZE, SLOT_RADIUS, TOGGLE_CORNER_RADIUS,
};
use crate::gui::theme::{ThemeColors, faded};
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use spindle::{Point, Slot, Variant};
use std::f64::consts::PI;

struct SlotRenderer<'a> {
    slot: &'a Slot,
    art: &'a SlotArt,
    center: Point,
    radius: f64,
    hovered: bool,
}

impl<'a> SlotRenderer<'a> {
    fn new(state: &'a State, index: usize, slot: &'a Slot) -> Self {
        Self {
            slot,
            art: &state.art[index],
            center: state.to_screen(slot.position),
            radius: state.slot_radius(slot),
            hovered: state.hover_index == Some(index),
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_circle(cr, colors)?;
        self.draw_content(cr, colors)
    }

    fn draw_circle(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color = SlotState::resolve(self.slot.variant, self.hovered).color(colors);
        set_color(cr, color);
        cr.arc(self.center.x, self.center.y, self.radius, 0.0, 2.0 * PI);
        cr.fill()
    }

    fn draw_content(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        match self.art.for_variant(self.slot.variant) {
            Some(pixbuf) => self.draw_icon(cr, pixbuf),
            None => self.draw_text(cr, self.slot.label.as_str(), colors),
        }
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        // fit icon into slot
        let icon_scale = (self.radius * 2.0 * ICON_FILL) / ICON_SIZE as f64;
        let (iw, ih) = (
            pixbuf.width() as f64 * icon_scale,
            pixbuf.height() as f64 * icon_scale,
        );

        cr.save()?;
        cr.translate(self.center.x - iw / 2.0, self.center.y - ih / 2.0);
        cr.scale(icon_scale, icon_scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_text(
        &self,
        cr: &Context,
        text: &str,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        set_color(cr, colors.text);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE * self.radius / SLOT_RADIUS);
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(
                self.center.x - ext.width() / 2.0 - ext.x_bearing(),
                self.center.y + ext.height() / 2.0,
            );
            cr.show_text(text)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Selected,
    Hovered,
    Idle,
}

impl SlotState {
    fn resolve(variant: Variant, hovered: bool) -> Self {
        if variant == Variant::Selected {
            Self::Selected
        } else if hovered {
            Self::Hovered
        } else {
            Self::Idle
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Selected => colors.selected,
            Self::Hovered => colors.hovered,
            Self::Idle => colors.default,
        }
    }
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    draw_backdrop(cr, state, colors)?;
    draw_toggle(cr, state, colors)?;

    for (i, slot) in state.toggle.menu().slots() {
        SlotRenderer::new(state, i, slot).draw(cr, colors)?;
    }
    Ok(())
}

/// Disc behind the open arc; fades with the panel.
fn draw_backdrop(
    cr: &Context,
    state: &State,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let opacity = state.toggle.panel().opacity;
    if opacity <= 0.0 {
        return Ok(());
    }

    let config = state.toggle.menu().config();
    let radius = (config.open_radius + SLOT_RADIUS * config.selected_scale + BACKDROP_PADDING)
        * state.scale_factor;
    set_color(cr, faded(colors.backdrop, opacity));
    cr.arc(state.center.x, state.center.y, radius, 0.0, 2.0 * PI);
    cr.fill()
}

fn draw_toggle(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let (origin, size) = state.toggle_rect();
    let r = (TOGGLE_CORNER_RADIUS * state.scale_factor)
        .min(size.x / 2.0)
        .min(size.y / 2.0);

    cr.new_sub_path();
    cr.arc(origin.x + size.x - r, origin.y + r, r, -PI / 2.0, 0.0);
    cr.arc(origin.x + size.x - r, origin.y + size.y - r, r, 0.0, PI / 2.0);
    cr.arc(origin.x + r, origin.y + size.y - r, r, PI / 2.0, PI);
    cr.arc(origin.x + r, origin.y + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
    set_color(cr, colors.toggle);
    cr.fill()
}
