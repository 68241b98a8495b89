use crate::easing::Easing;
use crate::error::SetupError;
use crate::geometry::{Vec2, angle_of, position_from_angle, wrap_degrees};
use crate::layout::{CENTER_SLOT, Layout, LayoutParams, SLOT_COUNT};
use crate::rotation::{Rotation, resolve_targets};
use crate::slot::{Slot, SlotLabel, SlotSpec, Variant};
use crate::tween::{Lerp, Progress};
use std::mem;
use std::time::Duration;

pub trait LabelSink {
    fn show_label(&mut self, label: &SlotLabel);
}

impl<F: FnMut(&SlotLabel)> LabelSink for F {
    fn show_label(&mut self, label: &SlotLabel) {
        self(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    pub duration: Duration,
    pub easing: Easing,
    pub closed_radius: f64,
    pub open_radius: f64,
    pub selected_scale: f64,
    pub normal_scale: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(500),
            easing: Easing::default(),
            closed_radius: 100.0,
            open_radius: 200.0,
            selected_scale: 1.2,
            normal_scale: 1.0,
        }
    }
}

impl MenuConfig {
    pub fn validate(&self) -> Result<(), SetupError> {
        let checks = [
            ("duration", self.duration.as_secs_f64(), !self.duration.is_zero()),
            ("closed radius", self.closed_radius, self.closed_radius > 0.0),
            ("open radius", self.open_radius, self.open_radius > 0.0),
            ("selected scale", self.selected_scale, self.selected_scale >= 0.0),
            ("normal scale", self.normal_scale, self.normal_scale >= 0.0),
        ];

        checks
            .into_iter()
            .find(|(_, value, ok)| !ok || !value.is_finite())
            .map_or(Ok(()), |(name, value, _)| {
                Err(SetupError::InvalidValue { name, value })
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Track {
    start_angle: f64,
    /// Unwrapped, so interpolating from `start_angle` keeps the resolved rotation.
    target_angle: f64,
    layout_angle: f64,
    start_scale: Vec2,
    target_scale: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    layout: Layout,
    rotation: Rotation,
    reference: usize,
    radius: f64,
    easing: Easing,
    duration: Duration,
    elapsed: Duration,
    tracks: [Option<Track>; SLOT_COUNT],
}

impl Transition {
    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn reference(&self) -> usize {
        self.reference
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn sweeps(&self) -> [Option<f64>; SLOT_COUNT] {
        self.tracks
            .map(|track| track.map(|t| t.target_angle - t.start_angle))
    }

    fn fraction(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

pub struct RadialMenu {
    config: MenuConfig,
    params: LayoutParams,
    slots: [Option<Slot>; SLOT_COUNT],
    open: bool,
    selected: usize,
    last_open: usize,
    transition: Option<Transition>,
    label_sink: Option<Box<dyn LabelSink>>,
}

impl RadialMenu {
    pub fn new(
        config: MenuConfig,
        specs: impl IntoIterator<Item = Option<SlotSpec>>,
    ) -> Result<Self, SetupError> {
        config.validate()?;

        let specs: Vec<_> = specs.into_iter().collect();
        if specs.len() > SLOT_COUNT {
            return Err(SetupError::TooManySlots {
                max: SLOT_COUNT,
                got: specs.len(),
            });
        }

        let mut specs = specs.into_iter();
        let slots = std::array::from_fn(|_| specs.next().flatten().map(Slot::from_spec));

        let mut menu = Self {
            params: LayoutParams::new(config.closed_radius, config.open_radius),
            config,
            slots,
            open: false,
            selected: CENTER_SLOT,
            last_open: CENTER_SLOT,
            transition: None,
            label_sink: None,
        };
        menu.snap_to(Layout::Closed);
        Ok(menu)
    }

    pub fn with_label_sink(mut self, sink: impl LabelSink + 'static) -> Self {
        self.set_label_sink(sink);
        self
    }

    pub fn set_label_sink(&mut self, sink: impl LabelSink + 'static) {
        self.label_sink = Some(Box::new(sink));
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn last_open(&self) -> usize {
        self.last_open
    }

    pub fn layout(&self) -> Layout {
        Layout::from_open(self.open)
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn slots(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i, s)))
    }

    /// Opens or closes the menu. Ignored while animating or when already in the requested state.
    pub fn set_open(&mut self, open: bool) -> bool {
        if self.is_animating() || open == self.open {
            log::trace!(
                "Ignoring set_open({open}) (open: {}, animating: {})",
                self.open,
                self.is_animating()
            );
            return false;
        }

        self.open = open;
        if open {
            self.selected = self.last_open;
            self.announce_selection();
            self.begin_transition(Layout::Open);
        } else {
            self.last_open = self.selected;
            self.selected = CENTER_SLOT;
            self.refresh_variants(Layout::Closed);
            self.begin_transition(Layout::Closed);
        }
        true
    }

    /// Moves the selection to `index` and re-centres the arc around it.
    ///
    /// Only honoured while open and idle, for a present slot other than the current selection.
    pub fn select_slot(&mut self, index: usize) -> bool {
        if !self.open
            || self.is_animating()
            || index == self.selected
            || self.slot(index).is_none()
        {
            log::trace!("Ignoring selection of slot {index}");
            return false;
        }

        let previous = mem::replace(&mut self.selected, index);
        self.set_variant(previous, Variant::Normal);
        self.set_variant(index, Variant::Selected);
        self.announce_selection();
        self.begin_transition(Layout::Open);
        true
    }

    pub fn tick(&mut self, dt: Duration) -> Progress {
        let Some(transition) = self.transition.as_mut() else {
            return Progress::Complete;
        };

        transition.elapsed += dt;
        if transition.is_done() {
            self.finish();
            return Progress::Complete;
        }

        let f = transition.easing.apply(transition.fraction());
        for (slot, track) in self.slots.iter_mut().zip(&transition.tracks) {
            let (Some(slot), Some(track)) = (slot, track) else {
                continue;
            };
            let angle = track.start_angle.lerp(track.target_angle, f);
            slot.position = position_from_angle(angle, transition.radius);
            slot.angle = wrap_degrees(angle);
            slot.scale = track.start_scale.lerp(track.target_scale, f);
        }
        Progress::Running
    }

    fn target_scale(&self, index: usize, layout: Layout) -> Vec2 {
        let multiplier = if layout == Layout::Open && index == self.selected {
            self.config.selected_scale
        } else {
            self.config.normal_scale
        };
        self.slot(index)
            .map_or(Vec2::ONE, |s| s.base_scale)
            * multiplier
    }

    /// The selection when opening, the slot going home when closing.
    fn reference_slot(&self, layout: Layout) -> usize {
        let preferred = match layout {
            Layout::Open => self.selected,
            Layout::Closed => self.last_open,
        };
        if self.slot(preferred).is_some() {
            preferred
        } else {
            self.slots().next().map_or(preferred, |(i, _)| i)
        }
    }

    fn begin_transition(&mut self, layout: Layout) {
        let layout_angles = self.params.circular_angles(layout, self.selected);
        let starts = self
            .slots
            .each_ref()
            .map(|s| s.as_ref().map(|s| angle_of(s.position)));
        let reference = self.reference_slot(layout);
        let resolved = resolve_targets(&starts, &layout_angles, reference);

        let tracks = std::array::from_fn(|i| {
            let slot = self.slots[i].as_ref()?;
            Some(Track {
                start_angle: starts[i]?,
                target_angle: resolved.angles[i]?,
                layout_angle: layout_angles[i],
                start_scale: slot.scale,
                target_scale: self.target_scale(i, layout),
            })
        });

        log::debug!(
            "Starting {} transition: slot {} leads, rotating {}",
            layout,
            reference,
            resolved.rotation
        );

        self.transition = Some(Transition {
            layout,
            rotation: resolved.rotation,
            reference,
            radius: self.params.radius(layout),
            easing: self.config.easing,
            duration: self.config.duration,
            elapsed: Duration::ZERO,
            tracks,
        });
    }

    fn finish(&mut self) {
        let Some(transition) = self.transition.take() else {
            return;
        };

        for (slot, track) in self.slots.iter_mut().zip(transition.tracks) {
            if let (Some(slot), Some(track)) = (slot.as_mut(), track) {
                slot.position = position_from_angle(track.layout_angle, transition.radius);
                slot.angle = wrap_degrees(track.layout_angle);
                slot.scale = track.target_scale;
            }
        }
        self.refresh_variants(transition.layout);

        log::debug!("Finished {} transition", transition.layout);
    }

    /// Places every slot on `layout` without animating.
    fn snap_to(&mut self, layout: Layout) {
        let angles = self.params.circular_angles(layout, self.selected);
        let radius = self.params.radius(layout);
        for i in 0..SLOT_COUNT {
            let scale = self.target_scale(i, layout);
            if let Some(slot) = self.slots[i].as_mut() {
                slot.position = position_from_angle(angles[i], radius);
                slot.angle = wrap_degrees(angles[i]);
                slot.scale = scale;
            }
        }
        self.refresh_variants(layout);
    }

    fn refresh_variants(&mut self, layout: Layout) {
        let selected = self.selected;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(slot) = slot {
                slot.variant = Variant::from_selected(layout == Layout::Open && i == selected);
            }
        }
    }

    fn set_variant(&mut self, index: usize, variant: Variant) {
        if let Some(slot) = self.slots.get_mut(index).and_then(Option::as_mut) {
            slot.variant = variant;
        }
    }

    fn announce_selection(&mut self) {
        let Some(label) = self.slots[self.selected].as_ref().map(|s| &s.label) else {
            return;
        };
        if let Some(sink) = self.label_sink.as_mut() {
            sink.show_label(label);
        }
    }
}
