use crate::config;
use crate::events::AppEvent;
use crate::gui::menu::{self, Frame, State};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use spindle::{Point, SlotLabel};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub drawing_area: gtk::DrawingArea,
    pub heading: gtk::Label,
    pub reload_pending: bool,
    pub ticking: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    Click(Point),
    CursorMove(Point),
    Resize(i32, i32),
    Close,
    Settled,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn heading_sink(label: &gtk::Label) -> impl FnMut(&SlotLabel) + 'static {
    let label = label.clone();
    move |text: &SlotLabel| label.set_label(text.as_str())
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Orbit"),
            set_default_size: (menu::REFERENCE_SIZE as i32, menu::REFERENCE_SIZE as i32),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "orbit-drawing-area",

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    },

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::CursorMove(Point::new(x, y)));
                        }
                    },

                    add_controller = gtk::GestureClick {
                        set_button: 1, // primary only
                        connect_released[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Click(Point::new(x, y)));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();

        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            drawing_area: gtk::DrawingArea::default(),
            heading: gtk::Label::default(),
            reload_pending: false,
            ticking: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let heading = gtk::Label::builder()
            .halign(gtk::Align::Center)
            .valign(gtk::Align::Start)
            .can_target(false)
            .build();
        heading.add_css_class("orbit-heading");
        widgets.overlay.add_overlay(&heading);

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.heading = heading;
        state
            .borrow_mut()
            .toggle
            .menu_mut()
            .set_label_sink(heading_sink(&model.heading));

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Click(point) => {
                let started = self.state.borrow_mut().click(point);
                if started {
                    self.animate(&sender);
                }
            }
            AppMsg::CursorMove(point) => {
                if self.state.borrow_mut().update_cursor(point) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Resize(width, height) => {
                self.state
                    .borrow_mut()
                    .resize(width as f64, height as f64);
                self.drawing_area.queue_draw();
            }
            AppMsg::Close => {
                let started = {
                    let mut state = self.state.borrow_mut();
                    state.toggle.is_open() && state.toggle.on_activate()
                };
                if started {
                    self.animate(&sender);
                }
            }
            AppMsg::Settled => {
                if self.reload_pending {
                    self.reload_pending = false;
                    self.reload();
                }
            }
            AppMsg::ConfigReload => {
                if self.state.borrow().toggle.is_animating() {
                    log::debug!("Deferring config reload until the menu settles");
                    self.reload_pending = true;
                } else {
                    self.reload();
                }
            }
        }
    }
}

impl AppModel {
    /// Drives the frame clock until the menu and panel settle.
    fn animate(&self, sender: &ComponentSender<Self>) {
        if self.ticking.replace(true) {
            return;
        }

        let state = self.state.clone();
        let ticking = self.ticking.clone();
        let sender = sender.clone();
        let last_frame = Cell::new(None::<i64>);
        self.drawing_area.add_tick_callback(move |drawing_area, clock| {
            let now = clock.frame_time();
            let dt = last_frame
                .replace(Some(now))
                .map(|prev| Duration::from_micros(now.saturating_sub(prev).max(0) as u64))
                .unwrap_or_default();

            let frame = state.borrow_mut().advance(dt);
            drawing_area.queue_draw();
            if frame == Frame::Running {
                return glib::ControlFlow::Continue;
            }

            ticking.set(false);
            if frame == Frame::Settled {
                sender.input(AppMsg::Settled);
            }
            glib::ControlFlow::Break
        });
    }

    fn reload(&mut self) {
        let result = config::load_config().and_then(|new_config| {
            self.state
                .borrow_mut()
                .reload(&new_config, heading_sink(&self.heading))
        });

        match result {
            Ok(()) => {
                self.heading.set_label("");
                self.drawing_area.queue_draw();
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }
}
