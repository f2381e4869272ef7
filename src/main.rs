use gtk4::prelude::*;
use gtk4::Box as GtkBox;
use gtk4::{glib, Application, ApplicationWindow, DrawingArea, Frame, Orientation, ScrolledWindow, TextView};
use gtk4::{Revealer, RevealerTransitionType};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub mod animation;
pub mod config;
pub mod io;
pub mod menu;
pub mod model;
pub mod panels;
pub mod physics;
pub mod rendering;
pub mod state;
pub mod ui;
pub mod utils;

use config::Config;
use panels::sidebar::{self, SidebarHandles};
use state::AppState;
use ui::interactions::setup_interactions;

/// Longest frame gap fed to the clock; covers stalls and suspend.
const MAX_FRAME_DT: f64 = 0.25;

fn main() -> glib::ExitCode {
    let app = Application::builder()
        .application_id("org.thetafield.thetaview")
        .build();

    app.connect_activate(build_ui);
    app.run()
}

fn build_ui(app: &Application) {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("ThetaView - Theta Field Visualizer")
        .default_width(1280)
        .default_height(820)
        .build();

    // 1. TOP LEVEL: Vertical Box (Menu on top, Main Content below)
    let root_vbox = GtkBox::new(Orientation::Vertical, 0);
    window.set_child(Some(&root_vbox));

    // 2. MAIN CONTENT: Horizontal Box (Sidebar | Right_Panel)
    let main_hbox = GtkBox::new(Orientation::Horizontal, 0);

    // --- Right Panel (Drawing + Console) ---
    let right_vbox = GtkBox::new(Orientation::Vertical, 0);
    right_vbox.set_hexpand(true);

    let drawing_area = DrawingArea::new();
    drawing_area.set_vexpand(true);
    drawing_area.set_focusable(true);

    // Console
    let info_frame = Frame::new(None);
    let console_view = TextView::builder()
        .editable(false).cursor_visible(false).monospace(true)
        .left_margin(10).right_margin(10).top_margin(10).bottom_margin(10)
        .build();
    let scroll_win = ScrolledWindow::builder()
        .min_content_height(130)
        .child(&console_view)
        .build();
    info_frame.set_child(Some(&scroll_win));

    right_vbox.append(&drawing_area);
    right_vbox.append(&info_frame);

    // Logger first so config and scene messages land in the console
    if let Err(e) = utils::logger::init(&console_view) {
        eprintln!("Logger already initialized: {}", e);
    }

    let (config, config_msg) = Config::load();
    log::info!("{}", config_msg);

    let initial_state = AppState::new(&config);
    log::info!(
        "Live: {} elements \u{00D7} 2, {} harmonics",
        initial_state.scene.element_count(),
        initial_state.scene.harmonic_count()
    );
    log_data_folder(&initial_state);
    let state = Rc::new(RefCell::new(initial_state));

    // --- Left Panel (Sidebar) ---
    let (sidebar_widget, handles) = sidebar::build(state.clone(), &drawing_area);

    let sidebar_revealer = Revealer::builder()
        .transition_type(RevealerTransitionType::SlideRight)
        .child(&sidebar_widget)
        .reveal_child(true)
        .build();

    main_hbox.append(&sidebar_revealer);
    main_hbox.append(&right_vbox);

    // 3. Menu Bar
    let menu_bar = menu::build_menu_and_actions(app, &window, state.clone(), &drawing_area, &handles.camera);

    // 4. ACTION: Toggle Sidebar
    let toggle_action = gtk4::gio::SimpleAction::new("toggle_sidebar", None);
    let rev_weak = sidebar_revealer.downgrade();
    toggle_action.connect_activate(move |_, _| {
        if let Some(rev) = rev_weak.upgrade() {
            rev.set_reveal_child(!rev.reveals_child());
        }
    });
    app.add_action(&toggle_action);
    app.set_accels_for_action("app.toggle_sidebar", &["F9"]);

    // Assemble Root
    root_vbox.append(&menu_bar);
    root_vbox.append(&main_hbox);

    // --- Setup Logic ---
    setup_interactions(&window, state.clone(), &drawing_area, &handles.camera);
    rendering::setup_drawing(&drawing_area, state.clone());
    start_frame_loop(&drawing_area, state, handles);

    window.present();
}

fn log_data_folder(st: &AppState) {
    match io::scan(&st.data_dir) {
        Ok(m) if m.files.is_empty() => log::debug!("No data files in {}", st.data_dir.display()),
        Ok(m) => log::info!("{} data file(s) in {}", m.files.len(), st.data_dir.display()),
        Err(e) => log::warn!("{}", e),
    }
}

/// One logical tick per display refresh: clock, auto-orbit, redraw.
fn start_frame_loop(drawing_area: &DrawingArea, state: Rc<RefCell<AppState>>, handles: SidebarHandles) {
    let last_us: Rc<Cell<Option<i64>>> = Rc::new(Cell::new(None));

    drawing_area.add_tick_callback(move |da, frame_clock| {
        let now = frame_clock.frame_time();
        let dt = last_us
            .replace(Some(now))
            .map(|prev| ((now - prev) as f64 / 1e6).clamp(0.0, MAX_FRAME_DT))
            .unwrap_or(0.0);

        let (playing, orbiting, t, camera) = {
            let mut st = state.borrow_mut();
            st.tick(dt);
            (
                st.clock.state() == animation::ClockState::Playing,
                st.auto_orbit.enabled,
                st.clock.t(),
                st.camera.clone(),
            )
        };

        // Widgets are updated with the borrow released
        if playing {
            handles.time_scrub.set_value(t);
        }
        if orbiting {
            handles.camera.sync(&camera);
        }

        da.queue_draw();
        glib::ControlFlow::Continue
    });
}
