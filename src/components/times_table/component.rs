use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::error::SurfaceError;
use super::render;
use super::state::TimesTableState;
use super::surface::{DrawingSurface, SvgSurface};
use super::types::DiagramConfig;

struct Diagram {
	state: TimesTableState,
	surface: SvgSurface,
}

impl Diagram {
	fn redraw(&mut self) {
		render::render(&self.state, &mut self.surface);
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// The diagram fills the window; the last known size stands in when the
/// window can't report one.
fn fit_size(window: Option<(f64, f64)>, last: (f64, f64)) -> (f64, f64) {
	window.unwrap_or(last)
}

fn mount(id: &str, config: DiagramConfig) -> Result<(Window, Diagram), SurfaceError> {
	let window = web_sys::window().ok_or(SurfaceError::NoDocument)?;
	let document = window.document().ok_or(SurfaceError::NoDocument)?;
	let surface = SvgSurface::find(&document, id)?;
	Ok((
		window,
		Diagram {
			state: TimesTableState::new(config),
			surface,
		},
	))
}

#[component]
pub fn TimesTableSvg(
	#[prop(into)] config: Signal<DiagramConfig>,
	#[prop(default = "view")] id: &'static str,
) -> impl IntoView {
	let diagram: Rc<RefCell<Option<Diagram>>> = Rc::new(RefCell::new(None));
	let tick_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let diagram_config = diagram.clone();

	Effect::new(move |_| {
		let config = config.get_untracked();
		let interval_ms = config.tick_interval_ms();
		let (window, mut mounted) = match mount(id, config) {
			Ok(mounted) => mounted,
			Err(e) => {
				error!("{}", e);
				return;
			}
		};

		let (w, h) = fit_size(window_size(&window), mounted.surface.size());
		mounted.surface.resize(w, h);
		mounted.redraw();
		*diagram.borrow_mut() = Some(mounted);

		let diagram_resize = diagram.clone();
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Some(ref mut d) = *diagram_resize.borrow_mut() {
				let (nw, nh) = fit_size(window_size(&win), d.surface.size());
				d.surface.resize(nw, nh);
				d.redraw();
			}
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let diagram_tick = diagram.clone();
		*tick_cb.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut d) = *diagram_tick.borrow_mut() {
				d.state.tick();
				d.redraw();
			}
		}));
		if let Some(ref cb) = *tick_cb.borrow() {
			let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				interval_ms,
			);
		}
		info!("Times table mounted on #{} ({}ms ticks)", id, interval_ms);
	});

	// Later config changes (e.g. new query parameters) apply without remounting
	Effect::new(move |_| {
		let config = config.get();
		if let Some(ref mut d) = *diagram_config.borrow_mut() {
			d.state.apply(config);
			d.redraw();
		}
	});

	view! {
		<svg
			id=id
			class="times-table"
			style="display: block;"
		/>
	}
}
