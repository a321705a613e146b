use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::config::ThreadGridConfig;
use super::render;
use super::scheduler::{AnimationFrameLoop, FrameControl, FrameScheduler};
use super::state::ThreadGridState;
use super::types::Point;
use crate::components::canvas::{canvas_style, client_origin, context_2d, fit_to_parent};

type SharedState = Rc<RefCell<Option<ThreadGridState>>>;
type SharedLoop = Rc<RefCell<AnimationFrameLoop>>;

/// Dot grid with pointer-reactive threads. Children render above the canvas
/// and their pointer moves still reach the grid.
#[component]
pub fn ThreadGridCanvas(
	#[prop(optional)] config: Option<ThreadGridConfig>,
	/// Each change of this counter sweeps the virtual pointer across the grid.
	#[prop(into, optional)]
	sweep: Option<Signal<u32>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] children: Option<Children>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.unwrap_or_default();
	let state: SharedState = Rc::new(RefCell::new(None));
	// Both loops stop when dropped, which happens once the effects holding
	// them are disposed with the component.
	let frames: SharedLoop = Rc::new(RefCell::new(AnimationFrameLoop::new()));
	let sweep_frames: SharedLoop = Rc::new(RefCell::new(AnimationFrameLoop::new()));
	let (state_init, frames_init) = (state.clone(), frames.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = fit_to_parent(&canvas, width, height);
		let ctx = match context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(err) => {
				warn!("thread grid disabled: {err:?}");
				return;
			}
		};

		let mut rng = SmallRng::seed_from_u64(js_sys::Date::now().to_bits());
		let grid = ThreadGridState::new(config.clone(), w, h, &mut rng);
		debug!(
			"thread grid {w}x{h}: {} dots, {} threads",
			grid.dots.len(),
			grid.connectors.len()
		);
		*state_init.borrow_mut() = Some(grid);

		let state_anim = state_init.clone();
		frames_init.borrow_mut().start(Box::new(move |_| {
			let mut guard = state_anim.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return FrameControl::Stop;
			};
			s.tick();
			render::render(s, &ctx);
			if s.has_connectors() {
				FrameControl::Continue
			} else {
				FrameControl::Stop
			}
		}));
	});

	if let Some(sweep) = sweep {
		let (state_sw, sweep_frames) = (state.clone(), sweep_frames.clone());
		Effect::new(move |prev: Option<u32>| {
			let n = sweep.get();
			if prev.is_some_and(|p| p != n) {
				start_sweep(&state_sw, &sweep_frames);
			}
			n
		});
	}

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let origin = client_origin(&container);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_moved(Point::new(ev.client_x() as f64, ev.client_y() as f64), origin);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_left();
		}
	};

	view! {
		<div
			node_ref=container_ref
			class="thread-grid"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="position: relative; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				class="thread-grid-canvas"
				style=canvas_style(width, height)
			/>
			{children.map(|children| children())}
		</div>
	}
}

/// Runs the virtual sweep on its own frame loop until the tween ends.
fn start_sweep(state: &SharedState, frames: &SharedLoop) {
	let accepted = state
		.borrow_mut()
		.as_mut()
		.is_some_and(|s| s.trigger_sweep());
	if !accepted {
		return;
	}
	let state = state.clone();
	frames.borrow_mut().start(Box::new(move |now| {
		let mut guard = state.borrow_mut();
		if guard.as_mut().is_some_and(|s| s.advance_sweep(now)) {
			FrameControl::Continue
		} else {
			FrameControl::Stop
		}
	}));
}
