//! Call-to-action button whose inner threads part around the pointer.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::canvas::{client_origin, context_2d, fit_to_parent};
use super::thread_grid::physics::{ButtonThreads, presets};
use super::thread_grid::scheduler::{AnimationFrameLoop, FrameControl, FrameScheduler};

const THREAD_COLOR: &str = "rgba(255, 255, 255, 0.35)";

struct ButtonSurface {
	threads: ButtonThreads,
	width: f64,
	height: f64,
}

fn render(surface: &ButtonSurface, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (surface.width, surface.height);
	ctx.clear_rect(0.0, 0.0, w, h);
	ctx.set_stroke_style_str(THREAD_COLOR);
	ctx.set_line_width(1.0);
	for (&x, &offset) in surface.threads.anchors().iter().zip(surface.threads.offsets()) {
		ctx.begin_path();
		ctx.move_to(x, 0.0);
		ctx.quadratic_curve_to(x + offset, h / 2.0, x, h);
		ctx.stroke();
	}
}

#[component]
pub fn ThreadButton(
	#[prop(into)] label: String,
	#[prop(default = 14)] threads: usize,
	#[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let button_ref = NodeRef::<leptos::html::Button>::new();
	let surface: Rc<RefCell<Option<ButtonSurface>>> = Rc::new(RefCell::new(None));
	let frames = Rc::new(RefCell::new(AnimationFrameLoop::new()));
	let (surface_init, frames_init) = (surface.clone(), frames.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (width, height) = fit_to_parent(&canvas, None, None);
		let ctx = match context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(err) => {
				warn!("thread button disabled: {err:?}");
				return;
			}
		};
		*surface_init.borrow_mut() = Some(ButtonSurface {
			threads: ButtonThreads::new(threads, width, presets::BUTTON_THREADS),
			width,
			height,
		});

		let surface_anim = surface_init.clone();
		frames_init.borrow_mut().start(Box::new(move |_| {
			let mut guard = surface_anim.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return FrameControl::Stop;
			};
			s.threads.step();
			render(s, &ctx);
			if s.threads.anchors().is_empty() {
				FrameControl::Stop
			} else {
				FrameControl::Continue
			}
		}));
	});

	let surface_track = surface.clone();
	let track = move |ev: MouseEvent| {
		let Some(button) = button_ref.get() else {
			return;
		};
		let origin = client_origin(&button);
		if let Some(ref mut s) = *surface_track.borrow_mut() {
			s.threads.set_hovered(true);
			s.threads.set_pointer_x(ev.client_x() as f64 - origin.x);
		}
	};
	let track_move = track.clone();

	let surface_ml = surface.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *surface_ml.borrow_mut() {
			s.threads.set_hovered(false);
		}
	};

	let class = match class {
		Some(extra) => format!("thread-button {extra}"),
		None => "thread-button".to_string(),
	};

	view! {
		<button
			node_ref=button_ref
			class=class
			on:mouseenter=track
			on:mousemove=track_move
			on:mouseleave=on_mouseleave
			style="position: relative; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				class="thread-button-canvas"
				style="position: absolute; inset: 0; width: 100%; height: 100%; pointer-events: none;"
			/>
			<span style="position: relative;">{label}</span>
		</button>
	}
}
