//! Frame scheduling behind a small trait so the animation can run on
//! `requestAnimationFrame` in the browser and be single-stepped in tests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Returned by a frame callback to keep or end its loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
	Continue,
	Stop,
}

/// Callback invoked once per frame with the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnMut(f64) -> FrameControl>;

pub trait FrameScheduler {
	/// Replaces any running callback and starts calling `on_frame`.
	fn start(&mut self, on_frame: FrameCallback);
	/// Cancels the pending frame and drops the callback.
	fn stop(&mut self);
}

#[derive(Default)]
struct LoopInner {
	running: bool,
	handle: Option<i32>,
	closure: Option<Closure<dyn FnMut(f64)>>,
}

/// Browser loop over `requestAnimationFrame`. Dropping it stops the loop.
#[derive(Default)]
pub struct AnimationFrameLoop {
	inner: Rc<RefCell<LoopInner>>,
}

impl AnimationFrameLoop {
	pub fn new() -> Self {
		Self::default()
	}
}

fn request_frame(inner: &mut LoopInner) {
	let Some(window) = web_sys::window() else {
		log::warn!("no window; animation loop not scheduled");
		inner.running = false;
		return;
	};
	let Some(cb) = inner.closure.as_ref() else {
		return;
	};
	match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		Ok(handle) => inner.handle = Some(handle),
		Err(err) => {
			log::warn!("requestAnimationFrame failed: {err:?}");
			inner.running = false;
			inner.handle = None;
		}
	}
}

impl FrameScheduler for AnimationFrameLoop {
	fn start(&mut self, mut on_frame: FrameCallback) {
		self.stop();
		let weak: Weak<RefCell<LoopInner>> = Rc::downgrade(&self.inner);
		let closure = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			if !inner.borrow().running {
				return;
			}
			let control = on_frame(timestamp);
			let mut inner = inner.borrow_mut();
			inner.handle = None;
			match control {
				// The closure stays stored until the next start/stop; dropping
				// it here would free it while it runs.
				FrameControl::Stop => inner.running = false,
				FrameControl::Continue if inner.running => request_frame(&mut inner),
				FrameControl::Continue => {}
			}
		});

		let mut inner = self.inner.borrow_mut();
		inner.closure = Some(closure);
		inner.running = true;
		request_frame(&mut inner);
	}

	fn stop(&mut self) {
		let mut inner = self.inner.borrow_mut();
		inner.running = false;
		if let Some(handle) = inner.handle.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(handle);
			}
		}
		inner.closure = None;
	}
}

impl Drop for AnimationFrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Deterministic scheduler advanced by hand with [`ManualFrames::step`].
#[cfg(test)]
#[derive(Default)]
pub struct ManualFrames {
	on_frame: Option<FrameCallback>,
	running: bool,
}

#[cfg(test)]
impl ManualFrames {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Runs one frame if the loop is live. Returns whether it still is.
	pub fn step(&mut self, timestamp: f64) -> bool {
		if !self.running {
			return false;
		}
		if let Some(on_frame) = self.on_frame.as_mut() {
			if on_frame(timestamp) == FrameControl::Stop {
				self.running = false;
			}
		}
		self.running
	}
}

#[cfg(test)]
impl FrameScheduler for ManualFrames {
	fn start(&mut self, on_frame: FrameCallback) {
		self.on_frame = Some(on_frame);
		self.running = true;
	}

	fn stop(&mut self) {
		self.running = false;
		self.on_frame = None;
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn manual_frames_step_until_stopped() {
		let count = Rc::new(Cell::new(0));
		let seen = count.clone();
		let mut frames = ManualFrames::new();
		assert!(!frames.step(0.0));

		frames.start(Box::new(move |_| {
			seen.set(seen.get() + 1);
			FrameControl::Continue
		}));
		assert!(frames.is_running());
		for i in 0..5 {
			assert!(frames.step(i as f64 * 16.0));
		}
		assert_eq!(count.get(), 5);

		frames.stop();
		assert!(!frames.step(100.0));
		assert_eq!(count.get(), 5);
	}

	#[test]
	fn callback_can_end_its_own_loop() {
		let mut frames = ManualFrames::new();
		frames.start(Box::new(|t| {
			if t >= 32.0 { FrameControl::Stop } else { FrameControl::Continue }
		}));
		assert!(frames.step(0.0));
		assert!(frames.step(16.0));
		assert!(!frames.step(32.0));
		assert!(!frames.is_running());
	}
}
