//! Browser canvas plumbing shared by the animated components.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use super::thread_grid::types::Point;

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
	canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("2d context unavailable"))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(JsValue::from)
}

/// Sizes the canvas backing store to `width` x `height`, falling back to the
/// parent element's client size for whichever is not given.
pub fn fit_to_parent(
	canvas: &HtmlCanvasElement,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	let parent = canvas.parent_element();
	let parent_size = |size: fn(&Element) -> i32| parent.as_ref().map_or(0.0, |p| size(p) as f64);
	let w = width.unwrap_or_else(|| parent_size(Element::client_width));
	let h = height.unwrap_or_else(|| parent_size(Element::client_height));
	canvas.set_width(w.max(0.0) as u32);
	canvas.set_height(h.max(0.0) as u32);
	(w, h)
}

/// Inline style for an absolutely placed canvas. An explicit size pins the
/// CSS box to the backing store so drawing and pointer coordinates agree;
/// otherwise the canvas stretches over its parent.
pub fn canvas_style(width: Option<f64>, height: Option<f64>) -> String {
	let extent = |size: Option<f64>| match size {
		Some(px) => format!("{}px", px.max(0.0)),
		None => "100%".to_string(),
	};
	format!(
		"position: absolute; left: 0; top: 0; width: {}; height: {}; display: block; \
		 pointer-events: none;",
		extent(width),
		extent(height)
	)
}

/// Top-left corner of `element` in client coordinates.
pub fn client_origin(element: &Element) -> Point {
	let rect = element.get_bounding_client_rect();
	Point::new(rect.left(), rect.top())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_size_pins_css_box() {
		let style = canvas_style(Some(320.0), Some(180.0));
		assert!(style.contains("width: 320px;"), "{style}");
		assert!(style.contains("height: 180px;"), "{style}");
		assert!(!style.contains("inset"));
	}

	#[test]
	fn missing_size_follows_parent() {
		let style = canvas_style(None, Some(90.0));
		assert!(style.contains("width: 100%;"), "{style}");
		assert!(style.contains("height: 90px;"), "{style}");
	}
}
