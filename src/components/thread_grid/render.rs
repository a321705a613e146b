use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ThreadGridState;

pub fn render(state: &ThreadGridState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	draw_dots(state, ctx);
	draw_threads(state, ctx);
}

fn draw_dots(state: &ThreadGridState, ctx: &CanvasRenderingContext2d) {
	for dot in &state.dots {
		ctx.begin_path();
		let _ = ctx.arc(dot.x, dot.y, dot.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(dot.color);
		ctx.fill();
	}
}

fn draw_threads(state: &ThreadGridState, ctx: &CanvasRenderingContext2d) {
	let width = state.config.thread_width;
	ctx.set_line_cap("round");
	for connector in &state.connectors {
		let control = connector.control_point();
		// Hover only thickens the stroke; physics ignores it.
		let (line_width, alpha) = if connector.hovered {
			(width * 2.0, 1.0)
		} else {
			(width, 0.85)
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(connector.color);
		ctx.set_line_width(line_width);
		ctx.begin_path();
		ctx.move_to(connector.start.x, connector.start.y);
		ctx.quadratic_curve_to(control.x, control.y, connector.end.x, connector.end.y);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}
