use std::time::Duration;

use leptos::prelude::*;
use log::warn;

/// Cycles through `words` every `period_ms`, calling `on_rotate` with the new
/// index after each change.
#[component]
pub fn RotatingText(
	words: &'static [&'static str],
	#[prop(default = 2600)] period_ms: u64,
	#[prop(optional)] on_rotate: Option<Callback<usize>>,
) -> impl IntoView {
	let (index, set_index) = signal(0usize);

	if words.len() > 1 {
		let tick = move || {
			let next = (index.get_untracked() + 1) % words.len();
			set_index.set(next);
			if let Some(cb) = on_rotate {
				cb.run(next);
			}
		};
		match set_interval_with_handle(tick, Duration::from_millis(period_ms)) {
			Ok(handle) => on_cleanup(move || handle.clear()),
			Err(err) => warn!("text rotation disabled: {err:?}"),
		}
	}

	view! {
		<span class="rotating-text">
			{move || words.get(index.get()).copied().unwrap_or_default()}
		</span>
	}
}
