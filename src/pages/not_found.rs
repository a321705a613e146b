use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<section class="not-found">
			<h1>"Page not found."</h1>
			<a href="/" class="nav-item">"Back to the studio"</a>
		</section>
	}
}
