use leptos::prelude::*;

use crate::components::rotating_text::RotatingText;
use crate::components::thread_button::ThreadButton;
use crate::components::thread_grid::config::{ConnectionPolicy, GapMode, SweepConfig, SweepOverlap};
use crate::components::thread_grid::{ThreadGridCanvas, ThreadGridConfig};

const HERO_WORDS: &[&str] = &["impact.", "clarity.", "momentum.", "delight."];

/// A fresh word restarts the sweep even if the last one is still crossing.
fn hero_grid() -> ThreadGridConfig {
	ThreadGridConfig {
		sweep: SweepConfig {
			overlap: SweepOverlap::Restart,
			..SweepConfig::default()
		},
		..ThreadGridConfig::default()
	}
}

fn closing_grid() -> ThreadGridConfig {
	ThreadGridConfig {
		gap: GapMode::Jittered { min: 28.0, max: 44.0 },
		overscan: 1,
		policies: vec![ConnectionPolicy::NearestNeighbor {
			count: 12,
			min_cells: 1.5,
			max_cells: 3.0,
		}],
		..ThreadGridConfig::default()
	}
}

#[component]
fn Navbar() -> impl IntoView {
	view! {
		<nav class="navbar">
			<div class="container navbar-content">
				<div class="logo">"Palett Studios"</div>
				<div class="nav-links">
					<a href="#work" class="nav-item">"Work"</a>
					<a href="#services" class="nav-item">"Services"</a>
					<a href="#about" class="nav-item">"About"</a>
					<a href="#contact" class="btn-contact">"Start a Project"</a>
				</div>
			</div>
		</nav>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// Every word change sweeps a virtual pointer across the thread grid.
	let (sweeps, set_sweeps) = signal(0u32);
	let on_rotate = Callback::new(move |_: usize| set_sweeps.update(|n| *n += 1));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<Navbar />
			<main>
				<section class="hero-section">
					<ThreadGridCanvas config=hero_grid() sweep=sweeps>
						<div class="container hero-content">
							<span class="hero-label">"Available for new projects"</span>
							<h1 class="hero-title">
								"Digital experiences "
								<br />
								<span class="gradient-text">
									"curated for "
									<RotatingText words=HERO_WORDS on_rotate=on_rotate />
								</span>
							</h1>
							<p class="hero-subtitle">
								"Palett Studios is a creative collective building premium digital products, engaging brands, and immersive web experiences."
							</p>
							<div class="hero-actions">
								<ThreadButton label="Our Work" class="btn-hero-primary" />
								<button class="btn-hero-secondary">"Contact Us"</button>
							</div>
						</div>
					</ThreadGridCanvas>
				</section>
				<div class="container closing">
					<ThreadGridCanvas config=closing_grid()>
						<div class="glass-panel">
							<h2>"Ready to clean up the web?"</h2>
							<p>"More sections coming soon."</p>
						</div>
					</ThreadGridCanvas>
				</div>
			</main>
		</ErrorBoundary>
	}
}
