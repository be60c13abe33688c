use leptos::either::Either;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::explorer::{GraphExplorer, HttpFetcher};
use crate::explorer::{ExplorerConfig, Fragment, StaticFetcher};

const RELATIONS: &[&str] = &["partOf", "derivedFrom", "seeAlso", "replaces"];

fn demo_id(i: usize) -> String {
	format!("urn:demo:{i}")
}

/// Generate a demo dataset: a random tree plus a few cross links, served as
/// fragments that list every relationship touching their node.
fn generate_sample_data(n: usize) -> StaticFetcher {
	let mut edges: Vec<(usize, usize, &str)> = (1..n)
		.map(|i| {
			let target = (rand_simple(i) * (i as f64)) as usize;
			(i, target, RELATIONS[i % RELATIONS.len()])
		})
		.collect();
	for i in (3..n).step_by(7) {
		let target = (rand_simple(i * 31) * (n as f64)) as usize;
		edges.push((i, target, "seeAlso"));
	}

	let fragments = (0..n).map(|i| {
		let mut fragment = Fragment::new(demo_id(i)).with_label(format!("Dataset {i}"));
		for &(src, dst, name) in edges.iter().filter(|(s, d, _)| *s == i || *d == i) {
			fragment = fragment.with_link(demo_id(src), demo_id(dst), name);
		}
		fragment
	});
	StaticFetcher::new(fragments)
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Default Home Page. `?uri=` explores a live dataset, otherwise a demo one.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let root = query.with_untracked(|q| q.get("uri").map(|v| v.to_string()));
	let config = ExplorerConfig::default();

	let explorer = match root {
		Some(uri) => Either::Left(view! {
			<GraphExplorer
				fetcher=HttpFetcher::new(config.fetch_base_url.clone())
				root=uri
				config=config
				fullscreen=true
			/>
		}),
		None => Either::Right(view! {
			<GraphExplorer fetcher=generate_sample_data(60) root=demo_id(0) fullscreen=true />
		}),
	};

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

			<div class="fullscreen-graph">
				{explorer}
				<div class="graph-overlay">
					<h1>"Dataset Explorer"</h1>
					<p class="subtitle">
						"Click a node to follow its links. Shift-click for incoming links, "
						"Alt-click to close it. Drag to rearrange, scroll to zoom."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
