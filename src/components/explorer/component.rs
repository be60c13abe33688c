use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scene::CanvasScene;
use crate::explorer::{
	DataFetcher, Direction, ExplorerConfig, FetchOutcome, FetchTicket, GraphController, LayoutRun,
};

type SharedGraph = Rc<RefCell<GraphController<CanvasScene>>>;
type ActiveRun = Rc<RefCell<Option<LayoutRun<usize>>>>;

/// Pointer travel, in pixels, that turns a click into a drag.
const DRAG_THRESHOLD: f64 = 3.0;

fn failure_messages(graph: &GraphController<CanvasScene>) -> Vec<String> {
	let mut messages: Vec<_> = graph.failures().map(|e| e.to_string()).collect();
	messages.sort();
	messages
}

/// Runs each ticket's fetch on the local executor and feeds the result back.
fn spawn_fetches<F: DataFetcher>(
	graph: &SharedGraph,
	fetcher: &F,
	tickets: Vec<FetchTicket>,
	errors: RwSignal<Vec<String>>,
) {
	for ticket in tickets {
		let pending = fetcher.fetch(ticket.node());
		let graph = Rc::clone(graph);
		spawn_local(async move {
			let result = pending.await;
			let mut graph = graph.borrow_mut();
			if graph.complete_fetch(ticket, result) == FetchOutcome::Failed {
				errors.set(failure_messages(&graph));
			}
		});
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive explorer rooted at `root`, pulling neighbors from `fetcher`.
///
/// Click a node to expand its outgoing relationships, shift-click for
/// incoming ones, alt-click to close it.
#[component]
pub fn GraphExplorer<F>(
	fetcher: F,
	#[prop(into)] root: String,
	#[prop(optional)] config: Option<ExplorerConfig>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView
where
	F: DataFetcher + Clone + 'static,
{
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let graph: SharedGraph = Rc::new(RefCell::new(GraphController::new(
		CanvasScene::new(width.unwrap_or(800.0), height.unwrap_or(600.0)),
		config.unwrap_or_default(),
	)));
	let active: ActiveRun = Rc::new(RefCell::new(None));
	let errors = RwSignal::new(Vec::<String>::new());
	let root_error = RwSignal::new(None::<String>);
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (graph_init, active_init, animate_init, resize_cb_init, fetcher_init) = (
		graph.clone(),
		active.clone(),
		animate.clone(),
		resize_cb.clone(),
		fetcher.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas has no 2d context");
			return;
		};
		graph_init.borrow_mut().renderer_mut().resize(w, h);

		let root_fetch = fetcher_init.fetch(&root);
		let (graph_root, root_id) = (graph_init.clone(), root.clone());
		spawn_local(async move {
			match root_fetch.await {
				Ok(fragment) => {
					graph_root.borrow_mut().open_root(fragment);
				}
				Err(err) => {
					warn!("could not open {root_id}: {err}");
					root_error.set(Some(format!("could not open {root_id}: {err}")));
				}
			}
		});

		if fullscreen {
			let (graph_resize, canvas_resize) = (graph_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				graph_resize.borrow_mut().renderer_mut().resize(nw, nh);
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (graph_anim, active_anim, animate_inner) =
			(graph_init.clone(), active_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			{
				let mut graph = graph_anim.borrow_mut();
				let mut run = active_anim.borrow_mut();
				if let Some(current) = run.as_mut() {
					match current.next() {
						Some(frame) => {
							graph.apply_frame(&frame);
						}
						None => *run = None,
					}
				}
				if graph.renderer_mut().take_dirty() {
					render::render(graph.renderer(), &ctx);
				}
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let graph_md = graph.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let mut graph = graph_md.borrow_mut();
		let scene = graph.renderer_mut();
		match scene.node_at_position(x, y) {
			Some(idx) => {
				let (nx, ny) = scene.node(idx).map(|n| (n.x, n.y)).unwrap_or_default();
				scene.drag.active = true;
				scene.drag.moved = false;
				scene.drag.node = Some(idx);
				scene.drag.start_x = x;
				scene.drag.start_y = y;
				scene.drag.node_start_x = nx;
				scene.drag.node_start_y = ny;
			}
			None => {
				scene.pan.active = true;
				scene.pan.start_x = x;
				scene.pan.start_y = y;
				scene.pan.transform_start_x = scene.transform.x;
				scene.pan.transform_start_y = scene.transform.y;
			}
		}
	};

	let graph_mm = graph.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let mut graph = graph_mm.borrow_mut();
		let scene = graph.renderer_mut();
		if scene.drag.active {
			let (dx, dy) = (x - scene.drag.start_x, y - scene.drag.start_y);
			if (dx * dx + dy * dy).sqrt() > DRAG_THRESHOLD {
				scene.drag.moved = true;
			}
			if let (Some(idx), true) = (scene.drag.node, scene.drag.moved) {
				let k = scene.transform.k;
				let (nx, ny) = (
					scene.drag.node_start_x + dx / k,
					scene.drag.node_start_y + dy / k,
				);
				scene.move_node(idx, nx, ny);
			}
		} else if scene.pan.active {
			scene.transform.x = scene.pan.transform_start_x + (x - scene.pan.start_x);
			scene.transform.y = scene.pan.transform_start_y + (y - scene.pan.start_y);
			scene.mark_dirty();
		}
	};

	let (graph_mu, fetcher_mu) = (graph.clone(), fetcher.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let clicked = {
			let mut graph = graph_mu.borrow_mut();
			let scene = graph.renderer_mut();
			let clicked = match (scene.drag.active, scene.drag.moved, scene.drag.node) {
				(true, false, Some(idx)) => scene.node(idx).map(|n| n.id.clone()),
				_ => None,
			};
			scene.drag = Default::default();
			scene.pan.active = false;
			clicked
		};
		let Some(id) = clicked else {
			return;
		};

		let tickets = {
			let mut graph = graph_mu.borrow_mut();
			if ev.alt_key() {
				info!("closing {id}");
				graph.collapse(&id);
				Vec::new()
			} else if ev.shift_key() {
				graph.expand(&id, Direction::Inbound)
			} else {
				graph.expand(&id, Direction::Outbound)
			}
		};
		errors.set(failure_messages(&graph_mu.borrow()));
		spawn_fetches(&graph_mu, &fetcher_mu, tickets, errors);
	};

	let graph_ml = graph.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut graph = graph_ml.borrow_mut();
		let scene = graph.renderer_mut();
		scene.drag = Default::default();
		scene.pan.active = false;
	};

	let graph_wh = graph.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let mut graph = graph_wh.borrow_mut();
		let scene = graph.renderer_mut();
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		let new_k = (scene.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / scene.transform.k;
		scene.transform.x = x - (x - scene.transform.x) * ratio;
		scene.transform.y = y - (y - scene.transform.y) * ratio;
		scene.transform.k = new_k;
		scene.mark_dirty();
	};

	let (graph_layout, active_layout) = (graph.clone(), active.clone());
	let on_layout = move |_: MouseEvent| {
		let run = {
			let mut graph = graph_layout.borrow_mut();
			graph.renderer_mut().reset_view();
			graph.run_layout()
		};
		info!("layout over {} nodes", run.node_count());
		*active_layout.borrow_mut() = Some(run);
	};

	view! {
		<div class="graph-explorer">
			<canvas
				node_ref=canvas_ref
				class="graph-explorer-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-toolbar">
				<button on:click=on_layout>"Layout"</button>
			</div>
			<div class="graph-errors">
				{move || {
					root_error
						.get()
						.into_iter()
						.chain(errors.get())
						.map(|e| view! { <p class="graph-error">{e}</p> })
						.collect_view()
				}}
			</div>
		</div>
	}
}
