use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scene::{CanvasScene, Connector, NODE_RADIUS};

/// Where along a connector its label sits.
const LABEL_AT: f64 = 0.7;
/// Sideways bend of connectors, so opposite directions do not overlap.
const CURVINESS: f64 = 0.2;

pub fn render(scene: &CanvasScene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
	ctx.save();
	let _ = ctx.translate(scene.transform.x, scene.transform.y);
	let _ = ctx.scale(scene.transform.k, scene.transform.k);
	for connector in &scene.connectors {
		draw_connector(scene, connector, ctx);
	}
	draw_nodes(scene, ctx);
	ctx.restore();
}

fn draw_connector(scene: &CanvasScene, connector: &Connector, ctx: &CanvasRenderingContext2d) {
	let (Some(src), Some(dst)) = (scene.node(connector.source), scene.node(connector.target)) else {
		return;
	};
	if !(src.visible && dst.visible) {
		return;
	}
	let k = scene.transform.k;
	let arrow_size = 9.0 / k;
	ctx.set_stroke_style_str("rgba(100, 180, 255, 0.7)");
	ctx.set_fill_style_str("rgba(100, 180, 255, 0.9)");
	ctx.set_line_width(2.0 / k);

	if connector.source == connector.target {
		let (cx, cy) = (src.x, src.y - NODE_RADIUS * 2.0);
		ctx.begin_path();
		let _ = ctx.arc(cx, cy, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.stroke();
		draw_label(ctx, &connector.label, cx, cy - NODE_RADIUS - 4.0, k);
		return;
	}

	let (x1, y1, x2, y2) = (src.x, src.y, dst.x, dst.y);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	// control point pushed off the midpoint
	let (qx, qy) = (
		(x1 + x2) / 2.0 - uy * dist * CURVINESS,
		(y1 + y2) / 2.0 + ux * dist * CURVINESS,
	);

	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.quadratic_curve_to(qx, qy, x2, y2);
	ctx.stroke();

	// arrowhead along the curve's end tangent
	let (tx, ty) = (x2 - qx, y2 - qy);
	let tl = (tx * tx + ty * ty).sqrt().max(0.001);
	let (ux, uy) = (tx / tl, ty / tl);
	let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
	let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
	let (px, py) = (-uy * arrow_size * 0.45, ux * arrow_size * 0.45);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();

	let t = LABEL_AT;
	let lx = (1.0 - t).powi(2) * x1 + 2.0 * (1.0 - t) * t * qx + t * t * x2;
	let ly = (1.0 - t).powi(2) * y1 + 2.0 * (1.0 - t) * t * qy + t * t * y2;
	draw_label(ctx, &connector.label, lx, ly, k);
}

fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, x: f64, y: f64, k: f64) {
	ctx.set_fill_style_str("rgba(220, 230, 255, 0.85)");
	ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
	ctx.set_text_align("center");
	let _ = ctx.fill_text(text, x, y);
	ctx.set_text_align("start");
}

fn draw_nodes(scene: &CanvasScene, ctx: &CanvasRenderingContext2d) {
	let k = scene.transform.k;
	for node in scene.nodes.iter().filter(|n| n.visible) {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();

		ctx.set_fill_style_str("white");
		ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
		let _ = ctx.fill_text(node.caption(), node.x + NODE_RADIUS + 3.0, node.y + 3.0);
	}
}
