//! Attaches text content as names: every text names itself, names the
//! innermost polygon containing its first cell, and names every open
//! graph passing within one grid unit of its baseline.

use log::debug;

use crate::{drawable::Drawable, math::Segment};

pub fn bind_names(drawables: &mut [Drawable]) {
    let text_indices: Vec<usize> =
        (0..drawables.len()).filter(|&i| drawables[i].is_text()).collect();

    for ti in text_indices {
        let Some(text) = drawables[ti].as_text() else { continue };
        let content = text.content().to_owned();
        let center = text.center();
        let baseline = text.baseline();

        drawables[ti].add_name(content.clone());

        // Among containing polygons, the highest-stacked one is innermost
        let mut target: Option<(usize, usize)> = None;
        for (i, drawable) in drawables.iter().enumerate() {
            let Some(polygon) = drawable.as_polygon() else { continue };
            if !polygon.contains_point(center) {
                continue;
            }
            if target.is_none_or(|(_, z)| drawable.z_order() > z) {
                target = Some((i, drawable.z_order()));
            }
        }
        if let Some((pi, z)) = target {
            debug!(target: "binder", "text {content:?} names the polygon at z {z}");
            drawables[pi].add_name(content.clone());
            drawables[ti].set_z_order(z + 1);
        }

        for drawable in drawables.iter_mut() {
            let Some(graph) = drawable.as_open_graph() else { continue };
            let near = graph.edges().iter().any(|&(u, v)| {
                Segment::new(u.position, v.position).distance_to(&baseline) <= 1.0
            });
            if near {
                drawable.add_name(content.clone());
            }
        }
    }
}
