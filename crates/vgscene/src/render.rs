// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vgtree::{Figure, FigureKind, Group, NodeState, SvgNode};

use crate::canvas::Canvas;

pub fn render_nodes(parent: SvgNode, canvas: &mut dyn Canvas) {
    for node in parent.children() {
        render_node(node, canvas);
    }
}

fn render_node(node: SvgNode, canvas: &mut dyn Canvas) {
    let tag_name = match node.tag_name() {
        Some(v) => v,
        None => return,
    };

    if tag_name.is_non_rendering() {
        return;
    }

    match *node.state() {
        NodeState::Group(ref group) => render_group(node, group, canvas),
        NodeState::Figure(ref figure) => {
            if figure.display {
                render_figure(figure, canvas);
                render_nodes(node, canvas);
            }
        }
        NodeState::Gradient(_) => {}
        NodeState::None => render_nodes(node, canvas),
    }
}

fn render_group(node: SvgNode, group: &Group, canvas: &mut dyn Canvas) {
    if !group.display {
        return;
    }

    canvas.save();
    if let Some(ref ts) = group.transform {
        canvas.concat(ts);
    }

    render_nodes(node, canvas);

    canvas.restore();
}

fn render_figure(figure: &Figure, canvas: &mut dyn Canvas) {
    canvas.save();
    if let Some(ref ts) = figure.transform {
        canvas.concat(ts);
    }

    match figure.kind {
        FigureKind::Shape(ref shape) => {
            if shape.is_drawable() {
                if let Some(ref fill) = figure.fill {
                    canvas.fill_shape(shape, fill);
                }

                if let Some(ref stroke) = figure.stroke {
                    canvas.stroke_shape(shape, stroke);
                }
            }
        }
        FigureKind::Text(ref text) => {
            if let Some(ref fill) = figure.fill {
                canvas.draw_text(text, fill);
            }

            if let Some(ref stroke) = figure.stroke {
                canvas.draw_text(text, stroke);
            }
        }
    }

    canvas.restore();
}
