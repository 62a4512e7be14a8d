//! Rank direction handling.
//!
//! The pipeline always lays out top-to-bottom. [`adjust`] swaps node and edge dimensions for
//! horizontal directions beforehand; [`undo`] mirrors and rotates the finished coordinates into
//! the requested direction.

use crate::{LayoutGraph, RankDir};
use std::mem;

pub fn adjust(g: &mut LayoutGraph) {
    if g.graph().rankdir.is_horizontal() {
        swap_width_height(g);
    }
}

pub fn undo(g: &mut LayoutGraph) {
    let rankdir = g.graph().rankdir;
    if matches!(rankdir, RankDir::BottomTop | RankDir::RightLeft) {
        reverse_y(g);
    }
    if rankdir.is_horizontal() {
        swap_xy(g);
        swap_width_height(g);
    }
}

fn swap_width_height(g: &mut LayoutGraph) {
    g.for_each_node_mut(|_, n| mem::swap(&mut n.width, &mut n.height));
    g.for_each_edge_mut(|_, e| mem::swap(&mut e.width, &mut e.height));
}

fn reverse_y(g: &mut LayoutGraph) {
    g.for_each_node_mut(|_, n| n.y = n.y.map(|y| -y));
    g.for_each_edge_mut(|_, e| {
        e.points.iter_mut().for_each(|p| p.y = -p.y);
        e.y = e.y.map(|y| -y);
    });
}

fn swap_xy(g: &mut LayoutGraph) {
    g.for_each_node_mut(|_, n| mem::swap(&mut n.x, &mut n.y));
    g.for_each_edge_mut(|_, e| {
        e.points.iter_mut().for_each(|p| mem::swap(&mut p.x, &mut p.y));
        mem::swap(&mut e.x, &mut e.y);
    });
}
