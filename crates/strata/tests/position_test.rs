use strata::graphlib::GraphOptions;
use strata::position::{position, position_y};
use strata::{LayoutGraph, NodeLabel};

fn node(rank: i32, order: usize, width: f64, height: f64) -> NodeLabel {
    NodeLabel {
        rank: Some(rank),
        order: Some(order),
        width,
        height,
        ..Default::default()
    }
}

fn new_graph() -> LayoutGraph {
    LayoutGraph::new(GraphOptions {
        compound: true,
        ..Default::default()
    })
}

#[test]
fn position_y_respects_ranksep() {
    let mut g = new_graph();
    g.graph_mut().ranksep = 1000.0;
    g.set_node("a", node(0, 0, 50.0, 100.0));
    g.set_node("b", node(1, 0, 50.0, 100.0));
    g.set_edge("a", "b");

    let ys = position_y(&g);
    assert_eq!(ys["a"], 100.0 / 2.0);
    assert_eq!(ys["b"], 100.0 + 1000.0 + 100.0 / 2.0);
}

#[test]
fn position_y_uses_the_tallest_node_of_each_rank() {
    let mut g = new_graph();
    g.graph_mut().ranksep = 1000.0;
    g.set_node("a", node(0, 0, 50.0, 100.0));
    g.set_node("b", node(0, 1, 50.0, 80.0));
    g.set_node("c", node(1, 0, 50.0, 90.0));
    g.set_edge("a", "c");

    let ys = position_y(&g);
    assert_eq!(ys["a"], 100.0 / 2.0);
    assert_eq!(ys["b"], 100.0 / 2.0);
    assert_eq!(ys["c"], 100.0 + 1000.0 + 90.0 / 2.0);
}

#[test]
fn position_sets_coordinates_on_leaves_only() {
    let mut g = new_graph();
    g.graph_mut().ranksep = 10.0;
    g.graph_mut().nodesep = 10.0;
    g.set_node("a", node(0, 0, 50.0, 20.0));
    g.set_node("b", node(0, 1, 50.0, 20.0));
    g.set_node("sg1", NodeLabel::default());
    g.set_parent("a", "sg1").unwrap();
    position(&mut g).unwrap();

    let a = g.node("a").unwrap();
    let b = g.node("b").unwrap();
    assert_eq!(a.y, Some(10.0));
    assert_eq!(b.y, Some(10.0));
    assert_eq!(b.x.unwrap() - a.x.unwrap(), 25.0 + 5.0 + 5.0 + 25.0);

    let sg = g.node("sg1").unwrap();
    assert_eq!((sg.x, sg.y), (None, None));
}
