use strata::graphlib::GraphOptions;
use strata::order::{ConstraintGraph, LayerGraph, LayerNode, add_subgraph_constraints};

fn layer_graph() -> LayerGraph {
    LayerGraph::new(GraphOptions {
        compound: true,
        ..Default::default()
    })
}

fn constraints() -> ConstraintGraph {
    ConstraintGraph::new(GraphOptions::default())
}

fn order(vs: &[&str]) -> Vec<String> {
    vs.iter().map(|v| v.to_string()).collect()
}

fn edges(cg: &ConstraintGraph) -> Vec<(String, String)> {
    let mut edges: Vec<(String, String)> = cg.edges().map(|e| (e.v.clone(), e.w.clone())).collect();
    edges.sort();
    edges
}

#[test]
fn adds_nothing_for_a_flat_set_of_nodes() {
    let mut lg = layer_graph();
    let vs = order(&["a", "b", "c", "d"]);
    for v in &vs {
        lg.set_node(v.clone(), LayerNode::default());
    }
    let mut cg = constraints();
    add_subgraph_constraints(&lg, &mut cg, &vs);
    assert_eq!(cg.node_count(), 0);
    assert_eq!(cg.edge_count(), 0);
}

#[test]
fn adds_nothing_for_contiguous_subgraph_members() {
    let mut lg = layer_graph();
    let vs = order(&["a", "b", "c"]);
    for v in &vs {
        lg.set_parent(v.clone(), "sg").unwrap();
    }
    let mut cg = constraints();
    add_subgraph_constraints(&lg, &mut cg, &vs);
    assert_eq!(cg.edge_count(), 0);
}

#[test]
fn constrains_adjacent_sibling_subgraphs() {
    let mut lg = layer_graph();
    lg.set_parent("a", "sg1").unwrap();
    lg.set_parent("b", "sg2").unwrap();
    let mut cg = constraints();
    add_subgraph_constraints(&lg, &mut cg, &order(&["a", "b"]));
    assert_eq!(edges(&cg), vec![("sg1".to_string(), "sg2".to_string())]);
}

#[test]
fn constrains_siblings_on_every_level() {
    let mut lg = layer_graph();
    lg.set_parent("a", "sg2").unwrap();
    lg.set_parent("sg2", "sg1").unwrap();
    lg.set_parent("b", "sg3").unwrap();
    lg.set_parent("sg3", "sg1").unwrap();
    lg.set_parent("c", "sg4").unwrap();
    let mut cg = constraints();
    add_subgraph_constraints(&lg, &mut cg, &order(&["a", "b", "c"]));
    assert_eq!(
        edges(&cg),
        vec![
            ("sg1".to_string(), "sg4".to_string()),
            ("sg2".to_string(), "sg3".to_string()),
        ]
    );
}
