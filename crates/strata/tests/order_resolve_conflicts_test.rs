use strata::graphlib::GraphOptions;
use strata::order::{BarycenterEntry, ConstraintGraph, SortEntry, resolve_conflicts};

fn entry(v: &str, barycenter: Option<f64>, weight: f64) -> BarycenterEntry {
    BarycenterEntry {
        v: v.to_string(),
        barycenter,
        weight,
    }
}

fn sort_entry(vs: &[&str], i: usize, barycenter: Option<f64>, weight: f64) -> SortEntry {
    SortEntry {
        vs: vs.iter().map(|v| v.to_string()).collect(),
        i,
        barycenter,
        weight,
    }
}

fn constraints(edges: &[(&str, &str)]) -> ConstraintGraph {
    let mut cg = ConstraintGraph::new(GraphOptions::default());
    for (v, w) in edges {
        cg.set_edge(*v, *w);
    }
    cg
}

#[test]
fn returns_entries_unchanged_without_constraints() {
    let input = [entry("a", Some(2.0), 3.0), entry("b", Some(1.0), 2.0)];
    let results = resolve_conflicts(&input, &constraints(&[]));
    assert_eq!(
        results,
        vec![
            sort_entry(&["a"], 0, Some(2.0), 3.0),
            sort_entry(&["b"], 1, Some(1.0), 2.0),
        ]
    );
}

#[test]
fn returns_entries_unchanged_when_constraints_agree() {
    let input = [entry("a", Some(2.0), 3.0), entry("b", Some(1.0), 2.0)];
    let results = resolve_conflicts(&input, &constraints(&[("b", "a")]));
    assert_eq!(
        results,
        vec![
            sort_entry(&["a"], 0, Some(2.0), 3.0),
            sort_entry(&["b"], 1, Some(1.0), 2.0),
        ]
    );
}

#[test]
fn coalesces_entries_that_violate_a_constraint() {
    let input = [entry("a", Some(2.0), 3.0), entry("b", Some(1.0), 2.0)];
    let results = resolve_conflicts(&input, &constraints(&[("a", "b")]));
    assert_eq!(
        results,
        vec![sort_entry(
            &["a", "b"],
            0,
            Some((3.0 * 2.0 + 2.0 * 1.0) / 5.0),
            5.0
        )]
    );
}

#[test]
fn coalesces_when_a_barycenter_is_missing() {
    let input = [entry("a", None, 0.0), entry("b", Some(1.0), 2.0)];
    let results = resolve_conflicts(&input, &constraints(&[("a", "b")]));
    assert_eq!(results, vec![sort_entry(&["a", "b"], 0, Some(1.0), 2.0)]);
}

#[test]
fn keeps_both_entries_unsortable_when_neither_has_a_barycenter() {
    let input = [entry("a", None, 0.0), entry("b", None, 0.0)];
    let results = resolve_conflicts(&input, &constraints(&[("a", "b")]));
    assert_eq!(results, vec![sort_entry(&["a", "b"], 0, None, 0.0)]);
}

#[test]
fn ignores_constraints_on_unknown_nodes() {
    let input = [entry("a", Some(2.0), 3.0), entry("b", Some(1.0), 2.0)];
    let results = resolve_conflicts(&input, &constraints(&[("a", "x"), ("y", "b")]));
    assert_eq!(results.len(), 2);
}

#[test]
fn follows_a_chain_of_constraints() {
    let input = [
        entry("a", Some(4.0), 1.0),
        entry("b", Some(3.0), 1.0),
        entry("c", Some(2.0), 1.0),
    ];
    let results = resolve_conflicts(&input, &constraints(&[("a", "b"), ("b", "c")]));
    assert_eq!(results, vec![sort_entry(&["a", "b", "c"], 0, Some(3.0), 3.0)]);
}
