//! Moves the dummy nodes of split edges into the right subgraphs.
//!
//! A chain from `v` to `w` climbs from `v` towards the lowest common ancestor of both endpoints
//! and then descends towards `w`. Each dummy is parented to the first subgraph on that path whose
//! rank span contains the dummy's rank.

use crate::{Dummy, Error, LayoutGraph, Result};
use rustc_hash::FxHashMap as HashMap;
use tracing::instrument;

#[derive(Debug, Clone, Copy)]
struct LowLim {
    low: usize,
    lim: usize,
}

#[instrument(skip_all, name = "parent_dummy_chains")]
pub fn run(g: &mut LayoutGraph) -> Result<()> {
    let nums = postorder(g);
    let chains = g.graph().dummy_chains.clone();

    for head in chains {
        let Some(edge) = g
            .node(&head)
            .and_then(|n| n.dummy.as_ref())
            .and_then(Dummy::chain_edge)
            .cloned()
        else {
            return Err(Error::MissingBackReference {
                node: head,
                expected: "chain edge",
            });
        };

        let (path, lca) = find_path(g, &nums, &edge.v, &edge.w)?;
        let mut path_idx = 0usize;
        let mut ascending = true;
        let mut v = head;

        while v != edge.w {
            let Some(rank) = g.node(&v).and_then(|n| n.rank) else {
                break;
            };

            if ascending {
                while path[path_idx] != lca
                    && path[path_idx]
                        .as_deref()
                        .and_then(|p| g.node(p))
                        .and_then(|n| n.max_rank)
                        .is_some_and(|max| max < rank)
                {
                    path_idx += 1;
                }
                if path[path_idx] == lca {
                    ascending = false;
                }
            }
            if !ascending {
                while path_idx + 1 < path.len()
                    && path[path_idx + 1]
                        .as_deref()
                        .and_then(|p| g.node(p))
                        .and_then(|n| n.min_rank)
                        .is_some_and(|min| min <= rank)
                {
                    path_idx += 1;
                }
            }

            match path[path_idx].as_deref() {
                Some(parent) => {
                    g.set_parent(v.clone(), parent)?;
                }
                None => {
                    g.clear_parent(&v)?;
                }
            }

            let Some(next) = g.successors(&v).first().map(|w| w.to_string()) else {
                break;
            };
            v = next;
        }
    }
    Ok(())
}

/// Path from `v` up to the lowest common ancestor (inclusive) and down to `w` (exclusive).
/// `None` stands for the implicit root.
fn find_path(
    g: &LayoutGraph,
    nums: &HashMap<String, LowLim>,
    v: &str,
    w: &str,
) -> Result<(Vec<Option<String>>, Option<String>)> {
    let lookup = |node: &str| {
        nums.get(node).copied().ok_or_else(|| Error::MissingLowLim {
            node: node.to_string(),
        })
    };
    let v_nums = lookup(v)?;
    let w_nums = lookup(w)?;
    let low = v_nums.low.min(w_nums.low);
    let lim = v_nums.lim.max(w_nums.lim);

    let mut v_path: Vec<Option<String>> = Vec::new();
    let mut parent: Option<String> = Some(v.to_string());
    loop {
        parent = parent.as_deref().and_then(|p| g.parent(p)).map(str::to_string);
        v_path.push(parent.clone());
        let Some(p) = parent.as_deref() else {
            break;
        };
        let p_nums = lookup(p)?;
        if p_nums.low <= low && lim <= p_nums.lim {
            break;
        }
    }
    let lca = parent;

    let mut w_path: Vec<Option<String>> = Vec::new();
    let mut parent = g.parent(w).map(str::to_string);
    while parent != lca {
        let Some(p) = parent else {
            break;
        };
        parent = g.parent(&p).map(str::to_string);
        w_path.push(Some(p));
    }

    v_path.extend(w_path.into_iter().rev());
    Ok((v_path, lca))
}

/// Postorder numbering of the subgraph hierarchy: `u` lies inside `v` iff
/// `v.low <= u.lim <= v.lim`.
fn postorder(g: &LayoutGraph) -> HashMap<String, LowLim> {
    struct Frame<'a> {
        v: &'a str,
        children: Vec<&'a str>,
        cursor: usize,
        low: usize,
    }

    let mut result: HashMap<String, LowLim> = HashMap::default();
    let mut lim = 0usize;
    for root in g.children_root() {
        let mut stack = vec![Frame {
            v: root,
            children: g.children(root),
            cursor: 0,
            low: lim,
        }];
        while let Some(frame) = stack.last_mut() {
            if let Some(&child) = frame.children.get(frame.cursor) {
                frame.cursor += 1;
                stack.push(Frame {
                    v: child,
                    children: g.children(child),
                    cursor: 0,
                    low: lim,
                });
                continue;
            }
            result.insert(frame.v.to_string(), LowLim { low: frame.low, lim });
            lim += 1;
            stack.pop();
        }
    }
    result
}
