//! Label types carried by the layout graph and the configuration they read.
//!
//! `GraphLabel` doubles as the user-facing configuration (it derives serde so it can be loaded
//! from JSON) and as the home of per-run pipeline state such as the dummy-id counter.

use crate::graphlib::{EdgeKey, Graph};
use serde::{Deserialize, Serialize};

pub type LayoutGraph = Graph<NodeLabel, EdgeLabel, GraphLabel>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankDir {
    #[default]
    #[serde(alias = "TB")]
    TopBottom,
    #[serde(alias = "BT")]
    BottomTop,
    #[serde(alias = "LR")]
    LeftRight,
    #[serde(alias = "RL")]
    RightLeft,
}

impl RankDir {
    /// Ranks run left-to-right or right-to-left.
    pub fn is_horizontal(self) -> bool {
        matches!(self, RankDir::LeftRight | RankDir::RightLeft)
    }
}

/// One of the four Brandes-Köpf alignments. Leaving `GraphLabel::align` unset balances them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    #[serde(alias = "UL")]
    UpLeft,
    #[serde(alias = "UR")]
    UpRight,
    #[serde(alias = "DL")]
    DownLeft,
    #[serde(alias = "DR")]
    DownRight,
}

impl Align {
    pub const ALL: [Align; 4] = [
        Align::UpLeft,
        Align::UpRight,
        Align::DownLeft,
        Align::DownRight,
    ];

    pub fn is_up(self) -> bool {
        matches!(self, Align::UpLeft | Align::UpRight)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Align::UpLeft | Align::DownLeft)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Acyclicer {
    Greedy,
    #[default]
    #[serde(alias = "dfs")]
    DepthFirstSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ranker {
    #[default]
    NetworkSimplex,
    TightTree,
    LongestPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelPos {
    #[serde(alias = "l")]
    Left,
    #[serde(alias = "c")]
    Center,
    #[default]
    #[serde(alias = "r")]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphLabel {
    pub rankdir: RankDir,
    pub align: Option<Align>,
    pub nodesep: f64,
    pub edgesep: f64,
    pub ranksep: f64,
    pub marginx: f64,
    pub marginy: f64,
    pub acyclicer: Acyclicer,
    pub ranker: Ranker,

    /// Bounding box of the finished layout, margins included.
    pub width: f64,
    pub height: f64,

    #[serde(skip)]
    pub nesting_root: Option<String>,
    #[serde(skip)]
    pub node_rank_factor: Option<i32>,
    #[serde(skip)]
    pub dummy_chains: Vec<String>,
    #[serde(skip)]
    pub max_rank: Option<i32>,
    #[serde(skip)]
    next_dummy_id: usize,
}

impl Default for GraphLabel {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TopBottom,
            align: None,
            nodesep: 50.0,
            edgesep: 20.0,
            ranksep: 50.0,
            marginx: 0.0,
            marginy: 0.0,
            acyclicer: Acyclicer::default(),
            ranker: Ranker::default(),
            width: 0.0,
            height: 0.0,
            nesting_root: None,
            node_rank_factor: None,
            dummy_chains: Vec::new(),
            max_rank: None,
            next_dummy_id: 0,
        }
    }
}

impl GraphLabel {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Next candidate id for a synthetic node. The counter lives on the label, so ids are
    /// reproducible per graph and independent across graphs.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next_dummy_id += 1;
        format!("{prefix}{}", self.next_dummy_id)
    }

    /// Copies the user-facing settings, leaving pipeline state and results behind.
    pub fn settings(&self) -> Self {
        Self {
            rankdir: self.rankdir,
            align: self.align,
            nodesep: self.nodesep,
            edgesep: self.edgesep,
            ranksep: self.ranksep,
            marginx: self.marginx,
            marginy: self.marginy,
            acyclicer: self.acyclicer,
            ranker: self.ranker,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// What a synthetic node stands in for.
#[derive(Debug, Clone, PartialEq)]
pub enum Dummy {
    /// One segment of a long edge split by normalization. Only the first node of a chain
    /// carries the original label.
    Edge {
        edge: EdgeKey,
        original: Option<Box<EdgeLabel>>,
    },
    /// The chain node sized to hold the edge's label.
    EdgeLabel {
        edge: EdgeKey,
        original: Option<Box<EdgeLabel>>,
        labelpos: LabelPos,
    },
    /// Marks the rank an edge label should sit on while empty ranks are removed.
    EdgeProxy { edge: EdgeKey },
    Border { side: BorderSide },
    SelfEdge { edge: EdgeKey, label: Box<EdgeLabel> },
    Root,
}

impl Dummy {
    /// The edge a normalization chain node belongs to.
    pub fn chain_edge(&self) -> Option<&EdgeKey> {
        match self {
            Dummy::Edge { edge, .. } | Dummy::EdgeLabel { edge, .. } => Some(edge),
            _ => None,
        }
    }

    pub fn is_border(&self) -> bool {
        matches!(self, Dummy::Border { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rank: Option<i32>,
    pub order: Option<usize>,
    pub min_rank: Option<i32>,
    pub max_rank: Option<i32>,
    pub border_top: Option<String>,
    pub border_bottom: Option<String>,
    /// Left/right border nodes of a subgraph, indexed by rank.
    pub border_left: Vec<Option<String>>,
    pub border_right: Vec<Option<String>>,
    pub dummy: Option<Dummy>,
    pub self_edges: Vec<SelfEdge>,
}

impl NodeLabel {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }

    pub fn is_border(&self) -> bool {
        self.dummy.as_ref().is_some_and(Dummy::is_border)
    }

    pub fn border_side(&self) -> Option<BorderSide> {
        match self.dummy {
            Some(Dummy::Border { side }) => Some(side),
            _ => None,
        }
    }

    pub fn labelpos(&self) -> Option<LabelPos> {
        match self.dummy {
            Some(Dummy::EdgeLabel { labelpos, .. }) => Some(labelpos),
            _ => None,
        }
    }

    pub fn border_left_at(&self, rank: i32) -> Option<&str> {
        usize::try_from(rank)
            .ok()
            .and_then(|r| self.border_left.get(r))
            .and_then(|v| v.as_deref())
    }

    pub fn border_right_at(&self, rank: i32) -> Option<&str> {
        usize::try_from(rank)
            .ok()
            .and_then(|r| self.border_right.get(r))
            .and_then(|v| v.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub width: f64,
    pub height: f64,
    pub labelpos: LabelPos,
    pub labeloffset: f64,
    pub minlen: usize,
    pub weight: f64,
    pub label_rank: Option<i32>,
    pub nesting_edge: bool,
    pub reversed: bool,
    pub forward_name: Option<String>,

    pub x: Option<f64>,
    pub y: Option<f64>,
    pub points: Vec<Point>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            labelpos: LabelPos::Right,
            labeloffset: 10.0,
            minlen: 1,
            weight: 1.0,
            label_rank: None,
            nesting_edge: false,
            reversed: false,
            forward_name: None,
            x: None,
            y: None,
            points: Vec::new(),
        }
    }
}

impl EdgeLabel {
    pub fn has_label(&self) -> bool {
        self.width != 0.0 && self.height != 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelfEdge {
    pub edge: EdgeKey,
    pub label: EdgeLabel,
}
