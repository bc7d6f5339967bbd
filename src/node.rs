//! Node Taxonomy for the UI-DSL
//!
//! The IR is a self-referential tree: container variants own their children by
//! value (`Vec<Node>`), component nodes own their named slot regions
//! (`BTreeMap<String, Vec<Node>>`). Nothing points back up the tree, so a tree
//! is acyclic by construction.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::diagnostics::pointer_push;

// ═══════════════════════════════════════════════════════════════════════════════
// NODE IDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Identifier of a node. Always a version 4 UUID on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic v4-shaped id derived from `seed`.
    ///
    /// Lowering uses this so the same document always produces the same tree.
    #[must_use]
    pub fn derived(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// True when `s` is a hyphenated UUID whose version nibble is 4.
pub fn is_uuid_v4(s: &str) -> bool {
    s.len() == 36
        && Uuid::parse_str(s)
            .map(|u| u.get_version_num() == 4)
            .unwrap_or(false)
}

// ═══════════════════════════════════════════════════════════════════════════════
// SHARED ENVELOPE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaLive {
    Off,
    Polite,
    Assertive,
}

/// Aria attributes carried by any node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A11y {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labelled_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub described_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<AriaLive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    None,
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Spacing {
    pub const NAMES: &'static [&'static str] = &["none", "xs", "sm", "md", "lg", "xl"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    Center,
    End,
    Stretch,
}

impl Align {
    pub const NAMES: &'static [&'static str] = &["start", "center", "end", "stretch"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    Start,
    Center,
    End,
    Between,
    Around,
}

impl Justify {
    pub const NAMES: &'static [&'static str] = &["start", "center", "end", "between", "around"];
}

/// Sizing and spacing hints. Values are design tokens, not CSS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify: Option<Justify>,
}

/// Fields every node variant carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBase {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a11y: Option<A11y>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_ui_id: Option<String>,
}

impl NodeBase {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            name: None,
            a11y: None,
            layout: None,
            test_id: None,
            data_ui_id: None,
        }
    }

    pub fn named(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(id)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DATA SOURCES & BINDINGS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
}

/// Where section or component data comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DataSource {
    Placeholder {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Static {
        id: String,
        data: Value,
    },
    #[serde(rename_all = "camelCase")]
    Url {
        id: String,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<HttpMethod>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        refresh_ms: Option<u64>,
    },
}

impl DataSource {
    pub const KINDS: &'static [&'static str] = &["placeholder", "static", "url"];

    pub fn id(&self) -> &str {
        match self {
            DataSource::Placeholder { id, .. }
            | DataSource::Static { id, .. }
            | DataSource::Url { id, .. } => id,
        }
    }
}

/// Maps a path inside a data source onto a component prop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub source_id: String,
    pub path: String,
    pub prop: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// VARIANT PAYLOADS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Area,
    Pie,
}

impl ChartType {
    pub const NAMES: &'static [&'static str] = &["bar", "line", "area", "pie"];
}

/// Data-driven section content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SectionPayload {
    #[serde(rename_all = "camelCase")]
    DataTable {
        data_source_id: String,
        #[serde(default)]
        columns: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Chart {
        data_source_id: String,
        chart_type: ChartType,
    },
}

impl SectionPayload {
    pub const KINDS: &'static [&'static str] = &["dataTable", "chart"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub data_sources: Vec<DataSource>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<SectionPayload>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridNode {
    #[serde(flatten)]
    pub base: NodeBase,
    pub columns: u8,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Vertical,
    Horizontal,
}

impl Direction {
    pub const NAMES: &'static [&'static str] = &["vertical", "horizontal"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default = "default_direction")]
    pub direction: Direction,
    #[serde(default)]
    pub children: Vec<Node>,
}

fn default_direction() -> Direction {
    Direction::Vertical
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoColumnNode {
    #[serde(flatten)]
    pub base: NodeBase,
    /// One of `1:1`, `1:2`, `2:1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

pub const TWO_COLUMN_RATIOS: &[&str] = &["1:1", "1:2", "2:1"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeColumnNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const NAMES: &'static [&'static str] = &["left", "right"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default = "default_side")]
    pub side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

fn default_side() -> Side {
    Side::Left
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A registry component instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    #[serde(flatten)]
    pub base: NodeBase,
    pub component: String,
    #[serde(default)]
    pub props: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub slots: BTreeMap<String, Vec<Node>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bind: Vec<Binding>,
}

impl ComponentNode {
    pub fn new(id: NodeId, component: impl Into<String>) -> Self {
        Self {
            base: NodeBase::new(id),
            component: component.into(),
            props: BTreeMap::new(),
            variant: None,
            slots: BTreeMap::new(),
            bind: Vec::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn with_slot(mut self, slot: impl Into<String>, nodes: Vec<Node>) -> Self {
        self.slots.insert(slot.into(), nodes);
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// NODE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Page(PageNode),
    Section(SectionNode),
    Grid(GridNode),
    Stack(StackNode),
    TwoColumn(TwoColumnNode),
    ThreeColumn(ThreeColumnNode),
    Sidebar(SidebarNode),
    Block(BlockNode),
    Component(ComponentNode),
}

/// The `type` discriminant of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Page,
    Section,
    Grid,
    Stack,
    TwoColumn,
    ThreeColumn,
    Sidebar,
    Block,
    Component,
}

impl NodeKind {
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Page,
        NodeKind::Section,
        NodeKind::Grid,
        NodeKind::Stack,
        NodeKind::TwoColumn,
        NodeKind::ThreeColumn,
        NodeKind::Sidebar,
        NodeKind::Block,
        NodeKind::Component,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Page => "page",
            NodeKind::Section => "section",
            NodeKind::Grid => "grid",
            NodeKind::Stack => "stack",
            NodeKind::TwoColumn => "twoColumn",
            NodeKind::ThreeColumn => "threeColumn",
            NodeKind::Sidebar => "sidebar",
            NodeKind::Block => "block",
            NodeKind::Component => "component",
        }
    }

    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|k| k.as_str() == tag)
    }

    pub fn is_container(self) -> bool {
        self != NodeKind::Component
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed child region together with its JSON-pointer suffix.
#[derive(Debug, Clone, Copy)]
pub struct ChildRegion<'a> {
    /// Region key as it appears under the node (`children` or a slot name).
    pub key: &'a str,
    /// True for component slots.
    pub is_slot: bool,
    pub nodes: &'a [Node],
}

impl<'a> ChildRegion<'a> {
    /// Pointer to this region relative to its owning node.
    pub fn pointer(&self, node_path: &str) -> String {
        if self.is_slot {
            pointer_push(&pointer_push(node_path, "slots"), self.key)
        } else {
            pointer_push(node_path, self.key)
        }
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Page(_) => NodeKind::Page,
            Node::Section(_) => NodeKind::Section,
            Node::Grid(_) => NodeKind::Grid,
            Node::Stack(_) => NodeKind::Stack,
            Node::TwoColumn(_) => NodeKind::TwoColumn,
            Node::ThreeColumn(_) => NodeKind::ThreeColumn,
            Node::Sidebar(_) => NodeKind::Sidebar,
            Node::Block(_) => NodeKind::Block,
            Node::Component(_) => NodeKind::Component,
        }
    }

    pub fn base(&self) -> &NodeBase {
        match self {
            Node::Page(n) => &n.base,
            Node::Section(n) => &n.base,
            Node::Grid(n) => &n.base,
            Node::Stack(n) => &n.base,
            Node::TwoColumn(n) => &n.base,
            Node::ThreeColumn(n) => &n.base,
            Node::Sidebar(n) => &n.base,
            Node::Block(n) => &n.base,
            Node::Component(n) => &n.base,
        }
    }

    pub fn id(&self) -> NodeId {
        self.base().id
    }

    /// Container children, or `None` for component nodes.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Page(n) => Some(&n.children),
            Node::Section(n) => Some(&n.children),
            Node::Grid(n) => Some(&n.children),
            Node::Stack(n) => Some(&n.children),
            Node::TwoColumn(n) => Some(&n.children),
            Node::ThreeColumn(n) => Some(&n.children),
            Node::Sidebar(n) => Some(&n.children),
            Node::Block(n) => Some(&n.children),
            Node::Component(_) => None,
        }
    }

    /// Every region that holds child nodes, in document order.
    pub fn child_regions(&self) -> Vec<ChildRegion<'_>> {
        match self {
            Node::Component(c) => c
                .slots
                .iter()
                .map(|(key, nodes)| ChildRegion {
                    key: key.as_str(),
                    is_slot: true,
                    nodes: nodes.as_slice(),
                })
                .collect(),
            other => other
                .children()
                .map(|nodes| ChildRegion {
                    key: "children",
                    is_slot: false,
                    nodes,
                })
                .into_iter()
                .collect(),
        }
    }

    /// Depth-first pre-order visit of this node and all descendants.
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a Node),
    {
        visit(self);
        for region in self.child_regions() {
            for child in region.nodes {
                child.walk(visit);
            }
        }
    }

    /// Finds the first node carrying `id`.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id() == id {
            return Some(self);
        }
        for region in self.child_regions() {
            for child in region.nodes {
                if let Some(found) = child.find(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        let mut n = 0;
        self.walk(&mut |_| n += 1);
        n
    }
}
