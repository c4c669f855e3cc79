use std::collections::HashMap;

use tracing::debug;
use xitca_unsafe_collection::small_str::SmallBoxedStr;

use crate::{
    error::InsertError,
    escape,
    params::Params,
    segment::{self, Matcher, Segment, SegmentKind},
    suffix::SuffixExts,
};

/// Handle to a node of a [`Router`](crate::Router).
///
/// Ids are only meaningful to the router that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

pub(crate) const ROOT: NodeId = NodeId(0);

/// One segment position of the trie.
#[derive(Clone)]
pub(crate) struct Node<H> {
    // raw pattern text of this level.
    pub(crate) segment: String,

    // full pattern of the first route terminating here.
    pub(crate) pattern: Option<String>,

    pub(crate) kind: SegmentKind,

    // capture names in declaration order, leading colon kept.
    pub(crate) names: Vec<String>,

    pub(crate) matcher: Option<Matcher>,

    pub(crate) endpoint: bool,

    pub(crate) optional: bool,

    // used for path reconstruction only. never followed while matching.
    pub(crate) parent: Option<NodeId>,

    // static children keyed by their literal with escaped colons collapsed.
    statics: HashMap<String, NodeId>,

    // named and optional named children in registration order.
    seg_children: Vec<NodeId>,

    // children that may be skipped when the path ends in front of them.
    option_children: Vec<NodeId>,

    // splat, extension splat and regex children in registration order.
    vary_children: Vec<NodeId>,

    // handlers in registration order. the order doubles as the allow list.
    pub(crate) handlers: Vec<(SmallBoxedStr, H)>,
}

impl<H> Node<H> {
    fn root() -> Self {
        Self {
            segment: String::new(),
            pattern: None,
            kind: SegmentKind::Static,
            names: Vec::new(),
            matcher: None,
            endpoint: false,
            optional: false,
            parent: None,
            statics: HashMap::new(),
            seg_children: Vec::new(),
            option_children: Vec::new(),
            vary_children: Vec::new(),
            handlers: Vec::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.statics.is_empty()
            && self.seg_children.is_empty()
            && self.option_children.is_empty()
            && self.vary_children.is_empty()
    }

    fn accepts(&self, segment: &str, tail: &str) -> bool {
        self.matcher.as_ref().is_none_or(|m| m.is_match(segment, tail))
    }

    pub(crate) fn handler(&self, method: &str) -> Option<&H> {
        self.handlers
            .iter()
            .find_map(|(m, handler)| (m.as_ref() == method).then_some(handler))
    }
}

/// Outcome of walking a path through the trie.
#[derive(Debug, Default)]
pub(crate) struct Lookup {
    pub(crate) node: Option<NodeId>,
    pub(crate) params: Params,
    pub(crate) redirect: Option<String>,
}

/// Arena of trie nodes. Index 0 is the root.
#[derive(Clone)]
pub(crate) struct Tree<H> {
    nodes: Vec<Node<H>>,
    named: HashMap<String, NodeId>,
}

impl<H> Tree<H> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
            named: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<H>> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<H> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<H>, InsertError> {
        self.nodes.get_mut(id.0).ok_or(InsertError::UnknownNode)
    }

    // Insert a route into the tree.
    //
    // `pattern` is recorded on the terminal node while `text` is what gets split and parsed.
    // They only differ for case insensitive routers.
    pub(crate) fn insert(&mut self, pattern: &str, text: &str) -> Result<NodeId, InsertError> {
        if text.contains("//") {
            return Err(InsertError::EmptySegment {
                pattern: pattern.to_owned(),
            });
        }

        let text = text.strip_prefix('/').unwrap_or(text);

        // parse and compile every segment up front so a failing route leaves the tree untouched.
        let segments = text
            .split('/')
            .map(|text| {
                let segment = segment::parse(text)?;
                let matcher = segment.matcher()?;
                Ok((segment, matcher))
            })
            .collect::<Result<Vec<_>, InsertError>>()?;

        let mut parent = ROOT;
        for (segment, matcher) in segments {
            parent = match self.find_child(parent, &segment) {
                Some(child) => child,
                None => self.push_child(parent, segment, matcher),
            };
        }

        let node = &mut self.nodes[parent.0];
        node.endpoint = true;
        if node.pattern.is_none() {
            node.pattern = Some(pattern.to_owned());
        }

        Ok(parent)
    }

    // an existing child created from identical segment text.
    fn find_child(&self, parent: NodeId, segment: &Segment<'_>) -> Option<NodeId> {
        let parent = self.node(parent);

        if segment.kind == SegmentKind::Static {
            return parent.statics.get(segment.key().as_ref()).copied();
        }

        parent
            .seg_children
            .iter()
            .chain(parent.vary_children.iter())
            .copied()
            .find(|&id| self.node(id).segment == segment.text)
    }

    fn push_child(&mut self, parent: NodeId, segment: Segment<'_>, matcher: Option<Matcher>) -> NodeId {
        let id = NodeId(self.nodes.len());

        debug!(segment = segment.text, kind = ?segment.kind, "route node created");

        let key = segment.key().into_owned();
        let kind = segment.kind;
        let optional = segment.optional;

        self.nodes.push(Node {
            segment: segment.text.to_owned(),
            kind,
            names: segment.names,
            matcher,
            optional,
            parent: Some(parent),
            ..Node::root()
        });

        let parent = &mut self.nodes[parent.0];
        match kind {
            SegmentKind::Static => {
                parent.statics.insert(key, id);
            }
            SegmentKind::Named => parent.seg_children.push(id),
            SegmentKind::OptionalNamed => {
                parent.option_children.push(id);
                parent.seg_children.push(id);
            }
            SegmentKind::Splat | SegmentKind::ExtensionSplat => parent.vary_children.push(id),
            SegmentKind::Regex => {
                if optional {
                    parent.option_children.push(id);
                }
                parent.vary_children.push(id);
            }
        }

        id
    }

    pub(crate) fn handle(&mut self, id: NodeId, method: &str, handler: H) -> Result<(), InsertError> {
        if method.is_empty() {
            return Err(InsertError::EmptyMethod);
        }

        if self.node_mut(id)?.handler(method).is_some() {
            return Err(InsertError::MethodConflict {
                method: method.to_owned(),
                route: self.path(id),
            });
        }

        let node = self.node_mut(id)?;
        debug!(method, route = node.pattern.as_deref().unwrap_or(&node.segment), "handler registered");
        node.handlers.push((SmallBoxedStr::from(method), handler));

        Ok(())
    }

    pub(crate) fn name(&mut self, id: NodeId, name: &str) -> Result<(), InsertError> {
        self.node_mut(id)?;

        if self.named.contains_key(name) {
            return Err(InsertError::NameConflict { name: name.to_owned() });
        }

        debug!(name, route = %self.path(id), "route named");
        self.named.insert(name.to_owned(), id);

        Ok(())
    }

    pub(crate) fn named(&self, name: &str) -> Option<NodeId> {
        self.named.get(name).copied()
    }

    /// Segments from the root down to the node joined by `/`.
    pub(crate) fn path(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut next = Some(id);

        while let Some(id) = next {
            let Some(node) = self.get(id) else { break };
            segments.push(node.segment.as_str());
            next = node.parent;
        }

        segments.reverse();
        segments.join("/")
    }

    // Match a canonical path starting with '/'.
    pub(crate) fn at(&self, path: &str, strict_slash: bool, exts: &SuffixExts) -> Lookup {
        let mut lookup = Lookup::default();
        let mut parent = ROOT;
        let mut start = 1;

        loop {
            let end = segment_end(path, start);
            let last = end == path.len();
            let mut segment = &path[start..end];
            let mut tail = &path[start..];

            let child = match self.match_node(parent, segment, tail) {
                Some(child) => child,
                None => {
                    // trailing slash: /abc/efg/ -> /abc/efg
                    if last && segment.is_empty() && self.node(parent).endpoint {
                        if strict_slash {
                            lookup.redirect = Some(path[..path.len() - 1].to_owned());
                        }
                        return lookup;
                    }

                    if !last {
                        return lookup;
                    }

                    match self.match_suffix(parent, segment, exts) {
                        Some((child, stem, ext)) => {
                            lookup.params.insert(segment::EXT, ext);
                            segment = stem;
                            tail = stem;
                            child
                        }
                        None => return lookup,
                    }
                }
            };

            let node = self.node(child);
            parent = child;

            match node.kind {
                SegmentKind::Static => {}
                SegmentKind::Named | SegmentKind::OptionalNamed => {
                    lookup.params.insert(&node.names[0], segment);
                }
                SegmentKind::Regex => {
                    if let Some(Matcher::Pattern(re)) = node.matcher.as_ref() {
                        for (name, value) in node.names.iter().zip(re.captures(segment).unwrap_or_default()) {
                            lookup.params.insert(name, value);
                        }
                    }
                }
                SegmentKind::ExtensionSplat => {
                    if let Some((stem, ext)) = segment::split_extension(tail) {
                        lookup.params.insert(segment::PATH, stem);
                        lookup.params.insert(segment::EXT, ext);
                    }
                    break;
                }
                SegmentKind::Splat => match self.splat_span(child, path, end) {
                    Some((span_end, next)) => {
                        lookup.params.insert(segment::SPLAT, &path[start..span_end]);
                        start = next;
                        continue;
                    }
                    None => {
                        lookup.params.insert(segment::SPLAT, tail);
                        break;
                    }
                },
            }

            if last {
                break;
            }

            start = end + 1;
        }

        let node = self.node(parent);
        if node.endpoint {
            lookup.node = Some(parent);
        } else if node.statics.contains_key("") {
            // trailing slash: /abc/efg -> /abc/efg/
            if strict_slash {
                lookup.redirect = Some(format!("{path}/"));
            }
        } else {
            lookup.node = node
                .option_children
                .iter()
                .copied()
                .find(|&id| self.node(id).endpoint);
        }

        lookup
    }

    // resolve one segment against the children of parent.
    // `tail` is the remaining path starting with `segment`.
    fn match_node(&self, parent: NodeId, segment: &str, tail: &str) -> Option<NodeId> {
        let parent = self.node(parent);

        if let Some(&id) = parent.statics.get(escape::unescape(segment).as_ref()) {
            return Some(id);
        }

        let more = tail.len() > segment.len();

        parent
            .seg_children
            .iter()
            .copied()
            .find(|&id| {
                let child = self.node(id);
                // a childless parameter can not consume the rest of the path.
                !(more && child.is_leaf()) && child.accepts(segment, tail)
            })
            .or_else(|| {
                parent
                    .vary_children
                    .iter()
                    .copied()
                    .find(|&id| self.node(id).accepts(segment, tail))
            })
    }

    fn match_suffix<'p, 'e>(
        &self,
        parent: NodeId,
        segment: &'p str,
        exts: &'e SuffixExts,
    ) -> Option<(NodeId, &'p str, &'e str)> {
        exts.iter().find_map(|ext| {
            let stem = segment.strip_suffix(ext)?;
            let child = self.match_node(parent, stem, stem)?;
            Some((child, stem, &ext[1..]))
        })
    }

    // smallest span of segments after which the next segment resolves a child of the splat.
    // returns the end of the span and the start of the resolved segment.
    fn splat_span(&self, splat: NodeId, path: &str, end: usize) -> Option<(usize, usize)> {
        if self.node(splat).is_leaf() {
            return None;
        }

        let mut span_end = end;

        while span_end < path.len() {
            let next = span_end + 1;
            let next_end = segment_end(path, next);

            if self.match_node(splat, &path[next..next_end], &path[next..]).is_some() {
                return Some((span_end, next));
            }

            span_end = next_end;
        }

        None
    }
}

fn segment_end(path: &str, start: usize) -> usize {
    path[start..].find('/').map_or(path.len(), |i| start + i)
}
