//! Markdown syntax tree with source offsets
//!
//! pulldown-cmark produces a flat event stream. The repair engine needs to
//! reason about siblings and ancestors, so the events are folded into a small
//! arena tree where every node keeps the byte range it covers in the source.
//!
//! Conventions follow the usual Markdown AST shape:
//! - consecutive text events and soft breaks under one parent become a single
//!   [`NodeKind::Text`] node
//! - code blocks, HTML blocks and images are leaves; their text lives in
//!   [`Node::value`] and never shows up as `Text` children

use crate::config::EngineOptions;
use crate::diagnostics::{BoldFixError, BoldFixResult};
use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};
use std::ops::Range;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading,
    BlockQuote,
    List,
    ListItem,
    Table,
    TableRow,
    TableCell,
    FootnoteDefinition,
    Text,
    Strong,
    Emphasis,
    Delete,
    Link,
    LinkReference,
    Image,
    Definition,
    /// Fenced or indented code block
    Code,
    InlineCode,
    Html,
    Break,
    ThematicBreak,
    Other,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub range: Range<usize>,
    pub value: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, range: Range<usize>, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            range,
            value: String::new(),
            parent,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: NodeId = 0;

    /// Parse `source` into a tree. Fails only when the event stream is
    /// inconsistent (unbalanced tags, offsets outside the source).
    pub fn parse(source: &str, options: &EngineOptions) -> BoldFixResult<Self> {
        let parser = Parser::new_ext(source, parser_options(options));

        let definitions: Vec<Range<usize>> = parser
            .reference_definitions()
            .iter()
            .map(|(_, def)| def.span.clone())
            .collect();

        let mut builder = TreeBuilder::new(source);
        for (event, range) in parser.into_offset_iter() {
            builder.push_event(event, range)?;
        }
        builder.finish(definitions)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Depth-first, document-order visit of every node of `kind`, handing the
    /// callback the chain of ancestors from the root down to the parent.
    pub fn visit_parents<F>(&self, kind: NodeKind, mut f: F)
    where
        F: FnMut(NodeId, &[NodeId]),
    {
        let mut ancestors: Vec<NodeId> = Vec::new();
        // (node, index of the next child to descend into)
        let mut stack: Vec<(NodeId, usize)> = vec![(Self::ROOT, 0)];

        while let Some(&(id, next)) = stack.last() {
            if next == 0 && self.nodes[id].kind == kind {
                f(id, &ancestors);
            }
            match self.nodes[id].children.get(next) {
                Some(&child) => {
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                    ancestors.push(id);
                    stack.push((child, 0));
                }
                None => {
                    stack.pop();
                    ancestors.pop();
                }
            }
        }
    }

    /// Siblings immediately before and after `id` within its parent
    pub fn siblings(&self, id: NodeId) -> (Option<NodeId>, Option<NodeId>) {
        let Some(parent) = self.nodes[id].parent else {
            return (None, None);
        };
        let children = &self.nodes[parent].children;
        match children.iter().position(|&c| c == id) {
            Some(index) => (
                index.checked_sub(1).map(|i| children[i]),
                children.get(index + 1).copied(),
            ),
            None => (None, None),
        }
    }

    /// Concatenated value of all `Text` descendants of `id`
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current];
            if node.kind == NodeKind::Text {
                out.push_str(&node.value);
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

fn parser_options(options: &EngineOptions) -> Options {
    if options.gfm {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_GFM
    } else {
        Options::empty()
    }
}

struct TreeBuilder<'a> {
    source: &'a str,
    nodes: Vec<Node>,
    open: Vec<NodeId>,
    /// Leaf that swallows its inner text (code, html, image) and the depth
    /// of tags opened inside it
    collecting: Option<(NodeId, usize)>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            nodes: vec![Node::new(NodeKind::Root, 0..source.len(), None)],
            open: vec![Tree::ROOT],
            collecting: None,
        }
    }

    fn check_range(&self, range: &Range<usize>) -> BoldFixResult<()> {
        let ok = range.start <= range.end
            && range.end <= self.source.len()
            && self.source.is_char_boundary(range.start)
            && self.source.is_char_boundary(range.end);
        if ok {
            Ok(())
        } else {
            Err(BoldFixError::Parse {
                message: format!("event range {}..{} is not a valid slice", range.start, range.end),
                offset: range.start,
            })
        }
    }

    fn parent(&self) -> NodeId {
        self.open.last().copied().unwrap_or(Tree::ROOT)
    }

    fn add(&mut self, kind: NodeKind, range: Range<usize>) -> NodeId {
        let parent = self.parent();
        let id = self.nodes.len();
        self.nodes.push(Node::new(kind, range, Some(parent)));
        self.nodes[parent].children.push(id);
        id
    }

    fn add_leaf(&mut self, kind: NodeKind, range: Range<usize>, value: &str) {
        let id = self.add(kind, range);
        self.nodes[id].value.push_str(value);
    }

    fn add_text(&mut self, range: Range<usize>, value: &str) {
        let parent = self.parent();
        if let Some(&last) = self.nodes[parent].children.last() {
            let node = &mut self.nodes[last];
            if node.kind == NodeKind::Text {
                node.value.push_str(value);
                node.range.end = range.end.max(node.range.end);
                return;
            }
        }
        self.add_leaf(NodeKind::Text, range, value);
    }

    fn push_event(&mut self, event: Event<'a>, range: Range<usize>) -> BoldFixResult<()> {
        self.check_range(&range)?;

        if let Some((leaf, depth)) = self.collecting {
            match event {
                Event::End(_) if depth == 0 => {
                    self.collecting = None;
                    self.close(range.start)?;
                }
                Event::End(_) => self.collecting = Some((leaf, depth - 1)),
                Event::Start(_) => self.collecting = Some((leaf, depth + 1)),
                Event::Text(text) | Event::Code(text) | Event::Html(text) => {
                    self.nodes[leaf].value.push_str(&text);
                }
                Event::SoftBreak | Event::HardBreak => self.nodes[leaf].value.push('\n'),
                _ => {}
            }
            return Ok(());
        }

        match event {
            Event::Start(tag) => {
                let (kind, collects) = classify(&tag);
                let id = self.add(kind, range);
                self.open.push(id);
                if collects {
                    self.collecting = Some((id, 0));
                }
            }
            Event::End(_) => self.close(range.start)?,
            Event::Text(text) => self.add_text(range, &text),
            Event::SoftBreak => self.add_text(range, "\n"),
            Event::Code(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                self.add_leaf(NodeKind::InlineCode, range, &text)
            }
            Event::Html(text) | Event::InlineHtml(text) => {
                self.add_leaf(NodeKind::Html, range, &text)
            }
            Event::HardBreak => self.add_leaf(NodeKind::Break, range, "\n"),
            Event::Rule => self.add_leaf(NodeKind::ThematicBreak, range, ""),
            _ => self.add_leaf(NodeKind::Other, range, ""),
        }
        Ok(())
    }

    fn close(&mut self, offset: usize) -> BoldFixResult<()> {
        if self.open.len() <= 1 {
            return Err(BoldFixError::Parse {
                message: "closing tag without a matching opening tag".to_string(),
                offset,
            });
        }
        self.open.pop();
        Ok(())
    }

    fn finish(mut self, definitions: Vec<Range<usize>>) -> BoldFixResult<Tree> {
        if self.open.len() != 1 {
            return Err(BoldFixError::Parse {
                message: format!("{} tags left open", self.open.len() - 1),
                offset: self.source.len(),
            });
        }

        for span in definitions {
            self.check_range(&span)?;
            self.add(NodeKind::Definition, span);
        }

        let mut root_children = std::mem::take(&mut self.nodes[Tree::ROOT].children);
        root_children.sort_by_key(|&id| self.nodes[id].range.start);
        self.nodes[Tree::ROOT].children = root_children;

        Ok(Tree { nodes: self.nodes })
    }
}

/// Node kind for a start tag, and whether the node swallows its inner text
fn classify(tag: &Tag<'_>) -> (NodeKind, bool) {
    match tag {
        Tag::Paragraph => (NodeKind::Paragraph, false),
        Tag::Heading { .. } => (NodeKind::Heading, false),
        Tag::BlockQuote(_) => (NodeKind::BlockQuote, false),
        Tag::CodeBlock(_) => (NodeKind::Code, true),
        Tag::HtmlBlock => (NodeKind::Html, true),
        Tag::List(_) => (NodeKind::List, false),
        Tag::Item => (NodeKind::ListItem, false),
        Tag::FootnoteDefinition(_) => (NodeKind::FootnoteDefinition, false),
        Tag::Table(_) => (NodeKind::Table, false),
        Tag::TableHead | Tag::TableRow => (NodeKind::TableRow, false),
        Tag::TableCell => (NodeKind::TableCell, false),
        Tag::Emphasis => (NodeKind::Emphasis, false),
        Tag::Strong => (NodeKind::Strong, false),
        Tag::Strikethrough => (NodeKind::Delete, false),
        Tag::Link { link_type, .. } => (link_kind(*link_type), false),
        Tag::Image { .. } => (NodeKind::Image, true),
        Tag::MetadataBlock(_) => (NodeKind::Other, true),
        _ => (NodeKind::Other, false),
    }
}

fn link_kind(link_type: LinkType) -> NodeKind {
    match link_type {
        LinkType::Reference
        | LinkType::ReferenceUnknown
        | LinkType::Collapsed
        | LinkType::CollapsedUnknown
        | LinkType::Shortcut
        | LinkType::ShortcutUnknown => NodeKind::LinkReference,
        _ => NodeKind::Link,
    }
}

/// Byte offsets of line starts, for mapping offsets back to line/column
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut starts = vec![0];
        for (idx, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(idx + 1);
            }
        }
        Self { source, starts }
    }

    /// 1-based line and character column of a byte offset
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset).max(1);
        let start = self.starts[line - 1];
        let column = self
            .source
            .get(start..offset)
            .map_or(0, |prefix| prefix.chars().count());
        (line, column + 1)
    }

    /// Text of a 1-based line without its terminator
    pub fn line_text(&self, line: usize) -> &'a str {
        let Some(&start) = self.starts.get(line.wrapping_sub(1)) else {
            return "";
        };
        let end = self
            .starts
            .get(line)
            .map_or(self.source.len(), |&next| next - 1);
        let text = &self.source[start..end.max(start)];
        text.strip_suffix('\r').unwrap_or(text)
    }
}
