//! Generic content tree renderer with pluggable backend.

use std::marker::PhantomData;

use crate::RenderError;
use crate::backend::RenderBackend;
use crate::content::{ContentKind, ContentNode, DivergentInstance, GroupStyle, SourceSet, TableRow};
use crate::links::LinkResolver;
use crate::util::{group_by_key, is_external};

/// Source sets a render is limited to. `None` renders everything.
type Restriction<'s> = Option<&'s [SourceSet]>;

/// Whether content declared for `source_sets` shows under `restriction`.
fn is_visible(source_sets: &[SourceSet], restriction: Restriction<'_>) -> bool {
    restriction.is_none_or(|allowed| {
        source_sets.is_empty() || source_sets.iter().any(|s| allowed.contains(s))
    })
}

/// The declared source sets that pass `restriction`.
fn applicable<'s>(declared: &'s [SourceSet], restriction: Restriction<'_>) -> Vec<&'s SourceSet> {
    declared
        .iter()
        .filter(|s| restriction.is_none_or(|allowed| allowed.contains(s)))
        .collect()
}

fn unique<'s>(source_sets: impl IntoIterator<Item = &'s SourceSet>) -> Vec<&'s SourceSet> {
    let mut seen: Vec<&SourceSet> = Vec::new();
    for source_set in source_sets {
        if !seen.contains(&source_set) {
            seen.push(source_set);
        }
    }
    seen
}

fn contains_table(node: &ContentNode) -> bool {
    match node {
        ContentNode::Table { .. } => true,
        ContentNode::Group { children, .. } => children
            .iter()
            .any(|child| matches!(child, ContentNode::Table { .. })),
        _ => false,
    }
}

/// Content tree renderer with pluggable backend.
///
/// Walks a [`ContentNode`] tree and emits text through the [`RenderBackend`]
/// `B`. Internal link addresses are resolved with the [`LinkResolver`] given
/// at construction. The input tree is only read.
pub struct ContentRenderer<'a, B: RenderBackend> {
    links: &'a dyn LinkResolver,
    _backend: PhantomData<B>,
}

impl<'a, B: RenderBackend> ContentRenderer<'a, B> {
    /// Create a renderer resolving internal links with `links`.
    #[must_use]
    pub fn new(links: &'a dyn LinkResolver) -> Self {
        Self {
            links,
            _backend: PhantomData,
        }
    }

    /// Render a content tree.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::UnresolvedReference` for internal links the
    /// resolver does not know and `RenderError::UnsupportedNode` for node
    /// kinds without a rendering rule.
    pub fn render(&self, node: &ContentNode) -> Result<String, RenderError> {
        let mut out = String::with_capacity(1024);
        self.build(node, None, &mut out)?;
        Ok(out)
    }

    /// Render a content tree as seen from a single source set.
    pub fn render_for(
        &self,
        node: &ContentNode,
        source_set: &SourceSet,
    ) -> Result<String, RenderError> {
        self.render_restricted(node, Some(std::slice::from_ref(source_set)))
    }

    /// Emit a link, resolving the address when it is internal.
    pub fn build_link(
        &self,
        address: &str,
        label: &str,
        out: &mut String,
    ) -> Result<(), RenderError> {
        if is_external(address) {
            B::external_link(address, label, out);
        } else {
            let target = self.links.resolve(address)?;
            B::internal_link(&target, label, out);
        }
        Ok(())
    }

    fn render_restricted(
        &self,
        node: &ContentNode,
        restriction: Restriction<'_>,
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        self.build(node, restriction, &mut out)?;
        Ok(out)
    }

    fn render_children(
        &self,
        children: &[ContentNode],
        restriction: Restriction<'_>,
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        self.build_children(children, restriction, &mut out)?;
        Ok(out)
    }

    fn build_children(
        &self,
        children: &[ContentNode],
        restriction: Restriction<'_>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        for child in children {
            self.build(child, restriction, out)?;
        }
        Ok(())
    }

    fn build(
        &self,
        node: &ContentNode,
        restriction: Restriction<'_>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        match node {
            ContentNode::Group {
                children,
                style,
                kind,
                source_sets,
            } => {
                if is_visible(source_sets, restriction) {
                    self.build_group(children, *style, *kind, restriction, out)?;
                }
            }
            ContentNode::Table {
                header,
                rows,
                kind,
                source_sets,
            } => {
                if !is_visible(source_sets, restriction) {
                    return Ok(());
                }
                if kind.splits_per_source_set() {
                    self.build_split_table(header, rows, source_sets, restriction, out)?;
                } else {
                    self.build_table(header, rows, restriction, out)?;
                }
            }
            ContentNode::CodeBlock { language, children } => {
                let code = self.render_children(children, restriction)?;
                B::code_block(language.as_deref(), &code, out);
            }
            ContentNode::CodeInline { children } => {
                let code = self.render_children(children, restriction)?;
                B::code_inline(&code, out);
            }
            ContentNode::Link { address, children } => {
                let label = self.render_children(children, restriction)?;
                self.build_link(address, &label, out)?;
            }
            ContentNode::PlatformHinted { inner, source_sets } => {
                if is_visible(source_sets, restriction) {
                    self.build_platform_hinted(inner, source_sets, restriction, out)?;
                }
            }
            ContentNode::Divergent { instances } => {
                self.build_divergent(instances, restriction, out)?;
            }
            ContentNode::Header { level, children } => {
                let text = self.render_children(children, restriction)?;
                B::header(*level, text.trim(), out);
            }
            ContentNode::List { ordered, items } => {
                for (i, item) in items.iter().enumerate() {
                    let text = self.render_restricted(item, restriction)?;
                    B::list_item(ordered.then_some(i + 1), text.trim(), out);
                }
                B::line_break(out);
            }
            ContentNode::Text { text } => out.push_str(text),
            ContentNode::Break => B::line_break(out),
            ContentNode::Unsupported { kind } => {
                return Err(RenderError::UnsupportedNode(kind.clone()));
            }
        }
        Ok(())
    }

    /// Exactly one rule applies: block, then paragraph, then symbol.
    fn build_group(
        &self,
        children: &[ContentNode],
        style: Option<GroupStyle>,
        kind: ContentKind,
        restriction: Restriction<'_>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        match (style, kind) {
            (Some(GroupStyle::Block), _) => {
                self.build_children(children, restriction, out)?;
                B::line_break(out);
            }
            (Some(GroupStyle::Paragraph), _) => {
                B::paragraph_break(out);
                self.build_children(children, restriction, out)?;
                B::paragraph_break(out);
            }
            (None, ContentKind::Symbol) => {
                let text = self.render_children(children, restriction)?;
                B::strong(&text, out);
            }
            (None, _) => self.build_children(children, restriction, out)?,
        }
        Ok(())
    }

    /// Render the inner node once per distinct text across its source sets.
    fn build_platform_hinted(
        &self,
        inner: &ContentNode,
        declared: &[SourceSet],
        restriction: Restriction<'_>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        if declared.is_empty() {
            return self.build(inner, restriction, out);
        }

        let source_sets = applicable(declared, restriction);
        if contains_table(inner) {
            let scope: Vec<SourceSet> = source_sets.into_iter().cloned().collect();
            return self.build(inner, Some(&scope), out);
        }

        let mut rendered = Vec::with_capacity(source_sets.len());
        for source_set in source_sets {
            rendered.push((self.render_for(inner, source_set)?, source_set));
        }

        let groups: Vec<_> = group_by_key(rendered)
            .into_iter()
            .filter(|(text, _)| !text.trim().is_empty())
            .collect();
        let labelled = groups.len() > 1;

        for (text, source_sets) in &groups {
            if labelled {
                B::source_set_label(source_sets, out);
                out.push(' ');
            }
            out.push_str(text);
            B::line_break(out);
        }
        Ok(())
    }

    fn build_table(
        &self,
        header: &[ContentNode],
        rows: &[TableRow],
        restriction: Restriction<'_>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let mut header_cells = header
            .iter()
            .map(|cell| self.render_restricted(cell, restriction))
            .collect::<Result<Vec<_>, _>>()?;

        let mut body = Vec::with_capacity(rows.len());
        for row in rows
            .iter()
            .filter(|row| is_visible(&row.source_sets, restriction))
        {
            let cells = row
                .cells
                .iter()
                .map(|cell| self.render_restricted(cell, restriction))
                .collect::<Result<Vec<_>, _>>()?;
            body.push(cells);
        }

        let width = body
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header_cells.len()))
            .max()
            .unwrap_or_default();
        header_cells.resize(width, String::new());
        for row in &mut body {
            row.resize(width, String::new());
        }

        B::table(&header_cells, &body, out);
        Ok(())
    }

    /// Sample and parameter tables: one generic table per source set.
    fn build_split_table(
        &self,
        header: &[ContentNode],
        rows: &[TableRow],
        declared: &[SourceSet],
        restriction: Restriction<'_>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let source_sets = if declared.is_empty() {
            unique(
                rows.iter()
                    .flat_map(|row| applicable(&row.source_sets, restriction)),
            )
        } else {
            applicable(declared, restriction)
        };

        if source_sets.is_empty() {
            return self.build_table(header, rows, restriction, out);
        }

        for source_set in source_sets {
            out.push_str(source_set.name());
            B::line_break(out);
            self.build_table(header, rows, Some(std::slice::from_ref(source_set)), out)?;
            B::line_break(out);
        }
        Ok(())
    }

    /// Collapse variants whose surrounding and variant texts render equally.
    ///
    /// Instances are expanded to one entry per source set, grouped by their
    /// rendered before/after texts, then sub-grouped by the divergent text.
    fn build_divergent(
        &self,
        instances: &[DivergentInstance],
        restriction: Restriction<'_>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let mut entries: Vec<(&DivergentInstance, Option<&SourceSet>)> = Vec::new();
        for instance in instances {
            if instance.source_sets.is_empty() {
                entries.push((instance, None));
            } else {
                entries.extend(
                    applicable(&instance.source_sets, restriction)
                        .into_iter()
                        .map(|source_set| (instance, Some(source_set))),
                );
            }
        }

        let mut keyed = Vec::with_capacity(entries.len());
        for (instance, source_set) in entries {
            let before = self.render_part(instance.before.as_deref(), source_set, restriction)?;
            let after = self.render_part(instance.after.as_deref(), source_set, restriction)?;
            keyed.push(((before, after), (instance, source_set)));
        }

        for ((before, after), members) in group_by_key(keyed) {
            let spans_many = unique(members.iter().filter_map(|(_, s)| *s)).len() > 1;

            if !before.is_empty() {
                out.push_str(&before);
                B::line_break(out);
            }

            let mut variants = Vec::with_capacity(members.len());
            for (instance, source_set) in members {
                let text =
                    self.render_part(Some(&*instance.divergent), source_set, restriction)?;
                variants.push((text, source_set));
            }

            for (text, source_sets) in group_by_key(variants) {
                if spans_many {
                    let labels = unique(source_sets.into_iter().flatten());
                    if !labels.is_empty() {
                        B::source_set_label(&labels, out);
                        B::line_break(out);
                    }
                }
                out.push_str(&text);
                B::line_break(out);
            }

            out.push_str(&after);
            B::paragraph_break(out);
        }
        Ok(())
    }

    fn render_part(
        &self,
        node: Option<&ContentNode>,
        source_set: Option<&SourceSet>,
        restriction: Restriction<'_>,
    ) -> Result<String, RenderError> {
        match (node, source_set) {
            (None, _) => Ok(String::new()),
            (Some(node), Some(source_set)) => self.render_for(node, source_set),
            (Some(node), None) => self.render_restricted(node, restriction),
        }
    }
}
