use crate::loc::Location;
use crate::validation::rules::Rule;
use crate::validation::ValidationContext;
use libgql_parser::ast;
use libgql_parser::SourceSpan;
use std::collections::HashMap;
use std::collections::HashSet;

/// Fragment names must be unique within a document.
#[derive(Default)]
pub(crate) struct UniqueFragmentNames<'a> {
    seen: HashMap<&'a str, &'a SourceSpan>,
}

impl<'a> Rule<'a> for UniqueFragmentNames<'a> {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        let name = &fragment.name;
        if let Some(first) = self.seen.get(name.as_str()).copied() {
            ctx.report(
                format!("there can be only one fragment named `{name}`"),
                &[first, &name.span],
            );
        } else {
            self.seen.insert(name.as_str(), &name.span);
        }
    }
}

/// Every fragment spread must name a fragment defined in the document.
pub(crate) struct KnownFragmentNames;

impl<'a> Rule<'a> for KnownFragmentNames {
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        spread: &'a ast::FragmentSpread,
    ) {
        if !ctx.fragments.contains_key(spread.name.as_str()) {
            ctx.report(
                format!("unknown fragment `{}`", spread.name),
                &[&spread.name.span],
            );
        }
    }
}

/// Fragment type conditions must name composite types.
pub(crate) struct FragmentsOnCompositeTypes;

impl FragmentsOnCompositeTypes {
    fn check(ctx: &mut ValidationContext<'_>, condition: &ast::TypeCondition) {
        if let Some(condition_type) = ctx.schema.type_by_name(condition.on_type.as_str()) {
            if !condition_type.is_composite() {
                ctx.report(
                    format!(
                        "fragments cannot condition on non-composite type \
                         `{}`",
                        condition.on_type,
                    ),
                    &[&condition.span],
                );
            }
        }
    }
}

impl<'a> Rule<'a> for FragmentsOnCompositeTypes {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        Self::check(ctx, &fragment.type_condition);
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::InlineFragment,
    ) {
        if let Some(condition) = &fragment.type_condition {
            Self::check(ctx, condition);
        }
    }
}

/// A fragment can only spread where its type condition can possibly apply:
/// the condition and the enclosing type must overlap.
pub(crate) struct PossibleFragmentSpreads;

impl PossibleFragmentSpreads {
    fn check(
        ctx: &mut ValidationContext<'_>,
        condition_name: &str,
        span: &SourceSpan,
    ) {
        let Some(parent) = ctx.parent_type() else { return };
        let Some(condition_type) = ctx.schema.type_by_name(condition_name) else {
            return;
        };
        if !parent.is_composite() || !condition_type.is_composite() {
            return;
        }
        if !ctx.schema.types_overlap(parent, condition_type) {
            ctx.report(
                format!(
                    "fragment on type `{condition_name}` can never spread \
                     inside type `{}`",
                    parent.name(),
                ),
                &[span],
            );
        }
    }
}

impl<'a> Rule<'a> for PossibleFragmentSpreads {
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        spread: &'a ast::FragmentSpread,
    ) {
        let Some(fragment) = ctx.fragments.get(spread.name.as_str()).copied() else {
            return;
        };
        Self::check(
            ctx,
            fragment.type_condition.on_type.as_str(),
            &spread.span,
        );
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::InlineFragment,
    ) {
        if let Some(condition) = &fragment.type_condition {
            Self::check(ctx, condition.on_type.as_str(), &fragment.span);
        }
    }
}

/// Every defined fragment must be spread at least once.
#[derive(Default)]
pub(crate) struct NoUnusedFragments<'a> {
    used: HashSet<&'a str>,
}

impl<'a> Rule<'a> for NoUnusedFragments<'a> {
    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        spread: &'a ast::FragmentSpread,
    ) {
        self.used.insert(spread.name.as_str());
    }

    fn leave_document(&mut self, ctx: &mut ValidationContext<'a>, document: &'a ast::Document) {
        for fragment in document.fragments() {
            if !self.used.contains(fragment.name.as_str()) {
                ctx.report(
                    format!("fragment `{}` is never used", fragment.name),
                    &[&fragment.name.span],
                );
            }
        }
    }
}

/// The fragment spread graph must not contain cycles. Each cycle is
/// reported exactly once (a self-referential fragment produces a single
/// error).
pub(crate) struct NoFragmentCycles;

impl<'a> Rule<'a> for NoFragmentCycles {
    fn leave_document(&mut self, ctx: &mut ValidationContext<'a>, document: &'a ast::Document) {
        // name -> fragments it spreads (directly).
        let mut edges: HashMap<&str, Vec<(&'a str, &'a SourceSpan)>> = HashMap::new();
        for fragment in document.fragments() {
            let mut spreads = vec![];
            collect_spreads(&fragment.selection_set, &mut spreads);
            edges.insert(fragment.name.as_str(), spreads);
        }

        let mut reported: HashSet<Vec<&str>> = HashSet::new();
        let mut errors: Vec<(String, Vec<Location>)> = vec![];

        for start in edges.keys().copied().collect::<Vec<_>>() {
            let mut path: Vec<(&str, &'a SourceSpan)> = vec![];
            let mut visiting: HashSet<&str> = HashSet::new();
            detect_cycles(
                &edges,
                start,
                &mut path,
                &mut visiting,
                &mut reported,
                &mut errors,
            );
        }

        for (message, locations) in errors {
            ctx.report_with_locations(message, locations);
        }
    }
}

fn collect_spreads<'a>(
    selection_set: &'a ast::SelectionSet,
    spreads: &mut Vec<(&'a str, &'a SourceSpan)>,
) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::FragmentSpread(spread) => {
                spreads.push((spread.name.as_str(), &spread.span));
            }
            ast::Selection::Field(field) => {
                if let Some(subselection) = &field.selection_set {
                    collect_spreads(subselection, spreads);
                }
            }
            ast::Selection::InlineFragment(fragment) => {
                collect_spreads(&fragment.selection_set, spreads);
            }
        }
    }
}

fn detect_cycles<'a>(
    edges: &HashMap<&str, Vec<(&'a str, &'a SourceSpan)>>,
    current: &'a str,
    path: &mut Vec<(&'a str, &'a SourceSpan)>,
    visiting: &mut HashSet<&'a str>,
    reported: &mut HashSet<Vec<&'a str>>,
    errors: &mut Vec<(String, Vec<Location>)>,
) {
    if !visiting.insert(current) {
        return;
    }
    let Some(spreads) = edges.get(current) else {
        visiting.remove(current);
        return;
    };

    for (target, span) in spreads {
        if let Some(cycle_start) = path.iter().position(|(name, _)| name == target) {
            // A cycle: path[cycle_start..] + current + target. Key it by
            // its sorted member set so each cycle is reported once no
            // matter where detection entered it.
            let mut members: Vec<&str> = path[cycle_start..]
                .iter()
                .map(|(name, _)| *name)
                .collect();
            members.push(current);
            let mut key = members.clone();
            key.sort_unstable();
            key.dedup();
            if reported.insert(key) {
                let display = {
                    let mut names = members.clone();
                    names.push(*target);
                    names.join(" -> ")
                };
                errors.push((
                    format!("fragment cycle detected: {display}"),
                    vec![Location::from(*span)],
                ));
            }
        } else if *target == current {
            // Self-reference: `fragment F on T { ...F }`.
            let key = vec![current];
            if reported.insert(key) {
                errors.push((
                    format!("fragment `{current}` cannot spread itself"),
                    vec![Location::from(*span)],
                ));
            }
        } else {
            path.push((current, *span));
            detect_cycles(edges, *target, path, visiting, reported, errors);
            path.pop();
        }
    }

    visiting.remove(current);
}
