use crate::validation::rules::Rule;
use crate::validation::ValidationContext;
use libgql_parser::ast;

/// Opt-in maximum query depth. Depth counts nested selection sets within
/// each walked definition; the offending selection set is reported once.
pub(crate) struct MaxDepth {
    max_depth: usize,
    current_depth: usize,
    reported: bool,
}

impl MaxDepth {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            current_depth: 0,
            reported: false,
        }
    }
}

impl<'a> Rule<'a> for MaxDepth {
    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _operation: &'a ast::OperationDefinition,
    ) {
        self.current_depth = 0;
        self.reported = false;
    }

    fn enter_selection_set(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        selection_set: &'a ast::SelectionSet,
    ) {
        self.current_depth += 1;
        if self.current_depth > self.max_depth && !self.reported {
            self.reported = true;
            ctx.report(
                format!(
                    "query exceeds the maximum depth of {}",
                    self.max_depth,
                ),
                &[&selection_set.span],
            );
        }
    }

    fn leave_selection_set(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _selection_set: &'a ast::SelectionSet,
    ) {
        self.current_depth -= 1;
    }
}
