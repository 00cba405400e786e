use crate::ast;
use crate::ast::visit;
use crate::ast::visit::Rewrite;
use crate::ast::visit::VisitFlow;
use crate::parse_executable_document;
use crate::print_ast;
use crate::ParseError;

type Result<T> = std::result::Result<T, ParseError>;

#[derive(Default)]
struct EventLog {
    events: Vec<String>,
}

impl visit::Visitor for EventLog {
    fn enter_field(&mut self, node: &ast::Field) -> VisitFlow {
        self.events.push(format!("enter:{}", node.name.as_str()));
        VisitFlow::Continue
    }

    fn leave_field(&mut self, node: &ast::Field) {
        self.events.push(format!("leave:{}", node.name.as_str()));
    }
}

#[test]
fn visits_fields_in_document_order() -> Result<()> {
    let doc = parse_executable_document("{ a { b c } d }")?;
    let mut log = EventLog::default();
    visit::visit_document(&mut log, &doc);
    assert_eq!(
        log.events,
        vec!["enter:a", "enter:b", "leave:b", "enter:c", "leave:c", "leave:a", "enter:d", "leave:d"],
    );
    Ok(())
}

struct SkipSubtrees;

impl visit::Visitor for SkipSubtrees {
    fn enter_field(&mut self, _: &ast::Field) -> VisitFlow {
        VisitFlow::SkipSubtree
    }
}

#[test]
fn skip_subtree_suppresses_children_but_not_siblings() -> Result<()> {
    let doc = parse_executable_document("{ a { b } c }")?;
    let mut chain = visit::VisitorChain::new(SkipSubtrees, EventLog::default());
    visit::visit_document(&mut chain, &doc);
    // `b` is never entered; `a` and `c` both are.
    assert_eq!(
        chain.second.events,
        vec!["enter:a", "leave:a", "enter:c", "leave:c"],
    );
    Ok(())
}

struct HaltAtFirstField {
    entered: usize,
}

impl visit::Visitor for HaltAtFirstField {
    fn enter_field(&mut self, _: &ast::Field) -> VisitFlow {
        self.entered += 1;
        VisitFlow::Break
    }
}

#[test]
fn break_halts_the_traversal() -> Result<()> {
    let doc = parse_executable_document("{ a b c }")?;
    let mut visitor = HaltAtFirstField { entered: 0 };
    visit::visit_document(&mut visitor, &doc);
    assert_eq!(visitor.entered, 1);
    Ok(())
}

#[test]
fn chain_fans_out_enter_in_order_and_leave_in_reverse() -> Result<()> {
    struct Tag {
        name: &'static str,
        log: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
    }
    impl visit::Visitor for Tag {
        fn enter_field(&mut self, node: &ast::Field) -> VisitFlow {
            self.log
                .borrow_mut()
                .push(format!("{}:enter:{}", self.name, node.name.as_str()));
            VisitFlow::Continue
        }
        fn leave_field(&mut self, node: &ast::Field) {
            self.log
                .borrow_mut()
                .push(format!("{}:leave:{}", self.name, node.name.as_str()));
        }
    }

    let log = std::rc::Rc::new(std::cell::RefCell::new(vec![]));
    let doc = parse_executable_document("{ a }")?;
    let mut chain = visit::VisitorChain::new(
        Tag {
            name: "first",
            log: log.clone(),
        },
        Tag {
            name: "second",
            log: log.clone(),
        },
    );
    visit::visit_document(&mut chain, &doc);
    assert_eq!(
        *log.borrow(),
        vec![
            "first:enter:a",
            "second:enter:a",
            "second:leave:a",
            "first:leave:a",
        ],
    );
    Ok(())
}

struct DropTelemetryFields;

impl visit::Rewriter for DropTelemetryFields {
    fn rewrite_selection(&mut self, selection: &ast::Selection) -> Rewrite<ast::Selection> {
        match selection {
            ast::Selection::Field(field) if field.name.as_str().starts_with("telemetry") => {
                Rewrite::Remove
            }
            _ => Rewrite::Keep,
        }
    }
}

#[test]
fn rewriter_removes_selections_recursively() -> Result<()> {
    let doc = parse_executable_document("{ a { telemetryX b } telemetryY c }")?;
    let rewritten = visit::rewrite_document(&mut DropTelemetryFields, &doc);
    let printed = print_ast(&rewritten);
    assert!(!printed.contains("telemetry"), "{printed}");
    assert!(printed.contains("b"), "{printed}");
    assert!(printed.contains("c"), "{printed}");
    // The input document is untouched.
    assert!(print_ast(&doc).contains("telemetryX"));
    Ok(())
}

struct RenameField;

impl visit::Rewriter for RenameField {
    fn rewrite_selection(&mut self, selection: &ast::Selection) -> Rewrite<ast::Selection> {
        match selection {
            ast::Selection::Field(field) if field.name.as_str() == "old" => {
                let mut renamed = field.clone();
                renamed.name = ast::Name::new("new", field.name.span.clone());
                Rewrite::Replace(ast::Selection::Field(renamed))
            }
            _ => Rewrite::Keep,
        }
    }
}

#[test]
fn rewriter_replaces_nodes() -> Result<()> {
    let doc = parse_executable_document("{ old kept }")?;
    let rewritten = visit::rewrite_document(&mut RenameField, &doc);
    let printed = print_ast(&rewritten);
    assert!(printed.contains("new"), "{printed}");
    assert!(!printed.contains("old"), "{printed}");
    Ok(())
}
