use super::*;
use encl_ir::{BinaryOp, Expr, ExprKind, ImportTarget, Name, Stmt, StmtKind, UnaryOp, UseReference};
use pretty_assertions::assert_eq;

fn parse_ok(source: &str) -> Body {
    match parse_source(source) {
        Ok(body) => body,
        Err(errors) => panic!("unexpected parse errors in {source:?}: {errors:?}"),
    }
}

fn parse_err(source: &str) -> Vec<ParseError> {
    match parse_source(source) {
        Ok(body) => panic!("expected parse errors in {source:?}, got {body:?}"),
        Err(errors) => errors,
    }
}

fn stmt_kinds(source: &str) -> Vec<StmtKind> {
    parse_ok(source).stmts.into_iter().map(|s| s.kind).collect()
}

fn single_expr(source: &str) -> ExprKind {
    let mut stmts = parse_ok(source).stmts;
    assert_eq!(stmts.len(), 1, "expected one statement in {source:?}");
    match stmts.remove(0).kind {
        StmtKind::Expr(expr) => expr.kind,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

/// Strip spans so trees can be compared structurally.
fn shape(kind: &ExprKind) -> String {
    match kind {
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Ident(name) => name.to_string(),
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", shape(&left.kind), op.symbol(), shape(&right.kind))
        }
        ExprKind::Unary { op, operand } => {
            let sym = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Not => "!",
            };
            format!("{sym}{}", shape(&operand.kind))
        }
        ExprKind::Call { callee, args } => {
            let args: Vec<_> = args.iter().map(|a| shape(&a.kind)).collect();
            format!("{}({})", shape(&callee.kind), args.join(", "))
        }
        ExprKind::Member { object, name } => format!("{}${name}", shape(&object.kind)),
        ExprKind::Qualified { library, name } => format!("{library}::{name}"),
        other => format!("{other:?}"),
    }
}

fn ident_expr(kind: &ExprKind) -> &str {
    match kind {
        ExprKind::Ident(name) => name.as_str(),
        other => panic!("expected identifier, got {other:?}"),
    }
}

#[test]
fn test_empty_source() {
    assert!(parse_ok("").is_empty());
    assert!(parse_ok("\n\n ; \n").is_empty());
}

#[test]
fn test_assignment() {
    let kinds = stmt_kinds("x = 1\n.y = \"s\"");
    assert_eq!(kinds.len(), 2);
    match &kinds[0] {
        StmtKind::Assign { name, value } => {
            assert_eq!(name, "x");
            assert_eq!(value.kind, ExprKind::Int(1));
        }
        other => panic!("expected assignment, got {other:?}"),
    }
    match &kinds[1] {
        StmtKind::Assign { name, .. } => assert!(name.is_private()),
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_semicolons_separate_statements() {
    assert_eq!(stmt_kinds("a = 1; b = 2; a").len(), 3);
}

#[test]
fn test_precedence() {
    assert_eq!(shape(&single_expr("1 + 2 * 3")), "(1 + (2 * 3))");
    assert_eq!(shape(&single_expr("1 - 2 - 3")), "((1 - 2) - 3)");
    assert_eq!(
        shape(&single_expr("a || b && c == d")),
        "(a || (b && (c == d)))"
    );
    assert_eq!(shape(&single_expr("-a * !b")), "(-a * !b)");
    assert_eq!(shape(&single_expr("(1 + 2) * 3")), "((1 + 2) * 3)");
    assert_eq!(shape(&single_expr("a < b + 1")), "(a < (b + 1))");
}

#[test]
fn test_postfix_chain() {
    assert_eq!(shape(&single_expr("m$f(1)$g")), "m$f(1)$g");
    assert_eq!(shape(&single_expr("math::sqrt(16)")), "math::sqrt(16)");
    assert_eq!(shape(&single_expr("f(\n  1,\n  2\n)")), "f(1, 2)");
}

#[test]
fn test_function_literal() {
    match single_expr("fn(a, b) { c = a + b; c }") {
        ExprKind::Function { params, body } => {
            assert_eq!(params, vec![Name::from("a"), Name::from("b")]);
            assert_eq!(body.stmts.len(), 2);
        }
        other => panic!("expected function, got {other:?}"),
    }
}

#[test]
fn test_multiline_function_body() {
    let source = "area = fn(r) {\n  .sq = r * r\n  .sq * 3\n}\n";
    let kinds = stmt_kinds(source);
    match &kinds[0] {
        StmtKind::Assign { value, .. } => match &value.kind {
            ExprKind::Function { body, .. } => assert_eq!(body.stmts.len(), 2),
            other => panic!("expected function, got {other:?}"),
        },
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_if_else_on_next_line() {
    match single_expr("if a { 1 }\nelse if b { 2 } else { 3 }") {
        ExprKind::If {
            cond, else_branch, ..
        } => {
            assert_eq!(ident_expr(&cond.kind), "a");
            let Some(else_body) = else_branch else {
                panic!("missing else branch");
            };
            match &else_body.stmts[0].kind {
                StmtKind::Expr(Expr {
                    kind: ExprKind::If { else_branch, .. },
                    ..
                }) => assert!(else_branch.is_some()),
                other => panic!("expected nested if, got {other:?}"),
            }
        }
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn test_if_without_else_then_statement() {
    let kinds = stmt_kinds("if a { 1 }\nb = 2");
    assert_eq!(kinds.len(), 2);
    assert!(matches!(kinds[1], StmtKind::Assign { .. }));
}

#[test]
fn test_module_literal() {
    match single_expr("module { import(\"math\", \"pi\"); export(\"^f\"); f = 1 }") {
        ExprKind::Module(body) => {
            assert_eq!(body.stmts.len(), 3);
            assert!(matches!(body.stmts[0].kind, StmtKind::Import { .. }));
            assert!(matches!(body.stmts[1].kind, StmtKind::Export { .. }));
        }
        other => panic!("expected module, got {other:?}"),
    }
}

#[test]
fn test_import_targets() {
    let kinds = stmt_kinds("import(\"math\")\nimport(lib, \"a\", \"b\")\nimport(make(), \"x\")");
    assert_eq!(
        kinds[0],
        StmtKind::Import {
            target: ImportTarget::Library(Name::from("math")),
            names: None,
        }
    );
    assert_eq!(
        kinds[1],
        StmtKind::Import {
            target: ImportTarget::Named(Name::from("lib")),
            names: Some(vec![Name::from("a"), Name::from("b")]),
        }
    );
    match &kinds[2] {
        StmtKind::Import {
            target: ImportTarget::Expr(expr),
            names: Some(names),
        } => {
            assert_eq!(shape(&expr.kind), "make()");
            assert_eq!(names, &vec![Name::from("x")]);
        }
        other => panic!("expected expression import, got {other:?}"),
    }
}

#[test]
fn test_export_entries_kept_raw() {
    match &stmt_kinds("export(\"area\", \"^help\")")[0] {
        StmtKind::Export { entries } => {
            let entries: Vec<&str> = entries.iter().map(|e| &**e).collect();
            assert_eq!(entries, vec!["area", "^help"]);
        }
        other => panic!("expected export, got {other:?}"),
    }
}

#[test]
fn test_use_forms() {
    match single_expr("use({ x = 1 }, attach = true, id = \"blk\")") {
        ExprKind::Use {
            reference: UseReference::Block(body),
            attach: Some(attach),
            id: Some(id),
        } => {
            assert_eq!(body.stmts.len(), 1);
            assert_eq!(attach.kind, ExprKind::Bool(true));
            assert_eq!(id.kind, ExprKind::Str("blk".into()));
        }
        other => panic!("expected use block, got {other:?}"),
    }

    match single_expr("use(\"lib/util.encl\")") {
        ExprKind::Use {
            reference: UseReference::Expr(path),
            attach: None,
            id: None,
        } => assert_eq!(path.kind, ExprKind::Str("lib/util.encl".into())),
        other => panic!("expected use path, got {other:?}"),
    }
}

#[test]
fn test_use_argument_errors() {
    let errors = parse_err("use(m, attached = true)");
    assert!(matches!(
        &errors[0],
        ParseError::UnknownUseArgument { name, .. } if name == "attached"
    ));

    let errors = parse_err("use(m, id = \"a\", id = \"b\")");
    assert!(matches!(
        &errors[0],
        ParseError::DuplicateUseArgument { name, .. } if name == "id"
    ));
}

#[test]
fn test_directive_in_expression() {
    let errors = parse_err("x = import(\"math\")");
    assert!(matches!(
        errors[0],
        ParseError::DirectiveInExpression {
            directive: "import",
            ..
        }
    ));
}

#[test]
fn test_invalid_assignment_target() {
    let errors = parse_err("f(1) = 2");
    assert!(matches!(
        errors[0],
        ParseError::InvalidAssignmentTarget { .. }
    ));
}

#[test]
fn test_recovery_reports_every_bad_statement() {
    let errors = parse_err("a = )\nb = 1\nc = fn\nd = 2 2");
    assert_eq!(errors.len(), 3, "{errors:?}");
}

#[test]
fn test_unclosed_block() {
    let errors = parse_err("f = fn() { 1");
    assert!(matches!(
        errors[0],
        ParseError::Expected {
            expected: "`}`",
            found: "end of input",
            ..
        }
    ));
}

#[test]
fn test_lex_errors_surface() {
    let errors = parse_err("x = \"open");
    assert!(matches!(errors[0], ParseError::Lex(_)));
}

#[test]
fn test_spans_cover_statement() {
    let body = parse_ok("total = 1 + 22");
    let Stmt { span, .. } = &body.stmts[0];
    assert_eq!(span.range(), 0..14);
    match &body.stmts[0].kind {
        StmtKind::Assign { value, .. } => match &value.kind {
            ExprKind::Binary { op, .. } => assert_eq!(*op, BinaryOp::Add),
            other => panic!("expected binary, got {other:?}"),
        },
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_deep_unary_chain_is_rejected() {
    let source = format!("x = {}1\ny = 2", "-".repeat(200_000));
    let errors = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || parse_err(&source))
        .unwrap_or_else(|err| panic!("{err}"))
        .join()
        .unwrap_or_else(|_| panic!("parser thread panicked"));
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        ParseError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
            ..
        }
    ));
}

#[test]
fn test_deep_parens_are_rejected() {
    let depth = MAX_NESTING_DEPTH + 10;
    let source = format!("x = {}1{}", "(".repeat(depth), ")".repeat(depth));
    let errors = parse_err(&source);
    assert!(matches!(errors[0], ParseError::NestingTooDeep { .. }));
}

#[test]
fn test_nesting_below_limit_parses() {
    let depth = MAX_NESTING_DEPTH / 2;
    let source = format!("x = {}1", "-".repeat(depth));
    let body = parse_ok(&source);
    assert_eq!(body.stmts.len(), 1);
}
