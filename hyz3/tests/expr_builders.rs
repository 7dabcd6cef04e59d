use hyz3::prelude::*;

fn context() -> Context {
    Context::new(&Config::new()).expect("failed to create context")
}

#[test]
fn constant_and_application_scenario() {
    let ctx = context();
    let int = ctx.int_sort().unwrap();

    let x = ctx.constant(ctx.symbol("x").unwrap(), int).unwrap();
    assert_eq!(x.to_string(), "x");

    let f = ctx
        .func_decl(ctx.symbol("f").unwrap(), &[int, int], int)
        .unwrap();
    let args = [ctx.int(1, int).unwrap(), ctx.int(2, int).unwrap()];
    let app = ctx.app(f, &args).unwrap();

    assert_eq!(app.decl_name().unwrap().to_string(), "f");
    assert_eq!(app.to_string(), "(f 1 2)");
}

#[test]
fn decl_name_matches_declared_symbol_for_every_arity() {
    let ctx = context();
    let int = ctx.int_sort().unwrap();
    let boolean = ctx.bool_sort().unwrap();

    for arity in 0..12 {
        let name = format!("g{arity}");
        let domain = vec![int; arity];
        let decl = ctx
            .func_decl(ctx.symbol(&name).unwrap(), &domain, boolean)
            .unwrap();
        assert_eq!(decl.arity(), arity);

        let args: Vec<_> = (0..arity)
            .map(|i| ctx.int(i as i64, int).unwrap())
            .collect();
        let app = ctx.app(decl, &args).unwrap();
        assert_eq!(app.decl_name().unwrap().name(), name);
        assert_eq!(app.decl().unwrap(), decl);
    }
}

#[test]
fn zero_arity_application_marshals_an_empty_array() {
    let ctx = context();
    let int = ctx.int_sort().unwrap();
    let c = ctx.func_decl(ctx.symbol("c").unwrap(), &[], int).unwrap();
    assert_eq!(c.arity(), 0);
    assert!(c.domain().unwrap().is_empty());

    let app = ctx.app(c, &[]).unwrap();
    assert_eq!(app.to_string(), "c");
    assert_eq!(app.decl_name().unwrap().to_string(), "c");

    // A nullary application and a constant of the same name and sort are the same term.
    let constant = ctx.constant(ctx.symbol("c").unwrap(), int).unwrap();
    assert_eq!(app, constant);
}

#[test]
fn arity_mismatch_is_reported_not_truncated() {
    let ctx = context();
    let int = ctx.int_sort().unwrap();
    let f = ctx
        .func_decl(ctx.symbol("f").unwrap(), &[int, int], int)
        .unwrap();
    let one = ctx.int(1, int).unwrap();

    let err = ctx.app(f, &[one]).unwrap_err();
    match err {
        Z3Error::ArityMismatch {
            decl,
            expected,
            found,
        } => {
            assert_eq!(decl, "f");
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
        }
        other => panic!("expected an arity mismatch, got {other:?}"),
    }

    let err = f.apply(&[one, one, one]).unwrap_err();
    assert!(err.is_arity_mismatch());

    // The context remains usable after a failed operation.
    assert!(f.apply(&[one, one]).is_ok());
}

#[test]
fn ill_sorted_application_is_rejected_by_the_engine() {
    let ctx = context();
    let int = ctx.int_sort().unwrap();
    let f = ctx.func_decl(ctx.symbol("f").unwrap(), &[int], int).unwrap();
    let t = ctx.bool_true().unwrap();

    let err = ctx.app(f, &[t]).unwrap_err();
    assert!(err.is_native(), "unexpected error {err:?}");

    let one = ctx.int(1, int).unwrap();
    assert_eq!(ctx.app(f, &[one]).unwrap().to_string(), "(f 1)");
}

#[test]
fn handles_from_another_context_are_rejected() {
    let ctx_a = context();
    let ctx_b = context();

    let int_a = ctx_a.int_sort().unwrap();
    let int_b = ctx_b.int_sort().unwrap();
    let sym_b = ctx_b.symbol("f").unwrap();

    let err = ctx_a.func_decl(ctx_a.symbol("f").unwrap(), &[int_b], int_a);
    assert!(matches!(err, Err(Z3Error::ForeignContext { what: "sort" })));

    let err = ctx_a.func_decl(sym_b, &[int_a], int_a);
    assert!(matches!(err, Err(Z3Error::ForeignContext { what: "symbol" })));

    let err = ctx_a.constant(ctx_a.symbol("x").unwrap(), int_b);
    assert!(err.unwrap_err().is_foreign_context());

    let f = ctx_a
        .func_decl(ctx_a.symbol("f").unwrap(), &[int_a], int_a)
        .unwrap();
    let one_b = ctx_b.int(1, int_b).unwrap();
    let err = ctx_a.app(f, &[one_b]).unwrap_err();
    assert!(matches!(err, Z3Error::ForeignContext { what: "term" }));

    let err = ctx_b.app(f, &[one_b]).unwrap_err();
    assert!(err.is_foreign_context());
}

#[test]
fn boolean_literals_use_canonical_spelling() {
    let ctx = context();
    for _ in 0..3 {
        assert_eq!(ctx.bool_true().unwrap().to_string(), "true");
        assert_eq!(ctx.bool_false().unwrap().to_string(), "false");
    }
    assert_eq!(ctx.bool_val(true).unwrap(), ctx.bool_true().unwrap());
    assert_eq!(ctx.bool_val(false).unwrap(), ctx.bool_false().unwrap());
    assert_ne!(ctx.bool_true().unwrap(), ctx.bool_false().unwrap());
}

#[test]
fn identical_constructions_are_independently_valid() {
    let ctx = context();
    let int = ctx.int_sort().unwrap();
    let f = ctx.func_decl(ctx.symbol("f").unwrap(), &[int], int).unwrap();

    let a = f.apply(&[ctx.int(7, int).unwrap()]).unwrap();
    let b = f.apply(&[ctx.int(7, int).unwrap()]).unwrap();

    assert_eq!(a.to_string(), "(f 7)");
    assert_eq!(b.to_string(), "(f 7)");
    // The engine shares structurally identical terms.
    assert_eq!(a, b);
}

#[test]
fn sorts_report_kind_and_name() {
    let ctx = context();
    let int = ctx.int_sort().unwrap();
    let boolean = ctx.bool_sort().unwrap();
    let u = ctx
        .uninterpreted_sort(ctx.symbol("U").unwrap())
        .unwrap();

    assert_eq!(int.kind(), SortKind::Int);
    assert_eq!(boolean.kind(), SortKind::Bool);
    assert_eq!(u.kind(), SortKind::Uninterpreted);

    assert_eq!(int.to_string(), "Int");
    assert_eq!(boolean.to_string(), "Bool");
    assert_eq!(u.name().unwrap().to_string(), "U");

    // Same name, same sort.
    let again = ctx
        .uninterpreted_sort(ctx.symbol("U").unwrap())
        .unwrap();
    assert_eq!(u, again);
    assert_ne!(u, int);
}

#[test]
fn uninterpreted_functions_over_uninterpreted_sorts() {
    let ctx = context();
    let u = ctx
        .uninterpreted_sort(ctx.symbol("U").unwrap())
        .unwrap();
    let boolean = ctx.bool_sort().unwrap();

    let p = ctx
        .func_decl(ctx.symbol("p").unwrap(), &[u, u], boolean)
        .unwrap();
    let a = ctx.constant(ctx.symbol("a").unwrap(), u).unwrap();
    let b = ctx.constant(ctx.symbol("b").unwrap(), u).unwrap();
    let pab = p.apply(&[a, b]).unwrap();

    assert_eq!(pab.to_string(), "(p a b)");
    assert_eq!(pab.sort().unwrap(), boolean);
    assert_eq!(p.domain().unwrap(), vec![u, u]);
    assert_eq!(p.range().unwrap(), boolean);
}

#[test]
fn declaration_viewed_as_term_keeps_its_name() {
    let ctx = context();
    let int = ctx.int_sort().unwrap();
    let f = ctx.func_decl(ctx.symbol("f").unwrap(), &[int], int).unwrap();

    let as_term = f.as_ast().unwrap();
    assert_eq!(as_term.kind(), AstKind::FuncDecl);
    assert_eq!(as_term.decl_name().unwrap().to_string(), "f");
    assert_eq!(as_term.decl().unwrap(), f);
}

#[test]
fn numerals_do_not_denote_declarations() {
    let ctx = context();
    let int = ctx.int_sort().unwrap();
    let five = ctx.int(5, int).unwrap();

    assert_eq!(five.kind(), AstKind::Numeral);
    let err = five.decl_name().unwrap_err();
    match err {
        Z3Error::NotADeclaration { term } => assert_eq!(term, "5"),
        other => panic!("expected NotADeclaration, got {other:?}"),
    }
}

#[test]
fn symbols_are_interned() {
    let ctx = context();
    let a = ctx.symbol("name").unwrap();
    let b = ctx.symbol("name").unwrap();
    let c = ctx.symbol("other").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.name(), "name");
    assert_eq!(format!("{a:?}"), "Symbol(name)");
}

#[test]
fn symbol_names_with_nul_bytes_are_rejected() {
    let ctx = context();
    let err = ctx.symbol("bad\0name").unwrap_err();
    assert!(err.is_invalid_name());
}

#[test]
fn declarations_render_through_the_engine() {
    let ctx = context();
    let int = ctx.int_sort().unwrap();
    let f = ctx
        .func_decl(ctx.symbol("f").unwrap(), &[int, int], int)
        .unwrap();
    let rendered = f.to_string();
    assert!(rendered.contains('f'), "unexpected rendering {rendered}");
    assert!(rendered.contains("Int"), "unexpected rendering {rendered}");
}

#[test]
fn handles_can_be_collected_in_hash_sets() {
    use std::collections::HashSet;

    let ctx = context();
    let int = ctx.int_sort().unwrap();
    let terms: HashSet<Ast<'_>> = (0..10)
        .map(|i| ctx.int(i % 5, int).unwrap())
        .collect();
    assert_eq!(terms.len(), 5);
}
