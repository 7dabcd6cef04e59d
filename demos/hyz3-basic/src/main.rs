use hyz3::prelude::*;

fn run() -> Z3Result<()> {
    let ctx = Context::new(&Config::new().with_model(true))?;
    println!("Using Z3 {}", Context::engine_version());

    // Declare a constant and a binary function over the integers
    let int = ctx.int_sort()?;
    let x = ctx.constant(ctx.symbol("x")?, int)?;
    let f = ctx.func_decl(ctx.symbol("f")?, &[int, int], int)?;
    println!("declared {} and {}", x, f);

    let app = ctx.app(f, &[ctx.int(1, int)?, ctx.int(2, int)?])?;
    println!("term: {}", app);
    println!("head: {}", app.decl_name()?);

    for value in [0, i64::MIN, i64::MAX] {
        let numeral = ctx.int(value, int)?;
        println!("{} reads back as {}", numeral, numeral.int_value::<i64>()?);
    }

    // Applying `f` to the wrong number of arguments is caught before reaching the engine
    match ctx.app(f, &[x]) {
        Ok(term) => println!("unexpected success: {}", term),
        Err(err) => println!("rejected: {}", err),
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
