use clap::Parser;

use boolexpr_rs::context::Context;
use boolexpr_rs::reference::Bx;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of queens.
    #[arg(value_name = "INT", default_value = "4")]
    n: usize,

    /// Node table size (in bits, so the number of buckets is `2^size`).
    #[clap(long, value_name = "INT", default_value = "16")]
    size: usize,

    /// Prefix for auxiliary Tseytin variables.
    #[clap(long, value_name = "STR", default_value = "aux")]
    prefix: String,

    /// Also count all solutions.
    #[clap(long)]
    count: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let ctx = Context::new(args.size);
    println!("ctx = {:?}", ctx);

    // Encode N-queens problem:
    // - At least one queen per row
    // - At most one queen per row, column and diagonal
    let n = args.n;
    println!("Encoding n-queens problem with n = {}", n);
    let queens: Vec<Vec<Bx>> = (0..n)
        .map(|i| (0..n).map(|j| ctx.get_var(&format!("q_{}_{}", i, j))).collect())
        .collect();

    let mut constraints: Vec<Bx> = Vec::new();
    for row in queens.iter() {
        constraints.push(ctx.or(row.iter().copied()));
    }
    let cells: Vec<(usize, usize)> = (0..n).flat_map(|i| (0..n).map(move |j| (i, j))).collect();
    for (a, &(i1, j1)) in cells.iter().enumerate() {
        for &(i2, j2) in cells[a + 1..].iter() {
            let attacks = i1 == i2 || j1 == j2 || i1.abs_diff(i2) == j1.abs_diff(j2);
            if attacks {
                constraints.push(ctx.nand([queens[i1][j1], queens[i2][j2]]));
            }
        }
    }
    let f = ctx.and(constraints);
    println!("constraints: {}", ctx.args(f).len());
    println!("f: size = {}, depth = {}", ctx.size(f), ctx.depth(f));

    let g = ctx.tseytin(f, &args.prefix)?;
    println!("tseytin: size = {}, vars = {}, cnf = {}", ctx.size(g), ctx.var_count(), ctx.is_cnf(g));

    let time_sat = std::time::Instant::now();
    match ctx.sat(f) {
        Some(point) => {
            println!("SAT in {:.3} s", time_sat.elapsed().as_secs_f64());
            for row in queens.iter() {
                let line: String = row
                    .iter()
                    .map(|x| match point.get(x) {
                        Some(&v) if ctx.is_one(v) => 'Q',
                        _ => '.',
                    })
                    .collect();
                println!("{}", line);
            }
        }
        None => {
            println!("UNSAT in {:.3} s", time_sat.elapsed().as_secs_f64());
        }
    }
    println!("tseytin sat: {}", ctx.sat(g).is_some());

    if args.count {
        let time_count = std::time::Instant::now();
        let count = ctx.sat_count(f);
        println!("solutions: {} in {:.3} s", count, time_count.elapsed().as_secs_f64());
    }

    let cache = ctx.cache();
    println!("cache: hits = {}, misses = {}", cache.hits(), cache.misses());
    println!("nodes: {}", ctx.num_nodes());

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
