use clap::{Parser, ValueEnum};
use polynomial_calculator::polynomial::{
    markup::{Caret, Markup, SupTag},
    Polynomial,
};

type Poly = Polynomial<f64, u32>;

/// Adds or multiplies two sparse polynomials.
///
/// Terms are given as "coefficient,exponent" pairs, in any order. Terms with
/// repeated exponents are merged, zero coefficients are dropped.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Operation to apply to the two polynomials
    #[arg(value_enum)]
    operation: Operation,

    /// Term of the first polynomial, may be repeated
    #[arg(
        short = 'a',
        long = "lhs",
        value_name = "COEFF,EXP",
        required = true,
        allow_hyphen_values = true,
        value_parser = parse_term
    )]
    lhs: Vec<(f64, u32)>,

    /// Term of the second polynomial, may be repeated
    #[arg(
        short = 'b',
        long = "rhs",
        value_name = "COEFF,EXP",
        required = true,
        allow_hyphen_values = true,
        value_parser = parse_term
    )]
    rhs: Vec<(f64, u32)>,

    /// Render exponents as HTML <sup> tags instead of caret notation
    #[arg(long)]
    html: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Operation {
    Add,
    Multiply,
}

fn parse_term(s: &str) -> Result<(f64, u32), String> {
    let (coefficient, exponent) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"coefficient,exponent\", got \"{}\"", s))?;

    let coefficient = coefficient
        .trim()
        .parse()
        .map_err(|why| format!("bad coefficient \"{}\": {}", coefficient, why))?;
    let exponent = exponent
        .trim()
        .parse()
        .map_err(|why| format!("bad exponent \"{}\": {}", exponent, why))?;

    Ok((coefficient, exponent))
}

fn report<M: Markup>(lhs: &Poly, rhs: &Poly, symbol: char, result: &Poly) {
    println!("A = {}", lhs.rendered::<M>());
    println!("B = {}", rhs.rendered::<M>());
    println!("A {} B = {}", symbol, result.rendered::<M>());
}

fn main() {
    let args = Args::parse();

    let lhs: Poly = args.lhs.iter().copied().collect();
    let rhs: Poly = args.rhs.iter().copied().collect();

    let (symbol, result) = match args.operation {
        Operation::Add => ('+', &lhs + &rhs),
        Operation::Multiply => ('*', &lhs * &rhs),
    };

    if args.html {
        report::<SupTag>(&lhs, &rhs, symbol, &result);
    } else {
        report::<Caret>(&lhs, &rhs, symbol, &result);
    }
}
