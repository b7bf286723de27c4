extern crate clap;
extern crate env_logger;
extern crate groebner;
extern crate itertools;
#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches};
use itertools::Itertools;
use log::LevelFilter;

use groebner::poly::raw::finitefield::check_modulus;
use groebner::{
    AsciiOrder, Field, FiniteField, Fraction, Ideal, InverseAsciiOrder, MonomialOrder, PolyError,
    Polynomial, Result, VariableOrder,
};

struct Options {
    field: String,
    order: MonomialOrder,
    basis: String,
    generators: Vec<String>,
    contains: Vec<String>,
}

fn compute<F: Field, V: VariableOrder>(options: &Options) -> Result<()> {
    let mut ideal: Ideal<F, V> = Ideal::new(options.order);
    for s in &options.generators {
        ideal.insert_str(s)?;
    }
    info!(
        "Input over {} in {} order: {}",
        options.field,
        options.order,
        ideal.generators().iter().join(", ")
    );

    match options.basis.as_str() {
        "groebner" => ideal.make_groebner_basis(),
        "minimal" => ideal.make_minimal_groebner_basis(),
        _ => ideal.make_reduced_groebner_basis(),
    }
    println!("{}", ideal);

    for s in &options.contains {
        let p = Polynomial::parse(s, options.order)?;
        println!("{} in ideal: {}", p, ideal.contains(&p));
    }
    Ok(())
}

macro_rules! dispatch_prime {
    ($p:expr, $v:ty, $options:expr, [$($prime:literal),*]) => {
        match $p {
            $($prime => compute::<FiniteField<$prime>, $v>($options),)*
            p => Err(PolyError::InvariantViolation(format!(
                "modulus {} is not one of {}",
                p,
                [$($prime),*].iter().join(", ")
            ))),
        }
    };
}

fn compute_in_field<V: VariableOrder>(options: &Options) -> Result<()> {
    match options.field.as_str() {
        "rational" | "Q" => compute::<Fraction, V>(options),
        s => {
            let p: i64 = s.parse().map_err(|_| {
                PolyError::MalformedInput(format!("field must be 'rational' or a prime, got {}", s))
            })?;
            check_modulus(p)?;
            dispatch_prime!(
                p,
                V,
                options,
                [2, 3, 5, 7, 11, 13, 97, 997, 32003, 65521, 998244353]
            )
        }
    }
}

fn values(matches: &ArgMatches, name: &str) -> Vec<String> {
    matches
        .values_of(name)
        .map(|v| v.map(String::from).collect())
        .unwrap_or_default()
}

fn main() {
    let matches = App::new("groebner")
        .version("0.1.0")
        .about("Computes Groebner bases of polynomial ideals")
        .arg(
            Arg::with_name("field")
                .short("f")
                .long("field")
                .help("Coefficient field: 'rational' or a prime modulus")
                .default_value("rational")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("order")
                .short("o")
                .long("order")
                .help("Monomial order")
                .possible_values(&["lex", "grlex", "grevlex"])
                .default_value("grlex")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("variables")
                .long("variables")
                .help("Variable order: 'ascii' (a < b < ...) or 'inverse' (a > b > ...)")
                .possible_values(&["ascii", "inverse"])
                .default_value("ascii")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("basis")
                .short("b")
                .long("basis")
                .help("Kind of basis to compute")
                .possible_values(&["groebner", "minimal", "reduced"])
                .default_value("reduced")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("contains")
                .short("c")
                .long("contains")
                .value_name("POLY")
                .help("Tests a polynomial for membership in the ideal")
                .multiple(true)
                .number_of_values(1)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("GENERATORS")
                .help("Generators of the ideal, e.g. 'x^2y - z'")
                .required(true)
                .multiple(true)
                .index(1),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .get_matches();

    let mut logger = env_logger::Builder::from_default_env();
    match matches.occurrences_of("v") {
        0 => {}
        1 => {
            logger.filter_level(LevelFilter::Info);
        }
        2 => {
            logger.filter_level(LevelFilter::Debug);
        }
        _ => {
            logger.filter_level(LevelFilter::Trace);
        }
    }
    logger.init();

    let result = matches
        .value_of("order")
        .unwrap_or("grlex")
        .parse::<MonomialOrder>()
        .and_then(|order| {
            let options = Options {
                field: matches.value_of("field").unwrap_or("rational").to_string(),
                order,
                basis: matches.value_of("basis").unwrap_or("reduced").to_string(),
                generators: values(&matches, "GENERATORS"),
                contains: values(&matches, "contains"),
            };
            match matches.value_of("variables") {
                Some("inverse") => compute_in_field::<InverseAsciiOrder>(&options),
                _ => compute_in_field::<AsciiOrder>(&options),
            }
        });

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
