//! Validation of the command line parameters, and the `kmeans` binary's run loop.
//!
//! The binary is invoked as `kmeans <K> [MAX_ITER] [-i FILE]` and prints the final centroids to stdout.

use crate::{Error, Result};

/// Iteration cap used when none is given.
pub const DEFAULT_MAX_ITER: usize = 200;
/// Exclusive upper bound for a user supplied iteration cap.
pub const MAX_ITER_LIMIT: usize = 1000;

pub const MSG_INVALID_CLUSTERS: &str = "Invalid number of clusters!";
pub const MSG_INVALID_ITERATIONS: &str = "Invalid maximum iteration!";
pub const MSG_GENERIC: &str = "An Error Has Occurred";

/// Parse the cluster count: decimal digits only (no sign, no whitespace), `1 < k < num_points`.
pub fn validate_cluster_count(raw: &str, num_points: usize) -> Result<usize> {
    let malformed = || Error::MalformedClusterCount { raw: raw.to_string() };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    // digits only, so the only possible failure is overflow
    let k = raw.parse::<usize>().map_err(|_| malformed())?;
    if k <= 1 || k >= num_points {
        return Err(Error::InvalidClusterCount { k, num_points });
    }
    Ok(k)
}

/// Parse the optional iteration cap: an optional leading `+`, then decimal digits, `1 < iter < 1000`.
/// Missing means [`DEFAULT_MAX_ITER`].
pub fn validate_max_iter(raw: Option<&str>) -> Result<usize> {
    let raw = match raw {
        None => return Ok(DEFAULT_MAX_ITER),
        Some(raw) => raw,
    };
    let invalid = || Error::InvalidIterationBound { max_iter: raw.to_string() };
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let max_iter = digits.parse::<usize>().map_err(|_| invalid())?;
    if max_iter <= 1 || max_iter >= MAX_ITER_LIMIT {
        return Err(invalid());
    }
    Ok(max_iter)
}

/// The line printed for a failed run.
pub fn user_message(err: &Error) -> &'static str {
    match err {
        Error::InvalidClusterCount { .. } | Error::MalformedClusterCount { .. } => MSG_INVALID_CLUSTERS,
        Error::InvalidIterationBound { .. } => MSG_INVALID_ITERATIONS,
        _ => MSG_GENERIC,
    }
}

#[cfg(feature = "cli")]
pub use self::app::*;

#[cfg(feature = "cli")]
mod app {
    use super::*;
    use crate::{io, Execution, KMeansConfig, DEFAULT_CHUNK_SIZE, DEFAULT_EPSILON};
    use anyhow::Context;
    use clap::Parser;
    use std::io::{BufReader, Write};
    use std::path::PathBuf;

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Cluster points with Lloyd's k-means and print the final centroids", long_about = None)]
    pub struct Args {
        /// Number of clusters, 1 < K < number of points
        #[arg(required = true, allow_hyphen_values = true)]
        pub k: String,
        /// Maximum number of iterations, 1 < MAX_ITER < 1000 [default: 200]
        #[arg(allow_hyphen_values = true)]
        pub max_iter: Option<String>,
        /// Read points from FILE instead of stdin
        #[arg(short, long, value_name = "FILE")]
        pub input: Option<PathBuf>,
        /// Convergence threshold per coordinate
        #[arg(short, long, default_value_t = DEFAULT_EPSILON)]
        pub epsilon: f64,
        /// Assign points on all cores
        #[arg(long)]
        pub parallel: bool,
        /// Points per block with --parallel
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        pub chunk_size: usize,
        /// More log output on stderr (-v info, -vv debug)
        #[arg(short, long, action = clap::ArgAction::Count)]
        pub verbose: u8,
    }

    impl Args {
        pub fn log_level(&self) -> log::LevelFilter {
            match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                _ => log::LevelFilter::Debug,
            }
        }

        pub fn execution(&self) -> Execution {
            if self.parallel {
                Execution::Parallel { chunk_size: self.chunk_size }
            } else {
                Execution::Sequential
            }
        }
    }

    /// Validate, read, cluster and print. Parameters are checked in the order: iteration cap,
    /// input, cluster count.
    pub fn run<W: Write>(args: &Args, out: W) -> anyhow::Result<()> {
        let max_iter = validate_max_iter(args.max_iter.as_deref())?;
        let points = match &args.input {
            Some(path) => {
                let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
                io::read_points::<f64, _>(BufReader::new(file))
            }
            None => io::read_points::<f64, _>(std::io::stdin().lock()),
        }.context("reading points")?;
        let k = validate_cluster_count(&args.k, points.len())?;

        let config = KMeansConfig::build()
            .epsilon(args.epsilon)
            .execution(args.execution())
            .build();
        let result = points.kmeans_lloyd(k, max_iter, &config).context("clustering")?;
        io::write_centroids(out, &result.centroids).context("writing centroids")?;
        Ok(())
    }

    /// Map a failed [`run`] to the line printed on stdout.
    pub fn failure_message(err: &anyhow::Error) -> &'static str {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<Error>())
            .map(user_message)
            .unwrap_or(MSG_GENERIC)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_count_accepts_digits_in_range() {
        assert_eq!(validate_cluster_count("2", 5).unwrap(), 2);
        assert_eq!(validate_cluster_count("4", 5).unwrap(), 4);
        assert_eq!(validate_cluster_count("007", 10).unwrap(), 7);
    }

    #[test]
    fn cluster_count_rejects_everything_else() {
        for raw in ["1", "5", "6", "0"] {
            let res = validate_cluster_count(raw, 5);
            assert!(matches!(res, Err(Error::InvalidClusterCount { .. })), "{:?} accepted", raw);
        }
        for raw in ["", "-3", "+3", "3.0", "3 ", " 3", "abc", "99999999999999999999999"] {
            match validate_cluster_count(raw, 5) {
                Err(Error::MalformedClusterCount { raw: rejected }) => assert_eq!(rejected, raw),
                other => panic!("{:?} gave {:?}", raw, other),
            }
        }
    }

    #[test]
    fn cluster_count_errors_report_the_given_value() {
        match validate_cluster_count("7", 5) {
            Err(Error::InvalidClusterCount { k, num_points }) => assert_eq!((k, num_points), (7, 5)),
            other => panic!("unexpected: {:?}", other),
        }
        let err = validate_cluster_count("x2", 5).unwrap_err();
        assert_eq!(err.to_string(), "invalid cluster count: \"x2\" is not a positive decimal number");
    }

    #[test]
    fn max_iter_default_and_range() {
        assert_eq!(validate_max_iter(None).unwrap(), 200);
        assert_eq!(validate_max_iter(Some("2")).unwrap(), 2);
        assert_eq!(validate_max_iter(Some("999")).unwrap(), 999);
        assert_eq!(validate_max_iter(Some("+50")).unwrap(), 50);
        for raw in ["", "+", "1", "0", "1000", "-5", "10.5", "ten", "++5"] {
            assert!(matches!(validate_max_iter(Some(raw)), Err(Error::InvalidIterationBound { .. })), "{:?} accepted", raw);
        }
    }

    #[test]
    fn messages() {
        assert_eq!(user_message(&Error::InvalidClusterCount { k: 1, num_points: 5 }), MSG_INVALID_CLUSTERS);
        assert_eq!(user_message(&Error::MalformedClusterCount { raw: "-2".into() }), MSG_INVALID_CLUSTERS);
        assert_eq!(user_message(&Error::InvalidIterationBound { max_iter: "0".into() }), MSG_INVALID_ITERATIONS);
        assert_eq!(user_message(&Error::EmptyInput), MSG_GENERIC);
    }

    #[cfg(feature = "cli")]
    mod app {
        use super::super::*;
        use clap::Parser;
        use std::io::Write;

        fn input_file(name: &str, content: &str) -> std::path::PathBuf {
            let path = std::env::temp_dir().join(format!("kmeans-lloyd-{}-{}.txt", name, std::process::id()));
            std::fs::File::create(&path).unwrap().write_all(content.as_bytes()).unwrap();
            path
        }

        fn run_with(name: &str, content: &str, argv: &[&str]) -> (anyhow::Result<()>, String) {
            let path = input_file(name, content);
            let mut full = vec!["kmeans".to_string()];
            full.extend(argv.iter().map(|a| a.to_string()));
            full.extend(["--input".to_string(), path.display().to_string()]);
            let args = Args::try_parse_from(full).unwrap();
            let mut out = Vec::new();
            let res = run(&args, &mut out);
            std::fs::remove_file(path).ok();
            (res, String::from_utf8(out).unwrap())
        }

        #[test]
        fn prints_centroids() {
            let (res, out) = run_with("ok", "0,0\n0,1\n10,10\n10,11\n", &["2"]);
            res.unwrap();
            assert_eq!(out, "0.0000,0.5000\n10.0000,10.5000\n");
        }

        #[test]
        fn parallel_flag() {
            let (res, out) = run_with("par", "0,0\n0,1\n10,10\n10,11\n", &["2", "100", "--parallel", "--chunk-size", "1"]);
            res.unwrap();
            assert_eq!(out, "0.0000,0.5000\n10.0000,10.5000\n");
        }

        #[test]
        fn huge_chunk_size_runs_as_one_block() {
            let (res, out) = run_with("bigchunk", "0,0\n0,1\n10,10\n10,11\n", &["2", "--parallel", "--chunk-size", "9223372036854775808"]);
            res.unwrap();
            assert_eq!(out, "0.0000,0.5000\n10.0000,10.5000\n");
        }

        #[test]
        fn invalid_cluster_count_message() {
            let (res, out) = run_with("k", "0,0\n0,1\n10,10\n10,11\n", &["4"]);
            assert_eq!(failure_message(&res.unwrap_err()), MSG_INVALID_CLUSTERS);
            assert!(out.is_empty());
        }

        #[test]
        fn negative_cluster_count_reaches_validation() {
            let (res, _) = run_with("neg", "0,0\n0,1\n10,10\n", &["-2"]);
            assert_eq!(failure_message(&res.unwrap_err()), MSG_INVALID_CLUSTERS);
        }

        #[test]
        fn invalid_iteration_message() {
            let (res, _) = run_with("iter", "0,0\n0,1\n10,10\n10,11\n", &["2", "1000"]);
            assert_eq!(failure_message(&res.unwrap_err()), MSG_INVALID_ITERATIONS);
        }

        #[test]
        fn malformed_input_is_generic_error() {
            let (res, _) = run_with("bad", "0,0\n0,x\n", &["2"]);
            assert_eq!(failure_message(&res.unwrap_err()), MSG_GENERIC);
        }

        #[test]
        fn verbosity_levels() {
            let args = Args::try_parse_from(["kmeans", "3"]).unwrap();
            assert_eq!(args.log_level(), log::LevelFilter::Warn);
            assert_eq!(args.max_iter, None);
            assert_eq!(args.epsilon, 0.001);
            let args = Args::try_parse_from(["kmeans", "3", "12", "-vv"]).unwrap();
            assert_eq!(args.log_level(), log::LevelFilter::Debug);
            assert_eq!(args.max_iter.as_deref(), Some("12"));
        }
    }
}
