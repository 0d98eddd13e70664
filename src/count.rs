//! Resolving "how many" from positional arguments and the `--number` flag.

/// Largest integer parseable from `args`, or `default` when none parses.
pub fn max_convertible<S: AsRef<str>>(args: &[S], default: i64) -> i64 {
    args.iter()
        .filter_map(|a| a.as_ref().trim().parse::<i64>().ok())
        .max()
        .unwrap_or(default)
}

/// Pick the intended count.
///
/// `flag_value` is the `--number` value, or 0 when the flag was not given.
/// An explicit positive flag wins over a larger positional number; otherwise
/// the larger of the two is used.
pub fn resolve_count<S: AsRef<str>>(args: &[S], flag_value: i64, default: i64) -> i64 {
    let candidate = flag_value.max(max_convertible(args, default));
    if flag_value > 0 && flag_value != candidate {
        flag_value
    } else {
        candidate
    }
}
