pub mod countdown;
pub mod render;
pub mod resolve;
pub mod when;

pub use countdown::Countdown;
pub use resolve::{ResolveError, resolve_duration};

/// Splits the raw argument list into the quiet flag and the time arguments.
pub fn split_args(raw: &[String]) -> (bool, Vec<String>) {
    let quiet = raw.iter().any(|a| a == "-q" || a == "--quiet");
    let time_args = raw
        .iter()
        .filter(|a| *a != "-q" && *a != "--quiet")
        .cloned()
        .collect();
    (quiet, time_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_args_short_flag() {
        let (quiet, time_args) = split_args(&args(&["-q", "3"]));
        assert!(quiet);
        assert_eq!(time_args, args(&["3"]));
    }

    #[test]
    fn test_split_args_long_flag() {
        let (quiet, time_args) = split_args(&args(&["5m", "--quiet"]));
        assert!(quiet);
        assert_eq!(time_args, args(&["5m"]));
    }

    #[test]
    fn test_split_args_no_flag() {
        let (quiet, time_args) = split_args(&args(&["2h", "30m"]));
        assert!(!quiet);
        assert_eq!(time_args, args(&["2h", "30m"]));
    }

    #[test]
    fn test_split_args_keeps_range_tokens() {
        let (quiet, time_args) = split_args(&args(&["-300", "+600", "-q"]));
        assert!(quiet);
        assert_eq!(time_args, args(&["-300", "+600"]));
    }
}
