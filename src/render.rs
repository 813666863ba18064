use std::fmt::Write;

/// Width of the progress bar in cells.
pub const BAR_CELLS: u64 = 40;

// Above this many remaining seconds the leading indent is dropped and the
// raw count gains thousands separators; the line would otherwise blow the
// 80-column budget.
const WIDE_THRESHOLD: u64 = 9_999;
// Above this the clock/bar separator goes too.
const HUGE_THRESHOLD: u64 = 999_999;

pub fn format_clock(secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed-point percentage with one decimal, no floating point involved.
/// `0` elapsed renders "0.0", everything done renders "100.0".
pub fn format_percent(elapsed: u64, total: u64) -> String {
    let whole = elapsed * 100 / total;
    let tenths = elapsed * 1000 / total % 10;
    format!("{whole}.{tenths}")
}

pub fn filled_cells(elapsed: u64, total: u64) -> u64 {
    elapsed * 100 / total * BAR_CELLS / 100
}

fn format_bar(filled: u64, paint: bool) -> String {
    let filled = filled.min(BAR_CELLS) as usize;
    let done = "█".repeat(filled);
    let rest = "░".repeat(BAR_CELLS as usize - filled);
    if paint {
        format!(
            "[{}{}]",
            console::style(done).cyan().for_stderr(),
            console::style(rest).blue().for_stderr()
        )
    } else {
        format!("[{done}{rest}]")
    }
}

/// Renders one full status line for the given progress. `paint` routes the
/// bar through the terminal style table; styling is a no-op on streams
/// without color support.
pub fn status_line(total: u64, remaining: u64, paint: bool) -> String {
    let elapsed = total.saturating_sub(remaining);
    let mut line = String::new();
    if remaining <= WIDE_THRESHOLD {
        line.push_str("  ");
    }
    line.push_str(&format_clock(remaining));
    if remaining > WIDE_THRESHOLD {
        write!(line, " ({})", group_thousands(remaining)).ok();
    } else {
        write!(line, " ({remaining})").ok();
    }
    if remaining > HUGE_THRESHOLD {
        line.push(' ');
    } else {
        line.push_str(" | ");
    }
    line.push_str(&format_bar(filled_cells(elapsed, total), paint));
    write!(line, " {}%", format_percent(elapsed, total)).ok();
    line
}
