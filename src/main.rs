use chrono::Local;
use tarry::{Countdown, ResolveError, resolve_duration, split_args};

fn usage() -> &'static str {
    "Usage: tarry [-q] <duration>\n\
     \x20 tarry 10                 # 10 seconds\n\
     \x20 tarry 2h                 # 2 hours (h/hr/hour/hours)\n\
     \x20 tarry 5m 30s             # sum of all arguments\n\
     \x20 tarry 1h 30minutes 45    # long suffixes and bare seconds mix\n\
     \x20 tarry -300 +600          # random duration between 300 and 600 seconds\n\
     \x20 tarry @17:30             # until 17:30 today\n\
     \x20 tarry @17:30 tomorrow    # until 17:30 tomorrow\n\
     \x20 tarry @noon              # until 12:00 today\n\
     \x20 tarry @20260220T123000Z  # until an ISO 8601 instant\n\
     \x20 -q, --quiet              # wait without drawing the progress line"
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();

    if matches!(
        raw.first().map(String::as_str),
        Some("-h" | "--help" | "help")
    ) {
        println!("{}", usage());
        return;
    }

    let (quiet, args) = split_args(&raw);
    let duration = match resolve_duration(&args, Local::now(), &mut rand::rng()) {
        Ok(secs) => secs,
        Err(err) => {
            if !matches!(err, ResolveError::Empty) {
                eprintln!("error: {err}");
            }
            eprintln!("{}", usage());
            std::process::exit(err.exit_code());
        }
    };

    let mut countdown = Countdown::new(duration, Local::now()).quiet(quiet);
    countdown.run().await;
}
