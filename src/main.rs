use anyhow::Result;
use keycount::counter::KeyCounter;
use keycount::io::Operand;
use keycount::trace::LogTrace;
use std::io;

fn main() -> Result<()> {
    let args = match keycount::args::parsed() {
        Ok(args) => args,
        Err(e) => {
            keycount::report_usage_error(io::stdout().lock(), &e)?;
            std::process::exit(e.exit_code());
        }
    };
    init_logger();
    log::debug!("{args:?}");

    let mut counter = KeyCounter::new(LogTrace);
    keycount::run(|| Operand::open(&args.file), &mut counter, io::stdout().lock())?;
    Ok(())
}

/// Log to stderr as `[LEVEL] message`. `RUST_LOG` sets the filter (default
/// `warn`): `RUST_LOG=keycount=debug` logs every insertion, and
/// `RUST_LOG=keycount=trace` every removal as well.
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())
        })
        .init();
}
