//! `mazepath-demo [STRATEGY] [--seed N] [--size N] [--costs] [--animate] [--delay MS]`

use clap::Parser;
use mazepath_demos::{DemoArgs, init_logging, run_demo};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging("info")?;

    let args = DemoArgs::parse();
    let delay = args.delay();
    let report = run_demo(&args, |frame| {
        print!("\x1b[2J\x1b[H{frame}");
        std::thread::sleep(delay);
    })?;
    print!("{report}");
    Ok(())
}
