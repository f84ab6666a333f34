use std::io::Write;

use clap::Parser;
use glyphs2ds::{run, Args, Error};

fn main() -> Result<(), Error> {
    env_logger::builder()
        .format(|buf, record| {
            let ts = buf.timestamp_micros();
            writeln!(
                buf,
                "{}: {}: {}",
                ts,
                buf.default_level_style(record.level())
                    .value(record.level()),
                record.args()
            )
        })
        .init();

    run(&Args::parse())
}
