use std::io::{self, Write};

use utf8_reader::ReaderSettings;

use crate::cli::config::{build_reader, open_input};
use crate::cli::{args::PeekArgs, global::GlobalArgs};

pub fn handle(
    args: PeekArgs,
    _global: &GlobalArgs,
    settings: &ReaderSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = open_input(args.file.as_ref())?;
    let reader = build_reader(input, settings, &args.reader)?;

    let Some(prefix) = reader.peek() else {
        log::info!("nothing to peek");
        return Ok(());
    };

    if args.hex {
        println!("{}", hex::encode(&prefix));
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&prefix)?;
        stdout.flush()?;
    }
    Ok(())
}
