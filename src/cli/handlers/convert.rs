use std::io::{self, Write};

use utf8_reader::ReaderSettings;

use crate::cli::config::{build_reader, open_input, open_output};
use crate::cli::{args::ConvertArgs, global::GlobalArgs};

pub fn handle(
    args: ConvertArgs,
    _global: &GlobalArgs,
    settings: &ReaderSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = open_input(args.file.as_ref())?;
    let mut reader = build_reader(input, settings, &args.reader)?;

    if reader.encoding().is_inconclusive() {
        log::info!("encoding not detected, copying input unchanged");
    } else {
        log::info!("converting from {}", reader.encoding());
    }

    let mut output = open_output(args.output.as_ref())?;
    let written = io::copy(&mut reader, &mut output)?;
    output.flush()?;
    log::debug!("wrote {} bytes", written);

    Ok(())
}
