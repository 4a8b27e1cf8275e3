use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use utf8_reader::{EncodingRsRegistry, ReaderSettings, Utf8Reader};

use super::args::ReaderArgs;
use super::global::GlobalArgs;

/// Loads settings from `--config` if given, otherwise from the standard
/// locations.
pub fn load_settings(global: &GlobalArgs) -> Result<ReaderSettings, Box<dyn Error>> {
    let Some(path) = &global.config else {
        return Ok(ReaderSettings::load_with_overrides()?);
    };

    let expanded = shellexpand::tilde(path);
    let explicit = ReaderSettings::load_from_file(Path::new(expanded.as_ref()))?;
    let mut settings = ReaderSettings::load_default()?;
    settings.merge(explicit);
    Ok(settings)
}

/// Opens the input file, or stdin when none is given.
pub fn open_input(file: Option<&PathBuf>) -> Result<Box<dyn Read>, Box<dyn Error>> {
    match file {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Cannot open '{}': {}", path.display(), e))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Opens the output file, or stdout when none is given.
pub fn open_output(file: Option<&PathBuf>) -> Result<Box<dyn Write>, Box<dyn Error>> {
    match file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Cannot create '{}': {}", path.display(), e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Builds a reader from settings, with command line options taking
/// precedence.
pub fn build_reader(
    input: Box<dyn Read>,
    settings: &ReaderSettings,
    args: &ReaderArgs,
) -> Result<Utf8Reader<Box<dyn Read>>, Box<dyn Error>> {
    let mut config = settings.reader_config();
    if let Some(size) = args.peek_size {
        config = config.with_peek_size(size);
    }
    if !args.normalize.is_empty() {
        config.replace_normalization(&args.normalize);
    }

    let classifier = settings.classifier();
    let reader = Utf8Reader::with_components(input, &config, &classifier, &EncodingRsRegistry)?;
    Ok(reader)
}
