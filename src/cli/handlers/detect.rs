use utf8_reader::{EncodingLabel, EncodingRsRegistry, ReaderConfig, ReaderSettings, Utf8Reader};

use crate::cli::config::open_input;
use crate::cli::{args::DetectArgs, global::GlobalArgs};

pub fn handle(
    args: DetectArgs,
    _global: &GlobalArgs,
    settings: &ReaderSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = open_input(args.file.as_ref())?;
    let peek_size = args.peek_size.unwrap_or_else(|| settings.peek_size());
    let config = ReaderConfig::new().with_peek_size(peek_size);

    let classifier = settings.classifier();
    let reader = Utf8Reader::with_components(input, &config, &classifier, &EncodingRsRegistry)?;
    let detection = reader.detection();

    if args.json {
        let output = serde_json::json!({
            "encoding": label_or_null(&detection.label),
            "bom_length": detection.bom_len,
            "decoded": reader.pipeline().has_decoder(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if detection.label.is_inconclusive() {
        println!("inconclusive");
    } else if detection.bom_len > 0 {
        println!("{} (BOM, {} bytes)", detection.label, detection.bom_len);
    } else {
        println!("{}", detection.label);
    }
    Ok(())
}

fn label_or_null(label: &EncodingLabel) -> serde_json::Value {
    if label.is_inconclusive() {
        serde_json::Value::Null
    } else {
        serde_json::Value::String(label.to_string())
    }
}
