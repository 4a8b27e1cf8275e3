use utf8_reader::{MIN_PEEK_SIZE, ReaderSettings};

use crate::cli::{args::ConfigAction, global::GlobalArgs};

pub fn handle(
    action: ConfigAction,
    _global: &GlobalArgs,
    settings: &ReaderSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show { json } => handle_show(json, settings),
    }
}

fn handle_show(json: bool, settings: &ReaderSettings) -> Result<(), Box<dyn std::error::Error>> {
    let peek_size = settings.peek_size().max(MIN_PEEK_SIZE);
    let normalization = settings.normalization();
    let classifier = settings.classifier_kind().as_str();
    let tld = settings.detection.tld.as_deref();

    if json {
        let output = serde_json::json!({
            "peek_size": peek_size,
            "normalization": normalization,
            "classifier": classifier,
            "tld": tld,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("peek_size = {}", peek_size);
    println!("normalization = [{}]", normalization.join(", "));
    println!("classifier = {}", classifier);
    println!("tld = {}", tld.unwrap_or("(none)"));
    Ok(())
}
