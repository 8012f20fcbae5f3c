/// Evidence Preview — prints the exact prompt text the evidence
/// formatter produces for a Fountain file.
///
/// Usage: evidence_preview --input <screenplay.fountain> [--max-characters <n>]

use screenplay_engine::core::evidence::{
    extract_evidence, format_all_evidence_for_prompt, EvidenceLimits,
    DEFAULT_MAX_PROMPT_CHARACTERS,
};
use screenplay_engine::core::segmenter::detect_character_names;
use screenplay_engine::core::tokens::tokenize;
use std::env;
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let mut input = None;
    let mut max_characters = DEFAULT_MAX_PROMPT_CHARACTERS;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" if i + 1 < args.len() => {
                i += 1;
                input = Some(args[i].clone());
            }
            "--max-characters" if i + 1 < args.len() => {
                i += 1;
                max_characters = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --max-characters must be a number");
                    process::exit(1);
                });
            }
            "--help" | "-h" => {
                println!(
                    "Usage: evidence_preview --input <screenplay.fountain> [--max-characters <n>]"
                );
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input.unwrap_or_else(|| {
        eprintln!("Error: --input is required");
        eprintln!("Usage: evidence_preview --input <screenplay.fountain> [--max-characters <n>]");
        process::exit(1);
    });

    let text = match std::fs::read_to_string(&input_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("ERROR: failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let names = detect_character_names(&text);
    if names.is_empty() {
        eprintln!("WARNING: no character cues found in {}", input_path);
        process::exit(2);
    }

    let tokens = tokenize(&text);
    let evidence = extract_evidence(&tokens, &names, &EvidenceLimits::default());

    println!("Detected {} character(s): {}\n", names.len(), names.join(", "));
    for name in &names {
        if let Some(entry) = evidence.get(name) {
            println!(
                "  {}: {} excerpt(s), {} mention(s), ~{} scene(s)",
                name,
                entry.dialogue_excerpts.len(),
                entry.action_mentions.len(),
                entry.scene_count
            );
        }
    }

    println!("\n--- Prompt Text ---\n");
    print!("{}", format_all_evidence_for_prompt(&evidence, max_characters));
}
