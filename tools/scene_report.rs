/// Scene Report — parses a Fountain file and prints the scene table.
///
/// Usage: scene_report <screenplay.fountain>

use screenplay_engine::core::segmenter::parse_screenplay;
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: scene_report <screenplay.fountain>");
        process::exit(0);
    }

    let path = &args[1];
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("ERROR: failed to read {}: {}", path, e);
            process::exit(1);
        }
    };

    let play = parse_screenplay(&text);

    if let Some(title) = &play.title {
        println!("Title:  {}", title);
    }
    if let Some(author) = &play.author {
        println!("Author: {}", author);
    }
    if play.title.is_some() || play.author.is_some() {
        println!();
    }

    if play.scenes.is_empty() {
        eprintln!("WARNING: no scene headings found in {}", path);
        process::exit(2);
    }

    for scene in &play.scenes {
        println!("Scene {} — {}", scene.number, scene.heading);
        println!("  location: {}", scene.location);
        if !scene.time_of_day.is_empty() {
            println!("  time:     {}", scene.time_of_day);
        }
        println!("  lines:    {}-{}", scene.start_line, scene.end_line);
        if scene.characters.is_empty() {
            println!("  speakers: (none)");
        } else {
            println!("  speakers: {}", scene.characters.join(", "));
        }
    }

    println!("\n{} scene(s) total", play.scenes.len());
}
