/// Parser integration tests — end-to-end Fountain text to scene records.

use screenplay_engine::core::segmenter::{detect_character_names, parse_screenplay};

fn fixture() -> String {
    std::fs::read_to_string("tests/fixtures/coffee_shop.fountain").unwrap()
}

#[test]
fn fixture_title_page_extracted() {
    let play = parse_screenplay(&fixture());
    assert_eq!(play.title.as_deref(), Some("The Last Shift"));
    assert_eq!(play.author.as_deref(), Some("R. Alvarez"));
}

#[test]
fn fixture_scene_structure() {
    let play = parse_screenplay(&fixture());
    assert_eq!(play.scenes.len(), 3);

    assert_eq!(play.scenes[0].heading, "INT. COFFEE SHOP - MORNING");
    assert_eq!(play.scenes[0].location, "COFFEE SHOP");
    assert_eq!(play.scenes[0].time_of_day, "MORNING");

    assert_eq!(play.scenes[1].heading, "INT. BACK ROOM - MORNING");
    assert_eq!(play.scenes[2].heading, "EXT. ALLEY - NIGHT");
    assert_eq!(play.scenes[2].time_of_day, "NIGHT");
}

#[test]
fn fixture_scene_numbers_monotonic() {
    let play = parse_screenplay(&fixture());
    for (i, scene) in play.scenes.iter().enumerate() {
        assert_eq!(scene.number as usize, i + 1);
        assert!(scene.start_line <= scene.end_line);
    }
}

#[test]
fn fixture_speaking_characters_per_scene() {
    let play = parse_screenplay(&fixture());
    assert_eq!(play.scenes[0].characters, vec!["MAYA", "DEV"]);
    assert_eq!(play.scenes[1].characters, vec!["DEV", "MAYA"]);
    assert_eq!(play.scenes[2].characters, vec!["FIGURE", "DEV"]);
}

#[test]
fn fixture_scene_content_verbatim() {
    let text = fixture();
    let play = parse_screenplay(&text);

    // The concatenated scene contents reproduce the document from the
    // first heading onward, byte for byte.
    let lines: Vec<&str> = text.lines().collect();
    let first_heading = play.scenes[0].start_line;
    let expected = lines[first_heading..].join("\n");
    let reconstructed: Vec<String> = play.scenes.iter().map(|s| s.content.clone()).collect();
    assert_eq!(reconstructed.join("\n"), expected);

    // Spot-check one scene body.
    assert_eq!(
        play.scenes[1].content,
        "INT. BACK ROOM - MORNING\n\nDev paces. Maya leans in the doorway.\n\nDEV\nI didn't take it.\n\nMAYA\nI never said you did.\n"
    );
}

#[test]
fn fixture_scene_line_spans_are_contiguous() {
    let play = parse_screenplay(&fixture());
    for pair in play.scenes.windows(2) {
        assert_eq!(pair[0].end_line + 1, pair[1].start_line);
    }
}

#[test]
fn fixture_detected_names() {
    let names = detect_character_names(&fixture());
    assert_eq!(names, vec!["MAYA", "DEV", "FIGURE"]);
}

#[test]
fn parse_is_deterministic() {
    let text = fixture();
    assert_eq!(parse_screenplay(&text), parse_screenplay(&text));
}

#[test]
fn degenerate_inputs() {
    assert!(parse_screenplay("").scenes.is_empty());
    assert!(parse_screenplay("No headings here.\nJust prose.").scenes.is_empty());

    // A lone heading is a one-line scene.
    let play = parse_screenplay("INT. VOID - NIGHT");
    assert_eq!(play.scenes.len(), 1);
    assert_eq!(play.scenes[0].start_line, 0);
    assert_eq!(play.scenes[0].end_line, 0);
}
