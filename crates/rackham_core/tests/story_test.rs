use rackham_core::{Story, TitleRule};

#[test]
fn title_comes_from_first_qualifying_line() {
    let story = Story::new(
        "\n\n   The Lantern of Willow Hollow!!  \nOnce upon a time there was a lantern.",
        &TitleRule::default(),
    );
    assert_eq!(story.title(), "The Lantern of Willow Hollow");
}

#[test]
fn short_lines_are_skipped() {
    let story = Story::new("Hi!\nThe Sleepy Dragon\nMore text.", &TitleRule::default());
    assert_eq!(story.title(), "The Sleepy Dragon");
}

#[test]
fn long_lines_do_not_qualify() {
    let long = "a".repeat(150);
    let text = format!("{long}\n{long}\n{long}\n{long}\n{long}\nLate Title");
    let story = Story::new(text, &TitleRule::default());
    assert_eq!(story.title(), "Magical Story Adventure");
}

#[test]
fn only_leading_lines_are_scanned() {
    let rule = TitleRule::new("Untitled", 2, 100);
    let story = Story::new("...\n!!!\nA Proper Title", &rule);
    assert_eq!(story.title(), "Untitled");
}

#[test]
fn punctuation_is_stripped_but_hyphens_kept() {
    let story = Story::new("Tick-Tock's Big Day?", &TitleRule::default());
    assert_eq!(story.title(), "Tick-Tocks Big Day");
}

#[test]
fn lengths_count_characters() {
    let story = Story::new("  héllo  ", &TitleRule::default());
    assert_eq!(story.trimmed_len(), 5);
    assert_eq!(story.len(), 9);
}
