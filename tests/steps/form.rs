//! Step definitions for driving the form

use crate::common::world::ApitermWorld;
use apiterm::models::FIELD_LABELS;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use tracing::debug;

fn field_index(label: &str) -> usize {
    FIELD_LABELS
        .iter()
        .position(|l| l.eq_ignore_ascii_case(label))
        .unwrap_or_else(|| panic!("no field labelled {label}"))
}

// === SETUP ===

#[given("the form is open")]
async fn given_form_open(world: &mut ApitermWorld) {
    world.open_form().expect("Failed to open form");
}

// === INPUT ===

#[when(expr = "I press {string}")]
async fn when_press(world: &mut ApitermWorld, key: String) {
    debug!("Pressing {key}");
    world.press_key(&key).await.expect("Failed to press key");
}

#[when(expr = "I type {string}")]
async fn when_type(world: &mut ApitermWorld, text: String) {
    world.type_text(&text).await.expect("Failed to type text");
}

#[when("I paste:")]
async fn when_paste(world: &mut ApitermWorld, step: &Step) {
    let text = step.docstring.as_deref().unwrap_or_default();
    world.paste(text).await.expect("Failed to paste");
}

#[when(expr = "the terminal is resized to {int} by {int}")]
async fn when_resized(world: &mut ApitermWorld, width: u16, height: u16) {
    world.resize(width, height).await.expect("Failed to resize");
}

// === FOCUS AND VALUES ===

#[then(expr = "the focused field is {string}")]
async fn then_focused(world: &mut ApitermWorld, label: String) {
    let model = world.controller().expect("form open").model();
    assert_eq!(
        FIELD_LABELS[model.focus_index()],
        label,
        "unexpected focus"
    );
    let focused: Vec<usize> = model
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, field)| field.is_focused())
        .map(|(idx, _)| idx)
        .collect();
    assert_eq!(focused, vec![model.focus_index()], "exactly one field is focused");
}

#[then(expr = "the {string} field contains {string}")]
async fn then_field_contains(world: &mut ApitermWorld, label: String, expected: String) {
    let model = world.controller().expect("form open").model();
    assert_eq!(model.value(field_index(&label)), expected);
}

#[then(expr = "the {string} field is empty")]
async fn then_field_empty(world: &mut ApitermWorld, label: String) {
    let model = world.controller().expect("form open").model();
    assert_eq!(model.value(field_index(&label)), "");
}

// === SCREEN ===

#[then(expr = "the screen shows {string}")]
async fn then_screen_shows(world: &mut ApitermWorld, text: String) {
    let screen = world.screen().expect("form open");
    assert!(screen.contains(&text), "{text:?} not on screen:\n{screen}");
}

#[then(expr = "the screen does not show {string}")]
async fn then_screen_hides(world: &mut ApitermWorld, text: String) {
    let screen = world.screen().expect("form open");
    assert!(!screen.contains(&text), "{text:?} unexpectedly on screen:\n{screen}");
}

#[then("the form is loading")]
async fn then_loading(world: &mut ApitermWorld) {
    assert!(world.controller().expect("form open").model().is_loading());
}

#[then("the form is not loading")]
async fn then_not_loading(world: &mut ApitermWorld) {
    assert!(!world.controller().expect("form open").model().is_loading());
}

#[then("the application has quit")]
async fn then_quit(world: &mut ApitermWorld) {
    assert!(world.controller().expect("form open").should_quit());
}
