//! Step definitions for HTTP request/response operations

use crate::common::world::ApitermWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use tracing::info;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[given(expr = "the server answers {word} {string} with status {int} and body:")]
async fn given_server_answers(
    world: &mut ApitermWorld,
    verb: String,
    route: String,
    status: u16,
    step: &Step,
) {
    let body = step.docstring.as_deref().unwrap_or_default().trim().to_string();
    let server = world.mock_server().await;
    Mock::given(method(verb.as_str()))
        .and(path(route.as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[when(expr = "I enter the server URL for {string}")]
async fn when_enter_server_url(world: &mut ApitermWorld, route: String) {
    let url = world.mock_server_url(&route);
    world.type_text(&url).await.expect("Failed to type URL");
}

#[when("I wait for the response")]
async fn when_wait_for_response(world: &mut ApitermWorld) {
    world
        .wait_for_response()
        .await
        .expect("Failed to receive response");
    info!("Received {:?}", world.last_completion);
}

#[then(expr = "the server received a {word} with body {string}")]
async fn then_server_received(world: &mut ApitermWorld, verb: String, body: String) {
    let server = world.mock_server().await;
    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    let request = requests.last().expect("the server received a request");

    assert_eq!(request.method.as_str(), verb);
    assert_eq!(String::from_utf8_lossy(&request.body), body);
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok());
    assert_eq!(content_type, Some("application/json"));
}

#[then(expr = "the response status is {int}")]
async fn then_response_status(world: &mut ApitermWorld, expected: u16) {
    match &world.last_completion {
        Some(apiterm::Completion::Success { status, .. }) => assert_eq!(*status, expected),
        other => panic!("expected a successful response, got {other:?}"),
    }
}

#[then("the response is an error")]
async fn then_response_error(world: &mut ApitermWorld) {
    let completion = world.last_completion.as_ref().expect("a response arrived");
    assert!(completion.is_error(), "expected an error, got {completion:?}");
}
