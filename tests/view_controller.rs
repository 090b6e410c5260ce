//! View-controller behaviour: state transitions, banner timing, tab switches
//! during a request, copy-to-clipboard.
//!
//! Timer tests run on tokio's paused clock, so the 5 s banner delay costs
//! nothing. The HTTP scenarios at the bottom use a mock endpoint.

use paper_explainer::submission::PDF_MEDIA_TYPE;
use paper_explainer::{
    Clipboard, ClipboardError, ExplainerConfig, ExplainerError, HttpTransport, Key, KeyChord,
    MemoryClipboard, Phase, Submission, Tab, Transport, UiEvent, UploadFile, ViewController,
    ViewObserver, ViewState,
};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Test helpers ─────────────────────────────────────────────────────────────

type Reply = Result<String, ExplainerError>;

/// Transport whose replies are released by the test, one per request.
#[derive(Clone, Default)]
struct ScriptedTransport {
    pending: Arc<Mutex<VecDeque<oneshot::Receiver<Reply>>>>,
    seen: Arc<Mutex<Vec<Submission>>>,
}

impl ScriptedTransport {
    /// Queue a reply slot for the next request.
    fn expect_request(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push_back(rx);
        tx
    }

    fn seen(&self) -> Vec<Submission> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn summarize(&self, submission: Submission) -> impl Future<Output = Reply> + Send {
        self.seen.lock().unwrap().push(submission);
        let slot = self.pending.lock().unwrap().pop_front();
        async move {
            match slot {
                Some(rx) => rx.await.unwrap_or_else(|_| {
                    Err(ExplainerError::TransportError {
                        reason: "reply dropped".into(),
                    })
                }),
                None => Err(ExplainerError::TransportError {
                    reason: "unexpected request".into(),
                }),
            }
        }
    }
}

struct FailingClipboard;

impl Clipboard for FailingClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Write(std::io::Error::other("denied")))
    }
}

#[derive(Default)]
struct RecordingObserver {
    states: Mutex<Vec<ViewState>>,
    rendered: Mutex<Vec<String>>,
    copied: Mutex<Vec<String>>,
}

impl ViewObserver for RecordingObserver {
    fn on_state_changed(&self, state: &ViewState) {
        self.states.lock().unwrap().push(state.clone());
    }

    fn on_summary_rendered(&self, markup: &str) {
        self.rendered.lock().unwrap().push(markup.to_string());
    }

    fn on_copied(&self, text: &str) {
        self.copied.lock().unwrap().push(text.to_string());
    }
}

fn text_controller(
    transport: ScriptedTransport,
) -> ViewController<ScriptedTransport, MemoryClipboard> {
    let mut c = ViewController::new(ExplainerConfig::default(), transport, MemoryClipboard::new());
    c.dispatch(UiEvent::SelectTab(Tab::Text));
    c.dispatch(UiEvent::TextEdited("pancreatic cancer screening".into()));
    c
}

// ── Success / failure ────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn plain_summary_renders_one_paragraph() {
    let transport = ScriptedTransport::default();
    let reply = transport.expect_request();
    let observer = Arc::new(RecordingObserver::default());
    let mut c = text_controller(transport.clone()).with_observer(observer.clone());

    c.dispatch(UiEvent::Submit);
    assert!(c.state().loading);
    assert!(!c.state().result_visible);
    assert_eq!(c.state().phase, Phase::Submitting);

    reply.send(Ok("plain text".into())).unwrap();
    c.settle().await;

    assert!(!c.state().loading);
    assert!(c.state().result_visible);
    assert_eq!(c.state().phase, Phase::Success);
    assert_eq!(c.summary_markup(), Some("<p>plain text</p>"));
    assert_eq!(
        observer.rendered.lock().unwrap().as_slice(),
        ["<p>plain text</p>"]
    );
    assert_eq!(
        transport.seen(),
        vec![Submission::text("pancreatic cancer screening")]
    );

    // Loading and results are never visible together.
    for s in observer.states.lock().unwrap().iter() {
        assert!(!(s.loading && s.result_visible), "bad state: {s:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn server_error_shows_banner_for_five_seconds() {
    let transport = ScriptedTransport::default();
    let reply = transport.expect_request();
    let mut c = text_controller(transport);

    c.dispatch(UiEvent::Submit);
    reply
        .send(Err(ExplainerError::ServerError { status: 500 }))
        .unwrap();
    c.settle().await;

    let banner = c.state().error_message.clone().expect("banner shown");
    assert!(banner.contains("500"), "banner: {banner}");
    assert!(!c.state().result_visible);
    assert!(!c.state().loading);
    assert_eq!(c.state().phase, Phase::Failure);

    let start = Instant::now();
    assert!(c.step().await);
    assert!(start.elapsed() >= Duration::from_secs(5));
    assert!(c.state().error_message.is_none());
    assert!(!c.state().result_visible);
    assert_eq!(c.state().phase, Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn application_error_message_is_shown() {
    let transport = ScriptedTransport::default();
    let reply = transport.expect_request();
    let mut c = text_controller(transport);

    c.dispatch(UiEvent::Submit);
    reply
        .send(Err(ExplainerError::ApplicationError {
            message: "unsupported file".into(),
        }))
        .unwrap();
    c.settle().await;

    assert_eq!(
        c.state().error_message.as_deref(),
        Some("Failed to process: unsupported file")
    );
}

#[tokio::test(start_paused = true)]
async fn newer_error_is_not_cleared_by_older_timer() {
    let mut c = ViewController::new(
        ExplainerConfig::default(),
        ScriptedTransport::default(),
        MemoryClipboard::new(),
    );
    let start = Instant::now();

    c.dispatch(UiEvent::Submit); // no file: banner #1
    tokio::task::yield_now().await; // let the banner timer start
    tokio::time::advance(Duration::from_secs(3)).await;
    c.dispatch(UiEvent::SelectTab(Tab::Text));
    c.dispatch(UiEvent::Submit); // blank topic: banner #2
    assert_eq!(
        c.state().error_message.as_deref(),
        Some("Please enter some text to analyze")
    );

    c.step().await; // banner #1 timer at 5 s
    assert!(c.state().error_message.is_some());

    c.step().await; // banner #2 timer at 8 s
    assert!(c.state().error_message.is_none());
    assert!(start.elapsed() >= Duration::from_secs(8));
}

// ── In-flight behaviour ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn tab_switch_does_not_cancel_request() {
    let transport = ScriptedTransport::default();
    let reply = transport.expect_request();
    let mut c = text_controller(transport.clone());

    c.dispatch(UiEvent::Submit);
    c.dispatch(UiEvent::SelectTab(Tab::Pdf));
    assert!(c.state().loading);
    assert_eq!(c.state().active_tab, Tab::Pdf);

    reply.send(Ok("### Result\nbody".into())).unwrap();
    c.settle().await;

    assert!(c.state().result_visible);
    assert_eq!(c.state().active_tab, Tab::Pdf);
    assert_eq!(c.summary_markup(), Some("<h3>Result</h3>\nbody"));
    assert_eq!(transport.seen().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn tab_switch_clears_error() {
    let mut c = ViewController::new(
        ExplainerConfig::default(),
        ScriptedTransport::default(),
        MemoryClipboard::new(),
    );
    c.dispatch(UiEvent::Submit);
    assert!(c.state().error_message.is_some());
    c.dispatch(UiEvent::SelectTab(Tab::Text));
    assert!(c.state().error_message.is_none());
}

#[tokio::test(start_paused = true)]
async fn submit_is_ignored_while_loading() {
    let transport = ScriptedTransport::default();
    let reply = transport.expect_request();
    let mut c = text_controller(transport.clone());

    c.dispatch(UiEvent::Submit);
    c.dispatch(UiEvent::Submit);
    c.dispatch(UiEvent::Key(KeyChord::meta(Key::Enter)));
    assert!(c.is_pending());

    reply.send(Ok("done".into())).unwrap();
    c.settle().await;
    assert_eq!(transport.seen().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn pdf_submission_sends_chosen_file() {
    let transport = ScriptedTransport::default();
    let reply = transport.expect_request();
    let mut c = ViewController::new(ExplainerConfig::default(), transport.clone(), MemoryClipboard::new());

    let file = UploadFile::new("trial.pdf", PDF_MEDIA_TYPE, b"%PDF-1.6".to_vec());
    c.dispatch(UiEvent::FileChosen(file.clone()));
    c.dispatch(UiEvent::Key(KeyChord::ctrl(Key::Enter)));
    reply.send(Ok("ok".into())).unwrap();
    c.settle().await;

    assert_eq!(transport.seen(), vec![Submission::Pdf(file)]);
}

#[tokio::test(start_paused = true)]
async fn oversize_file_is_rejected() {
    let mut c = ViewController::new(
        ExplainerConfig::default(),
        ScriptedTransport::default(),
        MemoryClipboard::new(),
    );
    let mut file = UploadFile::new("huge.pdf", PDF_MEDIA_TYPE, b"%PDF".to_vec());
    file.size = 50 * 1024 * 1024 + 1;
    c.dispatch(UiEvent::FileChosen(file));

    assert!(c.state().selected_file.is_none());
    assert_eq!(
        c.state().error_message.as_deref(),
        Some("File size must be less than 50MB")
    );
}

// ── Clipboard ────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn copy_writes_plain_text_and_shows_feedback() {
    let transport = ScriptedTransport::default();
    let reply = transport.expect_request();
    let clipboard = MemoryClipboard::new();
    let observer = Arc::new(RecordingObserver::default());
    let mut c = ViewController::new(ExplainerConfig::default(), transport, clipboard.clone())
        .with_observer(observer.clone());
    c.dispatch(UiEvent::SelectTab(Tab::Text));
    c.dispatch(UiEvent::TextEdited("melanoma".into()));
    c.dispatch(UiEvent::Submit);
    reply
        .send(Ok("## Key Findings\n\n- **Immunotherapy** helps".into()))
        .unwrap();
    c.settle().await;

    c.dispatch(UiEvent::Copy);
    let expected = "Key Findings\n\n• Immunotherapy helps";
    assert_eq!(clipboard.contents().as_deref(), Some(expected));
    assert!(c.state().copy_feedback);
    assert_eq!(observer.copied.lock().unwrap().as_slice(), [expected]);

    let start = Instant::now();
    c.step().await;
    assert!(!c.state().copy_feedback);
    assert!(start.elapsed() >= Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn copy_failure_shows_banner() {
    let transport = ScriptedTransport::default();
    let reply = transport.expect_request();
    let mut c = ViewController::new(ExplainerConfig::default(), transport, FailingClipboard);
    c.dispatch(UiEvent::SelectTab(Tab::Text));
    c.dispatch(UiEvent::TextEdited("sarcoma".into()));
    c.dispatch(UiEvent::Submit);
    reply.send(Ok("summary".into())).unwrap();
    c.settle().await;

    c.dispatch(UiEvent::Copy);
    assert_eq!(
        c.state().error_message.as_deref(),
        Some("Failed to copy to clipboard")
    );
    assert!(!c.state().copy_feedback);
    assert!(c.state().result_visible);
}

// ── Against a mock endpoint ──────────────────────────────────────────────────

fn http_controller(server: &MockServer) -> ViewController<HttpTransport, MemoryClipboard> {
    let config = ExplainerConfig::builder()
        .endpoint(format!("{}/summarize", server.uri()))
        .error_display(Duration::from_millis(100))
        .build()
        .unwrap();
    let transport = HttpTransport::new(&config).unwrap();
    let mut c = ViewController::new(config, transport, MemoryClipboard::new());
    c.dispatch(UiEvent::SelectTab(Tab::Text));
    c.dispatch(UiEvent::TextEdited("colorectal cancer".into()));
    c
}

#[tokio::test]
async fn http_summary_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "summary": "plain text" })),
        )
        .mount(&server)
        .await;

    let mut c = http_controller(&server);
    c.dispatch(UiEvent::Submit);
    c.settle().await;

    assert_eq!(c.summary_markup(), Some("<p>plain text</p>"));
    assert!(c.state().result_visible);
    assert!(!c.state().loading);
}

#[tokio::test]
async fn http_500_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut c = http_controller(&server);
    c.dispatch(UiEvent::Submit);
    c.settle().await;

    assert_eq!(
        c.state().error_message.as_deref(),
        Some("Failed to process: Server error: 500")
    );
    assert!(!c.state().result_visible);

    c.step().await;
    assert!(c.state().error_message.is_none());
    assert!(!c.state().result_visible);
}

#[tokio::test]
async fn http_application_error_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "error": "unsupported file" })),
        )
        .mount(&server)
        .await;

    let mut c = http_controller(&server);
    c.dispatch(UiEvent::Submit);
    c.settle().await;

    let banner = c.state().error_message.clone().unwrap_or_default();
    assert!(banner.contains("unsupported file"), "banner: {banner}");
    assert!(!c.state().result_visible);
}
