//! Integration tests for the full client cycle: service calls post events,
//! the list view reconciles, and per-task state machines react.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use std::rc::Rc;
use std::sync::Arc;
use todo_client_core::backend::TodoBackend;
use todo_client_core::event::{Event, EventType};
use todo_client_core::event_bus::EventBus;
use todo_client_core::task::{TaskId, TodoListId};
use todo_client_service::TodoListService;
use todo_client_testing::{BackendCall, RecordingRenderer, RenderCall, StubBackend};
use todo_client_view::renderer::Renderer;
use todo_client_view::{Phase, TaskListView};

struct Fixture {
    bus: EventBus,
    stub: Arc<StubBackend>,
    renderer: Rc<RecordingRenderer>,
    view: TaskListView,
    service: TodoListService,
}

fn fixture() -> Fixture {
    todo_client_testing::init_tracing();
    let bus = EventBus::new();
    let stub = Arc::new(StubBackend::new());
    let renderer = Rc::new(RecordingRenderer::new());
    let view = TaskListView::new(&bus, Rc::clone(&renderer) as Rc<dyn Renderer>);
    let service = TodoListService::new(
        Arc::clone(&stub) as Arc<dyn TodoBackend>,
        bus.clone(),
        TodoListId::new("groceries").unwrap(),
    );
    Fixture {
        bus,
        stub,
        renderer,
        view,
        service,
    }
}

#[tokio::test]
async fn refresh_populates_the_view_in_display_order() {
    let f = fixture();
    let earlier = chrono::Utc::now();
    let later = earlier + chrono::Duration::seconds(60);
    let older =
        todo_client_core::task::Task::new(TaskId::new("t-old").unwrap(), "posted first", earlier)
            .unwrap();
    let newer =
        todo_client_core::task::Task::new(TaskId::new("t-new").unwrap(), "posted second", later)
            .unwrap();
    f.stub.put_tasks(vec![older, newer]);

    f.service.refresh().await.unwrap();

    assert_eq!(f.view.len(), 2);
    let ids = f.view.task_ids();
    // Most recently touched first.
    assert_eq!(ids[0].as_str(), "t-new");
    assert_eq!(ids[1].as_str(), "t-old");
}

#[tokio::test]
async fn edit_survives_an_unrelated_refresh() {
    let f = fixture();
    let edited = StubBackend::sample_task("t-edit", "under edit");
    f.stub.put_tasks(vec![edited.clone()]);
    f.service.refresh().await.unwrap();

    f.bus.post(&Event::TaskEditingStarted {
        id: edited.id.clone(),
    });
    let entry = f.view.entry(&edited.id).unwrap();
    assert!(entry.is_editing());

    // An unrelated task appears server-side and the list refreshes.
    f.stub.put_tasks(vec![
        edited.clone(),
        StubBackend::sample_task("t-other", "someone else's"),
    ]);
    f.service.refresh().await.unwrap();

    let entry = f.view.entry(&edited.id).unwrap();
    assert_eq!(f.view.len(), 2);
    assert!(entry.is_editing());
    assert_eq!(entry.draft().as_deref(), Some("under edit"));
}

#[tokio::test]
async fn confirmed_update_closes_the_edit_form() {
    let f = fixture();
    let task = StubBackend::sample_task("t-1", "original");
    f.stub.put_tasks(vec![task.clone()]);
    f.service.refresh().await.unwrap();
    f.bus.post(&Event::TaskEditingStarted {
        id: task.id.clone(),
    });

    // The server will confirm the new description on refetch.
    let confirmed = task
        .with_description("rewritten", task.last_update_date + chrono::Duration::seconds(1))
        .unwrap();
    f.stub.put_tasks(vec![confirmed]);

    f.service.update(&task.id, "rewritten", false).await.unwrap();

    let entry = f.view.entry(&task.id).unwrap();
    assert_eq!(entry.phase(), Phase::Display);
    assert_eq!(entry.task().description, "rewritten");
}

#[tokio::test]
async fn rejected_update_keeps_the_form_open_with_the_message() {
    let f = fixture();
    let task = StubBackend::sample_task("t-1", "original");
    f.stub.put_tasks(vec![task.clone()]);
    f.service.refresh().await.unwrap();
    f.bus.post(&Event::TaskEditingStarted {
        id: task.id.clone(),
    });

    f.stub.fail_next(
        BackendCall::UpdateTask,
        todo_client_core::backend::BackendError::Status(500),
    );
    let result = f.service.update(&task.id, "rewritten", false).await;
    assert!(result.is_err());

    let entry = f.view.entry(&task.id).unwrap();
    assert!(entry.is_editing());
    assert!(matches!(
        f.renderer.last(),
        Some(RenderCall::EditRejected(id, _)) if id == task.id
    ));
}

#[tokio::test]
async fn removal_terminates_the_entry_and_cleans_the_view() {
    let f = fixture();
    let doomed = StubBackend::sample_task("t-doomed", "to be removed");
    let kept = StubBackend::sample_task("t-kept", "stays");
    f.stub.put_tasks(vec![doomed.clone(), kept.clone()]);
    f.service.refresh().await.unwrap();
    let entry = f.view.entry(&doomed.id).unwrap();

    // After the removal the server only knows the surviving task.
    f.stub.put_tasks(vec![kept.clone()]);
    f.service.remove(&doomed.id).await.unwrap();

    assert!(entry.is_terminated());
    assert_eq!(f.view.len(), 1);
    assert_eq!(f.view.task_ids()[0], kept.id);
    assert_eq!(f.renderer.destroyed_count(), 1);

    // No callback of the removed entry is still registered anywhere.
    assert_eq!(f.bus.subscriber_count(EventType::TaskEditingStarted), 1);
    assert_eq!(f.bus.subscriber_count(EventType::TaskRemoved), 1);
}

#[tokio::test]
async fn validation_failure_stops_before_the_network() {
    let f = fixture();

    let result = f.service.add("   ").await;

    assert!(result.is_err());
    assert_eq!(f.stub.calls(BackendCall::AddTask), 0);
    assert_eq!(f.stub.calls(BackendCall::AllTasks), 0);
    assert!(f.view.is_empty());
}

#[tokio::test]
async fn add_flows_through_to_the_rendered_list() {
    let f = fixture();
    // The stub's canonical list already contains what the server would
    // report after the add.
    f.stub
        .put_tasks(vec![StubBackend::sample_task("t-new", "Buy milk")]);

    let id = f.service.add("Buy milk").await.unwrap();

    assert!(!id.as_str().is_empty());
    assert_eq!(f.view.len(), 1);
    assert!(matches!(
        f.renderer.last(),
        Some(RenderCall::Display(drawn)) if drawn == TaskId::new("t-new").unwrap()
    ));
}
