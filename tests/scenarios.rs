//! End-to-end interaction scenarios driven through the headless host.

use dropzone::app::{Action, Callbacks, Dropzone, Event, InteractionPhase, Timer};
use dropzone::host::{DropEffect, HeadlessHost};
use dropzone::registry::{ListenerKind, ListenerRegistry};
use dropzone::{Config, FileDescriptor};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

type Log = Rc<RefCell<Vec<String>>>;

fn file(name: &str, size: u64, mime: &str) -> FileDescriptor {
    FileDescriptor::new(name, size, mime)
}

fn names(files: &[FileDescriptor]) -> String {
    files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>().join(",")
}

fn recording_callbacks(log: &Log) -> Callbacks<String> {
    let hook = |label: &'static str| {
        let log = Rc::clone(log);
        move |_: &Event<String>| log.borrow_mut().push(label.to_string())
    };
    let (drop_log, accepted_log, rejected_log, cancel_log) =
        (Rc::clone(log), Rc::clone(log), Rc::clone(log), Rc::clone(log));

    Callbacks::new()
        .on_drag_start(hook("drag_start"))
        .on_drag_enter(hook("drag_enter"))
        .on_drag_over(hook("drag_over"))
        .on_drag_leave(hook("drag_leave"))
        .on_click(hook("click"))
        .on_drop(move |accepted, rejected, _| {
            drop_log
                .borrow_mut()
                .push(format!("drop [{}] [{}]", names(accepted), names(rejected)));
        })
        .on_drop_accepted(move |files, _| accepted_log.borrow_mut().push(format!("accepted [{}]", names(files))))
        .on_drop_rejected(move |files, _| rejected_log.borrow_mut().push(format!("rejected [{}]", names(files))))
        .on_file_dialog_cancel(move || cancel_log.borrow_mut().push("cancel".to_string()))
}

struct Harness {
    host: HeadlessHost,
    zone: Dropzone<String>,
    log: Log,
    registry: ListenerRegistry,
}

impl Harness {
    fn new(config: Config) -> Self {
        Self::with_host(config, HeadlessHost::new(), ListenerRegistry::new())
    }

    fn with_host(config: Config, mut host: HeadlessHost, registry: ListenerRegistry) -> Self {
        host.add_node("label", "zone").add_node("icon", "label").add_node("zone", "body");
        let log: Log = Rc::default();
        let mut zone = Dropzone::with_registry(config, recording_callbacks(&log), registry.clone());
        host.dispatch(&mut zone, &Event::Mount { root: "zone".to_string() }).unwrap();
        Self { host, zone, log, registry }
    }

    fn send(&mut self, event: Event<String>) -> bool {
        self.host.dispatch(&mut self.zone, &event).unwrap()
    }

    fn advance(&mut self, ms: u64) -> bool {
        self.host.advance(&mut self.zone, Duration::from_millis(ms)).unwrap()
    }

    fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

fn enter(target: &str, files: Vec<FileDescriptor>) -> Event<String> {
    Event::DragEnter { target: target.to_string(), files }
}

fn leave(target: &str) -> Event<String> {
    Event::DragLeave { target: target.to_string() }
}

fn drop_on(target: &str, files: Vec<FileDescriptor>) -> Event<String> {
    Event::Drop { target: target.to_string(), files }
}

#[test]
fn oversized_file_is_rejected_in_multiple_mode() {
    let mut h = Harness::new(Config {
        max_size: Some(100),
        ..Config::default()
    });

    h.send(drop_on(
        "zone",
        vec![file("1.png", 10, "image/png"), file("2.png", 500, "image/png"), file("3.png", 20, "image/png")],
    ));

    assert_eq!(
        h.log(),
        vec!["drop [1.png,3.png] [2.png]", "rejected [2.png]", "accepted [1.png,3.png]"]
    );
    assert_eq!(names(h.zone.accepted_files()), "1.png,3.png");
    assert_eq!(names(h.zone.rejected_files()), "2.png");
}

#[test]
fn single_mode_keeps_first_file_only() {
    let mut h = Harness::new(Config {
        multiple: false,
        ..Config::default()
    });

    h.send(drop_on("zone", vec![file("1.txt", 1, "text/plain"), file("2.txt", 1, "text/plain")]));

    assert_eq!(names(h.zone.accepted_files()), "1.txt");
    assert_eq!(names(h.zone.rejected_files()), "2.txt");
}

#[test]
fn cancelled_dialog_fires_cancel_exactly_once() {
    let mut h = Harness::new(Config::default());

    h.send(Event::Click);
    assert!(!h.zone.is_file_dialog_active());
    h.advance(0);
    assert!(h.zone.is_file_dialog_active());
    assert_eq!(h.host.picker_opens(), 1);

    h.send(Event::WindowFocus);
    h.advance(299);
    assert!(h.zone.is_file_dialog_active());
    assert!(h.advance(1));

    assert!(!h.zone.is_file_dialog_active());
    h.send(Event::WindowFocus);
    h.advance(1_000);
    assert_eq!(h.log(), vec!["click", "cancel"]);
}

#[test]
fn disabled_zone_ignores_every_interaction() {
    let mut h = Harness::new(Config {
        disabled: true,
        ..Config::default()
    });

    let files = vec![file("a.png", 1, "image/png")];
    assert!(!h.send(enter("zone", files.clone())));
    h.send(Event::DragOver { target: "zone".to_string() });
    h.send(leave("zone"));
    h.send(drop_on("zone", files.clone()));
    h.send(Event::InputChange { files });
    h.send(Event::Click);
    h.advance(1_000);

    assert!(h.log().is_empty());
    assert!(h.zone.open().is_empty());
    assert!(h.zone.view().is_disabled);
    assert_eq!(h.host.picker_opens(), 0);
}

#[test]
fn nested_targets_keep_the_drag_active() {
    let mut h = Harness::new(Config::default());
    let files = vec![FileDescriptor::typed("image/png")];

    h.send(enter("zone", files.clone()));
    h.send(enter("label", files.clone()));
    h.send(enter("icon", files.clone()));
    assert!(!h.send(leave("zone")));
    assert!(!h.send(leave("label")));
    assert!(h.zone.is_drag_active());
    assert_eq!(h.zone.dragged_files().len(), 1);

    assert!(h.send(leave("icon")));
    assert!(!h.zone.is_drag_active());
    assert!(h.zone.dragged_files().is_empty());
    assert_eq!(h.zone.phase(), InteractionPhase::Idle);
    assert_eq!(h.log(), vec!["drag_enter", "drag_enter", "drag_enter", "drag_leave"]);
}

#[test]
fn repeated_enter_of_the_same_target_is_counted_once() {
    let mut h = Harness::new(Config::default());

    h.send(enter("label", vec![]));
    h.send(enter("label", vec![]));
    h.send(leave("label"));

    assert!(!h.zone.is_drag_active());
}

#[test]
fn drag_feedback_tracks_accept_pattern() {
    let mut h = Harness::new(Config {
        accept: Some("image/*".to_string()),
        ..Config::default()
    });

    h.send(enter("zone", vec![FileDescriptor::typed("image/png")]));
    let view = h.zone.view();
    assert!(view.is_drag_active && view.is_drag_accept && !view.is_drag_reject);

    h.send(enter("label", vec![FileDescriptor::typed("image/png"), FileDescriptor::typed("text/plain")]));
    let view = h.zone.view();
    assert!(!view.is_drag_accept);
    assert!(view.is_drag_reject);
}

#[test]
fn drop_ends_the_session_and_sets_previews() {
    let mut h = Harness::new(Config::default());

    h.send(enter("zone", vec![FileDescriptor::typed("image/png")]));
    h.send(drop_on("icon", vec![file("a.png", 3, "image/png")]));

    assert!(!h.zone.is_drag_active());
    assert!(h.zone.dragged_files().is_empty());
    assert!(h.zone.accepted_files()[0].preview.is_some());
    assert_eq!(h.zone.live_previews().len(), 1);
    assert_eq!(h.host.live_previews().len(), 1);
}

#[test]
fn preview_failure_does_not_block_classification() {
    let mut h = Harness::with_host(
        Config::default(),
        HeadlessHost::new().with_failing_previews(),
        ListenerRegistry::new(),
    );

    h.send(drop_on("zone", vec![file("a.png", 3, "image/png")]));

    assert_eq!(h.zone.accepted_files().len(), 1);
    assert_eq!(h.zone.accepted_files()[0].preview, None);
    assert!(h.zone.live_previews().is_empty());
}

#[test]
fn disabled_previews_are_not_created() {
    let mut h = Harness::new(Config {
        disable_preview: true,
        ..Config::default()
    });

    h.send(drop_on("zone", vec![file("a.png", 3, "image/png")]));
    assert!(h.host.live_previews().is_empty());
}

#[test]
fn refused_drop_effect_is_ignored() {
    let mut h = Harness::with_host(
        Config::default(),
        HeadlessHost::new().with_restricted_drop_effect(),
        ListenerRegistry::new(),
    );

    h.send(enter("zone", vec![]));
    let (_, actions) = {
        let Harness { host, zone, .. } = &mut h;
        zone.handle_event(host, &Event::DragOver { target: "zone".to_string() })
    };
    assert_eq!(actions, vec![Action::PreventDefault]);
    assert!(h.zone.is_drag_active());
    assert_eq!(h.log(), vec!["drag_enter", "drag_over"]);
}

#[test]
fn drag_over_requests_copy_effect() {
    let mut h = Harness::new(Config::default());
    assert_eq!(h.host.drop_effect(), DropEffect::None);

    h.send(enter("zone", vec![FileDescriptor::typed("image/png")]));
    let before = h.host.prevented();
    assert!(!h.send(Event::DragOver { target: "label".to_string() }));

    assert_eq!(h.host.drop_effect(), DropEffect::Copy);
    assert_eq!(h.host.prevented(), before + 1);
}

#[test]
fn document_drag_over_follows_prevent_drop_option() {
    let over = Event::DocumentDragOver { target: "body".to_string() };

    let mut h = Harness::new(Config::default());
    let (render, actions) = {
        let Harness { host, zone, .. } = &mut h;
        zone.handle_event(host, &over)
    };
    assert!(!render);
    assert_eq!(actions, vec![Action::PreventDefault]);

    let mut h = Harness::new(Config {
        prevent_drop_on_document: false,
        ..Config::default()
    });
    let (render, actions) = {
        let Harness { host, zone, .. } = &mut h;
        zone.handle_event(host, &over)
    };
    assert!(!render);
    assert!(actions.is_empty());
}

#[test]
fn document_drop_clears_drag_feedback() {
    let mut h = Harness::new(Config {
        accept: Some("image/*".to_string()),
        ..Config::default()
    });

    h.send(enter("zone", vec![FileDescriptor::typed("image/png")]));
    assert!(h.zone.view().is_drag_accept);

    h.send(Event::DocumentDrop { target: "body".to_string() });
    let view = h.zone.view();
    assert!(!view.is_drag_active);
    assert!(!view.is_drag_accept);
    assert!(!view.is_drag_reject);
}

#[test]
fn document_drop_outside_the_zone_is_suppressed() {
    let mut h = Harness::new(Config::default());
    let before = h.host.prevented();

    h.send(enter("zone", vec![FileDescriptor::typed("image/png")]));
    assert!(h.send(Event::DocumentDrop { target: "body".to_string() }));
    assert!(!h.zone.is_drag_active());
    assert_eq!(h.host.prevented(), before + 2);

    let prevented = h.host.prevented();
    assert!(!h.send(Event::DocumentDrop { target: "icon".to_string() }));
    assert_eq!(h.host.prevented(), prevented);
    assert!(h.log().iter().all(|entry| !entry.starts_with("drop")));
}

#[test]
fn document_listeners_follow_prevent_drop_option() {
    let h = Harness::new(Config {
        prevent_drop_on_document: false,
        ..Config::default()
    });

    assert!(!h.host.is_attached(ListenerKind::DocumentDrop));
    assert!(!h.host.is_attached(ListenerKind::DocumentDragOver));
    assert!(h.host.is_attached(ListenerKind::WindowFocus));
}

#[test]
fn shared_listeners_attach_once_and_detach_on_last_unmount() {
    let registry = ListenerRegistry::new();
    let mut first = Harness::with_host(Config::default(), HeadlessHost::new(), registry.clone());

    let log: Log = Rc::default();
    let mut second = Dropzone::with_registry(Config::default(), recording_callbacks(&log), registry.clone());
    let (_, actions) = second.handle_event(&mut first.host, &Event::Mount { root: "other".to_string() });
    assert!(actions.is_empty());
    assert_eq!(registry.count(ListenerKind::DocumentDrop), 2);

    first.send(Event::Unmount);
    assert!(first.host.is_attached(ListenerKind::DocumentDrop));

    let (_, actions) = second.handle_event(&mut first.host, &Event::Unmount);
    first.host.apply(&actions).unwrap();
    assert!(first.host.attached_listeners().is_empty());
    assert_eq!(first.registry.count(ListenerKind::WindowFocus), 0);
}

#[test]
fn unmount_revokes_previews_and_is_idempotent() {
    let mut h = Harness::new(Config::default());
    h.send(drop_on("zone", vec![file("a.png", 1, "image/png"), file("b.png", 1, "image/png")]));
    h.send(drop_on("zone", vec![file("c.png", 1, "image/png")]));
    assert_eq!(h.host.live_previews().len(), 3);

    assert!(h.send(Event::Unmount));
    assert!(h.host.live_previews().is_empty());
    assert_eq!(h.host.revoked_previews(), 3);
    assert!(!h.zone.is_mounted());

    assert!(!h.send(Event::Unmount));
    assert_eq!(h.host.revoked_previews(), 3);
}

#[test]
fn unmount_before_deferred_open_keeps_the_picker_closed() {
    let mut h = Harness::new(Config::default());

    h.send(Event::Click);
    h.send(Event::Unmount);
    assert!(!h.advance(0));

    assert!(!h.zone.is_mounted());
    assert_eq!(h.host.picker_opens(), 0);
    assert!(!h.zone.is_file_dialog_active());
}

#[test]
fn cancel_check_after_unmount_does_not_fire() {
    let mut h = Harness::new(Config::default());

    h.send(Event::Click);
    h.advance(0);
    h.send(Event::WindowFocus);
    h.send(Event::Unmount);
    h.advance(300);

    assert!(!h.zone.is_file_dialog_active());
    assert_eq!(h.log(), vec!["click"]);
}

#[test]
fn selection_before_timeout_wins_the_race() {
    let mut h = Harness::new(Config::default());

    h.send(Event::Click);
    h.advance(0);
    h.send(Event::WindowFocus);

    let selected = vec![file("a.txt", 1, "text/plain")];
    h.host.select_files(selected.clone());
    h.send(Event::InputChange { files: selected });
    h.advance(300);

    assert!(!h.zone.is_file_dialog_active());
    assert_eq!(h.log(), vec!["click", "drop [a.txt] []", "accepted [a.txt]"]);
}

#[test]
fn pending_selection_defers_to_change_event() {
    let mut h = Harness::new(Config::default());

    h.send(Event::Click);
    h.advance(0);
    h.host.select_files(vec![file("a.txt", 1, "text/plain")]);
    h.send(Event::WindowFocus);
    h.advance(300);

    assert!(h.zone.is_file_dialog_active());
    assert!(!h.log().contains(&"cancel".to_string()));
}

#[test]
fn reopening_makes_the_earlier_check_stale() {
    let mut h = Harness::new(Config::default());

    h.send(Event::Click);
    h.advance(0);
    h.send(Event::WindowFocus);
    h.advance(100);

    h.host.apply(&h.zone.open()).unwrap();
    h.advance(250);
    assert!(h.zone.is_file_dialog_active());

    h.send(Event::WindowFocus);
    h.advance(300);
    assert_eq!(h.log().iter().filter(|e| *e == "cancel").count(), 1);
}

#[test]
fn disable_click_still_allows_programmatic_open() {
    let mut h = Harness::new(Config {
        disable_click: true,
        ..Config::default()
    });

    h.send(Event::Click);
    h.advance(0);
    assert_eq!(h.host.picker_opens(), 0);
    assert!(h.log().is_empty());

    let actions = h.zone.open();
    assert_eq!(actions, vec![Action::ResetInputValue, Action::OpenFilePicker]);
    assert!(h.zone.is_file_dialog_active());
}

#[test]
fn click_defers_opening_to_a_zero_delay_timer() {
    let mut h = Harness::new(Config::default());
    let (render, actions) = {
        let Harness { host, zone, .. } = &mut h;
        zone.handle_event(host, &Event::Click)
    };

    assert!(!render);
    assert_eq!(
        actions,
        vec![
            Action::StopPropagation,
            Action::ScheduleTimer {
                timer: Timer::OpenFileDialog,
                delay: Duration::ZERO,
            },
        ]
    );
}

#[test]
fn input_click_only_stops_propagation() {
    let mut h = Harness::new(Config::default());
    h.send(Event::InputClick);
    assert_eq!(h.host.propagation_stops(), 1);
    assert_eq!(h.host.picker_opens(), 0);
}

#[test]
fn drag_start_snapshots_files_without_preventing_default() {
    let mut h = Harness::new(Config::default());
    let before = h.host.prevented();

    h.send(Event::DragStart {
        target: "icon".to_string(),
        files: vec![FileDescriptor::typed("image/png")],
    });

    assert_eq!(h.host.prevented(), before);
    assert!(h.zone.is_drag_active());
    assert_eq!(h.log(), vec!["drag_start"]);
}

#[test]
fn input_attributes_reflect_config() {
    let mut config = Config {
        accept: Some("image/*".to_string()),
        multiple: false,
        name: Some("upload".to_string()),
        ..Config::default()
    };
    config.input_props.insert("type".to_string(), "text".to_string());
    let h = Harness::new(config);

    let attrs = h.zone.input_attributes();
    assert_eq!(attrs.get("type"), Some("file"));
    assert_eq!(attrs.get("accept"), Some("image/*"));
    assert_eq!(attrs.get("multiple"), None);
    assert_eq!(attrs.get("name"), Some("upload"));
}
