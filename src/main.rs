//! Scripted replay of dropzone interactions.
//!
//! `dropzone-replay <script.json>` drives a [`Dropzone`] over a
//! [`HeadlessHost`] and prints what happened as JSON: the callbacks in the
//! order they fired, the final view and a summary of the host side effects.
//!
//! # Script format
//!
//! ```json
//! {
//!   "config": { "accept": "image/*", "multiple": false },
//!   "root": "zone",
//!   "nodes": [["label", "zone"]],
//!   "steps": [
//!     { "event": { "drag_enter": { "target": "label", "files": [{ "type": "image/png" }] } } },
//!     { "event": { "drop": { "target": "label", "files": [{ "name": "a.png", "size": 10, "type": "image/png" }] } } },
//!     { "event": "click" },
//!     { "advance": { "ms": 0 } },
//!     { "event": "window_focus" },
//!     { "advance": { "ms": 300 } }
//!   ]
//! }
//! ```
//!
//! The zone is mounted on `root` before the first step. `select` puts files
//! into the native input and delivers the matching change event; `focus_after`
//! models the host focusing the window first.

use dropzone::app::{Callbacks, Dropzone, Event};
use dropzone::host::HeadlessHost;
use dropzone::observability::init_tracing;
use dropzone::registry::ListenerRegistry;
use dropzone::{Config, DropzoneError, FileDescriptor, Result};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    config: Config,
    root: String,
    #[serde(default)]
    nodes: Vec<(String, String)>,
    #[serde(default)]
    host: HostOptions,
    /// Registers an `on_file_dialog_cancel` callback. Default: `true`
    #[serde(default = "default_true")]
    cancel_callback: bool,
    steps: Vec<Step>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostOptions {
    restrict_drop_effect: bool,
    fail_previews: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    Event(Event<String>),
    Select {
        files: Vec<FileDescriptor>,
        #[serde(default)]
        focus_after: bool,
    },
    Open,
    Advance {
        ms: u64,
    },
}

const fn default_true() -> bool {
    true
}

type Log = Rc<RefCell<Vec<JsonValue>>>;

fn names(files: &[FileDescriptor]) -> Vec<&str> {
    files.iter().map(|file| file.name.as_str()).collect()
}

fn logging_callbacks(log: &Log, cancel_callback: bool) -> Callbacks<String> {
    let entry = |name: &'static str| {
        let log = Rc::clone(log);
        move |event: &Event<String>| log.borrow_mut().push(json!({ "callback": name, "event": event.name() }))
    };

    let drop_log = Rc::clone(log);
    let accepted_log = Rc::clone(log);
    let rejected_log = Rc::clone(log);

    let callbacks = Callbacks::new()
        .on_drag_start(entry("drag_start"))
        .on_drag_enter(entry("drag_enter"))
        .on_drag_over(entry("drag_over"))
        .on_drag_leave(entry("drag_leave"))
        .on_click(entry("click"))
        .on_drop(move |accepted, rejected, event| {
            drop_log.borrow_mut().push(json!({
                "callback": "drop",
                "event": event.name(),
                "accepted": names(accepted),
                "rejected": names(rejected),
            }));
        })
        .on_drop_accepted(move |files, _| {
            accepted_log
                .borrow_mut()
                .push(json!({ "callback": "drop_accepted", "files": names(files) }));
        })
        .on_drop_rejected(move |files, _| {
            rejected_log
                .borrow_mut()
                .push(json!({ "callback": "drop_rejected", "files": names(files) }));
        });

    if cancel_callback {
        let cancel_log = Rc::clone(log);
        callbacks.on_file_dialog_cancel(move || {
            cancel_log.borrow_mut().push(json!({ "callback": "file_dialog_cancel" }));
        })
    } else {
        callbacks
    }
}

fn replay(script: Script) -> Result<JsonValue> {
    let log: Log = Rc::default();
    let callbacks = logging_callbacks(&log, script.cancel_callback);
    let mut zone = Dropzone::with_registry(script.config, callbacks, ListenerRegistry::new());

    let mut host = HeadlessHost::new();
    if script.host.restrict_drop_effect {
        host = host.with_restricted_drop_effect();
    }
    if script.host.fail_previews {
        host = host.with_failing_previews();
    }
    for (child, parent) in script.nodes {
        host.add_node(child, parent);
    }

    let mut renders = usize::from(host.dispatch(&mut zone, &Event::Mount { root: script.root })?);

    for (index, step) in script.steps.into_iter().enumerate() {
        let _span = tracing::debug_span!("replay_step", index).entered();
        let rendered = match step {
            Step::Event(event) => host.dispatch(&mut zone, &event)?,
            Step::Select { files, focus_after } => {
                host.select_files(files.clone());
                let mut rendered = false;
                if focus_after {
                    rendered |= host.dispatch(&mut zone, &Event::WindowFocus)?;
                }
                rendered | host.dispatch(&mut zone, &Event::InputChange { files })?
            }
            Step::Open => {
                let actions = zone.open();
                host.apply(&actions)?;
                !actions.is_empty()
            }
            Step::Advance { ms } => host.advance(&mut zone, Duration::from_millis(ms))?,
        };
        renders += usize::from(rendered);
    }

    let callbacks = log.borrow().clone();
    Ok(json!({
        "callbacks": callbacks,
        "renders": renders,
        "view": zone.view(),
        "input": zone.input_attributes(),
        "host": {
            "prevented": host.prevented(),
            "propagation_stops": host.propagation_stops(),
            "picker_opens": host.picker_opens(),
            "listeners": host.attached_listeners(),
            "live_previews": host.live_previews().len(),
            "elapsed_ms": u64::try_from(host.now().as_millis()).unwrap_or(u64::MAX),
        },
    }))
}

fn validate_tree(nodes: &[(String, String)]) -> Result<()> {
    let mut tree = HeadlessHost::new();
    for (child, parent) in nodes {
        tree.add_node(child.as_str(), parent.as_str());
    }
    match tree.cyclic_node() {
        Some(node) => Err(DropzoneError::Config(format!("node '{node}' is its own ancestor"))),
        None => Ok(()),
    }
}

fn load_script(path: &Path) -> Result<Script> {
    let source = std::fs::read_to_string(path)?;
    let script: Script = serde_json::from_str(&source)?;
    script.config.validate()?;
    validate_tree(&script.nodes)?;
    Ok(script)
}

fn run() -> Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .ok_or_else(|| DropzoneError::Config("usage: dropzone-replay <script.json>".to_string()))?;

    let script = load_script(Path::new(&path))?;
    init_tracing(&script.config);
    tracing::debug!(path = ?path, steps = script.steps.len(), "replaying script");

    let output = replay(script)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("dropzone-replay: {e}");
        std::process::exit(1);
    }
}
