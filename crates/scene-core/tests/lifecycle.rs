mod common;

use common::{runtime, secs, RecordingDevice, RecordingPanel};
use scene_core::mesh_loader::decode_obj;
use scene_core::{
    connect_tracker, AssetLoadFailure, AssetLoadTracker, OverlayState, SceneError, SceneRuntime,
    TransitionSignal,
};
use std::cell::RefCell;
use std::rc::Rc;

const CUBE_ISH: &str = "\
o blob
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 1 3 2
f 1 2 4
f 1 4 3
f 2 3 4
";

type SharedRuntime = Rc<RefCell<SceneRuntime<RecordingDevice>>>;

fn wired(tracker: &mut AssetLoadTracker) -> SharedRuntime {
    let rt = Rc::new(RefCell::new(runtime(800, 600)));
    connect_tracker(tracker, &rt, || secs(0.0));
    rt
}

#[derive(Clone, Debug, PartialEq)]
enum Observed {
    Progress(u32, u32),
    Complete,
}

/// Run a three-asset batch where `a.obj` fails, resolving in `order`.
fn run_batch(order: [usize; 3]) -> (SharedRuntime, AssetLoadTracker, Vec<Observed>) {
    let mut tracker = AssetLoadTracker::new();
    let rt = wired(&mut tracker);

    let observed: Rc<RefCell<Vec<Observed>>> = Rc::default();
    {
        // observe alongside the runtime hooks
        let rt_progress = Rc::clone(&rt);
        let log = Rc::clone(&observed);
        tracker.on_progress(move |e| {
            log.borrow_mut()
                .push(Observed::Progress(e.items_loaded, e.items_total));
            rt_progress.borrow_mut().on_progress(e);
        });
        let rt_complete = Rc::clone(&rt);
        let log = Rc::clone(&observed);
        tracker.on_all_complete(move || {
            log.borrow_mut().push(Observed::Complete);
            rt_complete.borrow_mut().on_load_complete(secs(0.0));
        });
    }

    let mut tickets: Vec<Option<_>> = ["a.obj", "b.obj", "c.obj"]
        .into_iter()
        .map(|url| Some(tracker.register(url).unwrap()))
        .collect();
    tracker.activate();
    assert_eq!(rt.borrow().overlay_state(), OverlayState::HiddenBehindLoader);

    // attach before reporting
    for i in order {
        let ticket = tickets[i].take().unwrap();
        let url = ticket.url().to_string();
        let body = (url != "a.obj").then_some(CUBE_ISH);
        let outcome = match body.map(|b| decode_obj(&url, b.as_bytes())) {
            Some(Ok(node)) => {
                rt.borrow_mut().attach_loaded(node);
                Ok(())
            }
            Some(Err(e)) => Err(AssetLoadFailure::from(e)),
            None => Err(AssetLoadFailure::new(&url, "404")),
        };
        tracker.resolve(ticket, outcome);
    }

    let observed = observed.borrow().clone();
    (rt, tracker, observed)
}

#[test]
fn three_assets_one_failing_attach_two_and_complete_once() {
    let (rt, tracker, observed) = run_batch([2, 0, 1]);

    assert_eq!(
        observed,
        vec![
            Observed::Progress(1, 3),
            Observed::Progress(2, 3),
            Observed::Progress(3, 3),
            Observed::Complete,
        ]
    );
    assert_eq!(tracker.failures().len(), 1);
    assert_eq!(tracker.failures()[0].url, "a.obj");

    let mut rt = rt.borrow_mut();
    assert_eq!(rt.overlay_state(), OverlayState::FadingOut);
    assert_eq!(rt.context().scene.loaded().len(), 2);
    rt.frame(secs(0.1));
    let draw = rt.context().device.draws.last().unwrap().clone();
    assert_eq!(draw.loaded, 2);
    assert_eq!(draw.draw_items, 4);
}

#[test]
fn completion_follows_the_last_progress_in_any_order() {
    for order in [[0, 1, 2], [1, 2, 0], [2, 1, 0]] {
        let (rt, tracker, observed) = run_batch(order);
        let complete_at = observed
            .iter()
            .position(|o| *o == Observed::Complete)
            .unwrap();
        assert_eq!(complete_at, observed.len() - 1, "order {:?}", order);
        assert_eq!(observed[complete_at - 1], Observed::Progress(3, 3));
        assert_eq!(
            observed.iter().filter(|o| **o == Observed::Complete).count(),
            1
        );
        assert!(tracker.is_complete());
        assert_eq!(rt.borrow().context().scene.loaded().len(), 2);
    }
}

#[test]
fn empty_batch_completes_on_activation() {
    let mut tracker = AssetLoadTracker::new();
    let rt = wired(&mut tracker);
    tracker.activate();
    assert!(tracker.is_complete());
    assert_eq!(rt.borrow().overlay_state(), OverlayState::FadingOut);
    assert_eq!(tracker.items_loaded(), 0);
}

#[test]
fn registration_after_activation_is_refused() {
    let mut tracker = AssetLoadTracker::new();
    let _rt = wired(&mut tracker);
    let t = tracker.register("a.obj").unwrap();
    tracker.activate();
    assert_eq!(
        tracker.register("late.obj").unwrap_err(),
        SceneError::TrackerActivated
    );
    tracker.resolve(t, Ok(()));
    assert!(tracker.is_complete());
}

#[test]
fn no_completion_means_no_panel_ever() {
    let mut tracker = AssetLoadTracker::new();
    let rt = wired(&mut tracker);
    let pending = tracker.register("slow.obj").unwrap();
    tracker.activate();

    let mut rt = rt.borrow_mut();
    for i in 0..200 {
        let out = rt.frame(secs(i as f32 * 0.1));
        assert!(!out.signals.contains(&TransitionSignal::PanelDue));
    }
    assert_eq!(rt.overlay_state(), OverlayState::HiddenBehindLoader);
    assert_eq!(rt.overlay().alpha(), 1.0);
    let mut panel = RecordingPanel::default();
    assert_eq!(rt.bind_controls(&mut panel).unwrap_err(), SceneError::PanelNotDue);
    assert!(panel.labels.is_empty());
    drop(pending);
}

#[test]
fn activation_shows_loader_on_next_frame() {
    let mut tracker = AssetLoadTracker::new();
    let rt = wired(&mut tracker);
    let a = tracker.register("a.obj").unwrap();
    let b = tracker.register("b.obj").unwrap();
    tracker.activate();

    let out = rt.borrow_mut().frame(secs(0.0));
    assert_eq!(out.signals.as_slice(), &[TransitionSignal::LoaderShown]);
    assert!(rt.borrow().overlay().loader_visible());

    tracker.resolve(a, Ok(()));
    let out = rt.borrow_mut().frame(secs(0.1));
    assert!(out.signals.is_empty());

    tracker.resolve(b, Ok(()));
    let out = rt.borrow_mut().frame(secs(0.2));
    assert!(out.signals.is_empty());
    assert!(rt.borrow().overlay().loader_visible());
}

#[test]
fn hanging_fetch_keeps_loader_up() {
    let mut tracker = AssetLoadTracker::new();
    let rt = wired(&mut tracker);
    let _stuck = tracker.register("stuck.obj").unwrap();
    tracker.activate();

    let mut rt = rt.borrow_mut();
    let mut shown = 0;
    for i in 0..50 {
        let out = rt.frame(secs(i as f32 * 0.1));
        shown += out
            .signals
            .iter()
            .filter(|s| **s == TransitionSignal::LoaderShown)
            .count();
        assert!(!out.signals.contains(&TransitionSignal::LoaderHidden));
    }
    assert_eq!(shown, 1);
    assert!(rt.overlay().loader_visible());
    assert_eq!(rt.overlay_state(), OverlayState::HiddenBehindLoader);
    assert_eq!(rt.overlay().alpha(), 1.0);
}

#[test]
fn empty_batch_never_shows_loader() {
    let mut tracker = AssetLoadTracker::new();
    let rt = wired(&mut tracker);
    tracker.activate();
    let out = rt.borrow_mut().frame(secs(0.0));
    assert!(!out.signals.contains(&TransitionSignal::LoaderShown));
    assert!(!rt.borrow().overlay().loader_visible());
}
