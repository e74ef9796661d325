mod common;

use common::{runtime, secs, RecordingPanel};
use scene_core::{OverlayState, OverlayTransition, SceneError, TransitionConfig, TransitionSignal};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn default_timeline_matches_the_entry_sequence() {
    let mut ov = OverlayTransition::default();
    ov.on_progress();
    ov.on_load_complete(secs(10.0));
    assert_eq!(ov.state(), OverlayState::FadingOut);

    assert!(ov.update(secs(10.9)).is_empty());
    assert!(ov.loader_visible());

    assert_eq!(ov.update(secs(11.0)).as_slice(), &[TransitionSignal::LoaderHidden]);
    assert!(!ov.loader_visible());
    assert_eq!(ov.alpha(), 1.0);

    assert_eq!(ov.update(secs(11.5)).as_slice(), &[TransitionSignal::FadeStarted]);
    assert_eq!(ov.alpha(), 1.0);

    assert_eq!(ov.update(secs(12.0)).as_slice(), &[TransitionSignal::PanelDue]);
    // quadratic ease-out, one third of the way through
    assert!(approx(ov.alpha(), 1.0 - (1.0 - (2.0f32 / 3.0).powi(2))));

    assert!(approx(
        {
            ov.update(secs(12.25));
            ov.alpha()
        },
        0.25
    ));

    assert_eq!(ov.update(secs(13.0)).as_slice(), &[TransitionSignal::Transparent]);
    assert_eq!(ov.alpha(), 0.0);
    assert_eq!(ov.state(), OverlayState::Transparent);
    assert!(ov.update(secs(20.0)).is_empty());
}

#[test]
fn late_frame_fires_everything_in_order() {
    let mut ov = OverlayTransition::default();
    ov.on_load_complete(secs(0.0));
    assert_eq!(
        ov.update(secs(5.0)).as_slice(),
        &[
            TransitionSignal::LoaderHidden,
            TransitionSignal::FadeStarted,
            TransitionSignal::PanelDue,
            TransitionSignal::Transparent,
        ]
    );
}

#[test]
fn state_never_regresses_and_alpha_never_rises() {
    let mut ov = OverlayTransition::default();
    let mut last_state = ov.state();
    let mut last_alpha = ov.alpha();
    for step in 0..400 {
        let t = secs(step as f32 * 0.0125);
        if step == 40 {
            ov.on_load_complete(t);
        }
        if step == 120 {
            // a second completion is ignored
            ov.on_load_complete(t);
        }
        ov.update(t);
        assert!(ov.state() >= last_state);
        assert!(ov.alpha() <= last_alpha + f32::EPSILON);
        assert!((0.0..=1.0).contains(&ov.alpha()));
        last_state = ov.state();
        last_alpha = ov.alpha();
    }
    assert_eq!(ov.state(), OverlayState::Transparent);
}

#[test]
fn panel_and_fade_timers_are_independent() {
    let mut ov = OverlayTransition::default();
    ov.on_load_complete(secs(0.0));
    assert!(ov.cancel_fade());
    let mut fired = Vec::new();
    for step in 0..=40 {
        fired.extend(ov.update(secs(step as f32 * 0.1)));
    }
    assert!(fired.contains(&TransitionSignal::PanelDue));
    assert!(!fired.contains(&TransitionSignal::FadeStarted));
    assert_eq!(ov.alpha(), 1.0);

    let mut ov = OverlayTransition::default();
    ov.on_load_complete(secs(0.0));
    assert!(ov.cancel_panel());
    let fired = ov.update(secs(4.0));
    assert!(!fired.contains(&TransitionSignal::PanelDue));
    assert_eq!(ov.state(), OverlayState::Transparent);
}

#[test]
fn timings_are_configurable() {
    let mut ov = OverlayTransition::new(TransitionConfig {
        hold_sec: 0.0,
        fade_delay_sec: 0.0,
        fade_duration_sec: 0.5,
        panel_delay_sec: 0.25,
    });
    ov.on_load_complete(secs(1.0));
    let fired = ov.update(secs(1.0));
    assert_eq!(
        fired.as_slice(),
        &[TransitionSignal::LoaderHidden, TransitionSignal::FadeStarted]
    );
    assert_eq!(ov.update(secs(1.25)).as_slice(), &[TransitionSignal::PanelDue]);
    assert_eq!(ov.update(secs(1.5)).as_slice(), &[TransitionSignal::Transparent]);
}

#[test]
fn panel_is_bound_once_after_it_is_due() {
    let mut rt = runtime(640, 480);
    let mut early = RecordingPanel::default();
    assert_eq!(rt.bind_controls(&mut early).unwrap_err(), SceneError::PanelNotDue);

    rt.on_load_complete(secs(0.0));
    for t in [0.0, 1.0, 1.5, 1.99] {
        rt.frame(secs(t));
        let mut hasty = RecordingPanel::default();
        assert_eq!(
            rt.bind_controls(&mut hasty).unwrap_err(),
            SceneError::PanelNotDue,
            "bound at {}s",
            t
        );
        assert!(hasty.labels.is_empty());
    }
    assert_eq!(rt.overlay_state(), OverlayState::FadingOut);

    let out = rt.frame(secs(2.0));
    assert!(out.signals.contains(&TransitionSignal::PanelDue));
    assert!(rt.overlay().panel_due());

    let mut panel = RecordingPanel::default();
    assert_eq!(rt.bind_controls(&mut panel).unwrap(), 5);
    assert_eq!(
        panel.labels,
        vec![
            "color",
            "OnDirectionalLight",
            "directionalLight",
            "OnPointLight",
            "pointLight"
        ]
    );
    assert_eq!(panel.seeded_toggle("OnDirectionalLight"), Some(false));
    assert_eq!(panel.seeded_toggle("OnPointLight"), Some(true));

    let mut again = RecordingPanel::default();
    assert_eq!(
        rt.bind_controls(&mut again).unwrap_err(),
        SceneError::BinderAlreadyConstructed
    );
    assert!(again.labels.is_empty());
}

#[test]
fn teardown_cancels_pending_timers_and_stops_the_loop() {
    let mut rt = runtime(640, 480);
    rt.on_load_complete(secs(0.0));
    rt.frame(secs(0.5));
    rt.teardown();
    let out = rt.frame(secs(5.0));
    assert_eq!(out.control, scene_core::LoopControl::Stop);
    assert!(out.signals.is_empty());
    assert_eq!(rt.overlay().alpha(), 1.0);
    assert_eq!(rt.context().device.draws.len(), 1);
}

#[test]
fn teardown_freezes_a_running_fade() {
    let mut rt = runtime(640, 480);
    rt.on_load_complete(secs(0.0));
    let out = rt.frame(secs(2.0));
    assert!(out.signals.contains(&TransitionSignal::FadeStarted));
    let alpha = rt.overlay().alpha();
    assert!(alpha < 1.0 && alpha > 0.0);

    rt.teardown();
    let out = rt.frame(secs(5.0));
    assert!(!out.signals.contains(&TransitionSignal::Transparent));
    assert_eq!(rt.overlay().alpha(), alpha);
    assert_eq!(rt.overlay_state(), OverlayState::FadingOut);
}

#[test]
fn panel_is_not_due_after_cancelled_timer() {
    let mut ov = OverlayTransition::default();
    ov.on_load_complete(secs(0.0));
    ov.cancel_panel();
    ov.update(secs(10.0));
    assert!(!ov.panel_due());
}
