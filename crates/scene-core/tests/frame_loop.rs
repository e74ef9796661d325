mod common;

use common::{runtime, secs, DeviceCall, RecordingPanel};
use scene_core::{LoopControl, ParamField, ParamValue, Rgb, SceneError};

#[test]
fn parameter_change_is_visible_at_the_next_draw() {
    let mut rt = runtime(800, 600);
    rt.frame(secs(0.0));
    assert!(!rt.context().device.draws[0].directional_on);

    rt.store()
        .borrow_mut()
        .set("directionalLightEnabled", true)
        .unwrap();
    rt.frame(secs(0.016));
    assert!(rt.context().device.draws[1].directional_on);
}

#[test]
fn unknown_parameter_leaves_everything_alone() {
    let rt = runtime(800, 600);
    let before = rt.store().borrow().get();
    let revision = rt.store().borrow().sink().revision();
    let err = rt.store().borrow_mut().set("specular", true).unwrap_err();
    assert_eq!(err, SceneError::UnknownParameter("specular".into()));
    assert_eq!(rt.store().borrow().get(), before);
    assert_eq!(rt.store().borrow().sink().revision(), revision);
}

#[test]
fn panel_edits_flow_into_uniforms() {
    let mut rt = runtime(800, 600);
    rt.on_load_complete(secs(0.0));
    rt.frame(secs(2.0));
    let mut panel = RecordingPanel::default();
    rt.bind_controls(&mut panel).unwrap();

    panel.pick_color("color", Rgb::BLACK);
    panel.flip("OnPointLight", false);
    rt.frame(secs(2.016));

    let draw = rt.context().device.draws.last().unwrap().clone();
    assert_eq!(draw.color, [0.0, 0.0, 0.0]);
    assert!(!rt.store().borrow().get().point_light_enabled);
    assert_eq!(
        rt.store().borrow().value(ParamField::Color),
        ParamValue::Color(Rgb::BLACK)
    );
}

#[test]
fn resize_updates_camera_then_surface_then_ratio() {
    let mut rt = runtime(1024, 768);
    rt.context_mut().device.calls.clear();

    rt.resize(800, 600, 3.0);
    assert_eq!(
        rt.context().device.calls,
        vec![DeviceCall::SetSize(800, 600), DeviceCall::SetPixelRatio(2.0)]
    );
    assert!((rt.context().camera.aspect() - 800.0 / 600.0).abs() < 1e-6);

    rt.frame(secs(0.0));
    let draw = rt.context().device.draws.last().unwrap();
    assert!((draw.aspect - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn initial_viewport_is_applied_before_the_first_frame() {
    let rt = runtime(1200, 600);
    assert_eq!(
        rt.context().device.calls,
        vec![DeviceCall::SetSize(1200, 600), DeviceCall::SetPixelRatio(1.0)]
    );
    assert!((rt.context().camera.aspect() - 2.0).abs() < 1e-6);
}

#[test]
fn rotation_depends_only_on_elapsed_time() {
    let mut a = runtime(800, 600);
    let mut b = runtime(800, 600);
    for i in 0..=100 {
        a.frame(secs(i as f32 * 0.1));
    }
    b.frame(secs(10.0));
    let ra = a.context().device.draws.last().unwrap().rotation;
    let rb = b.context().device.draws.last().unwrap().rotation;
    assert!((ra[0] - rb[0]).abs() < 1e-4);
    assert!((ra[1] - rb[1]).abs() < 1e-4);
    assert!((rb[0] + 1.0).abs() < 1e-5);
    assert!((rb[1] - 2.0).abs() < 1e-5);
}

#[test]
fn loop_draws_regardless_of_overlay_and_survives_device_errors() {
    let mut rt = runtime(800, 600);
    rt.context_mut().device.fail_renders = true;
    for i in 0..10 {
        let out = rt.frame(secs(i as f32 / 60.0));
        assert_eq!(out.control, LoopControl::Continue);
    }
    assert_eq!(rt.context().device.draws.len(), 10);
    assert!(rt.context().device.draws.iter().all(|d| d.overlay_alpha == 1.0));
    assert_eq!(rt.render_loop().failed_frames(), 10);
    assert_eq!(rt.render_loop().frames(), 10);
}
