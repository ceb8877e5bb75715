//! State persistence through the plugin surface.

use tandem_core::{BlockContext, Event, OfflineHost, Plugin, RawStateCodec, StateCodec, TimedEvent};
use tandem_synth::{Synth, SynthParameter, PARAMETER_COUNT};

fn host() -> OfflineHost<Synth> {
    OfflineHost::new(Synth::new(), 44_100.0, 128)
}

#[test]
fn saved_state_is_a_flat_native_f32_array() {
    let host = host();
    let blob = host.save_state().unwrap();

    assert_eq!(blob.len(), PARAMETER_COUNT * 4);
    let values: Vec<f32> = blob
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(values, vec![50.0, 2.0, 0.0, 0.0]);
}

#[test]
fn save_then_load_on_fresh_instance_round_trips() {
    let mut source = host();
    source.plugin_mut().set_parameter_value(SynthParameter::Float.index(), 33.25);
    source.plugin_mut().set_parameter_value(SynthParameter::Int.index(), 4.0);
    source.plugin_mut().set_parameter_value(SynthParameter::Bool.index(), 1.0);
    source.plugin_mut().set_parameter_value(SynthParameter::Utf8.index(), 0.125);
    let blob = source.save_state().unwrap();

    let mut target = host();
    assert!(target.load_state(&blob).unwrap());

    for parameter in SynthParameter::ALL {
        let index = parameter.index();
        assert_eq!(
            target.plugin().parameter_value(index),
            source.plugin().parameter_value(index)
        );
        assert_eq!(
            target.plugin().control().value(index),
            source.plugin().parameter_value(index)
        );
    }
    assert_eq!(target.save_state().unwrap(), blob);
}

#[test]
fn load_emits_one_change_per_parameter() {
    let mut source = host();
    source.plugin_mut().set_parameter_value(0, 75.0);
    let blob = source.save_state().unwrap();

    let mut target = host();
    assert!(target.load_state(&blob).unwrap());
    let block = target.render(16, &[]);

    let indices: Vec<u32> = block
        .events
        .iter()
        .filter_map(|timed| timed.event.parameter_index())
        .collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(block.events.iter().all(|timed| timed.frame == 0));
}

#[test]
fn wrong_length_load_is_a_no_op() {
    let mut host = host();
    host.plugin_mut().set_parameter_value(0, 10.0);
    let before = host.save_state().unwrap();

    let mut short = before.clone();
    short.pop();
    let mut long = before.clone();
    long.extend_from_slice(&1.0f32.to_ne_bytes());

    for blob in [Vec::new(), short, long, vec![0u8; 3]] {
        assert!(!host.load_state(&blob).unwrap());
        assert_eq!(host.save_state().unwrap(), before);
        assert_eq!(host.plugin().control().value(0), 50.0);
    }

    let block = host.render(16, &[]);
    assert!(block.events.is_empty());
}

#[test]
fn integer_parameter_reads_are_always_whole() {
    let mut host = host();
    let index = SynthParameter::Int.index();

    for raw in [2.0, 2.2, 2.5, 3.49, 3.51, 4.999, 5.0, 7.0, -1.0] {
        host.plugin_mut().set_parameter_value(index, raw);
        let value = host.plugin().parameter_value(index);
        assert_eq!(value, value.round());
        assert!((2.0..=5.0).contains(&value));
    }
}

#[test]
fn normalise_and_denormalise_are_inverse_for_every_parameter() {
    let host = host();
    let plugin = host.plugin();

    for index in 0..plugin.parameter_count() as u32 {
        let (min, max) = plugin.parameter_range(index).unwrap();
        for step in 0..=100 {
            let x = min + (max - min) * f64::from(step) / 100.0;
            let back = plugin.denormalise(index, plugin.normalise(index, x));
            approx::assert_abs_diff_eq!(back, x, epsilon = 1e-9);
        }
    }
}

#[test]
fn split_control_half_saves_host_automation() {
    let (mut processor, mut control) = Synth::new().split();
    processor.prepare(44_100.0, 64);
    let index = SynthParameter::Float.index();

    let mut left = vec![0.0; 64];
    let mut right = vec![0.0; 64];
    let mut host_events = Vec::with_capacity(8);
    {
        let automation = [TimedEvent::new(3, Event::parameter(index, 90.0))];
        let mut outputs = [left.as_mut_slice(), right.as_mut_slice()];
        let mut ctx = BlockContext::new(64, &automation, &mut host_events, &mut outputs);
        processor.process(&mut ctx);
    }
    assert!(!control.is_editor_attached());

    let mut blob = Vec::new();
    control.save_state(&RawStateCodec, &mut blob).unwrap();
    let saved = RawStateCodec
        .decode(PARAMETER_COUNT, &mut blob.as_slice())
        .unwrap()
        .unwrap();
    assert_eq!(saved, processor.parameters().values());
    assert_eq!(saved[index as usize], 90.0);
}
