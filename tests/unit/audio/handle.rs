use super::*;

#[test]
fn open_handle_plays_cues() {
    let mut audio = AudioHandle::open(RecordingToneSink::new(), 1);
    audio.cue(10, ToneCue::Click);
    audio.cue(20, ToneCue::Chime);
    assert_eq!(audio.played(), 2);
    assert_eq!(
        audio.sink().unwrap().cues(),
        vec![(10, ToneCue::Click), (20, ToneCue::Chime)]
    );
}

#[test]
fn muted_handle_plays_nothing() {
    let mut audio = AudioHandle::open(RecordingToneSink::new(), 1);
    audio.set_muted(true);
    audio.cue(10, ToneCue::Click);
    audio.play(20, &ToneSpec::chime());
    assert_eq!(audio.played(), 0);
    assert!(audio.sink().unwrap().tones.is_empty());

    assert!(!audio.toggle_muted());
    audio.cue(30, ToneCue::Chime);
    assert_eq!(audio.sink().unwrap().cues(), vec![(30, ToneCue::Chime)]);
}

#[test]
fn toggle_resumes_a_suspended_handle() {
    let mut audio = AudioHandle::open(RecordingToneSink::new(), 1);
    audio.suspend();
    assert_eq!(audio.state(), AudioState::Suspended);
    audio.cue(5, ToneCue::Click);
    assert_eq!(audio.played(), 0);

    assert!(audio.toggle_muted());
    assert_eq!(audio.state(), AudioState::Running);
    assert!(!audio.toggle_muted());
    audio.cue(6, ToneCue::Click);
    assert_eq!(audio.played(), 1);
}

#[test]
fn closed_and_unavailable_handles_are_silent() {
    let mut audio = AudioHandle::open(RecordingToneSink::new(), 1);
    audio.close();
    audio.cue(1, ToneCue::Click);
    audio.resume();
    assert_eq!(audio.state(), AudioState::Closed);
    assert_eq!(audio.played(), 0);
    assert!(audio.into_sink().unwrap().tones.is_empty());

    let mut none = AudioHandle::<RecordingToneSink>::unavailable();
    assert!(!none.is_available());
    none.cue(1, ToneCue::Chime);
    none.toggle_muted();
    assert_eq!(none.played(), 0);
}

#[test]
fn sink_failures_are_swallowed() {
    let mut audio = AudioHandle::open(RecordingToneSink::failing(), 1);
    audio.cue(1, ToneCue::Click);
    audio.cue(2, ToneCue::Chime);
    assert_eq!(audio.played(), 0);
    assert_eq!(audio.dropped(), 2);
}

#[test]
fn boxed_sinks_forward() {
    let mut audio: AudioHandle<Box<dyn ToneSink>> =
        AudioHandle::open(Box::new(RecordingToneSink::new()), 1);
    audio.cue(1, ToneCue::Chime);
    assert_eq!(audio.played(), 1);
}
