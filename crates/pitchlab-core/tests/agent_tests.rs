// Host-side tests for frame agents and broadcast delivery, using in-memory
// media elements in place of the DOM.

use pitchlab_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct FakeInner {
    rate: Cell<f64>,
    preserves_pitch: Cell<bool>,
    writes: Cell<usize>,
    duration: f64,
    current_time: f64,
}

#[derive(Clone)]
struct FakeMedia(Rc<FakeInner>);

impl FakeMedia {
    fn new(duration: f64, current_time: f64) -> Self {
        Self(Rc::new(FakeInner {
            rate: Cell::new(1.0),
            preserves_pitch: Cell::new(true),
            writes: Cell::new(0),
            duration,
            current_time,
        }))
    }
}

impl MediaElement for FakeMedia {
    fn playback_rate(&self) -> f64 {
        self.0.rate.get()
    }
    fn set_playback_rate(&self, rate: f64) {
        self.0.rate.set(rate);
        self.0.writes.set(self.0.writes.get() + 1);
    }
    fn disable_pitch_preservation(&self) {
        self.0.preserves_pitch.set(false);
    }
    fn duration(&self) -> f64 {
        self.0.duration
    }
    fn current_time(&self) -> f64 {
        self.0.current_time
    }
}

#[derive(Default)]
struct FakeFrame {
    media: RefCell<Vec<FakeMedia>>,
    url: Option<String>,
    shown: Cell<Option<f64>>,
}

impl MediaHost for FakeFrame {
    type Element = FakeMedia;

    fn discover(&self) -> Vec<FakeMedia> {
        self.media.borrow().clone()
    }
    fn frame_url(&self) -> Option<String> {
        self.url.clone()
    }
    fn show_rate(&self, rate: f64) {
        self.shown.set(Some(rate));
    }
}

fn frame_with(media: Vec<FakeMedia>, url: &str) -> FrameAgent<FakeFrame> {
    FrameAgent::new(FakeFrame {
        media: RefCell::new(media),
        url: Some(url.to_string()),
        shown: Cell::new(None),
    })
}

#[test]
fn set_rate_applies_to_every_element_and_disables_pitch_correction() {
    let a = FakeMedia::new(180.0, 12.0);
    let b = FakeMedia::new(60.0, 0.0);
    let mut agent = frame_with(vec![a.clone(), b.clone()], "https://www.youtube.com/watch");

    let resp = agent.handle(&Request::SetRate { rate: 1.25 }).unwrap();
    assert_eq!(
        resp,
        Response::Rate(RateAck {
            ok: true,
            rate: 1.25,
            frame_url: Some("https://www.youtube.com/watch".into()),
            media_count: Some(2),
        })
    );
    for m in [&a, &b] {
        assert_eq!(m.playback_rate(), 1.25);
        assert!(!m.0.preserves_pitch.get());
    }
    assert_eq!(agent.host().shown.get(), Some(1.25));
}

#[test]
fn out_of_range_rates_are_clamped_before_assignment() {
    let m = FakeMedia::new(10.0, 0.0);
    let mut agent = frame_with(vec![m.clone()], "https://x.bandcamp.com/");
    agent.handle(&Request::ApplyRate { value: compute_rate(-8.0, 45.0, 20.0) });
    assert_eq!(m.playback_rate(), 0.5);
    agent.handle(&Request::SetRate { rate: 9.0 });
    assert_eq!(m.playback_rate(), 1.5);
}

#[test]
fn non_finite_rate_keeps_last_valid() {
    let m = FakeMedia::new(10.0, 0.0);
    let mut agent = frame_with(vec![m.clone()], "https://x.bandcamp.com/");
    agent.set_rate(1.1);
    agent.set_rate(f64::NAN);
    assert_eq!(agent.rate(), 1.1);
    assert_eq!(m.playback_rate(), 1.1);
}

#[test]
fn nudge_moves_from_current_rate_and_clamps() {
    let m = FakeMedia::new(10.0, 0.0);
    let mut agent = frame_with(vec![m.clone()], "https://www.discogs.com/");
    agent.handle(&Request::NudgeRate { delta: 0.01 });
    assert!((agent.rate() - 1.01).abs() < 1e-12);
    for _ in 0..100 {
        agent.handle(&Request::NudgeRate { delta: 0.01 });
    }
    assert_eq!(agent.rate(), 1.5);
    assert_eq!(m.playback_rate(), 1.5);
}

#[test]
fn reapply_is_idempotent() {
    let m = FakeMedia::new(10.0, 0.0);
    let mut agent = frame_with(vec![m.clone()], "https://www.youtube.com/");
    agent.set_rate(1.2);
    agent.reapply();
    agent.reapply();
    assert_eq!(m.0.writes.get(), 1);
}

#[test]
fn late_media_picks_up_current_rate_on_reapply() {
    let mut agent = frame_with(vec![], "https://www.youtube.com/");
    assert!(agent.handle(&Request::SetRate { rate: 0.9 }).is_none());

    let late = FakeMedia::new(200.0, 3.0);
    agent.host().media.borrow_mut().push(late.clone());
    assert_eq!(agent.reapply(), 1);
    assert_eq!(late.playback_rate(), 0.9);
}

#[test]
fn frame_without_media_does_not_answer_state_query() {
    let mut agent = frame_with(vec![], "https://www.youtube.com/embed");
    assert!(agent.handle(&Request::GetState {}).is_none());
}

#[test]
fn state_query_reports_first_element() {
    let mut agent = frame_with(
        vec![FakeMedia::new(f64::NAN, 7.5), FakeMedia::new(30.0, 1.0)],
        "https://www.youtube.com/watch",
    );
    agent.set_rate(1.05);
    match agent.handle(&Request::GetState {}) {
        Some(Response::State(report)) => {
            assert!(report.ok && report.has_media);
            assert_eq!(report.rate, 1.05);
            assert_eq!(report.duration, None);
            assert_eq!(report.current_time, Some(7.5));
            assert_eq!(report.media_count, Some(2));
        }
        other => panic!("expected state report, got {other:?}"),
    }
}

#[test]
fn broadcast_reaches_every_frame_and_only_media_frames_answer() {
    let media = FakeMedia::new(100.0, 4.0);
    let mut top = frame_with(vec![], "https://www.discogs.com/release/1");
    let mut embed = frame_with(vec![media.clone()], "https://www.youtube.com/embed/abc");
    let mut ad = frame_with(vec![], "https://ads.example.com/");

    let mut frames: Vec<&mut FrameAgent<FakeFrame>> = vec![&mut top, &mut embed, &mut ad];
    let replies = fan_out(&mut frames, &Request::SetRate { rate: 1.3 });
    assert_eq!(replies.len(), 1);
    assert_eq!(media.playback_rate(), 1.3);

    let state = first_response(&mut frames, &Request::GetState {}).unwrap();
    match state {
        Response::State(report) => {
            assert_eq!(report.frame_url.as_deref(), Some("https://www.youtube.com/embed/abc"));
            assert_eq!(report.rate, 1.3);
        }
        other => panic!("expected state report, got {other:?}"),
    }
    // every frame tracked the broadcast rate, media or not
    assert_eq!(top.rate(), 1.3);
    assert_eq!(ad.rate(), 1.3);
}
