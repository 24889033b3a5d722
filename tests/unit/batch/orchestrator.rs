use std::io::Cursor;

use super::*;
use crate::batch::format::FormatField;
use crate::foundation::error::PadframeError;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn small_formats() -> FormatList {
    FormatList::new(vec![
        FormatSpec::new("sq", 40, 40, "Square"),
        FormatSpec::new("pt", 36, 44, "Portrait"),
        FormatSpec::new("ls", 48, 27, "Landscape"),
    ])
    .unwrap()
}

#[test]
fn undecodable_file_is_isolated() {
    let mut queue = BatchQueue::new();
    let a = queue.add("a.png", png_bytes(8, 4, [255, 0, 0, 255]));
    let b = queue.add("b.png", b"not an image".to_vec());
    let c = queue.add("c.jpg", png_bytes(3, 9, [0, 0, 255, 255]));

    let summary = run(
        &mut queue,
        &small_formats(),
        &StyleOptions::default(),
        &RenderOpts::default(),
    )
    .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            processed: 3,
            completed: 2,
            failed: 1,
            skipped: 0,
        }
    );

    let names: Vec<_> = queue
        .get(a)
        .unwrap()
        .results()
        .unwrap()
        .iter()
        .map(|r| (r.format_id.as_str(), r.file_name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("sq", "a_40x40.jpg"),
            ("pt", "a_36x44.jpg"),
            ("ls", "a_48x27.jpg"),
        ]
    );
    assert_eq!(queue.get(c).unwrap().results().unwrap().len(), 3);

    match queue.get(b).unwrap().status() {
        FileStatus::Error(msg) => assert!(msg.contains("decode error"), "{msg}"),
        other => panic!("expected error status, got {other:?}"),
    }
    assert!(queue.get(b).unwrap().results().is_none());
}

#[test]
fn rerun_skips_completed_and_retries_errors() {
    let mut queue = BatchQueue::new();
    let good = queue.add("good.png", png_bytes(5, 5, [0, 255, 0, 255]));
    let bad = queue.add("bad.png", vec![0u8; 16]);
    let formats = small_formats();
    let orchestrator =
        Orchestrator::new(&formats, StyleOptions::default(), RenderOpts::default()).unwrap();

    orchestrator.run(&mut queue);
    let before = queue.get(good).unwrap().results().unwrap().to_vec();

    let second = orchestrator.run(&mut queue);
    assert_eq!(
        second,
        RunSummary {
            processed: 1,
            completed: 0,
            failed: 1,
            skipped: 1,
        }
    );
    assert_eq!(queue.get(good).unwrap().results().unwrap(), before.as_slice());
    assert_eq!(queue.get(bad).unwrap().status().kind(), StatusKind::Error);
}

#[test]
fn single_format_failure_fails_whole_file() {
    let formats = FormatList::new(vec![
        FormatSpec::new("ok", 20, 20, "ok"),
        FormatSpec::new("huge", 40_000, 8, "too wide"),
    ])
    .unwrap();
    let mut queue = BatchQueue::new();
    let id = queue.add("a.png", png_bytes(4, 4, [9, 9, 9, 255]));

    let summary = run(
        &mut queue,
        &formats,
        &StyleOptions::default(),
        &RenderOpts::default(),
    )
    .unwrap();

    assert_eq!(summary.failed, 1);
    let file = queue.get(id).unwrap();
    assert!(file.results().is_none());
    match file.status() {
        FileStatus::Error(msg) => assert!(msg.contains("render error"), "{msg}"),
        other => panic!("expected error status, got {other:?}"),
    }
}

#[test]
fn progress_events_bracket_each_processed_file() {
    let mut queue = BatchQueue::new();
    let a = queue.add("a.png", png_bytes(2, 2, [1, 2, 3, 255]));
    let b = queue.add("b.png", vec![1, 2, 3]);
    let formats = FormatList::new(vec![FormatSpec::new("f", 10, 10, "f")]).unwrap();
    let orchestrator =
        Orchestrator::new(&formats, StyleOptions::default(), RenderOpts::default()).unwrap();

    let mut events = Vec::new();
    orchestrator.run_with_progress(&mut queue, |e| events.push(e.clone()));

    assert_eq!(
        events,
        vec![
            ProgressEvent::FileStarted {
                id: a,
                name: "a.png".to_string(),
                position: 1,
                total: 2,
            },
            ProgressEvent::FileFinished {
                id: a,
                name: "a.png".to_string(),
                position: 1,
                total: 2,
                status: StatusKind::Completed,
            },
            ProgressEvent::FileStarted {
                id: b,
                name: "b.png".to_string(),
                position: 2,
                total: 2,
            },
            ProgressEvent::FileFinished {
                id: b,
                name: "b.png".to_string(),
                position: 2,
                total: 2,
                status: StatusKind::Error,
            },
        ]
    );
}

#[test]
fn orchestrator_snapshots_formats() {
    let mut formats = small_formats();
    let orchestrator =
        Orchestrator::new(&formats, StyleOptions::default(), RenderOpts::default()).unwrap();
    formats.add_default();
    formats.update("sq", FormatField::Width(999)).unwrap();

    assert_eq!(orchestrator.formats().len(), 3);
    assert_eq!(orchestrator.formats()[0].width, 40);

    let mut queue = BatchQueue::new();
    let id = queue.add("x.webp", png_bytes(6, 6, [50, 60, 70, 255]));
    orchestrator.run(&mut queue);
    assert_eq!(queue.get(id).unwrap().results().unwrap().len(), 3);
}

#[test]
fn invalid_opts_reject_before_touching_queue() {
    let mut queue = BatchQueue::new();
    queue.add("a.png", png_bytes(2, 2, [0, 0, 0, 255]));
    let opts = RenderOpts {
        padding_ratio: 0.75,
        ..Default::default()
    };
    let err = run(&mut queue, &small_formats(), &StyleOptions::default(), &opts).unwrap_err();
    assert!(matches!(err, PadframeError::Validation(_)));
    assert_eq!(queue.count(StatusKind::Pending), 1);
}

#[test]
fn empty_queue_is_a_noop() {
    let mut queue = BatchQueue::new();
    let summary = run(
        &mut queue,
        &FormatList::defaults(),
        &StyleOptions::default(),
        &RenderOpts::default(),
    )
    .unwrap();
    assert_eq!(summary, RunSummary::default());
}
