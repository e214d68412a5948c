// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing a framed marquee with a floating badge into a recording surface.
//!
//! Each simulated frame runs `update` (which advances the marquee) and
//! `draw`, then prints the recorded sprite draws in absolute coordinates.
//!
//! Run:
//! - `cargo run -p trellis_demos --example draw_frames`

use core::time::Duration;

use kurbo::Size;
use tracing_subscriber::EnvFilter;
use trellis_view::widgets::{Frame, Marquee};
use trellis_view::{
    DrawOp, DrawRecorder, Edges, FloatingPosition, LayoutParameters, Length, SpriteId, ViewTree,
};

const BACKGROUND: SpriteId = SpriteId(1);
const BORDER: SpriteId = SpriteId(2);
const BANNER: SpriteId = SpriteId(3);
const BADGE: SpriteId = SpriteId(4);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis_view=debug")),
        )
        .init();

    let mut tree = ViewTree::new();
    let mut banner = Frame::new();
    banner.set_background(Some(BANNER));
    let banner = tree.insert(banner);
    tree.set_layout(banner, LayoutParameters::fixed_size(120.0, 16.0));

    let mut marquee = Marquee::with_content(banner);
    marquee.set_speed(60.0);
    marquee.set_extra_distance(20.0);
    let marquee = tree.insert(marquee);
    tree.set_layout(
        marquee,
        LayoutParameters {
            width: Length::Px(80.0),
            height: Length::Content,
            ..LayoutParameters::default()
        },
    );

    let mut frame = Frame::with_content(marquee);
    frame.set_border_thickness(Edges::all(4));
    frame.set_background(Some(BACKGROUND));
    frame.set_border(Some(BORDER));
    let frame = tree.insert(frame);
    tree.set_padding(frame, Edges::symmetric(6, 2));

    let mut badge = Frame::new();
    badge.set_background(Some(BADGE));
    let badge = tree.insert(badge);
    tree.set_layout(badge, LayoutParameters::fixed_size(12.0, 12.0));
    tree.add_floating_element(frame, badge, FloatingPosition::AfterParent);

    for frame_index in 0..4 {
        tree.measure(frame, Size::new(640.0, 480.0));
        tree.update(frame, Duration::from_millis(500));
        let mut surface = DrawRecorder::new();
        tree.draw(frame, &mut surface);
        println!("frame {frame_index}:");
        for op in surface.ops() {
            if let DrawOp::Sprite { sprite, dest, clip } = op {
                println!("  sprite {} at {dest:?} clip {clip:?}", sprite.0);
            }
        }
    }
}
