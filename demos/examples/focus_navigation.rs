// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gamepad-style focus navigation through a scrolling grid.
//!
//! Builds a title above a 4-column grid of 24 focusable slots inside a
//! vertical scroll container, then walks focus with a fixed sequence of
//! directions. Each step scrolls the newly focused slot into view.
//!
//! Run:
//! - `cargo run -p trellis_demos --example focus_navigation`
//! - `RUST_LOG=trellis_view=trace cargo run -p trellis_demos --example focus_navigation`

use kurbo::{Point, Size, Vec2};
use tracing_subscriber::EnvFilter;
use trellis_view::widgets::{Grid, Lane, ScrollContainer, Spacer};
use trellis_view::{
    Direction, Edges, GridItemLayout, LayoutParameters, Length, Orientation, ViewId, ViewTree,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis_view=debug")),
        )
        .init();

    let mut tree = ViewTree::new();
    let slots: Vec<ViewId> = (0..24)
        .map(|i| {
            let slot = tree.insert(Spacer::new());
            tree.set_layout(slot, LayoutParameters::fixed_size(48.0, 48.0));
            tree.set_focusable(slot, true);
            tree.set_name(slot, format!("slot{i}"));
            slot
        })
        .collect();
    let mut grid = Grid::with_children(GridItemLayout::Count(4), slots.iter().copied());
    grid.set_item_spacing(Vec2::new(8.0, 8.0));
    let grid = tree.insert(grid);
    tree.set_name(grid, "grid");

    let scroll = tree.insert(ScrollContainer::with_content(grid));
    tree.set_name(scroll, "scroll");
    tree.set_layout(
        scroll,
        LayoutParameters {
            width: Length::Px(216.0),
            height: Length::Px(160.0),
            ..LayoutParameters::default()
        },
    );

    let title = tree.insert(Spacer::new());
    tree.set_layout(title, LayoutParameters::fixed_size(216.0, 24.0));
    let root = tree.insert(Lane::with_children(Orientation::Vertical, [title, scroll]));
    tree.set_name(root, "root");
    tree.set_padding(root, Edges::all(8));
    tree.measure(root, Size::new(800.0, 600.0));

    let mut cursor = Point::new(32.0, 0.0);
    let steps = [
        Direction::South,
        Direction::East,
        Direction::South,
        Direction::South,
        Direction::South,
        Direction::South,
        Direction::West,
        Direction::North,
    ];
    for direction in steps {
        let Some(found) = tree.focus_search(root, cursor, direction) else {
            tracing::info!(?direction, "no focus target");
            continue;
        };
        let mut path = found.path.clone();
        path.push(found.target);
        let scrolled = tree.scroll_into_view(root, &path).unwrap_or(Vec2::ZERO);
        // The target moved by the amount scrolled.
        let bounds = found.target.actual_bounds(&tree);
        cursor = found.global_target_position() - scrolled
            + Vec2::new(bounds.size.width / 2.0, bounds.size.height / 2.0);
        let offset = tree
            .widget::<ScrollContainer>(scroll)
            .map(ScrollContainer::scroll_offset)
            .unwrap_or_default();
        println!(
            "{direction:?} -> {} at {cursor:?} (scroll offset {offset})",
            tree.name(found.target.view),
        );
    }
}
