use std::fmt::Write as _;

use insta::assert_snapshot;
use proptest::prelude::*;
use proptest_derive::Arbitrary;

use super::*;
use crate::utils::Rectangle;

fn options(cell: (i32, i32)) -> Options {
    Options {
        cell_size: Size::new(cell.0, cell.1),
        icon_padding: 5,
        panel_margins: Margins::default(),
    }
}

fn rect(x: i32, y: i32, w: i32, h: i32) -> Rectangle {
    Rectangle::from_loc_and_size((x, y), (w, h))
}

fn id(name: &str) -> ItemId {
    ItemId::from(name)
}

fn ids(names: &[&str]) -> Vec<ItemId> {
    names.iter().map(|name| id(name)).collect()
}

/// Layout with 100x100 cells, a 3x2 display on the left and a 2x2 display on the right.
fn two_screens() -> Layout {
    let mut layout = Layout::with_options(options((100, 100))).unwrap();
    layout
        .add_display(Display::new("left", rect(0, 0, 300, 200)))
        .unwrap();
    layout
        .add_display(Display::new("right", rect(300, 0, 200, 200)))
        .unwrap();
    layout
}

fn insert_all(layout: &mut Layout, names: &[&str]) {
    for name in names {
        layout.insert_item(id(name));
        layout.verify_invariants();
    }
}

fn pinned_at(screen: usize, column: i32, row: i32) -> PersistedPosition {
    PersistedPosition {
        screen,
        column,
        row,
    }
}

/// Renders every screen as rows of cells.
///
/// An occupied cell shows the owner followed by `*` if it is pinned there, `!` if it overlaps
/// another item, and `.` otherwise.
fn format_layout(layout: &Layout) -> String {
    let mut buf = String::new();
    for (idx, grid) in layout.screens().iter().enumerate() {
        writeln!(buf, "screen {idx}: {}", grid.display_id()).unwrap();
        for row in 0..=grid.max_row() {
            let cells: Vec<String> = (0..=grid.max_column())
                .map(|column| {
                    let pos = GridPos::new(column, row);
                    match grid.item_at(pos) {
                        None => String::from("--"),
                        Some(id) if layout.is_overlapping(id) => format!("{id}!"),
                        Some(id) if grid.pinned(id) == Some(pos) => format!("{id}*"),
                        Some(id) => format!("{id}."),
                    }
                })
                .collect();
            writeln!(buf, "{}", cells.join(" ")).unwrap();
        }
    }

    let unplaced = layout.unplaced_items();
    if !unplaced.is_empty() {
        let names: Vec<&str> = unplaced.iter().map(|id| id.as_str()).collect();
        writeln!(buf, "unplaced: {}", names.join(" ")).unwrap();
    }
    buf
}

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    AddDisplay(#[proptest(strategy = "1..=3usize")] usize),
    RemoveDisplay(#[proptest(strategy = "1..=3usize")] usize),
    ResizeDisplay {
        #[proptest(strategy = "1..=3usize")]
        display: usize,
        #[proptest(strategy = "0..=600i32")]
        width: i32,
        #[proptest(strategy = "0..=400i32")]
        height: i32,
    },
    RebuildDisplays(#[proptest(strategy = "proptest::collection::vec(1..=3usize, 0..=3)")] Vec<usize>),
    SwapScreens {
        #[proptest(strategy = "0..=2usize")]
        a: usize,
        #[proptest(strategy = "0..=2usize")]
        b: usize,
    },
    InsertItem(#[proptest(strategy = "1..=12usize")] usize),
    RemoveItem(#[proptest(strategy = "1..=12usize")] usize),
    MoveItem {
        #[proptest(strategy = "1..=12usize")]
        item: usize,
        #[proptest(strategy = "-50..=1900i32")]
        x: i32,
        #[proptest(strategy = "-50..=450i32")]
        y: i32,
    },
    MoveItems {
        #[proptest(strategy = "proptest::collection::vec(1..=12usize, 0..=4)")]
        items: Vec<usize>,
        #[proptest(strategy = "prop_oneof![-300..=300i32, Just(i32::MAX), Just(i32::MIN)]")]
        dx: i32,
        #[proptest(strategy = "prop_oneof![-300..=300i32, Just(i32::MAX), Just(i32::MIN)]")]
        dy: i32,
    },
    SetCellSize {
        #[proptest(strategy = "40..=200i32")]
        w: i32,
        #[proptest(strategy = "40..=200i32")]
        h: i32,
    },
    SetPanelMargins {
        #[proptest(strategy = "0..=80i32")]
        top: i32,
        #[proptest(strategy = "0..=80i32")]
        left: i32,
    },
    ConfirmPositions,
    SaveAndRestore,
}

fn display_name(n: usize) -> String {
    format!("display-{n}")
}

fn display(n: usize) -> Display {
    let x = (n as i32 - 1) * 600;
    Display::new(display_name(n), rect(x, 0, 600, 400))
}

fn item(n: usize) -> ItemId {
    ItemId::new(format!("item-{n}"))
}

impl Op {
    fn apply(self, layout: &mut Layout) {
        match self {
            Op::AddDisplay(n) => {
                let _ = layout.add_display(display(n));
            }
            Op::RemoveDisplay(n) => {
                let _ = layout.remove_display(&DisplayId(display_name(n)));
            }
            Op::ResizeDisplay {
                display: n,
                width,
                height,
            } => {
                let geometry = rect((n as i32 - 1) * 600, 0, width, height);
                let _ = layout.update_display_geometry(&DisplayId(display_name(n)), geometry);
            }
            Op::RebuildDisplays(ns) => {
                let displays = ns.into_iter().map(display).collect();
                let _ = layout.rebuild_displays(displays);
            }
            Op::SwapScreens { a, b } => {
                let _ = layout.swap_screens(a, b);
            }
            Op::InsertItem(n) => layout.insert_item(item(n)),
            Op::RemoveItem(n) => {
                layout.remove_item(&item(n));
            }
            Op::MoveItem { item: n, x, y } => {
                layout.move_item(&item(n), Point::new(x, y));
            }
            Op::MoveItems { items, dx, dy } => {
                let items: Vec<ItemId> = items.into_iter().map(item).collect();
                layout.move_items(&items, Point::new(dx, dy));
            }
            Op::SetCellSize { w, h } => {
                layout.set_cell_size(Size::new(w, h)).unwrap();
            }
            Op::SetPanelMargins { top, left } => {
                let margins = Margins {
                    top,
                    left,
                    ..Margins::default()
                };
                layout.set_panel_margins(margins).unwrap();
            }
            Op::ConfirmPositions => layout.confirm_positions(),
            Op::SaveAndRestore => {
                let saved = layout.export_layout();
                layout.restore_layout(&saved);
            }
        }
    }
}

#[track_caller]
fn check_ops(ops: impl IntoIterator<Item = Op>) -> Layout {
    let mut layout = Layout::with_options(options((100, 100))).unwrap();
    for op in ops {
        op.apply(&mut layout);
        layout.verify_invariants();
    }
    layout
}

#[test]
fn fills_screens_in_order() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c", "d", "e", "f", "g"]);

    assert_snapshot!(format_layout(&layout), @r"
    screen 0: left
    a. c. e.
    b. d. f.
    screen 1: right
    g. --
    -- --
    ");
    assert_eq!(layout.position_of(&id("g")), Some(Point::new(300, 0)));
    assert_eq!(layout.screen_of(&id("g")), Some(1));
    assert_eq!(layout.owner_of(&id("g")), Some(1));
    assert_eq!(layout.owner_of(&id("f")), Some(0));
    assert_eq!(layout.owner_of(&id("missing")), None);
}

#[test]
fn full_grid_leaves_last_item_unplaced() {
    let mut layout = Layout::with_options(options((100, 150))).unwrap();
    layout
        .add_display(Display::new("main", rect(0, 0, 1000, 600)))
        .unwrap();

    let grid = layout.screens().get(0).unwrap();
    assert_eq!((grid.max_column(), grid.max_row()), (9, 3));

    for i in 0..41 {
        layout.insert_item(ItemId::new(format!("item-{i}")));
    }
    layout.verify_invariants();

    for i in 0..40 {
        assert!(layout.position_of(&ItemId::new(format!("item-{i}"))).is_some());
    }
    let last = ItemId::new("item-40");
    assert_eq!(layout.position_of(&last), None);
    assert!(layout.is_floating(&last));
    assert_eq!(layout.unplaced_items(), vec![&last]);
}

#[test]
fn duplicate_insert_is_ignored() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "a"]);
    assert_eq!(layout.items(), &ids(&["a"])[..]);
}

#[test]
fn remove_item_reflows_floating_items() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c"]);

    assert!(layout.remove_item(&id("a")));
    assert!(!layout.remove_item(&id("a")));
    layout.verify_invariants();

    assert_snapshot!(format_layout(&layout), @r"
    screen 0: left
    b. -- --
    c. -- --
    screen 1: right
    -- --
    -- --
    ");
}

#[test]
fn remove_item_keeps_pinned_items() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c"]);
    layout.confirm_positions();

    layout.remove_item(&id("a"));
    layout.verify_invariants();

    assert_eq!(layout.grid_position_of(&id("b")), Some((0, GridPos::new(0, 1))));
    assert_eq!(layout.grid_position_of(&id("c")), Some((0, GridPos::new(1, 0))));
}

#[test]
fn reset_items_follows_new_order() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c"]);

    layout.reset_items(ids(&["c", "d", "a"]));
    layout.verify_invariants();

    assert_eq!(layout.items(), &ids(&["c", "d", "a"])[..]);
    assert!(!layout.contains_item(&id("b")));
    assert!(layout.position_of(&id("d")).is_some());
}

#[test]
fn move_item_pins_new_cell() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b"]);

    assert!(layout.move_item(&id("a"), Point::new(420, 150)));
    layout.verify_invariants();

    assert_eq!(layout.grid_position_of(&id("a")), Some((1, GridPos::new(1, 1))));
    assert_eq!(layout.pinned_position_of(&id("a")), Some((1, GridPos::new(1, 1))));
    assert!(!layout.is_floating(&id("a")));
    assert!(layout.is_floating(&id("b")));
}

#[test]
fn move_item_onto_taken_cell_keeps_pin() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b"]);
    layout.move_item(&id("a"), Point::new(250, 50));

    // b owns (0, 1).
    assert!(!layout.move_item(&id("a"), Point::new(50, 150)));
    layout.verify_invariants();

    assert_eq!(layout.pinned_position_of(&id("a")), Some((0, GridPos::new(2, 0))));
    assert!(layout.is_floating(&id("a")));
    assert_eq!(layout.grid_position_of(&id("a")), Some((0, GridPos::new(0, 0))));
    assert_eq!(layout.export_layout().entries[&id("a")], pinned_at(0, 2, 0));

    // The next reconciliation brings it back to the remembered cell.
    layout.on_all_screens_changed();
    layout.verify_invariants();

    assert!(!layout.is_floating(&id("a")));
    assert_snapshot!(format_layout(&layout), @r"
    screen 0: left
    b. -- a*
    -- -- --
    screen 1: right
    -- --
    -- --
    ");
}

#[test]
fn move_items_with_huge_offset_floats_item() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b"]);

    let moved = layout.move_items(&ids(&["a"]), Point::new(i32::MAX, 0));
    layout.verify_invariants();

    assert!(moved.is_empty());
    assert!(layout.is_floating(&id("a")));
    assert_eq!(layout.grid_position_of(&id("a")), Some((0, GridPos::new(0, 0))));

    let moved = layout.move_items(&ids(&["b"]), Point::new(i32::MIN, i32::MIN));
    layout.verify_invariants();
    assert!(moved.is_empty());
    assert!(layout.position_of(&id("b")).is_some());
}

#[test]
fn move_item_outside_every_screen() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a"]);

    assert!(!layout.move_item(&id("a"), Point::new(5000, 5000)));
    assert!(!layout.move_item(&id("missing"), Point::new(10, 10)));
    layout.verify_invariants();
    assert_eq!(layout.position_of(&id("a")), Some(Point::new(0, 0)));
}

#[test]
fn move_items_first_come_first_served() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c", "d"]);

    // a lands where b was, b falls off the bottom edge.
    let moved = layout.move_items(&ids(&["a", "b"]), Point::new(0, 100));
    layout.verify_invariants();

    assert_eq!(moved, ids(&["a"]));
    assert_snapshot!(format_layout(&layout), @r"
    screen 0: left
    b. c. --
    a* d. --
    screen 1: right
    -- --
    -- --
    ");
}

#[test]
fn move_items_across_screens() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c"]);

    let moved = layout.move_items(&ids(&["c", "a"]), Point::new(200, 0));
    layout.verify_invariants();

    assert_eq!(moved, ids(&["c", "a"]));
    assert_eq!(layout.grid_position_of(&id("c")), Some((1, GridPos::new(0, 0))));
    assert_eq!(layout.grid_position_of(&id("a")), Some((0, GridPos::new(2, 0))));
}

#[test]
fn hit_testing_uses_icon_area() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b"]);

    assert_eq!(layout.item_at_pixel(Point::new(50, 150)), Some(&id("b")));
    assert_eq!(layout.item_at_pixel(Point::new(50, 102)), None);
    assert_eq!(layout.item_at_pixel(Point::new(150, 50)), None);
    assert_eq!(
        layout.visual_rect(&id("b")),
        Some(rect(5, 105, 90, 90))
    );
}

#[test]
fn colliding_pins_overlap_and_stay_floating() {
    let mut layout = Layout::with_options(options((100, 150))).unwrap();
    layout
        .add_display(Display::new("main", rect(0, 0, 1000, 600)))
        .unwrap();

    let mut saved = PersistedLayout::default();
    saved.entries.insert(id("a"), pinned_at(0, 2, 2));
    saved.entries.insert(id("b"), pinned_at(0, 2, 2));
    layout.restore_layout(&saved);
    insert_all(&mut layout, &["a", "b", "c"]);

    layout.confirm_positions();
    layout.verify_invariants();

    for name in ["a", "b"] {
        assert!(layout.is_overlapping(&id(name)));
        assert!(layout.is_floating(&id(name)));
        assert_eq!(layout.position_of(&id(name)), Some(Point::new(200, 300)));
    }
    assert!(!layout.is_floating(&id("c")));

    let grid = layout.screens().get(0).unwrap();
    assert_eq!(grid.item_at(GridPos::new(2, 2)), Some(&id("a")));
    assert!(grid.is_stacked(&id("b")));

    // Moving one of them away resolves the collision.
    assert!(layout.move_item(&id("b"), Point::new(150, 75)));
    layout.confirm_positions();
    layout.verify_invariants();

    assert!(!layout.is_overlapping(&id("a")));
    assert!(!layout.is_floating(&id("a")));
    assert_eq!(layout.grid_position_of(&id("b")), Some((0, GridPos::new(1, 0))));
}

#[test]
fn removing_stack_owner_promotes_other_item() {
    let mut layout = two_screens();
    let mut saved = PersistedLayout::default();
    saved.entries.insert(id("a"), pinned_at(0, 1, 1));
    saved.entries.insert(id("b"), pinned_at(0, 1, 1));
    layout.restore_layout(&saved);
    insert_all(&mut layout, &["a", "b"]);

    layout.remove_item(&id("a"));
    layout.verify_invariants();

    let grid = layout.screens().get(0).unwrap();
    assert_eq!(grid.item_at(GridPos::new(1, 1)), Some(&id("b")));
    assert!(!layout.is_overlapping(&id("b")));
}

#[test]
fn removing_display_floats_its_items() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c", "d", "e", "f", "g", "h"]);

    layout.remove_display(&DisplayId::from("left")).unwrap();
    layout.verify_invariants();

    assert_snapshot!(format_layout(&layout), @r"
    screen 0: right
    g. a.
    h. b.
    unplaced: c d e f
    ");
    for name in ["a", "b", "c", "d", "e", "f"] {
        assert!(layout.is_floating(&id(name)));
    }

    // The unplaced items come back without being inserted again.
    layout
        .add_display(Display::new("left", rect(0, 0, 300, 200)))
        .unwrap();
    layout.verify_invariants();
    assert!(layout.unplaced_items().is_empty());
}

#[test]
fn reconnected_display_restores_pins() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c", "d", "e", "f", "g", "h"]);
    layout.confirm_positions();

    layout
        .handle_display_event(DisplayEvent::Destroyed(DisplayId::from("left")))
        .unwrap();
    layout.verify_invariants();
    assert_eq!(layout.pinned_position_of(&id("a")), None);

    layout
        .handle_display_event(DisplayEvent::Added(Display::new(
            "left",
            rect(0, 0, 300, 200),
        )))
        .unwrap();
    layout.verify_invariants();

    assert_snapshot!(format_layout(&layout), @r"
    screen 0: right
    g* --
    h* --
    screen 1: left
    a* c* e*
    b* d* f*
    ");
    assert!(layout.floating_items().is_empty());
}

#[test]
fn detached_pin_loses_to_newer_pin() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b"]);
    layout.confirm_positions();

    layout.remove_display(&DisplayId::from("left")).unwrap();
    assert!(layout.move_item(&id("a"), Point::new(450, 150)));

    layout
        .add_display(Display::new("left", rect(0, 0, 300, 200)))
        .unwrap();
    layout.verify_invariants();

    assert_eq!(layout.pinned_position_of(&id("a")), Some((0, GridPos::new(1, 1))));
    assert_eq!(layout.pinned_position_of(&id("b")), Some((1, GridPos::new(0, 1))));
    assert_eq!(layout.grid_position_of(&id("b")), Some((1, GridPos::new(0, 1))));
}

#[test]
fn smaller_cells_place_leftover_items() {
    let mut layout = Layout::with_options(options((100, 150))).unwrap();
    layout
        .add_display(Display::new("main", rect(0, 0, 300, 300)))
        .unwrap();
    insert_all(&mut layout, &["a", "b", "c", "d", "e", "f", "g", "h"]);
    assert_eq!(layout.unplaced_items(), vec![&id("g"), &id("h")]);

    layout.set_cell_size(Size::new(100, 100)).unwrap();
    layout.verify_invariants();

    assert!(layout.unplaced_items().is_empty());
    assert_eq!(layout.grid_position_of(&id("h")), Some((0, GridPos::new(2, 1))));
}

#[test]
fn invalid_options_are_rejected_without_changes() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a"]);

    assert_eq!(
        layout.set_cell_size(Size::new(0, 100)),
        Err(LayoutError::InvalidCellSize(Size::new(0, 100)))
    );
    assert_eq!(
        layout.set_icon_padding(-1),
        Err(LayoutError::InvalidIconPadding(-1))
    );
    assert_eq!(layout.options().cell_size, Size::new(100, 100));
    layout.verify_invariants();

    assert!(Layout::with_options(options((10, -10))).is_err());
}

#[test]
fn shrinking_display_moves_items_but_keeps_pins() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c", "d", "e"]);
    layout.confirm_positions();

    layout
        .update_display_geometry(&DisplayId::from("left"), rect(0, 0, 200, 200))
        .unwrap();
    layout.verify_invariants();

    assert_eq!(layout.grid_position_of(&id("e")), Some((1, GridPos::new(0, 0))));
    assert_eq!(layout.pinned_position_of(&id("e")), Some((0, GridPos::new(2, 0))));
    assert!(layout.is_floating(&id("e")));

    layout
        .update_display_geometry(&DisplayId::from("left"), rect(0, 0, 300, 200))
        .unwrap();
    layout.verify_invariants();

    assert_eq!(layout.grid_position_of(&id("e")), Some((0, GridPos::new(2, 0))));
    assert!(!layout.is_floating(&id("e")));
}

#[test]
fn empty_geometry_is_ignored() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a"]);

    layout
        .update_display_geometry(&DisplayId::from("left"), rect(0, 0, 0, 0))
        .unwrap();
    layout.verify_invariants();

    assert_eq!(layout.screens().get(0).unwrap().max_column(), 2);
    assert_eq!(
        layout.update_display_geometry(&DisplayId::from("nope"), rect(0, 0, 10, 10)),
        Err(LayoutError::UnknownDisplay(DisplayId::from("nope")))
    );
}

#[test]
fn duplicate_display_is_rejected() {
    let mut layout = two_screens();
    assert_eq!(
        layout.add_display(Display::new("left", rect(0, 0, 10, 10))),
        Err(LayoutError::DuplicateDisplay(DisplayId::from("left")))
    );
    assert_eq!(layout.screens().len(), 2);
}

#[test]
fn swapping_screens_moves_contents() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a"]);
    layout.confirm_positions();

    layout.swap_screens(0, 1).unwrap();
    layout.verify_invariants();

    assert_eq!(layout.screens().get(0).unwrap().display_id(), &DisplayId::from("left"));
    assert_eq!(layout.pinned_position_of(&id("a")), Some((1, GridPos::new(0, 0))));
    assert_eq!(layout.position_of(&id("a")), Some(Point::new(300, 0)));
    assert_eq!(layout.screen_of(&id("a")), Some(1));
    assert_eq!(layout.owner_of(&id("a")), Some(1));

    assert_eq!(
        layout.swap_screens(0, 5),
        Err(LayoutError::ScreenIndexOutOfRange { idx: 5, len: 2 })
    );
}

#[test]
fn rebuild_displays_follows_enumeration() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c", "d", "e", "f", "g"]);

    layout
        .rebuild_displays(vec![
            Display::new("right", rect(0, 0, 200, 200)),
            Display::new("top", rect(0, -100, 100, 100)),
        ])
        .unwrap();
    layout.verify_invariants();

    let names: Vec<&str> = layout
        .screens()
        .iter()
        .map(|grid| grid.display_id().0.as_str())
        .collect();
    assert_eq!(names, ["right", "top"]);
    assert_eq!(layout.unplaced_items().len(), 2);

    assert!(layout
        .rebuild_displays(vec![
            Display::new("x", rect(0, 0, 100, 100)),
            Display::new("x", rect(100, 0, 100, 100)),
        ])
        .is_err());
    assert_eq!(layout.screens().len(), 2);
}

#[test]
fn panel_margins_shift_cells() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a"]);

    layout
        .set_panel_margins(Margins {
            top: 30,
            left: 10,
            ..Margins::default()
        })
        .unwrap();
    layout.verify_invariants();

    assert_eq!(layout.position_of(&id("a")), Some(Point::new(10, 30)));
    assert_eq!(layout.screens().get(0).unwrap().max_row(), 0);
}

#[test]
fn seeded_pins_apply_on_insert() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b"]);

    let mut saved = PersistedLayout::default();
    saved.entries.insert(id("c"), pinned_at(0, 0, 0));
    saved.entries.insert(id("d"), pinned_at(1, 1, 0));
    layout.restore_layout(&saved);

    insert_all(&mut layout, &["c", "d"]);

    assert!(!layout.is_floating(&id("c")));
    assert_snapshot!(format_layout(&layout), @r"
    screen 0: left
    c* a. --
    b. -- --
    screen 1: right
    -- d*
    -- --
    ");
}

#[test]
fn restore_moves_present_items_and_skips_bad_entries() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c"]);

    let mut saved = PersistedLayout::default();
    saved.entries.insert(id("a"), pinned_at(7, 0, 0));
    saved.entries.insert(id("b"), pinned_at(0, -1, 0));
    saved.entries.insert(id("c"), pinned_at(1, 1, 1));
    layout.restore_layout(&saved);
    layout.verify_invariants();

    assert_eq!(layout.pinned_position_of(&id("a")), None);
    assert_eq!(layout.pinned_position_of(&id("b")), None);
    assert_eq!(layout.position_of(&id("c")), Some(Point::new(400, 100)));
}

#[test]
fn export_round_trips_through_restore() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c"]);
    layout.move_item(&id("c"), Point::new(450, 50));
    layout.confirm_positions();

    let saved = layout.export_layout();
    assert_eq!(saved.len(), 3);
    assert_eq!(saved.entries[&id("c")], pinned_at(1, 1, 0));

    let mut other = two_screens();
    other.restore_layout(&saved);
    insert_all(&mut other, &["c", "b", "a"]);
    for name in ["a", "b", "c"] {
        assert_eq!(other.position_of(&id(name)), layout.position_of(&id(name)));
    }
}

#[test]
fn confirm_is_idempotent() {
    let mut layout = two_screens();
    insert_all(&mut layout, &["a", "b", "c", "d", "e", "f", "g"]);
    layout.move_item(&id("a"), Point::new(450, 150));
    layout.confirm_positions();

    let before: Vec<_> = layout.items().iter().map(|id| layout.position_of(id)).collect();
    layout.on_all_screens_changed();
    layout.confirm_positions();
    layout.verify_invariants();
    let after: Vec<_> = layout.items().iter().map(|id| layout.position_of(id)).collect();

    assert_eq!(before, after);
}

#[test]
fn snapshot_lists_screens_and_unplaced_items() {
    let mut layout = Layout::with_options(options((100, 100))).unwrap();
    layout
        .add_display(Display::new("tiny", rect(0, 0, 100, 100)))
        .unwrap();
    insert_all(&mut layout, &["a", "b"]);
    layout.confirm_positions();

    let snapshot = layout.snapshot();
    assert_eq!(snapshot.screens.len(), 1);
    assert_eq!(snapshot.screens[0].columns, 1);
    assert_eq!(snapshot.screens[0].items[0].id, id("a"));
    assert!(snapshot.screens[0].items[0].pinned);
    assert_eq!(snapshot.unplaced, ids(&["b"]));
}

#[test]
fn operations_without_displays() {
    check_ops([
        Op::InsertItem(1),
        Op::InsertItem(2),
        Op::MoveItem {
            item: 1,
            x: 10,
            y: 10,
        },
        Op::ConfirmPositions,
        Op::AddDisplay(1),
        Op::RemoveDisplay(1),
        Op::SaveAndRestore,
    ]);
}

#[test]
fn swap_then_remove_and_reconnect() {
    let layout = check_ops([
        Op::AddDisplay(1),
        Op::AddDisplay(2),
        Op::InsertItem(1),
        Op::InsertItem(2),
        Op::ConfirmPositions,
        Op::SwapScreens { a: 0, b: 1 },
        Op::RemoveDisplay(2),
        Op::AddDisplay(2),
    ]);
    assert_eq!(
        layout.pinned_position_of(&item(1)),
        Some((1, GridPos::new(0, 0)))
    );
}

#[test]
fn resize_to_nothing_and_back() {
    check_ops([
        Op::AddDisplay(1),
        Op::InsertItem(1),
        Op::InsertItem(2),
        Op::ConfirmPositions,
        Op::ResizeDisplay {
            display: 1,
            width: 50,
            height: 50,
        },
        Op::SetCellSize { w: 40, h: 40 },
        Op::ResizeDisplay {
            display: 1,
            width: 600,
            height: 400,
        },
    ]);
}

fn arbitrary_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(any::<Op>(), 1..40)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: if std::env::var_os("RUN_SLOW_TESTS").is_none() {
            eprintln!("ignoring slow test");
            64
        } else {
            1024
        },
        ..ProptestConfig::default()
    })]

    #[test]
    fn random_operations_dont_panic(ops in arbitrary_ops()) {
        check_ops(ops);
    }

    #[test]
    fn confirmed_pins_survive_reconciliation(ops in arbitrary_ops()) {
        let mut layout = check_ops(ops);
        layout.confirm_positions();

        let pinned: Vec<(ItemId, Option<Point>)> = layout
            .items()
            .iter()
            .filter(|id| !layout.is_floating(id))
            .map(|id| (id.clone(), layout.position_of(id)))
            .collect();

        layout.on_all_screens_changed();
        layout.verify_invariants();

        for (id, position) in pinned {
            prop_assert_eq!(layout.position_of(&id), position, "{} moved", id);
        }
    }
}
