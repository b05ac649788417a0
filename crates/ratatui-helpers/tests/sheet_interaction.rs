use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui_helpers::binding::Binding;
use ratatui_helpers::bottom_sheet::BottomSheet;
use ratatui_helpers::bottom_sheet::BottomSheetOptions;
use ratatui_helpers::bottom_sheet::SheetAction;
use ratatui_helpers::geometry::SheetHeight;
use ratatui_helpers::geometry::Viewport;
use ratatui_helpers::gesture::DragPhase;
use ratatui_helpers::gesture::DragSample;
use ratatui_helpers::input::InputEvent;
use ratatui_helpers::input::MouseButton;
use ratatui_helpers::input::MouseEvent;
use ratatui_helpers::input::MouseEventKind;
use ratatui_helpers::search_bar::SearchBar;
use ratatui_helpers::search_bar::SearchBarAction;
use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn sheet_with(height: SheetHeight, presented: bool) -> (BottomSheet, Rc<Cell<bool>>) {
    let shown = Rc::new(Cell::new(presented));
    let sheet = BottomSheet::with_options(
        Binding::from_cell(Rc::clone(&shown)),
        BottomSheetOptions {
            height,
            ..Default::default()
        },
    );
    (sheet, shown)
}

fn at(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn left(x: u16, y: u16, kind: fn(MouseButton) -> MouseEventKind) -> InputEvent {
    InputEvent::Mouse(MouseEvent::new(x, y, kind(MouseButton::Left)))
}

#[test]
fn height_resolution() {
    let vp = Viewport::new(400.0, 800.0, 0.0);
    let cases = [
        (SheetHeight::Half, 400.0),
        (SheetHeight::Quarter, 200.0),
        (SheetHeight::ThreeQuarter, 600.0),
        (SheetHeight::Custom(123.0), 123.0),
    ];
    for (height, expected) in cases {
        let (sheet, _) = sheet_with(height, true);
        assert_eq!(sheet.sheet_height(vp), expected, "{height:?}");
    }
}

#[test]
fn offset_for_presented_and_hidden() {
    let vp = Viewport::new(400.0, 800.0, 20.0);
    let (sheet, shown) = sheet_with(SheetHeight::Custom(400.0), true);
    assert_eq!(sheet.offset(vp), 220.0);
    shown.set(false);
    assert_eq!(sheet.offset(vp), 620.0);
}

#[test]
fn drag_threshold_is_exclusive() {
    let vp = Viewport::new(400.0, 800.0, 0.0);

    let (mut sheet, shown) = sheet_with(SheetHeight::Custom(400.0), true);
    assert_eq!(sheet.dismiss_threshold(vp), 80.0);
    sheet.drag_changed(DragSample::new(80.0, at(0)));
    assert_eq!(sheet.drag_ended(80.0, vp), SheetAction::Redraw);
    assert!(shown.get());

    sheet.drag_changed(DragSample::new(81.0, at(1_000)));
    assert_eq!(sheet.drag_ended(81.0, vp), SheetAction::Dismissed);
    assert!(!shown.get());
}

#[test]
fn flick_dismisses_regardless_of_distance() {
    let (mut sheet, shown) = sheet_with(SheetHeight::Half, true);
    sheet.drag_changed(DragSample::new(-40.0, at(0)));
    assert_eq!(
        sheet.drag_changed(DragSample::new(-25.0, at(10))),
        SheetAction::Dismissed
    );
    assert!(!shown.get());
}

#[test]
fn slow_drag_does_not_flick() {
    let (mut sheet, shown) = sheet_with(SheetHeight::Half, true);
    sheet.drag_changed(DragSample::new(0.0, at(0)));
    assert_eq!(
        sheet.drag_changed(DragSample::new(13.0, at(10))),
        SheetAction::Redraw
    );
    assert!(shown.get());
}

#[test]
fn non_positive_elapsed_time_never_flicks() {
    let (mut sheet, shown) = sheet_with(SheetHeight::Half, true);
    sheet.drag_changed(DragSample::new(0.0, at(50)));
    sheet.drag_changed(DragSample::new(500.0, at(50)));
    sheet.drag_changed(DragSample::new(900.0, at(40)));
    assert!(shown.get());
    assert_eq!(sheet.state().dragged_offset, 900.0);
}

#[test]
fn drag_end_resets_state() {
    let vp = Viewport::new(400.0, 800.0, 0.0);
    for translation in [10.0, 500.0] {
        let (mut sheet, _) = sheet_with(SheetHeight::Half, true);
        sheet.drag_changed(DragSample::new(translation, at(0)));
        sheet.drag_ended(translation, vp);
        assert_eq!(sheet.state().dragged_offset, 0.0);
        assert_eq!(sheet.state().previous_sample, None);
        assert_eq!(sheet.state().phase, DragPhase::Idle);
    }
}

#[test]
fn hidden_layout_is_idempotent() {
    let vp = Viewport::new(320.0, 640.0, 0.0);
    let (mut sheet, _) = sheet_with(SheetHeight::Half, false);
    let first = sheet.layout(vp);
    for _ in 0..3 {
        assert_eq!(sheet.layout(vp), first);
        assert!(!sheet.tick(at(16)));
    }
    assert_eq!(sheet.displayed_offset(), Some(first));
}

#[test]
fn scrim_fades_with_drag_and_clamps() {
    let (mut sheet, shown) = sheet_with(SheetHeight::Half, true);
    assert_eq!(sheet.scrim_opacity(), 0.4);

    sheet.drag_changed(DragSample::new(240.0, at(0)));
    assert!(sheet.scrim_opacity().abs() < 1e-9);

    sheet.drag_changed(DragSample::new(300.0, at(1_000)));
    assert!(sheet.raw_scrim_opacity() < 0.0);
    assert_eq!(sheet.scrim_opacity(), 0.0);

    shown.set(false);
    assert_eq!(sheet.scrim_opacity(), 0.0);
}

#[test]
fn terminal_drag_past_threshold_then_springs_away() {
    let (mut sheet, shown) = sheet_with(SheetHeight::Half, true);
    let area = Rect::new(0, 0, 30, 40);
    let mut buf = Buffer::empty(area);
    sheet.render(area, &mut buf, |_, _| {});
    let panel = sheet.panel_area().unwrap_or_default();
    assert_eq!(panel, Rect::new(0, 20, 30, 20));

    sheet.handle_event(left(10, 22, MouseEventKind::Down), at(0));
    sheet.handle_event(left(10, 24, MouseEventKind::Drag), at(200));
    sheet.handle_event(left(10, 27, MouseEventKind::Drag), at(400));
    let action = sheet.handle_event(left(10, 27, MouseEventKind::Up), at(450));
    assert_eq!(action, SheetAction::Dismissed);
    assert!(!shown.get());

    let mut buf = Buffer::empty(area);
    sheet.render(area, &mut buf, |_, _| {});
    assert!(sheet.is_animating());
    while sheet.tick(at(16)) {}
    let mut buf = Buffer::empty(area);
    sheet.render(area, &mut buf, |_, _| {});
    assert_eq!(sheet.panel_area(), None);
}

#[test]
fn bottom_inset_is_left_free_for_every_height() {
    let area = Rect::new(0, 0, 30, 40);
    for height in [SheetHeight::Quarter, SheetHeight::Half, SheetHeight::ThreeQuarter] {
        let shown = Rc::new(Cell::new(true));
        let mut sheet = BottomSheet::with_options(
            Binding::from_cell(Rc::clone(&shown)),
            BottomSheetOptions {
                height,
                safe_area_rows: 3,
                ..Default::default()
            },
        );
        let mut buf = Buffer::empty(area);
        let mut content = None;
        sheet.render(area, &mut buf, |rect, buf| {
            buf.set_style(rect, ratatui::style::Style::default().bold());
            content = Some(rect);
        });

        let panel = sheet.panel_area().unwrap_or_default();
        let content = content.unwrap_or_default();
        assert_eq!(panel.bottom(), area.bottom(), "{height:?}");
        assert_eq!(content.bottom(), area.bottom() - 3, "{height:?}");
        for y in content.bottom()..area.bottom() {
            assert!(
                !buf[(5, y)].modifier.contains(ratatui::style::Modifier::BOLD),
                "{height:?} row {y}"
            );
        }
    }
}

#[test]
fn search_bar_inside_sheet_receives_clicks() {
    let (mut sheet, _shown) = sheet_with(SheetHeight::Half, true);
    let query = Rc::new(RefCell::new(String::new()));
    let searching = Rc::new(Cell::new(false));
    let mut search = SearchBar::new(
        Binding::from_ref_cell(Rc::clone(&query)),
        Binding::from_cell(Rc::clone(&searching)),
        "Search",
    );

    let area = Rect::new(0, 0, 30, 40);
    let mut buf = Buffer::empty(area);
    let mut bar = None;
    sheet.render(area, &mut buf, |content, buf| {
        let row = Rect::new(content.x, content.y, content.width, 1);
        search.render(row, buf);
        bar = Some(row);
    });
    let bar = bar.unwrap_or_default();
    assert_eq!(bar, Rect::new(1, 23, 28, 1));

    let click = left(bar.x + 3, bar.y, MouseEventKind::Down);
    assert_eq!(search.input(click), SearchBarAction::BeganEditing);
    assert!(searching.get());
}
