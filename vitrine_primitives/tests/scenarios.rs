// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of Dialog and Select driven through the `Ui` host.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use vitrine_event_state::key::{Key, KeyEvent, Modifiers};
use vitrine_event_state::listeners::ListenerKind;
use vitrine_primitives::{
    DialogContentProps, DialogProps, DocumentConfig, PointerEvent, SelectContentProps, SelectItem,
    SelectProps, Ui, WidgetId,
};

const TRIGGER: Rect = Rect::new(10.0, 10.0, 200.0, 40.0);

fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(T) + 'static) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    (calls, move |v| sink.borrow_mut().push(v))
}

fn panel() -> DialogContentProps {
    DialogContentProps {
        show_close_button: false,
        ..DialogContentProps::default()
    }
}

/// A Dialog whose content holds the buttons A, B and C.
fn abc_dialog(ui: &mut Ui, props: DialogProps) -> WidgetId {
    ui.build(|b| {
        b.dialog(props, |b| {
            b.dialog_trigger("Open", Rect::new(10.0, 10.0, 90.0, 40.0));
            b.dialog_content(panel(), |b| {
                b.button("A", Rect::new(400.0, 300.0, 460.0, 330.0));
                b.button("B", Rect::new(480.0, 300.0, 540.0, 330.0));
                b.button("C", Rect::new(560.0, 300.0, 620.0, 330.0));
            });
        })
    })
}

/// A Select over `items` with a trigger showing "Pick".
fn select_of(ui: &mut Ui, props: SelectProps, items: Vec<SelectItem>) -> WidgetId {
    ui.build(move |b| {
        b.select(props, TRIGGER, move |b| {
            b.select_trigger(TRIGGER, |b| {
                b.select_value("Pick", Rect::new(12.0, 12.0, 180.0, 38.0));
            });
            b.select_content(SelectContentProps::default(), move |b| {
                for item in &items {
                    b.select_item(item.clone());
                }
            });
        })
    })
}

fn label(ui: &Ui, label: &str) -> vitrine_tree::ElementId {
    ui.document()
        .find_by_label(label)
        .unwrap_or_else(|| panic!("no element labelled {label}"))
}

#[test]
fn uncontrolled_dialog_tracks_the_last_request() {
    let mut ui = Ui::default();
    let dialog = ui.build(|b| {
        b.dialog(DialogProps::new(), |b| {
            b.dialog_trigger("Open", Rect::new(10.0, 10.0, 90.0, 40.0));
            b.dialog_content(DialogContentProps::default(), |_| {});
        })
    });

    let mut opens = 0;
    for round in 0..5 {
        ui.click_label("Open");
        opens += 1;
        assert_eq!(ui.is_open(dialog), Some(true), "round {round} did not open");
        assert_eq!(ui.document().overlay().slot_count(), 1, "content missing while open");

        // Alternate the ways of closing.
        if round % 2 == 0 {
            ui.click_label("Close");
        } else {
            ui.press(Key::Escape);
        }
        assert_eq!(ui.is_open(dialog), Some(false), "round {round} did not close");
        assert_eq!(ui.document().overlay().slot_count(), 0, "content left while closed");
    }

    let stats = ui.document().overlay().stats();
    assert_eq!(stats.mounts, opens, "one mount per open");
    assert_eq!(stats.unmounts, opens, "one unmount per close");
    assert!(ui.document().listeners().stats().is_balanced(), "listeners leaked");
}

#[test]
fn backdrop_click_closes_but_panel_click_does_not() {
    let mut ui = Ui::default();
    let dialog = abc_dialog(&mut ui, DialogProps::new());
    let at = Rect::new(10.0, 60.0, 200.0, 90.0);
    let select = ui.build(|b| {
        b.select(SelectProps::new(), at, |b| {
            b.select_trigger(at, |b| {
                b.select_value("Pick", at);
            });
            b.select_content(SelectContentProps::default(), |b| {
                b.select_item(SelectItem::new("n", "North"));
                b.select_item(SelectItem::new("s", "South"));
            });
        })
    });

    // Elements come and go between rounds, so later rounds run on reused slots.
    for round in 0..6 {
        ui.click(at.center());
        assert_eq!(ui.is_open(select), Some(true), "round {round}: select did not open");
        if round % 2 == 0 {
            ui.click_label("South");
        } else {
            ui.click(Point::new(900.0, 700.0));
        }
        assert_eq!(ui.is_open(select), Some(false), "round {round}: select did not close");

        ui.click_label("Open");
        assert_eq!(ui.is_open(dialog), Some(true), "round {round}: dialog did not open");

        // Inside the panel but on no control.
        ui.click(Point::new(700.0, 500.0));
        assert_eq!(ui.is_open(dialog), Some(true), "round {round}: panel click dismissed");

        ui.click(Point::new(50.0, 700.0));
        assert_eq!(ui.is_open(dialog), Some(false), "round {round}: backdrop click ignored");
    }
}

#[test]
fn controlled_dialog_only_notifies() {
    let (calls, on_change) = recorder::<bool>();
    let mut ui = Ui::default();
    let dialog = abc_dialog(&mut ui, DialogProps::new().open(false).on_open_change(on_change));
    assert_eq!(ui.is_controlled(dialog), Some(true));

    ui.click_label("Open");
    assert_eq!(*calls.borrow(), vec![true]);
    assert_eq!(ui.is_open(dialog), Some(false), "controlled dialog opened itself");
    assert_eq!(ui.document().overlay().slot_count(), 0);

    ui.set_dialog_open(dialog, true);
    assert_eq!(ui.is_open(dialog), Some(true));
    assert_eq!(ui.document().overlay().slot_count(), 1);
}

#[test]
fn controlled_open_dialog_survives_escape_until_the_owner_closes_it() {
    let (calls, on_change) = recorder::<bool>();
    let mut ui = Ui::default();
    let dialog = abc_dialog(&mut ui, DialogProps::new().open(true).on_open_change(on_change));

    // Nothing is portaled before the surface is ready.
    assert_eq!(ui.document().overlay().slot_count(), 0);

    ui.press(Key::Escape);
    assert_eq!(*calls.borrow(), vec![false]);
    assert_eq!(ui.is_open(dialog), Some(true), "controlled dialog closed itself");
    assert!(ui.content(dialog).is_some(), "content unmounted while still open");

    ui.set_dialog_open(dialog, false);
    assert_eq!(ui.is_open(dialog), Some(false));
    assert!(ui.content(dialog).is_none());
    assert!(ui.document().overlay().stats().is_balanced());
    assert!(ui.document().listeners().is_empty());
}

#[test]
fn dialog_opened_before_the_surface_mounts_on_attach() {
    let mut ui = Ui::default();
    let dialog = abc_dialog(&mut ui, DialogProps::new().default_open(true));
    assert_eq!(ui.is_open(dialog), Some(true));
    assert!(ui.content(dialog).is_none(), "mounted before the surface was ready");

    ui.attach_surface();
    assert!(ui.content(dialog).is_some());
    assert_eq!(ui.focused(), Some(label(&ui, "A")));
}

#[test]
fn focus_cycles_within_open_dialog() {
    let mut ui = Ui::default();
    let dialog = abc_dialog(&mut ui, DialogProps::new());
    ui.click_label("Open");

    let (a, b, c) = (label(&ui, "A"), label(&ui, "B"), label(&ui, "C"));
    assert_eq!(ui.focus_boundary(dialog), Some(&[a, b, c][..]));
    assert_eq!(ui.focused(), Some(a), "first tab stop focused on open");

    assert!(ui.focus(c));
    assert!(ui.press(Key::Tab), "wrap from the last stop is intercepted");
    assert_eq!(ui.focused(), Some(a));

    assert!(ui.key_down(KeyEvent::with_modifiers(Key::Tab, Modifiers::SHIFT)));
    assert_eq!(ui.focused(), Some(c));

    // Inside the boundary the platform order applies.
    assert!(ui.focus(a));
    assert!(!ui.press(Key::Tab));
    assert_eq!(ui.focused(), Some(b));
}

#[test]
fn dialog_without_tab_stops_leaves_focus_alone() {
    let mut ui = Ui::default();
    let dialog = ui.build(|b| {
        b.dialog(DialogProps::new(), |b| {
            b.dialog_trigger("Open", Rect::new(10.0, 10.0, 90.0, 40.0));
            b.dialog_content(panel(), |b| {
                b.dialog_title("Nothing to press", Rect::new(400.0, 220.0, 700.0, 250.0));
            });
        })
    });
    ui.click_label("Open");
    assert_eq!(ui.focus_boundary(dialog), Some(&[][..]));
    assert_eq!(ui.focused(), Some(label(&ui, "Open")));
}

#[test]
fn escape_closes_and_removes_the_key_listener() {
    let (calls, on_change) = recorder::<bool>();
    let mut ui = Ui::default();
    let dialog = abc_dialog(&mut ui, DialogProps::new().on_open_change(on_change));

    ui.click_label("Open");
    assert_eq!(ui.document().listeners().count_for(dialog), 1);

    ui.press(Key::Escape);
    assert_eq!(ui.is_open(dialog), Some(false));
    assert_eq!(ui.document().listeners().count(ListenerKind::KeyDown), 0);

    // A later Escape reaches nobody.
    ui.press(Key::Escape);
    assert_eq!(*calls.borrow(), vec![true, false]);
}

#[test]
fn dialog_locks_page_scroll_while_open() {
    let mut ui = Ui::new(DocumentConfig {
        page_extent: 2400.0,
        ..DocumentConfig::default()
    });
    abc_dialog(&mut ui, DialogProps::new());

    assert!(ui.scroll(Point::new(600.0, 600.0), 100.0));
    ui.click_label("Open");
    assert!(ui.document().is_scroll_locked());
    assert!(!ui.scroll(Point::new(600.0, 600.0), 100.0), "page scrolled under a dialog");

    ui.press(Key::Escape);
    assert!(!ui.document().is_scroll_locked());
    assert_eq!(ui.document().page_offset(), 100.0);
}

#[test]
fn nested_dialogs_each_claim_a_slot() {
    let mut ui = Ui::default();
    let outer = ui.build(|b| {
        b.dialog(DialogProps::new(), |b| {
            b.dialog_trigger("Outer", Rect::new(10.0, 10.0, 90.0, 40.0));
            b.dialog_content(panel(), |b| {
                b.dialog(DialogProps::new(), |b| {
                    b.dialog_trigger("Inner", Rect::new(400.0, 300.0, 480.0, 330.0));
                    b.dialog_content(
                        DialogContentProps {
                            bounds: Rect::new(500.0, 350.0, 800.0, 500.0),
                            ..DialogContentProps::default()
                        },
                        |b| {
                            b.dialog_title("Inner title", Rect::new(510.0, 360.0, 700.0, 380.0));
                        },
                    );
                });
            });
        })
    });

    ui.click_label("Outer");
    assert_eq!(ui.widget_count(), 2, "inner dialog instantiated with the content");
    ui.click_label("Inner");
    assert_eq!(ui.document().overlay().slot_count(), 2);
    assert_eq!(ui.document().listeners().count(ListenerKind::KeyDown), 2);

    // The inner close button binds to the inner dialog only.
    ui.click_label("Close");
    assert_eq!(ui.is_open(outer), Some(true));
    assert_eq!(ui.document().overlay().slot_count(), 1);

    // The outer trap sees Escape first; closing it tears the inner dialog down.
    ui.click_label("Inner");
    ui.press(Key::Escape);
    assert_eq!(ui.is_open(outer), Some(false));
    assert_eq!(ui.widget_count(), 1);
    assert!(ui.document().overlay().stats().is_balanced());
    assert!(ui.document().listeners().stats().is_balanced());
    assert!(ui.document().listeners().is_empty());
    assert_eq!(ui.document().scroll_lock_count(), 0);
}

#[test]
fn removing_an_open_dialog_unmounts_its_content() {
    let mut ui = Ui::default();
    let dialog = abc_dialog(&mut ui, DialogProps::new());
    ui.click_label("Open");
    assert!(ui.remove_widget(dialog));

    assert_eq!(ui.document().overlay().slot_count(), 0);
    assert!(ui.document().overlay().stats().is_balanced());
    assert!(ui.document().listeners().is_empty());
    assert!(!ui.document().is_scroll_locked());
    assert_eq!(ui.focused(), None);
    assert!(!ui.remove_widget(dialog));
}

#[test]
fn select_scenario_uncontrolled_without_default() {
    let mut ui = Ui::default();
    let select = select_of(
        &mut ui,
        SelectProps::new(),
        vec![SelectItem::new("A", "Alfa"), SelectItem::new("B", "Bravo")],
    );
    assert_eq!(ui.select_value(select), Some(""));

    ui.click_label("Pick");
    assert_eq!(ui.is_open(select), Some(true));
    ui.click_label("Bravo");
    assert_eq!(ui.select_value(select), Some("B"));
    assert_eq!(ui.is_open(select), Some(false));
    assert!(ui.content(select).is_none());

    // The trigger now shows the value.
    let trigger = ui.select_trigger(select).expect("select has a trigger");
    ui.click_element(trigger);
    assert_eq!(ui.is_selected(select, "B"), Some(true));
    assert_eq!(ui.is_selected(select, "A"), Some(false));
    let items = ui.select_items(select);
    let selected: Vec<_> = items
        .iter()
        .filter(|e| ui.is_item_selected(**e) == Some(true))
        .collect();
    assert_eq!(selected, vec![&items[1]], "exactly one item reports selected");
}

#[test]
fn controlled_select_reports_without_committing() {
    let (values, on_value) = recorder::<String>();
    let mut ui = Ui::default();
    let select = select_of(
        &mut ui,
        SelectProps::new().value("A").on_value_change(on_value),
        vec![SelectItem::new("A", "Alfa"), SelectItem::new("B", "Bravo")],
    );

    ui.click_label("A");
    ui.click_label("Bravo");
    assert_eq!(*values.borrow(), vec![String::from("B")]);
    assert_eq!(ui.select_value(select), Some("A"), "controlled value changed itself");
    assert_eq!(ui.is_open(select), Some(false), "selecting still closes");

    ui.set_select_value(select, "B");
    assert_eq!(ui.select_value(select), Some("B"));
    assert!(ui.document().find_by_label("B").is_some(), "value text follows the prop");
}

#[test]
fn pointer_inside_select_content_keeps_it_open() {
    let mut ui = Ui::default();
    let select = select_of(
        &mut ui,
        SelectProps::new(),
        vec![SelectItem::new("A", "Alfa"), SelectItem::new("B", "Bravo")],
    );
    ui.click_label("Pick");
    let content = ui.content(select).expect("open select has content");
    let bounds = ui.document().tree().get(content).expect("content is alive").bounds;

    // Press without release on an item, then on the trigger region.
    ui.pointer_down(PointerEvent::at(bounds.center()));
    assert_eq!(ui.is_open(select), Some(true));
    ui.pointer_down(PointerEvent::at(TRIGGER.center()));
    assert_eq!(ui.is_open(select), Some(true));

    ui.pointer_down(PointerEvent::at(Point::new(900.0, 700.0)));
    assert_eq!(ui.is_open(select), Some(false), "outside press must dismiss");
    assert_eq!(ui.document().listeners().count(ListenerKind::PointerDown), 0);
    assert!(ui.document().listeners().stats().is_balanced());
}

#[test]
fn disabled_item_ignores_selection() {
    let mut ui = Ui::default();
    let select = select_of(
        &mut ui,
        SelectProps::new().default_value("A"),
        vec![
            SelectItem::new("A", "Alfa"),
            SelectItem::new("C", "Charlie").disabled(true),
        ],
    );
    ui.click_label("A");
    let charlie = label(&ui, "Charlie");
    assert_eq!(ui.item(charlie).map(|i| i.disabled), Some(true));

    ui.click_element(charlie);
    assert_eq!(ui.select_value(select), Some("A"));
    assert_eq!(ui.is_open(select), Some(true));

    assert!(!ui.focus(charlie), "disabled items are not tab stops");
    assert!(!ui.press(Key::Enter));
    assert_eq!(ui.is_open(select), Some(true));
}

#[test]
fn select_works_from_the_keyboard() {
    let mut ui = Ui::default();
    let select = select_of(
        &mut ui,
        SelectProps::new(),
        vec![SelectItem::new("A", "Alfa"), SelectItem::new("B", "Bravo")],
    );
    let trigger = ui.select_trigger(select).expect("select has a trigger");
    assert!(ui.focus(trigger));
    assert!(ui.press(Key::Enter));
    assert_eq!(ui.is_open(select), Some(true));

    assert!(ui.focus(label(&ui, "Alfa")));
    assert!(ui.press(Key::Space));
    assert_eq!(ui.select_value(select), Some("A"));
    assert_eq!(ui.is_open(select), Some(false));
    assert_eq!(ui.focused(), None, "focus on removed content is dropped");
}

#[test]
fn select_scroll_indicators_follow_the_viewport() {
    let mut ui = Ui::default();
    let items = (0..20)
        .map(|i| SelectItem::new(format!("v{i}"), format!("Item {i}")))
        .collect();
    let select = select_of(&mut ui, SelectProps::new(), items);

    ui.click_label("Pick");
    let affordance = ui.scroll_affordance(select).expect("open select");
    assert!(!affordance.can_scroll_up);
    assert!(affordance.can_scroll_down);
    assert!(ui.document().is_rendered(label(&ui, "select-scroll-down")));
    assert!(!ui.document().is_rendered(label(&ui, "select-scroll-up")));

    let inside = Point::new(100.0, 200.0);
    assert!(ui.scroll(inside, 96.0));
    let affordance = ui.scroll_affordance(select).expect("open select");
    assert!(affordance.can_scroll_up && affordance.can_scroll_down);

    // 20 rows of 32 in a 384 viewport.
    assert!(ui.scroll(inside, 10_000.0));
    assert_eq!(ui.scroll_offset(select), Some(256.0));
    let affordance = ui.scroll_affordance(select).expect("open select");
    assert!(affordance.can_scroll_up);
    assert!(!affordance.can_scroll_down);
    assert!(!ui.scroll(inside, 10.0), "already at the end");

    // Focusing an item out of view scrolls it in.
    assert!(ui.focus(label(&ui, "Item 0")));
    assert_eq!(ui.scroll_offset(select), Some(0.0));

    // Reopening starts from the top.
    assert!(ui.scroll(inside, 64.0));
    ui.click(Point::new(900.0, 700.0));
    ui.click_label("Pick");
    assert_eq!(ui.scroll_offset(select), Some(0.0));
}

#[test]
fn select_inside_dialog_closes_independently() {
    let mut ui = Ui::default();
    let dialog = ui.build(|b| {
        b.dialog(DialogProps::new(), |b| {
            b.dialog_trigger("Open", Rect::new(10.0, 10.0, 90.0, 40.0));
            b.dialog_content(panel(), |b| {
                let at = Rect::new(400.0, 220.0, 600.0, 250.0);
                b.select(SelectProps::new(), at, |b| {
                    b.select_trigger(at, |b| {
                        b.select_value("Choose", at);
                    });
                    b.select_content(SelectContentProps::default(), |b| {
                        b.select_item(SelectItem::new("x", "Ex"));
                    });
                });
            });
        })
    });

    ui.click_label("Open");
    ui.click_label("Choose");
    assert_eq!(ui.widget_count(), 2);
    assert!(ui.document().find_by_label("Ex").is_some());

    ui.click_label("Ex");
    assert_eq!(ui.is_open(dialog), Some(true));
    assert!(ui.document().find_by_label("x").is_some());

    ui.press(Key::Escape);
    assert_eq!(ui.widget_count(), 1);
    assert!(ui.document().listeners().is_empty());
}
